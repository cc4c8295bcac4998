//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;

/// Fewest segments used for any circle
pub const MIN_CIRCLE_SEGMENTS: u32 = 8;
/// Most segments used for any circle
pub const MAX_CIRCLE_SEGMENTS: u32 = 96;

/// Segment count giving roughly 4px edges, within the min/max caps
pub fn segments_for_radius(radius: f32) -> u32 {
    let circumference = TAU * radius.max(0.0);
    ((circumference / 4.0).ceil() as u32).clamp(MIN_CIRCLE_SEGMENTS, MAX_CIRCLE_SEGMENTS)
}

/// Generate vertices for a filled circle (triangle fan as a list)
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * TAU;
        let theta2 = ((i + 1) as f32 / segments as f32) * TAU;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}
