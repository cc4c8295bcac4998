//! Canvas that builds a triangle list

use glam::Vec2;

use super::shapes;
use super::vertex::Vertex;
use super::Canvas;
use crate::sim::blob::Color;

/// Text is not tessellated; backends with a font rasterizer pick it up here
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub center: Vec2,
    pub color: Color,
}

/// Headless canvas collecting vertices in screen pixels
#[derive(Debug, Clone)]
pub struct MeshCanvas {
    width: f32,
    height: f32,
    pub clear_color: [f32; 4],
    pub vertices: Vec<Vertex>,
    pub texts: Vec<TextItem>,
}

impl MeshCanvas {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            clear_color: Color::BACKGROUND.to_rgba(),
            vertices: Vec::new(),
            texts: Vec::new(),
        }
    }

    /// Raw bytes for a vertex buffer upload
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

impl Canvas for MeshCanvas {
    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.clear_color = color.to_rgba();
        self.vertices.clear();
        self.texts.clear();
    }

    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let segments = shapes::segments_for_radius(radius);
        self.vertices
            .extend(shapes::circle(center, radius, color.to_rgba(), segments));
    }

    fn draw_text(&mut self, text: &str, center: Vec2, color: Color) {
        self.texts.push(TextItem {
            text: text.to_string(),
            center,
            color,
        });
    }
}
