//! Rendering seam
//!
//! The simulation never draws. `draw_frame` walks a `GameState` and issues
//! primitive calls against a `Canvas`, which a windowing backend implements.
//! `MeshCanvas` is the built-in backend: it tessellates into a vertex list
//! ready for a GPU upload.

pub mod mesh;
pub mod shapes;
pub mod vertex;

pub use mesh::{MeshCanvas, TextItem};
pub use vertex::Vertex;

use glam::Vec2;

use crate::sim::blob::Color;
use crate::sim::state::GameState;

/// Y position of the centered score line
pub const SCORE_TEXT_Y: f32 = 100.0;

/// A surface the game can draw on
pub trait Canvas {
    /// Drawable size in pixels
    fn size(&self) -> (f32, f32);
    /// Fill the whole surface
    fn clear(&mut self, color: Color);
    fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color);
    /// Text centered on `center`
    fn draw_text(&mut self, text: &str, center: Vec2, color: Color);
}

/// HUD score line
pub fn score_text(state: &GameState) -> String {
    format!("Player radius: {:.2}", state.score())
}

/// Draw one frame: background, player, enemies, then the score
pub fn draw_frame(state: &GameState, canvas: &mut dyn Canvas) {
    canvas.clear(Color::BACKGROUND);

    let player = &state.player.body;
    canvas.draw_circle(player.pos, player.radius, player.color);
    for enemy in &state.population.enemies {
        canvas.draw_circle(enemy.body.pos, enemy.body.radius, enemy.body.color);
    }

    let (width, _) = canvas.size();
    canvas.draw_text(
        &score_text(state),
        Vec2::new((width / 2.0).floor(), SCORE_TEXT_Y),
        Color::SCORE_TEXT,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Arena;
    use crate::tuning::Tuning;

    /// Records calls instead of drawing
    #[derive(Default)]
    struct Recorder {
        circles: Vec<(Vec2, f32, Color)>,
        texts: Vec<String>,
        clears: usize,
    }

    impl Canvas for Recorder {
        fn size(&self) -> (f32, f32) {
            (800.0, 600.0)
        }
        fn clear(&mut self, _color: Color) {
            self.clears += 1;
        }
        fn draw_circle(&mut self, center: Vec2, radius: f32, color: Color) {
            self.circles.push((center, radius, color));
        }
        fn draw_text(&mut self, text: &str, _center: Vec2, _color: Color) {
            self.texts.push(text.to_string());
        }
    }

    #[test]
    fn test_draw_frame_order() {
        let state = GameState::new(5, Arena::new(800.0, 600.0), Tuning::default());
        let mut rec = Recorder::default();
        draw_frame(&state, &mut rec);

        assert_eq!(rec.clears, 1);
        assert_eq!(rec.circles.len(), 1 + state.population.len());
        assert_eq!(rec.circles[0].2, Color::BLACK);
        assert_eq!(rec.circles[0].1, 15.0);
        assert_eq!(rec.texts, vec!["Player radius: 15.00".to_string()]);
    }
}
