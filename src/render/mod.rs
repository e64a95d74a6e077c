//! Renderer seam. Real 3D backends live outside the crate; the text
//! renderer draws the same scene snapshot for headless runs and tests.

mod text;

pub use text::TextRenderer;

use crate::scene::SceneObject;

/// Draws a scene snapshot polled from the [`crate::DataModel`].
pub trait Renderer {
    type Error;

    fn render(&mut self, objects: &[SceneObject]) -> Result<(), Self::Error>;
}
