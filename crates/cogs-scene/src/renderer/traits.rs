//! Renderer trait implemented by platform backends.
//!
//! The engine never touches a graphics API. Each frame it hands a
//! [`FrameData`] to whatever implements [`Renderer`]: WebGL2 in the browser
//! bridge, a recording stub in tests.

use crate::api::types::{Color, SurfaceSize};
use crate::systems::render::ProjectedLine;

/// Renderer trait for graphics backends.
pub trait Renderer {
    /// Backend identifier (e.g., "webgl2", "recording").
    fn backend(&self) -> &'static str;

    /// Draw a complete frame.
    fn draw(&mut self, frame: &FrameData);

    /// Resize the backing buffer to match the surface.
    fn resize(&mut self, size: SurfaceSize);
}

/// Complete frame data for rendering.
pub struct FrameData<'a> {
    /// Clear color.
    pub background: Color,
    /// Surface size in CSS pixels; line points are in this space.
    pub surface: SurfaceSize,
    /// Projected gear outlines in draw order.
    pub lines: &'a [ProjectedLine],
    /// Stroked outlines as a flat triangle list, 6 floats per vertex
    /// (x, y, r, g, b, a).
    #[cfg(feature = "vectors")]
    pub vertices: &'a [f32],
}

impl FrameData<'_> {
    /// Number of triangle-list vertices in `vertices`.
    #[cfg(feature = "vectors")]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / crate::systems::vector::VectorVertex::FLOATS
    }
}
