//! Lyon-based stroke tessellation for gear outlines.
//!
//! WebGL line primitives ignore line width, so outlines are tessellated on
//! the CPU into a flat triangle list that the backend uploads as-is.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, LineJoin, StrokeOptions, StrokeTessellator, StrokeVertex,
    StrokeVertexConstructor, VertexBuffers,
};

use crate::api::types::Color;
use crate::systems::render::ProjectedLine;

/// Per-vertex data for stroked outlines.
/// 6 floats = 24 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct VectorVertex {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl VectorVertex {
    /// Number of floats per vertex.
    pub const FLOATS: usize = 6;
    /// Stride in bytes.
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4; // 24
}

/// Vertex constructor for lyon stroke tessellation.
struct StrokeVertexCtor {
    color: Color,
}

impl StrokeVertexConstructor<VectorVertex> for StrokeVertexCtor {
    fn new_vertex(&mut self, vertex: StrokeVertex) -> VectorVertex {
        VectorVertex {
            x: vertex.position().x,
            y: vertex.position().y,
            r: self.color.r,
            g: self.color.g,
            b: self.color.b,
            a: self.color.a,
        }
    }
}

/// Holds the lyon tessellator and the output vertex buffer.
/// Cleared each frame and refilled from the projected lines.
pub struct VectorState {
    stroke_tess: StrokeTessellator,
    geometry: VertexBuffers<VectorVertex, u32>,
    buffer: Vec<f32>,
}

impl VectorState {
    pub fn new() -> Self {
        Self {
            stroke_tess: StrokeTessellator::new(),
            geometry: VertexBuffers::new(),
            buffer: Vec::with_capacity(4096 * VectorVertex::FLOATS),
        }
    }

    /// Clear the vertex buffer. Called at the start of each frame.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Number of vertices currently in the buffer.
    pub fn vertex_count(&self) -> usize {
        self.buffer.len() / VectorVertex::FLOATS
    }

    /// The flat float buffer.
    pub fn as_slice(&self) -> &[f32] {
        &self.buffer
    }

    /// Flush indexed geometry to the flat buffer as triangle list.
    fn flush_geometry(&mut self) {
        for idx in &self.geometry.indices {
            let v = &self.geometry.vertices[*idx as usize];
            self.buffer.extend_from_slice(&[v.x, v.y, v.r, v.g, v.b, v.a]);
        }
        self.geometry.vertices.clear();
        self.geometry.indices.clear();
    }

    /// Replace the buffer with the strokes of every line.
    pub fn tessellate_lines(&mut self, lines: &[ProjectedLine]) {
        self.clear();
        for line in lines {
            self.stroke_polygon(&line.points, line.width, line.color);
        }
    }

    /// Tessellate a stroked closed polygon.
    pub fn stroke_polygon(&mut self, points: &[Vec2], width: f32, color: Color) {
        if points.len() < 2 {
            return;
        }
        let path = build_closed_path(points);
        self.stroke_path(&path, width, color);
    }

    /// Tessellate an arbitrary stroked lyon Path.
    pub fn stroke_path(&mut self, path: &Path, width: f32, color: Color) {
        let options = StrokeOptions::tolerance(0.5)
            .with_line_width(width)
            .with_line_join(LineJoin::Miter);
        let result = self.stroke_tess.tessellate_path(
            path,
            &options,
            &mut BuffersBuilder::new(&mut self.geometry, StrokeVertexCtor { color }),
        );

        match result {
            Ok(_) => self.flush_geometry(),
            Err(err) => {
                log::warn!("stroke tessellation failed: {err:?}");
                self.geometry.vertices.clear();
                self.geometry.indices.clear();
            }
        }
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}

fn build_closed_path(points: &[Vec2]) -> Path {
    let mut builder = Path::builder();
    builder.begin(point(points[0].x, points[0].y));
    for p in &points[1..] {
        builder.line_to(point(p.x, p.y));
    }
    builder.end(true);
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    #[test]
    fn vector_vertex_is_24_bytes() {
        assert_eq!(size_of::<VectorVertex>(), 24);
        assert_eq!(VectorVertex::FLOATS, 6);
        assert_eq!(VectorVertex::STRIDE_BYTES, 24);
    }

    #[test]
    fn stroke_polygon_produces_triangles() {
        let mut state = VectorState::new();
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(100.0, 0.0),
            Vec2::new(100.0, 100.0),
            Vec2::new(0.0, 100.0),
        ];
        state.stroke_polygon(&square, 2.0, Color::WHITE);
        assert!(state.vertex_count() > 0);
        assert_eq!(state.vertex_count() % 3, 0);
    }

    #[test]
    fn vertices_carry_line_color() {
        let mut state = VectorState::new();
        let red = Color::from_hex(0xe32110);
        state.stroke_polygon(&[Vec2::ZERO, Vec2::new(50.0, 0.0), Vec2::new(50.0, 50.0)], 1.0, red);
        let floats = state.as_slice();
        assert!(floats.len() >= VectorVertex::FLOATS);
        assert_eq!(&floats[2..6], &[red.r, red.g, red.b, red.a]);
    }

    #[test]
    fn tessellate_lines_replaces_buffer() {
        let mut state = VectorState::new();
        let line = ProjectedLine {
            points: vec![Vec2::ZERO, Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0)],
            color: Color::WHITE,
            width: 1.0,
        };
        state.tessellate_lines(std::slice::from_ref(&line));
        let first = state.vertex_count();
        state.tessellate_lines(std::slice::from_ref(&line));
        assert_eq!(state.vertex_count(), first);

        state.tessellate_lines(&[]);
        assert_eq!(state.vertex_count(), 0);
    }

    #[test]
    fn degenerate_input_produces_nothing() {
        let mut state = VectorState::new();
        state.stroke_polygon(&[], 1.0, Color::WHITE);
        state.stroke_polygon(&[Vec2::ZERO], 1.0, Color::WHITE);
        assert_eq!(state.vertex_count(), 0);
    }
}
