use glam::Vec2;

use crate::api::types::{Color, SurfaceSize};
use crate::core::scene::Scene;
use crate::renderer::camera::PerspectiveCamera;

/// A gear outline projected to surface pixels. The outline is closed: the
/// last point connects back to the first.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedLine {
    pub points: Vec<Vec2>,
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f32,
}

/// Per-frame projected lines. Reuses allocations across frames.
#[derive(Debug, Default)]
pub struct FrameLines {
    lines: Vec<ProjectedLine>,
    len: usize,
}

impl FrameLines {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Borrow the next line slot, reusing a previous frame's point buffer.
    fn next_slot(&mut self) -> &mut ProjectedLine {
        if self.len == self.lines.len() {
            self.lines.push(ProjectedLine {
                points: Vec::new(),
                color: Color::default(),
                width: 1.0,
            });
        }
        let slot = &mut self.lines[self.len];
        self.len += 1;
        slot.points.clear();
        slot
    }

    /// Drop the most recently taken slot.
    fn discard_last(&mut self) {
        self.len -= 1;
    }

    pub fn as_slice(&self) -> &[ProjectedLine] {
        &self.lines[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Project every gear's world-space outline through the camera.
/// Gears with any point behind the camera are skipped for the frame.
pub fn build_frame_lines(
    scene: &Scene,
    camera: &PerspectiveCamera,
    surface: SurfaceSize,
    out: &mut FrameLines,
) {
    out.clear();

    for gear in scene.iter() {
        let slot = out.next_slot();
        slot.color = gear.color();
        slot.width = gear.line_width();

        let mut visible = true;
        for world in gear.world_points() {
            match camera.project_to_surface(world, surface) {
                Some(p) => slot.points.push(p),
                None => {
                    visible = false;
                    break;
                }
            }
        }

        if !visible || slot.points.len() < 2 {
            out.discard_last();
        }
    }
}
