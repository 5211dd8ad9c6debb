use std::f32::consts::TAU;

use glam::Vec2;

/// Circular path approximated by a closed polyline of `points` samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePath {
    /// Center in the gear's local space.
    pub center: Vec2,
    pub radius: f32,
    /// Number of samples around the circle.
    pub points: usize,
}

impl CirclePath {
    pub fn new(center: Vec2, radius: f32, points: usize) -> Self {
        Self { center, radius, points }
    }

    /// Angle between consecutive samples.
    pub fn step(&self) -> f32 {
        TAU / self.points as f32
    }

    /// Sample `points` equally spaced angles over [0, 2π).
    /// The polyline is closed: the last sample connects back to the first.
    pub fn sample(&self) -> Vec<Vec2> {
        let step = self.step();
        (0..self.points)
            .map(|k| {
                let angle = step * k as f32;
                self.center + Vec2::new(angle.cos(), angle.sin()) * self.radius
            })
            .collect()
    }
}
