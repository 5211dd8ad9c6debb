use std::f32::consts::TAU;

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::api::types::{Color, GearId};
use crate::components::path::CirclePath;
use crate::core::clock::DeltaClock;

const FULL_TURN: f64 = std::f64::consts::TAU;

/// Literal description of a gear, as written in the scene configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GearConfig {
    pub radius: f32,
    /// Placement of the gear's origin in world space.
    pub position: Vec3,
    /// Center of the circle in the gear's local space. An off-center
    /// circle orbits around the gear's origin as the gear rotates.
    pub rotation_center: Vec2,
    /// Samples around the circle (default: 10).
    pub points: usize,
    /// Radians added to the angle per frame tick.
    pub angular_velocity: f32,
    /// Line color as `0xRRGGBB` (default: 0x555555).
    pub color: u32,
    /// Stroke width in pixels (default: 1).
    pub line_width: f32,
    /// Length of each stationary phase in milliseconds.
    pub paused_duration: Option<f64>,
    /// Length of each rotating phase in milliseconds.
    pub moving_duration: Option<f64>,
}

impl Default for GearConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            position: Vec3::ZERO,
            rotation_center: Vec2::ZERO,
            points: 10,
            angular_velocity: 0.0,
            color: 0x555555,
            line_width: 1.0,
            paused_duration: None,
            moving_duration: None,
        }
    }
}

impl GearConfig {
    pub fn new(radius: f32) -> Self {
        Self {
            radius,
            ..Self::default()
        }
    }

    // -- Builder pattern --

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_center(mut self, center: Vec2) -> Self {
        self.rotation_center = center;
        self
    }

    pub fn with_points(mut self, points: usize) -> Self {
        self.points = points;
        self
    }

    pub fn with_angular_velocity(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    pub fn with_line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }

    /// Alternate between `paused_ms` of standing still and `moving_ms` of rotation.
    pub fn with_phases(mut self, paused_ms: f64, moving_ms: f64) -> Self {
        self.paused_duration = Some(paused_ms);
        self.moving_duration = Some(moving_ms);
        self
    }
}

/// Pause/move oscillator. Zero durations count as unset.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseTimer {
    paused_duration: Option<f64>,
    /// Countdown of the current stationary phase.
    paused_delay: f64,
    moving_duration: Option<f64>,
    /// Countdown of the current rotating phase.
    moving_delay: f64,
    is_paused: bool,
}

impl PhaseTimer {
    pub fn new(paused_duration: Option<f64>, moving_duration: Option<f64>) -> Self {
        let paused_duration = paused_duration.filter(|d| *d != 0.0);
        let moving_duration = moving_duration.filter(|d| *d != 0.0);
        Self {
            paused_duration,
            paused_delay: paused_duration.unwrap_or(0.0),
            moving_duration,
            moving_delay: moving_duration.unwrap_or(0.0),
            is_paused: false,
        }
    }

    /// A timer with no phases: the gear rotates every frame.
    pub fn untimed() -> Self {
        Self::new(None, None)
    }

    pub fn is_timed(&self) -> bool {
        self.paused_duration.is_some() || self.moving_duration.is_some()
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn paused_delay(&self) -> f64 {
        self.paused_delay
    }

    pub fn moving_delay(&self) -> f64 {
        self.moving_delay
    }

    /// Run one frame of the oscillator. Returns whether the gear rotates
    /// this frame.
    ///
    /// Branch order matters: the pause check runs before the move check, so
    /// when both countdowns expire on the same frame the gear resumes first.
    pub fn step(&mut self, clock: &mut DeltaClock) -> bool {
        if self.is_paused && self.paused_delay > 0.0 {
            self.paused_delay -= clock.read();
            false
        } else if let Some(duration) = self.paused_duration.filter(|_| self.paused_delay <= 0.0) {
            self.paused_delay = duration;
            self.is_paused = false;
            false
        } else if let Some(duration) = self.moving_duration.filter(|_| self.moving_delay <= 0.0) {
            self.moving_delay = duration;
            self.is_paused = true;
            false
        } else if self.moving_duration.is_some() {
            self.moving_delay -= clock.read();
            true
        } else {
            true
        }
    }
}

impl Default for PhaseTimer {
    fn default() -> Self {
        Self::untimed()
    }
}

/// A decorative circle that rotates about its own origin.
#[derive(Debug, Clone)]
pub struct Gear {
    id: GearId,
    /// Rotation about Z in radians, kept within (-2π, 2π) so that long
    /// runs keep full precision.
    angle: f64,
    angular_velocity: f32,
    path: CirclePath,
    placement: Vec3,
    color: Color,
    line_width: f32,
    timer: PhaseTimer,
    clock: DeltaClock,
    /// Local-space samples, computed once.
    samples: Vec<Vec2>,
}

impl Gear {
    pub fn new(id: GearId, config: &GearConfig) -> Self {
        let path = CirclePath::new(config.rotation_center, config.radius, config.points);
        Self {
            id,
            angle: 0.0,
            angular_velocity: config.angular_velocity,
            samples: path.sample(),
            path,
            placement: config.position,
            color: Color::from_hex(config.color),
            line_width: config.line_width,
            timer: PhaseTimer::new(config.paused_duration, config.moving_duration),
            clock: DeltaClock::new(),
        }
    }

    /// Advance by one frame tick. `elapsed_ms` is the time since the
    /// previous frame.
    pub fn advance(&mut self, elapsed_ms: f64) {
        self.clock.accumulate(elapsed_ms);
        if self.timer.step(&mut self.clock) {
            self.angle = (self.angle + self.angular_velocity as f64) % FULL_TURN;
        }
    }

    pub fn id(&self) -> GearId {
        self.id
    }

    /// Current rotation, within (-2π, 2π). Keeps the sign of the rotation.
    pub fn angle(&self) -> f32 {
        self.angle as f32
    }

    /// Angle wrapped into [0, 2π).
    pub fn display_angle(&self) -> f32 {
        let wrapped = self.angle.rem_euclid(FULL_TURN) as f32;
        if wrapped >= TAU { 0.0 } else { wrapped }
    }

    pub fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    pub fn path(&self) -> &CirclePath {
        &self.path
    }

    pub fn placement(&self) -> Vec3 {
        self.placement
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn line_width(&self) -> f32 {
        self.line_width
    }

    pub fn timer(&self) -> &PhaseTimer {
        &self.timer
    }

    /// Closed polyline in world space: each local sample rotated by the
    /// current angle about the gear's origin, then offset by the placement.
    pub fn world_points(&self) -> impl Iterator<Item = Vec3> + '_ {
        let rotation = Quat::from_rotation_z(self.angle as f32);
        self.samples
            .iter()
            .map(move |p| self.placement + rotation * Vec3::new(p.x, p.y, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Advance `frames` times at a fixed `dt`, recording 'M' for frames that
    /// rotated and '.' for frames that stood still.
    fn trace(gear: &mut Gear, dt: f64, frames: usize) -> String {
        (0..frames)
            .map(|_| {
                let before = gear.angle();
                gear.advance(dt);
                if gear.angle() != before { 'M' } else { '.' }
            })
            .collect()
    }

    #[test]
    fn untimed_gear_rotates_every_frame() {
        let mut gear = Gear::new(GearId(0), &GearConfig::new(10.0).with_angular_velocity(0.002));
        for _ in 0..500 {
            gear.advance(16.0);
        }
        assert!((gear.angle() - 500.0 * 0.002).abs() < 1e-4, "angle = {}", gear.angle());
    }

    #[test]
    fn long_runs_keep_exact_rotation() {
        let omega = 0.002f32;
        let mut gear = Gear::new(GearId(0), &GearConfig::new(10.0).with_angular_velocity(omega));
        let frames = 10_000_000u64;
        for _ in 0..frames {
            gear.advance(16.0);
        }

        let expected = (frames as f64 * omega as f64).rem_euclid(FULL_TURN) as f32;
        let diff = (gear.display_angle() - expected).abs();
        assert!(
            diff.min(TAU - diff) < 1e-4,
            "display_angle = {}, expected {expected}",
            gear.display_angle()
        );

        let before = gear.angle();
        gear.advance(16.0);
        assert_ne!(gear.angle(), before, "gear stopped rotating");
        assert!(gear.angle().abs() < TAU);
    }

    #[test]
    fn untimed_gear_ignores_elapsed_time() {
        let mut a = Gear::new(GearId(0), &GearConfig::new(1.0).with_angular_velocity(0.1));
        let mut b = a.clone();
        a.advance(1.0);
        b.advance(1000.0);
        assert_eq!(a.angle(), b.angle());
    }

    #[test]
    fn phased_gear_starts_moving() {
        let mut gear = Gear::new(
            GearId(1),
            &GearConfig::new(5.0).with_angular_velocity(-0.01).with_phases(500.0, 500.0),
        );
        gear.advance(16.0);
        assert_eq!(gear.angle(), -0.01);
        assert!(!gear.timer().is_paused());
    }

    #[test]
    fn phased_gear_alternates() {
        let mut gear = Gear::new(
            GearId(1),
            &GearConfig::new(5.0).with_angular_velocity(-0.01).with_phases(500.0, 500.0),
        );
        // First read starts the clock, so the opening window has one extra
        // frame. After that each 1000ms cycle is 6 still frames (including
        // both transition frames) followed by 4 moving frames.
        let expected = format!("MMMMMM{}", "......MMMM".repeat(5));
        assert_eq!(trace(&mut gear, 100.0, 56), expected);
    }

    #[test]
    fn cycle_length_is_sum_of_phases() {
        let mut gear = Gear::new(
            GearId(1),
            &GearConfig::new(5.0).with_angular_velocity(0.01).with_phases(300.0, 500.0),
        );
        let trace = trace(&mut gear, 100.0, 62);
        assert!(trace.starts_with("MMMMMM"));
        // Steady state repeats every 800ms = 8 frames.
        assert_eq!(&trace[6..14], "....MMMM");
        assert_eq!(&trace[14..22], "....MMMM");
        assert_eq!(&trace[54..62], "....MMMM");
    }

    #[test]
    fn never_moves_while_paused() {
        let mut gear = Gear::new(
            GearId(1),
            &GearConfig::new(5.0).with_angular_velocity(0.01).with_phases(500.0, 500.0),
        );
        for _ in 0..200 {
            let before = gear.angle();
            let was_paused = gear.timer().is_paused() && gear.timer().paused_delay() > 0.0;
            gear.advance(16.0);
            if was_paused {
                assert_eq!(gear.angle(), before);
            }
        }
    }

    #[test]
    fn moving_only_gear_skips_transition_frames() {
        let mut gear = Gear::new(
            GearId(2),
            &GearConfig {
                moving_duration: Some(500.0),
                angular_velocity: 0.01,
                ..GearConfig::new(1.0)
            },
        );
        assert_eq!(trace(&mut gear, 100.0, 17), "MMMMMM.MMMM.MMMM.");
    }

    #[test]
    fn paused_only_gear_behaves_untimed() {
        let mut gear = Gear::new(
            GearId(3),
            &GearConfig {
                paused_duration: Some(500.0),
                angular_velocity: 0.01,
                ..GearConfig::new(1.0)
            },
        );
        assert_eq!(trace(&mut gear, 100.0, 20), "M".repeat(20));
    }

    #[test]
    fn zero_durations_count_as_unset() {
        let timer = PhaseTimer::new(Some(0.0), Some(0.0));
        assert!(!timer.is_timed());
    }

    #[test]
    fn display_angle_wraps() {
        let mut gear = Gear::new(GearId(0), &GearConfig::new(1.0).with_angular_velocity(-1.0));
        gear.advance(16.0);
        assert!((gear.display_angle() - (TAU - 1.0)).abs() < 1e-5);
    }

    #[test]
    fn world_points_follow_rotation_and_placement() {
        let config = GearConfig::new(1.0)
            .with_position(Vec3::new(-4.0, -0.5, 0.0))
            .with_center(Vec2::new(10.0, 0.0))
            .with_points(4)
            .with_angular_velocity(std::f32::consts::FRAC_PI_2);
        let mut gear = Gear::new(GearId(0), &config);

        let first = gear.world_points().next().unwrap();
        assert!((first - Vec3::new(7.0, -0.5, 0.0)).length() < 1e-5);

        // A quarter turn carries the off-center circle around the origin.
        gear.advance(16.0);
        let first = gear.world_points().next().unwrap();
        assert!((first - Vec3::new(-4.0, 10.5, 0.0)).length() < 1e-4, "first = {first}");
        assert_eq!(gear.world_points().count(), 4);
    }
}
