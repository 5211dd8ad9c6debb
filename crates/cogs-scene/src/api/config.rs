use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::components::gear::GearConfig;

/// Perspective camera parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees (default: 75).
    pub fov_degrees: f32,
    /// Near clip plane (default: 0.1).
    pub near: f32,
    /// Far clip plane (default: 1000).
    pub far: f32,
    /// Distance of the camera from the origin along +Z (default: 15).
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            distance: 15.0,
        }
    }
}

/// Startup fade and mobile placeholder thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StartupConfig {
    /// Surfaces narrower than this get a delayed fade-in (default: 600).
    pub narrow_width: u32,
    /// Fade delay for narrow surfaces in milliseconds (default: 2000).
    pub narrow_fade_delay_ms: u32,
    /// Viewports at or below this width show the placeholder image (default: 600).
    pub placeholder_max_width: u32,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            narrow_width: 600,
            narrow_fade_delay_ms: 2000,
            placeholder_max_width: 600,
        }
    }
}

/// Configuration for the backdrop scene.
///
/// `Default` is the portfolio scene: a large slow gear, a medium gear that
/// alternates 500ms pause/move phases and a small red accent gear orbiting
/// off-center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Background color as `0xRRGGBB` (default: 0x111111).
    pub background: u32,
    pub camera: CameraConfig,
    pub startup: StartupConfig,
    /// Gears in draw order.
    pub gears: Vec<GearConfig>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            background: 0x111111,
            camera: CameraConfig::default(),
            startup: StartupConfig::default(),
            gears: vec![
                GearConfig::new(10.0)
                    .with_position(Vec3::new(-4.0, -0.5, 0.0))
                    .with_points(10)
                    .with_angular_velocity(0.002),
                GearConfig::new(5.0)
                    .with_position(Vec3::new(-6.0, 2.5, 0.0))
                    .with_points(10)
                    .with_angular_velocity(-0.01)
                    .with_phases(500.0, 500.0),
                GearConfig::new(0.5)
                    .with_position(Vec3::new(-4.0, -0.5, 0.0))
                    .with_center(Vec2::new(10.0, 0.0))
                    .with_points(4)
                    .with_color(0xe32110)
                    .with_line_width(2.0)
                    .with_angular_velocity(-0.005),
            ],
        }
    }
}

impl SceneConfig {
    /// Parse a configuration from JSON. Missing fields use the defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_scene_has_three_gears() {
        let config = SceneConfig::default();
        assert_eq!(config.gears.len(), 3);
        assert_eq!(config.background, 0x111111);
        assert_eq!(config.camera.fov_degrees, 75.0);

        let medium = &config.gears[1];
        assert_eq!(medium.paused_duration, Some(500.0));
        assert_eq!(medium.moving_duration, Some(500.0));

        let accent = &config.gears[2];
        assert_eq!(accent.color, 0xe32110);
        assert_eq!(accent.line_width, 2.0);
        assert_eq!(accent.rotation_center, Vec2::new(10.0, 0.0));
    }

    #[test]
    fn parse_partial_config_keeps_defaults() {
        let json = r#"{
            "background": 1193046,
            "camera": { "distance": 20.0 },
            "gears": [
                { "radius": 3.0, "position": [1.0, 2.0, 0.0], "angular_velocity": 0.1 }
            ]
        }"#;
        let config = SceneConfig::from_json(json).unwrap();
        assert_eq!(config.background, 0x123456);
        assert_eq!(config.camera.distance, 20.0);
        assert_eq!(config.camera.near, 0.1);
        assert_eq!(config.startup.narrow_width, 600);

        assert_eq!(config.gears.len(), 1);
        let gear = &config.gears[0];
        assert_eq!(gear.radius, 3.0);
        assert_eq!(gear.points, 10);
        assert_eq!(gear.color, 0x555555);
        assert_eq!(gear.paused_duration, None);
    }

    #[test]
    fn empty_json_is_default_scene() {
        let config = SceneConfig::from_json("{}").unwrap();
        assert_eq!(config, SceneConfig::default());
    }
}
