use glam::{Mat4, Vec2, Vec3};

use crate::api::config::CameraConfig;
use crate::api::types::SurfaceSize;

/// Perspective camera sitting on the +Z axis, looking down −Z.
///
/// The projection matrix is cached; call `update_projection_matrix` after
/// changing the aspect or clip planes (`resize` does it for you).
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Width / height of the surface.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Camera position in world space.
    pub position: Vec3,
    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov_degrees,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    /// Build a camera from configuration for a surface of the given size.
    pub fn from_config(config: &CameraConfig, surface: SurfaceSize) -> Self {
        let mut camera = Self::new(config.fov_degrees, surface.aspect(), config.near, config.far);
        camera.position = Vec3::new(0.0, 0.0, config.distance);
        camera
    }

    /// Recompute the cached projection from the current parameters.
    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh_gl(self.fov_degrees.to_radians(), self.aspect, self.near, self.far);
    }

    /// Match the aspect to a new surface size and refresh the projection.
    pub fn resize(&mut self, surface: SurfaceSize) {
        self.aspect = surface.aspect();
        self.update_projection_matrix();
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(-self.position)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Project a world-space point to normalized device coordinates.
    /// Returns `None` for points behind the camera.
    pub fn project(&self, world: Vec3) -> Option<Vec3> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        Some(clip.truncate() / clip.w)
    }

    /// Project a world-space point to surface pixels (origin top-left, Y down).
    pub fn project_to_surface(&self, world: Vec3, surface: SurfaceSize) -> Option<Vec2> {
        let ndc = self.project(world)?;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * surface.width as f32,
            (1.0 - ndc.y) * 0.5 * surface.height as f32,
        ))
    }
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), SurfaceSize::new(1, 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_sets_exact_aspect() {
        let mut cam = PerspectiveCamera::default();
        cam.resize(SurfaceSize::new(1920, 1080));
        assert_eq!(cam.aspect, 1920.0 / 1080.0);
        cam.resize(SurfaceSize::new(375, 667));
        assert_eq!(cam.aspect, 375.0 / 667.0);
    }

    #[test]
    fn resize_refreshes_projection() {
        let mut cam = PerspectiveCamera::default();
        let before = cam.projection_matrix();
        cam.resize(SurfaceSize::new(800, 400));
        assert_ne!(before, cam.projection_matrix());
        let expected = Mat4::perspective_rh_gl(75f32.to_radians(), 2.0, 0.1, 1000.0);
        assert_eq!(cam.projection_matrix(), expected);
    }

    #[test]
    fn origin_projects_to_surface_center() {
        let cam = PerspectiveCamera::from_config(&CameraConfig::default(), SurfaceSize::new(800, 600));
        let p = cam.project_to_surface(Vec3::ZERO, SurfaceSize::new(800, 600)).unwrap();
        assert!((p - Vec2::new(400.0, 300.0)).length() < 1e-3);
    }

    #[test]
    fn positive_y_is_up_on_screen() {
        let surface = SurfaceSize::new(800, 600);
        let cam = PerspectiveCamera::from_config(&CameraConfig::default(), surface);
        let p = cam.project_to_surface(Vec3::new(0.0, 5.0, 0.0), surface).unwrap();
        assert!(p.y < 300.0);
    }

    #[test]
    fn points_behind_camera_are_rejected() {
        let cam = PerspectiveCamera::default();
        assert!(cam.project(Vec3::new(0.0, 0.0, 20.0)).is_none());
    }

    #[test]
    fn view_projection_moves_world_by_camera_distance() {
        let cam = PerspectiveCamera::default();
        let expected = cam.projection_matrix() * Mat4::from_translation(Vec3::new(0.0, 0.0, -15.0));
        assert_eq!(cam.view_projection(), expected);
    }
}
