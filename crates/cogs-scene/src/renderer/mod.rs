pub mod camera;
pub mod traits;
