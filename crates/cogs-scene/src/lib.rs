pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod host;

// Re-export key types at crate root for convenience
pub use api::config::{SceneConfig, CameraConfig, StartupConfig};
pub use api::types::{GearId, SurfaceSize, Color};
pub use components::gear::{Gear, GearConfig, PhaseTimer};
pub use components::path::CirclePath;
pub use core::clock::{FrameClock, DeltaClock};
pub use core::scene::Scene;
pub use core::startup::{fade_delay_ms, shows_placeholder};
pub use renderer::camera::PerspectiveCamera;
pub use renderer::traits::{Renderer, FrameData};
pub use systems::render::{ProjectedLine, FrameLines, build_frame_lines};
pub use host::{SceneHost, HostState};

#[cfg(feature = "vectors")]
pub use systems::vector::{VectorState, VectorVertex};
