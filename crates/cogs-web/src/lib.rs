pub mod runner;
pub mod webgl;

pub use runner::{MountOptions, SceneRunner};
pub use webgl::WebGlRenderer;

/// Generate the `#[wasm_bindgen]` exports for a backdrop scene.
///
/// Generates:
/// - `thread_local!` storage for the SceneRunner
/// - `scene_mount(element_id, placeholder_url)`: installs logging and the panic
///   hook, then mounts (replacing any previous mount)
/// - `scene_unmount()`: cancels the frame loop and detaches listeners
/// - `scene_is_loaded()` / `scene_frame_count()` accessors
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use cogs_scene::SceneConfig;
///
/// cogs_web::export_scene!(SceneConfig::default(), "my-backdrop");
/// ```
///
/// # Arguments
///
/// - `$config`: an expression evaluating to `cogs_scene::SceneConfig`
/// - `$scene_name`: a string literal used in log messages
#[macro_export]
macro_rules! export_scene {
    ($config:expr, $scene_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SceneRunner>> = RefCell::new(None);
        }

        #[wasm_bindgen]
        pub fn scene_mount(element_id: &str, placeholder_url: Option<String>) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            scene_unmount();

            let options = $crate::MountOptions::new().with_placeholder(placeholder_url);
            let runner = $crate::SceneRunner::mount_by_id(element_id, $config, options)?;
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("{}: mounted into #{}", $scene_name, element_id);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn scene_unmount() {
            // Take the runner out first so its Drop runs outside the borrow.
            let runner = RUNNER.with(|cell| cell.borrow_mut().take());
            if let Some(runner) = runner {
                let frames = runner.frame_count();
                drop(runner);
                log::info!("{}: unmounted after {} frames", $scene_name, frames);
            }
        }

        #[wasm_bindgen]
        pub fn scene_is_loaded() -> bool {
            RUNNER.with(|cell| cell.borrow().as_ref().map_or(false, |r| r.is_loaded()))
        }

        #[wasm_bindgen]
        pub fn scene_frame_count() -> f64 {
            RUNNER.with(|cell| cell.borrow().as_ref().map_or(0.0, |r| r.frame_count() as f64))
        }
    };
}
