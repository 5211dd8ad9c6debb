use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use cogs_scene::{Color, SceneConfig, SceneHost, SurfaceSize};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, Window};

use crate::webgl::WebGlRenderer;

/// DOM-side options for mounting the scene.
#[derive(Debug, Clone)]
pub struct MountOptions {
    /// Image shown behind the canvas on narrow viewports until it fades in.
    pub placeholder_url: Option<String>,
    /// Class added to the mount element once the canvas is attached.
    pub shown_class: String,
}

impl MountOptions {
    pub fn new() -> Self {
        Self {
            placeholder_url: None,
            shown_class: "shown".to_string(),
        }
    }

    pub fn with_placeholder(mut self, url: Option<String>) -> Self {
        self.placeholder_url = url;
        self
    }
}

impl Default for MountOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// State shared between the runner and its browser callbacks.
/// Callbacks hold it weakly so a dropped runner silences them.
struct Shared {
    host: RefCell<SceneHost<WebGlRenderer>>,
    /// Cleared on unmount; a resize with no mount target is ignored.
    mount: RefCell<Option<HtmlElement>>,
    /// Id of the pending animation frame request.
    frame_request: Cell<Option<i32>>,
}

impl Shared {
    /// Current size of the mount element, if it is still in the document.
    fn measure(&self) -> Option<SurfaceSize> {
        let mount = self.mount.borrow();
        let element = mount.as_ref()?;
        if !element.is_connected() {
            return None;
        }
        Some(SurfaceSize::new(
            element.offset_width().max(1) as u32,
            element.offset_height().max(1) as u32,
        ))
    }

    /// Attach the canvas and let CSS fade it in.
    fn reveal(&self, shown_class: &str) {
        let mount = self.mount.borrow();
        let Some(element) = mount.as_ref() else {
            return;
        };
        let mut host = self.host.borrow_mut();
        if !host.is_running() {
            return;
        }
        if let Err(err) = element.append_child(host.renderer().canvas()) {
            log::error!("cogs-web: failed to attach canvas: {err:?}");
            return;
        }
        if let Err(err) = element.class_list().add_1(shown_class) {
            log::error!("cogs-web: failed to add class {shown_class}: {err:?}");
        }
        host.mark_loaded();
    }
}

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Browser driver for a [`SceneHost`].
///
/// Owns the three pieces of browser scheduling the scene uses: the
/// self-rescheduling animation frame callback, the window resize listener
/// and the startup fade timeout. Dropping the runner (or calling
/// [`SceneRunner::stop`]) cancels all three and tears the host down.
pub struct SceneRunner {
    window: Window,
    shared: Rc<Shared>,
    frame_callback: Rc<RefCell<Option<FrameCallback>>>,
    resize_callback: Option<Closure<dyn FnMut()>>,
    fade_callback: Option<Closure<dyn FnMut()>>,
    fade_timeout: Option<i32>,
    stopped: bool,
}

impl SceneRunner {
    /// Mount into the element with the given id.
    pub fn mount_by_id(element_id: &str, config: SceneConfig, options: MountOptions) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no global window")?;
        let document = window.document().ok_or("window has no document")?;
        let element: HtmlElement = document
            .get_element_by_id(element_id)
            .ok_or_else(|| JsValue::from(format!("no element with id {element_id}")))?
            .dyn_into()?;
        Self::mount(element, config, options)
    }

    /// Mount the scene into `element` and start the frame loop.
    pub fn mount(element: HtmlElement, config: SceneConfig, options: MountOptions) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no global window")?;
        let document = window.document().ok_or("window has no document")?;

        let viewport_width = window.inner_width()?.as_f64().unwrap_or(0.0) as u32;
        if config.startup.shows_placeholder(viewport_width) {
            if let Some(url) = &options.placeholder_url {
                apply_placeholder(&element, url, Color::from_hex(config.background));
            }
        }

        let renderer = WebGlRenderer::new(&document, window.device_pixel_ratio())?;
        let shared = Rc::new(Shared {
            host: RefCell::new(SceneHost::new(config, renderer)),
            mount: RefCell::new(Some(element)),
            frame_request: Cell::new(None),
        });

        let surface = shared.measure().unwrap_or(SurfaceSize::new(1, 1));
        let fade_delay = shared.host.borrow_mut().mount(surface);

        let mut runner = Self {
            window,
            shared,
            frame_callback: Rc::new(RefCell::new(None)),
            resize_callback: None,
            fade_callback: None,
            fade_timeout: None,
            stopped: false,
        };
        runner.schedule_fade(fade_delay, options.shown_class)?;
        runner.start_frame_loop()?;
        runner.listen_for_resize()?;
        Ok(runner)
    }

    fn schedule_fade(&mut self, delay_ms: u32, shown_class: String) -> Result<(), JsValue> {
        let shared = Rc::downgrade(&self.shared);
        let callback = Closure::wrap(Box::new(move || {
            if let Some(shared) = shared.upgrade() {
                shared.reveal(&shown_class);
            }
        }) as Box<dyn FnMut()>);

        let handle = self.window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            delay_ms as i32,
        )?;
        log::debug!("cogs-web: fade scheduled in {delay_ms}ms");
        self.fade_timeout = Some(handle);
        self.fade_callback = Some(callback);
        Ok(())
    }

    fn listen_for_resize(&mut self) -> Result<(), JsValue> {
        let shared = Rc::downgrade(&self.shared);
        let callback = Closure::wrap(Box::new(move || {
            if let Some(shared) = shared.upgrade() {
                let size = shared.measure();
                shared.host.borrow_mut().resize(size);
            }
        }) as Box<dyn FnMut()>);

        self.window
            .add_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())?;
        self.resize_callback = Some(callback);
        Ok(())
    }

    fn start_frame_loop(&mut self) -> Result<(), JsValue> {
        let shared = Rc::downgrade(&self.shared);
        let slot: Weak<RefCell<Option<FrameCallback>>> = Rc::downgrade(&self.frame_callback);
        let window = self.window.clone();

        let callback = Closure::wrap(Box::new(move |timestamp: f64| {
            let (Some(shared), Some(slot)) = (shared.upgrade(), slot.upgrade()) else {
                return;
            };

            // Schedule the next frame before doing this one's work.
            if let Some(next) = slot.borrow().as_ref() {
                match window.request_animation_frame(next.as_ref().unchecked_ref()) {
                    Ok(id) => shared.frame_request.set(Some(id)),
                    Err(err) => log::error!("cogs-web: requestAnimationFrame failed: {err:?}"),
                }
            }

            let keep_going = shared.host.borrow_mut().frame(timestamp);
            if !keep_going {
                if let Some(id) = shared.frame_request.take() {
                    if let Err(err) = window.cancel_animation_frame(id) {
                        log::error!("cogs-web: cancelAnimationFrame failed: {err:?}");
                    }
                }
            }
        }) as Box<dyn FnMut(f64)>);

        let id = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())?;
        self.shared.frame_request.set(Some(id));
        *self.frame_callback.borrow_mut() = Some(callback);
        Ok(())
    }

    /// Cancel the frame loop, detach listeners and tear the host down.
    /// Safe to call more than once.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;

        if let Some(id) = self.shared.frame_request.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::error!("cogs-web: cancelAnimationFrame failed: {err:?}");
            }
        }
        self.frame_callback.borrow_mut().take();

        if let Some(callback) = self.resize_callback.take() {
            if let Err(err) = self
                .window
                .remove_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
            {
                log::error!("cogs-web: failed to remove resize listener: {err:?}");
            }
        }

        if let Some(handle) = self.fade_timeout.take() {
            self.window.clear_timeout_with_handle(handle);
        }
        self.fade_callback.take();

        let mut host = self.shared.host.borrow_mut();
        host.renderer().canvas().remove();
        host.unmount();
        self.shared.mount.borrow_mut().take();
    }

    pub fn is_loaded(&self) -> bool {
        self.shared.host.borrow().is_loaded()
    }

    pub fn frame_count(&self) -> u64 {
        self.shared.host.borrow().frame_count()
    }
}

impl Drop for SceneRunner {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Show a static image (and the scene background) behind the canvas until
/// the scene fades in. Applied to the mount's wrapper when there is one.
fn apply_placeholder(element: &HtmlElement, url: &str, background: Color) {
    let target = element
        .parent_element()
        .and_then(|parent| parent.dyn_into::<HtmlElement>().ok())
        .unwrap_or_else(|| element.clone());

    let style = target.style();
    let result = style
        .set_property("background-image", &format!("url(\"{url}\")"))
        .and_then(|_| style.set_property("background-size", "cover"))
        .and_then(|_| style.set_property("background-position", "center"))
        .and_then(|_| style.set_property("background-color", &background.to_css_hex()));
    match result {
        Ok(()) => log::debug!("cogs-web: placeholder applied"),
        Err(err) => log::error!("cogs-web: failed to apply placeholder: {err:?}"),
    }
}
