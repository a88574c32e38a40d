//! WASM-facing viewer
//!
//! `PdfViewer` wires a [`Viewer`] to the DOM: window resize, the three
//! fullscreen change events, touch gestures on the page container and the
//! PDF.js load callbacks. Everything registered here is released on
//! `unmount()` or when the object is freed.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::bindings;
use crate::config::ViewerConfig;
use crate::dom::{self, DomFullscreenHost, ListenerHandle, LoadCallbacks, PdfJsRenderer};
use crate::fullscreen::FullscreenApi;
use crate::load::LoadTicket;
use crate::source::{DocumentSource, LocalFile};
use crate::state::ViewState;
use crate::toolbar::Toolbar;
use crate::viewer::Viewer;
use crate::worker;

type SharedViewer = Rc<RefCell<Viewer<PdfJsRenderer>>>;

/// State pushed to change subscribers
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub state: ViewState,
    pub toolbar: Toolbar,
}

impl Snapshot {
    fn of(viewer: &Viewer<PdfJsRenderer>) -> Self {
        Self {
            state: viewer.state().clone(),
            toolbar: viewer.toolbar(),
        }
    }
}

/// Change subscribers: Rust-side DOM updaters and one optional JS callback
#[derive(Default)]
struct Hooks {
    native: Vec<Box<dyn Fn(&Snapshot)>>,
    js: Option<Function>,
}

type SharedHooks = Rc<RefCell<Hooks>>;

fn notify(hooks: &SharedHooks, snapshot: &Snapshot) {
    let hooks = hooks.borrow();
    for hook in &hooks.native {
        hook(snapshot);
    }
    if let Some(callback) = &hooks.js {
        match serde_wasm_bindgen::to_value(snapshot) {
            Ok(value) => {
                if let Err(e) = callback.call1(&JsValue::NULL, &value) {
                    log::warn!("onChange callback threw: {:?}", e);
                }
            }
            Err(e) => log::warn!("Failed to serialize viewer snapshot: {}", e),
        }
    }
}

/// Run `f` against the viewer if it is still alive; notify when it reports a change
///
/// The viewer borrow is released before subscribers run, so they may call
/// back into the viewer.
fn update<F>(viewer: &Weak<RefCell<Viewer<PdfJsRenderer>>>, hooks: &SharedHooks, f: F)
where
    F: FnOnce(&mut Viewer<PdfJsRenderer>) -> bool,
{
    let Some(viewer) = viewer.upgrade() else {
        return;
    };
    let snapshot = {
        let Ok(mut viewer) = viewer.try_borrow_mut() else {
            log::warn!("Viewer busy, dropping event");
            return;
        };
        if !f(&mut viewer) {
            return;
        }
        Snapshot::of(&viewer)
    };
    notify(hooks, &snapshot);
}

/// Keeps the PDF.js callbacks alive while a load may still report back
struct LoadClosures {
    _progress: Closure<dyn FnMut(u32, f64, f64)>,
    _loaded: Closure<dyn FnMut(u32, u32)>,
    _error: Closure<dyn FnMut(u32, JsValue)>,
}

fn install_load_callbacks(viewer: &SharedViewer, hooks: &SharedHooks) -> LoadClosures {
    let progress = {
        let (weak, hooks) = (Rc::downgrade(viewer), hooks.clone());
        Closure::wrap(Box::new(move |generation: u32, loaded: f64, total: f64| {
            update(&weak, &hooks, |v| {
                v.on_load_progress(LoadTicket::from_generation(generation), loaded, total)
            });
        }) as Box<dyn FnMut(u32, f64, f64)>)
    };

    let loaded = {
        let (weak, hooks) = (Rc::downgrade(viewer), hooks.clone());
        Closure::wrap(Box::new(move |generation: u32, num_pages: u32| {
            update(&weak, &hooks, |v| {
                v.on_load_success(LoadTicket::from_generation(generation), num_pages)
            });
        }) as Box<dyn FnMut(u32, u32)>)
    };

    let error = {
        let (weak, hooks) = (Rc::downgrade(viewer), hooks.clone());
        Closure::wrap(Box::new(move |generation: u32, reason: JsValue| {
            log::error!("PDF.js failed to load document: {:?}", reason);
            update(&weak, &hooks, |v| v.on_load_error(LoadTicket::from_generation(generation)));
        }) as Box<dyn FnMut(u32, JsValue)>)
    };

    viewer.borrow_mut().renderer_mut().set_callbacks(LoadCallbacks {
        on_progress: progress.as_ref().unchecked_ref::<Function>().clone(),
        on_loaded: loaded.as_ref().unchecked_ref::<Function>().clone(),
        on_error: error.as_ref().unchecked_ref::<Function>().clone(),
    });

    LoadClosures {
        _progress: progress,
        _loaded: loaded,
        _error: error,
    }
}

fn register_listeners(
    viewer: &SharedViewer,
    hooks: &SharedHooks,
    root: &Element,
    container: &Element,
) -> crate::error::Result<Vec<ListenerHandle>> {
    let window = dom::window()?;
    let document = dom::document()?;
    let mut listeners = Vec::new();

    {
        let (weak, hooks) = (Rc::downgrade(viewer), hooks.clone());
        listeners.push(ListenerHandle::new(&window, "resize", move |_| {
            update(&weak, &hooks, |v| {
                v.on_resize(dom::viewport_width());
                true
            });
        })?);
    }

    for api in FullscreenApi::ALL {
        let (weak, hooks) = (Rc::downgrade(viewer), hooks.clone());
        let host = DomFullscreenHost::new(root.clone())?;
        listeners.push(ListenerHandle::new(&document, api.change_event(), move |_| {
            update(&weak, &hooks, |v| v.on_fullscreen_change(&host));
        })?);
    }

    {
        let weak = Rc::downgrade(viewer);
        listeners.push(ListenerHandle::new(container, "touchstart", move |event| {
            if let (Some(viewer), Some(x)) = (weak.upgrade(), dom::touch_x(&event, false)) {
                if let Ok(mut viewer) = viewer.try_borrow_mut() {
                    viewer.on_touch_start(x);
                }
            }
        })?);
    }

    {
        let (weak, hooks) = (Rc::downgrade(viewer), hooks.clone());
        listeners.push(ListenerHandle::new(container, "touchend", move |event| {
            let Some(x) = dom::touch_x(&event, true) else {
                return;
            };
            update(&weak, &hooks, |v| v.on_touch_end(x).is_some());
        })?);
    }

    Ok(listeners)
}

/// Configure the PDF.js worker for this page; later calls are no-ops
pub fn ensure_worker(config: &ViewerConfig) {
    let src = config.worker_src(&bindings::pdfjs_version());
    if worker::configure_worker(&src, bindings::set_worker_src) {
        log::info!("PDF.js worker configured: {}", src);
    } else if let Some(active) = worker::configured_worker().filter(|active| *active != src) {
        log::warn!("PDF.js worker already set to {}, ignoring {}", active, src);
    }
}

/// PDF viewer mounted on a root element
#[wasm_bindgen]
pub struct PdfViewer {
    viewer: SharedViewer,
    hooks: SharedHooks,
    fullscreen: DomFullscreenHost,
    listeners: Vec<ListenerHandle>,
    load_closures: Option<LoadClosures>,
}

#[wasm_bindgen]
impl PdfViewer {
    /// Mount on `root` (fullscreen target), drawing pages into `container`
    #[wasm_bindgen(constructor)]
    pub fn new(root: Element, container: Element, config: JsValue) -> Result<PdfViewer, JsValue> {
        let config = ViewerConfig::from_js(config)?;
        let initial = config.initial_source();
        Ok(Self::mount(root, container, &config, initial)?)
    }

    #[wasm_bindgen(js_name = "prevPage")]
    pub fn prev_page(&self) {
        self.apply(|v| {
            v.go_to_prev_page();
            true
        });
    }

    #[wasm_bindgen(js_name = "nextPage")]
    pub fn next_page(&self) {
        self.apply(|v| {
            v.go_to_next_page();
            true
        });
    }

    #[wasm_bindgen(js_name = "zoomIn")]
    pub fn zoom_in(&self) {
        self.apply(|v| {
            v.zoom_in();
            true
        });
    }

    #[wasm_bindgen(js_name = "zoomOut")]
    pub fn zoom_out(&self) {
        self.apply(|v| {
            v.zoom_out();
            true
        });
    }

    #[wasm_bindgen(js_name = "resetZoom")]
    pub fn reset_zoom(&self) {
        self.apply(|v| {
            v.reset_zoom(dom::viewport_width());
            true
        });
    }

    /// Request or exit fullscreen; the flag follows the change event
    #[wasm_bindgen(js_name = "toggleFullscreen")]
    pub fn toggle_fullscreen(&self) {
        if let Ok(viewer) = self.viewer.try_borrow() {
            viewer.toggle_fullscreen(&self.fullscreen);
        }
    }

    #[wasm_bindgen(js_name = "loadUrl")]
    pub fn load_url(&self, url: String) {
        self.load_source(DocumentSource::Url(url));
    }

    /// Load a picked file; non-PDF MIME types are rejected and nothing changes
    #[wasm_bindgen(js_name = "loadFile")]
    pub fn load_file(&self, name: String, mime: String, bytes: Vec<u8>) -> Result<(), JsValue> {
        let file = LocalFile::new(name, &mime, bytes)?;
        self.load_source(DocumentSource::File(file));
        Ok(())
    }

    /// Current view state and toolbar model as a plain object
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let snapshot = Snapshot::of(&self.viewer.borrow());
        serde_wasm_bindgen::to_value(&snapshot).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Called with a snapshot after every visible change
    #[wasm_bindgen(js_name = "setOnChange")]
    pub fn set_on_change(&self, callback: Option<Function>) {
        self.hooks.borrow_mut().js = callback;
    }

    /// Remove every listener and forget any in-flight load
    pub fn unmount(&mut self) {
        if self.listeners.is_empty() && self.load_closures.is_none() {
            return;
        }
        log::debug!("Unmounting viewer ({} listeners)", self.listeners.len());
        self.listeners.clear();
        if let Ok(mut viewer) = self.viewer.try_borrow_mut() {
            viewer.unmount();
            viewer.renderer_mut().release();
        }
        self.load_closures = None;
        self.hooks.borrow_mut().native.clear();
    }
}

impl PdfViewer {
    pub(crate) fn mount(
        root: Element,
        container: Element,
        config: &ViewerConfig,
        initial: DocumentSource,
    ) -> crate::error::Result<Self> {
        ensure_worker(config);

        let viewer: SharedViewer = Rc::new(RefCell::new(Viewer::new(
            PdfJsRenderer::new(container.clone()),
            dom::viewport_width(),
            config.rescale_policy,
        )));
        let hooks: SharedHooks = Rc::new(RefCell::new(Hooks::default()));

        let load_closures = install_load_callbacks(&viewer, &hooks);
        let listeners = register_listeners(&viewer, &hooks, &root, &container)?;
        let fullscreen = DomFullscreenHost::new(root)?;

        let this = Self {
            viewer,
            hooks,
            fullscreen,
            listeners,
            load_closures: Some(load_closures),
        };
        this.load_source(initial);
        Ok(this)
    }

    /// Subscribe Rust-side to snapshots
    pub(crate) fn subscribe(&self, hook: impl Fn(&Snapshot) + 'static) {
        let snapshot = Snapshot::of(&self.viewer.borrow());
        hook(&snapshot);
        self.hooks.borrow_mut().native.push(Box::new(hook));
    }

    pub(crate) fn load_source(&self, source: DocumentSource) {
        self.apply(move |v| {
            v.set_source(source);
            true
        });
    }

    fn apply<F>(&self, f: F)
    where
        F: FnOnce(&mut Viewer<PdfJsRenderer>) -> bool,
    {
        update(&Rc::downgrade(&self.viewer), &self.hooks, f);
    }
}

impl Drop for PdfViewer {
    fn drop(&mut self) {
        self.unmount();
    }
}
