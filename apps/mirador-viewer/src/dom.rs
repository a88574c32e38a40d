//! Browser glue
//!
//! Event listener ownership, the DOM-backed fullscreen host and the PDF.js
//! renderer. Listeners registered here are removed when their handle drops,
//! so a viewer torn down mid-load leaves nothing attached to window or
//! document.

use js_sys::{Function, Promise, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, Event, EventTarget, TouchEvent, Window};

use crate::bindings;
use crate::error::{Result, ViewerError};
use crate::fullscreen::{FullscreenApi, FullscreenHost, Probe};
use crate::load::LoadTicket;
use crate::render::{DocumentRenderer, RenderRequest, RenderTicket};
use crate::source::DocumentSource;

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| ViewerError::Dom("no window".to_string()))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| ViewerError::Dom("no document".to_string()))
}

/// Current `window.innerWidth`, 0 if unavailable
pub fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

/// Wait for `promise` and return its rejection reason, if any
pub async fn rejection(promise: Promise) -> Option<JsValue> {
    JsFuture::from(promise).await.err()
}

/// Log the rejection of a promise nobody else awaits
pub fn report_rejection(label: &'static str, promise: Promise) {
    wasm_bindgen_futures::spawn_local(async move {
        if let Some(reason) = rejection(promise).await {
            log::warn!("{} failed: {:?}", label, reason);
        }
    });
}

/// A registered event listener; dropping it unregisters the callback
pub struct ListenerHandle {
    target: EventTarget,
    event_type: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl ListenerHandle {
    pub fn new<F>(target: &EventTarget, event_type: &'static str, handler: F) -> Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())
            .map_err(|e| ViewerError::Dom(format!("addEventListener({}) failed: {:?}", event_type, e)))?;
        Ok(Self {
            target: target.clone(),
            event_type,
            closure,
        })
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event_type, self.closure.as_ref().unchecked_ref())
        {
            log::warn!("removeEventListener({}) failed: {:?}", self.event_type, e);
        }
    }
}

/// First touch's `clientX` from `touches` (start) or `changedTouches` (end)
pub fn touch_x(event: &Event, changed: bool) -> Option<f64> {
    let touch_event = event.dyn_ref::<TouchEvent>()?;
    let list = if changed {
        touch_event.changed_touches()
    } else {
        touch_event.touches()
    };
    list.get(0).map(|t| f64::from(t.client_x()))
}

/// Fullscreen via whatever the browser exposes on the root element
pub struct DomFullscreenHost {
    element: Element,
    document: Document,
}

impl DomFullscreenHost {
    pub fn new(element: Element) -> Result<Self> {
        Ok(Self {
            element,
            document: document()?,
        })
    }

    fn invoke(target: &JsValue, method: &'static str) -> Probe {
        match Reflect::get(target, &JsValue::from_str(method)) {
            Ok(value) if value.is_function() => {
                let function: &Function = value.unchecked_ref();
                match function.call0(target) {
                    // prefixed variants return nothing; the standard one a promise
                    Ok(result) => {
                        if let Ok(promise) = result.dyn_into::<Promise>() {
                            report_rejection(method, promise);
                        }
                    }
                    Err(e) => log::warn!("{} threw: {:?}", method, e),
                }
                Probe::Invoked
            }
            _ => Probe::Missing,
        }
    }
}

impl FullscreenHost for DomFullscreenHost {
    fn try_request(&self, api: FullscreenApi) -> Probe {
        Self::invoke(self.element.as_ref(), api.request_method())
    }

    fn try_exit(&self, api: FullscreenApi) -> Probe {
        Self::invoke(self.document.as_ref(), api.exit_method())
    }

    fn has_fullscreen_element(&self) -> bool {
        FullscreenApi::ALL.into_iter().any(|api| {
            Reflect::get(self.document.as_ref(), &JsValue::from_str(api.element_property()))
                .map(|v| !v.is_null() && !v.is_undefined())
                .unwrap_or(false)
        })
    }
}

/// JS functions PDF.js calls back into
pub struct LoadCallbacks {
    pub on_progress: Function,
    pub on_loaded: Function,
    pub on_error: Function,
}

/// Renderer backed by the PDF.js bridge
pub struct PdfJsRenderer {
    container: Element,
    callbacks: Option<LoadCallbacks>,
}

impl PdfJsRenderer {
    pub fn new(container: Element) -> Self {
        Self {
            container,
            callbacks: None,
        }
    }

    pub fn set_callbacks(&mut self, callbacks: LoadCallbacks) {
        self.callbacks = Some(callbacks);
    }

    /// Drop the document held by the bridge
    pub fn release(&mut self) {
        self.callbacks = None;
        bindings::release_document(&self.container);
    }
}

impl DocumentRenderer for PdfJsRenderer {
    fn load(&mut self, source: &DocumentSource, ticket: LoadTicket) {
        let Some(callbacks) = &self.callbacks else {
            log::error!("PDF.js callbacks not installed, cannot load {}", source.describe());
            return;
        };

        let js_source: JsValue = match source {
            DocumentSource::Url(url) => JsValue::from_str(url),
            DocumentSource::File(file) => Uint8Array::from(file.bytes()).into(),
        };

        bindings::load_document(
            &self.container,
            &js_source,
            ticket.generation(),
            &callbacks.on_progress,
            &callbacks.on_loaded,
            &callbacks.on_error,
        );
    }

    fn render(&mut self, request: &RenderRequest, ticket: RenderTicket) {
        let drawn = bindings::render_page(
            &self.container,
            ticket.generation(),
            request.page,
            request.scale,
            request.text_layer,
            request.annotation_layer,
        );
        report_rejection("renderPage", drawn);
    }

    fn show_error(&mut self, message: &str) {
        bindings::show_error(&self.container, message);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use wasm_bindgen_test::*;

    use super::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn dispatch(target: &EventTarget, event_type: &str) {
        let event = Event::new(event_type).unwrap();
        target.dispatch_event(&event).unwrap();
    }

    #[wasm_bindgen_test]
    fn listener_stops_firing_once_dropped() {
        let window = window().unwrap();
        let hits = Rc::new(Cell::new(0));
        let handle = {
            let hits = hits.clone();
            ListenerHandle::new(&window, "resize", move |_| hits.set(hits.get() + 1)).unwrap()
        };

        dispatch(&window, "resize");
        assert_eq!(hits.get(), 1);

        drop(handle);
        dispatch(&window, "resize");
        assert_eq!(hits.get(), 1);
    }

    #[wasm_bindgen_test]
    fn dropping_a_batch_detaches_every_target() {
        let window = window().unwrap();
        let document = document().unwrap();
        let hits = Rc::new(Cell::new(0));
        let mut listeners = Vec::new();
        let targets: [(&EventTarget, &'static str); 3] = [
            (&window, "resize"),
            (&document, "fullscreenchange"),
            (&document, "webkitfullscreenchange"),
        ];
        for (target, event_type) in targets {
            let hits = hits.clone();
            listeners.push(
                ListenerHandle::new(target, event_type, move |_| hits.set(hits.get() + 1)).unwrap(),
            );
        }

        listeners.clear();
        dispatch(&window, "resize");
        dispatch(&document, "fullscreenchange");
        dispatch(&document, "webkitfullscreenchange");
        assert_eq!(hits.get(), 0);
    }

    #[wasm_bindgen_test]
    async fn rejection_returns_the_reason() {
        let reason = rejection(Promise::reject(&JsValue::from_str("denied"))).await;
        assert_eq!(reason.and_then(|r| r.as_string()).as_deref(), Some("denied"));
        assert!(rejection(Promise::resolve(&JsValue::NULL)).await.is_none());
    }

    #[wasm_bindgen_test]
    fn fullscreen_request_returning_a_rejected_promise_is_invoked() {
        let element = document().unwrap().create_element("div").unwrap();
        let request = Function::new_no_args("return Promise.reject(new Error('denied'))");
        Reflect::set(&element, &JsValue::from_str("webkitRequestFullscreen"), &request).unwrap();
        Reflect::set(&element, &JsValue::from_str("msRequestFullscreen"), &JsValue::UNDEFINED)
            .unwrap();

        let host = DomFullscreenHost::new(element).unwrap();
        assert_eq!(host.try_request(FullscreenApi::Webkit), Probe::Invoked);
        assert_eq!(host.try_request(FullscreenApi::Ms), Probe::Missing);
    }
}
