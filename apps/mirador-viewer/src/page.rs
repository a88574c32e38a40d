//! Page bootstrap
//!
//! Shows the splash, then builds the toolbar and page container around a
//! [`PdfViewer`] and wires the file picker through the [`Shell`].

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Uint8Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlInputElement};

use crate::app::{PdfViewer, Snapshot};
use crate::config::ViewerConfig;
use crate::dom::{self, ListenerHandle};
use crate::error::{Result, ViewerError, INVALID_FILE_NOTICE};
use crate::shell::{Shell, SPLASH_DURATION_MS, SPLASH_TITLE};
use crate::source::PDF_MIME;
use crate::toolbar::RESET_ZOOM_LABEL;

thread_local! {
    static APP: RefCell<Option<MountedApp>> = const { RefCell::new(None) };
}

/// Everything owned by a running page; dropping it tears the page down
struct MountedApp {
    // Dropped first so their closures release the viewer
    _listeners: Vec<ListenerHandle>,
    _viewer: Rc<PdfViewer>,
}

/// Render the splash into `root`, then mount the viewer after a short delay
#[wasm_bindgen(js_name = "startApp")]
pub fn start_app(root: Element, config: JsValue) -> std::result::Result<(), JsValue> {
    let config = ViewerConfig::from_js(config)?;
    let shell = Rc::new(RefCell::new(Shell::with_source(config.initial_source())));
    let document = dom::document()?;

    render_splash(&document, &root)?;

    let mount = Closure::once(move || {
        if let Err(e) = mount_viewer(&document, &root, config, shell) {
            log::error!("Failed to mount viewer: {}", e);
        }
    });
    dom::window()?.set_timeout_with_callback_and_timeout_and_arguments_0(
        mount.as_ref().unchecked_ref(),
        SPLASH_DURATION_MS,
    )?;
    // One-shot timer; the closure is consumed when it fires
    mount.forget();
    Ok(())
}

/// Tear down the running page, removing every listener it registered
#[wasm_bindgen(js_name = "stopApp")]
pub fn stop_app() {
    APP.with(|app| {
        if app.borrow_mut().take().is_some() {
            log::info!("Viewer stopped");
        }
    });
}

fn create(document: &Document, tag: &str, class: &str, text: &str) -> Result<Element> {
    let element = document
        .create_element(tag)
        .map_err(|e| ViewerError::Dom(format!("createElement({}) failed: {:?}", tag, e)))?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    if !text.is_empty() {
        element.set_text_content(Some(text));
    }
    Ok(element)
}

fn append(parent: &Element, child: &Element) -> Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| ViewerError::Dom(format!("appendChild failed: {:?}", e)))
}

fn render_splash(document: &Document, root: &Element) -> Result<()> {
    let screen = create(document, "div", "loading-screen", "")?;
    let content = create(document, "div", "loading-content", "")?;
    append(&content, &create(document, "h2", "", SPLASH_TITLE)?)?;
    append(&content, &create(document, "div", "loading-spinner", "")?)?;
    append(&screen, &content)?;

    root.set_inner_html("");
    append(root, &screen)
}

fn alert(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.alert_with_message(message) {
            log::warn!("alert failed: {:?}", e);
        }
    }
}

fn set_disabled(element: &Element, disabled: bool) {
    let result = if disabled {
        element.set_attribute("disabled", "")
    } else {
        element.remove_attribute("disabled")
    };
    if let Err(e) = result {
        log::warn!("Failed to toggle disabled: {:?}", e);
    }
}

fn mount_viewer(
    document: &Document,
    root: &Element,
    config: ViewerConfig,
    shell: Rc<RefCell<Shell>>,
) -> Result<()> {
    shell.borrow_mut().finish_splash();
    root.set_inner_html("");

    let viewer_root = create(document, "div", "pdf-viewer", "")?;
    let toolbar = create(document, "div", "toolbar", "")?;

    let nav = create(document, "div", "nav-controls", "")?;
    let prev = create(document, "button", "", "◀")?;
    let page_info = create(document, "span", "page-info", "")?;
    let next = create(document, "button", "", "▶")?;
    for child in [&prev, &page_info, &next] {
        append(&nav, child)?;
    }

    let zoom = create(document, "div", "zoom-controls", "")?;
    let zoom_out = create(document, "button", "", "-")?;
    let zoom_label = create(document, "span", "", "")?;
    let zoom_in = create(document, "button", "", "+")?;
    let reset = create(document, "button", "", RESET_ZOOM_LABEL)?;
    for child in [&zoom_out, &zoom_label, &zoom_in, &reset] {
        append(&zoom, child)?;
    }

    let fullscreen = create(document, "button", "fullscreen-btn", "⛶")?;

    let picker = create(document, "input", "file-picker", "")?;
    picker
        .set_attribute("type", "file")
        .and_then(|_| picker.set_attribute("accept", PDF_MIME))
        .map_err(|e| ViewerError::Dom(format!("Failed to configure file input: {:?}", e)))?;

    for child in [&nav, &zoom, &fullscreen, &picker] {
        append(&toolbar, child)?;
    }

    let body = create(document, "div", "pdf-container", "")?;
    let loading = create(document, "div", "loading", "")?;
    let pages = create(document, "div", "pdf-pages", "")?;
    append(&body, &loading)?;
    append(&body, &pages)?;

    append(&viewer_root, &toolbar)?;
    append(&viewer_root, &body)?;
    append(root, &viewer_root)?;

    let initial = shell.borrow().source().clone();
    let viewer = Rc::new(PdfViewer::mount(viewer_root.clone(), pages, &config, initial)?);

    {
        let (viewer_root, prev, next, page_info, zoom_label, loading) = (
            viewer_root.clone(),
            prev.clone(),
            next.clone(),
            page_info.clone(),
            zoom_label.clone(),
            loading.clone(),
        );
        viewer.subscribe(move |snapshot: &Snapshot| {
            let toolbar = &snapshot.toolbar;
            viewer_root.set_class_name(&toolbar.root_class);
            page_info.set_text_content(Some(&toolbar.page_label));
            zoom_label.set_text_content(Some(&toolbar.zoom_label));
            set_disabled(&prev, toolbar.prev_disabled);
            set_disabled(&next, toolbar.next_disabled);
            loading.set_text_content(toolbar.loading_label.as_deref());
        });
    }

    let mut listeners = Vec::new();
    let buttons: [(&Element, fn(&PdfViewer)); 6] = [
        (&prev, PdfViewer::prev_page),
        (&next, PdfViewer::next_page),
        (&zoom_out, PdfViewer::zoom_out),
        (&zoom_in, PdfViewer::zoom_in),
        (&reset, PdfViewer::reset_zoom),
        (&fullscreen, PdfViewer::toggle_fullscreen),
    ];
    for (button, action) in buttons {
        let viewer = viewer.clone();
        listeners.push(ListenerHandle::new(button, "click", move |_| action(&viewer))?);
    }

    {
        let viewer = viewer.clone();
        listeners.push(ListenerHandle::new(&picker, "change", move |event| {
            let Some(input) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            if file.type_() != PDF_MIME {
                alert(INVALID_FILE_NOTICE);
                return;
            }

            let (viewer, shell) = (viewer.clone(), shell.clone());
            wasm_bindgen_futures::spawn_local(async move {
                let buffer = match JsFuture::from(file.array_buffer()).await {
                    Ok(buffer) => buffer,
                    Err(e) => {
                        log::error!("Failed to read {}: {:?}", file.name(), e);
                        return;
                    }
                };
                let bytes = Uint8Array::new(&buffer).to_vec();
                let selected = shell
                    .borrow_mut()
                    .select_file(&file.name(), &file.type_(), bytes)
                    .map(Clone::clone);
                match selected {
                    Ok(source) => viewer.load_source(source),
                    Err(e) => alert(e.notice()),
                }
            });
        })?);
    }

    APP.with(|app| {
        *app.borrow_mut() = Some(MountedApp {
            _listeners: listeners,
            _viewer: viewer,
        });
    });
    log::info!("Viewer mounted");
    Ok(())
}
