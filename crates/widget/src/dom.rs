//! web-sys adapter: binds the controller to the host page's elements.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Promise, Reflect};
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Document, Element, Event, HtmlButtonElement, HtmlElement, HtmlInputElement,
    HtmlSelectElement, HtmlTextAreaElement, Navigator, Window,
};

use crate::api::{Backend, HttpBackend};
use crate::config::{Config, CONFIG_ELEMENT_ID};
use crate::controller::Controller;
use crate::error::WidgetError;
use crate::logging;
use crate::state::FormInput;
use crate::surface::{Clipboard, Surface};
use crate::ui::{Effect, ResultBlock, ToneButton};

const TONE_CLASS: &str = "tone";
const OPTION_CLASS: &str = "option";

fn js_err(message: impl AsRef<str>) -> JsValue {
    JsValue::from_str(message.as_ref())
}

fn element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| js_err(format!("missing element #{id}")))?
        .dyn_into::<T>()
        .map_err(|_| js_err(format!("element #{id} has an unexpected type")))
}

/// Value of a text input or textarea.
fn field_value(el: &Element) -> String {
    if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else {
        el.text_content().unwrap_or_default()
    }
}

/// Nearest ancestor (or self) of the event target matching `selector`.
fn closest(event: &Event, selector: &str) -> Option<Element> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    target.closest(selector).ok().flatten()
}

/// The host page's widget elements, looked up once by id.
#[derive(Clone)]
pub struct DomSurface {
    window: Window,
    document: Document,
    tones: Element,
    message: Element,
    situation: HtmlSelectElement,
    custom_container: HtmlElement,
    custom_input: HtmlInputElement,
    results: Element,
    error: Element,
    generate: HtmlButtonElement,
}

impl DomSurface {
    pub fn locate(window: &Window, document: &Document, config: &Config) -> Result<Self, JsValue> {
        let ids = &config.elements;
        Ok(Self {
            window: window.clone(),
            document: document.clone(),
            tones: element(document, &ids.tones)?,
            message: element(document, &ids.message)?,
            situation: element(document, &ids.situation)?,
            custom_container: element(document, &ids.custom_situation_container)?,
            custom_input: element(document, &ids.custom_situation)?,
            results: element(document, &ids.results)?,
            error: element(document, &ids.error)?,
            generate: element(document, &ids.generate)?,
        })
    }

    fn create(&self, tag: &str, class: &str) -> Option<Element> {
        let el = self.document.create_element(tag).ok()?;
        el.set_class_name(class);
        Some(el)
    }

    fn render_tones(&self, buttons: &[ToneButton]) {
        self.tones.set_inner_html("");
        for button in buttons {
            let class = if button.active {
                format!("{TONE_CLASS} active")
            } else {
                TONE_CLASS.to_string()
            };
            let Some(el) = self.create("button", &class) else { continue };
            el.set_text_content(Some(&button.label));
            let _ = el.set_attribute("title", &button.title);
            let _ = el.set_attribute("type", "button");
            let _ = el.set_attribute("data-tone", button.tone.key());
            let _ = self.tones.append_child(&el);
        }
    }

    /// Replace `el`'s children with the heading, hint and text of `block`.
    fn fill_block(&self, el: &Element, block: &ResultBlock) {
        el.set_inner_html("");
        if let Some(header) = self.create("div", "option-header") {
            if let Some(heading) = self.create("strong", "") {
                heading.set_text_content(Some(&block.heading));
                let _ = header.append_child(&heading);
            }
            if let Some(hint) = self.create("span", "option-hint") {
                hint.set_text_content(Some(&block.hint));
                let _ = header.append_child(&hint);
            }
            let _ = el.append_child(&header);
        }
        if let Some(body) = self.create("div", "option-text") {
            body.set_text_content(Some(&block.text));
            let _ = el.append_child(&body);
        }
    }

    fn render_results(&self, blocks: &[ResultBlock]) {
        self.results.set_inner_html("");
        for block in blocks {
            let Some(el) = self.create("div", OPTION_CLASS) else { continue };
            let _ = el.set_attribute("data-index", &block.index.to_string());
            let _ = el.set_attribute("data-text", &block.text);
            self.fill_block(&el, block);
            let _ = self.results.append_child(&el);
        }
    }

    fn show_copied(&self, block: &ResultBlock, content: &str, restore_after_ms: i32) {
        let selector = format!(".{OPTION_CLASS}[data-index=\"{}\"]", block.index);
        let Ok(Some(el)) = self.results.query_selector(&selector) else { return };

        el.set_inner_html("");
        if let Some(confirm) = self.create("div", "copied") {
            confirm.set_text_content(Some(content));
            let _ = el.append_child(&confirm);
        }

        let surface = self.clone();
        let block = block.clone();
        let restore = Closure::once_into_js(move || surface.fill_block(&el, &block));
        let _ = self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(restore.unchecked_ref(), restore_after_ms);
    }
}

impl Surface for DomSurface {
    fn read_form(&self) -> FormInput {
        FormInput {
            message: field_value(&self.message),
            situation: self.situation.value(),
            custom_situation: self.custom_input.value(),
        }
    }

    fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::RenderTones(buttons) => self.render_tones(buttons),
            Effect::SetError(message) => self.error.set_text_content(Some(message)),
            Effect::ClearError => self.error.set_text_content(Some("")),
            Effect::ClearResults => self.results.set_inner_html(""),
            Effect::RenderResults(blocks) => self.render_results(blocks),
            Effect::SetCustomSituationVisible(visible) => {
                let display = if *visible { "block" } else { "none" };
                let _ = self.custom_container.style().set_property("display", display);
            }
            Effect::ClearCustomSituation => self.custom_input.set_value(""),
            Effect::FocusCustomSituation => {
                let _ = self.custom_input.focus();
            }
            Effect::SetSubmit(button) => {
                self.generate.set_disabled(button.disabled);
                self.generate.set_text_content(Some(&button.label));
            }
            Effect::ShowCopied {
                block,
                content,
                restore_after,
            } => {
                let ms = i32::try_from(restore_after.as_millis()).unwrap_or(i32::MAX);
                self.show_copied(block, content, ms);
            }
        }
    }
}

/// `navigator.clipboard.writeText`, looked up at call time so browsers
/// without the async clipboard API report a clipboard error instead of
/// failing to load.
pub struct NavigatorClipboard {
    navigator: Navigator,
}

impl Clipboard for NavigatorClipboard {
    async fn write_text(&self, text: &str) -> Result<(), WidgetError> {
        let describe = |e: JsValue| WidgetError::Clipboard(format!("{e:?}"));

        let clipboard = Reflect::get(&self.navigator, &JsValue::from_str("clipboard")).map_err(describe)?;
        if clipboard.is_undefined() || clipboard.is_null() {
            return Err(WidgetError::Clipboard("clipboard API unavailable".into()));
        }
        let write: Function = Reflect::get(&clipboard, &JsValue::from_str("writeText"))
            .map_err(describe)?
            .dyn_into()
            .map_err(describe)?;
        let promise: Promise = write
            .call1(&clipboard, &JsValue::from_str(text))
            .map_err(describe)?
            .dyn_into()
            .map_err(describe)?;
        JsFuture::from(promise).await.map_err(describe)?;
        Ok(())
    }
}

/// Everything the event handlers share. The controller is only borrowed
/// between awaits, never across one.
struct Widget {
    controller: RefCell<Controller>,
    surface: RefCell<DomSurface>,
    backend: HttpBackend,
    clipboard: NavigatorClipboard,
}

impl Widget {
    fn apply(&self, effects: &[Effect]) {
        self.surface.borrow_mut().apply_all(effects);
    }

    async fn submit(self: Rc<Self>) {
        let form = self.surface.borrow().read_form();
        let submission = self.controller.borrow_mut().begin_submit(&form);
        self.apply(&submission.effects);
        let Ok(request) = submission.request else { return };

        let outcome = self.backend.generate(&request).await;
        let effects = self.controller.borrow_mut().finish_submit(outcome);
        self.apply(&effects);
    }

    async fn copy(self: Rc<Self>, index: Option<usize>) {
        let target = self.controller.borrow().on_result_click(index);
        let Some((index, text)) = target else { return };

        let outcome = self.clipboard.write_text(&text).await;
        let effects = self.controller.borrow().finish_copy(index, &text, outcome);
        self.apply(&effects);
    }
}

fn listen<F>(target: &Element, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    // Handlers live as long as the page.
    closure.forget();
    Ok(())
}

fn config_source(document: &Document) -> Option<String> {
    document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
}

/// Look up the page elements, draw the initial state and register every
/// handler.
pub fn mount() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
    let document = window.document().ok_or_else(|| js_err("no document"))?;

    let config = Config::load(config_source(&document).as_deref());
    logging::init_tracing(&config.logging.level);

    let base_url = match &config.api.base_url {
        Some(url) => url.clone(),
        None => window.location().origin()?,
    };
    let backend = HttpBackend::new(&base_url, &config.api.endpoint, &config.labels.request_failed)
        .map_err(|e| js_err(e.to_string()))?;
    let mut surface = DomSurface::locate(&window, &document, &config)?;

    let mut controller = Controller::new(config);
    surface.apply_all(&controller.initialize(&surface.read_form()));

    let widget = Rc::new(Widget {
        controller: RefCell::new(controller),
        surface: RefCell::new(surface.clone()),
        backend,
        clipboard: NavigatorClipboard {
            navigator: window.navigator(),
        },
    });

    let w = Rc::clone(&widget);
    listen(&surface.tones, "click", move |event| {
        let Some(button) = closest(&event, &format!("button.{TONE_CLASS}")) else { return };
        let Some(key) = button.get_attribute("data-tone") else { return };
        let effects = w.controller.borrow_mut().select_tone_key(&key);
        w.apply(&effects);
    })?;

    let w = Rc::clone(&widget);
    let situation = surface.situation.clone();
    listen(&surface.situation, "change", move |_| {
        let effects = w.controller.borrow_mut().on_situation_mode_change(&situation.value());
        w.apply(&effects);
    })?;

    let w = Rc::clone(&widget);
    let custom_input = surface.custom_input.clone();
    listen(&surface.custom_input, "input", move |_| {
        w.controller.borrow_mut().on_custom_situation_input(&custom_input.value());
    })?;

    let w = Rc::clone(&widget);
    listen(&surface.generate, "click", move |_| {
        spawn_local(Rc::clone(&w).submit());
    })?;

    let w = Rc::clone(&widget);
    listen(&surface.results, "click", move |event| {
        let index = closest(&event, &format!(".{OPTION_CLASS}"))
            .and_then(|block| block.get_attribute("data-index"))
            .and_then(|raw| raw.parse::<usize>().ok());
        if index.is_some() {
            spawn_local(Rc::clone(&w).copy(index));
        }
    })?;

    info!("widget mounted");
    Ok(())
}

/// Entry point run when the module is instantiated. Waits for the DOM if the
/// page is still loading.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
    let document = window.document().ok_or_else(|| js_err("no document"))?;

    if document.ready_state() != "loading" {
        return mount();
    }

    let on_ready = Closure::once_into_js(|| {
        if let Err(e) = mount() {
            warn!("widget failed to mount: {e:?}");
        }
    });
    document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    Ok(())
}
