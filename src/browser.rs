use crate::engine::input::{Button, InputState};
use anyhow::{anyhow, Result};
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;
use wasm_bindgen::closure::{Closure, WasmClosure};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

#[rustfmt::skip]
use web_sys::{
    Document,
    Window,
    CanvasRenderingContext2d,
    HtmlAudioElement,
    HtmlCanvasElement,
    HtmlImageElement,
    KeyboardEvent,
    Response,
    TouchEvent,
};

// ==================== Logging ====================
/// Installs the global logger behind the `log` macros
/// - console.log/console.error in the browser, env_logger (RUST_LOG) for
///   native runs so tests stay headless
/// - a logger that is already installed wins, a second launch keeps it
#[cfg(target_arch = "wasm32")]
pub fn init_logging(level: log::Level) {
    let _ = console_log::init_with_level(level);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(level: log::Level) {
    let env = env_logger::Env::default().default_filter_or(level.to_string());
    let _ = env_logger::Builder::from_env(env).try_init();
}

// ==================== Constants ====================
// Constants related to HTML elements
mod html {
    pub const CANVAS_ID: &str = "canvas";
    pub const CONTEXT_2D: &str = "2d";
    pub const TOUCH_START: &str = "touchstart";
    pub const TOUCH_END: &str = "touchend";
}

// ==================== Elements ====================
pub fn new_image() -> Result<HtmlImageElement> {
    HtmlImageElement::new()
        .map_err(|err| anyhow!("Could not create image element : {:#?}", err))
}

pub fn new_audio(source: &str) -> Result<HtmlAudioElement> {
    HtmlAudioElement::new_with_src(source)
        .map_err(|err| anyhow!("Could not create audio element for '{}' : {:#?}", source, err))
}

pub fn context() -> Result<CanvasRenderingContext2d> {
    canvas()?
        .get_context(html::CONTEXT_2D)
        // Result<Option<Object>, JsValue>
        // - JsValue error -> anyhow
        // - None -> "no 2d context", the one startup failure we refuse to
        //   paper over
        .map_err(|js_value| anyhow!("Error getting context : {:#?}", js_value))?
        .ok_or_else(|| anyhow!("No 2d context found"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|element| {
            anyhow!(
                "Error converting {:#?} to CanvasRenderingContext2d",
                element
            )
        })
}

pub fn canvas() -> Result<HtmlCanvasElement> {
    document()?
        .get_element_by_id(html::CANVAS_ID)
        .ok_or_else(|| anyhow!("No Canvas Element found with ID : '{}'", html::CANVAS_ID))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|element| anyhow!("Error converting {:#?} to HtmlCanvasElement", element))
}

pub fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| anyhow!("Window not found"))
}

pub fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| anyhow!("No Document Found"))
}

pub fn now() -> Result<f64> {
    Ok(window()?
        .performance()
        .ok_or_else(|| anyhow!("Performance object not found"))?
        .now())
}

// ==================== Closures / animation frames ====================
pub type LoopClosure = Closure<dyn FnMut(f64)>;

pub fn closure_wrap<T: WasmClosure + ?Sized>(data: Box<T>) -> Closure<T> {
    Closure::wrap(data)
}

pub fn create_raf_closure(f: impl FnMut(f64) + 'static) -> LoopClosure {
    closure_wrap(Box::new(f) as Box<dyn FnMut(f64)>)
}

/// Schedules `callback` for the next repaint, returns the request id needed
/// to cancel it
pub fn request_animation_frame(callback: &LoopClosure) -> Result<i32> {
    window()?
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(|err| anyhow!("Cannot request animation frame {:#?}", err))
}

pub fn cancel_animation_frame(handle: i32) -> Result<()> {
    window()?
        .cancel_animation_frame(handle)
        .map_err(|err| anyhow!("Cannot cancel animation frame {:#?}", err))
}

pub fn spawn_local<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

// ==================== Fetch ====================
pub async fn fetch_json<T>(json_path: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let resp_value = fetch_with_str(json_path).await?;
    let resp: Response = resp_value
        .dyn_into()
        .map_err(|element| anyhow!("error converting [{:#?}] to Response", element))?;
    if !resp.ok() {
        return Err(anyhow!("fetching {} returned status {}", json_path, resp.status()));
    }
    let json = resp
        .json()
        .map_err(|err| anyhow!("Could not get JSON from response [{:#?}]", err))?;

    let json_value = JsFuture::from(json)
        .await
        .map_err(|err| anyhow!("error fetching [{:#?}]", err))?;

    serde_wasm_bindgen::from_value(json_value)
        .map_err(|err| anyhow!("error converting response : {:#?}", err))
}

async fn fetch_with_str(resource: &str) -> Result<JsValue> {
    let resp = window()?.fetch_with_str(resource);

    JsFuture::from(resp)
        .await
        .map_err(|err| anyhow!("error fetching : {:#?}", err))
}

// ==================== Input wiring ====================
/// Keyboard listeners are the first writer of the shared input flags
/// - keydown -> flag on, keyup -> flag off
/// - window.onkeydown/onkeyup are replaced, not stacked, so a reload that
///   wires a fresh InputState leaves no listener behind on the old one
pub fn listen_for_keys(input: Rc<RefCell<InputState>>) -> Result<()> {
    let down = input.clone();
    let onkeydown = closure_wrap(Box::new(move |event: KeyboardEvent| {
        if let Some(button) = Button::from_key_code(&event.code()) {
            down.borrow_mut().set(button, true);
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);

    let onkeyup = closure_wrap(Box::new(move |event: KeyboardEvent| {
        if let Some(button) = Button::from_key_code(&event.code()) {
            input.borrow_mut().set(button, false);
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);

    let window = window()?;
    window.set_onkeydown(Some(onkeydown.as_ref().unchecked_ref()));
    window.set_onkeyup(Some(onkeyup.as_ref().unchecked_ref()));

    // the window holds these for the rest of the page's life
    onkeydown.forget();
    onkeyup.forget();
    Ok(())
}

/// Touch buttons are the second writer, only present in the mobile layout
/// - touchstart -> flag on, touchend -> flag off
pub fn listen_for_touch(
    element_id: &str,
    button: Button,
    input: Rc<RefCell<InputState>>,
) -> Result<()> {
    let element = document()?
        .get_element_by_id(element_id)
        .ok_or_else(|| anyhow!("No touch button found with ID : '{}'", element_id))?;

    let start = input.clone();
    let on_start = closure_wrap(Box::new(move |event: TouchEvent| {
        event.prevent_default();
        start.borrow_mut().set(button, true);
    }) as Box<dyn FnMut(TouchEvent)>);

    let on_end = closure_wrap(Box::new(move |event: TouchEvent| {
        event.prevent_default();
        input.borrow_mut().set(button, false);
    }) as Box<dyn FnMut(TouchEvent)>);

    element
        .add_event_listener_with_callback(html::TOUCH_START, on_start.as_ref().unchecked_ref())
        .map_err(|err| anyhow!("Could not listen for {} : {:#?}", html::TOUCH_START, err))?;
    element
        .add_event_listener_with_callback(html::TOUCH_END, on_end.as_ref().unchecked_ref())
        .map_err(|err| anyhow!("Could not listen for {} : {:#?}", html::TOUCH_END, err))?;

    on_start.forget();
    on_end.forget();
    Ok(())
}
