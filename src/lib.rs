// ==================== Imports ====================
use anyhow::Result;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

mod browser;
pub mod audio;
pub mod config;
pub mod engine;
pub mod game;
pub mod level;
pub mod sprite;
pub mod world;

use audio::{Sound, SoundBoard, WebSoundBoard};
use config::GameConfig;
use engine::input::{Button, InputState};
use engine::{GameLoop, LoopHandle};
use game::{PolloLoco, Setup};

// ==================== Constants ====================
// element id -> button, present in the mobile layout only
const TOUCH_BUTTONS: [(&str, Button); 4] = [
    ("button-left", Button::Left),
    ("button-right", Button::Right),
    ("button-jump", Button::Up),
    ("button-bottle", Button::Space),
];

// ==================== App ====================
/// Application context owned by the page
/// - replaces the canvas/world/keyboard globals: input, audio and the
///   running loop all live here and are handed down explicitly
/// - one InputState for the page's lifetime, listeners are wired once and
///   every new World reads from it
#[wasm_bindgen]
pub struct App {
    input: Rc<RefCell<InputState>>,
    sounds: Rc<WebSoundBoard>,
    config: GameConfig,
    running: Rc<RefCell<Option<LoopHandle>>>,
}

impl App {
    fn new(config: GameConfig) -> Result<Self> {
        let input = Rc::new(RefCell::new(InputState::default()));
        browser::listen_for_keys(input.clone())?;
        for (id, button) in TOUCH_BUTTONS {
            if let Err(err) = browser::listen_for_touch(id, button, input.clone()) {
                log::info!("touch controls unavailable : {:#}", err);
            }
        }
        let sounds = Rc::new(WebSoundBoard::new(config.muted)?);
        Ok(App {
            input,
            sounds,
            config,
            running: Rc::new(RefCell::new(None)),
        })
    }

    /// Stops whatever runs and starts a fresh World
    fn start_game(&self) {
        self.stop();
        *self.input.borrow_mut() = InputState::default();
        if !self.sounds.is_muted() {
            self.sounds.play(Sound::Theme);
        }

        let setup = Setup {
            config: self.config.clone(),
            sounds: self.sounds.clone(),
            seed: None,
        };
        let input = self.input.clone();
        let running = self.running.clone();
        browser::spawn_local(async move {
            match GameLoop::start(PolloLoco::new(setup), input).await {
                // a second reload in the same turn may have stored a handle
                // already, it stops on the way out
                Ok(handle) => {
                    if let Some(stale) = running.borrow_mut().replace(handle) {
                        stale.stop();
                    }
                }
                Err(err) => log::error!("Could not start the game : {:#?}", err),
            }
        });
    }
}

#[wasm_bindgen]
impl App {
    /// Back to a brand new playthrough, the old loop never fires again
    pub fn reload(&self) {
        self.start_game();
    }

    pub fn stop(&self) {
        if let Some(handle) = self.running.borrow_mut().take() {
            handle.stop();
        }
        for sound in Sound::ALL.into_iter().filter(Sound::loops) {
            self.sounds.pause(sound);
        }
    }

    /// Returns the new mute state
    pub fn toggle_mute(&self) -> bool {
        let muted = !self.sounds.is_muted();
        self.sounds.set_muted(muted);
        if muted {
            self.sounds.pause(Sound::Theme);
        } else {
            self.sounds.play(Sound::Theme);
        }
        muted
    }
}

fn to_js(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", err))
}

// ==================== Main Functions ====================
/// Main entry for the Webassembly module
/// - fails fast without a 2d canvas context
/// - loads config.json (defaults if missing)
/// - wires input + audio, starts the first playthrough
#[wasm_bindgen]
pub async fn launch() -> Result<App, JsValue> {
    // setup better panic messages for debugging
    console_error_panic_hook::set_once();
    browser::init_logging(log::Level::Info);

    browser::context().map_err(to_js)?;
    let config = GameConfig::fetch_or_default().await;
    let app = App::new(config).map_err(to_js)?;
    app.start_game();
    Ok(app)
}
