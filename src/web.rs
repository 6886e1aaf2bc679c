//! Browser glue
//!
//! Wires the canvas, keyboard, buttons and HUD to an [`AppContext`] and
//! exposes [`ArcadeHandle`] so the page's pose pipeline can feed labels in.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, Window};

use crate::app::{AppContext, GameKind, InputBinding};
use crate::audio::AudioManager;
use crate::render::canvas::CanvasSurface;
use crate::settings::Settings;
use crate::sim::{EndReason, KeyCode, Observers, Signal};
use crate::tuning::Tuning;

/// Everything the page loop touches
struct Page {
    app: AppContext,
    surface: CanvasSurface,
    canvas: HtmlCanvasElement,
    audio: Rc<AudioManager>,
}

type SharedPage = Rc<RefCell<Page>>;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    log::info!("Pose Arcade loaded");
}

fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

fn set_text(id: &str, text: &str) {
    match document().and_then(|d| d.get_element_by_id(id)) {
        Some(el) => el.set_text_content(Some(text)),
        None => log::debug!("#{} missing; HUD text dropped", id),
    }
}

fn set_disabled(id: &str, disabled: bool) {
    let Some(el) = document().and_then(|d| d.get_element_by_id(id)) else {
        return;
    };
    let _ = if disabled {
        el.set_attribute("disabled", "")
    } else {
        el.remove_attribute("disabled")
    };
}

/// HUD observers writing into `#scoreDisplay` and `#hpDisplay`
fn hud_observers() -> Observers {
    Observers {
        on_score: Some(Rc::new(|score: u32, level: u32| {
            set_text("scoreDisplay", &format!("Score: {} (Lv.{})", score, level));
        })),
        on_hp: Some(Rc::new(|hp: u32| {
            set_text("hpDisplay", &format!("HP: {}", "\u{2764}\u{fe0f}".repeat(hp as usize)));
        })),
        on_end: Some(Rc::new(|score: u32, reason: EndReason| {
            log::info!("Session ended with {} points ({:?})", score, reason);
            set_text(
                "scoreDisplay",
                &format!("Game Over! Score: {} (Lv.{})", score, reason.level()),
            );
            set_disabled("startBtn", false);
            set_disabled("stopBtn", true);
        })),
    }
}

/// Window keydown/keyup listeners feeding the active game
struct KeyboardBinding {
    window: Window,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
    keyup: Closure<dyn FnMut(KeyboardEvent)>,
}

impl KeyboardBinding {
    fn attach(window: Window, page: Weak<RefCell<Page>>) -> Self {
        let make = |pressed: bool| {
            let page = page.clone();
            Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(code) = KeyCode::from_code(&event.code()) else {
                    return;
                };
                event.prevent_default();
                let Some(page) = page.upgrade() else { return };
                // a key can arrive while a frame holds the page
                if let Ok(mut p) = page.try_borrow_mut() {
                    p.app.signal(&Signal::Key { code, pressed });
                }
            })
        };
        let keydown = make(true);
        let keyup = make(false);
        let _ = window
            .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
        let _ = window.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref());
        Self {
            window,
            keydown,
            keyup,
        }
    }
}

impl InputBinding for KeyboardBinding {
    fn detach(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("keydown", self.keydown.as_ref().unchecked_ref());
        let _ = self
            .window
            .remove_event_listener_with_callback("keyup", self.keyup.as_ref().unchecked_ref());
    }
}

fn request_animation_frame(page: SharedPage) {
    let Some(window) = web_sys::window() else { return };
    let closure = Closure::once(move |_time: f64| {
        game_loop(page);
    });
    let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
    closure.forget();
}

fn game_loop(page: SharedPage) {
    {
        let mut guard = page.borrow_mut();
        let p = &mut *guard;
        let width = p.canvas.width() as f32;
        let height = p.canvas.height() as f32;
        p.surface.clear(width, height);
        p.app.frame(&mut p.surface, width, height);
    }

    request_animation_frame(page);
}

fn start_session(page: &SharedPage) {
    let Some(window) = web_sys::window() else { return };
    let binding = KeyboardBinding::attach(window, Rc::downgrade(page));
    let mut p = page.borrow_mut();
    p.audio.resume();
    p.app.attach_input(Box::new(binding));
    p.app.start();
    set_disabled("startBtn", true);
    set_disabled("stopBtn", false);
}

fn stop_session(page: &SharedPage) {
    page.borrow_mut().app.stop();
    set_disabled("startBtn", false);
    set_disabled("stopBtn", true);
}

fn on_click(document: &Document, id: &str, page: &SharedPage, action: fn(&SharedPage)) {
    let Some(btn) = document.get_element_by_id(id) else {
        log::warn!("#{} not found; button not wired", id);
        return;
    };
    let page = Rc::downgrade(page);
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
        if let Some(page) = page.upgrade() {
            action(&page);
        }
    });
    let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}

/// JS-facing handle to a running arcade page
#[wasm_bindgen]
pub struct ArcadeHandle {
    page: SharedPage,
}

#[wasm_bindgen]
impl ArcadeHandle {
    /// Bind to the canvas with id `canvas_id` and start the draw loop.
    /// `tuning_json` may override any balance value.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str, tuning_json: Option<String>) -> Result<ArcadeHandle, JsValue> {
        let document = document().ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str("canvas not found"))?
            .dyn_into()?;

        let settings = Settings::load();
        let tuning = tuning_json
            .as_deref()
            .map(Tuning::from_json_or_default)
            .unwrap_or_default();
        let seed = settings.session_seed(js_sys::Date::now() as u64);
        let audio = Rc::new(AudioManager::from_settings(&settings));

        let app = AppContext::new(
            settings.default_game,
            tuning,
            seed,
            audio.clone(),
            hud_observers(),
        );
        let surface = CanvasSurface::new(&canvas)?;
        let page = Rc::new(RefCell::new(Page {
            app,
            surface,
            canvas,
            audio,
        }));

        on_click(&document, "startBtn", &page, start_session);
        on_click(&document, "stopBtn", &page, stop_session);
        set_disabled("stopBtn", true);

        request_animation_frame(page.clone());
        log::info!("Pose Arcade running");
        Ok(ArcadeHandle { page })
    }

    /// Feed a stabilized pose label ("Left", "Center", "Right")
    pub fn on_pose(&self, label: &str) {
        if let Ok(mut p) = self.page.try_borrow_mut() {
            p.app.signal(&Signal::pose(label));
        }
    }

    pub fn start(&self) {
        start_session(&self.page);
    }

    pub fn stop(&self) {
        stop_session(&self.page);
    }

    /// Switch games by id (`"body-dodge"` or `"avoid-collect"`); returns false
    /// for unknown ids
    pub fn select_game(&self, id: &str) -> bool {
        let Some(kind) = GameKind::from_id(id) else {
            log::warn!("Unknown game id {:?}", id);
            return false;
        };
        stop_session(&self.page);
        self.page.borrow_mut().app.switch_game(kind);
        true
    }

    pub fn set_muted(&self, muted: bool) {
        let p = self.page.borrow();
        p.audio.set_muted(muted);
        let mut settings = Settings::load();
        settings.muted = muted;
        settings.save();
    }

    pub fn is_playing(&self) -> bool {
        self.page.borrow().app.is_playing()
    }

    pub fn score(&self) -> u32 {
        self.page.borrow().app.scoreboard().score
    }
}
