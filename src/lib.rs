use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Event, KeyboardEvent, PageTransitionEvent, Window};

pub mod config;
pub mod diagnostics;
pub mod game;
pub mod input;
mod sprites;
mod stage;
pub mod view;

use config::Config;
use game::Game;
use input::{Input, Key};
use stage::Stage;
use view::Frame;

const ROOT_ID: &str = "flappy-root";

type RafClosure = Closure<dyn FnMut(f64)>;
type EventClosure = Closure<dyn FnMut(Event)>;

thread_local! {
    static MOUNTED: RefCell<Option<GameHandle>> = const { RefCell::new(None) };
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))
}

fn js_value_to_string(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn now_ms(window: &Window) -> f64 {
    window
        .performance()
        .map(|performance| performance.now())
        .unwrap_or_else(js_sys::Date::now)
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

fn set_status(document: &Document, status: &str) {
    if let Some(el) = document.document_element() {
        let _ = el.set_attribute("data-render-status", status);
    }
}

fn log(message: &str) {
    web_sys::console::log_1(&JsValue::from_str(message));
}

struct App {
    game: Game,
    input: Input,
    rng: SmallRng,
    stage: Stage,
    document: Document,
    diagnostics: bool,
    last_frame: Option<Frame>,
    last_tick: Option<f64>,
    frame_delta: Option<f64>,
    last_event: String,
}

impl App {
    fn record(&mut self, event: &str) {
        self.last_event = event.to_string();
        set_status(&self.document, diagnostics::phase_name(self.game.phase));
        log(&format!("flappy: {} (score={})", event, self.game.score));
    }

    fn start_run(&mut self, now: f64) {
        let restarting = self.game.game_over();
        if self.game.start(now) {
            self.record(if restarting { "restart" } else { "start" });
            self.render();
        }
    }

    fn tick(&mut self, now: f64) {
        if let Some(previous) = self.last_tick {
            self.frame_delta = Some(now - previous);
        }
        self.last_tick = Some(now);

        if self.game.running() {
            let score = self.game.score;
            let last_spawn = self.game.last_spawn;

            let game = std::mem::take(&mut self.game);
            self.game = game.step(&self.input, now, &mut self.rng);

            if self.game.last_spawn != last_spawn {
                self.last_event = "spawn".to_string();
            }
            if self.game.score != score {
                self.record("score");
            }
            if self.game.game_over() {
                self.record("game_over");
            }
        }

        self.render();
    }

    fn render(&mut self) {
        let frame = view::layout(&self.game);
        if self.last_frame.as_ref() != Some(&frame) {
            if let Err(err) = self.stage.apply(&frame) {
                web_sys::console::error_1(&err);
            }
            self.last_frame = Some(frame);
        }

        if self.diagnostics {
            let lines = diagnostics::lines(&self.game, self.frame_delta, &self.last_event);
            self.stage.show_diagnostics(&lines);
        }
    }
}

#[wasm_bindgen]
pub struct GameHandle {
    app: Rc<RefCell<App>>,
    window: Window,
    on_keydown: Option<EventClosure>,
    on_keyup: Option<EventClosure>,
    on_restart: Option<EventClosure>,
    raf: Rc<RefCell<Option<RafClosure>>>,
    raf_id: Rc<Cell<Option<i32>>>,
}

#[wasm_bindgen]
impl GameHandle {
    pub fn score(&self) -> u32 {
        self.app.borrow().game.score
    }

    pub fn status(&self) -> String {
        diagnostics::phase_name(self.app.borrow().game.phase).to_string()
    }

    pub fn destroy(&mut self) {
        self.teardown();
    }
}

impl GameHandle {
    fn teardown(&mut self) {
        if let Some(id) = self.raf_id.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        let raf = self.raf.borrow_mut().take();
        drop(raf);

        let detached = self.on_keydown.is_some();
        if let Some(cb) = self.on_keydown.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
        }
        if let Some(cb) = self.on_keyup.take() {
            let _ = self
                .window
                .remove_event_listener_with_callback("keyup", cb.as_ref().unchecked_ref());
        }
        if let Some(cb) = self.on_restart.take() {
            let app = self.app.borrow();
            let _ = app
                .stage
                .restart_button()
                .remove_event_listener_with_callback("click", cb.as_ref().unchecked_ref());
        }

        if detached {
            let mut app = self.app.borrow_mut();
            app.input.release_all();
            app.stage.remove();
            app.last_event = "teardown".to_string();
            log("flappy: teardown");
        }
    }
}

impl Drop for GameHandle {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[wasm_bindgen]
pub async fn mount(root_id: String) -> Result<GameHandle, JsValue> {
    let window = window()?;
    let config = Config::from_query(&window.location().search().unwrap_or_default());
    mount_with(window, &root_id, config).await
}

async fn mount_with(window: Window, root_id: &str, config: Config) -> Result<GameHandle, JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let host = document
        .get_element_by_id(root_id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing #{}", root_id)))?;

    set_status(&document, "loading");
    let sprites = sprites::load_sheet(&document).await?;
    let stage = Stage::build(&document, &host, sprites, config.diagnostics)?;

    let seed = config.seed.unwrap_or_else(random_seed);
    let app = Rc::new(RefCell::new(App {
        game: Game::new(),
        input: Input::new(),
        rng: SmallRng::seed_from_u64(seed),
        stage,
        document: document.clone(),
        diagnostics: config.diagnostics,
        last_frame: None,
        last_tick: None,
        frame_delta: None,
        last_event: "init".to_string(),
    }));

    {
        let mut app = app.borrow_mut();
        app.record(&format!("mount (seed={})", seed));
        app.render();
    }

    let app_keydown = Rc::clone(&app);
    let window_keydown = window.clone();
    let on_keydown = Closure::wrap(Box::new(move |event: Event| {
        let Some(key) = event
            .dyn_ref::<KeyboardEvent>()
            .and_then(|keyboard| Key::from_dom(&keyboard.key()))
        else {
            return;
        };
        event.prevent_default();

        let mut app = app_keydown.borrow_mut();
        app.input.press(key);
        if key.is_jump() && !app.game.running() {
            app.start_run(now_ms(&window_keydown));
        }
    }) as Box<dyn FnMut(_)>);
    window.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())?;

    let app_keyup = Rc::clone(&app);
    let on_keyup = Closure::wrap(Box::new(move |event: Event| {
        let Some(key) = event
            .dyn_ref::<KeyboardEvent>()
            .and_then(|keyboard| Key::from_dom(&keyboard.key()))
        else {
            return;
        };
        app_keyup.borrow_mut().input.release(key);
    }) as Box<dyn FnMut(_)>);
    window.add_event_listener_with_callback("keyup", on_keyup.as_ref().unchecked_ref())?;

    let app_restart = Rc::clone(&app);
    let window_restart = window.clone();
    let on_restart = Closure::wrap(Box::new(move |_event: Event| {
        app_restart
            .borrow_mut()
            .start_run(now_ms(&window_restart));
    }) as Box<dyn FnMut(_)>);
    app.borrow()
        .stage
        .restart_button()
        .add_event_listener_with_callback("click", on_restart.as_ref().unchecked_ref())?;

    let raf: Rc<RefCell<Option<RafClosure>>> = Rc::new(RefCell::new(None));
    let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    {
        let app_tick = Rc::clone(&app);
        let raf_tick = Rc::clone(&raf);
        let raf_id_tick = Rc::clone(&raf_id);
        let window_tick = window.clone();
        let cb = Closure::wrap(Box::new(move |now: f64| {
            raf_id_tick.set(None);
            app_tick.borrow_mut().tick(now);

            if let Some(cb) = raf_tick.borrow().as_ref() {
                if let Ok(id) = window_tick.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    raf_id_tick.set(Some(id));
                }
            }
        }) as Box<dyn FnMut(f64)>);

        let id = window.request_animation_frame(cb.as_ref().unchecked_ref())?;
        raf_id.set(Some(id));
        *raf.borrow_mut() = Some(cb);
    }

    Ok(GameHandle {
        app,
        window,
        on_keydown: Some(on_keydown),
        on_keyup: Some(on_keyup),
        on_restart: Some(on_restart),
        raf,
        raf_id,
    })
}

#[wasm_bindgen]
pub fn unmount() {
    let handle = MOUNTED.with(|slot| slot.borrow_mut().take());
    if let Some(mut handle) = handle {
        handle.destroy();
    }
}

// A `pagehide` into the back/forward cache keeps the game mounted for restore.
pub fn leaves_page(event: &Event) -> bool {
    !event
        .dyn_ref::<PageTransitionEvent>()
        .is_some_and(|transition| transition.persisted())
}

fn install_pagehide(window: &Window) -> Result<(), JsValue> {
    let on_pagehide = Closure::wrap(Box::new(move |event: Event| {
        if leaves_page(&event) {
            unmount();
        }
    }) as Box<dyn FnMut(_)>);
    window.add_event_listener_with_callback("pagehide", on_pagehide.as_ref().unchecked_ref())?;
    on_pagehide.forget();
    Ok(())
}

fn report_fatal(err: &JsValue) {
    let message = format!("fatal: {}", js_value_to_string(err));

    if let Some(doc) = web_sys::window().and_then(|win| win.document()) {
        set_status(&doc, "error");
        if let Some(root) = doc.get_element_by_id(ROOT_ID) {
            root.set_text_content(Some(&message));
        }
    }

    web_sys::console::error_1(err);
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let Ok(win) = window() else {
        return;
    };
    let has_root = win
        .document()
        .and_then(|doc| doc.get_element_by_id(ROOT_ID))
        .is_some();
    if !has_root {
        return;
    }

    spawn_local(async move {
        let config = Config::from_query(&win.location().search().unwrap_or_default());
        match mount_with(win.clone(), ROOT_ID, config).await {
            Ok(handle) => {
                let previous = MOUNTED.with(|slot| slot.borrow_mut().replace(handle));
                drop(previous);
                if let Err(err) = install_pagehide(&win) {
                    web_sys::console::error_1(&err);
                }
            }
            Err(err) => report_fatal(&err),
        }
    });
}
