//! Zombie Typist entry point
//!
//! Browser: wires DOM events and requestAnimationFrame to the engine.
//! Native: runs a headless autoplay demo with a scripted typist.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlInputElement, HtmlSelectElement, KeyboardEvent};

    use zombie_typist::audio::{AudioManager, Volume};
    use zombie_typist::highscores::LocalScoreStore;
    use zombie_typist::platform::FrameClock;
    use zombie_typist::render::{RenderSink, Snapshot};
    use zombie_typist::sim::{FeedbackKind, GameMode, KeyOutcome, Status};
    use zombie_typist::{Engine, FrameToken, Settings};

    type WebEngine = Engine<AudioManager, LocalScoreStore, DomHud>;

    /// Everything the browser callbacks share
    struct App {
        engine: WebEngine,
        clock: FrameClock,
        /// Pending requestAnimationFrame handle
        raf_id: Option<i32>,
    }

    /// Writes snapshots into the page's HUD elements
    struct DomHud {
        document: Document,
    }

    impl DomHud {
        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_html(&self, id: &str, html: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_inner_html(html);
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
            }
        }
    }

    impl RenderSink for DomHud {
        fn present(&mut self, snap: &Snapshot) {
            let stats = &snap.stats;
            self.set_text("hud-score", &stats.score.to_string());
            self.set_text("hud-combo", &format!("x{}", stats.combo));
            self.set_text("hud-kills", &stats.kills.to_string());
            self.set_text("hud-wpm", &format!("{:.0}", stats.wpm));
            self.set_text("hud-time", &format!("{:.0}s", stats.elapsed));

            let mut field = String::new();
            for t in &snap.targets {
                let (class, opacity) = match t.decay {
                    None => ("zombie", 1.0),
                    Some(p) => ("zombie dying", 1.0 - p),
                };
                field.push_str(&format!(
                    r#"<span class="{}" style="left:{:.0}px;top:{:.0}px;opacity:{:.2}">{}</span>"#,
                    class,
                    t.x,
                    t.y,
                    opacity,
                    escape_html(&t.glyph.to_string())
                ));
            }
            if let Some(end) = snap.tracer {
                field.push_str(&format!(
                    r#"<span class="tracer" style="left:{:.0}px;top:{:.0}px;opacity:{:.2}"></span>"#,
                    end.x, end.y, snap.muzzle_flash
                ));
            }
            self.set_html("field", &field);

            if let Some(el) = self.document.get_element_by_id("muzzle") {
                let _ = el.set_attribute("style", &format!("opacity:{:.2}", snap.muzzle_flash));
            }

            match &snap.feedback {
                Some(fb) => {
                    let class = match fb.kind {
                        FeedbackKind::Hit => "feedback-hit",
                        FeedbackKind::Miss => "feedback-miss",
                    };
                    self.set_html(
                        "feedback",
                        &format!(r#"<span class="{}">{}</span>"#, class, escape_html(&fb.key)),
                    );
                }
                None => self.set_html("feedback", ""),
            }

            let log: String = snap
                .log
                .iter()
                .map(|e| {
                    format!(
                        r#"<li class="log-{}">{}</li>"#,
                        format!("{:?}", e.kind).to_lowercase(),
                        escape_html(&e.message)
                    )
                })
                .collect();
            self.set_html("combat-log", &log);

            self.set_visible("menu", snap.status == Status::Menu);
            self.set_visible("pause-menu", snap.status == Status::Paused);
            self.set_visible("game-over", snap.status == Status::GameOver);
            if snap.status == Status::GameOver {
                self.set_text("final-points", &stats.total_points.to_string());
                self.set_text("final-combo", &stats.max_combo.to_string());
                self.set_text("final-time", &format!("{:.1}s", stats.elapsed));
            }
        }
    }

    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
    }

    pub fn run() {
        zombie_typist::logging::init(log::LevelFilter::Info);
        log::info!("Zombie Typist starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let settings = Settings::load();
        let audio = AudioManager::new(Volume::from_settings(&settings));
        let scores = LocalScoreStore::load();
        let hud = DomHud {
            document: document.clone(),
        };

        let seed = js_sys::Date::now() as u64;
        let mut engine = Engine::new(seed, settings, audio, scores, hud);
        if let Some(field) = document.get_element_by_id("field") {
            engine.resize(field.client_width() as f32, field.client_height() as f32);
        }
        log::info!("Engine initialized with seed: {}", seed);

        let app = Rc::new(RefCell::new(App {
            engine,
            clock: FrameClock::new(),
            raf_id: None,
        }));

        sync_menu_controls(&app);
        setup_keyboard(app.clone());
        setup_buttons(app.clone());
        setup_auto_pause(app.clone());
        setup_resize(app);
    }

    /// Restart the frame loop for a freshly issued token
    fn begin(app: &Rc<RefCell<App>>, token: FrameToken) {
        halt(app);
        schedule(app, token);
    }

    /// Cancel the pending frame, if any
    fn halt(app: &Rc<RefCell<App>>) {
        let mut a = app.borrow_mut();
        a.clock.halt();
        if let (Some(id), Some(window)) = (a.raf_id.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
    }

    fn schedule(app: &Rc<RefCell<App>>, token: FrameToken) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let app_frame = app.clone();
        let closure = Closure::once(move |time: f64| {
            on_frame(app_frame, token, time);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => app.borrow_mut().raf_id = Some(id),
            Err(e) => log::warn!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn on_frame(app: Rc<RefCell<App>>, token: FrameToken, time: f64) {
        let more = {
            let mut a = app.borrow_mut();
            a.raf_id = None;
            let dt = a.clock.delta(time);
            a.engine.frame(token, dt)
        };
        if more {
            schedule(&app, token);
        }
    }

    fn start_session(app: &Rc<RefCell<App>>) {
        let token = {
            let mut a = app.borrow_mut();
            let mut settings = a.engine.settings().clone();
            read_menu_controls(&mut settings);
            settings.save();
            a.engine.set_settings(settings);
            a.engine.start_from_settings()
        };
        begin(app, token);
    }

    fn stop_session(app: &Rc<RefCell<App>>) {
        app.borrow_mut().engine.stop();
        halt(app);
    }

    /// Toggle pause and keep the frame loop in step with the result
    fn toggle_pause(app: &Rc<RefCell<App>>) {
        let resumed = app.borrow_mut().engine.pause();
        match resumed {
            Some(token) => begin(app, token),
            None => halt(app),
        }
    }

    fn sync_menu_controls(app: &Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let a = app.borrow();
        let settings = a.engine.settings();
        if let Some(select) = document
            .get_element_by_id("mode-select")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            select.set_value(settings.default_mode.as_str());
        }
        if let Some(input) = document
            .get_element_by_id("speed-input")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            input.set_value_as_number(settings.practice_speed as f64);
        }
    }

    fn read_menu_controls(settings: &mut Settings) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(select) = document
            .get_element_by_id("mode-select")
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
        {
            match select.value().parse::<GameMode>() {
                Ok(mode) => settings.default_mode = mode,
                Err(e) => log::warn!("{}", e),
            }
        }
        if let Some(input) = document
            .get_element_by_id("speed-input")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        {
            if let Err(e) = settings.set_practice_speed(input.value_as_number() as f32) {
                log::warn!("{}", e);
            }
        }
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let key = event.key();
            let outcome = app.borrow_mut().engine.handle_key(&key);
            if outcome == KeyOutcome::Ignored {
                return;
            }
            event.prevent_default();
            if outcome == KeyOutcome::TogglePause {
                // The engine already toggled; follow its new token
                let token = app.borrow().engine.token();
                match token {
                    Some(token) => begin(&app, token),
                    None => halt(&app),
                }
            }
        });
        let _ = document.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let buttons: [(&str, fn(&Rc<RefCell<App>>)); 4] = [
            ("start-btn", start_session),
            ("restart-btn", start_session),
            ("resume-btn", toggle_pause),
            ("quit-btn", stop_session),
        ];
        for (id, action) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                action(&app);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        fn auto_pause(app: &Rc<RefCell<App>>, reason: &str) {
            let wanted = {
                let a = app.borrow();
                a.engine.settings().pause_on_blur && a.engine.status() == Status::Playing
            };
            if wanted {
                toggle_pause(app);
                log::info!("Auto-paused ({})", reason);
            }
        }

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    auto_pause(&app, "tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                auto_pause(&app, "window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(field) = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id("field"))
            else {
                return;
            };
            app.borrow_mut()
                .engine
                .resize(field.client_width() as f32, field.client_height() as f32);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use zombie_typist::audio::Silent;
    use zombie_typist::highscores::{LocalScoreStore, SessionSummary};
    use zombie_typist::render::Headless;
    use zombie_typist::sim::{GameMode, KeyOutcome};
    use zombie_typist::{Engine, Settings};

    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Longest simulated run (seconds)
    const DEMO_LIMIT: f32 = 300.0;
    /// Seconds the scripted typist needs between keys
    const KEY_INTERVAL: f32 = 0.3;
    /// Chance each key press is a typo
    const TYPO_RATE: f64 = 0.08;

    /// Play one survival run with a scripted typist and return its summary
    pub fn run(seed: u64) -> SessionSummary {
        let mut engine = Engine::new(
            seed,
            Settings::default(),
            Silent,
            LocalScoreStore::load(),
            Headless,
        );
        let mut typist = Pcg32::seed_from_u64(seed.wrapping_add(1));
        let token = engine.start(GameMode::Survival, Settings::default().practice_speed);
        let mut cooldown = 0.0_f32;

        loop {
            if !engine.frame(token, FRAME_DT) || engine.state().stats.elapsed >= DEMO_LIMIT {
                break;
            }

            cooldown -= FRAME_DT;
            if cooldown > 0.0 {
                continue;
            }

            // Aim at whatever is closest to the barrier once it is well on screen
            let reach = engine.state().field.width * 0.7;
            let aim = engine
                .state()
                .targets
                .iter()
                .filter(|t| t.is_alive() && t.pos.x < reach)
                .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
                .map(|t| t.glyph);
            let Some(glyph) = aim else {
                continue;
            };

            let key = if typist.random_bool(TYPO_RATE) {
                "~".to_string()
            } else {
                glyph.to_string()
            };
            if engine.handle_key(&key) == KeyOutcome::Miss {
                log::debug!("Typist fumbled '{}'", glyph);
            }
            cooldown = KEY_INTERVAL;
        }

        let summary = SessionSummary::from_state(engine.state());
        if engine.state().is_playing() {
            engine.stop();
            log::info!("Demo time limit reached");
        }
        summary
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    zombie_typist::logging::init(log::LevelFilter::Info);
    log::info!("Zombie Typist (native) starting headless demo...");
    log::info!("The playable game is the web build - run with `trunk serve`");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x5eed);

    let summary = demo::run(seed);
    println!("\nDemo run (seed {})", seed);
    println!("  survived     {:.1}s", summary.elapsed);
    println!("  kills        {}", summary.kills);
    println!("  max combo    {}", summary.max_combo);
    println!("  points       {}", summary.total_points);
    println!("  peak score   {}", summary.peak_score);
    println!("  final score  {}", summary.final_score);
    println!("  wpm          {:.1}", summary.wpm);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
