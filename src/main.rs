//! Belt Typer entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::fmt::Write as _;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent};

    use belt_typer::audio::{AudioManager, SoundEffect};
    use belt_typer::consts::VISIBLE_COUNT;
    use belt_typer::sim::{Session, handle_key};
    use belt_typer::{Feedback, Settings, Snapshot};

    /// Consumed balls kept visible behind the nozzle
    const BEHIND_COUNT: usize = 4;

    struct Game {
        session: Session,
        feedback: Feedback,
        audio: AudioManager,
        last_time: f64,
        dirty: bool,
    }

    impl Game {
        fn new(settings: Settings) -> Self {
            let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
            let session = Session::with_source(
                settings.vocabulary(),
                belt_typer::sim::SeededSource::new(seed),
            );
            log::info!("Game initialized with seed: {}", seed);
            Self {
                session,
                feedback: Feedback::new(settings.feedback_pulses()),
                audio: AudioManager::new(&settings),
                last_time: 0.0,
                dirty: true,
            }
        }

        /// Feed one key to the matcher and fan events out to sound and pulses
        fn key(&mut self, key: &str) {
            handle_key(&mut self.session, key);
            for event in self.session.drain_events() {
                self.feedback.observe(&event);
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
                self.dirty = true;
            }
        }

        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                time - self.last_time
            } else {
                0.0
            };
            self.last_time = time;
            if self.feedback.advance(dt) {
                self.dirty = true;
            }
        }

        fn restart(&mut self) {
            self.session.reset();
            self.feedback.clear();
            self.dirty = true;
        }

        fn toggle_pause(&mut self) {
            self.session.toggle_pause();
            log::info!("Paused: {}", self.session.is_paused());
            self.dirty = true;
        }

        /// Push the current snapshot into the DOM
        fn render(&mut self) {
            if !self.dirty {
                return;
            }
            self.dirty = false;

            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let snap = Snapshot::window(&self.session, &self.feedback, BEHIND_COUNT, VISIBLE_COUNT);

            set_text(&document, "#hud-score .hud-value", &snap.stats.score.to_string());
            set_text(&document, "#hud-words .hud-value", &snap.stats.words_completed.to_string());
            set_text(&document, "#hud-errors .hud-value", &snap.stats.errors.to_string());

            if let Some(belt) = document.get_element_by_id("belt") {
                belt.set_inner_html(&belt_html(&snap));
            }

            if let Some(tray) = document.get_element_by_id("tray") {
                let mut html = String::new();
                for color in &snap.archive {
                    let _ = write!(
                        html,
                        r#"<div class="tray-ball" style="background:{color}"></div>"#
                    );
                }
                tray.set_inner_html(&html);
            }

            if let Some(splash) = document.get_element_by_id("splash") {
                let _ = splash.set_attribute("style", &format!("--splash:{}", snap.splash_color));
            }
            toggle_class(&document, "machine", "splashing", snap.splash_active);
            toggle_class(&document, "machine", "smoking", snap.smoking);
            toggle_class(&document, "pause-menu", "hidden", !snap.paused);
            toggle_class(&document, "game", "paused", snap.paused);

            if let Some(btn) = document.get_element_by_id("pause-btn") {
                btn.set_text_content(Some(if snap.paused { "▶" } else { "⏸" }));
            }
        }
    }

    fn belt_html(snap: &Snapshot) -> String {
        let mut html = String::new();
        for unit in &snap.units {
            let mut class = String::from("ball");
            if unit.separator {
                class.push_str(" separator");
            }
            if unit.consumed {
                class.push_str(" typed");
            }
            if unit.active {
                class.push_str(" active");
            }
            let label = match unit.letter {
                Some('<') => "&lt;".to_string(),
                Some('>') => "&gt;".to_string(),
                Some('&') => "&amp;".to_string(),
                Some(c) => c.to_string(),
                None => String::new(),
            };
            let _ = write!(
                html,
                r#"<div class="{class}" data-id="{}" style="background:{}">{label}</div>"#,
                unit.id, unit.color
            );
        }
        html
    }

    fn set_text(document: &Document, selector: &str, text: &str) {
        if let Some(el) = document.query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn toggle_class(document: &Document, id: &str, class: &str, on: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force(class, on);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Belt Typer starting...");

        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(settings)));
        game.borrow_mut().session.start();

        setup_keyboard(game.clone());
        setup_buttons(game.clone());
        setup_auto_pause(game.clone());

        request_animation_frame(game);

        log::info!("Belt Typer running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if event.ctrl_key() || event.meta_key() || event.alt_key() {
                return;
            }
            let key = event.key();
            let mut g = game.borrow_mut();
            match key.as_str() {
                "Escape" => g.toggle_pause(),
                _ => {
                    // Keep space from scrolling the page
                    if key == " " {
                        event.prevent_default();
                    }
                    g.audio.resume();
                    g.key(&key);
                }
            }
        });
        let _ = window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        for id in ["pause-btn", "resume-btn"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().toggle_pause();
                });
                let _ = btn
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = document.get_element_by_id("reset-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().restart();
                log::info!("Game restarted");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // Visibility change (tab switch, minimize)
        let document_clone = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                let mut g = game.borrow_mut();
                if !g.session.is_paused() {
                    g.session.pause();
                    g.dirty = true;
                    log::info!("Auto-paused (tab hidden)");
                }
            }
        });
        let _ = document.add_event_listener_with_callback(
            "visibilitychange",
            closure.as_ref().unchecked_ref(),
        );
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Belt Typer (native) starting...");
    log::info!("Type the text shown and press Enter. :p pauses, :r resets, :q quits.");

    if let Err(e) = console::run() {
        log::error!("Console error: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Line-oriented console mode for native builds
#[cfg(not(target_arch = "wasm32"))]
mod console {
    use std::io::{self, BufRead, Write};
    use std::time::{SystemTime, UNIX_EPOCH};

    use belt_typer::Settings;
    use belt_typer::consts::VISIBLE_COUNT;
    use belt_typer::sim::{GameEvent, SeededSource, Session, handle_key};

    pub fn run() -> io::Result<()> {
        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
        log::info!("Game initialized with seed: {}", seed);

        let mut session = Session::with_source(settings.vocabulary(), SeededSource::new(seed));
        session.start();

        let stdin = io::stdin();
        let mut out = io::stdout().lock();
        print_belt(&mut out, &session)?;

        for line in stdin.lock().lines() {
            let line = line?;
            match line.trim() {
                ":q" => break,
                ":r" => session.reset(),
                ":p" => {
                    session.toggle_pause();
                    let label = if session.is_paused() {
                        "[paused]"
                    } else {
                        "[resumed]"
                    };
                    writeln!(out, "{label}")?;
                }
                _ => {
                    let mut buf = [0u8; 4];
                    for c in line.chars() {
                        handle_key(&mut session, c.encode_utf8(&mut buf));
                    }
                    for event in session.drain_events() {
                        match event {
                            GameEvent::Incorrect { expected, typed } => {
                                writeln!(out, "  ✗ expected {:?}, typed {:?}", expected, typed)?
                            }
                            GameEvent::WordCompleted { word, .. } => {
                                if let Some(entry) = session.belt().word(word) {
                                    writeln!(out, "  ✓ {}", entry.text)?;
                                }
                            }
                            GameEvent::Correct { .. } => {}
                        }
                    }
                }
            }
            print_belt(&mut out, &session)?;
        }

        let stats = session.stats();
        log::info!(
            "Final score {} ({} words, {} errors)",
            stats.score,
            stats.words_completed,
            stats.errors
        );
        Ok(())
    }

    fn print_belt(out: &mut impl Write, session: &Session) -> io::Result<()> {
        let stats = session.stats();
        let upcoming: String = session
            .belt()
            .pending_text()
            .chars()
            .take(VISIBLE_COUNT * 3)
            .collect();
        writeln!(
            out,
            "score {:>5} | words {:>3} | errors {:>3} | > {}",
            stats.score, stats.words_completed, stats.errors, upcoming
        )?;
        out.flush()
    }
}
