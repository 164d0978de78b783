//! Browser surface for the greeting.
//!
//! All state lives in one thread-local `Page`. Every DOM event, interval tick
//! and animation frame borrows it for the duration of a single handler, so
//! mutations never interleave. The letters stage owns its spawn / move
//! intervals through `LettersView`; replacing the view (stage change) or
//! dropping the page (shutdown) cancels them.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Event, HtmlCanvasElement, HtmlElement, MouseEvent, Window, window};

use crate::config::GreetingConfig;
use crate::error::GreetingError;
use crate::letters::{CollectOutcome, MOVE_INTERVAL_MS, SPAWN_INTERVAL_MS};
use crate::session::Greeting;
use crate::stage::Stage;

mod cards;
mod draw;
mod timers;

use timers::{Interval, Timeout};

const ROOT_ID: &str = "ll-root";
const HEARTS_ID: &str = "ll-hearts";
const FIELD_WIDTH: u32 = 480;
const FIELD_HEIGHT: u32 = 320;

struct LettersView {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    progress: HtmlElement,
    prompt: HtmlElement,
    _spawner: Interval,
    _mover: Interval,
}

struct QuestionView {
    yes: HtmlElement,
    no: HtmlElement,
    hint: HtmlElement,
}

enum StageView {
    Static,
    Letters(LettersView),
    Question(QuestionView),
}

struct Page {
    window: Window,
    document: Document,
    root: HtmlElement,
    card: HtmlElement,
    hearts: HtmlCanvasElement,
    hearts_ctx: CanvasRenderingContext2d,
    session: Greeting,
    rng: SmallRng,
    view: StageView,
    /// Pending game-complete signal. Kept until shutdown so it is never dropped
    /// from inside its own callback.
    completion: Option<Timeout>,
    first_frame_ms: Option<f64>,
}

thread_local! {
    static PAGE: RefCell<Option<Page>> = const { RefCell::new(None) };
    static GENERATION: Cell<u32> = const { Cell::new(0) };
}

/// Run `f` against the mounted page. `None` when nothing is mounted (or, which
/// should not happen, when a handler re-entered).
fn with_page<R>(f: impl FnOnce(&mut Page) -> R) -> Option<R> {
    PAGE.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => slot.as_mut().map(f),
        Err(_) => {
            log::warn!("page busy, event dropped");
            None
        }
    })
}

fn report(context: &str, result: Result<(), GreetingError>) {
    if let Err(err) = result {
        log::error!("{context}: {err}");
    }
}

pub(crate) fn current_stage() -> Option<Stage> {
    PAGE.with(|cell| {
        cell.try_borrow()
            .ok()
            .and_then(|slot| slot.as_ref().map(|p| p.session.stage()))
    })
}

pub(crate) fn mount(config: GreetingConfig) -> Result<(), GreetingError> {
    let config = config.validate()?;
    unmount();

    let win = window().ok_or(GreetingError::Dom("no window"))?;
    let doc = win.document().ok_or(GreetingError::Dom("no document"))?;
    let body = doc.body().ok_or(GreetingError::Dom("no body"))?;

    let root: HtmlElement = create(&doc, "div")?;
    root.set_id(ROOT_ID);
    root.set_attribute(
        "style",
        "position:fixed; inset:0; display:flex; align-items:center; justify-content:center; \
         overflow:hidden; background:#fff1f2; color:#4c0519; \
         font-family:ui-sans-serif, system-ui, -apple-system, 'Segoe UI', sans-serif;",
    )?;

    let hearts: HtmlCanvasElement = create(&doc, "canvas")?;
    hearts.set_id(HEARTS_ID);
    hearts.set_attribute(
        "style",
        "position:absolute; inset:0; width:100%; height:100%; pointer-events:none; z-index:0;",
    )?;
    root.append_child(&hearts)?;
    let hearts_ctx = context_2d(&hearts)?;

    let card: HtmlElement = create(&doc, "div")?;
    card.set_attribute("style", cards::CARD_STYLE)?;
    root.append_child(&card)?;
    body.append_child(&root)?;

    let mut page = Page {
        rng: SmallRng::seed_from_u64(entropy_seed(&win)),
        window: win,
        document: doc,
        root,
        card,
        hearts,
        hearts_ctx,
        session: Greeting::new(config),
        view: StageView::Static,
        completion: None,
        first_frame_ms: None,
    };
    // Card lookups go through the document, so the root must already be
    // attached; take it back out if the first card cannot be built.
    if let Err(err) = page.render_stage() {
        page.root.remove();
        return Err(err);
    }
    log::info!("greeting mounted for {}", page.session.recipient());

    let generation = GENERATION.with(|g| {
        let next = g.get().wrapping_add(1);
        g.set(next);
        next
    });
    PAGE.with(|cell| cell.replace(Some(page)));
    start_frame_loop(generation);
    Ok(())
}

pub(crate) fn unmount() {
    let old = PAGE.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => slot.take(),
        Err(_) => None,
    });
    if let Some(page) = old {
        page.root.remove();
        let stage = page.session.stage();
        // Dropping the page cancels the letters intervals and any pending timeout.
        drop(page);
        log::info!(
            "greeting unmounted at stage {stage}, {} interval(s) still running",
            timers::live_intervals()
        );
    }
}

fn entropy_seed(win: &Window) -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::getrandom(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(err) => {
            log::warn!("getrandom failed ({err}), seeding from clock");
            win.performance().map(|p| p.now().to_bits()).unwrap_or(0)
        }
    }
}

fn create<T: JsCast>(doc: &Document, tag: &str) -> Result<T, GreetingError> {
    doc.create_element(tag)?
        .dyn_into::<T>()
        .map_err(|_| GreetingError::Dom("unexpected element type"))
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, GreetingError> {
    canvas
        .get_context("2d")?
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
        .ok_or(GreetingError::Dom("2d context unavailable"))
}

/// Attach a listener that lives as long as its element.
fn listen(
    target: &HtmlElement,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), GreetingError> {
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

impl Page {
    /// Replace the card with the current stage's markup and wire its inputs.
    fn render_stage(&mut self) -> Result<(), GreetingError> {
        // Drop the previous view first: this cancels the letters timers.
        self.view = StageView::Static;
        let stage = self.session.stage();
        match stage {
            Stage::Welcome => {
                self.card.set_inner_html(&cards::welcome_html());
                self.fill_name("ll-name", self.session.recipient())?;
                let open = cards::element(&self.document, "ll-open")?;
                listen(&open, "click", |_| {
                    with_page(|p| {
                        if p.session.start() {
                            report("open message", p.render_stage());
                        }
                    });
                })?;
            }
            Stage::Letters => {
                self.card.set_inner_html(&cards::letters_html(FIELD_WIDTH, FIELD_HEIGHT));
                let view = self.build_letters_view()?;
                self.view = StageView::Letters(view);
                self.refresh_letters();
            }
            Stage::Question => {
                self.card.set_inner_html(&cards::question_html());
                self.fill_name("ll-name", self.session.recipient())?;
                let view = self.build_question_view()?;
                self.view = StageView::Question(view);
                report("question", self.refresh_question());
            }
            Stage::Celebration => {
                self.card.set_inner_html(&cards::celebration_html());
                let line = format!("I love you, {}!", self.session.recipient());
                self.fill_name("ll-love", &line)?;
            }
        }
        Ok(())
    }

    fn fill_name(&self, id: &str, text: &str) -> Result<(), GreetingError> {
        cards::element(&self.document, id)?.set_text_content(Some(text));
        Ok(())
    }

    fn build_letters_view(&self) -> Result<LettersView, GreetingError> {
        let canvas = cards::canvas(&self.document, "ll-field")?;
        let ctx = context_2d(&canvas)?;

        let click_canvas = canvas.clone();
        listen(&canvas, "click", move |evt| {
            let Some(mouse) = evt.dyn_ref::<MouseEvent>() else {
                return;
            };
            // offset_* is in CSS px; the canvas may be scaled to fit the card.
            let scale_x = click_canvas.width() as f64 / click_canvas.client_width().max(1) as f64;
            let scale_y = click_canvas.height() as f64 / click_canvas.client_height().max(1) as f64;
            let px = mouse.offset_x() as f64 * scale_x;
            let py = mouse.offset_y() as f64 * scale_y;
            with_page(|p| report("letter click", p.on_field_click(px, py)));
        })?;

        let spawner = Interval::start(&self.window, "spawner", SPAWN_INTERVAL_MS, || {
            with_page(|p| p.session.spawn_letter(&mut p.rng));
        })?;
        let mover = Interval::start(&self.window, "mover", MOVE_INTERVAL_MS, || {
            with_page(|p| p.session.advance_letters());
        })?;

        Ok(LettersView {
            canvas,
            ctx,
            progress: cards::element(&self.document, "ll-progress")?,
            prompt: cards::element(&self.document, "ll-prompt")?,
            _spawner: spawner,
            _mover: mover,
        })
    }

    fn on_field_click(&mut self, px: f64, py: f64) -> Result<(), GreetingError> {
        let Some(field) = self.session.letters() else {
            return Ok(());
        };
        let Some(id) = field.token_at(px, py, FIELD_WIDTH as f64, FIELD_HEIGHT as f64) else {
            return Ok(());
        };
        match self.session.collect(id) {
            CollectOutcome::Ignored => {}
            CollectOutcome::Collected => self.refresh_letters(),
            CollectOutcome::Completed { delay_ms } => {
                self.refresh_letters();
                let timeout = Timeout::start(&self.window, delay_ms, || {
                    with_page(|p| {
                        if p.session.finish_letters() {
                            report("letters complete", p.render_stage());
                        }
                    });
                })?;
                self.completion = Some(timeout);
            }
        }
        Ok(())
    }

    fn refresh_letters(&self) {
        let (StageView::Letters(view), Some(field)) = (&self.view, self.session.letters()) else {
            return;
        };
        view.progress.set_inner_html(&draw::progress_html(field));
        view.prompt.set_text_content(Some(&field.prompt()));
    }

    fn build_question_view(&self) -> Result<QuestionView, GreetingError> {
        let yes = cards::element(&self.document, "ll-yes")?;
        let no = cards::element(&self.document, "ll-no")?;
        let hint = cards::element(&self.document, "ll-hint")?;

        listen(&yes, "click", |_| {
            with_page(|p| {
                if p.session.accept() {
                    report("accept", p.render_stage());
                }
            });
        })?;
        listen(&no, "click", |_| {
            with_page(|p| {
                p.session.decline(&mut p.rng);
                report("decline", p.refresh_question());
            });
        })?;
        for event in ["pointerenter", "touchstart"] {
            listen(&no, event, |_| {
                with_page(|p| {
                    p.session.dodge(&mut p.rng);
                    report("dodge", p.refresh_question());
                });
            })?;
        }
        Ok(QuestionView { yes, no, hint })
    }

    fn refresh_question(&self) -> Result<(), GreetingError> {
        let (StageView::Question(view), Some(button)) = (&self.view, self.session.button()) else {
            return Ok(());
        };
        view.yes
            .style()
            .set_property("transform", &format!("scale({})", button.accept_scale()))?;

        let (dx, dy) = button.offset();
        let no_style = view.no.style();
        no_style.set_property("transform", &format!("translate({dx}px, {dy}px)"))?;
        let transition = if button.animates() { "transform 0.15s ease-out" } else { "none" };
        no_style.set_property("transition", transition)?;
        view.no.set_text_content(Some(button.label()));

        match button.hint() {
            Some(text) => {
                view.hint.set_text_content(Some(text));
                view.hint.style().set_property("display", "block")?;
            }
            None => view.hint.style().set_property("display", "none")?,
        }
        Ok(())
    }

    /// Per-frame drawing; game state only changes in the interval and input handlers.
    fn draw_frame(&mut self, ts: f64) {
        let start = *self.first_frame_ms.get_or_insert(ts);
        let t_secs = (ts - start) / 1000.0;

        let (w, h) = (self.root.client_width().max(1) as u32, self.root.client_height().max(1) as u32);
        if self.hearts.width() != w || self.hearts.height() != h {
            self.hearts.set_width(w);
            self.hearts.set_height(h);
        }
        draw::draw_hearts(&self.hearts_ctx, w as f64, h as f64, t_secs);

        if let (StageView::Letters(view), Some(field)) = (&self.view, self.session.letters()) {
            draw::draw_field(&view.ctx, field, view.canvas.width() as f64, view.canvas.height() as f64);
        }
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// requestAnimationFrame loop. It stops once the page it was started for is
/// unmounted or replaced by a newer mount.
fn start_frame_loop(generation: u32) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        if GENERATION.with(|cur| cur.get()) != generation || with_page(|p| p.draw_frame(ts)).is_none() {
            // Break the Rc cycle so the closure is freed.
            f.borrow_mut().take();
            return;
        }
        if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
            let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let (Some(w), Some(cb)) = (window(), g.borrow().as_ref()) {
        let _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
