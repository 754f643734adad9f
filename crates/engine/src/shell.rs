//! The app shell: owns every app, routes callbacks, and moves focus.
//!
//! Apps never switch focus themselves. `change_app` and `back_to_menu` only
//! record a request on [`Services`]; [`Badge`] applies it once the callback
//! that made it has returned, so no app is re-entered mid-callback.

use std::fmt::Write as _;

use arrayvec::ArrayString;

use crate::adapter::Link;
use crate::app::App;
use crate::config::BadgeConfig;
use crate::controller::TetrisApp;
use crate::core::{SimpleRng, Simulation, TetrisGame};
use crate::error::SchedulerError;
use crate::ledger::MemoryScoreLedger;
use crate::platform::{
    Clock, Display, PeriodicTask, RandomSource, ScoreLedger, Scheduler, Shell, TaskId, Transport,
};
use crate::sched::CoopScheduler;
use crate::types::{AppId, Button, DisplayBuf, GameScoreType, RecvId, SessionMode, Tick, RECV_ID_COUNT};

pub const MENU_SINGLE_TEXT: &str = "Tetris 1P";
pub const MENU_MULTI_TEXT: &str = "Tetris 2P";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FocusRequest {
    Change(AppId),
    BackToMenu { from: AppId },
}

/// Badge services handed to every app callback.
pub struct Services<L, D, C> {
    clock: C,
    display: D,
    link: L,
    scheduler: CoopScheduler,
    scores: MemoryScoreLedger,
    rng: SimpleRng,
    handlers: [Option<AppId>; RECV_ID_COUNT],
    focus_request: Option<FocusRequest>,
    show_score: u32,
}

impl<L, D, C> Services<L, D, C> {
    pub fn new(clock: C, display: D, link: L, seed: u32) -> Self {
        Self {
            clock,
            display,
            link,
            scheduler: CoopScheduler::new(),
            scores: MemoryScoreLedger::new(),
            rng: SimpleRng::new(seed),
            handlers: [None; RECV_ID_COUNT],
            focus_request: None,
            show_score: 0,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn scheduler(&self) -> &CoopScheduler {
        &self.scheduler
    }

    pub fn scores(&self) -> &MemoryScoreLedger {
        &self.scores
    }

    /// Replace the ledger, e.g. with one loaded from disk.
    pub fn set_scores(&mut self, scores: MemoryScoreLedger) {
        self.scores = scores;
    }

    pub fn handler(&self, dest: RecvId) -> Option<AppId> {
        dest.slot().and_then(|slot| self.handlers[slot])
    }

    /// Score the score app will show on its next entry.
    pub fn shown_score(&self) -> u32 {
        self.show_score
    }
}

impl<L, D, C: Clock> Clock for Services<L, D, C> {
    fn now(&self) -> Tick {
        self.clock.now()
    }
}

impl<L, D, C> RandomSource for Services<L, D, C> {
    fn next_random(&mut self) -> u32 {
        self.rng.next_u32()
    }
}

impl<L, D, C> Scheduler for Services<L, D, C> {
    fn queue(&mut self, task: PeriodicTask) -> Result<TaskId, SchedulerError> {
        self.scheduler.queue(task)
    }

    fn enable_periodic(&mut self, task: TaskId) {
        self.scheduler.enable_periodic(task);
    }

    fn disable_periodic(&mut self, task: TaskId) {
        self.scheduler.disable_periodic(task);
    }
}

impl<L, D: Display, C> Display for Services<L, D, C> {
    fn set_mode_scroll_text(&mut self, text: &str) {
        self.display.set_mode_scroll_text(text);
    }

    fn set_mode_fixed_packed(&mut self, buf: &DisplayBuf) {
        self.display.set_mode_fixed_packed(buf);
    }
}

impl<L: Link, D, C> Transport for Services<L, D, C> {
    fn queue_data_for_tx(&mut self, data: &[u8], dest: RecvId) {
        self.link.send(dest, data);
    }

    fn set_on_packet_arrive(&mut self, dest: RecvId, app: AppId) {
        let Some(slot) = dest.slot() else {
            tracing::warn!(dest = dest.0, "packet handler for unknown endpoint ignored");
            return;
        };
        if let Some(previous) = self.handlers[slot].replace(app) {
            if previous != app {
                tracing::warn!(
                    dest = dest.0,
                    previous = previous.as_str(),
                    app = app.as_str(),
                    "packet handler replaced"
                );
            }
        }
    }

    fn clear_on_packet_arrive(&mut self, dest: RecvId) {
        if let Some(slot) = dest.slot() {
            self.handlers[slot] = None;
        }
    }

    fn send_partial_data(&mut self, budget: usize) {
        self.link.flush(budget);
    }
}

impl<L, D, C> Shell for Services<L, D, C> {
    fn change_app(&mut self, target: AppId) {
        self.focus_request = Some(FocusRequest::Change(target));
    }

    fn back_to_menu(&mut self, current: AppId) {
        self.focus_request = Some(FocusRequest::BackToMenu { from: current });
    }

    fn set_show_score(&mut self, score: u32) {
        self.show_score = score;
    }
}

impl<L, D, C> ScoreLedger for Services<L, D, C> {
    fn mark_score(&mut self, game: GameScoreType, score: u32) {
        self.scores.mark_score(game, score);
    }
}

/// Top-level menu: pick single or multiplayer, OK enters Tetris.
#[derive(Debug, Default)]
pub struct MenuApp {
    selected: SessionMode,
}

impl MenuApp {
    pub fn selected(&self) -> SessionMode {
        self.selected
    }

    pub fn select(&mut self, mode: SessionMode) {
        self.selected = mode;
    }

    fn label(&self) -> &'static str {
        match self.selected {
            SessionMode::Singleplayer => MENU_SINGLE_TEXT,
            SessionMode::Multiplayer => MENU_MULTI_TEXT,
        }
    }
}

impl<P: Display + Shell + ?Sized> App<P> for MenuApp {
    fn id(&self) -> AppId {
        AppId::Menu
    }

    fn on_entry(&mut self, p: &mut P) {
        p.set_mode_scroll_text(self.label());
    }

    fn on_exit(&mut self, _p: &mut P) {}

    fn on_button(&mut self, p: &mut P, button: Button) {
        match button {
            Button::Left | Button::Right | Button::Up | Button::Down => {
                self.selected = match self.selected {
                    SessionMode::Singleplayer => SessionMode::Multiplayer,
                    SessionMode::Multiplayer => SessionMode::Singleplayer,
                };
                p.set_mode_scroll_text(self.label());
            }
            Button::Ok => p.change_app(AppId::Tetris),
            _ => {}
        }
    }
}

/// Shows the last game's score until any button is pressed.
#[derive(Debug, Default)]
pub struct ShowScoreApp;

impl<L, D: Display, C> App<Services<L, D, C>> for ShowScoreApp {
    fn id(&self) -> AppId {
        AppId::ShowScore
    }

    fn on_entry(&mut self, p: &mut Services<L, D, C>) {
        let mut text = ArrayString::<24>::new();
        // "Score " plus at most ten digits always fits.
        let _ = write!(text, "Score {}", p.shown_score());
        p.set_mode_scroll_text(&text);
    }

    fn on_exit(&mut self, _p: &mut Services<L, D, C>) {}

    fn on_button(&mut self, p: &mut Services<L, D, C>, _button: Button) {
        p.back_to_menu(AppId::ShowScore);
    }
}

/// One emulated badge: services, apps, and the current focus.
pub struct Badge<L, D, C, S: Simulation = TetrisGame> {
    services: Services<L, D, C>,
    menu: MenuApp,
    tetris: TetrisApp<S>,
    show_score: ShowScoreApp,
    focus: AppId,
}

impl<L, D, C, S> Badge<L, D, C, S>
where
    L: Link,
    D: Display,
    C: Clock,
    S: Simulation,
{
    /// Build the badge and give the menu focus.
    pub fn new(config: &BadgeConfig, clock: C, display: D, link: L) -> Result<Self, SchedulerError> {
        let mut services = Services::new(clock, display, link, config.seed);
        let tetris = TetrisApp::new(&mut services, config.curve, config.tick_interval)?;
        let mut badge = Self {
            services,
            menu: MenuApp::default(),
            tetris,
            show_score: ShowScoreApp,
            focus: AppId::Menu,
        };
        badge.dispatch(AppId::Menu, |app, p| app.on_entry(p));
        badge.apply_focus_requests();
        Ok(badge)
    }

    pub fn focus(&self) -> AppId {
        self.focus
    }

    pub fn menu(&self) -> &MenuApp {
        &self.menu
    }

    pub fn tetris(&self) -> &TetrisApp<S> {
        &self.tetris
    }

    pub fn services(&self) -> &Services<L, D, C> {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut Services<L, D, C> {
        &mut self.services
    }

    /// Pick the mode in the menu and enter Tetris, as if the user had.
    pub fn launch_tetris(&mut self, mode: SessionMode) {
        self.menu.select(mode);
        self.switch_to(AppId::Tetris);
    }

    /// Deliver a button press to the focused app.
    pub fn press(&mut self, button: Button) {
        tracing::trace!(?button, focus = self.focus.as_str(), "button");
        self.dispatch(self.focus, |app, p| app.on_button(p, button));
        self.apply_focus_requests();
    }

    /// Deliver every received packet to its endpoint's handler.
    pub fn poll_link(&mut self) {
        while let Some(packet) = self.services.link.poll() {
            match self.services.handler(packet.dest) {
                Some(app) => {
                    self.dispatch(app, |a, p| a.on_packet(p, &packet.data));
                    self.apply_focus_requests();
                }
                None => {
                    tracing::debug!(dest = packet.dest.0, "no packet handler, dropped");
                }
            }
        }
    }

    /// Run every periodic task due at the current tick.
    pub fn run_due(&mut self) {
        let now = self.services.clock.now();
        while let Some((_, owner)) = self.services.scheduler.next_due(now) {
            self.dispatch(owner, |app, p| app.on_tick(p));
            self.apply_focus_requests();
        }
    }

    /// One pass of the badge main loop. Whatever is still queued on the link
    /// afterwards goes out in the background.
    pub fn step(&mut self) {
        self.poll_link();
        self.run_due();
        self.services.link.flush(usize::MAX);
    }

    fn dispatch<F>(&mut self, id: AppId, f: F)
    where
        F: FnOnce(&mut dyn App<Services<L, D, C>>, &mut Services<L, D, C>),
    {
        let services = &mut self.services;
        match id {
            AppId::Menu => f(&mut self.menu, services),
            AppId::Tetris => f(&mut self.tetris, services),
            AppId::ShowScore => f(&mut self.show_score, services),
        }
    }

    fn apply_focus_requests(&mut self) {
        while let Some(request) = self.services.focus_request.take() {
            let target = match request {
                FocusRequest::Change(target) => target,
                FocusRequest::BackToMenu { from } if from == self.focus => AppId::Menu,
                FocusRequest::BackToMenu { from } => {
                    tracing::debug!(
                        from = from.as_str(),
                        focus = self.focus.as_str(),
                        "stale back-to-menu ignored"
                    );
                    continue;
                }
            };
            self.switch_to(target);
        }
    }

    fn switch_to(&mut self, target: AppId) {
        if target == self.focus {
            return;
        }
        if target == AppId::Tetris {
            self.tetris.set_mode(self.menu.selected());
        }
        let from = self.focus;
        self.dispatch(from, |app, p| app.on_exit(p));
        self.focus = target;
        tracing::info!(from = from.as_str(), to = target.as_str(), "focus changed");
        self.dispatch(target, |app, p| app.on_entry(p));
    }
}
