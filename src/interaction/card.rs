//! Revealable service card: hover on desktop, tap or long-press on mobile.
//!
//! ```text
//!                 pointer_enter                    pointer_leave
//!   Desktop:  Idle ──────────────▶ RevealedByHover ──────────────▶ Idle
//!
//!                 touch_start           long-press timer fires
//!   Mobile:   Idle ──────────▶ (press) ─────────────────────▶ RevealedByLongPress
//!                                 │                                  │
//!                       touch_end │ before timer,          auto-revert timer,
//!                       no move   ▼                        outside press,
//!                     RevealedByIntentToNavigate           link activation
//!                       (+ Navigate effect)                          ▼
//!                                                                  Idle
//! ```
//!
//! Every input carries the caller's clock reading. Before handling an input
//! the card fires whichever timers are due, so a touch end that arrives after
//! the long-press deadline sees the card already revealed even if nobody
//! ticked it in between.
//!
//! While revealed, the card holds an outside-press listener registration.
//! Any path back to `Idle` (and dropping the card) releases it.

use serde::{Deserialize, Serialize};

use super::listeners::{ListenerGuard, ListenerKind, ListenerRegistry};
use super::timer::{Millis, TimerSlot};

pub const DEFAULT_LONG_PRESS_MS: Millis = 450;
pub const DEFAULT_REVEAL_MS: Millis = 2500;
pub const DEFAULT_MOVE_TOLERANCE: f64 = 10.0;

/// Viewport width (CSS px) below which cards use the touch interaction.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    Idle,
    RevealedByHover,
    RevealedByLongPress,
    RevealedByIntentToNavigate,
}

impl CardState {
    pub fn is_revealed(self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Value of the card's `data-state` attribute in the rendered page.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::RevealedByHover => "hover",
            Self::RevealedByLongPress => "long-press",
            Self::RevealedByIntentToNavigate => "intent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Desktop,
    Mobile,
}

impl Layout {
    pub fn from_viewport_width(width: f64) -> Self {
        if width < MOBILE_BREAKPOINT {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }
}

/// What the host should do with the input that produced this effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardEffect {
    /// Let the link activation proceed to this target.
    ///
    /// The card stays in `RevealedByIntentToNavigate` (and keeps its
    /// outside-press registration) until the host follows the link and calls
    /// [`RevealableCard::activate_link`], which returns it to `Idle`. If the
    /// navigation never happens, an outside press or a layout change also
    /// closes it.
    Navigate(String),
    /// Swallow the click that follows the touch (it ended a long press).
    SuppressDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardTimings {
    /// Hold duration that turns a press into a long press.
    pub long_press_ms: Millis,
    /// How long a long-press reveal stays up without further input.
    pub reveal_ms: Millis,
    /// Finger travel (px) after which the press is treated as a scroll.
    pub move_tolerance: f64,
}

impl Default for CardTimings {
    fn default() -> Self {
        Self {
            long_press_ms: DEFAULT_LONG_PRESS_MS,
            reveal_ms: DEFAULT_REVEAL_MS,
            move_tolerance: DEFAULT_MOVE_TOLERANCE,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Press {
    x: f64,
    y: f64,
    moved: bool,
    long_pressed: bool,
}

#[derive(Debug)]
pub struct RevealableCard {
    target: String,
    layout: Layout,
    timings: CardTimings,
    state: CardState,
    press: Option<Press>,
    long_press: TimerSlot,
    auto_revert: TimerSlot,
    listeners: ListenerRegistry,
    outside_listener: Option<ListenerGuard>,
}

impl RevealableCard {
    pub fn new(
        target: impl Into<String>,
        layout: Layout,
        timings: CardTimings,
        listeners: ListenerRegistry,
    ) -> Self {
        Self {
            target: target.into(),
            layout,
            timings,
            state: CardState::Idle,
            press: None,
            long_press: TimerSlot::new(),
            auto_revert: TimerSlot::new(),
            listeners,
            outside_listener: None,
        }
    }

    pub fn state(&self) -> CardState {
        self.state
    }

    pub fn is_revealed(&self) -> bool {
        self.state.is_revealed()
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// Earliest pending timer deadline, for hosts that schedule wake-ups.
    pub fn next_deadline(&self) -> Option<Millis> {
        match (self.long_press.deadline(), self.auto_revert.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fire due timers without any other input.
    pub fn tick(&mut self, now: Millis) {
        if let Some(fired_at) = self.long_press.take_due(now) {
            self.on_long_press(fired_at);
        }
        if self.auto_revert.take_due(now).is_some() {
            tracing::debug!(card = %self.target, "card: auto-revert");
            self.reset();
        }
    }

    pub fn pointer_enter(&mut self, now: Millis) {
        self.tick(now);
        if self.layout == Layout::Desktop {
            self.enter(CardState::RevealedByHover);
        }
    }

    pub fn pointer_leave(&mut self, now: Millis) {
        self.tick(now);
        if self.layout == Layout::Desktop && self.state == CardState::RevealedByHover {
            self.reset();
        }
    }

    pub fn touch_start(&mut self, now: Millis, x: f64, y: f64) {
        self.tick(now);
        if self.layout != Layout::Mobile {
            return;
        }
        self.press = Some(Press {
            x,
            y,
            moved: false,
            long_pressed: false,
        });
        self.long_press.schedule(now, self.timings.long_press_ms);
    }

    pub fn touch_move(&mut self, now: Millis, x: f64, y: f64) {
        self.tick(now);
        let tolerance = self.timings.move_tolerance;
        let Some(press) = self.press.as_mut() else {
            return;
        };
        if press.moved || press.long_pressed {
            return;
        }
        let travel = (x - press.x).hypot(y - press.y);
        if travel > tolerance {
            press.moved = true;
            self.long_press.cancel();
            tracing::debug!(card = %self.target, travel, "card: press became a scroll");
        }
    }

    /// Finish the press. A short, still press asks to navigate; a press that
    /// became a long press asks the host to swallow the trailing click.
    pub fn touch_end(&mut self, now: Millis) -> Option<CardEffect> {
        self.tick(now);
        let press = self.press.take()?;
        self.long_press.cancel();
        if press.moved {
            return None;
        }
        if press.long_pressed {
            return Some(CardEffect::SuppressDefault);
        }
        self.auto_revert.cancel();
        self.enter(CardState::RevealedByIntentToNavigate);
        tracing::debug!(card = %self.target, "card: tap, navigating");
        Some(CardEffect::Navigate(self.target.clone()))
    }

    /// The host saw a touch cancel (e.g. the browser took over for scrolling).
    pub fn touch_cancel(&mut self, now: Millis) {
        self.tick(now);
        if self.press.take().is_some() {
            self.long_press.cancel();
        }
    }

    /// A press landed outside the card's bounds.
    pub fn outside_press(&mut self, now: Millis) {
        self.tick(now);
        if self.is_revealed() {
            tracing::debug!(card = %self.target, "card: outside press");
            self.reset();
        }
    }

    /// A link inside the card is being followed. Clears every timer so none
    /// can fire against a card whose page is going away.
    pub fn activate_link(&mut self) {
        self.reset();
    }

    /// The viewport crossed the mobile breakpoint.
    pub fn set_layout(&mut self, layout: Layout) {
        if layout != self.layout {
            self.layout = layout;
            self.reset();
        }
    }

    fn on_long_press(&mut self, fired_at: Millis) {
        let Some(press) = self.press.as_mut() else {
            return;
        };
        if press.moved {
            return;
        }
        press.long_pressed = true;
        self.enter(CardState::RevealedByLongPress);
        self.auto_revert.schedule(fired_at, self.timings.reveal_ms);
        tracing::debug!(card = %self.target, fired_at, "card: long press");
    }

    fn enter(&mut self, state: CardState) {
        self.state = state;
        if state.is_revealed() && self.outside_listener.is_none() {
            self.outside_listener = Some(self.listeners.register(ListenerKind::OutsidePress));
        }
    }

    fn reset(&mut self) {
        self.long_press.cancel();
        self.auto_revert.cancel();
        self.press = None;
        self.state = CardState::Idle;
        self.outside_listener = None;
    }
}
