//! View state management for CUI player
//!
//! Tracks what the terminal last showed so each turn only prints what
//! changed, and owns the timed item alert.

use crate::types::{Item, Notice, Output, SessionState};
use std::time::{Duration, Instant};

/// Clear the terminal screen (cross-platform)
pub fn clear_screen() {
    print!("\x1b[2J\x1b[H");

    // Fallback: print newlines
    if std::io::Write::flush(&mut std::io::stdout()).is_err() {
        for _ in 0..50 {
            println!();
        }
    }
}

/// Item alert shown after an acquisition until it expires
#[derive(Debug, Clone, PartialEq)]
pub struct ItemAlert {
    pub item: Item,
    pub shown_at: Instant,
    pub duration: Duration,
}

impl ItemAlert {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= self.duration
    }
}

/// Represents the current visual state of the CUI player
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Stage last rendered
    pub stage: u32,
    /// Chaos and risk last rendered
    pub meters: Option<(u8, u8)>,
    pub alert: Option<ItemAlert>,
    alert_duration: Duration,
}

impl ViewState {
    pub fn new(alert_duration: Duration) -> Self {
        Self {
            stage: 0,
            meters: None,
            alert: None,
            alert_duration,
        }
    }

    /// Fold one step's output into the view and return the rendering delta
    pub fn apply(&mut self, state: &SessionState, output: &Output, now: Instant) -> RenderDelta {
        let mut delta = RenderDelta::new();

        if state.stage != self.stage {
            delta.stage_changed = state.stage > 0;
            self.stage = state.stage;
        }

        let meters = (state.chaos.value(), state.risk.value());
        if let Some((chaos, risk)) = self.meters.filter(|previous| *previous != meters) {
            delta.effects_added.push(format!(
                "Chaos {} -> {}, Risk {} -> {}",
                chaos, meters.0, risk, meters.1
            ));
        }
        self.meters = Some(meters);

        for notice in &output.notices {
            match notice {
                Notice::ItemAcquired { item } => {
                    delta
                        .effects_added
                        .push(format!("Acquired {} {}", item.icon, item.name));
                    self.alert = Some(ItemAlert {
                        item: item.clone(),
                        shown_at: now,
                        duration: self.alert_duration,
                    });
                }
                Notice::DialogueOpened { ally } => {
                    delta.effects_added.push(format!("Encounter: {}", ally));
                }
                Notice::DialogueClosed => {
                    delta.effects_added.push("Dialogue closed".to_string());
                }
                Notice::StageAdvanced { .. } | Notice::GameOver { .. } => {}
            }
        }

        delta
    }

    /// The alert if it is still live; drops it once expired
    pub fn active_alert(&mut self, now: Instant) -> Option<&ItemAlert> {
        if self.alert.as_ref().is_some_and(|alert| alert.is_expired(now)) {
            self.alert = None;
        }
        self.alert.as_ref()
    }

    /// Forget everything, as after a restart
    pub fn reset(&mut self) {
        *self = Self::new(self.alert_duration);
    }
}

/// Represents what needs to be rendered (the delta from previous state)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RenderDelta {
    /// Whether a new stage began
    pub stage_changed: bool,
    /// Effects that were added (human-readable strings)
    pub effects_added: Vec<String>,
}

impl RenderDelta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        !self.stage_changed && self.effects_added.is_empty()
    }
}

/// Render a delta to the console
pub fn render_delta(delta: &RenderDelta) {
    if !delta.effects_added.is_empty() {
        println!("[Effects]");
        for effect in &delta.effects_added {
            println!("  {}", effect);
        }
        println!();
    }
}
