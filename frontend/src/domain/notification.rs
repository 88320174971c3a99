//! Transient notification channel.
//!
//! A single slot holds the most recently published message. It stays visible
//! for the display window, fades out, then clears. Publishing replaces the
//! current message and restarts both timers; messages are never queued.
//!
//! Timers are deadlines evaluated against an injected [`Clock`], so reading
//! the channel is all it takes to observe expiry.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde_json::Value;
use tracing::debug;

/// Default time a message stays fully visible.
pub const DEFAULT_DISPLAY_MS: u64 = 5_000;
/// Default fade-out time before the slot clears.
pub const DEFAULT_FADE_MS: u64 = 300;

/// Message severity, which decides how a renderer styles it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Something failed.
    Error,
    /// Something the user must fix before retrying.
    Warning,
    /// The action went through.
    Success,
}

impl Severity {
    /// Wire label used by page payloads and the backend (`tipo`).
    pub const fn label(self) -> &'static str {
        match self {
            Self::Error => "ERRO",
            Self::Warning => "AVISO",
            Self::Success => "SUCESSO",
        }
    }

    /// Parse a wire label.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "ERRO" => Some(Self::Error),
            "AVISO" => Some(Self::Warning),
            "SUCESSO" => Some(Self::Success),
            _ => None,
        }
    }
}

/// Message shown by the shell: a severity and ordered lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    severity: Severity,
    lines: Vec<String>,
}

impl NotificationMessage {
    /// Build a message from its parts.
    pub fn new(severity: Severity, lines: Vec<String>) -> Self {
        Self { severity, lines }
    }

    /// Single-line success message.
    pub fn success(line: impl Into<String>) -> Self {
        Self::new(Severity::Success, vec![line.into()])
    }

    /// Single-line warning message.
    pub fn warning(line: impl Into<String>) -> Self {
        Self::new(Severity::Warning, vec![line.into()])
    }

    /// Single-line error message.
    pub fn error(line: impl Into<String>) -> Self {
        Self::new(Severity::Error, vec![line.into()])
    }

    /// Parse an untyped `{ "tipo": ..., "mensagem": [...] }` payload.
    ///
    /// Returns `None` unless `mensagem` is an array made only of strings and
    /// `tipo` is a known severity label.
    pub fn from_json(value: &Value) -> Option<Self> {
        let severity = value
            .get("tipo")
            .and_then(Value::as_str)
            .and_then(Severity::from_label)?;
        let lines = value
            .get("mensagem")?
            .as_array()?
            .iter()
            .map(|line| line.as_str().map(str::to_owned))
            .collect::<Option<Vec<_>>>()?;
        Some(Self::new(severity, lines))
    }

    /// Message severity.
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// Lines in display order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Display phase of the live message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationPhase {
    /// Inside the display window.
    Visible,
    /// Hidden and fading; cleared once the fade window elapses.
    FadingOut,
}

/// Snapshot of the slot for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    /// The live message.
    pub message: NotificationMessage,
    /// Where it is in its lifecycle.
    pub phase: NotificationPhase,
}

/// Display and fade windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationTiming {
    display: TimeDelta,
    fade: TimeDelta,
}

impl NotificationTiming {
    /// Build timing from millisecond values.
    pub fn from_millis(display_ms: u64, fade_ms: u64) -> Self {
        Self {
            display: millis(display_ms),
            fade: millis(fade_ms),
        }
    }

    /// Time a message stays fully visible.
    pub const fn display(&self) -> TimeDelta {
        self.display
    }

    /// Fade-out time after the display window.
    pub const fn fade(&self) -> TimeDelta {
        self.fade
    }
}

impl Default for NotificationTiming {
    fn default() -> Self {
        Self::from_millis(DEFAULT_DISPLAY_MS, DEFAULT_FADE_MS)
    }
}

fn millis(value: u64) -> TimeDelta {
    i64::try_from(value)
        .ok()
        .and_then(TimeDelta::try_milliseconds)
        .unwrap_or(TimeDelta::MAX)
}

#[derive(Debug, Clone)]
struct Slot {
    message: NotificationMessage,
    published_at: DateTime<Utc>,
}

/// Single-slot, last-write-wins message surface.
pub struct NotificationChannel {
    clock: Arc<dyn Clock>,
    timing: NotificationTiming,
    slot: Mutex<Option<Slot>>,
}

impl NotificationChannel {
    /// Create an empty channel.
    pub fn new(clock: Arc<dyn Clock>, timing: NotificationTiming) -> Self {
        Self {
            clock,
            timing,
            slot: Mutex::new(None),
        }
    }

    /// Replace any live message and restart the display timer.
    pub fn publish(&self, message: NotificationMessage) {
        let published_at = self.clock.utc();
        debug!(
            severity = message.severity().label(),
            lines = message.lines().len(),
            "notification published"
        );
        *self.lock() = Some(Slot {
            message,
            published_at,
        });
    }

    /// Publish an untyped payload; malformed payloads are ignored.
    ///
    /// Returns whether the payload was accepted.
    pub fn publish_json(&self, payload: &Value) -> bool {
        match NotificationMessage::from_json(payload) {
            Some(message) => {
                self.publish(message);
                true
            }
            None => {
                debug!("notification payload rejected");
                false
            }
        }
    }

    /// Current message, if any, with expired messages swept out.
    pub fn current(&self) -> Option<NotificationView> {
        let now = self.clock.utc();
        let mut slot = self.lock();
        let phase = match slot.as_ref() {
            Some(live) => self.phase_at(live.published_at, now),
            None => return None,
        };
        match phase {
            Some(phase) => slot.as_ref().map(|live| NotificationView {
                message: live.message.clone(),
                phase,
            }),
            None => {
                *slot = None;
                None
            }
        }
    }

    /// Whether nothing is live.
    pub fn is_empty(&self) -> bool {
        self.current().is_none()
    }

    fn phase_at(
        &self,
        published_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Option<NotificationPhase> {
        let elapsed = now.signed_duration_since(published_at);
        let cleared_after = self
            .timing
            .display()
            .checked_add(&self.timing.fade())
            .unwrap_or(TimeDelta::MAX);
        if elapsed < self.timing.display() {
            Some(NotificationPhase::Visible)
        } else if elapsed < cleared_after {
            Some(NotificationPhase::FadingOut)
        } else {
            None
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<Slot>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
