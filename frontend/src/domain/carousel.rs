//! News carousel shown on the authenticated landing view.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

/// Time between automatic advances.
pub const CAROUSEL_INTERVAL_SECS: i64 = 5;

/// One carousel slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewsItem {
    /// Headline.
    pub title: &'static str,
    /// Body text.
    pub text: &'static str,
}

/// Fixed landing news.
pub const NEWS: [NewsItem; 3] = [
    NewsItem {
        title: "Campanha de Vacinação 2025",
        text: "Fique atento ao calendário e proteja sua família.",
    },
    NewsItem {
        title: "Novos Medicamentos no Programa",
        text: "Confira a lista atualizada de remédios disponíveis.",
    },
    NewsItem {
        title: "Atendimento Humanizado",
        text: "Nossa prioridade é cuidar de você com agilidade.",
    },
];

#[derive(Debug, Clone, Copy)]
struct Position {
    index: usize,
    anchored_at: DateTime<Utc>,
}

/// Rotating slide selector.
///
/// The slide advances once per interval since the last anchor. Manual moves
/// re-anchor, which restarts the interval.
pub struct LandingCarousel {
    clock: Arc<dyn Clock>,
    interval: TimeDelta,
    position: Mutex<Position>,
}

impl LandingCarousel {
    /// Start on the first slide.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        let anchored_at = clock.utc();
        Self {
            clock,
            interval: TimeDelta::seconds(CAROUSEL_INTERVAL_SECS),
            position: Mutex::new(Position {
                index: 0,
                anchored_at,
            }),
        }
    }

    /// Index of the slide currently shown.
    pub fn current_index(&self) -> usize {
        let now = self.clock.utc();
        let mut position = self.lock();
        *position = self.settle(*position, now);
        position.index
    }

    /// Slide currently shown.
    pub fn current(&self) -> NewsItem {
        NEWS[self.current_index() % NEWS.len()]
    }

    /// Move forward one slide, wrapping to the first.
    pub fn next(&self) -> usize {
        self.step(|index| (index + 1) % NEWS.len())
    }

    /// Move back one slide, wrapping to the last.
    pub fn previous(&self) -> usize {
        self.step(|index| index.checked_sub(1).unwrap_or(NEWS.len() - 1))
    }

    fn step(&self, advance: impl FnOnce(usize) -> usize) -> usize {
        let now = self.clock.utc();
        let mut position = self.lock();
        let settled = self.settle(*position, now);
        *position = Position {
            index: advance(settled.index),
            anchored_at: now,
        };
        position.index
    }

    fn settle(&self, position: Position, now: DateTime<Utc>) -> Position {
        let elapsed = now.signed_duration_since(position.anchored_at);
        let interval_ms = self.interval.num_milliseconds().max(1);
        let ticks = elapsed.num_milliseconds().max(0) / interval_ms;
        if ticks == 0 {
            return position;
        }
        let len = NEWS.len() as i64;
        let index = (position.index as i64 + ticks % len) % len;
        Position {
            index: usize::try_from(index).unwrap_or(0),
            anchored_at: position.anchored_at + TimeDelta::milliseconds(ticks * interval_ms),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Position> {
        self.position.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
