//! Running score.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::common::config::ScoreConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScoreKind {
    Asteroid,
    MiniAsteroid,
    Enemy,
}

impl ScoreKind {
    #[inline]
    pub fn value(self, cfg: &ScoreConfig) -> u32 {
        match self {
            ScoreKind::Asteroid => cfg.asteroid,
            ScoreKind::MiniAsteroid => cfg.mini_asteroid,
            ScoreKind::Enemy => cfg.enemy,
        }
    }
}

/// Score total shared between the session and its `PlayerScored` handler.
///
/// Cloning shares the same counter.
#[derive(Clone, Debug)]
pub struct ScoreCounter {
    total: Arc<AtomicU32>,
    values: ScoreConfig,
}

impl ScoreCounter {
    pub fn new(values: ScoreConfig) -> Self {
        Self {
            total: Arc::new(AtomicU32::new(0)),
            values,
        }
    }

    pub fn add(&self, kind: ScoreKind) {
        let delta = kind.value(&self.values);
        // Saturate rather than wrap on absurd configs.
        let _ = self
            .total
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |t| {
                Some(t.saturating_add(delta))
            });
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.total.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.total.store(0, Ordering::Relaxed);
    }
}
