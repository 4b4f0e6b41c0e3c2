// ── Dashboard stat tiles ──
//
// Counts, progress-bar percentages, and the eased counter animation the
// dashboard tiles play when fresh numbers arrive. Rendering and tick
// scheduling are external; only the math and state live here.

use crate::model::Client;

/// Default step count for one counter run (~2s at 30ms per step).
pub const COUNTER_STEPS: u32 = 60;

/// Minimum denominator for the total-clients bar, so small datasets still
/// show a visible fill.
const TOTAL_BAR_MIN_SCALE: usize = 10;

/// Client counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

impl DashboardStats {
    pub fn from_clients(clients: &[Client]) -> Self {
        let total = clients.len();
        let active = clients.iter().filter(|c| c.status.is_active()).count();
        Self {
            total,
            active,
            inactive: total - active,
        }
    }
}

/// Progress-bar percentages (0..=100) for the three stat tiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatProgress {
    pub total_pct: f64,
    pub active_pct: f64,
    pub inactive_pct: f64,
}

impl StatProgress {
    #[allow(clippy::cast_precision_loss)]
    pub fn from_stats(stats: DashboardStats) -> Self {
        let total_max = stats.total.max(TOTAL_BAR_MIN_SCALE) as f64;
        let total = stats.total as f64;

        Self {
            total_pct: (total / total_max * 100.0).min(100.0),
            active_pct: if stats.total > 0 {
                stats.active as f64 / total * 100.0
            } else {
                0.0
            },
            inactive_pct: if stats.total > 0 {
                stats.inactive as f64 / total * 100.0
            } else {
                0.0
            },
        }
    }
}

/// Cubic ease-out over `t ∈ [0, 1]`.
pub fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}

/// Eased intermediate values for one dashboard counter.
///
/// Advance once per render tick; `value()` floors the eased fraction of
/// the target so the final step lands exactly on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterAnimation {
    target: u64,
    steps: u32,
    step: u32,
}

impl CounterAnimation {
    pub fn new(target: u64) -> Self {
        Self::with_steps(target, COUNTER_STEPS)
    }

    pub fn with_steps(target: u64, steps: u32) -> Self {
        Self {
            target,
            steps: steps.max(1),
            step: 0,
        }
    }

    pub fn is_done(self) -> bool {
        self.step >= self.steps
    }

    /// Move one tick forward. No-op once finished.
    pub fn advance(&mut self) {
        if !self.is_done() {
            self.step += 1;
        }
    }

    /// The value to display at the current step.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn value(self) -> u64 {
        let progress = ease_out_cubic(f64::from(self.step) / f64::from(self.steps));
        (self.target as f64 * progress).floor() as u64
    }

    pub fn target(self) -> u64 {
        self.target
    }
}
