//! Fixed-window request budget for outbound completion calls.
//!
//! Counts calls in the current window and refuses once the limit is hit;
//! the count resets when the window expires.

use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Fixed-window counter shared by every draft request of a process.
#[derive(Debug)]
pub struct RequestBudget {
    limit: u32,
    window: Duration,
    state: Mutex<WindowState>,
}

#[derive(Debug)]
struct WindowState {
    count: u32,
    window_start: Instant,
}

/// Outcome of asking for one more call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetDecision {
    Allowed { remaining: u32 },
    Denied { retry_after: Duration },
}

impl RequestBudget {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            state: Mutex::new(WindowState {
                count: 0,
                window_start: Instant::now(),
            }),
        }
    }

    /// Budget of `limit` calls per minute.
    pub fn per_minute(limit: u32) -> Self {
        Self::new(limit, Duration::from_secs(60))
    }

    /// Takes one call from the budget if any is left.
    pub async fn try_acquire(&self) -> BudgetDecision {
        let mut state = self.state.lock().await;
        let now = Instant::now();

        let elapsed = now.duration_since(state.window_start);
        if elapsed >= self.window {
            state.count = 0;
            state.window_start = now;
        }

        if state.count >= self.limit {
            let retry_after = self.window.saturating_sub(now.duration_since(state.window_start));
            return BudgetDecision::Denied { retry_after };
        }

        state.count += 1;
        BudgetDecision::Allowed {
            remaining: self.limit - state.count,
        }
    }
}
