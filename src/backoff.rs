//! Redirect pacing.
//!
//! [`BackoffSchedule`] yields delays starting at `min`, doubling each step and
//! saturating at `max`. [`BackoffNotifier`] runs that schedule on a background
//! task and hands out one "proceed" signal per elapsed delay.
//!
//! ```rust
//! use std::time::Duration;
//! use httpsched::BackoffSchedule;
//!
//! let delays: Vec<_> = BackoffSchedule::new(Duration::from_millis(100), Duration::from_millis(500))
//!     .take(5)
//!     .collect();
//! assert_eq!(
//!     delays,
//!     [100, 200, 400, 500, 500].map(Duration::from_millis).to_vec()
//! );
//! ```

use std::time::Duration;

use tokio::{sync::mpsc, task::JoinHandle};

/// Exponential delay sequence bounded by `[min, max]`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BackoffSchedule {
    next: Duration,
    max: Duration,
}

impl BackoffSchedule {
    /// A `max` below `min` is raised to `min`.
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            next: min,
            max: max.max(min),
        }
    }
}

impl Iterator for BackoffSchedule {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let delay = self.next;
        self.next = delay.saturating_mul(2).min(self.max);
        Some(delay)
    }
}

/// Background timer emitting paced "proceed" signals.
///
/// The timer task is aborted when the notifier is stopped or dropped.
#[derive(Debug)]
pub struct BackoffNotifier {
    signals: mpsc::Receiver<()>,
    task: Option<JoinHandle<()>>,
}

impl BackoffNotifier {
    /// Spawns the timer task. Must be called from within a tokio runtime.
    pub fn start(min: Duration, max: Duration) -> Self {
        let (tx, signals) = mpsc::channel(1);
        let task = tokio::spawn(async move {
            for delay in BackoffSchedule::new(min, max) {
                tokio::time::sleep(delay).await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        Self {
            signals,
            task: Some(task),
        }
    }

    /// Waits for the next signal. Returns immediately once stopped.
    pub async fn notified(&mut self) {
        let _ = self.signals.recv().await;
    }

    /// Cancels the timer task and waits for it to terminate.
    pub async fn stop(&mut self) {
        self.signals.close();
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.as_ref().map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for BackoffNotifier {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::Instant;

    use super::{BackoffNotifier, BackoffSchedule};

    #[test]
    fn schedule_doubles_and_caps() {
        let delays: Vec<_> =
            BackoffSchedule::new(Duration::from_millis(100), Duration::from_secs(13))
                .take(10)
                .collect();
        let expected: Vec<_> = [100, 200, 400, 800, 1_600, 3_200, 6_400, 12_800, 13_000, 13_000]
            .into_iter()
            .map(Duration::from_millis)
            .collect();
        assert_eq!(delays, expected);
    }

    #[test]
    fn schedule_is_non_decreasing_and_bounded() {
        let min = Duration::from_millis(7);
        let max = Duration::from_millis(250);
        let delays: Vec<_> = BackoffSchedule::new(min, max).take(64).collect();
        assert!(delays.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(delays.iter().all(|delay| *delay >= min && *delay <= max));
    }

    #[test]
    fn max_below_min_is_raised() {
        let mut schedule = BackoffSchedule::new(Duration::from_secs(2), Duration::from_secs(1));
        assert_eq!(schedule.next(), Some(Duration::from_secs(2)));
        assert_eq!(schedule.next(), Some(Duration::from_secs(2)));
    }

    #[tokio::test(start_paused = true)]
    async fn notifier_paces_signals_along_schedule() {
        let mut notifier =
            BackoffNotifier::start(Duration::from_millis(100), Duration::from_millis(500));
        let mut last = Instant::now();
        let mut gaps = Vec::new();
        for _ in 0..5 {
            notifier.notified().await;
            let now = Instant::now();
            gaps.push(now - last);
            last = now;
        }
        let expected: Vec<_> = [100, 200, 400, 500, 500]
            .into_iter()
            .map(Duration::from_millis)
            .collect();
        assert_eq!(gaps, expected);
        notifier.stop().await;
    }

    #[tokio::test]
    async fn stop_terminates_timer_task() {
        let mut notifier = BackoffNotifier::start(Duration::from_secs(60), Duration::from_secs(60));
        assert!(!notifier.is_finished());
        notifier.stop().await;
        assert!(notifier.is_finished());
        // A stopped notifier never blocks.
        notifier.notified().await;
    }
}
