//! Tick sources that pace the rocket animation
//!
//! A tick source holds at most one armed tick. The controller arms the next
//! tick only after the current evaluation has finished, so evaluations never
//! overlap and cancelling is a matter of disarming.

use std::time::Duration;

pub trait TickSource {
    /// Arms a single tick `delay` from now, replacing any armed tick
    fn schedule(&mut self, delay: Duration);

    /// Disarms the pending tick, if any
    fn cancel(&mut self);

    /// Consumes the armed tick if it is due
    fn take_due(&mut self) -> bool;

    fn is_armed(&self) -> bool;
}

/// Fast-forward source: an armed tick is due immediately.
///
/// Keeps virtual time and counts `schedule` calls, so tests and headless
/// runs can replay an animation without waiting on a clock.
#[derive(Debug, Default, Clone)]
pub struct ManualTicks {
    armed: Option<Duration>,
    scheduled: usize,
    fired: usize,
    elapsed: Duration,
}

impl ManualTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times a tick has been scheduled
    pub fn scheduled(&self) -> usize {
        self.scheduled
    }

    /// Number of ticks consumed
    pub fn fired(&self) -> usize {
        self.fired
    }

    /// Sum of the delays of every consumed tick
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn pending_delay(&self) -> Option<Duration> {
        self.armed
    }
}

impl TickSource for ManualTicks {
    fn schedule(&mut self, delay: Duration) {
        self.armed = Some(delay);
        self.scheduled += 1;
    }

    fn cancel(&mut self) {
        self.armed = None;
    }

    fn take_due(&mut self) -> bool {
        match self.armed.take() {
            Some(delay) => {
                self.elapsed += delay;
                self.fired += 1;
                true
            }
            None => false,
        }
    }

    fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

/// Deadline source for frame-driven front ends: poll it once per frame.
#[derive(Debug, Default, Clone)]
pub struct WallClockTicks {
    deadline: Option<instant::Instant>,
}

impl WallClockTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time left until the armed tick, zero when overdue
    pub fn time_until_due(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(instant::Instant::now()))
    }
}

impl TickSource for WallClockTicks {
    fn schedule(&mut self, delay: Duration) {
        self.deadline = Some(instant::Instant::now() + delay);
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }

    fn take_due(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if instant::Instant::now() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Source backed by the tokio timer. [`TokioTicks::wait`] parks the task
/// until the armed tick is due.
#[cfg(feature = "tokio-runtime")]
#[derive(Debug, Default, Clone)]
pub struct TokioTicks {
    deadline: Option<tokio::time::Instant>,
}

#[cfg(feature = "tokio-runtime")]
impl TokioTicks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleeps until the armed tick is due. Returns `false` straight away when
    /// nothing is armed.
    pub async fn wait(&self) -> bool {
        match self.deadline {
            Some(deadline) => {
                tokio::time::sleep_until(deadline).await;
                true
            }
            None => false,
        }
    }
}

#[cfg(feature = "tokio-runtime")]
impl TickSource for TokioTicks {
    fn schedule(&mut self, delay: Duration) {
        self.deadline = Some(tokio::time::Instant::now() + delay);
    }

    fn cancel(&mut self) {
        self.deadline = None;
    }

    fn take_due(&mut self) -> bool {
        match self.deadline {
            Some(deadline) if tokio::time::Instant::now() >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}
