use crate::{CPU_FREQUENCY, TIMER_FREQUENCY};

const CPU_TICK_SECS: f64 = 1.0 / CPU_FREQUENCY;
const TIMER_TICK_SECS: f64 = 1.0 / TIMER_FREQUENCY;

#[derive(Debug, Default)]
pub struct Timer {
    pub count: u8,
}

impl Timer {
    pub fn new(init_count: u8) -> Self {
        Self { count: init_count }
    }

    pub fn set(&mut self, value: u8) {
        self.count = value;
    }

    pub fn is_active(&self) -> bool {
        self.count > 0
    }

    // stops at zero, never reloads
    pub fn decrement(&mut self) {
        self.count = self.count.saturating_sub(1);
    }
}

/// Simulated time since the last 60 Hz timer step, fed one instruction
/// slice per executed instruction.
#[derive(Debug, Default)]
pub struct TimerClock {
    time_acc: f64,
}

impl TimerClock {
    pub fn new() -> Self {
        Self { time_acc: 0.0 }
    }

    /// Accounts for one executed instruction. Returns true when the timers
    /// are due a step.
    pub fn sync(&mut self) -> bool {
        self.time_acc += CPU_TICK_SECS;
        if self.time_acc >= TIMER_TICK_SECS {
            self.time_acc = 0.0;
            true
        } else {
            false
        }
    }

    pub fn elapsed(&self) -> f64 {
        self.time_acc
    }

    pub fn reset(&mut self) {
        self.time_acc = 0.0;
    }
}
