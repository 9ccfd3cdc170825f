use crate::types::{MAX_CLOCK_PERIOD_MS, MIN_CLOCK_PERIOD_MS};

/// Knobs for the external auto-clock timer. The engine never schedules ticks
/// itself; a host timer reads these and calls `toggle_clock` at the period
/// while `auto_run` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockControl {
    auto_run: bool,
    period_ms: u32,
}

impl ClockControl {
    pub const DEFAULT_PERIOD_MS: u32 = 1000;

    pub fn new() -> ClockControl {
        ClockControl {
            auto_run: false,
            period_ms: Self::DEFAULT_PERIOD_MS,
        }
    }

    pub fn auto_run(&self) -> bool {
        self.auto_run
    }

    pub fn toggle_auto_run(&mut self) -> bool {
        self.auto_run = !self.auto_run;
        self.auto_run
    }

    pub fn stop(&mut self) {
        self.auto_run = false;
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    pub fn set_period_ms(&mut self, ms: u32) {
        self.period_ms = ms.clamp(MIN_CLOCK_PERIOD_MS, MAX_CLOCK_PERIOD_MS);
    }
}

impl Default for ClockControl {
    fn default() -> ClockControl {
        ClockControl::new()
    }
}
