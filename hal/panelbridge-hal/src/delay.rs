//! Blocking delay abstractions
//!
//! The display runtime only ever asks for millisecond delays. On target the
//! delay is a calibrated busy-wait; tests substitute a fake clock.

/// Spin iterations per millisecond for a 16 MHz Cortex-M4 running from flash
///
/// Platform-specific: measured on an STM32F4 at its reset clock. Retune
/// through [`BusyWaitDelay::with_calibration`] when the core clock changes.
pub const DEFAULT_LOOPS_PER_MS: u32 = 12_000;

/// Blocking millisecond delay
pub trait DelayMs {
    /// Block the calling context for approximately `ms` milliseconds
    fn delay_ms(&mut self, ms: u32);
}

impl<D: DelayMs + ?Sized> DelayMs for &mut D {
    fn delay_ms(&mut self, ms: u32) {
        D::delay_ms(self, ms)
    }
}

/// Busy-wait delay calibrated in loop iterations per millisecond
///
/// Non-preemptible and non-cancellable: nothing else runs on the calling
/// context while it spins. Accuracy depends entirely on `loops_per_ms`
/// matching the current core clock and flash wait states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BusyWaitDelay {
    loops_per_ms: u32,
}

impl Default for BusyWaitDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl BusyWaitDelay {
    /// Create a delay using [`DEFAULT_LOOPS_PER_MS`]
    pub const fn new() -> Self {
        Self {
            loops_per_ms: DEFAULT_LOOPS_PER_MS,
        }
    }

    /// Create a delay with a board-specific calibration constant
    pub const fn with_calibration(loops_per_ms: u32) -> Self {
        Self { loops_per_ms }
    }

    /// Get the calibration constant
    pub const fn loops_per_ms(&self) -> u32 {
        self.loops_per_ms
    }

    /// Number of spin iterations a delay of `ms` performs
    pub const fn iterations_for(&self, ms: u32) -> u64 {
        self.loops_per_ms as u64 * ms as u64
    }
}

impl DelayMs for BusyWaitDelay {
    fn delay_ms(&mut self, ms: u32) {
        for i in 0..self.iterations_for(ms) {
            // Keeps the optimizer from collapsing the loop
            core::hint::black_box(i);
        }
    }
}
