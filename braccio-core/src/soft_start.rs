//! Soft-start power ramp
//!
//! A bank of hobby servos draws a large inrush current when all channels are
//! energized at once. The shield's soft-start line gates servo power; pulsing
//! it at roughly 15% duty for the first seconds keeps the peak current down
//! before the line is latched high.
//!
//! Timing is pulse-granular: a phase ends at the first pulse boundary at or
//! after its deadline, so each phase may overrun by up to one period.

use braccio_hal::{Clock, OutputPin};

use crate::cancel::CancelToken;

/// Number of pulse phases in a ramp
pub const PHASE_COUNT: usize = 2;

/// One stage of the ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PulsePhase {
    /// Phase ends once this much time has elapsed since the ramp started
    pub until_ms: u32,
    /// Time the line is held high per pulse
    pub high_us: u32,
    /// Time the line is held low per pulse
    pub low_us: u32,
}

impl PulsePhase {
    /// Length of one pulse
    pub const fn period_us(&self) -> u32 {
        self.high_us + self.low_us
    }

    /// Duty cycle in percent (rounded down)
    pub const fn duty_percent(&self) -> u32 {
        self.high_us * 100 / self.period_us()
    }
}

/// Ramp parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SoftStartProfile {
    pub phases: [PulsePhase; PHASE_COUNT],
}

impl Default for SoftStartProfile {
    fn default() -> Self {
        Self::braccio()
    }
}

impl SoftStartProfile {
    /// Ramp used by the Braccio shield: 80/450 µs until 2 s, then 75/430 µs until 6 s
    pub const fn braccio() -> Self {
        Self {
            phases: [
                PulsePhase {
                    until_ms: 2000,
                    high_us: 80,
                    low_us: 450,
                },
                PulsePhase {
                    until_ms: 6000,
                    high_us: 75,
                    low_us: 430,
                },
            ],
        }
    }

    /// Nominal ramp duration (excluding the final pulse overrun)
    pub fn duration_ms(&self) -> u32 {
        self.phases.iter().map(|p| p.until_ms).max().unwrap_or(0)
    }

    /// Run the ramp on `pin`, blocking on `clock` until done or cancelled
    ///
    /// The token is polled before every pulse. On cancellation the line is
    /// left low so servo power stays gated off.
    pub fn run<P, C, T>(&self, pin: &mut P, clock: &mut C, cancel: &T) -> SoftStartOutcome
    where
        P: OutputPin,
        C: Clock,
        T: CancelToken + ?Sized,
    {
        let start = clock.now_millis();
        let mut pulses: u32 = 0;

        for phase in &self.phases {
            while clock.elapsed_since(start) < u64::from(phase.until_ms) {
                if cancel.is_cancelled() {
                    pin.set_low();
                    return SoftStartOutcome::Cancelled {
                        elapsed_ms: clock.elapsed_since(start),
                        pulses,
                    };
                }

                pin.set_high();
                clock.sleep_micros(phase.high_us);
                pin.set_low();
                clock.sleep_micros(phase.low_us);
                pulses = pulses.wrapping_add(1);
            }
        }

        pin.set_high();

        SoftStartOutcome::Completed {
            elapsed_ms: clock.elapsed_since(start),
            pulses,
        }
    }
}

/// Result of a ramp run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SoftStartOutcome {
    /// Ramp finished, line latched high
    Completed { elapsed_ms: u64, pulses: u32 },
    /// Ramp aborted by a cancel token, line left low
    Cancelled { elapsed_ms: u64, pulses: u32 },
}

impl SoftStartOutcome {
    /// Check if the ramp ran to completion
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Time spent in the ramp
    pub fn elapsed_ms(&self) -> u64 {
        match self {
            Self::Completed { elapsed_ms, .. } | Self::Cancelled { elapsed_ms, .. } => *elapsed_ms,
        }
    }

    /// Number of pulses emitted
    pub fn pulses(&self) -> u32 {
        match self {
            Self::Completed { pulses, .. } | Self::Cancelled { pulses, .. } => *pulses,
        }
    }
}
