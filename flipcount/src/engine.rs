//! The counter engine: mode/value state machine of the simulated circuit.
//!
//! `CounterEngine` owns the counter value, the active mode, the modulus
//! parameter, and the run flag, and performs one step of counting per tick.
//! It has no notion of time or scheduling; a driver calls [`advance`] on
//! whatever cadence it likes (the interactive driver uses
//! [`DEFAULT_TICK_INTERVAL`]).
//!
//! [`advance`]: CounterEngine::advance
//! [`DEFAULT_TICK_INTERVAL`]: crate::constants::DEFAULT_TICK_INTERVAL

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MODULUS;
use crate::error::CounterError;
use crate::mode::Mode;
use crate::types::{CounterValue, Modulus};

/// Read-side snapshot of the engine, consumed by displays and drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    /// Current displayed count, within `0..modulus` after any advance.
    pub value: CounterValue,
    /// Currently active mode; `Idle` when stopped or reset.
    pub mode: Mode,
    /// The `N` in Mod-N counting.
    pub modulus: Modulus,
    /// Whether ticks currently step the counter.
    pub running: bool,
    /// Advances applied since the last reset.
    pub ticks: u64,
}

/// The counter/mode state machine.
///
/// All operations are total: nothing here panics on user input, and the only
/// rejectable request is an out-of-range modulus, which leaves every field
/// unchanged. Invariant: after any [`advance`], `0 <= value < modulus`.
///
/// [`advance`]: Self::advance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterEngine {
    value: CounterValue,
    mode: Mode,
    modulus: Modulus,
    running: bool,
    ticks: u64,
}

impl Default for CounterEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterEngine {
    /// Creates an idle engine with `value = 0` and the default modulus.
    pub fn new() -> Self {
        Self::with_modulus(Modulus::new(DEFAULT_MODULUS))
    }

    /// Creates an idle engine with a specific modulus.
    ///
    /// # Parameters
    /// - `modulus`: The `N` for Mod-N counting. Must be `>= 1`; a `Modulus`
    ///   can only be observed out of range if constructed as `Modulus::new(0)`,
    ///   which this constructor rejects by clamping to 1.
    pub fn with_modulus(modulus: Modulus) -> Self {
        let modulus = if modulus.value() == 0 {
            Modulus::new(1)
        } else {
            modulus
        };
        Self {
            value: CounterValue::new(0),
            mode: Mode::Idle,
            modulus,
            running: false,
            ticks: 0,
        }
    }

    /// Activates a counting mode and starts the tick stream.
    ///
    /// The counter value is never changed by a mode switch; counting resumes
    /// from wherever the value currently is.
    ///
    /// # Parameters
    /// - `mode`: One of `Up`, `Down`, `ModuloN`. Passing `Idle` is a caller
    ///   contract violation; use [`reset`] to stop the machine.
    ///
    /// [`reset`]: Self::reset
    pub fn set_mode(&mut self, mode: Mode) {
        debug_assert!(
            mode.is_counting(),
            "set_mode called with Idle; reset() stops the machine"
        );
        if !mode.is_counting() {
            return;
        }
        self.mode = mode;
        self.running = true;
    }

    /// Returns the engine to its initial state: `value = 0`, `mode = Idle`,
    /// `running = false`. The configured modulus is untouched.
    pub fn reset(&mut self) {
        self.value = CounterValue::new(0);
        self.mode = Mode::Idle;
        self.running = false;
        self.ticks = 0;
    }

    /// Reconfigures the modulus with immediate effect on subsequent advances.
    ///
    /// A value already out of the new range is not clamped here; the next
    /// [`advance`] recomputes it into `0..N`.
    ///
    /// # Parameters
    /// - `requested`: The new `N`. Must be within `1..=u32::MAX`.
    ///
    /// # Errors
    /// - [`CounterError::InvalidModulus`] - Request out of range; all engine
    ///   state is left unchanged.
    ///
    /// [`advance`]: Self::advance
    pub fn set_modulus(&mut self, requested: i64) -> Result<(), CounterError> {
        if requested < 1 || requested > i64::from(u32::MAX) {
            return Err(CounterError::InvalidModulus { requested });
        }
        self.modulus = Modulus::new(requested as u32);
        Ok(())
    }

    /// Applies one tick of the active mode.
    ///
    /// No-op unless the machine is running with a counting mode. `Up` and
    /// `ModuloN` step `(value + 1) mod N`; `Down` steps `(value + N - 1) mod N`,
    /// wrapping to `N-1` from 0.
    ///
    /// # Returns
    /// The counter value after the tick.
    pub fn advance(&mut self) -> CounterValue {
        if !self.running || !self.mode.is_counting() {
            return self.value;
        }

        let n = u64::from(self.modulus.value());
        let v = u64::from(self.value.value());
        let stepped = match self.mode {
            Mode::Up | Mode::ModuloN => (v + 1) % n,
            Mode::Down => (v + n - 1) % n,
            Mode::Idle => unreachable!(),
        };

        self.value = CounterValue::new(stepped as u32);
        self.ticks += 1;
        self.value
    }

    /// Snapshot of the engine for display consumers.
    pub fn state(&self) -> CounterState {
        CounterState {
            value: self.value,
            mode: self.mode,
            modulus: self.modulus,
            running: self.running,
            ticks: self.ticks,
        }
    }

    /// Current displayed count.
    #[inline]
    pub fn value(&self) -> CounterValue {
        self.value
    }

    /// Currently active mode.
    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Configured modulus.
    #[inline]
    pub fn modulus(&self) -> Modulus {
        self.modulus
    }

    /// Whether ticks currently step the counter.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advances applied since the last reset.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
