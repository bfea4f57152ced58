// Display refresh pump.
//
// The scene engine keeps no clock of its own: something outside it must
// report how much wall time has passed (tick_inc) and pump its work
// queue (task_handler). One iteration: stamp the clock, yield for the
// minimum sleep, advance the engine by the *previous* iteration's
// measured duration, run the task handler once, stamp again. Feeding
// the previous measurement into the next advance costs one iteration of
// timing skew but never blocks an advance on measuring the work that
// follows it.
//
// The first iteration has nothing to measure; it advances by a
// configurable nominal seed instead.

use core::sync::atomic::{AtomicBool, Ordering};

/// Millisecond wall clock driving the pump.
pub trait Clock {
    /// Monotonic, non-decreasing millisecond timestamp. Wraparound is
    /// tolerated; the pump saturates a backwards difference to zero.
    fn now_ms(&self) -> u32;

    /// Suspend for at least `ms` milliseconds. Cooperative; the
    /// underlying scheduler may take longer.
    fn sleep_ms(&mut self, ms: u32);
}

/// Anything the pump can drive: a time base to advance and a task
/// handler to invoke, once each per iteration, in that order.
pub trait Engine {
    type Error;

    /// Advance the engine's internal time base. Must not block.
    fn tick_inc(&mut self, elapsed_ms: u32);

    /// Run one pass of pending input/timer/render work.
    fn task_handler(&mut self) -> Result<(), Self::Error>;
}

/// Pump tuning.
///
/// `seed_ms` is the advance fed to the very first iteration, where no
/// previous measurement exists. It is nominal, not a timing guarantee.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PumpConfig {
    pub seed_ms: u32,
    pub min_sleep_ms: u32,
}

impl Default for PumpConfig {
    fn default() -> Self {
        Self {
            seed_ms: 1000,
            min_sleep_ms: 1,
        }
    }
}

/// Cooperative refresh loop binding a [`Clock`] to an [`Engine`].
///
/// Holds exactly one piece of state across iterations: the previous
/// iteration's measured duration. Everything else lives inside the
/// engine.
pub struct Pump<C, E> {
    clock: C,
    engine: E,
    config: PumpConfig,
    elapsed_ms: u32,
}

impl<C: Clock, E: Engine> Pump<C, E> {
    pub fn new(clock: C, engine: E) -> Self {
        Self::with_config(clock, engine, PumpConfig::default())
    }

    pub fn with_config(clock: C, engine: E, config: PumpConfig) -> Self {
        Self {
            clock,
            engine,
            elapsed_ms: config.seed_ms,
            config,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Run one iteration: sleep, advance, pump, measure.
    ///
    /// An engine error propagates immediately; the measurement for the
    /// failed iteration is discarded.
    pub fn step(&mut self) -> Result<(), E::Error> {
        let start = self.clock.now_ms();
        self.clock.sleep_ms(self.config.min_sleep_ms);

        self.engine.tick_inc(self.elapsed_ms);
        self.engine.task_handler()?;

        let end = self.clock.now_ms();
        self.elapsed_ms = end.saturating_sub(start);
        Ok(())
    }

    /// Iterate until `stop` is set or the engine fails.
    ///
    /// The flag is checked once per iteration, before the clock is
    /// read. Firmware passes a flag that is never set and only leaves
    /// on error.
    pub fn run(&mut self, stop: &AtomicBool) -> Result<(), E::Error> {
        while !stop.load(Ordering::Acquire) {
            self.step()?;
        }
        Ok(())
    }

    /// Tear down, handing back the collaborators.
    pub fn into_parts(self) -> (C, E) {
        (self.clock, self.engine)
    }
}
