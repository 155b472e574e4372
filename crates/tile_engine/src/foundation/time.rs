//! Time management utilities
//!
//! The simulation never sees wall-clock deltas directly. A [`Clock`] reports
//! the current time, the [`Timer`] turns that into per-frame elapsed time,
//! and [`FixedTimestep`] drains elapsed time in constant quanta.

use std::time::Instant;

/// Default simulation quantum in seconds (60 Hz)
pub const FIXED_TIMESTEP: f32 = 0.016_666_67;

/// Source of monotonic time in seconds
///
/// Readings are `f64` so that frame deltas keep sub-millisecond resolution
/// however long the clock has been running.
pub trait Clock {
    /// Current time in seconds since an arbitrary, fixed origin
    fn now(&mut self) -> f64;
}

/// Wall clock backed by [`Instant`]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock whose origin is the moment of construction
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Clock that replays a fixed list of frame durations
///
/// Each call to [`Clock::now`] advances by the next scripted delta. Once the
/// script is exhausted, the last delta repeats. Used by the headless driver
/// and by tests that need reproducible frame pacing.
#[derive(Debug, Clone)]
pub struct ManualClock {
    time: f64,
    deltas: Vec<f32>,
    cursor: usize,
}

impl ManualClock {
    /// Create a clock that advances by the given deltas, one per call
    pub fn new(deltas: Vec<f32>) -> Self {
        Self { time: 0.0, deltas, cursor: 0 }
    }

    /// Create a clock that advances by the same delta every call
    pub fn constant(delta: f32) -> Self {
        Self::new(vec![delta])
    }
}

impl Clock for ManualClock {
    fn now(&mut self) -> f64 {
        let now = self.time;
        if let Some(delta) = self.deltas.get(self.cursor).or_else(|| self.deltas.last()) {
            self.time += f64::from(*delta);
        }
        self.cursor = (self.cursor + 1).min(self.deltas.len());
        now
    }
}

/// Frame timer: converts successive clock readings into frame deltas
#[derive(Debug, Clone, Default)]
pub struct Timer {
    last_frame: Option<f64>,
    delta_time: f32,
    total_time: f64,
    frame_count: u64,
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at time `now` (seconds) and return the elapsed time
    ///
    /// The first frame reports zero elapsed time.
    pub fn tick(&mut self, now: f64) -> f32 {
        let delta = self.last_frame.map_or(0.0, |last| (now - last).max(0.0));
        self.last_frame = Some(now);
        self.total_time += delta;
        self.delta_time = delta as f32;
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Get the total elapsed time since the first frame
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get the average FPS since the first frame
    pub fn average_fps(&self) -> f32 {
        if self.total_time > 0.0 {
            (self.frame_count as f64 / self.total_time) as f32
        } else {
            0.0
        }
    }
}

/// Accumulator that decouples simulation rate from render rate
///
/// Elapsed frame time is added to the carried remainder; the simulation runs
/// once per whole `step` contained in it and the sub-step remainder is kept
/// for the next frame. A frame shorter than one step runs no simulation.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: f32,
    accumulator: f64,
    max_steps: Option<usize>,
    total_steps: u64,
}

impl FixedTimestep {
    /// Create an accumulator with the given step in seconds
    pub fn new(step: f32) -> Self {
        Self {
            step,
            accumulator: 0.0,
            max_steps: None,
            total_steps: 0,
        }
    }

    /// Limit the number of steps a single frame may run
    ///
    /// Whole steps beyond the limit are discarded rather than carried.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = Some(max_steps.max(1));
        self
    }

    /// The fixed step in seconds
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Leftover time carried to the next frame
    pub fn remainder(&self) -> f32 {
        self.accumulator as f32
    }

    /// Total steps issued since construction
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Fraction of a step currently carried, in `[0, 1)`
    pub fn alpha(&self) -> f32 {
        if self.step > 0.0 { (self.accumulator / f64::from(self.step)) as f32 } else { 0.0 }
    }

    /// Add a frame's elapsed time and return how many steps to simulate
    ///
    /// Runs in constant time whatever the size of `elapsed`. Negative or NaN
    /// input counts as no time passing.
    pub fn advance(&mut self, elapsed: f32) -> usize {
        let step = f64::from(self.step);
        let total = self.accumulator + f64::from(elapsed.max(0.0));
        if step <= 0.0 || total < step {
            self.accumulator = total;
            return 0;
        }
        if !total.is_finite() {
            log::warn!("Non-finite frame time; skipping frame");
            self.accumulator = 0.0;
            return 0;
        }

        let mut whole = (total / step).floor();
        let mut remainder = total - whole * step;
        if remainder >= step {
            whole += 1.0;
            remainder -= step;
        }
        self.accumulator = remainder.clamp(0.0, step);
        // Saturating cast
        let mut steps = whole as usize;

        if let Some(max) = self.max_steps {
            if steps > max {
                log::warn!("Simulation fell behind: dropping {} of {} fixed steps", steps - max, steps);
                steps = max;
            }
        }

        self.total_steps += steps as u64;
        steps
    }

    /// Run `step_fn` once per whole step contained in `elapsed`
    pub fn run<F: FnMut(f32)>(&mut self, elapsed: f32, mut step_fn: F) -> usize {
        let steps = self.advance(elapsed);
        for _ in 0..steps {
            step_fn(self.step);
        }
        steps
    }
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(FIXED_TIMESTEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_short_frame_runs_no_steps() {
        let mut stepper = FixedTimestep::new(FIXED_TIMESTEP);
        assert_eq!(stepper.advance(0.005), 0);
        assert_relative_eq!(stepper.remainder(), 0.005, epsilon = 1e-6);
        assert_eq!(stepper.advance(0.005), 0);
        assert_relative_eq!(stepper.remainder(), 0.01, epsilon = 1e-6);
    }

    #[test]
    fn test_remainder_is_carried() {
        let mut stepper = FixedTimestep::new(0.01);
        assert_eq!(stepper.advance(0.025), 2);
        assert_relative_eq!(stepper.remainder(), 0.005, epsilon = 1e-6);
        assert_eq!(stepper.advance(0.006), 1);
    }

    #[test]
    fn test_chunking_does_not_change_step_count() {
        let mut single = FixedTimestep::new(FIXED_TIMESTEP);
        let one_frame = single.advance(0.05);

        let mut split = FixedTimestep::new(FIXED_TIMESTEP);
        let two_frames = split.advance(0.025) + split.advance(0.025);

        assert!((one_frame as i64 - two_frames as i64).abs() <= 1);
    }

    #[test]
    fn test_run_passes_fixed_dt() {
        let mut stepper = FixedTimestep::new(0.02);
        let mut seen = Vec::new();
        let steps = stepper.run(0.065, |dt| seen.push(dt));
        assert_eq!(steps, 3);
        assert!(seen.iter().all(|dt| *dt == 0.02));
    }

    #[test]
    fn test_max_steps_drops_surplus() {
        let mut stepper = FixedTimestep::new(0.01).with_max_steps(4);
        assert_eq!(stepper.advance(1.0), 4);
        assert!(stepper.remainder() < 0.01);
    }

    #[test]
    fn test_huge_frame_is_capped_without_iterating() {
        let mut stepper = FixedTimestep::default().with_max_steps(8);
        assert_eq!(stepper.advance(2.0e6), 8);
        assert!(stepper.remainder() < FIXED_TIMESTEP);
        assert_eq!(stepper.advance(f32::INFINITY), 0);
        assert_eq!(stepper.advance(f32::NAN), 0);
        assert_eq!(stepper.total_steps(), 8);
    }

    #[test]
    fn test_uncapped_step_count_is_exact() {
        let mut stepper = FixedTimestep::new(1.0 / 64.0);
        assert_eq!(stepper.advance(1000.0), 64_000);
        assert_eq!(stepper.remainder(), 0.0);
    }

    #[test]
    fn test_timer_keeps_resolution_after_long_uptime() {
        let mut timer = Timer::new();
        let three_days = 3.0 * 24.0 * 3600.0;
        timer.tick(three_days);
        let delta = timer.tick(three_days + f64::from(FIXED_TIMESTEP));
        assert_relative_eq!(delta, FIXED_TIMESTEP, epsilon = 1e-6);
    }

    #[test]
    fn test_timer_first_tick_is_zero() {
        let mut timer = Timer::new();
        assert_eq!(timer.tick(5.0), 0.0);
        assert_relative_eq!(timer.tick(5.25), 0.25, epsilon = 1e-6);
        assert_eq!(timer.frame_count(), 2);
    }

    #[test]
    fn test_manual_clock_replays_deltas() {
        let mut clock = ManualClock::new(vec![0.1, 0.2]);
        assert_relative_eq!(clock.now(), 0.0);
        assert_relative_eq!(clock.now(), 0.1, epsilon = 1e-6);
        assert_relative_eq!(clock.now(), 0.3, epsilon = 1e-6);
        assert_relative_eq!(clock.now(), 0.5, epsilon = 1e-6);
    }
}
