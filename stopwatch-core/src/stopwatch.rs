use std::time::Duration;

use crate::accumulator::{ClockAccumulator, Phase};
use crate::clock::Clock;
use crate::controls::{Controls, Trigger};
use crate::format_hms_cs;
use crate::laps::{LapEntry, LapRecorder, MostRecentFirst};

/// Sampling cadence while running (100 Hz).
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(10);

/// A repeating timer owned by the stopwatch.
///
/// Every tick delivered after `begin` must eventually reach
/// [`Stopwatch::on_tick`] carrying the same `generation`.
pub trait TickSource {
    fn begin(&mut self, period: Duration, generation: u64);
    fn cancel(&mut self);
}

/// Output sinks of the rendering surface.
pub trait View {
    fn show_time(&mut self, label: &str);
    fn show_laps(&mut self, laps: MostRecentFirst<'_>);
    fn show_controls(&mut self, controls: Controls);
}

/// One stopwatch: clock state, laps, and the tick source that drives its
/// display.
pub struct Stopwatch<C: Clock, T: TickSource, V: View> {
    clock: C,
    ticks: T,
    view: V,
    accumulator: ClockAccumulator,
    laps: LapRecorder,
    displayed: String,
    tick_period: Duration,
    generation: u64,
}

impl<C: Clock, T: TickSource, V: View> Stopwatch<C, T, V> {
    /// Creates a stopwatch and renders its zero state.
    pub fn new(clock: C, ticks: T, view: V) -> Self {
        let mut stopwatch = Self {
            clock,
            ticks,
            view,
            accumulator: ClockAccumulator::new(),
            laps: LapRecorder::new(),
            displayed: String::new(),
            tick_period: DEFAULT_TICK_PERIOD,
            generation: 0,
        };
        stopwatch.show_elapsed();
        stopwatch.view.show_laps(stopwatch.laps.entries_most_recent_first());
        stopwatch.show_controls();
        stopwatch
    }

    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    pub fn start(&mut self) {
        let now = self.clock.now_ms();
        if !self.accumulator.start(now) {
            log::debug!("start ignored: already running");
            self.show_controls();
            return;
        }
        self.generation += 1;
        self.ticks.begin(self.tick_period, self.generation);
        log::debug!(
            "started at {} ms elapsed (tick generation {})",
            self.accumulator.sample(now),
            self.generation
        );
        self.show_controls();
    }

    pub fn pause(&mut self) {
        if !self.accumulator.is_running() {
            log::debug!("pause ignored: not running");
            self.show_controls();
            return;
        }
        // Ticks stop before the elapsed value is frozen.
        self.ticks.cancel();
        let now = self.clock.now_ms();
        self.accumulator.pause(now);
        self.show_elapsed();
        log::debug!("paused at {}", self.displayed);
        self.show_controls();
    }

    pub fn reset(&mut self) {
        if self.accumulator.is_running() {
            self.ticks.cancel();
        }
        self.accumulator.reset();
        self.laps.clear();
        self.show_elapsed();
        self.view.show_laps(self.laps.entries_most_recent_first());
        log::debug!("reset");
        self.show_controls();
    }

    /// Current elapsed milliseconds. Pure read.
    pub fn sample(&self) -> u64 {
        self.accumulator.sample(self.clock.now_ms())
    }

    /// Records a lap carrying `current_label` verbatim.
    ///
    /// Returns `None` on a fresh stopwatch.
    pub fn record_lap(&mut self, current_label: &str) -> Option<LapEntry> {
        if self.phase() == Phase::Fresh {
            log::debug!("lap rejected: stopwatch has not run");
            self.show_controls();
            return None;
        }
        let entry = self.laps.record(current_label).clone();
        log::debug!("lap {} at {}", entry.index(), entry.label());
        self.view.show_laps(self.laps.entries_most_recent_first());
        self.show_controls();
        Some(entry)
    }

    /// Records a lap of whatever is on the display right now.
    pub fn lap(&mut self) -> Option<LapEntry> {
        let shown = self.displayed.clone();
        self.record_lap(&shown)
    }

    pub fn handle(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::Start => self.start(),
            Trigger::Pause => self.pause(),
            Trigger::Reset => self.reset(),
            Trigger::Lap => {
                self.lap();
            }
        }
    }

    /// Refreshes the display for a tick of `generation`.
    ///
    /// Returns `false` and changes nothing if the tick belongs to a
    /// cancelled activation.
    pub fn on_tick(&mut self, generation: u64) -> bool {
        if !self.accumulator.is_running() || generation != self.generation {
            log::trace!(
                "dropping stale tick {} (current {})",
                generation,
                self.generation
            );
            return false;
        }
        self.show_elapsed();
        true
    }

    pub fn phase(&self) -> Phase {
        self.accumulator.phase()
    }

    pub fn is_running(&self) -> bool {
        self.accumulator.is_running()
    }

    pub fn controls(&self) -> Controls {
        Controls::for_phase(self.phase())
    }

    /// The label most recently written to the display.
    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    pub fn laps(&self) -> MostRecentFirst<'_> {
        self.laps.entries_most_recent_first()
    }

    pub fn lap_count(&self) -> usize {
        self.laps.len()
    }

    pub fn tick_generation(&self) -> u64 {
        self.generation
    }

    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn show_elapsed(&mut self) {
        let label = format_hms_cs(self.sample());
        self.view.show_time(&label);
        self.displayed = label;
    }

    fn show_controls(&mut self) {
        let controls = self.controls();
        self.view.show_controls(controls);
    }
}

impl<C: Clock, T: TickSource, V: View> Drop for Stopwatch<C, T, V> {
    fn drop(&mut self) {
        if self.accumulator.is_running() {
            self.ticks.cancel();
        }
    }
}
