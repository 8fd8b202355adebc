use std::io::{self, Write};

use crossterm::event::KeyEvent;
use stopwatch_core::{Clock, Stopwatch, TickSource, Trigger};

use crate::keys::{action_for, Action};
use crate::ui::TerminalView;

/// Events delivered to the main loop.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Focus(bool),
    Resize,
    Tick(u64),
    InputClosed,
}

pub struct StopwatchApp<C: Clock, T: TickSource, W: Write> {
    stopwatch: Stopwatch<C, T, TerminalView<W>>,
}

impl<C: Clock, T: TickSource, W: Write> StopwatchApp<C, T, W> {
    pub fn new(stopwatch: Stopwatch<C, T, TerminalView<W>>) -> Self {
        Self { stopwatch }
    }

    /// Returns `false` once the app should exit.
    pub fn handle_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Key(key) => return self.handle_key(&key),
            AppEvent::Focus(focused) => self.stopwatch.view_mut().set_focus(focused),
            AppEvent::Resize => self.stopwatch.view_mut().invalidate(),
            AppEvent::Tick(generation) => {
                self.stopwatch.on_tick(generation);
            }
            AppEvent::InputClosed => {
                log::warn!("input closed");
                self.shutdown();
                return false;
            }
        }
        true
    }

    pub fn redraw(&mut self) -> io::Result<()> {
        self.stopwatch.view_mut().redraw()
    }

    pub fn stopwatch(&self) -> &Stopwatch<C, T, TerminalView<W>> {
        &self.stopwatch
    }

    fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let Some(action) = action_for(key) else {
            return true;
        };
        match action {
            Action::StartPause => {
                let trigger = if self.stopwatch.is_running() {
                    Trigger::Pause
                } else {
                    Trigger::Start
                };
                self.trigger(trigger);
            }
            Action::Trigger(trigger) => self.trigger(trigger),
            Action::ScrollUp => self.stopwatch.view_mut().scroll_up(),
            Action::ScrollDown => self.stopwatch.view_mut().scroll_down(),
            Action::Help => self.stopwatch.view_mut().toggle_help(),
            Action::Quit => {
                if self.stopwatch.view().help_visible() {
                    self.stopwatch.view_mut().toggle_help();
                } else {
                    self.shutdown();
                    return false;
                }
            }
        }
        true
    }

    fn trigger(&mut self, trigger: Trigger) {
        if !self.stopwatch.controls().is_enabled(trigger) {
            log::debug!("{:?} is disabled in {:?}", trigger, self.stopwatch.phase());
            return;
        }
        self.stopwatch.handle(trigger);
    }

    fn shutdown(&mut self) {
        if self.stopwatch.is_running() {
            self.stopwatch.pause();
        }
        log::info!("stopped at {}", self.stopwatch.displayed());
    }
}
