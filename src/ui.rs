use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{DisableFocusChange, EnableFocusChange};
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use stopwatch_core::{Controls, MostRecentFirst, Phase, View};

use crate::config::DisplaySection;

const HELP_TEXT: &str = "STOPWATCH HELP\n\n\
     Enter  Start/Pause\n\
     s      Start\n\
     p      Pause\n\
     l      Record lap\n\
     r      Reset\n\
     Up/Dn  Scroll laps\n\
     ?      Help\n\
     q      Quit";

/// Raw mode and the alternate screen for as long as it lives.
pub struct TerminalGuard;

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen, Hide, EnableFocusChange)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        execute!(io::stdout(), DisableFocusChange, Show, LeaveAlternateScreen).ok();
        terminal::disable_raw_mode().ok();
    }
}

/// Renders the stopwatch to a terminal.
///
/// The [`View`] methods only update what is shown; nothing reaches the
/// writer until [`TerminalView::redraw`].
pub struct TerminalView<W: Write> {
    out: W,
    title: String,
    lap_rows: usize,
    time: String,
    laps: Vec<(u32, String)>,
    controls: Controls,
    lap_scroll_offset: usize,
    help_visible: bool,
    allow_redraw: bool,
    dirty: bool,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, display: &DisplaySection) -> Self {
        Self {
            out,
            title: display.title.clone(),
            lap_rows: display.lap_rows,
            time: String::new(),
            laps: Vec::new(),
            controls: Controls::for_phase(Phase::Fresh),
            lap_scroll_offset: 0,
            help_visible: false,
            allow_redraw: true,
            dirty: true,
        }
    }

    pub fn scroll_up(&mut self) {
        if self.lap_scroll_offset > 0 {
            self.lap_scroll_offset -= 1;
            self.dirty = true;
        }
    }

    pub fn scroll_down(&mut self) {
        if self.lap_scroll_offset < self.max_scroll() {
            self.lap_scroll_offset += 1;
            self.dirty = true;
        }
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
        self.dirty = true;
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// Redraws are suppressed while the terminal is in the background.
    pub fn set_focus(&mut self, focused: bool) {
        self.allow_redraw = focused;
        if focused {
            self.dirty = true;
        }
    }

    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    pub fn redraw(&mut self) -> io::Result<()> {
        if !self.allow_redraw || !self.dirty {
            return Ok(());
        }
        queue!(self.out, Clear(ClearType::All))?;
        if self.help_visible {
            self.draw_help()?;
        } else {
            self.draw_stopwatch()?;
        }
        self.out.flush()?;
        self.dirty = false;
        Ok(())
    }

    fn max_scroll(&self) -> usize {
        self.laps.len().saturating_sub(self.lap_rows)
    }

    fn draw_stopwatch(&mut self) -> io::Result<()> {
        // Header
        queue!(
            self.out,
            MoveTo(2, 0),
            SetAttribute(Attribute::Bold),
            Print(&self.title),
            SetAttribute(Attribute::Reset)
        )?;

        // Time display
        queue!(
            self.out,
            MoveTo(4, 2),
            SetAttribute(Attribute::Bold),
            Print(&self.time),
            SetAttribute(Attribute::Reset)
        )?;

        // Lap list (already most recent first)
        let list_top = 4u16;
        let visible = self
            .laps
            .iter()
            .skip(self.lap_scroll_offset)
            .take(self.lap_rows);
        let mut row = list_top;
        for (index, label) in visible {
            queue!(
                self.out,
                MoveTo(4, row),
                Print(format!("Lap {:2}: {}", index, label))
            )?;
            row = row.saturating_add(1);
        }
        if self.laps.len() > self.lap_rows {
            queue!(
                self.out,
                MoveTo(4, row),
                Print(format!(
                    "({}-{} of {})",
                    self.lap_scroll_offset + 1,
                    (self.lap_scroll_offset + self.lap_rows).min(self.laps.len()),
                    self.laps.len()
                ))
            )?;
        }

        // Footer
        let lap_rows = u16::try_from(self.lap_rows).unwrap_or(u16::MAX);
        let footer_row = list_top.saturating_add(lap_rows).saturating_add(2);
        queue!(
            self.out,
            MoveTo(2, footer_row),
            Print(footer(self.controls))
        )?;
        Ok(())
    }

    fn draw_help(&mut self) -> io::Result<()> {
        for (row, line) in HELP_TEXT.lines().enumerate() {
            queue!(self.out, MoveTo(2, row as u16), Print(line))?;
        }
        let row = HELP_TEXT.lines().count() as u16 + 1;
        queue!(self.out, MoveTo(2, row), Print("Press ? or Esc to close"))?;
        Ok(())
    }
}

impl<W: Write> View for TerminalView<W> {
    fn show_time(&mut self, label: &str) {
        self.time.clear();
        self.time.push_str(label);
        self.dirty = true;
    }

    fn show_laps(&mut self, laps: MostRecentFirst<'_>) {
        self.laps = laps
            .map(|lap| (lap.index(), lap.label().to_owned()))
            .collect();
        self.lap_scroll_offset = self.lap_scroll_offset.min(self.max_scroll());
        self.dirty = true;
    }

    fn show_controls(&mut self, controls: Controls) {
        if self.controls != controls {
            self.controls = controls;
            self.dirty = true;
        }
    }
}

/// Key hints for the controls that are currently enabled.
fn footer(controls: Controls) -> String {
    let mut hints = Vec::new();
    if controls.start {
        hints.push("Enter=start");
    }
    if controls.pause {
        hints.push("Enter=pause");
    }
    if controls.lap {
        hints.push("l=lap");
    }
    if controls.reset {
        hints.push("r=reset");
    }
    hints.push("?=help");
    hints.push("q=quit");
    hints.join("  ")
}

#[cfg(test)]
mod tests {
    use stopwatch_core::LapRecorder;

    use super::*;

    fn view(lap_rows: usize) -> TerminalView<Vec<u8>> {
        let display = DisplaySection {
            lap_rows,
            ..DisplaySection::default()
        };
        TerminalView::new(Vec::new(), &display)
    }

    fn take_output(view: &mut TerminalView<Vec<u8>>) -> String {
        let text = String::from_utf8_lossy(&view.out).into_owned();
        view.out.clear();
        text
    }

    fn laps(n: u32) -> LapRecorder {
        let mut laps = LapRecorder::new();
        for i in 1..=n {
            laps.record(&format!("00:00:{:02}.00", i));
        }
        laps
    }

    #[test]
    fn test_redraw_shows_title_time_and_footer() {
        let mut view = view(10);
        view.show_time("00:00:12.34");
        view.redraw().unwrap();
        let out = take_output(&mut view);
        assert!(out.contains("STOPWATCH"));
        assert!(out.contains("00:00:12.34"));
        assert!(out.contains("Enter=start"));
        assert!(!out.contains("l=lap"));
    }

    #[test]
    fn test_nothing_written_when_clean() {
        let mut view = view(10);
        view.redraw().unwrap();
        take_output(&mut view);
        view.redraw().unwrap();
        assert!(take_output(&mut view).is_empty());
    }

    #[test]
    fn test_laps_listed_most_recent_first() {
        let mut view = view(10);
        let recorder = laps(3);
        view.show_laps(recorder.entries_most_recent_first());
        view.redraw().unwrap();
        let out = take_output(&mut view);
        let third = out.find("Lap  3: 00:00:03.00").unwrap();
        let first = out.find("Lap  1: 00:00:01.00").unwrap();
        assert!(third < first);
    }

    #[test]
    fn test_scrolling_is_clamped() {
        let mut view = view(2);
        let recorder = laps(5);
        view.show_laps(recorder.entries_most_recent_first());
        view.scroll_up();
        assert_eq!(view.lap_scroll_offset, 0);
        for _ in 0..10 {
            view.scroll_down();
        }
        assert_eq!(view.lap_scroll_offset, 3);
        view.redraw().unwrap();
        let out = take_output(&mut view);
        assert!(out.contains("Lap  2:"));
        assert!(out.contains("Lap  1:"));
        assert!(!out.contains("Lap  3:"));
        assert!(out.contains("(4-5 of 5)"));

        // Fewer laps pull the offset back into range.
        let recorder = laps(3);
        view.show_laps(recorder.entries_most_recent_first());
        assert_eq!(view.lap_scroll_offset, 1);
    }

    #[test]
    fn test_redraw_with_huge_lap_rows() {
        let mut view = view(usize::MAX);
        let recorder = laps(3);
        view.show_laps(recorder.entries_most_recent_first());
        view.redraw().unwrap();
        let out = take_output(&mut view);
        assert!(out.contains("Lap  3:"));
        assert!(out.contains("q=quit"));

        let mut view = self::view(65_535);
        view.redraw().unwrap();
        assert!(take_output(&mut view).contains("q=quit"));
    }

    #[test]
    fn test_footer_follows_controls() {
        let mut view = view(10);
        view.show_controls(Controls::for_phase(Phase::Running));
        view.redraw().unwrap();
        let out = take_output(&mut view);
        assert!(out.contains("Enter=pause  l=lap  r=reset"));
        assert!(!out.contains("Enter=start"));
    }

    #[test]
    fn test_help_overlay() {
        let mut view = view(10);
        view.show_time("00:00:00.00");
        view.toggle_help();
        view.redraw().unwrap();
        let out = take_output(&mut view);
        assert!(out.contains("STOPWATCH HELP"));
        assert!(!out.contains("00:00:00.00"));
        view.toggle_help();
        assert!(!view.help_visible());
    }

    #[test]
    fn test_no_redraw_without_focus() {
        let mut view = view(10);
        view.set_focus(false);
        view.show_time("00:00:01.00");
        view.redraw().unwrap();
        assert!(take_output(&mut view).is_empty());
        view.set_focus(true);
        view.redraw().unwrap();
        assert!(take_output(&mut view).contains("00:00:01.00"));
    }
}
