mod app;
mod config;
mod keys;
mod pump;
mod ui;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};

use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use stopwatch_core::{MonotonicClock, Stopwatch};

use crate::app::{AppEvent, StopwatchApp};
use crate::config::AppConfig;
use crate::pump::Pump;
use crate::ui::{TerminalGuard, TerminalView};

/// Terminal stopwatch
///
/// Start, pause, resume and reset a running clock and record laps.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ./stopwatch.toml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Display refresh period
    #[arg(short, long = "tick-ms", value_name = "MS")]
    tick_ms: Option<u64>,
    /// Write logs to this file. Without it nothing is logged unless
    /// RUST_LOG is set, since stderr shares the screen with the stopwatch.
    #[arg(long = "log-file", value_name = "FILE")]
    log_file: Option<PathBuf>,
}

/// Filter used when RUST_LOG is unset.
fn default_log_filter(log_file: Option<&Path>) -> &'static str {
    match log_file {
        Some(_) => "warn",
        None => "off",
    }
}

fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_log_filter(log_file)),
    );
    if let Some(path) = log_file {
        let file = File::create(path)
            .with_context(|| format!("can't create log file {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.try_init().context("can't install logger")?;
    Ok(())
}

fn input_thread(events: Sender<AppEvent>) {
    loop {
        let event = match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
            Ok(Event::FocusGained) => AppEvent::Focus(true),
            Ok(Event::FocusLost) => AppEvent::Focus(false),
            Ok(Event::Resize(..)) => AppEvent::Resize,
            Ok(_) => continue,
            Err(e) => {
                log::error!("can't read terminal input: {}", e);
                events.send(AppEvent::InputClosed).ok();
                break;
            }
        };
        if events.send(event).is_err() {
            break;
        }
    }
}

fn run(config: AppConfig) -> anyhow::Result<()> {
    let (events, inbox) = mpsc::channel();

    let ticks = events.clone();
    let pump = Pump::spawn(move |generation| ticks.send(AppEvent::Tick(generation)).is_ok())?;

    std::thread::Builder::new()
        .name("input".to_owned())
        .spawn(move || input_thread(events))
        .context("can't spawn input thread")?;

    let _terminal = TerminalGuard::enter().context("can't set up terminal")?;

    let view = TerminalView::new(std::io::stdout(), &config.display);
    let stopwatch = Stopwatch::new(MonotonicClock::new(), pump, view)
        .with_tick_period(config.tick_period());
    let mut app = StopwatchApp::new(stopwatch);
    app.redraw().context("can't draw")?;

    for event in inbox.iter() {
        let keep_going = app.handle_event(event);
        app.redraw().context("can't draw")?;
        if !keep_going {
            break;
        }
    }
    log::info!("{} laps recorded", app.stopwatch().lap_count());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = AppConfig::load(cli.config.as_deref())?.with_tick_ms(cli.tick_ms);
    log::info!(
        "refreshing every {} ms, showing {} laps",
        config.clock.tick_ms,
        config.display.lap_rows
    );

    run(config)
}
