//! Terminal host for the card-stack layout.
//!
//! Run the binary to page through a stack of cards with the keyboard or by
//! dragging with the mouse.  Run with `--dump OFFSET` to print the records a
//! layout pass produces at that offset instead.

mod app;
mod ui;

use std::io::{self, stderr};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use card_stack::config::StackConfig;
use card_stack::core::{geometry::Viewport, layout::CardStackLayout};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{AppState, REFERENCE_HEIGHT, REFERENCE_WIDTH},
};
use crate::ui::{card_widget, layout::AppLayout, theme::Theme};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Card-stack pager layout demo")]
struct Cli {
    /// Number of cards in the stack.
    #[arg(long, default_value_t = 3)]
    cards: usize,

    /// Cards shown in the fan before they fade out.
    #[arg(long)]
    max_visible: Option<usize>,

    /// Distance from the left edge at which the front card pins.
    #[arg(long)]
    stopping_line: Option<f64>,

    /// Print the layout records at this scroll offset and exit.
    #[arg(long, value_name = "OFFSET", allow_negative_numbers = true)]
    dump: Option<f64>,

    /// Print the effective config file and exit.
    #[arg(long)]
    print_config: bool,

    /// Write the effective config to the config file before starting.
    #[arg(long)]
    save_config: bool,

    /// Animation ticks per second.
    #[arg(long, default_value_t = 30)]
    fps: u64,
}

impl Cli {
    /// Config file values with command-line overrides applied.
    fn stack_config(&self) -> StackConfig {
        let mut config = StackConfig::load();
        if let Some(n) = self.max_visible {
            config.max_visible_items = n;
        }
        if let Some(line) = self.stopping_line {
            config.stopping_line = line;
        }
        config
    }
}

// ───────────────────────────────────────── dump mode ─────────

/// Where the `--dump` replay starts: one page before the page `offset` lies
/// in.  Only the card just before the range can be replayed from the pinned
/// cache, and it pins within that page or the next.
fn replay_start(offset: f64, width: f64) -> f64 {
    ((offset / width).floor() - 1.0).max(0.0) * width
}

/// Replay a scroll toward `offset` on the reference stage, then print the
/// final pass.  Replaying lets a card pinned along the way show up exactly
/// as it would live.
fn dump(config: StackConfig, cards: usize, offset: f64) -> Result<()> {
    let mut layout = CardStackLayout::new(config)?;
    let step = REFERENCE_WIDTH / 30.0;
    let start = replay_start(offset, REFERENCE_WIDTH);
    let distance = offset - start;
    let steps = if distance.is_finite() {
        (distance.abs() / step).ceil() as usize
    } else {
        0
    };

    let mut records = Vec::new();
    for i in 0..=steps {
        let at = if i == steps {
            offset
        } else {
            start + distance.signum() * step * i as f64
        };
        let viewport = Viewport::new(at, REFERENCE_WIDTH, REFERENCE_HEIGHT, cards);
        records = layout.layout(&viewport)?;
    }

    println!(
        "offset {offset} on a {REFERENCE_WIDTH}x{REFERENCE_HEIGHT} stage, {cards} cards, {} pinned",
        layout.pinned().len()
    );
    for r in &records {
        println!(
            "#{:<3} x={:>8.2} y={:>7.2} scale={:.4} opacity={:.3} z={:>11} {}",
            r.index,
            r.center.x,
            r.center.y,
            r.transform.scale,
            r.opacity,
            r.z_index,
            if r.is_pinned { "pinned" } else { "" },
        );
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never pollute stdout
        .init();

    let cli = Cli::parse();
    let config = cli.stack_config();
    config.validate().context("invalid stack configuration")?;

    // ── one-shot modes ────────────────────────────────────────
    if cli.print_config {
        print!("{}", config.serialise());
        return Ok(());
    }
    if cli.save_config {
        config.save()?;
        tracing::info!("config saved to {}", card_stack::config::config_path().display());
    }
    if let Some(offset) = cli.dump {
        return dump(config, cli.cards, offset);
    }

    let mut state = AppState::new(config, cli.cards, 0.3)?;

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let frame = Duration::from_millis(1000 / cli.fps.clamp(1, 120));
    let mut events = spawn_event_reader(frame);

    // ── event loop ────────────────────────────────────────────
    let result = async {
        loop {
            // The stage is the bordered area's interior.
            let size = terminal.size()?;
            let layout = AppLayout::from_area(Rect::new(0, 0, size.width, size.height));
            let stage = Block::default().borders(Borders::ALL).inner(layout.stage_area);
            let (width, height) = card_widget::viewport_points(stage);
            state.resize(width, height)?;
            state.frame()?;

            terminal.draw(|f| {
                let stage_block = Block::default()
                    .title(format!(" card stack · {} cards ", state.item_count))
                    .title_style(Theme::title_style())
                    .borders(Borders::ALL)
                    .border_style(Theme::border_style());
                f.render_widget(stage_block, layout.stage_area);
                f.render_widget(
                    card_widget::CardStackWidget {
                        records: &state.records,
                        scroll_offset: state.scroll.offset(),
                    },
                    stage,
                );

                let status_text = state
                    .status_message
                    .clone()
                    .unwrap_or_else(|| state.status_line());
                let status = Paragraph::new(status_text).style(Theme::status_bar_style());
                f.render_widget(status, layout.status_area);
            })?;

            match events.recv().await {
                Some(AppEvent::Key(k)) => handler::handle_key(&mut state, k),
                Some(AppEvent::Mouse(m)) => handler::handle_mouse(&mut state, m),
                Some(AppEvent::Resize(_, _)) | Some(AppEvent::Tick) => {}
                None => break,
            }

            if state.should_quit {
                break;
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_covers_at_most_two_pages() {
        assert_eq!(replay_start(0.0, 300.0), 0.0);
        assert_eq!(replay_start(-50.0, 300.0), 0.0);
        assert_eq!(replay_start(450.0, 300.0), 0.0);
        assert_eq!(replay_start(700.0, 300.0), 300.0);
        assert_eq!(replay_start(1e12, 300.0), (1e12_f64 / 300.0 - 1.0).floor() * 300.0);
        assert!(1e12 - replay_start(1e12, 300.0) <= 600.0);
    }

    #[test]
    fn dump_of_a_huge_offset_returns() {
        assert!(dump(StackConfig::default(), 3, 1e12).is_ok());
    }
}
