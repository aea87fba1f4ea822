//! Coinburst - coins that fly along randomized Bezier arcs
//!
//! Press Collect and watch a quantity split into coins that arc from the
//! button into your wallet.

mod app;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io::{self, Write};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coinburst::batch::BatchOverrides;
use coinburst::motion::Region;

use app::App;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Total quantity to collect
    #[arg(short, long)]
    amount: Option<i64>,

    /// Quantity carried by each coin
    #[arg(short, long)]
    increment: Option<i64>,

    /// Upper bound on the number of coins
    #[arg(short, long)]
    max_coins: Option<i64>,

    /// Seed for reproducible trajectories
    #[arg(long)]
    seed: Option<u64>,

    /// Mirror the end curve angle off the start angle (true/false)
    #[arg(long)]
    symmetric: Option<bool>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Run without a terminal UI and print landings as they happen
    #[arg(long, default_value_t = false)]
    headless: bool,

    /// Print the planned trajectories as JSON and exit
    #[arg(long, default_value_t = false)]
    plan: bool,

    /// Enable debug logging
    #[arg(long, default_value_t = false)]
    debug: bool,
}

impl Args {
    fn overrides(&self) -> BatchOverrides {
        BatchOverrides {
            total_quantity: self.amount,
            increment: self.increment,
            max_units: self.max_coins,
            seed: self.seed,
            symmetric_curve: self.symmetric,
            ..BatchOverrides::default()
        }
    }
}

/// Anchors used when there is no screen to measure
const HEADLESS_SOURCE: Region = Region::new(0.0, 20.0, 14.0, 3.0);
const HEADLESS_TARGET: Region = Region::new(58.0, 0.0, 22.0, 3.0);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.debug { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    let mut app = App::new(args.config.as_deref(), &args.overrides())?;

    if args.plan {
        return print_plan(&mut app);
    }

    if args.headless || !atty::is(atty::Stream::Stdout) {
        return run_headless(&mut app);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {:?}", err);
        return Err(err);
    }

    Ok(())
}

fn print_plan(app: &mut App) -> Result<()> {
    app.set_layout(HEADLESS_SOURCE, HEADLESS_TARGET);
    let plan = app.batch.plan();
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}

/// Fly one batch on a virtual clock and narrate it
fn run_headless(app: &mut App) -> Result<()> {
    app.set_layout(HEADLESS_SOURCE, HEADLESS_TARGET);

    let split = app.batch.split();
    let mut out = io::stdout().lock();
    writeln!(
        out,
        "collecting {} in {} coins (balance {})",
        split.total(),
        split.count,
        app.wallet.balance
    )?;

    let frame_ms = app.config.frame_interval_ms().max(1) as f64;
    let mut now_ms = 0.0;

    app.collect();
    loop {
        for message in app.wallet.take_unread() {
            writeln!(out, "{}", message)?;
        }
        if !app.batch.is_active() {
            break;
        }
        now_ms += frame_ms;
        app.advance_to(now_ms);
    }

    tracing::debug!(elapsed_ms = now_ms, "headless run finished");
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    let mut frames = tokio::time::interval(Duration::from_millis(app.config.frame_interval_ms()));
    frames.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        frames.tick().await;

        // Keep the anchors on the widgets as the terminal resizes
        let size = terminal.size()?;
        let screen = ui::Screen::new(Rect::new(0, 0, size.width, size.height));
        let (source, target) = screen.anchors();
        app.set_layout(source, target);

        app.tick();
        terminal.draw(|frame| ui::draw(frame, app))?;

        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char(' ') | KeyCode::Enter => app.collect(),
                        KeyCode::Char('s') => app.stop(),
                        KeyCode::Char('c') => app.cancel(),
                        _ => {}
                    }
                }
            }
        }
    }
}
