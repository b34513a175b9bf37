use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swaptile::app::{App, Popup};
use swaptile::config::AppConfig;
use swaptile::grid::template::{parse_map_template, Cell, DEFAULT_TEMPLATE};
use swaptile::grid::{Location, Matrix};
use swaptile::theme::Theme;
use swaptile::ui;

#[derive(Parser, Debug)]
#[command(name = "swaptile")]
#[command(version)]
#[command(about = "A terminal grid of swappable tiles with swipe gesture detection")]
struct Args {
    /// Template file to load (one row per line, `.` empty, `x` marked)
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Swap two tiles before starting, given as `row,col row,col` (repeatable)
    #[arg(long, num_args = 2, value_names = ["FROM", "TO"])]
    swap: Vec<Location>,

    /// Print the grid as JSON and exit
    #[arg(short, long)]
    print: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let loaded = AppConfig::load();
    let config = loaded.as_ref().cloned().unwrap_or_default();

    // Initialize logging
    init_logging(args.log_file.as_ref().or(config.log_file.as_ref()))?;
    if let Err(e) = &loaded {
        tracing::warn!("Using default config: {:#}", e);
    }

    let tiles = load_tiles(args.template.as_ref().or(config.template.as_ref()))?;
    let mut app = App::new(tiles, &config);

    for pair in args.swap.chunks(2) {
        if let [from, to] = pair {
            app.move_tile(*from, *to)
                .with_context(|| format!("Cannot swap {} and {}", from, to))?;
            app.set_status(format!("Swapped {} and {}", from, to));
        }
    }

    // Handle CLI-only commands
    if args.print {
        println!("{}", serde_json::to_string(&app.tiles)?);
        return Ok(());
    }

    ui::init_theme(Theme::from_config(&config.theme));

    // Run TUI
    run_tui(&mut app)
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let file = log_file
        .map(|path| {
            File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {}", path.display()))
        })
        .transpose()?;

    let stderr_layer = file
        .is_none()
        .then(|| tracing_subscriber::fmt::layer().with_writer(io::stderr));
    let file_layer = file.map(|file| {
        tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(Mutex::new(file))
    });

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    Ok(())
}

fn load_tiles(path: Option<&PathBuf>) -> Result<Matrix<Cell>> {
    let tiles = match path {
        Some(path) => {
            let template = std::fs::read_to_string(path)
                .with_context(|| format!("Cannot read template {}", path.display()))?;
            tracing::info!("Loaded template from {}", path.display());
            parse_map_template(&template)
        }
        None => parse_map_template(DEFAULT_TEMPLATE),
    };

    tracing::debug!("Grid is {}x{}", tiles.height(), tiles.width());
    Ok(tiles)
}

fn run_tui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        let frame_area = terminal.draw(|f| ui::draw(f, app))?.area;
        app.set_grid_area(ui::grid_area(frame_area));

        if event::poll(std::time::Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') if app.popup == Popup::None => return Ok(()),
                    KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                        return Ok(())
                    }
                    _ => app.handle_key(key),
                },
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        app.tick();
    }
}
