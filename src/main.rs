use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use minimax_connect_four::ai::MinimaxAgent;
use minimax_connect_four::config::AppConfig;
use minimax_connect_four::game::{Board, Player};
use minimax_connect_four::play::ConsoleMatch;
use minimax_connect_four::ui::App;

/// Play Connect Four against a minimax opponent.
#[derive(Parser)]
#[command(name = "connect-four", about = "Connect Four against a minimax AI")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Plain line-based prompt instead of the terminal UI
    #[arg(long)]
    console: bool,

    /// Override the number of columns
    #[arg(long)]
    width: Option<usize>,

    /// Override the number of rows
    #[arg(long)]
    height: Option<usize>,

    /// Override the search depth in plies
    #[arg(long)]
    depth: Option<usize>,

    /// Seed the move-order shuffle for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Let the computer move first
    #[arg(long)]
    ai_starts: bool,

    /// Print a config file with all default values and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let env = env_logger::Env::default().default_filter_or("warn");
    env_logger::Builder::from_env(env).init();
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml()?);
        return Ok(());
    }

    // Load configuration
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(width) = cli.width {
        config.board.width = width;
    }
    if let Some(height) = cli.height {
        config.board.height = height;
    }
    if let Some(depth) = cli.depth {
        config.ai.depth = depth;
    }
    if cli.seed.is_some() {
        config.ai.seed = cli.seed;
    }
    if cli.ai_starts {
        config.ai.ai_starts = true;
    }
    config.validate().context("invalid settings")?;

    if cli.console {
        run_console(&config)
    } else {
        run_tui(config)
    }
}

fn run_console(config: &AppConfig) -> Result<()> {
    let computer = match config.ai.seed {
        Some(seed) => MinimaxAgent::with_seed(config.ai.depth, seed),
        None => MinimaxAgent::new(config.ai.depth),
    };
    let human = if config.ai.ai_starts {
        Player::Yellow
    } else {
        Player::Red
    };
    let board = Board::new(config.board.width, config.board.height);

    let mut game = ConsoleMatch::new(board, computer, human);
    let report = game
        .run(io::stdin().lock(), io::stdout())
        .context("console match failed")?;
    println!("moves: {}", report.moves_line());
    Ok(())
}

fn run_tui(config: AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run
    let mut app = App::new(config);
    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    );
    let _ = terminal.show_cursor();

    res.context("terminal game failed")?;
    let report = app.report();
    println!("{}", report.outcome);
    println!("moves: {}", report.moves_line());
    Ok(())
}
