use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;

use connect_four::config::{report_source, AppConfig, UiMode};
use connect_four::game::{MAX_WIDTH, MIN_WIDTH};
use connect_four::logging::{initialize_logging, log_writer};
use connect_four::ui::{App, PlainConsole, PlainOptions};

/// Two-player Connect Four in the terminal.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four in the terminal")]
struct Cli {
    /// Board width (4-50); asked for at startup when omitted
    #[arg(short, long)]
    width: Option<usize>,

    /// Use the line-oriented console instead of the full-screen view
    #[arg(long)]
    plain: bool,

    /// Disable colored output in the plain console
    #[arg(long)]
    no_color: bool,

    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(long)]
    log_level: Option<LevelFilter>,

    /// Append log lines to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print a configuration file with every default value and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_default_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    // Load configuration
    let (mut config, source) = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if cli.plain {
        config.ui.mode = UiMode::Plain;
    }
    if cli.no_color {
        config.ui.color = false;
    }
    if let Some(path) = cli.log_file {
        config.logging.file = Some(path);
    }
    let level = match cli.log_level {
        Some(level) => level,
        None => config.logging.level_filter()?,
    };

    let plain = config.ui.mode == UiMode::Plain;
    let writer = log_writer(config.logging.file.as_deref(), plain).context("opening log file")?;
    initialize_logging(level, writer, config.logging.file.is_none());
    report_source(&cli.config, source);
    debug!(?config, "configuration loaded");

    let width = match cli.width {
        Some(width) if !(MIN_WIDTH..=MAX_WIDTH).contains(&width) => {
            bail!("width {width} is outside the accepted range {MIN_WIDTH}-{MAX_WIDTH}")
        }
        Some(width) => Some(width),
        None if config.game.prompt_for_width => None,
        None => Some(config.game.width),
    };

    if plain {
        let options = PlainOptions {
            width,
            color: config.ui.color,
            clear_screen: config.ui.clear_screen,
        };
        let mut console = PlainConsole::new(io::stdin().lock(), io::stdout().lock(), options);
        let outcome = console.run().context("running plain console")?;
        info!(?outcome, "session finished");
        Ok(())
    } else {
        let mut app = App::new(width)?;
        run_tui(&mut app).context("running terminal UI")
    }
}

/// Runs its closure when dropped, on every return path including `?`.
struct OnDrop<F: FnMut()>(F);

impl<F: FnMut()> Drop for OnDrop<F> {
    fn drop(&mut self) {
        (self.0)()
    }
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
}

fn run_tui(app: &mut App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let _restore = OnDrop(restore_terminal);
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    app.run(&mut terminal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn enter_screen() -> io::Result<()> {
        Err(io::Error::other("entering alternate screen failed"))
    }

    fn failing_setup(restored: &Cell<u32>) -> io::Result<()> {
        let _restore = OnDrop(|| restored.set(restored.get() + 1));
        enter_screen()?;
        Ok(())
    }

    #[test]
    fn test_restore_runs_when_setup_fails() {
        let restored = Cell::new(0);
        assert!(failing_setup(&restored).is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn test_restore_runs_on_success() {
        let restored = Cell::new(0);
        {
            let _restore = OnDrop(|| restored.set(restored.get() + 1));
        }
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::try_parse_from([
            "connect-four",
            "--plain",
            "--width",
            "9",
            "--log-level",
            "warn",
        ])
        .unwrap();
        assert!(cli.plain);
        assert_eq!(cli.width, Some(9));
        assert_eq!(cli.log_level, Some(LevelFilter::WARN));
    }
}
