//! Timetable editor CLI.
//!
//! Load a module snapshot, inspect it, audit it, or edit it interactively
//! from the terminal.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use u_timetable::config::GridConfig;
use u_timetable::models::Timetable;
use u_timetable::console::{self, Command, HELP};
use u_timetable::session::{Event, Session};
use u_timetable::snapshot::{self, FileSink};
use u_timetable::validation;

#[derive(Parser)]
#[command(name = "u-timetable")]
#[command(about = "Room-and-time timetable editor for university modules")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Snapshot to load
    #[arg(long, short, env = "TIMETABLE_INPUT", default_value = "ModulesIn.txt")]
    input: PathBuf,

    /// Where committed changes are written
    #[arg(long, short, env = "TIMETABLE_OUTPUT", default_value = "ModulesOut.txt")]
    output: PathBuf,

    /// Grid layout (JSON); defaults to the 10 × 8 reference week
    #[arg(long, short, env = "TIMETABLE_GRID")]
    grid: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the timetable and module list.
    Show,

    /// Audit the snapshot against capacity, double-booking and clash rules.
    Check,

    /// Edit interactively; commands are read from stdin.
    Edit,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let config = match &cli.grid {
        Some(path) => GridConfig::from_json_file(path)?,
        None => GridConfig::default(),
    };
    let load_context = || format!("failed to load {}", cli.input.display());

    match cli.command {
        Commands::Show => {
            let timetable =
                snapshot::load_timetable(&config, &cli.input).with_context(load_context)?;
            print!("{}", console::render_timetable(&timetable));
        }
        Commands::Check => {
            // Violations are printed below, so load without the warning pass.
            let timetable = snapshot::load_snapshot(&cli.input)
                .and_then(|records| Timetable::from_records(&config, &records))
                .with_context(load_context)?;
            if let Err(violations) = validation::audit(&timetable) {
                for v in &violations {
                    println!("{:?}: {}", v.kind, v.message);
                }
                anyhow::bail!("{} rule violation(s) found", violations.len());
            }
            println!("OK: no rule violations");
        }
        Commands::Edit => {
            let timetable =
                snapshot::load_timetable(&config, &cli.input).with_context(load_context)?;
            let session = Session::new(timetable, FileSink::new(&cli.output));
            run_console(session)?;
        }
    }

    Ok(())
}

fn run_console(mut session: Session<FileSink>) -> Result<()> {
    info!(output = %session.sink().path().display(), "starting editor; type `help` for commands");
    print!("{}", console::render_timetable(session.timetable()));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read command")?;
        if line.trim().is_empty() {
            continue;
        }

        match console::parse_command(&line) {
            Ok(Command::Send(event)) => {
                for effect in session.handle(event) {
                    writeln!(stdout, "{}", console::render_effect(&effect))?;
                }
            }
            Ok(Command::Valid(code)) => match session.timetable().item(&code) {
                Some(item) => {
                    let slots: Vec<String> = session
                        .timetable()
                        .movable_slots_for(item)
                        .iter()
                        .map(|s| s.to_string())
                        .collect();
                    writeln!(stdout, "{}: {}", code, slots.join(", "))?;
                }
                None => writeln!(stdout, "unknown module {code}")?,
            },
            Ok(Command::Show) => {
                write!(stdout, "{}", console::render_timetable(session.timetable()))?;
            }
            Ok(Command::Help) => writeln!(stdout, "{}", HELP)?,
            Err(e) => writeln!(stdout, "{e}")?,
        }
        stdout.flush()?;

        if session.is_closed() {
            return Ok(());
        }
    }

    // End of input closes the session like `quit`.
    for effect in session.handle(Event::RequestShutdown) {
        writeln!(stdout, "{}", console::render_effect(&effect))?;
    }
    Ok(())
}
