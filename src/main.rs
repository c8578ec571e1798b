// WTFZOMFG: esoteric language interpreter with a memory inspector

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use wtfzomfg::interpreter::constants::DEFAULT_SNAPSHOT_LIMIT;
use wtfzomfg::pipeline::{interpret, interpret_with_history, Interpretation, Stage};
use wtfzomfg::terminal::StdConsole;
use wtfzomfg::ui::App;

#[derive(Parser, Debug)]
#[command(name = "wtfzomfg", version, about = "Run a WTFZOMFG program")]
struct Args {
    /// Source file to run
    #[arg(short, long)]
    file: PathBuf,

    /// Number of memory cells
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    memory: u32,

    /// Never ask to continue after errors and do not print diagnostics
    #[arg(short = 'e', long)]
    ignore_errors: bool,

    /// Browse the recorded run in the terminal inspector afterwards
    #[arg(short, long)]
    inspect: bool,

    /// Report progress on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    let source = fs::read_to_string(&args.file)
        .map_err(|e| format!("cannot read '{}': {}", args.file.display(), e))?;
    let memory_size = args.memory as usize;

    if args.verbose {
        eprintln!("Running {} on {} cells...", args.file.display(), memory_size);
    }

    let mut console = StdConsole::new();
    let result = if args.inspect {
        interpret_with_history(
            &source,
            memory_size,
            args.ignore_errors,
            &mut console,
            DEFAULT_SNAPSHOT_LIMIT,
        )
    } else {
        interpret(&source, memory_size, args.ignore_errors, &mut console)
    };

    if args.verbose {
        report(&result);
    }

    if let Some(stage) = result.halted_after {
        eprintln!("Stopped after {} errors.", stage);
        return Ok(ExitCode::FAILURE);
    }

    if !args.ignore_errors && !result.state.errors.is_empty() {
        eprintln!("There were {} errors:", Stage::Execution);
        for error in &result.state.errors {
            eprintln!("    {}", error);
        }
    }

    if args.inspect {
        run_inspector(result, source)?;
    }

    Ok(ExitCode::SUCCESS)
}

/// Progress summary for `--verbose`
fn report(result: &Interpretation) {
    eprintln!(
        "Lexed {} tokens ({} errors).",
        result.tokens.len(),
        result.lexer_errors.len()
    );
    eprintln!(
        "Parsed {} instructions ({} errors).",
        result.instructions.len(),
        result.parser_errors.len()
    );
    if result.halted_after.is_none() {
        eprintln!(
            "Executed {} steps ({} errors).",
            result.steps,
            result.state.errors.len()
        );
        eprintln!("{}", result.state);
    }
    if let Some(history) = &result.history {
        eprintln!(
            "Recorded {} snapshots ({} of {} bytes){}.",
            history.len(),
            history.memory_usage(),
            history.memory_limit(),
            if history.is_truncated() { ", truncated" } else { "" }
        );
    }
}

fn run_inspector(result: Interpretation, source: String) -> Result<(), Box<dyn std::error::Error>> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(result, source);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
