//! minic CLI

use clap::{Parser, Subcommand};
use minic::ast::Program;
use minic::interp::{BufferSink, Interpreter, ENTRY_POINT};
use minic::{InterpConfig, MinicError};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "minic", version, about = "minic interpreter")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a program's main function
    Run {
        /// Program AST (JSON)
        file: PathBuf,
        /// Interpreter configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Maximum call depth, overrides the config file
        #[arg(long)]
        max_call_depth: Option<usize>,
    },
    /// Print a program as minic source
    Print {
        /// Program AST (JSON)
        file: PathBuf,
    },
    /// Load a program and validate it without running
    Check {
        /// Program AST (JSON)
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // RUST_LOG controls the level, WARN if unset
    use tracing_subscriber::{fmt, EnvFilter};
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let result = match cli.command {
        Command::Run {
            file,
            config,
            max_call_depth,
        } => run_file(&file, config.as_deref(), max_call_depth),
        Command::Print { file } => print_file(&file),
        Command::Check { file } => check_file(&file),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn load_program(path: &Path) -> minic::Result<Program> {
    let json = std::fs::read_to_string(path).map_err(|e| MinicError::io(path, e))?;
    Ok(Program::from_json(&json)?)
}

fn run_file(
    path: &Path,
    config_path: Option<&Path>,
    max_call_depth: Option<usize>,
) -> minic::Result<()> {
    let program = load_program(path)?;

    let mut config = match config_path {
        Some(p) => InterpConfig::load(p)?,
        None => InterpConfig::default(),
    };
    if let Some(depth) = max_call_depth {
        config = config.max_call_depth(depth).validate()?;
    }

    let mut interp = Interpreter::new(&program, config, BufferSink::new())?;
    let result = interp.run();

    // output produced before a fault is still shown
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(interp.sink().as_str().as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|e| MinicError::io(Path::new("<stdout>"), e))?;

    result?;
    Ok(())
}

fn print_file(path: &Path) -> minic::Result<()> {
    let program = load_program(path)?;
    print!("{program}");
    Ok(())
}

fn check_file(path: &Path) -> minic::Result<()> {
    let program = load_program(path)?;
    let interp = Interpreter::new(&program, InterpConfig::default(), BufferSink::new())?;
    if !interp.has_function(ENTRY_POINT) {
        return Err(minic::interp::RuntimeError::unknown_function(ENTRY_POINT).into());
    }
    println!("✓ {} is a valid program", path.display());
    Ok(())
}
