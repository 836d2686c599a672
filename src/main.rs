use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use rox::error::LoxError;
use rox::scanner::Scanner;
use rox::Lox;

/// Exit status after static diagnostics.
const EXIT_COMPILE: u8 = 65;

/// Exit status after a runtime error.
const EXIT_RUNTIME: u8 = 70;

#[derive(ClapParser, Debug)]
#[command(version, about = "Lox language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Option<Commands>,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Runs input from a file as a Lox program
    Run { filename: PathBuf },

    /// Starts an interactive prompt (the default without a subcommand)
    Repl,

    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Print tokens as JSON lines
        #[arg(long)]
        json: bool,
    },
}

/// Reads the contents of a file into a String
fn read_file(filename: &Path) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = String::new();

    let bytes = reader
        .read_to_string(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    Ok(buf)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            let module = record.module_path().unwrap_or("<unnamed>");
            let module = module.strip_prefix("rox::").unwrap_or(module);
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

/// Print a session error to stderr and map it to an exit status.
fn report(error: &LoxError) -> u8 {
    eprintln!("{}", error);

    match error {
        LoxError::Runtime(_) => EXIT_RUNTIME,
        _ => EXIT_COMPILE,
    }
}

fn run_file(filename: &Path) -> Result<ExitCode> {
    let source = read_file(filename)?;
    let mut lox = Lox::new();

    match lox.run(&source) {
        Ok(()) => {
            info!("Program executed successfully");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            debug!("Run failed: {:?}", e);
            Ok(ExitCode::from(report(&e)))
        }
    }
}

fn run_prompt() -> Result<ExitCode> {
    let mut lox = Lox::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(ExitCode::SUCCESS);
        };
        let line = line.context("Failed to read from stdin")?;

        // Errors are reported but never end the session.
        if let Err(e) = lox.run_line(&line) {
            report(&e);
        }
    }
}

fn tokenize(filename: &Path, json: bool) -> Result<ExitCode> {
    let source = read_file(filename)?;
    let mut tokenized = true;

    for token in Scanner::new(&source) {
        match token {
            Ok(token) if json => {
                println!("{}", serde_json::to_string(&token)?);
            }
            Ok(token) => println!("{}", token),
            Err(e) => {
                tokenized = false;
                eprintln!("{}", e);
            }
        }
    }

    if tokenized {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_COMPILE))
    }
}

fn main() -> Result<ExitCode> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands.unwrap_or(Commands::Repl) {
        Commands::Run { filename } => run_file(&filename),
        Commands::Repl => run_prompt(),
        Commands::Tokenize { filename, json } => tokenize(&filename, json),
    }
}
