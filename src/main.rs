use std::fs::File;
use std::io::{self, BufReader, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use treelox::ast_printer::AstPrinter;
use treelox::diagnostics::Diagnostics;
use treelox::parser::Parser;
use treelox::scanner::Scanner;
use treelox::token::Token;
use treelox::Lox;

/// `EX_USAGE` from sysexits.h.
const EXIT_USAGE: u8 = 64;
const EXIT_STATIC: u8 = 65;

#[derive(ClapParser, Debug)]
#[command(version, about = "Tree-walking Lox interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to treelox.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Print the tokens as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Parses a file and prints every statement as an S-expression
    Parse { filename: PathBuf },

    /// Runs a Lox script; without a file, starts the prompt
    Run { filename: Option<PathBuf> },

    /// Starts an interactive prompt
    Repl,
}

/// Reads the contents of a file into a String
fn read_file(filename: PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(&filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = String::new();

    let bytes = reader
        .read_to_string(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    Ok(buf)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("treelox.log").context("Failed to create treelox.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip 'treelox::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("treelox::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to treelox.log");
    Ok(())
}

fn tokenize(source: &str, json: bool) -> Result<u8> {
    let mut diagnostics = Diagnostics::new();
    let tokens: Vec<Token> = Scanner::new(source).scan_tokens(&mut diagnostics);

    for error in diagnostics.errors() {
        eprintln!("{}", error);
    }

    if json {
        let rendered = serde_json::to_string_pretty(&tokens).context("Failed to encode tokens")?;
        println!("{}", rendered);
    } else {
        for token in &tokens {
            debug!("Scanned token: {}", token);
            println!("{}", token);
        }
    }

    if diagnostics.had_error() {
        debug!("Tokenization failed, exiting with code 65");
        return Ok(EXIT_STATIC);
    }

    info!("Tokenization completed successfully");
    Ok(0)
}

fn parse(source: &str) -> u8 {
    let mut diagnostics = Diagnostics::new();
    let tokens = Scanner::new(source).scan_tokens(&mut diagnostics);
    let statements = Parser::new(tokens, &mut diagnostics).parse();

    if diagnostics.had_error() {
        for error in diagnostics.errors() {
            eprintln!("{}", error);
        }
        return EXIT_STATIC;
    }

    for stmt in &statements {
        let ast_str = AstPrinter::print_stmt(stmt);
        debug!("AST: {}", ast_str);
        println!("{}", ast_str);
    }

    info!("Parse subcommand completed");
    0
}

fn run_file(filename: PathBuf) -> Result<u8> {
    let source = read_file(filename)?;
    info!("Provided input:\n {}", source);

    let mut lox = Lox::new();
    let outcome = lox.run(&source);

    for error in lox.diagnostics().errors() {
        eprintln!("{}", error);
    }

    info!("Run finished with {:?}", outcome);
    // Exit codes are 0, 65 or 70.
    Ok(outcome.exit_code() as u8)
}

fn run_prompt() -> Result<u8> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    Lox::new()
        .run_prompt(stdin.lock(), &mut stdout, &mut stderr)
        .context("Failed to run the prompt")?;

    Ok(0)
}

fn main() -> Result<ExitCode> {
    let args: Cli = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            e.print().context("Failed to print usage")?;
            return Ok(ExitCode::from(usage_exit_code(&e)));
        }
    };

    // Initialize logger only if --log flag is provided
    if args.log {
        init_logger()?;
    } else {
        // Initialize a minimal logger to avoid "no logger" errors
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    let code: u8 = match args.commands {
        Commands::Tokenize { filename, json } => {
            info!("Running Tokenize subcommand");
            let source = read_file(filename)?;
            tokenize(&source, json)?
        }

        Commands::Parse { filename } => {
            info!("Running Parse subcommand");
            let source = read_file(filename)?;
            parse(&source)
        }

        Commands::Run {
            filename: Some(filename),
        } => {
            info!("Running Run subcommand");
            run_file(filename)?
        }

        Commands::Run { filename: None } | Commands::Repl => {
            info!("Running Repl subcommand");
            run_prompt()?
        }
    };

    Ok(ExitCode::from(code))
}

/// `--help` and `--version` also arrive as errors, printed on stdout.
fn usage_exit_code(error: &clap::Error) -> u8 {
    if error.use_stderr() {
        EXIT_USAGE
    } else {
        0
    }
}
