use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};

use treelox as lox;

use lox::ast_printer::AstPrinter;
use lox::config::{Config, DEFAULT_MAX_ARGUMENTS};
use lox::error::LoxError;
use lox::interpreter::Interpreter;
use lox::parser::Parser;
use lox::scanner::{self, Scanner};
use lox::Lox;

/// Exit code for lexical, syntax and static errors.
const EXIT_STATIC: i32 = 65;
/// Exit code for runtime errors.
const EXIT_RUNTIME: i32 = 70;

#[derive(ClapParser, Debug)]
#[command(version, about = "Tree-walking interpreter for a small class-based scripting language", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,

    /// Maximum number of arguments in a call or parameters in a declaration
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_ARGUMENTS)]
    max_args: usize,

    /// Only warn (instead of failing) when a call or declaration exceeds --max-args
    #[arg(long, global = true)]
    lenient_limits: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes input from a file, printing each token
    Tokenize { filename: PathBuf },

    /// Parses a program from a file and prints its syntax tree
    Parse {
        filename: PathBuf,

        /// Print the tree as JSON instead of prefix form
        #[arg(long)]
        json: bool,
    },

    /// Evaluates input from a file as a single expression and prints the result
    Evaluate { filename: PathBuf },

    /// Runs a program from a file, or starts a REPL when no file is given
    Run { filename: Option<PathBuf> },
}

impl Cli {
    fn config(&self) -> Config {
        let config = Config::default().with_max_arguments(self.max_args);

        if self.lenient_limits {
            config.lenient()
        } else {
            config
        }
    }
}

/// Reads the contents of a file into a String.
fn read_file(filename: &PathBuf) -> Result<String> {
    info!("Reading file: {:?}", filename);
    let file = File::open(filename).context(format!("Failed to open file {:?}", filename))?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    let bytes = reader
        .read_to_end(&mut buf)
        .context(format!("Failed to read file {:?}", filename))?;

    info!("Read {} bytes from {:?}", bytes, filename);

    let source = String::from_utf8(buf)
        .map_err(LoxError::from)
        .context(format!("File {:?} is not valid UTF-8", filename))?;

    Ok(source)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip the crate name from the module path
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
        .filter(None, log::LevelFilter::Debug)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn report(errors: &[LoxError]) {
    for e in errors {
        match e.line() {
            Some(line) => debug!("Reporting error on line {}", line),
            None => debug!("Reporting error without a source line"),
        }
        eprintln!("{}", e);
    }
}

fn exit_code(errors: &[LoxError]) -> i32 {
    if errors.iter().any(LoxError::is_runtime) {
        EXIT_RUNTIME
    } else {
        EXIT_STATIC
    }
}

fn run_prompt(lox: &mut Lox) -> Result<()> {
    info!("Starting REPL");

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush prompt")?;

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("Failed to read from stdin")?;

        if line.is_empty() {
            break;
        }

        // Errors end only the current line.
        if let Err(errors) = lox.run(&line) {
            report(&errors);
        }
    }

    info!("REPL finished");
    Ok(())
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        // Initialize a minimal logger to avoid "no logger" errors
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    let config = args.config();

    match args.commands {
        Commands::Tokenize { filename } => {
            info!("Running Tokenize subcommand");
            let source = read_file(&filename)?;
            let mut tokenized = true;

            for token in Scanner::new(&source) {
                match token {
                    Ok(token) => println!("{}", token),
                    Err(e) => {
                        tokenized = false;
                        eprintln!("{}", e);
                    }
                }
            }

            if !tokenized {
                std::process::exit(EXIT_STATIC);
            }
        }

        Commands::Parse { filename, json } => {
            info!("Running Parse subcommand");
            let source = read_file(&filename)?;

            let statements = scanner::scan(&source)
                .and_then(|tokens| Parser::new(tokens).with_config(config).parse());

            match statements {
                Ok(statements) if json => {
                    let out = serde_json::to_string_pretty(&statements)
                        .context("Failed to serialize syntax tree")?;
                    println!("{}", out);
                }
                Ok(statements) => {
                    for stmt in &statements {
                        println!("{}", AstPrinter::print_stmt(stmt));
                    }
                }
                Err(errors) => {
                    report(&errors);
                    std::process::exit(EXIT_STATIC);
                }
            }
        }

        Commands::Evaluate { filename } => {
            info!("Running Evaluate subcommand");
            let source = read_file(&filename)?;

            let expr = scanner::scan(&source)
                .and_then(|tokens| Parser::new(tokens).with_config(config).parse_expression());

            let expr = match expr {
                Ok(expr) => expr,
                Err(errors) => {
                    report(&errors);
                    std::process::exit(EXIT_STATIC);
                }
            };

            match Interpreter::new().evaluate(&expr) {
                Ok(value) => println!("{}", value),
                Err(e) => {
                    report(&[e]);
                    std::process::exit(EXIT_RUNTIME);
                }
            }
        }

        Commands::Run { filename } => {
            let mut lox = Lox::new(config);

            match filename {
                Some(filename) => {
                    info!("Running Run subcommand");
                    let source = read_file(&filename)?;

                    if let Err(errors) = lox.run(&source) {
                        report(&errors);
                        std::process::exit(exit_code(&errors));
                    }

                    info!("Program executed successfully");
                }
                None => run_prompt(&mut lox)?,
            }
        }
    }

    Ok(())
}
