//! # Calk CLI Application
//!
//! Terminal front end for the calk_core evaluation engine.
//!
//! ```text
//! calk add 2 3            # 5
//! calk sqrt -4            # Error: Square root of a negative number is undefined
//! calk --json power 2 10  # {"status":"value","value":1024.0}
//! calk --list             # registered operations
//! calk                    # interactive prompts
//! ```
//!
//! Exit codes: 0 for a result, 1 for a calculation error, 2 for usage or
//! configuration errors.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use calk_core::registry::descriptors;
use calk_core::{
    load_settings, DomainReason, ErrorInfo, ErrorKind, FailureCause, Operand, Operation,
    OperationRequest, OperationResult, OutputFormat, Settings,
};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "calk")]
#[command(about = "Arithmetic and engineering calculator", long_about = None)]
#[command(version)]
struct Cli {
    /// Operation identifier (e.g. add, sqrt, log_base); prompts when omitted
    operation: Option<String>,

    /// First operand (empty means 0)
    #[arg(allow_negative_numbers = true)]
    a: Option<String>,

    /// Second operand (empty means 0; ignored by unary operations)
    #[arg(allow_negative_numbers = true)]
    b: Option<String>,

    /// List registered operations and exit
    #[arg(long)]
    list: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Number of decimals to display
    #[arg(short, long)]
    precision: Option<usize>,

    /// Settings file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(cli: &Cli) {
    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

/// Resolve settings: file first, then command-line overrides.
fn resolve_settings(cli: &Cli) -> Result<Settings, calk_core::CalcError> {
    let mut settings = match &cli.config {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };
    if cli.precision.is_some() {
        settings.precision = cli.precision;
    }
    if cli.json {
        settings.output = OutputFormat::Json;
    }
    Ok(settings)
}

fn prompt(label: &str) -> Option<String> {
    print!("{}", label);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim_end_matches(['\r', '\n']).to_string()),
    }
}

/// Build a request from arguments, prompting for anything missing.
fn read_request(cli: &Cli) -> Option<OperationRequest> {
    let operation = match &cli.operation {
        Some(op) => op.clone(),
        None => {
            println!("Calk - Arithmetic and Engineering Calculator");
            println!("============================================");
            println!("Run `calk --list` to see available operations.");
            println!();
            prompt("Operation: ")?
        }
    };

    // Same exact-match lookup the evaluator performs
    let arity = Operation::from_id(&operation).map(|op| op.descriptor().arity.operand_count());
    let interactive = cli.operation.is_none();

    let a = match &cli.a {
        Some(a) => a.clone(),
        None if interactive && arity.unwrap_or(2) >= 1 => prompt("A: ")?,
        None => String::new(),
    };
    let b = match &cli.b {
        Some(b) => b.clone(),
        None if interactive && arity.unwrap_or(2) >= 2 => prompt("B: ")?,
        None => String::new(),
    };

    Some(OperationRequest::new(operation, a).with_b(b))
}

/// User-facing message for an error, chosen from its kind and sub-reason.
fn describe(info: &ErrorInfo) -> String {
    let message = match info.kind {
        ErrorKind::InvalidInput => match info.operand {
            Some(Operand::B) => "Invalid input for B",
            _ => "Invalid input for A",
        },
        ErrorKind::DivisionByZero => "Division by zero is not allowed",
        ErrorKind::DomainError => match info.reason {
            Some(DomainReason::NegativeSqrt) => "Square root of a negative number is undefined",
            Some(DomainReason::NonPositiveLog) => "Logarithm is only defined for positive numbers",
            Some(DomainReason::InvalidLogBase) => {
                "Logarithm base must be positive and not equal to 1"
            }
            Some(DomainReason::NegativeFactorial) => {
                "Factorial is not defined for negative numbers"
            }
            Some(DomainReason::NonIntegerFactorial) => {
                "Factorial is only defined for whole numbers"
            }
            None => "Math domain error",
        },
        ErrorKind::UnknownOperation => {
            return match &info.detail {
                Some(op) => format!("Unknown operation: {}", op),
                None => "Unknown operation".to_string(),
            };
        }
        ErrorKind::CalculationError => match info.cause {
            Some(FailureCause::Overflow) => "Calculation error: result is too large",
            _ => "Calculation error",
        },
    };
    message.to_string()
}

fn print_operations() {
    for category in Operation::all_categories() {
        println!("{}:", category.display_name());
        for desc in descriptors().filter(|d| d.category == category) {
            println!("  {:<12} {:<22} {}", desc.id, desc.name, desc.formula);
        }
        println!();
    }
}

fn print_result(result: &OperationResult, settings: &Settings) -> io::Result<()> {
    match settings.output {
        OutputFormat::Json => {
            let json = serde_json::to_string(result).map_err(io::Error::other)?;
            println!("{}", json);
        }
        OutputFormat::Text => match result {
            OperationResult::Value { value } => println!("{}", settings.format_value(*value)),
            OperationResult::Error(info) => eprintln!("Error: {}", describe(info)),
        },
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    if cli.list {
        print_operations();
        return ExitCode::SUCCESS;
    }

    let settings = match resolve_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("could not load settings: {}", e);
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };

    let Some(request) = read_request(&cli) else {
        eprintln!("Error: no operation given");
        return ExitCode::from(2);
    };

    let result = request.evaluate();
    if let Err(e) = print_result(&result, &settings) {
        log::error!("failed to write result: {}", e);
        return ExitCode::from(2);
    }

    match result.error() {
        None => ExitCode::SUCCESS,
        Some(info) => {
            if info.kind == ErrorKind::UnknownOperation {
                log::warn!("unknown operation requested: {:?}", request.operation);
            }
            ExitCode::from(1)
        }
    }
}
