//! Exposure CLI — solve one leg of the exposure triangle from the shell.
//!
//! ```text
//! exposure [--increments third|half|full] [--config calc.json] [--tables] [REQUEST]
//! ```
//!
//! `REQUEST` is JSON (read from stdin when omitted):
//!
//! ```text
//! {"base": {"sensitivity": "400", "aperture": "f/2.8", "shutter": "1/15"},
//!  "solve": "sensitivity", "aperture": "f/2.8", "shutter": "1/30"}
//! ```

mod request;

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use exposure_core::CalculatorConfig;

use crate::request::{CliError, SolveRequest, request_argument, tables_json};

struct Flags {
    increments: Option<String>,
    config: Option<PathBuf>,
    tables: bool,
    request: Option<String>,
}

fn parse_flags() -> Result<Flags, CliError> {
    let mut args = pico_args::Arguments::from_env();
    let flags = Flags {
        increments: args.opt_value_from_str("--increments")?,
        config: args.opt_value_from_str("--config")?,
        tables: args.contains("--tables"),
        request: request_argument(args.finish())?,
    };
    Ok(flags)
}

fn run() -> Result<(), CliError> {
    let flags = parse_flags()?;

    let mut config = match &flags.config {
        Some(path) => CalculatorConfig::load(path)?,
        None => CalculatorConfig::default(),
    };
    if let Some(name) = &flags.increments {
        config = config.with_increments_name(name)?;
    }
    let calculator = config.calculator();
    tracing::info!(increments = %calculator.granularity(), "exposure calculator ready");

    if flags.tables {
        println!("{}", tables_json(&calculator)?);
        return Ok(());
    }

    let body = match flags.request {
        Some(body) => body,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let request = SolveRequest::from_json(&body)?;
    let response = request.run(&calculator)?;
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
