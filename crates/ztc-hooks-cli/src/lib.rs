//! # ZTC Hooks CLI
//!
//! Command-line tools for working with ZeroTier Central hooks:
//! - `sign` produces a signature header for a payload
//! - `verify` checks a signature header against a payload
//! - `hook-type` resolves the kind of a payload
//!
//! Payloads are read from a file or standard input and used byte for byte.
//! A trailing newline added by an editor is part of the payload and changes
//! the signature.

use clap::{Parser, Subcommand};
use std::io::{IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ztc_hooks_core::{
    get_hook_type, sign_payload, HookError, HookVerifier, PreSharedKey, SignatureError,
};

/// Environment variable the pre-shared key can be read from
pub const PRE_SHARED_KEY_ENV: &str = "ZTC_PRE_SHARED_KEY";

// ============================================================================
// CLI Structure
// ============================================================================

/// ZTC Hooks CLI - sign and verify ZeroTier Central hooks
#[derive(Parser)]
#[command(name = "ztc-hooks")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sign and verify ZeroTier Central webhooks")]
pub struct Cli {
    /// Logging level
    #[arg(short, long, default_value = "warn", global = true)]
    pub log_level: String,

    /// Enable JSON logging
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Print a signature header for a payload
    Sign {
        /// Pre-shared key, hex encoded
        #[arg(short, long, env = PRE_SHARED_KEY_ENV, hide_env_values = true)]
        key: String,

        /// Unix timestamp to sign at (defaults to now)
        #[arg(short, long, allow_negative_numbers = true)]
        timestamp: Option<i64>,

        /// Payload file (reads standard input when omitted)
        #[arg(short, long)]
        payload: Option<PathBuf>,
    },

    /// Check a signature header against a payload
    Verify {
        /// Pre-shared key, hex encoded
        #[arg(short, long, env = PRE_SHARED_KEY_ENV, hide_env_values = true)]
        key: String,

        /// Value of the X-ZTC-Signature header
        #[arg(short, long)]
        signature: String,

        /// Maximum distance between the signed timestamp and now
        #[arg(long, default_value_t = ztc_hooks_core::DEFAULT_TOLERANCE.as_secs())]
        tolerance_seconds: u64,

        /// Payload file (reads standard input when omitted)
        #[arg(short, long)]
        payload: Option<PathBuf>,
    },

    /// Print the hook type of a payload
    HookType {
        /// Payload file (reads standard input when omitted)
        #[arg(short, long)]
        payload: Option<PathBuf>,
    },
}

// ============================================================================
// CLI Error Types
// ============================================================================

/// CLI-specific errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{}: {}", .0.kind(), .0)]
    Signature(#[from] SignatureError),

    #[error("Hook error: {0}")]
    Hook(#[from] HookError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {arg} - {message}")]
    InvalidArgument { arg: String, message: String },
}

// ============================================================================
// Entry Point
// ============================================================================

/// Parse arguments, initialize logging and run the selected command
pub fn run_cli() -> Result<(), CliError> {
    let cli = Cli::parse();

    initialize_logging(&cli);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    execute(cli.command, &mut stdin.lock(), &mut stdout.lock())
}

/// Run one command against the given input and output streams.
///
/// `input` is only read when the command has no `--payload` file.
pub fn execute(
    command: Commands,
    input: &mut impl Read,
    output: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Commands::Sign {
            key,
            timestamp,
            payload,
        } => execute_sign_command(&key, timestamp, payload.as_deref(), input, output),
        Commands::Verify {
            key,
            signature,
            tolerance_seconds,
            payload,
        } => execute_verify_command(
            &key,
            &signature,
            Duration::from_secs(tolerance_seconds),
            payload.as_deref(),
            input,
            output,
        ),
        Commands::HookType { payload } => {
            execute_hook_type_command(payload.as_deref(), input, output)
        }
    }
}

/// Initialize logging based on CLI arguments. Logs go to standard error.
fn initialize_logging(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(std::io::stderr().is_terminal()),
            )
            .init();
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

fn execute_sign_command(
    key: &str,
    timestamp: Option<i64>,
    payload_path: Option<&Path>,
    input: &mut impl Read,
    output: &mut impl Write,
) -> Result<(), CliError> {
    let key = parse_key(key)?;
    let payload = read_payload(payload_path, input)?;
    let timestamp = timestamp.unwrap_or_else(|| chrono::Utc::now().timestamp());

    let header = sign_payload(&key, timestamp, &payload)?;
    debug!(timestamp, payload_bytes = payload.len(), "Signed payload");

    writeln!(output, "{}", header)?;
    Ok(())
}

fn execute_verify_command(
    key: &str,
    signature: &str,
    tolerance: Duration,
    payload_path: Option<&Path>,
    input: &mut impl Read,
    output: &mut impl Write,
) -> Result<(), CliError> {
    let key = parse_key(key)?;
    let payload = read_payload(payload_path, input)?;

    HookVerifier::new(key, tolerance)
        .require_signature(true)
        .verify(Some(signature), &payload)?;
    info!(payload_bytes = payload.len(), "Signature is valid");

    writeln!(output, "valid")?;
    Ok(())
}

fn execute_hook_type_command(
    payload_path: Option<&Path>,
    input: &mut impl Read,
    output: &mut impl Write,
) -> Result<(), CliError> {
    let payload = read_payload(payload_path, input)?;
    let hook_type = get_hook_type(&payload)?;

    writeln!(output, "{}", hook_type)?;
    Ok(())
}

fn parse_key(key: &str) -> Result<PreSharedKey, CliError> {
    if key.is_empty() {
        return Err(CliError::InvalidArgument {
            arg: "--key".to_string(),
            message: "must not be empty".to_string(),
        });
    }

    Ok(PreSharedKey::from_hex(key)?)
}

fn read_payload(path: Option<&Path>, input: &mut impl Read) -> Result<Vec<u8>, CliError> {
    match path {
        Some(path) => Ok(std::fs::read(path)?),
        None => {
            let mut payload = Vec::new();
            input.read_to_end(&mut payload)?;
            Ok(payload)
        }
    }
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
