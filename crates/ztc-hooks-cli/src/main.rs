use tracing::error;
use ztc_hooks_cli::{run_cli, CliError};

fn main() {
    // Run CLI and handle errors
    if let Err(e) = run_cli() {
        error!("{}", e);
        eprintln!("{}", e);

        // Exit with appropriate code based on error type
        let exit_code = match e {
            CliError::Signature(_) => 1,
            CliError::Hook(_) => 2,
            CliError::Io(_) => 3,
            CliError::InvalidArgument { .. } => 4,
        };

        std::process::exit(exit_code);
    }
}
