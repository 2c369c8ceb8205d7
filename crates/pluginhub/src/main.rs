mod cli;

use std::process::ExitCode;

use clap::Parser;
use log::debug;
use tracing_subscriber::EnvFilter;

use cli::{CliArgs, Commands, Hub};
use pluginhub_core::kernel::error::Result;

/// Route `log` records through tracing and print them to stderr.
/// `RUST_LOG` wins over `-v` when set.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to bridge log records: {}", e);
    }
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to install logger: {}", e);
    }
}

fn run(args: CliArgs) -> Result<()> {
    match args.command {
        Some(Commands::Plugin { ref command }) => {
            let hub = Hub::load(&args)?;
            hub.run_plugin(command.clone())
        }
        Some(Commands::Event { command }) => cli::run_event(command),
        None => {
            debug!("No command given");
            println!("No command specified. Run with --help for usage.");
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    if args.ping {
        println!("pong");
        return ExitCode::SUCCESS;
    }

    init_logging(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
