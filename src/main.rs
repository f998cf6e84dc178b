use clap::Parser;
use passvault::cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter (e.g. `passvault=debug`).
const LOG_ENV: &str = "PASSVAULT_LOG";

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Init => passvault::cli::commands::init::execute(&cli),
        Commands::Unlock => passvault::cli::commands::unlock::execute(&cli),
        Commands::Set {
            ref domain,
            ref secret,
        } => passvault::cli::commands::set::execute(&cli, domain, secret.as_deref()),
        Commands::Get { ref domain, copy } => {
            passvault::cli::commands::get::execute(&cli, domain, copy)
        }
        Commands::Remove { ref domain } => passvault::cli::commands::remove::execute(&cli, domain),
        Commands::List => passvault::cli::commands::list::execute(&cli),
        Commands::Save => passvault::cli::commands::save::execute(&cli),
        Commands::Verify { ref checksum } => {
            passvault::cli::commands::verify::execute(&cli, checksum)
        }
        Commands::Menu => passvault::cli::commands::menu::execute(&cli),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Log to stderr. `PASSVAULT_LOG` wins over `-v` flags.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
