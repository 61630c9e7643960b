use clap::Parser;
use passvault::cli::{Cli, Commands};

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Add {
            ref service,
            ref account,
        } => passvault::cli::commands::add::execute(&cli, service, account.as_deref()),
        Commands::Find { ref service } => passvault::cli::commands::find::execute(&cli, service),
        Commands::Remove { ref service, force } => {
            passvault::cli::commands::remove::execute(&cli, service, force)
        }
        Commands::List => passvault::cli::commands::list::execute(&cli),
        Commands::Export { ref output } => {
            passvault::cli::commands::export::execute(&cli, output.as_deref())
        }
        Commands::Import { ref file } => passvault::cli::commands::import_cmd::execute(&cli, file),
        Commands::Completions { ref shell } => {
            passvault::cli::commands::completions::execute(shell)
        }
    };

    if let Err(e) = result {
        passvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Install the stderr log subscriber; `RUST_LOG` overrides the default level.
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("passvault=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
