//! CLI entry point.
//!
//! Loads `.env`, parses arguments, wires the catalog through
//! [`artcat_cli::bootstrap`] and dispatches to a handler. Errors carrying a
//! [`CliError`] pick the exit code.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use artcat_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_cli(&cli);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Paths => handlers::paths::execute(&config)?,
        Commands::Web {
            port,
            no_reconcile,
            allow_origins,
        } => {
            let server = handlers::web::server_config(config, port, no_reconcile, allow_origins);
            handlers::web::execute(server).await?;
        }
        Commands::List(args) => {
            let ctx = bootstrap(config).await?;
            handlers::list::execute(&ctx, &args).await?;
        }
        Commands::Show { id, json } => {
            let ctx = bootstrap(config).await?;
            handlers::show::execute(&ctx, &id, json).await?;
        }
        Commands::Export { id, out } => {
            let ctx = bootstrap(config).await?;
            handlers::export::execute(&ctx, &id, out.as_deref()).await?;
        }
        Commands::Reconcile => {
            let ctx = bootstrap(config).await?;
            handlers::reconcile::execute(&ctx).await?;
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads its `env` fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(CliError::exit_code_of(&err));
    }
}
