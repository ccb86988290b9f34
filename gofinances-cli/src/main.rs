use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gofinances_client::{ControllerError, HttpTransactionsApi, TransactionListController};

mod config;
mod dashboard;
mod logging;
mod render;
mod state;
mod worker;

#[derive(Parser, Debug)]
#[command(
    name = "gofinances",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GOFINANCES_BUILD_SHA"), ")"),
    about = "Terminal dashboard for the GoFinances transactions API"
)]
struct Cli {
    /// Override api.base_url from config.toml
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive dashboard (default)
    Dashboard,

    /// Load transactions once and print the balance and table
    List {
        /// Print the formatted snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a transaction and print the recomputed balance
    Delete {
        /// Transaction id
        id: String,
    },

    /// Manage ~/.gofinances/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,

    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Dashboard);

    match &command {
        Command::Dashboard => logging::init_file(&state::log_path()?)?,
        _ => logging::init_stderr(),
    }

    let mut cfg = config::load_config()?;
    if let Some(url) = cli.api_url {
        cfg.api.base_url = url;
    }

    match command {
        Command::Dashboard => {
            let controller = build_controller(&cfg)?;
            log::info!("dashboard started against {}", cfg.api.base_url);
            dashboard::run_dashboard(controller)?;
        }

        Command::List { json } => {
            let controller = build_controller(&cfg)?;
            let snap = load_or_bail(&controller, &cfg).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&*snap)?);
            } else {
                print!("{}", render::render_snapshot(&snap));
            }
        }

        Command::Delete { id } => {
            let controller = build_controller(&cfg)?;
            load_or_bail(&controller, &cfg).await?;

            let outcome = controller
                .delete(&id)
                .await
                .with_context(|| format!("deleting transaction {id}"))?;
            if !outcome.removed {
                println!("Transaction {id} was not in the loaded list");
            } else {
                println!("Deleted transaction {id}");
            }

            let snap = controller.snapshot();
            println!("{}", render::render_balance(snap.balance.as_ref()));
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn build_controller(cfg: &config::Config) -> Result<TransactionListController<HttpTransactionsApi>> {
    let api = HttpTransactionsApi::new(&cfg.api.base_url, cfg.timeout())
        .with_context(|| format!("api.base_url = {}", cfg.api.base_url))?;
    Ok(TransactionListController::new(api, cfg.timezone()?))
}

async fn load_or_bail(
    controller: &TransactionListController<HttpTransactionsApi>,
    cfg: &config::Config,
) -> Result<std::sync::Arc<gofinances_core::DashboardSnapshot>> {
    match controller.load().await {
        Ok(snap) => Ok(snap),
        Err(ControllerError::Api(e)) => {
            bail!("could not load transactions from {}: {e}", cfg.api.base_url)
        }
        Err(e) => Err(e.into()),
    }
}
