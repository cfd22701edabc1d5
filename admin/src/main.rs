#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use employee_admin::{app, app::StdinConfirm, Cli, ReqwestTransport};
use employee_core::{EmployeeClient, EmployeeStore, RemoteService};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let remote = RemoteService::new(EmployeeClient::new(&cli.base_url), ReqwestTransport::new()?);
    let store = EmployeeStore::new(remote);
    let mut confirm = StdinConfirm::new(cli.yes);

    app::run(cli.command, &store, &mut confirm, &mut std::io::stdout()).await
}
