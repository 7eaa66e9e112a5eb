mod config;
mod graphql;
mod http;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use platform_obs::{ObsConfig, init_tracing, shutdown_tracing};
use products_hr::{EvaluationDesk, Roster};
use serde_json::json;
use tokio::sync::Mutex;
use tracing::info;

use crate::{
    config::AppConfig,
    graphql::SharedDesk,
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "evaluation-server", version, about = "Employee evaluation service")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP + GraphQL server.
    Serve(ServeCommand),
    /// Print the GraphQL schema snapshot.
    #[command(name = "schema:print")]
    SchemaPrint {
        #[arg(long, value_name = "FILE", help = "Destination file path (stdout when omitted)")]
        output: Option<PathBuf>,
    },
    /// Print the seeded roster and its summary as JSON.
    Roster,
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, help = "Bind address (defaults to EVAL_HOST or 0.0.0.0)")]
    host: Option<std::net::IpAddr>,
    #[arg(long, help = "Bind port (defaults to EVAL_PORT or 8080)")]
    port: Option<u16>,
}

impl ServeCommand {
    fn resolve(&self, config: &AppConfig) -> ServeConfig {
        ServeConfig::new(
            self.host.unwrap_or(config.host),
            self.port.unwrap_or(config.port),
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(ObsConfig::from_env()?)?;
    let cli = Cli::parse();
    let app_config = Arc::new(AppConfig::load()?);
    match cli.command {
        Command::Serve(cmd) => {
            let result = run_server(cmd, app_config).await;
            shutdown_tracing();
            result
        }
        Command::SchemaPrint { output } => schema_print(output, &app_config),
        Command::Roster => print_roster(&app_config),
    }
}

fn build_desk(config: &AppConfig) -> SharedDesk {
    let desk = EvaluationDesk::new(Roster::seeded())
        .with_summary_departments(config.summary_departments.clone());
    Arc::new(Mutex::new(desk))
}

fn schema_print(path: Option<PathBuf>, config: &AppConfig) -> Result<()> {
    let sdl = graphql::build_schema(build_desk(config)).sdl();
    match path {
        Some(target) => {
            std::fs::write(&target, sdl)
                .with_context(|| format!("failed to write {}", target.display()))?;
            info!(path = %target.display(), "schema snapshot written");
        }
        None => println!("{sdl}"),
    }
    Ok(())
}

fn print_roster(config: &AppConfig) -> Result<()> {
    let desk = EvaluationDesk::new(Roster::seeded())
        .with_summary_departments(config.summary_departments.clone());
    let payload = json!({
        "employees": desk.roster(),
        "summary": desk.aggregates(),
    });
    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>) -> Result<()> {
    let desk = build_desk(&config);
    let schema = graphql::build_schema(desk.clone());
    info!(
        employees = desk.lock().await.roster().len(),
        "seeded evaluation roster"
    );
    let state = AppState {
        schema,
        desk,
        config: config.clone(),
    };
    http::serve(cmd.resolve(&config), state).await
}
