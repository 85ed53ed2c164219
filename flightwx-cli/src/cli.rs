use anyhow::Context;
use clap::{Parser, Subcommand};
use flightwx_core::{Config, PlanError, RoutePlanner, RouteRequest, codes};
use inquire::{Password, Text};
use std::process::ExitCode;

use crate::server;

/// Exit code for "no route between these airports".
const EXIT_NO_ROUTE: u8 = 2;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "flightwx", version, about = "Flight path weather briefings")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the route provider API key and model.
    Configure,

    /// Suggest a flight path and print its weather briefing as JSON.
    Route {
        /// IATA code of the starting airport; prompted for when omitted.
        origin: Option<String>,

        /// IATA code of the destination airport; prompted for when omitted.
        destination: Option<String>,
    },

    /// List the cities with a known ICAO code.
    Cities,

    /// Serve the briefing API over HTTP.
    Serve {
        /// Port to listen on; defaults to the configured port (or `PORT`).
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    pub async fn run(self, mut config: Config) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => {
                configure(&mut config)?;
            }
            Command::Route { origin, destination } => {
                let origin = airport_code(origin, "Enter the IATA code of the starting airport:")?;
                let destination =
                    airport_code(destination, "Enter the IATA code of the destination airport:")?;
                return route(&config, origin, destination).await;
            }
            Command::Cities => {
                for (city, code) in codes::entries() {
                    println!("{city:<20} {code}");
                }
            }
            Command::Serve { port } => {
                let planner = RoutePlanner::from_config(&config)?;
                server::serve(planner, port.unwrap_or(config.server.port)).await?;
            }
        }

        Ok(ExitCode::SUCCESS)
    }
}

fn configure(config: &mut Config) -> anyhow::Result<()> {
    let api_key = Password::new("Gemini API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    let model = Text::new("Model:")
        .with_default(&config.route_provider.model)
        .prompt()
        .context("Failed to read model name")?;

    config.set_api_key(api_key.trim().to_string());
    config.route_provider.model = model.trim().to_string();
    config.save()?;

    println!("Configuration saved to {}", Config::config_file_path()?.display());
    Ok(())
}

/// Use the argument when given, otherwise prompt. Codes are upper-cased.
fn airport_code(arg: Option<String>, prompt: &str) -> anyhow::Result<String> {
    let code = match arg {
        Some(code) => code,
        None => Text::new(prompt).prompt().context("Failed to read airport code")?,
    };
    Ok(code.trim().to_uppercase())
}

async fn route(config: &Config, origin: String, destination: String) -> anyhow::Result<ExitCode> {
    let request = RouteRequest::new(origin, destination)?;
    let planner = RoutePlanner::from_config(config)?;

    match planner.plan_route(&request).await {
        Ok(points) => {
            println!("{}", serde_json::to_string_pretty(&points)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(PlanError::NotFound { origin, destination }) => {
            println!("There is no common flight path between {origin} and {destination}.");
            Ok(ExitCode::from(EXIT_NO_ROUTE))
        }
        Err(PlanError::Provider(e)) => {
            tracing::error!(error = %e, "route provider failed");
            eprintln!("Could not retrieve flight path. Please check your API key and try again.");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
