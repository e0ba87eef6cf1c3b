//! Transit fares CLI
//!
//! Plans public transit routes and compares ride-hailing fares between two
//! points.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod output;

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use application::{
    ApplicationError, Endpoint, FareComparisonService, LocationPort, RoutePlannerService,
};
use clap::{Parser, Subcommand};
use domain::{Coordinate, FareComparison, FareProvider, RouteOption};
use infrastructure::{
    AppConfig, ConfiguredLocationAdapter, DirectionsAdapter, TelemetryConfig, init_telemetry,
};
use integration_directions::{
    GoogleDirectionsClient, GooglePlacesClient, PlacePrediction, PlacesClient,
};
use output::SelectedRoute;
use serde::Serialize;
use tracing::{debug, warn};

/// Transit fares CLI
#[derive(Parser)]
#[command(name = "transit-fares")]
#[command(
    author,
    version,
    about = "Public transit routes and ride-hailing fare comparison",
    long_about = None
)]
struct Cli {
    /// Verbosity level, overrides `telemetry.log_filter` when given
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check directions availability and configuration
    Status,

    /// Fetch public transit route options
    ///
    /// Example: transit-fares routes --from 12.9716,77.5946 --to 12.9352,77.6146
    Routes {
        /// Origin as "lat,lng" or "current"
        #[arg(short, long, default_value = "current")]
        from: Endpoint,

        /// Destination as "lat,lng"
        #[arg(short, long)]
        to: Endpoint,

        /// Option to select (1-based)
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
        select: u16,

        /// Also print the selected option's path as an encoded polyline
        #[arg(long)]
        encode: bool,
    },

    /// Estimate distance, travel time and ride-hailing fares
    Fares {
        /// Origin as "lat,lng" or "current"
        #[arg(short, long, default_value = "current")]
        from: Endpoint,

        /// Destination as "lat,lng"
        #[arg(short, long)]
        to: Endpoint,

        /// Only quote these providers, e.g. "uber,namma-yatri"
        #[arg(short, long = "provider", value_delimiter = ',')]
        providers: Vec<FareProvider>,
    },

    /// Show route options and fares together
    Compare {
        /// Origin as "lat,lng" or "current"
        #[arg(short, long, default_value = "current")]
        from: Endpoint,

        /// Destination as "lat,lng"
        #[arg(short, long)]
        to: Endpoint,

        /// Only quote these providers, e.g. "uber,namma-yatri"
        #[arg(short, long = "provider", value_delimiter = ',')]
        providers: Vec<FareProvider>,
    },

    /// Search places by name
    Places {
        /// Free-text query, e.g. "Koramangala"
        query: String,

        /// Maximum number of predictions to resolve
        #[arg(short, long, default_value_t = 5)]
        limit: usize,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Configured telemetry, with the filter replaced when `-v` was given
fn telemetry_for(config: &TelemetryConfig, verbose: u8) -> TelemetryConfig {
    let telemetry = config.clone();
    match log_filter_from_verbosity(verbose) {
        Some(filter) => telemetry.with_log_filter(filter),
        None => telemetry,
    }
}

#[derive(Serialize)]
struct RoutesOutput<'a> {
    selected: Option<SelectedRoute>,
    options: &'a [RouteOption],
}

#[derive(Serialize)]
struct CompareOutput<'a> {
    fares: &'a FareComparison,
    routes: Option<RoutesOutput<'a>>,
}

#[derive(Serialize)]
struct PlaceOutput<'a> {
    #[serde(flatten)]
    prediction: &'a PlacePrediction,
    location: Option<Coordinate>,
}

#[derive(Debug, Serialize)]
struct StatusOutput {
    directions_available: bool,
    api_key_configured: bool,
    current_location: Option<Coordinate>,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Wired services for one CLI invocation
struct App {
    planner: RoutePlannerService,
    fares: FareComparisonService,
    location: ConfiguredLocationAdapter,
    places: GooglePlacesClient,
    api_key_configured: bool,
    json: bool,
}

impl App {
    fn new(config: &AppConfig, json: bool) -> anyhow::Result<Self> {
        let directions = GoogleDirectionsClient::new(&config.google)
            .context("Failed to create directions client")?;
        let places =
            GooglePlacesClient::new(&config.google).context("Failed to create places client")?;

        Ok(Self {
            planner: RoutePlannerService::new(Arc::new(DirectionsAdapter::new(Arc::new(
                directions,
            )))),
            fares: FareComparisonService::new(),
            location: ConfiguredLocationAdapter::new(&config.location),
            places,
            api_key_configured: config.google.api_key().is_some(),
            json,
        })
    }

    async fn resolve(
        &self,
        from: Endpoint,
        to: Endpoint,
    ) -> Result<(Coordinate, Coordinate), ApplicationError> {
        let location: &dyn LocationPort = &self.location;
        let origin = from.resolve(Some(location)).await?;
        let destination = to.resolve(Some(location)).await?;
        debug!(%origin, %destination, "Endpoints resolved");
        Ok((origin, destination))
    }

    async fn run(&self, command: Commands) -> anyhow::Result<()> {
        match command {
            Commands::Status => self.status().await,
            Commands::Routes {
                from,
                to,
                select,
                encode,
            } => self.routes(from, to, select, encode).await,
            Commands::Fares {
                from,
                to,
                providers,
            } => self.fare_comparison(from, to, &providers).await,
            Commands::Compare {
                from,
                to,
                providers,
            } => self.compare(from, to, &providers).await,
            Commands::Places { query, limit } => self.search_places(&query, limit).await,
        }
    }

    async fn status(&self) -> anyhow::Result<()> {
        let status = StatusOutput {
            directions_available: self.planner.is_available().await,
            api_key_configured: self.api_key_configured,
            current_location: self.location.current_location().await.ok(),
        };

        if self.json {
            return print_json(&status);
        }
        print!(
            "{}",
            output::status(
                status.directions_available,
                status.api_key_configured,
                status.current_location
            )
        );
        Ok(())
    }

    fn routes_output<'a>(&self, options: &'a [RouteOption], encode: bool) -> RoutesOutput<'a> {
        RoutesOutput {
            selected: SelectedRoute::from_options(options, self.planner.selected_index(), encode),
            options,
        }
    }

    async fn routes(
        &self,
        from: Endpoint,
        to: Endpoint,
        select: u16,
        encode: bool,
    ) -> anyhow::Result<()> {
        let (origin, destination) = self.resolve(from, to).await?;
        self.planner.plan(&origin, &destination).await?;
        self.planner.select(usize::from(select) - 1)?;

        let options = self.planner.options();
        let routes = self.routes_output(&options, encode);
        if self.json {
            return print_json(&routes);
        }

        println!("Routes from {origin} to {destination}\n");
        print!("{}", output::route_options(&options, self.planner.selected_index()));
        if let Some(selected) = &routes.selected {
            println!();
            print!("{}", output::selected_route(selected));
        }
        Ok(())
    }

    async fn fare_comparison(
        &self,
        from: Endpoint,
        to: Endpoint,
        providers: &[FareProvider],
    ) -> anyhow::Result<()> {
        let (origin, destination) = self.resolve(from, to).await?;
        let comparison = self.fares.compare_providers(&origin, &destination, providers);

        if self.json {
            return print_json(&comparison);
        }
        print!("{}", output::fare_table(&comparison));
        Ok(())
    }

    async fn compare(
        &self,
        from: Endpoint,
        to: Endpoint,
        providers: &[FareProvider],
    ) -> anyhow::Result<()> {
        let (origin, destination) = self.resolve(from, to).await?;
        let comparison = self.fares.compare_providers(&origin, &destination, providers);
        let routes = self.planner.plan(&origin, &destination).await;

        if self.json {
            print_json(&CompareOutput {
                fares: &comparison,
                routes: routes
                    .as_ref()
                    .ok()
                    .map(|options| self.routes_output(options, false)),
            })?;
        } else {
            print!("{}", output::fare_table(&comparison));
            if let Ok(options) = &routes {
                println!();
                print!("{}", output::route_options(options, self.planner.selected_index()));
            }
        }

        routes.map(|_| ()).map_err(Into::into)
    }

    async fn search_places(&self, query: &str, limit: usize) -> anyhow::Result<()> {
        let predictions = self
            .places
            .autocomplete(query)
            .await
            .context("Place search failed")?;

        let mut items = Vec::new();
        for prediction in predictions.into_iter().take(limit) {
            let location = match self.places.place_location(&prediction.place_id).await {
                Ok(location) => Some(location),
                Err(e) => {
                    warn!(place_id = %prediction.place_id, error = %e, "Could not resolve place");
                    None
                },
            };
            items.push((prediction, location));
        }

        if self.json {
            let out: Vec<PlaceOutput<'_>> = items
                .iter()
                .map(|(prediction, location)| PlaceOutput {
                    prediction,
                    location: *location,
                })
                .collect();
            return print_json(&out);
        }
        print!("{}", output::predictions(&items));
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = AppConfig::load().context("Failed to load configuration")?;

    init_telemetry(&telemetry_for(&config.telemetry, cli.verbose))?;

    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid configuration")?;

    let app = App::new(&config, cli.json)?;

    match app.run(cli.command).await {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            if let Some(app_error) = e.downcast_ref::<ApplicationError>() {
                debug!(error = %app_error, "Command failed");
                eprintln!("{}", output::error_alert(app_error));
            } else {
                eprintln!("Error: {e:#}");
            }
            Ok(ExitCode::FAILURE)
        },
    }
}
