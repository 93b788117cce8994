//! River Poultry planner - budget wizard for poultry farmers.
//!
//! # Usage
//!
//! ```bash
//! # Start a layer budget and fill in the basics
//! river-poultry init --bird-type layer --currency UGX
//! river-poultry set birds 500
//! river-poultry set period 72
//! river-poultry next
//!
//! # Review the numbers
//! river-poultry status
//! river-poultry summary
//!
//! # Share the report
//! river-poultry set email farmer@example.com
//! river-poultry email
//!
//! # Size a house for 500 broilers
//! river-poultry house-space broilers 500
//! ```
//!
//! The form is kept in `PLANNER_DATA_DIR` between runs; see
//! [`river_poultry_planner::config`] for the other settings.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use river_poultry_core::{BirdType, CurrencyCode, FeedStage, HealthKind};
use river_poultry_planner::{PlannerConfig, PlannerError};
use rust_decimal::Decimal;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::Context;
use commands::form::{FeedModeArg, FormField};

#[derive(Parser)]
#[command(name = "river-poultry")]
#[command(author, version, about = "River Poultry budget planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new budget
    Init {
        /// Bird type (layer, broiler, dual-purpose-fast, dual-purpose-slow)
        #[arg(short, long)]
        bird_type: Option<BirdType>,

        /// Currency code, e.g. UGX
        #[arg(short, long)]
        currency: Option<CurrencyCode>,

        /// Replace a saved budget
        #[arg(long)]
        force: bool,
    },
    /// Show the saved form
    Show,
    /// Set a form field
    Set {
        field: FormField,
        value: String,
    },
    /// Choose how feed is sourced
    FeedMode { mode: FeedModeArg },
    /// Add a feed ingredient (ingredients mode)
    AddIngredient {
        name: String,
        /// Kilograms per ton of feed
        kg_per_ton: Decimal,
        /// Price per kilogram
        price_per_kg: Decimal,
    },
    /// Set a complete feed stage (complete mode)
    SetStage {
        /// prestarter, starter, grower or finisher
        stage: FeedStage,
        /// Kilograms per ton of feed
        kg_per_ton: Decimal,
        /// Price per kilogram
        price_per_kg: Decimal,
    },
    /// Add a vaccination
    AddVaccination {
        name: String,
        /// Age at administration, in days for broilers and weeks otherwise
        age: Decimal,
        cost: Decimal,
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// Add a drug treatment
    AddDrug {
        name: String,
        /// Age at administration, in days for broilers and weeks otherwise
        age: Decimal,
        cost: Decimal,
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// Add the recommended vaccination programme for the bird type
    RecommendVaccines,
    /// Set the cost of a vaccination or drug treatment
    SetCost { id: String, cost: Decimal },
    /// Remove an ingredient, vaccination or drug treatment
    Remove { id: String },
    /// Go to the next wizard step
    Next,
    /// Go to the previous wizard step
    Back,
    /// Show wizard progress
    Status,
    /// Print the budget summary
    Summary {
        /// Print the full paginated report instead
        #[arg(long)]
        document: bool,
    },
    /// Save the printable report
    Download,
    /// Email the report
    Email,
    /// Export the health schedule as an iCalendar file
    Calendar {
        /// Date the chicks arrive (YYYY-MM-DD)
        #[arg(short, long)]
        arrival: NaiveDate,

        /// Include drug treatments
        #[arg(long)]
        include_drugs: bool,
    },
    /// Work out the house floor area a flock needs
    HouseSpace {
        /// broilers, layers, sasso or kuroilers
        bird_type: BirdType,
        /// Number of birds
        birds: u64,
    },
    /// Show lead statistics or export leads
    Leads {
        /// Print leads as CSV
        #[arg(long)]
        csv: bool,

        /// Write the CSV to a file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Clear the form and start again
    Reset,
    /// Check the email relay
    CheckRelay,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "river_poultry_planner=warn,river_poultry=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), PlannerError> {
    let ctx = Context::new(PlannerConfig::from_env()?)?;

    match cli.command {
        Commands::Init {
            bird_type,
            currency,
            force,
        } => commands::form::init(&ctx, bird_type, currency, force)?,
        Commands::Show => commands::form::show(&ctx)?,
        Commands::Set { field, value } => commands::form::set(&ctx, field, &value)?,
        Commands::FeedMode { mode } => commands::form::feed_mode(&ctx, mode)?,
        Commands::AddIngredient {
            name,
            kg_per_ton,
            price_per_kg,
        } => commands::form::add_ingredient(&ctx, &name, kg_per_ton, price_per_kg)?,
        Commands::SetStage {
            stage,
            kg_per_ton,
            price_per_kg,
        } => commands::form::set_stage(&ctx, stage, kg_per_ton, price_per_kg)?,
        Commands::AddVaccination {
            name,
            age,
            cost,
            notes,
        } => commands::form::add_health(&ctx, HealthKind::Vaccination, &name, age, cost, &notes)?,
        Commands::AddDrug {
            name,
            age,
            cost,
            notes,
        } => commands::form::add_health(&ctx, HealthKind::Drug, &name, age, cost, &notes)?,
        Commands::RecommendVaccines => commands::form::recommend_vaccines(&ctx)?,
        Commands::SetCost { id, cost } => commands::form::set_cost(&ctx, &id, cost)?,
        Commands::Remove { id } => commands::form::remove(&ctx, &id)?,
        Commands::Next => commands::wizard::next(&ctx)?,
        Commands::Back => commands::wizard::back(&ctx)?,
        Commands::Status => commands::wizard::status(&ctx)?,
        Commands::Summary { document } => commands::report::summary(&ctx, document)?,
        Commands::Download => commands::report::download(&ctx).await?,
        Commands::Email => commands::report::email(&ctx).await?,
        Commands::Calendar {
            arrival,
            include_drugs,
        } => commands::report::calendar(&ctx, arrival, include_drugs).await?,
        Commands::HouseSpace { bird_type, birds } => {
            commands::housing::house_space(&ctx, bird_type, birds).await?;
        }
        Commands::Leads { csv, output } => {
            commands::leads::leads(&ctx, csv, output.as_deref())?;
        }
        Commands::Reset => commands::form::reset(&ctx)?,
        Commands::CheckRelay => commands::relay::check(&ctx).await?,
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_typed_arguments() {
        let cli = Cli::try_parse_from([
            "river-poultry",
            "set-stage",
            "grower",
            "400",
            "1.35",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Commands::SetStage { stage: FeedStage::Grower, .. }
        ));

        let cli = Cli::try_parse_from(["river-poultry", "init", "-b", "sasso", "-c", "kes"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Init {
                bird_type: Some(BirdType::DualPurposeFast),
                currency: Some(CurrencyCode::KES),
                force: false,
            }
        ));

        let cli = Cli::try_parse_from(["river-poultry", "house-space", "kuroilers", "250"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::HouseSpace {
                bird_type: BirdType::DualPurposeFast,
                birds: 250,
            }
        ));

        assert!(Cli::try_parse_from(["river-poultry", "set", "colour", "red"]).is_err());
    }
}
