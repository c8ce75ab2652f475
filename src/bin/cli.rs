//! Launch Dashboard CLI
//!
//! Command-line access to the same queries the dashboard runs:
//! - List launch sites
//! - Success/failure counts
//! - Payload scatter points
//! - Page layout
//! - Default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use launch_dash::aggregation::{compute_outcome_summary, compute_scatter_points, PayloadPoint};
use launch_dash::config::{generate_default_config, Config};
use launch_dash::dashboard::DashboardLayout;
use launch_dash::dataset::{Dataset, PayloadRange};
use launch_dash::selection::SiteSelector;

#[derive(Parser)]
#[command(name = "launch-dash-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Query the SpaceX launch records behind the dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Launch CSV (default: from config)
    #[arg(short, long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(
        short,
        long,
        default_value = "table",
        value_parser = ["table", "json"],
        global = true
    )]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List launch sites with their launch counts
    Sites,

    /// Success/failure counts
    Summary {
        /// Site identifier (default: all sites)
        #[arg(short, long, default_value = "ALL")]
        site: String,
    },

    /// Launches within a payload interval
    Points {
        /// Site identifier (default: all sites)
        #[arg(short, long, default_value = "ALL")]
        site: String,
        /// Lower payload bound in kg (default: dataset minimum)
        #[arg(long)]
        low: Option<f64>,
        /// Upper payload bound in kg (default: dataset maximum)
        #[arg(long)]
        high: Option<f64>,
    },

    /// Print the dashboard layout as JSON
    Layout,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let config = generate_default_config();
        match output {
            Some(path) => {
                // Create parent directory if needed
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, &config)?;
                println!("Config written to {:?}", path);
            }
            None => {
                print!("{}", config);
            }
        }
        return Ok(());
    }

    let (config, _) = Config::load_default().context("Failed to load configuration")?;
    let path = cli.dataset.clone().unwrap_or_else(|| config.dataset.path.clone());
    let dataset = Dataset::load(&path, &config.dataset.loader())
        .with_context(|| format!("Failed to load {:?}", path))?;
    // clap has already rejected anything but table or json
    let json = cli.format == "json";

    match cli.command {
        Commands::Sites => {
            let rows: Vec<(String, usize, usize)> = dataset
                .sites()
                .iter()
                .map(|site| {
                    let summary =
                        compute_outcome_summary(dataset.records(), &SiteSelector::site(site));
                    (site.clone(), summary.success_count, summary.failure_count)
                })
                .collect();

            if json {
                let value: Vec<serde_json::Value> = rows
                    .iter()
                    .map(|(site, success, failure)| {
                        serde_json::json!({
                            "site": site,
                            "success_count": success,
                            "failure_count": failure,
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{:<16} {:>8} {:>8} {:>8}", "Site", "Launches", "Success", "Failure");
                println!("{}", "-".repeat(44));
                for (site, success, failure) in rows {
                    println!(
                        "{:<16} {:>8} {:>8} {:>8}",
                        site,
                        success + failure,
                        success,
                        failure
                    );
                }
            }
        }

        Commands::Summary { site } => {
            let selector = SiteSelector::from(site);
            let summary = compute_outcome_summary(dataset.records(), &selector);

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&serde_json::json!({
                        "site": selector,
                        "summary": summary,
                        "success_rate": summary.success_rate(),
                    }))?
                );
            } else {
                println!("Site:      {}", selector);
                println!("Launches:  {}", summary.total());
                println!("Successes: {}", summary.success_count);
                println!("Failures:  {}", summary.failure_count);
                match summary.success_rate() {
                    Some(rate) => println!("Success rate: {:.1}%", rate * 100.0),
                    None => println!("Success rate: -"),
                }
            }
        }

        Commands::Points { site, low, high } => {
            let bounds = dataset.payload_bounds();
            let range = PayloadRange::new(low.unwrap_or(bounds.low), high.unwrap_or(bounds.high));
            let points =
                compute_scatter_points(dataset.records(), &SiteSelector::from(site), range);

            if json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                print_points(&points, range);
            }
        }

        Commands::Layout => {
            let layout = DashboardLayout::build(&dataset, &config.dashboard);
            println!("{}", serde_json::to_string_pretty(&layout)?);
        }

        Commands::Config { .. } => {}
    }

    Ok(())
}

fn print_points(points: &[PayloadPoint], range: PayloadRange) {
    if points.is_empty() {
        println!("No launches in {}", range);
        return;
    }

    println!(
        "{:<8} {:<16} {:>12} {:<8} {}",
        "Flight", "Site", "Payload", "Class", "Booster"
    );
    println!("{}", "-".repeat(56));

    for point in points {
        println!(
            "{:<8} {:<16} {:>12.1} {:<8} {}",
            point
                .flight_number
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            point.site,
            point.payload_mass_kg,
            point.outcome.class(),
            point.booster_category.as_deref().unwrap_or("-")
        );
    }
    println!();
    println!("{} launches in {}", points.len(), range);
}
