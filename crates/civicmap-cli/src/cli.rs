use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Civicmap - proximity search over civic issue reports
#[derive(Parser, Debug)]
#[command(name = "civicmap")]
#[command(about = "Distance-ranked search over geolocated civic reports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// TOML file with search settings (default_page_size, max_page_size)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find the reports nearest to a point
    Nearby(NearbyArgs),
}

#[derive(Parser, Debug)]
pub struct NearbyArgs {
    /// GeoJSON file of Point features
    #[arg(long)]
    pub data: PathBuf,

    /// Latitude of the search origin
    #[arg(long, allow_negative_numbers = true)]
    pub lat: f64,

    /// Longitude of the search origin
    #[arg(long, allow_negative_numbers = true)]
    pub lng: f64,

    /// Results per page (defaults to the configured page size)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Continue after the token printed by a previous page
    #[arg(long)]
    pub resume: Option<String>,

    /// Follow resume tokens until every matching report is listed
    #[arg(long)]
    pub all: bool,

    /// Only reports in this category
    #[arg(long)]
    pub category_id: Option<u64>,

    /// Only reports in this territory
    #[arg(long)]
    pub territory_id: Option<u64>,

    /// Override the maximum page size
    #[arg(long)]
    pub max_page_size: Option<usize>,
}
