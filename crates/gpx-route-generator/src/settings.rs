use clap::Parser;
use gpx_route_lib::Config;
use gpx_route_lib::export::DEFAULT_CREATOR;
use std::path::PathBuf;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// GPX Route Generator - Turn hand-drawn routes into paced, timestamped GPX activities
pub struct Settings {
    /// JSON request files to process (`-` reads standard input)
    #[clap(value_name = "REQUEST", required = true)]
    pub requests: Vec<PathBuf>,

    /// Directory the generated GPX files are written to
    #[clap(
        short,
        long,
        value_name = "DIR",
        default_value = ".",
        env = "GPX_ROUTE_OUTPUT_DIR"
    )]
    pub output_dir: PathBuf,

    /// Target spacing between track points in meters
    #[clap(long, default_value = "5.0", env = "GPX_ROUTE_INTERVAL")]
    pub interval: f64,

    /// Elevation written on every track point in meters
    #[clap(long, default_value = "700.0", env = "GPX_ROUTE_ELEVATION")]
    pub elevation: f64,

    /// Start time of the first lap as RFC 3339 (defaults to now)
    #[clap(long, value_parser = parse_rfc3339)]
    pub start: Option<OffsetDateTime>,

    /// Creator attribute of the generated GPX documents
    #[clap(long, default_value = DEFAULT_CREATOR)]
    pub creator: String,
}

impl Settings {
    /// Parse settings from the command line, exiting with usage on error
    pub fn from_cli() -> Self {
        match Settings::try_parse() {
            Ok(settings) => settings,
            Err(e) => e.exit(),
        }
    }

    /// Synthesizer configuration
    pub fn config(&self) -> Config {
        Config {
            target_interval_m: self.interval,
            elevation_m: self.elevation,
        }
    }
}

fn parse_rfc3339(s: &str) -> Result<OffsetDateTime, String> {
    OffsetDateTime::parse(s, &Rfc3339).map_err(|e| format!("invalid RFC 3339 time: {e}"))
}
