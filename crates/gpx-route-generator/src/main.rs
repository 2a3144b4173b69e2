mod generate;
mod metadata;
mod settings;

use generate::Job;
use gpx_route_lib::TrackSynthesizer;
use settings::Settings;
use std::process::ExitCode;
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Setup logging, stdout is reserved for the written file paths
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    metadata::log_version_info();
    let settings = Settings::from_cli();

    let generated_at = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    let synthesizer = TrackSynthesizer::new(settings.config());
    let job = Job {
        synthesizer: &synthesizer,
        output_dir: &settings.output_dir,
        creator: &settings.creator,
        start_time: settings.start.unwrap_or(generated_at),
        generated_at,
    };

    let mut client_errors = 0;
    let mut failures = 0;
    for (source, result) in settings.requests.iter().zip(job.run_all(&settings.requests)) {
        match result {
            Ok(generated) => {
                tracing::info!(
                    "{}: {} laps, {} points, {:.2} km, {:.0} s -> {}",
                    source.display(),
                    generated.laps,
                    generated.points,
                    generated.distance_meters / 1000.0,
                    generated.duration_seconds,
                    generated.path.display()
                );
                println!("{}", generated.path.display());
            }
            Err(e) => {
                tracing::error!("Error generating GPX from {}: {e}", source.display());
                match serde_json::to_string(&e.body()) {
                    Ok(body) => eprintln!("{body}"),
                    Err(json_err) => tracing::error!("Failed to encode error body: {json_err}"),
                }
                if e.status_code() == 400 {
                    client_errors += 1;
                } else {
                    failures += 1;
                }
            }
        }
    }

    if failures > 0 {
        ExitCode::FAILURE
    } else if client_errors > 0 {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}
