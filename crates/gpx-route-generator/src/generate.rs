//! Request processing: read a request, synthesize, write the GPX file

use gpx_route_lib::request::{ErrorBody, RouteRequest};
use gpx_route_lib::{RouteError, TrackSynthesizer, export};
use rayon::prelude::*;
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

/// Give up on unique file names after this many collisions
const MAX_NAME_ATTEMPTS: u32 = 1000;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Malformed request: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Route(#[from] RouteError),
}

impl CliError {
    /// Transport status for this failure: 400 for missing or insufficient points,
    /// 500 for anything else
    pub fn status_code(&self) -> u16 {
        match self {
            CliError::Route(e) => e.status_code(),
            CliError::Json(_) | CliError::Io(_) => 500,
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            CliError::Route(e) => ErrorBody::from(e),
            _ => ErrorBody {
                error: self.to_string(),
            },
        }
    }
}

/// Shared inputs of one batch run
pub struct Job<'a> {
    pub synthesizer: &'a TrackSynthesizer,
    pub output_dir: &'a Path,
    pub creator: &'a str,
    pub start_time: OffsetDateTime,
    pub generated_at: OffsetDateTime,
}

/// Summary of a written track
#[derive(Debug)]
pub struct Generated {
    pub path: PathBuf,
    pub laps: usize,
    pub points: usize,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl Job<'_> {
    /// Process every request independently, in parallel
    ///
    /// Results come back in the order of `sources`.
    pub fn run_all(&self, sources: &[PathBuf]) -> Vec<Result<Generated, CliError>> {
        sources.par_iter().map(|source| self.run(source)).collect()
    }

    /// Process a single request file (`-` for stdin)
    pub fn run(&self, source: &Path) -> Result<Generated, CliError> {
        profiling::scope!("generate::run");

        let request: RouteRequest = serde_json::from_str(&read_source(source)?)?;
        let points = request.validate()?;
        let activity = request.activity()?;

        let track = self
            .synthesizer
            .synthesize(points, &activity, self.start_time)?;

        let name = export::suggested_filename(&track.activity_type, self.generated_at)?;
        let (path, file) = create_unique(self.output_dir, &sanitize_file_name(&name))?;

        let mut writer = BufWriter::new(file);
        export::write_gpx(&track, self.creator, &mut writer)?;
        writer.flush()?;

        Ok(Generated {
            path,
            laps: track.segments.len(),
            points: track.total_points(),
            distance_meters: track.total_distance(),
            duration_seconds: track.total_duration(),
        })
    }
}

fn read_source(source: &Path) -> io::Result<String> {
    let mut contents = String::new();
    if source == Path::new("-") {
        io::stdin().read_to_string(&mut contents)?;
    } else {
        File::open(source)?.read_to_string(&mut contents)?;
    }
    Ok(contents)
}

/// Activity labels are free text, keep them from escaping the output directory
fn sanitize_file_name(name: &str) -> String {
    name.replace(['/', '\\'], "_")
}

/// Create `dir/name`, or `dir/{stem}_{n}.gpx` if that is taken
fn create_unique(dir: &Path, name: &str) -> io::Result<(PathBuf, File)> {
    let stem = name.strip_suffix(".gpx").unwrap_or(name);

    for attempt in 0..MAX_NAME_ATTEMPTS {
        let candidate = if attempt == 0 {
            dir.join(name)
        } else {
            dir.join(format!("{stem}_{attempt}.gpx"))
        };

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&candidate)
        {
            Ok(file) => return Ok((candidate, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e),
        }
    }

    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free file name for {name} in {}", dir.display()),
    ))
}
