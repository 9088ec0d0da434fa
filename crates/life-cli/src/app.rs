//! Settings resolution and the load, run, time, save sequence.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use life_engine::{BoundaryPolicy, LifeEngine, RunSummary};
use life_grid::Grid;
use rand::Rng;
use tracing::{info, warn};

use crate::args::{Cli, Positionals, Shape};
use crate::config::LifeConfig;
use crate::error::CliError;

/// Where the initial generation comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum GridSource {
    /// Load an NPY file.
    File(PathBuf),
    /// Generate a seeded random grid.
    Random {
        /// Grid dimensions.
        shape: Shape,
        /// Generator seed.
        seed: u64,
        /// Live-cell probability.
        density: f64,
    },
}

/// Fully resolved run parameters: CLI over config over defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Generations to compute.
    pub iterations: u64,
    /// Initial grid source.
    pub source: GridSource,
    /// Destination of the final grid, if it is to be saved.
    pub output: Option<PathBuf>,
    /// Edge handling for neighbor counts.
    pub boundary: BoundaryPolicy,
    /// Print the initial and final grids.
    pub dump: bool,
}

impl Settings {
    /// Merge parsed arguments with the loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Usage`] for invalid positional arguments or a
    /// configured iteration count of zero.
    pub fn resolve(cli: &Cli, config: &LifeConfig) -> Result<Self, CliError> {
        let positionals = Positionals::resolve(&cli.positionals)?;

        let iterations = positionals
            .iterations
            .unwrap_or(config.simulation.iterations);
        if iterations == 0 {
            return Err(CliError::usage(
                "must specify a positive number of iterations",
            ));
        }

        let source = match cli.random {
            Some(shape) => GridSource::Random {
                shape,
                seed: cli
                    .seed
                    .or(config.random.seed)
                    .unwrap_or_else(|| rand::rng().random()),
                density: cli.density.unwrap_or(config.random.density),
            },
            None => GridSource::File(
                positionals
                    .input
                    .unwrap_or_else(|| config.paths.input.clone()),
            ),
        };

        let save = config.simulation.save && !cli.no_save;
        let output = save.then(|| {
            positionals
                .output
                .unwrap_or_else(|| config.paths.output.clone())
        });

        Ok(Self {
            iterations,
            source,
            output,
            boundary: cli.boundary.unwrap_or(config.simulation.boundary),
            dump: cli.dump || config.simulation.dump,
        })
    }
}

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Engine summary.
    pub summary: RunSummary,
    /// Wall-clock time of the iteration loop.
    pub elapsed: Duration,
    /// Where the final grid was written, if anywhere.
    pub saved_to: Option<PathBuf>,
}

/// Load or generate the initial grid, run it, print the timing line, and
/// save the result.
///
/// Timing, and the dumps when requested, go to `out`.
///
/// # Errors
///
/// Returns [`CliError::Grid`] for load, conversion, or save failures,
/// [`CliError::OutputDir`] if the output directory cannot be created, and
/// [`CliError::Stdout`] if writing to `out` fails.
pub fn execute<W: Write>(settings: &Settings, out: &mut W) -> Result<Report, CliError> {
    let initial = initial_grid(&settings.source)?;
    if settings.dump {
        write!(out, "{initial}").map_err(|source| CliError::Stdout { source })?;
    }

    let mut engine = LifeEngine::new(initial, settings.boundary);
    let start = Instant::now();
    let summary = engine.run(settings.iterations);
    let elapsed = start.elapsed();

    writeln!(out, "Time: {} secs", elapsed.as_secs_f64())
        .map_err(|source| CliError::Stdout { source })?;

    let grid = engine.into_grid();
    if settings.dump {
        write!(out, "{grid}").map_err(|source| CliError::Stdout { source })?;
    }

    let saved_to = match &settings.output {
        Some(path) => {
            save(path, &grid)?;
            Some(path.clone())
        }
        None => None,
    };

    Ok(Report {
        summary,
        elapsed,
        saved_to,
    })
}

fn initial_grid(source: &GridSource) -> Result<Grid, CliError> {
    match source {
        GridSource::File(path) => {
            // The mapping is released as soon as the heap copy exists.
            let mapped = life_grid::load(path)?;
            Ok(mapped.to_grid()?)
        }
        GridSource::Random {
            shape,
            seed,
            density,
        } => {
            info!(%shape, seed, density, "Generating random grid");
            Ok(Grid::random(shape.rows, shape.cols, *seed, *density)?)
        }
    }
}

fn save(path: &Path, grid: &Grid) -> Result<(), CliError> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| CliError::OutputDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    life_grid::save(path, grid).inspect_err(|e| {
        warn!(path = %path.display(), error = %e, "Saving final grid failed");
    })?;
    info!(path = %path.display(), "Final grid saved");
    Ok(())
}
