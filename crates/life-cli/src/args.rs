//! Command-line surface.
//!
//! Positional arguments follow the reference driver:
//!
//! ```text
//! life                                  3 iterations, default paths
//! life <iterations>                     default paths
//! life <input> <output>                 3 iterations
//! life <iterations> <input> <output>
//! ```
//!
//! Clap collects the positionals and flags; [`Positionals::resolve`] applies
//! the arity rules so that every usage error exits with code 1.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use life_engine::BoundaryPolicy;

use crate::error::CliError;

/// Most positional arguments accepted.
const MAX_POSITIONALS: usize = 3;

/// Simulate Conway's Game of Life on an NPY grid.
#[derive(Debug, Parser)]
#[command(name = "life", version, about = "Simulate Conway's Game of Life on an NPY grid")]
pub struct Cli {
    /// `[ITERATIONS]`, `<INPUT> <OUTPUT>`, or `<ITERATIONS> <INPUT> <OUTPUT>`.
    #[arg(value_name = "ARGS", allow_negative_numbers = true)]
    pub positionals: Vec<String>,

    /// YAML configuration file (default: `life-config.yaml` if present).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Edge handling for neighbor counts: linear, clamped, or wrapped.
    #[arg(long, value_name = "POLICY")]
    pub boundary: Option<BoundaryPolicy>,

    /// Print the initial and final grids.
    #[arg(long)]
    pub dump: bool,

    /// Generate a random `ROWSxCOLS` grid instead of loading the input file.
    #[arg(long, value_name = "ROWSxCOLS")]
    pub random: Option<Shape>,

    /// Seed for `--random`.
    #[arg(long, requires = "random")]
    pub seed: Option<u64>,

    /// Live-cell probability for `--random`, in `[0, 1]`.
    #[arg(long, requires = "random")]
    pub density: Option<f64>,

    /// Skip writing the final grid.
    #[arg(long)]
    pub no_save: bool,
}

/// Iteration count and paths taken from positional arguments. `None` means
/// "use the configured value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Positionals {
    /// Generations to compute.
    pub iterations: Option<u64>,
    /// Grid to load.
    pub input: Option<PathBuf>,
    /// Where to write the result.
    pub output: Option<PathBuf>,
}

impl Positionals {
    /// Interpret raw positional arguments by count.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Usage`] for more than three arguments or an
    /// iteration count that is not a positive integer.
    pub fn resolve(args: &[String]) -> Result<Self, CliError> {
        match args {
            [] => Ok(Self::default()),
            [iterations] => Ok(Self {
                iterations: Some(parse_iterations(iterations)?),
                ..Self::default()
            }),
            [input, output] => Ok(Self {
                iterations: None,
                input: Some(PathBuf::from(input)),
                output: Some(PathBuf::from(output)),
            }),
            [iterations, input, output] => Ok(Self {
                iterations: Some(parse_iterations(iterations)?),
                input: Some(PathBuf::from(input)),
                output: Some(PathBuf::from(output)),
            }),
            _ => Err(CliError::usage(format!(
                "wrong number of arguments: expected at most {MAX_POSITIONALS}, got {}",
                args.len()
            ))),
        }
    }
}

fn parse_iterations(raw: &str) -> Result<u64, CliError> {
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CliError::usage(format!(
            "must specify a positive number of iterations, got {raw:?}"
        ))),
    }
}

/// Grid dimensions given as `ROWSxCOLS`, or `N` for a square grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub cols: usize,
}

/// Error from parsing a [`Shape`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid grid shape {0:?}: expected ROWSxCOLS or N")]
pub struct ParseShapeError(String);

impl FromStr for Shape {
    type Err = ParseShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseShapeError(s.to_owned());
        let dim = |d: &str| d.trim().parse::<usize>().map_err(|_err| err());
        match s.split_once(['x', 'X']) {
            Some((rows, cols)) => Ok(Self {
                rows: dim(rows)?,
                cols: dim(cols)?,
            }),
            None => {
                let n = dim(s)?;
                Ok(Self { rows: n, cols: n })
            }
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn no_arguments_use_defaults() {
        assert_eq!(Positionals::resolve(&[]).unwrap(), Positionals::default());
    }

    #[test]
    fn one_argument_is_iterations() {
        let p = Positionals::resolve(&strings(&["25"])).unwrap();
        assert_eq!(p.iterations, Some(25));
        assert_eq!(p.input, None);
    }

    #[test]
    fn two_arguments_are_paths() {
        let p = Positionals::resolve(&strings(&["in.npy", "out.npy"])).unwrap();
        assert_eq!(p.iterations, None);
        assert_eq!(p.input, Some(PathBuf::from("in.npy")));
        assert_eq!(p.output, Some(PathBuf::from("out.npy")));
    }

    #[test]
    fn three_arguments_are_everything() {
        let p = Positionals::resolve(&strings(&["7", "a.npy", "b.npy"])).unwrap();
        assert_eq!(p.iterations, Some(7));
        assert_eq!(p.output, Some(PathBuf::from("b.npy")));
    }

    #[test]
    fn four_arguments_are_a_usage_error() {
        let result = Positionals::resolve(&strings(&["1", "a", "b", "c"]));
        assert!(matches!(result, Err(CliError::Usage { .. })));
    }

    #[test]
    fn non_positive_iterations_are_usage_errors() {
        for bad in ["0", "-4", "ten", ""] {
            let result = Positionals::resolve(&strings(&[bad]));
            assert!(matches!(result, Err(CliError::Usage { .. })), "{bad:?}");
            let result = Positionals::resolve(&strings(&[bad, "a", "b"]));
            assert!(matches!(result, Err(CliError::Usage { .. })), "{bad:?}");
        }
    }

    #[test]
    fn clap_accepts_negative_positional() {
        let cli = Cli::try_parse_from(["life", "-3"]).unwrap();
        assert_eq!(cli.positionals, vec!["-3".to_owned()]);
    }

    #[test]
    fn clap_parses_flags() {
        let cli = Cli::try_parse_from([
            "life",
            "--boundary",
            "wrapped",
            "--random",
            "32x16",
            "--seed",
            "4",
            "--dump",
            "10",
        ])
        .unwrap();
        assert_eq!(cli.boundary, Some(BoundaryPolicy::Wrapped));
        assert_eq!(cli.random, Some(Shape { rows: 32, cols: 16 }));
        assert_eq!(cli.seed, Some(4));
        assert!(cli.dump);
        assert_eq!(cli.positionals, vec!["10".to_owned()]);
    }

    #[test]
    fn seed_requires_random() {
        assert!(Cli::try_parse_from(["life", "--seed", "1"]).is_err());
    }

    #[test]
    fn shape_parsing() {
        assert_eq!("8x4".parse::<Shape>(), Ok(Shape { rows: 8, cols: 4 }));
        assert_eq!("20".parse::<Shape>(), Ok(Shape { rows: 20, cols: 20 }));
        assert!("8x".parse::<Shape>().is_err());
        assert!("axb".parse::<Shape>().is_err());
        assert_eq!(Shape { rows: 3, cols: 5 }.to_string(), "3x5");
    }
}
