use std::{env, path::Path};

use log::LevelFilter;
use tsp_vis_derive::{CliOptions, CliValue, KvDisplay};

use crate::{
    Bounds, Error, Result,
    algo::{Algorithm, AlgorithmSettings, TwoOptAcceptance, TwoOptConfig},
    solver::SolverConfig,
};

pub const MAX_POINTS: usize = 1_000;
pub const MAX_PACING_MS: i64 = 1_000;

/// Runtime options for the headless visualizer.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct VisOptions {
    /// Number of points to generate (1..=1000).
    #[cli(long = "points", value = "<usize>")]
    pub points: usize,
    /// Algorithm to run.
    #[cli(long = "algorithm", value = "<name>", parse_with = "Algorithm::parse")]
    pub algorithm: Algorithm,
    /// Delay between visible algorithm steps in milliseconds (0..=1000).
    #[cli(long = "pacing-ms", value = "<i64>")]
    pub pacing_ms: i64,
    /// Left edge of the sampling area.
    #[cli(long = "x-min", value = "<f64>")]
    pub x_min: f64,
    /// Right edge of the sampling area.
    #[cli(long = "x-max", value = "<f64>")]
    pub x_max: f64,
    /// Bottom edge of the sampling area.
    #[cli(long = "y-min", value = "<f64>")]
    pub y_min: f64,
    /// Top edge of the sampling area.
    #[cli(long = "y-max", value = "<f64>")]
    pub y_max: f64,
    /// Random seed; 0 draws one from the OS.
    #[cli(long = "seed", value = "<u64>")]
    pub seed: u64,
    /// Start the greedy construction at a random point.
    #[cli(long = "random-start", flag)]
    pub random_start: bool,
    /// When a 2-opt exchange counts as an improvement.
    #[cli(
        long = "two-opt-acceptance",
        value = "<truncated|epsilon>",
        parse_with = "TwoOptAcceptance::parse"
    )]
    pub two_opt_acceptance: TwoOptAcceptance,
    /// Tolerance used by the epsilon acceptance policy.
    #[cli(long = "two-opt-epsilon", value = "<f64>")]
    pub two_opt_epsilon: f64,
    /// How often progress is logged while solving, in milliseconds.
    #[cli(long = "progress-ms", value = "<u64>")]
    pub progress_ms: u64,
    /// Structured logging level.
    #[cli(
        long = "log-level",
        value = "<error|warn|info|debug|trace|off>",
        parse_with = "LogLevel::parse"
    )]
    pub log_level: LogLevel,
    /// Logging output format.
    #[cli(long = "log-format", value = "<compact|pretty>", parse_with = "LogFormat::parse")]
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    #[cli(long = "log-timestamp", flag)]
    pub log_timestamp: bool,
    /// Log file path. Empty or '-' means stderr.
    #[cli(long = "log-output", value = "<path>")]
    pub log_output: String,
    /// Route output path. Empty or '-' means stdout.
    #[cli(long = "output", value = "<path>")]
    pub output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-level")]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-format")]
pub enum LogFormat {
    Compact,
    Pretty,
}

impl Default for VisOptions {
    fn default() -> Self {
        let bounds = Bounds::default();
        let two_opt = TwoOptConfig::default();
        Self {
            points: 100,
            algorithm: Algorithm::default(),
            pacing_ms: 0,
            x_min: bounds.x_min(),
            x_max: bounds.x_max(),
            y_min: bounds.y_min(),
            y_max: bounds.y_max(),
            seed: 0,
            random_start: false,
            two_opt_acceptance: two_opt.acceptance,
            two_opt_epsilon: two_opt.epsilon,
            progress_ms: 250,
            log_level: LogLevel::Info,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
            output: String::new(),
        }
    }
}

impl VisOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::invalid_input(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = Self::split_arg(raw_name, &mut args);
            if !options.apply_cli_option(&name, value)? {
                return Err(Error::invalid_input(format!(
                    "Unknown option: --{name}\n\n{}",
                    Self::usage()
                )));
            }
        }

        options.validate()?;
        Ok(options)
    }

    fn validate(&self) -> Result<()> {
        if !(1..=MAX_POINTS).contains(&self.points) {
            return Err(Error::invalid_input(format!(
                "--points must be within 1..={MAX_POINTS}, got {}",
                self.points
            )));
        }
        if !(0..=MAX_PACING_MS).contains(&self.pacing_ms) {
            return Err(Error::invalid_input(format!(
                "--pacing-ms must be within 0..={MAX_PACING_MS}, got {}",
                self.pacing_ms
            )));
        }
        if !self.two_opt_epsilon.is_finite() || self.two_opt_epsilon < 0.0 {
            return Err(Error::invalid_input(format!(
                "--two-opt-epsilon must be a non-negative number, got {}",
                self.two_opt_epsilon
            )));
        }
        if self.progress_ms == 0 {
            return Err(Error::invalid_input("--progress-ms must be at least 1"));
        }
        self.bounds().map(|_| ())
    }

    pub fn usage() -> String {
        let mut usage = String::from(concat!(
            "Usage:\n",
            "  tsp-vis [options]\n\n",
            "Options:\n",
        ));
        for line in Self::cli_usage_lines() {
            usage.push_str(line);
            usage.push('\n');
        }
        usage.push_str(concat!(
            "  --help\n",
            "\n",
            "Examples:\n",
            "  tsp-vis --points 200 --algorithm nearest-neighbor --output route.txt\n",
            "  tsp-vis --algorithm=two-opt --pacing-ms=5 --log-level=debug\n",
            "  tsp-vis --seed 7 --random-start --two-opt-acceptance epsilon\n",
        ));
        usage
    }

    pub fn bounds(&self) -> Result<Bounds> {
        Bounds::new(self.x_min, self.x_max, self.y_min, self.y_max)
    }

    pub fn algorithm_settings(&self) -> AlgorithmSettings {
        AlgorithmSettings {
            random_start: self.random_start,
            two_opt: TwoOptConfig {
                acceptance: self.two_opt_acceptance,
                epsilon: self.two_opt_epsilon,
            },
        }
    }

    pub fn solver_config(&self) -> Result<SolverConfig> {
        Ok(SolverConfig {
            bounds: self.bounds()?,
            algorithm: self.algorithm,
            pacing_ms: self.pacing_ms.max(0).unsigned_abs(),
            seed: self.seed,
            settings: self.algorithm_settings(),
        })
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        non_dash_path(&self.log_output)
    }

    pub fn output_path(&self) -> Option<&Path> {
        non_dash_path(&self.output)
    }
}

fn non_dash_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}
