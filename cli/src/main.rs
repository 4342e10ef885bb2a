//! critline: command-line entry point for probing the critical line of the Riemann zeta function.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use critline_arith::{EulerMaclaurin, ZetaEvaluator};
use critline_oracle::{
    CandidateOptions, CandidateStatus, OracleConfig, OracleError, ScanRequest, ZeroOracle,
};
use critline_types::{
    Deviation, Precision, ScanMode, ScanOutcome, VerifiedSet, FRACTURE_THRESHOLD,
};
use critline_utils::{format_duration, init_logging, LogFormat};
use num_complex::Complex64;

#[derive(Parser)]
#[command(name = "critline", about = "Zero verification oracle for the Riemann zeta function")]
struct Cli {
    /// Primary file of verified zeros (one ordinate per line).
    #[arg(long, env = "CRITLINE_ZEROS")]
    zeros: Option<PathBuf>,

    /// Additional zero files (comma-separated). Missing files are skipped.
    #[arg(long, env = "CRITLINE_EXTRA_ZEROS", value_delimiter = ',')]
    extra: Vec<PathBuf>,

    /// Working precision in decimal digits.
    #[arg(long, env = "CRITLINE_PRECISION")]
    precision: Option<u32>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "CRITLINE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "CRITLINE_LOG_FORMAT")]
    log_format: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Evaluate zeta(0.5 + i·t) and classify the point.
    Evaluate {
        t: f64,

        /// Classification tolerance for |zeta|.
        #[arg(long)]
        epsilon: Option<f64>,
    },

    /// Walk a grid of ordinates and report deviations.
    Scan {
        /// First ordinate (defaults to the largest verified zero plus one step).
        #[arg(long, allow_hyphen_values = true)]
        start_t: Option<f64>,

        #[arg(long)]
        count: Option<usize>,

        #[arg(long)]
        step: Option<f64>,

        #[arg(long)]
        epsilon: Option<f64>,

        /// "verification" or "search" (defaults to the configured mode).
        #[arg(long, conflicts_with = "search")]
        mode: Option<ScanMode>,

        /// Shorthand for `--mode search`.
        #[arg(long)]
        search: bool,
    },

    /// Re-evaluate evenly spaced verified zeros as a self-check.
    Validate {
        #[arg(long)]
        sample_size: Option<usize>,
    },

    /// Locate the zero nearest a guessed ordinate.
    Refine { t: f64 },

    /// Locate the n-th zero on the critical line (1-based).
    Zero { n: u64 },

    /// Confirm a file of candidate zeros ("value" or "index value" per line).
    #[command(name = "check-candidates")]
    CheckCandidates {
        file: PathBuf,

        /// Maximum allowed |located - candidate|.
        #[arg(long)]
        tolerance: Option<f64>,

        /// Skip indexed candidates below this index.
        #[arg(long)]
        start_index: Option<u64>,
    },

    /// Load, validate, then run a verification scan and a search scan past the verified set.
    Survey,
}

impl Command {
    /// Whether the subcommand reads the verified zero sources.
    fn needs_verified_set(&self) -> bool {
        matches!(self, Self::Scan { .. } | Self::Validate { .. } | Self::Survey)
    }
}

/// Sample size used by `survey`.
const SURVEY_SAMPLE_SIZE: usize = 50;

/// Tail of the verified set used to estimate zero spacing for `survey`.
const SURVEY_SPACING_WINDOW: usize = 1000;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let (file_config, config_error) = match cli.config.as_deref().map(OracleConfig::from_toml_file) {
        Some(Ok(cfg)) => (Some(cfg), None),
        Some(Err(e)) => (None, Some(e)),
        None => (None, None),
    };
    let config = merge_config(&cli, file_config)?;

    let log_format = config.log_format.parse::<LogFormat>().unwrap_or_default();
    init_logging(log_format, &config.log_level);
    if let Some(path) = &cli.config {
        match config_error {
            Some(e) => tracing::warn!("Failed to load config file: {e}, using CLI defaults"),
            None => tracing::info!("Loaded config from {}", path.display()),
        }
    }

    let started = Instant::now();
    let oracle = if cli.command.needs_verified_set() {
        let (oracle, _) = ZeroOracle::load(&config.sources())
            .with_context(|| format!("loading verified zeros from {}", config.zeros.display()))?;
        oracle
    } else {
        ZeroOracle::new(VerifiedSet::default(), EulerMaclaurin)
    };
    let mut oracle = oracle.with_precision(config.precision);
    tracing::debug!(
        "evaluator {} at {} ({} bits)",
        oracle.evaluator().name(),
        config.precision,
        config.precision.bits()
    );

    let code = match cli.command {
        Command::Evaluate { t, epsilon } => {
            let zeta = oracle.evaluate(t, config.precision)?;
            let class = oracle.classify(zeta, epsilon.unwrap_or(config.epsilon));
            println!("zeta(0.5 + {t}i) = {}", format_complex(zeta));
            println!("|zeta| = {:.6e}", class.magnitude);
            println!(
                "{}",
                if class.on_critical_line {
                    "on critical line"
                } else {
                    "not a zero"
                }
            );
            ExitCode::SUCCESS
        }
        Command::Scan {
            start_t,
            count,
            step,
            epsilon,
            mode,
            search,
        } => {
            let mut request = config.scan_request();
            if let Some(t) = start_t {
                request = request.starting_at(t);
            }
            if let Some(count) = count {
                request = request.count(count);
            }
            if let Some(step) = step {
                request = request.step(step);
            }
            if let Some(epsilon) = epsilon {
                request = request.epsilon(epsilon);
            }
            if let Some(mode) = mode {
                request = request.mode(mode);
            }
            if search {
                request = request.mode(ScanMode::Search);
            }
            let outcome = oracle.scan(&request)?;
            print_outcome(request.mode, &outcome);
            ExitCode::SUCCESS
        }
        Command::Validate { sample_size } => {
            let report = oracle.sample_report(sample_size.unwrap_or(config.sample_size))?;
            if report.passed() {
                println!("validated {} of {} sampled zeros", report.sampled, report.sampled);
                ExitCode::SUCCESS
            } else {
                println!(
                    "{} of {} sampled zeros failed",
                    report.failures.len(),
                    report.sampled
                );
                for failure in report.examples() {
                    println!("  t = {:.6}  |zeta| = {:.2e}", failure.t, failure.magnitude);
                }
                ExitCode::FAILURE
            }
        }
        Command::Refine { t } => {
            let zero = oracle.refine_zero(t)?;
            println!("t         = {:.15}", zero.t);
            println!("sigma     = {:.15}", zero.sigma);
            println!("|zeta|    = {:.3e}", zero.residual);
            println!("iterations: {}", zero.iterations);
            ExitCode::SUCCESS
        }
        Command::Zero { n } => {
            let zero = oracle.zero_by_index(n)?;
            println!("zero #{n}");
            println!("t         = {:.15}", zero.t);
            println!("sigma     = {:.15}", zero.sigma);
            println!("|zeta|    = {:.3e}", zero.residual);
            ExitCode::SUCCESS
        }
        Command::CheckCandidates {
            file,
            tolerance,
            start_index,
        } => {
            let defaults = config.candidate_options();
            let options = CandidateOptions {
                tolerance: tolerance.unwrap_or(defaults.tolerance),
                start_index: start_index.unwrap_or(defaults.start_index),
            };
            run_candidates(&oracle, &file, options)?
        }
        Command::Survey => run_survey(&mut oracle, &config)?,
    };

    tracing::info!("finished in {}", format_duration(started.elapsed()));
    Ok(code)
}

/// Build the effective configuration: file (or defaults) overridden by flags and env.
fn merge_config(cli: &Cli, file_config: Option<OracleConfig>) -> anyhow::Result<OracleConfig> {
    let base = file_config.unwrap_or_default();
    let precision = match cli.precision {
        Some(digits) => Precision::new(digits)?,
        None => base.precision,
    };
    Ok(OracleConfig {
        zeros: cli.zeros.clone().unwrap_or(base.zeros),
        extra_zeros: if cli.extra.is_empty() {
            base.extra_zeros
        } else {
            cli.extra.clone()
        },
        precision,
        log_level: cli.log_level.clone().unwrap_or(base.log_level),
        log_format: cli.log_format.clone().unwrap_or(base.log_format),
        ..base
    })
}

fn run_candidates(
    oracle: &ZeroOracle,
    file: &Path,
    options: CandidateOptions,
) -> anyhow::Result<ExitCode> {
    let report = oracle
        .check_candidates(file, options)
        .with_context(|| format!("checking candidates in {}", file.display()))?;

    for check in report.failures() {
        match &check.status {
            CandidateStatus::Mismatch { difference } => println!(
                "line {}: {}{} located at {:.12} (off by {difference:.3e})",
                check.line,
                check.index.map(|i| format!("#{i} ")).unwrap_or_default(),
                check.candidate,
                check.located.map(|z| z.t).unwrap_or(f64::NAN)
            ),
            CandidateStatus::Unresolved(reason) => {
                println!("line {}: {} unresolved: {reason}", check.line, check.candidate)
            }
            CandidateStatus::Confirmed => {}
        }
    }
    println!(
        "{} of {} candidates confirmed ({} lines skipped, {} below index {})",
        report.confirmed(),
        report.checks.len(),
        report.skipped_lines,
        report.filtered,
        options.start_index
    );
    Ok(if report.all_confirmed() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn run_survey(oracle: &mut ZeroOracle, config: &OracleConfig) -> Result<ExitCode, OracleError> {
    let Some(max) = oracle.max_verified() else {
        println!("no verified zeros loaded; nothing to survey");
        return Ok(ExitCode::FAILURE);
    };
    println!("verified zeros: {}  (max t = {max:.6})", oracle.verified().len());

    let validation = oracle.sample_report(SURVEY_SAMPLE_SIZE)?;
    if validation.passed() {
        println!("oracle validation: passed ({} samples)", validation.sampled);
    } else {
        println!(
            "oracle validation: {} of {} samples failed",
            validation.failures.len(),
            validation.sampled
        );
    }

    let verification = ScanRequest::new()
        .count(100)
        .step(0.5)
        .epsilon(config.epsilon)
        .mode(ScanMode::Verification);
    let verified = oracle.scan(&verification)?;
    print_outcome(ScanMode::Verification, &verified);

    let mut search = ScanRequest::new()
        .count(50)
        .step(0.1)
        .epsilon(config.epsilon)
        .mode(ScanMode::Search);
    if let Some(spacing) = oracle.verified().mean_spacing(SURVEY_SPACING_WINDOW) {
        search = search.starting_at(max + 0.9 * spacing);
    }
    let found = oracle.scan(&search)?;
    print_outcome(ScanMode::Search, &found);

    println!();
    println!("summary");
    println!("  precision:          {}", oracle.precision());
    println!("  fracture threshold: {FRACTURE_THRESHOLD:.3}");
    println!("  validation:         {}", if validation.passed() { "passed" } else { "failed" });
    println!("  off-line points:    {}", verified.deviations.len());
    println!("  candidate zeros:    {}", found.deviations.len());
    Ok(ExitCode::SUCCESS)
}

fn print_outcome(mode: ScanMode, outcome: &ScanOutcome) {
    let label = match mode {
        ScanMode::Verification => "non-zero points",
        ScanMode::Search => "potential zeros",
    };
    println!(
        "{} scan: {} points checked, {} {label}{}",
        mode.as_str(),
        outcome.points_checked,
        outcome.deviations.len(),
        if outcome.is_fractured() {
            " (halted at fracture threshold)"
        } else {
            ""
        }
    );
    for deviation in &outcome.deviations {
        print_deviation(deviation);
    }
}

fn print_deviation(deviation: &Deviation) {
    println!(
        "  t = {:.6}  zeta = {}  |zeta| = {:.3e}",
        deviation.t,
        format_complex(deviation.zeta),
        deviation.magnitude
    );
}

fn format_complex(z: Complex64) -> String {
    let sign = if z.im.is_sign_negative() { '-' } else { '+' };
    format!("{:.15e} {sign} {:.15e}i", z.re, z.im.abs())
}
