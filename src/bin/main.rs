use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

use concept_weights::algorithm::OptimizationResult;
use concept_weights::algorithm::evaluation::evaluate;
use concept_weights::algorithm::optimize::optimize;
use concept_weights::algorithm::preferences::generate;
use concept_weights::algorithm::rsv::rank;
use concept_weights::config::{Band, Config, ConfigError, EPSILON, MAX_ITERATIONS, PivotRuleKind};
use concept_weights::data::retrieval::{DocumentId, DocumentTable, WeightVector, query_identifier};
use concept_weights::data::sorted::SortedList;
use concept_weights::io::error::{ImportError, InconsistencyError};
use concept_weights::io::export::{write_evaluation, write_preferences, write_rsv, write_weights};
use concept_weights::io::{
    import_documents, import_preferences, import_relevance, import_rsv, import_signs, import_weights,
};

/// Learn concept weights from relevance preferences, and rank and evaluate with them.
#[derive(Parser)]
#[command(name = "concept-weights", version)]
struct Cli {
    #[command(flatten)]
    options: Options,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Options {
    /// Lower bound multiplier, overrides the band
    #[arg(long, global = true)]
    c1: Option<f64>,
    /// Upper bound multiplier, overrides the band
    #[arg(long, global = true)]
    c2: Option<f64>,
    /// How far weights may move from their initial value
    #[arg(long, global = true, value_enum, default_value_t = BandArg::Wide)]
    band: BandArg,
    /// Tolerance for round-off and nearly equal scores
    #[arg(long, global = true, default_value_t = EPSILON)]
    epsilon: f64,
    /// Number of pivots after which to give up
    #[arg(long, global = true, default_value_t = MAX_ITERATIONS)]
    max_iterations: usize,
    /// Which column enters the basis
    #[arg(long, global = true, value_enum, default_value_t = PivotRuleArg::LargestCoefficient)]
    pivot_rule: PivotRuleArg,
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Optimize concept weights, writing them to stdout
    Optimize {
        /// Preference file
        preferences: PathBuf,
        /// Document and query file
        documents: PathBuf,
        /// Initial weight of each concept
        weights: PathBuf,
        /// Sign file, if documents are described by signs
        #[arg(long)]
        concepts: Option<PathBuf>,
    },
    /// Rank all documents against all queries
    Rsv {
        /// Document and query file
        documents: PathBuf,
        /// Weight of each concept
        weights: PathBuf,
        /// Sign file, if documents are described by signs
        #[arg(long)]
        concepts: Option<PathBuf>,
    },
    /// Derive preferences from a ranking and relevance judgments
    Preferences {
        /// Relevance judgments
        relevance: PathBuf,
        /// Ranking, grouped by query
        rsv: PathBuf,
        /// Only unsatisfied preferences of this query, satisfied ones of every query
        #[arg(long, allow_hyphen_values = true, value_parser = parse_query)]
        query: Option<DocumentId>,
    },
    /// Precision at fixed recall levels
    Evaluate {
        /// Relevance judgments
        relevance: PathBuf,
        /// Ranking, grouped by query
        rsv: PathBuf,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum BandArg {
    /// Halve to double
    Wide,
    /// Within 20 percent
    P20,
    /// Within 10 percent
    P10,
}

impl From<BandArg> for Band {
    fn from(band: BandArg) -> Self {
        match band {
            BandArg::Wide => Self::Wide,
            BandArg::P20 => Self::P20,
            BandArg::P10 => Self::P10,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum PivotRuleArg {
    /// Largest positive cost coefficient
    LargestCoefficient,
    /// First positive cost coefficient
    FirstProfitable,
}

impl From<PivotRuleArg> for PivotRuleKind {
    fn from(rule: PivotRuleArg) -> Self {
        match rule {
            PivotRuleArg::LargestCoefficient => Self::LargestCoefficient,
            PivotRuleArg::FirstProfitable => Self::FirstProfitable,
        }
    }
}

impl Options {
    fn config(&self) -> Result<Config, ConfigError> {
        let mut config = Config::with_band(self.band.into());
        if let Some(c1) = self.c1 {
            config.c1 = c1;
        }
        if let Some(c2) = self.c2 {
            config.c2 = c2;
        }
        config.epsilon = self.epsilon;
        config.max_iterations = self.max_iterations;
        config.pivot_rule = self.pivot_rule.into();

        config.validate()?;
        Ok(config)
    }

    fn filter(&self) -> EnvFilter {
        if self.quiet {
            return EnvFilter::new("error");
        }

        match self.verbose {
            0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    }
}

/// Anything that stops a command before it produced its output.
#[derive(Debug, Error)]
enum Failure {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Inconsistency(#[from] InconsistencyError),
    #[error("could not write output: {0}")]
    Output(#[from] io::Error),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    fmt()
        .with_env_filter(cli.options.filter())
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(code) => code,
        Err(failure) => {
            error!("{failure}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, Failure> {
    let config = cli.options.config()?;
    let mut out = BufWriter::new(io::stdout().lock());

    let code = match &cli.command {
        Command::Optimize { preferences, documents, weights, concepts } => {
            let preferences = import_preferences(preferences)?;
            let filter = preferences.iter()
                .flat_map(|preference| [preference.query, preference.less_relevant, preference.more_relevant])
                .collect::<SortedList<DocumentId>>();
            let documents = read_documents(documents, Some(&filter), concepts.as_deref())?;
            let weights = import_weights(weights)?;
            info!(preferences = preferences.len(), documents = documents.len(), concepts = weights.len(), "read input");

            match optimize(&preferences, &documents, &weights, &config)? {
                OptimizationResult::FiniteOptimum(optimized) => {
                    write_weights(&mut out, optimized.iter())?;
                    ExitCode::SUCCESS
                }
                OptimizationResult::Infeasible { column } => {
                    error!(column, "no feasible starting point");
                    ExitCode::from(2)
                }
                OptimizationResult::Unbounded { column } => {
                    error!(column, "objective is unbounded");
                    ExitCode::from(2)
                }
                OptimizationResult::IterationLimit { iterations } => {
                    error!(iterations, "iteration limit reached before the optimum");
                    ExitCode::from(3)
                }
            }
        }
        Command::Rsv { documents, weights, concepts } => {
            let documents = read_documents(documents, None, concepts.as_deref())?;
            let weights = import_weights(weights)?.into_iter().collect::<WeightVector>();
            write_rsv(&mut out, &rank(&documents, &weights)?)?;
            ExitCode::SUCCESS
        }
        Command::Preferences { relevance, rsv, query } => {
            let relevance = import_relevance(relevance)?;
            let values = import_rsv(rsv)?;
            let generated = generate(&relevance, &values, *query, &config)?;
            write_preferences(&mut out, &generated.preferences)?;
            ExitCode::SUCCESS
        }
        Command::Evaluate { relevance, rsv } => {
            let relevance = import_relevance(relevance)?;
            let values = import_rsv(rsv)?;
            write_evaluation(&mut out, &evaluate(&relevance, &values)?)?;
            ExitCode::SUCCESS
        }
    };

    out.flush()?;
    Ok(code)
}

fn parse_query(value: &str) -> Result<DocumentId, String> {
    let number = value.parse::<DocumentId>().map_err(|error| error.to_string())?;
    query_identifier(number).ok_or_else(|| format!("query number {number} is out of range"))
}

fn read_documents(
    path: &Path,
    filter: Option<&SortedList<DocumentId>>,
    concepts: Option<&Path>,
) -> Result<DocumentTable, ImportError> {
    let signs = concepts.map(import_signs).transpose()?;
    import_documents(path, filter, signs.as_ref())
}

#[cfg(test)]
mod test {
    use clap::Parser;

    use crate::{Cli, Command};

    fn query(argument: &str) -> Option<i64> {
        let cli = Cli::try_parse_from(["concept-weights", "preferences", "relevance", "rsv", "--query", argument]).ok()?;
        match cli.command {
            Command::Preferences { query, .. } => query,
            _ => None,
        }
    }

    #[test]
    fn query_is_negated() {
        assert_eq!(query("3"), Some(-3));
        assert_eq!(query("-3"), Some(-3));
        assert_eq!(query("-9223372036854775808"), None);
    }
}
