//! Autocorrect command-line tool.
//!
//! Learns a frequency table from corpus files, keeps it in a state file, and
//! corrects text against it.
//!
//! ```text
//! autocorrect learn big.txt
//! autocorrect correct "Speling is hrad"
//! echo "teh end" | autocorrect correct
//! autocorrect summary
//! ```
//!
//! Logs go to stderr (`RUST_LOG`, or `--verbose`), so stdout only carries
//! corrected text and reports.

use autocorrect::{Config, Corpus, Corrector, FrequencyModel};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "autocorrect")]
#[command(about = "Learn word frequencies from text and correct misspellings")]
#[command(version)]
struct Args {
    /// Frequency table file (defaults to the configured state path)
    #[arg(short, long, global = true)]
    state: Option<PathBuf>,

    /// Minimum occurrences for a word to be a correction target
    #[arg(short, long, global = true, allow_negative_numbers = true)]
    threshold: Option<i64>,

    /// Deepest edit distance searched for candidates (0-2)
    #[arg(long, global = true)]
    max_edit_distance: Option<i32>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Learn a new model from corpus files, replacing the saved one
    Learn {
        /// Corpus files; `-` reads stdin
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Add corpus files to the saved model
    Update {
        /// Corpus files; `-` reads stdin
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Correct the given text, or every line of stdin
    Correct { text: Vec<String> },
    /// Show how a single word gets corrected
    Suggest { word: String },
    /// Print statistics about the saved model
    Summary,
    /// Show the effective configuration
    Config {
        /// Persist the effective configuration
        #[arg(long)]
        save: bool,
    },
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn read_corpus(files: &[PathBuf]) -> autocorrect::Result<Corpus> {
    let texts = files
        .iter()
        .map(|path| Corpus::read(path).map(Corpus::into_text))
        .collect::<autocorrect::Result<Vec<_>>>()?;
    Ok(Corpus::Tokens(texts))
}

fn open_model(config: &Config, state_path: &Path) -> Result<FrequencyModel, Box<dyn std::error::Error>> {
    if !state_path.exists() {
        return Err(format!(
            "no saved model at {}; run `autocorrect learn <FILES>` first",
            state_path.display()
        )
        .into());
    }
    Ok(FrequencyModel::from_file(config.min_threshold, state_path)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = Config::load()?;
    if let Some(threshold) = args.threshold {
        config.min_threshold = threshold;
    }
    if let Some(distance) = args.max_edit_distance {
        config.max_edit_distance = distance;
    }
    if let Some(state) = args.state {
        config.state_path = Some(state);
    }
    config.validate()?;

    let state_path = config.state_path();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Learn { files } => {
            let model = FrequencyModel::new(config.min_threshold)?;
            model.learn(read_corpus(&files)?)?;
            model.save(&state_path)?;

            let generation = model.snapshot()?;
            writeln!(
                out,
                "Learned {} words ({} distinct) into {}",
                generation.total_words(),
                generation.word_count(),
                state_path.display()
            )?;
        }
        Command::Update { files } => {
            let model = open_model(&config, &state_path)?;
            model.update(read_corpus(&files)?)?;
            model.save(&state_path)?;

            let generation = model.snapshot()?;
            writeln!(
                out,
                "Model now holds {} words ({} distinct)",
                generation.total_words(),
                generation.word_count()
            )?;
        }
        Command::Correct { text } => {
            let model = open_model(&config, &state_path)?;
            let corrector = Corrector::with_config(Arc::new(model), &config)?;

            if text.is_empty() {
                info!("correcting stdin line by line");
                for line in io::stdin().lock().lines() {
                    writeln!(out, "{}", corrector.correct_text(&line?)?)?;
                }
            } else {
                writeln!(out, "{}", corrector.correct_text(&text.join(" "))?)?;
            }
        }
        Command::Suggest { word } => {
            let model = open_model(&config, &state_path)?;
            let corrector = Corrector::with_config(Arc::new(model), &config)?;
            let correction = corrector.correction(&word.to_lowercase())?;

            writeln!(
                out,
                "{} -> {} ({:?}, count {}, p={:.6})",
                correction.original,
                correction.corrected,
                correction.tier,
                correction.count,
                correction.probability
            )?;
        }
        Command::Summary => {
            let model = open_model(&config, &state_path)?;
            write!(out, "{}", model.summary()?)?;
        }
        Command::Config { save } => {
            writeln!(out, "config file:       {}", Config::config_path()?.display())?;
            writeln!(out, "min_threshold:     {}", config.min_threshold)?;
            writeln!(out, "max_edit_distance: {}", config.max_edit_distance)?;
            writeln!(out, "state_path:        {}", state_path.display())?;

            if save {
                config.save()?;
                writeln!(out, "Saved configuration")?;
            }
        }
    }

    Ok(())
}
