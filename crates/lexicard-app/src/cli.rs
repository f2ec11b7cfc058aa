use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lexicard_config::Config;
use lexicard_config::batch::BatchConfig;

#[derive(Parser, Debug)]
#[command(
    name = "lexicard",
    version,
    about = "Build fill-in-the-blank vocabulary data from dictionary and LLM sources"
)]
pub struct Cli {
    /// JSON config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Dataset path, overrides config and environment
    #[arg(long, global = true)]
    pub dataset: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Add a record for every new word in the word list
    Populate {
        #[arg(long)]
        word_list: Option<PathBuf>,
    },
    /// Fetch dictionary meanings for each record
    Fetch(BatchArgs),
    /// Request an LLM analysis for each record
    Analyze(BatchArgs),
    /// Regenerate quiz entries from the merged sources
    Enrich,
    /// Report how many records have quiz data
    Coverage,
    /// populate, fetch, analyze, enrich and coverage in order
    Run {
        #[arg(long)]
        word_list: Option<PathBuf>,
        #[command(flatten)]
        batch: BatchArgs,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct BatchArgs {
    /// Stop after this many looked-up records
    #[arg(long)]
    pub limit: Option<usize>,

    /// Look up records that already hold data for the source
    #[arg(long)]
    pub force: bool,
}

impl BatchArgs {
    fn apply(&self, batch: &mut BatchConfig) {
        if let Some(limit) = self.limit {
            batch.limit = Some(limit);
        }
        if self.force {
            batch.force = true;
        }
    }
}

impl Cli {
    /// CLI flags override every other config layer
    pub fn apply(&self, config: &mut Config) {
        if let Some(dataset) = &self.dataset {
            config.paths.dataset = dataset.clone();
        }

        match &self.command {
            Command::Populate { word_list } => {
                if let Some(path) = word_list {
                    config.paths.word_list = path.clone();
                }
            }
            Command::Fetch(batch) | Command::Analyze(batch) => batch.apply(&mut config.batch),
            Command::Run { word_list, batch } => {
                if let Some(path) = word_list {
                    config.paths.word_list = path.clone();
                }
                batch.apply(&mut config.batch);
            }
            Command::Enrich | Command::Coverage => {}
        }
    }
}
