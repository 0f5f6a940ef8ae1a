//! CLI argument definitions.

use bookshelf_core::{default_log_level, CatalogConfig, DbLocation};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Inspect and seed the bookshelf catalog.
#[derive(Debug, Parser)]
#[command(name = "bookshelf", version)]
#[command(about = "Seed and inspect the bookshelf catalog", long_about = None)]
pub struct Cli {
    /// SQLite database file, or `:memory:` for a throwaway catalog.
    #[arg(long, env = "BOOKSHELF_DB", default_value = ":memory:")]
    pub db: String,

    /// trace|debug|info|warn|error. Defaults to the build-mode level when
    /// logging to files and to `warn` on stderr.
    #[arg(long, env = "BOOKSHELF_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Absolute directory for rotating log files. Logs go to stderr when unset.
    #[arg(long, env = "BOOKSHELF_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Skip the fixture seed that normally runs at startup. The env value
    /// accepts 1/0, yes/no, on/off and true/false.
    #[arg(
        long,
        env = "BOOKSHELF_NO_SEED",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_seed: bool,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    #[default]
    Pretty,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List books with their publisher and authors.
    Books,
    /// List authors with the keys of their books.
    Authors,
    /// List publishers.
    Publishers,
    /// Row counts per table.
    Count,
    /// Insert the fixture catalog again. Adds duplicate rows on a seeded store.
    Seed,
    /// Print the core library version.
    Version,
}

impl Cli {
    pub fn catalog_config(&self) -> CatalogConfig {
        let log_level = self.log_level.clone().unwrap_or_else(|| {
            if self.log_dir.is_some() {
                default_log_level().to_string()
            } else {
                "warn".to_string()
            }
        });

        CatalogConfig {
            db: DbLocation::parse(&self.db),
            log_level,
            log_dir: self.log_dir.clone(),
            seed_on_startup: !self.no_seed,
        }
    }
}
