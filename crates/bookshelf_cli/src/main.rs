//! bookshelf CLI entry point.
//!
//! Opens the catalog, seeds it once at startup unless told not to, then runs
//! one inspection command against the same connection.

mod cli;
mod output;

use anyhow::Context;
use bookshelf_core::db::open_location;
use bookshelf_core::{
    core_version, init_logging, init_stderr_logging, seed_catalog, CatalogConfig, CatalogService,
    CrudRepository,
};
use clap::Parser;
use cli::{Cli, Commands, OutputFormat};
use log::info;
use rusqlite::Connection;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.catalog_config();
    config.validate()?;
    start_logging(&config)?;

    let conn = open_location(&config.db)
        .with_context(|| format!("failed to open catalog at `{}`", config.db))?;

    let text = serve(&conn, &config, cli.command, cli.format)?;
    println!("{text}");
    Ok(())
}

/// Seeds once when enabled, then answers a single command.
fn serve(
    conn: &Connection,
    config: &CatalogConfig,
    command: Commands,
    format: OutputFormat,
) -> anyhow::Result<String> {
    if config.seed_on_startup {
        seed_catalog(conn).context("startup seed failed")?;
    }
    info!("event=cli_ready module=cli status=ok db={}", config.db);

    run(command, format, conn)
}

fn start_logging(config: &CatalogConfig) -> anyhow::Result<()> {
    let result = match &config.log_dir {
        Some(dir) => {
            let dir = dir.to_str().context("log directory must be valid UTF-8")?;
            init_logging(&config.log_level, dir)
        }
        None => init_stderr_logging(&config.log_level),
    };
    result.map_err(anyhow::Error::msg)
}

fn run(command: Commands, format: OutputFormat, conn: &Connection) -> anyhow::Result<String> {
    let service = CatalogService::sqlite(conn)?;

    let text = match command {
        Commands::Books => {
            let details = service.book_details()?;
            output::render(details.as_slice(), format, output::books)?
        }
        Commands::Authors => {
            let authors = service.authors().find_all()?;
            output::render(authors.as_slice(), format, output::authors)?
        }
        Commands::Publishers => {
            let publishers = service.publishers().find_all()?;
            output::render(publishers.as_slice(), format, output::publishers)?
        }
        Commands::Count => output::render(&service.counts()?, format, output::counts)?,
        Commands::Seed => output::render(&seed_catalog(conn)?, format, output::seeded)?,
        Commands::Version => core_version().to_string(),
    };
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::serve;
    use crate::cli::{Commands, OutputFormat};
    use bookshelf_core::db::open_db_in_memory;
    use bookshelf_core::{CatalogConfig, CatalogService};
    use serde_json::Value;

    fn config(seed_on_startup: bool) -> CatalogConfig {
        CatalogConfig {
            seed_on_startup,
            ..CatalogConfig::default()
        }
    }

    fn counts_json(text: &str) -> (u64, u64, u64) {
        let value: Value = serde_json::from_str(text).unwrap();
        (
            value["publishers"].as_u64().unwrap(),
            value["authors"].as_u64().unwrap(),
            value["books"].as_u64().unwrap(),
        )
    }

    #[test]
    fn startup_seed_runs_before_the_command() {
        let conn = open_db_in_memory().unwrap();
        let text = serve(&conn, &config(true), Commands::Count, OutputFormat::Json).unwrap();
        assert_eq!(counts_json(&text), (2, 2, 2));
    }

    #[test]
    fn disabled_startup_seed_leaves_store_empty() {
        let conn = open_db_in_memory().unwrap();
        let text = serve(&conn, &config(false), Commands::Count, OutputFormat::Json).unwrap();
        assert_eq!(counts_json(&text), (0, 0, 0));
    }

    #[test]
    fn seed_command_after_startup_seed_duplicates_fixture() {
        let conn = open_db_in_memory().unwrap();
        let text = serve(&conn, &config(true), Commands::Seed, OutputFormat::Pretty).unwrap();
        assert!(text.starts_with("Seeded 2 publishers, 2 authors, 2 books"));

        let counts = CatalogService::sqlite(&conn).unwrap().counts().unwrap();
        assert_eq!((counts.publishers, counts.authors, counts.books), (4, 4, 4));
    }

    #[test]
    fn books_command_lists_seeded_titles() {
        let conn = open_db_in_memory().unwrap();
        let text = serve(&conn, &config(true), Commands::Books, OutputFormat::Pretty).unwrap();
        assert_eq!(
            text,
            "#1 \"Domain Driven Design\" [ISBN 1234] by Eric Evans (Harper Collins)\n\
             #2 \"J2EE Development without EJB\" [ISBN 2244] by Rod Johnson (Helion)"
        );
    }
}
