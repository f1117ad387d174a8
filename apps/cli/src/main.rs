//! jdex command line
//!
//! ```bash
//! # Index the vault, writing "00.00 - Index.md" into the 00-09 area
//! jdex ~/Documents/Vault
//!
//! # Print the index instead of writing it
//! jdex ~/Documents/Vault --dry-run
//!
//! # Read root_dir / output_path from a JSON file
//! jdex --config jdex.json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use jdex::{load_config, Indexer, IndexerConfig, Result};

#[derive(Debug, Parser)]
#[command(name = "jdex")]
#[command(about = "Build a flat index of a Johnny Decimal directory tree", long_about = None)]
struct Cli {
    /// Directory holding the area folders (defaults to the current directory)
    root: Option<PathBuf>,

    /// Write the index here instead of the default location
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON file with `root_dir` and optional `output_path`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the index to stdout without writing anything
    #[arg(long)]
    dry_run: bool,
}

/// Command line values take precedence over the config file.
fn build_config(cli: &Cli) -> Result<IndexerConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => IndexerConfig::new(PathBuf::from(".")),
    };
    if let Some(root) = &cli.root {
        config.root_dir = root.clone();
    }
    if let Some(output) = &cli.output {
        config.output_path = Some(output.clone());
    }
    Ok(config)
}

fn run(cli: &Cli) -> Result<()> {
    let config = build_config(cli)?;
    let mut indexer = Indexer::new(config);

    if cli.dry_run {
        for line in indexer.render_lines(true)? {
            println!("{line}");
        }
        return Ok(());
    }

    let report = indexer.run()?;
    log::info!(
        "indexed {} entries into {}",
        report.entities.len(),
        report.target.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            log::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jdex::INDEX_FILE_NAME;
    use std::fs;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn defaults_to_current_directory() {
        let cli = parse(&["jdex"]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.root_dir, PathBuf::from("."));
        assert_eq!(config.output_path, None);
        assert!(!cli.dry_run);
    }

    #[test]
    fn arguments_fill_config() {
        let cli = parse(&["jdex", "/vault", "--output", "/tmp/index.md", "--dry-run"]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.root_dir, PathBuf::from("/vault"));
        assert_eq!(config.output_path, Some(PathBuf::from("/tmp/index.md")));
        assert!(cli.dry_run);
    }

    #[test]
    fn missing_config_file_fails() {
        let cli = parse(&["jdex", "--config", "/nonexistent/jdex.json"]);
        assert!(build_config(&cli).is_err());
    }

    #[test]
    fn missing_root_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing");
        let cli = parse(&["jdex", missing.to_str().unwrap()]);
        assert!(run(&cli).is_err());
    }

    #[test]
    fn dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let index_area = temp.path().join("00 - 09 System");
        fs::create_dir_all(index_area.join("01 Meta")).unwrap();
        fs::create_dir_all(temp.path().join("10 - 19 Finance/11 Banking")).unwrap();

        let cli = parse(&["jdex", temp.path().to_str().unwrap(), "--dry-run"]);
        run(&cli).unwrap();

        assert!(!index_area.join(INDEX_FILE_NAME).exists());
        assert!(!temp.path().join(INDEX_FILE_NAME).exists());
    }
}
