//! Pigeon CLI - sign Core Blockchain transactions in bulk and stream them to
//! a node.

mod common;
mod credentials;
mod logging;
mod run;

use clap::Parser;
use common::{GlobalOpts, KeyOpts};
use std::path::PathBuf;

const EXAMPLES: &str = "\
Examples:
  Sign offline:                 pigeon -f txs.csv -u keystore.json -o signed.json
  Sign and stream:              pigeon -f txs.csv -u keystore.json -p password.txt
  Sign, stream, save ids:       pigeon -f txs.csv -k key.txt -i ids.json
  Stream signed transactions:   pigeon -s signed.json
  Stream and save ids:          pigeon -s signed.json -i ids.json";

/// Sign & transmit transactions.
///
/// Signs transactions listed in a CSV or JSON file and streams them to a
/// Core Blockchain node.
#[derive(Parser, Debug)]
#[command(name = "pigeon", version, about, after_help = EXAMPLES)]
pub struct Cli {
    /// Input file with transactions (.csv or .json)
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,

    /// Save signed transactions to this file instead of streaming them
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// File with signed transactions to stream
    #[arg(short = 's', long)]
    pub stream_file: Option<PathBuf>,

    /// File where streamed transaction ids are saved
    #[arg(short = 'i', long)]
    pub tx_ids_file: Option<PathBuf>,

    /// Skip the first line of a CSV file
    #[arg(short = 't', long, default_value_t = false)]
    pub titles: bool,

    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(flatten)]
    pub keys: KeyOpts,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.global.verbosity)?;

    if let Err(e) = run::run(&cli).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["pigeon", "-f", "txs.csv"]).unwrap();
        assert_eq!(cli.global.verbosity, 2);
        assert_eq!(cli.global.network, 1);
        assert_eq!(cli.global.node_url, "http://127.0.0.1:8545");
        assert!(!cli.global.dry_run);
        assert!(!cli.titles);
    }

    #[test]
    fn test_legacy_flag_names() {
        let cli = Cli::try_parse_from([
            "pigeon",
            "--gocore",
            "http://node:8545",
            "--utc-file",
            "ks.json",
            "-n",
            "3",
            "-v",
            "9",
        ])
        .unwrap();
        assert_eq!(cli.global.node_url, "http://node:8545");
        assert_eq!(cli.keys.keystore_file, Some(PathBuf::from("ks.json")));
        assert_eq!(cli.global.network, 3);
        assert_eq!(logging::level_for_verbosity(cli.global.verbosity), "error");
    }
}
