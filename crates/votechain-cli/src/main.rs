//! Command-line surface for the Votechain ledger.
//!
//! Each subcommand maps 1:1 to a ledger operation. The chain lives in a
//! local JSON document; remote sync is an explicit step and absent by
//! default (offline-first).

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};

use votechain::core::{token, CoreError};
use votechain::store::FileStore;
use votechain::sync::SyncError;
use votechain::{Ledger, LedgerConfig, LedgerError, Timestamp, TokenVerdict, ValuePolicy};

/// Exit codes of the command surface.
mod exit {
    pub const SUCCESS: u8 = 0;
    pub const FAILURE: u8 = 1;
    pub const INVALID_VALUE: u8 = 2;
    pub const DECODE_ERROR: u8 = 3;
    pub const CHAIN_CORRUPT: u8 = 4;
    pub const SYNC_UNAVAILABLE: u8 = 5;
}

#[derive(Parser)]
#[command(name = "votechain")]
#[command(about = "Tamper-evident, hash-linked vote ledger", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Chain document path
    #[arg(long, global = true, default_value = "vote_chain.json")]
    chain_file: PathBuf,

    /// Comma-separated candidate allow-list (default: any non-empty value)
    #[arg(long, global = true, value_delimiter = ',')]
    allow: Vec<String>,

    /// Voting deadline, e.g. 2025-06-25T16:52:00.000000 (UTC)
    #[arg(long, global = true)]
    close_at: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Cast a vote and print the record with its token payload
    Cast {
        /// The vote value (candidate identifier)
        value: String,
    },

    /// Decode a scanned token payload and verify it against the chain
    Verify {
        /// The base64 token payload
        payload: String,
    },

    /// Walk the chain invariants and report every violation
    Validate,

    /// Remove every record with the given value, leaving a visible break
    Prune {
        /// The vote value to redact
        value: String,
    },

    /// Clear the chain; the next cast starts a fresh genesis record
    Reset,

    /// Count votes per value, optionally against a reference tally
    Tally {
        /// Reference tally to compare against, e.g. A=2,B=1
        #[arg(long)]
        expect: Option<String>,
    },

    /// Push the chain document to the configured remote
    Push,

    /// Replace the local chain with the remote document
    Pull,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            let code = match err.downcast_ref::<LedgerError>() {
                Some(ledger_err) => exit_code_for(ledger_err),
                None => exit::FAILURE,
            };
            ExitCode::from(code)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<u8> {
    let config = LedgerConfig {
        policy: if cli.allow.is_empty() {
            ValuePolicy::open()
        } else {
            ValuePolicy::allow_list(cli.allow.iter().map(String::as_str))
        },
        close_at: cli
            .close_at
            .as_deref()
            .map(Timestamp::parse)
            .transpose()
            .context("invalid --close-at")?,
        ..Default::default()
    };

    let store = FileStore::new(&cli.chain_file);
    let ledger = Ledger::open(store, config).await?;

    match cli.command {
        Commands::Cast { value } => {
            let record = ledger.cast(&value).await?;
            println!("vote recorded:");
            println!("{}", token::record_json_pretty(&record));
            println!("token payload: {}", token::encode(&record));
            Ok(exit::SUCCESS)
        }

        Commands::Verify { payload } => {
            let verdict = ledger.verify_token(&payload).await?;
            match verdict {
                TokenVerdict::Verified { index } => {
                    println!("token verified: record {index} of the chain");
                    Ok(exit::SUCCESS)
                }
                TokenVerdict::ForgedHash => {
                    println!("token rejected: hash does not match its own fields");
                    Ok(exit::CHAIN_CORRUPT)
                }
                TokenVerdict::NotInChain => {
                    println!("token rejected: record is not in the chain");
                    Ok(exit::CHAIN_CORRUPT)
                }
                TokenVerdict::ContentMismatch { index } => {
                    println!("token rejected: hash matches record {index} but fields differ");
                    Ok(exit::CHAIN_CORRUPT)
                }
            }
        }

        Commands::Validate => {
            let report = ledger.validate().await;
            println!("{}", report.summary());
            for violation in report.violations() {
                println!("  violation: {violation}");
            }
            for warning in report.warnings() {
                println!("  warning: {warning}");
            }
            if report.is_valid() {
                Ok(exit::SUCCESS)
            } else {
                Ok(exit::CHAIN_CORRUPT)
            }
        }

        Commands::Prune { value } => {
            let removed = ledger.prune(&value).await?;
            println!("removed {removed} record(s)");
            if removed > 0 {
                println!("{}", ledger.validate().await.summary());
            }
            Ok(exit::SUCCESS)
        }

        Commands::Reset => {
            ledger.reset().await?;
            println!("chain reset");
            Ok(exit::SUCCESS)
        }

        Commands::Tally { expect } => {
            let tally = ledger.tally().await;
            for (value, count) in &tally {
                println!("{value}: {count}");
            }
            match expect {
                None => Ok(exit::SUCCESS),
                Some(raw) => {
                    let expected = parse_expected(&raw)?;
                    let diff = ledger.compare_tally(&expected).await;
                    if diff.matches() {
                        println!("tally matches the reference");
                        Ok(exit::SUCCESS)
                    } else {
                        for (value, want, got) in &diff.mismatches {
                            println!("mismatch {value}: expected {want}, counted {got}");
                        }
                        Ok(exit::CHAIN_CORRUPT)
                    }
                }
            }
        }

        Commands::Push => {
            let location = ledger.push().await?;
            println!("chain pushed to {location}");
            Ok(exit::SUCCESS)
        }

        Commands::Pull => match ledger.pull().await? {
            Some(count) => {
                println!("chain replaced from remote: {count} record(s)");
                Ok(exit::SUCCESS)
            }
            None => {
                println!("remote has no chain document; local chain unchanged");
                Ok(exit::SUCCESS)
            }
        },
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn exit_code_for(err: &LedgerError) -> u8 {
    match err {
        LedgerError::Core(CoreError::InvalidValue | CoreError::DisallowedValue(_)) => {
            exit::INVALID_VALUE
        }
        LedgerError::Core(CoreError::MalformedPayload(_)) => exit::DECODE_ERROR,
        LedgerError::Core(CoreError::MalformedChain(_)) => exit::FAILURE,
        LedgerError::VotingClosed { .. } => exit::INVALID_VALUE,
        LedgerError::Corrupt(_) => exit::CHAIN_CORRUPT,
        LedgerError::Sync(SyncError::Unavailable(_)) => exit::SYNC_UNAVAILABLE,
        LedgerError::Store(_) => exit::FAILURE,
    }
}

/// Parse a reference tally of the form `A=2,B=1`.
fn parse_expected(raw: &str) -> anyhow::Result<BTreeMap<String, u64>> {
    let mut expected = BTreeMap::new();
    for part in raw.split(',').filter(|p| !p.trim().is_empty()) {
        let (value, count) = part
            .split_once('=')
            .ok_or_else(|| anyhow!("expected VALUE=COUNT, got {part:?}"))?;
        let count: u64 = count
            .trim()
            .parse()
            .with_context(|| format!("invalid count in {part:?}"))?;
        expected.insert(value.trim().to_string(), count);
    }
    Ok(expected)
}
