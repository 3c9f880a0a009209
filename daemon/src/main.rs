//! govtally: proposal vote stats from the command line.

mod config;

use clap::Parser;
use config::StatsConfig;
use govtally_chain::{GovernanceApiClient, RawTally, SidecarClient, SubscanClient, VotesSource};
use govtally_tally::{PowerMode, StatsAggregator, StatsCache, StatsRequest, VotingPowerCalculator};
use govtally_types::{
    Decision, Network, ProposalType, RawAmount, StatusEntry, TipStatus, VoteBalance,
    VoteRecord,
};
use govtally_utils::{init_logging, LogFormat};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "govtally", about = "Governance vote tally aggregator")]
struct Cli {
    /// Network: polkadot, kusama, westend, rococo, picasso, collectives,
    /// moonbeam, moonriver. Defaults to the config file's value.
    #[arg(long, env = "GOVTALLY_NETWORK")]
    network: Option<Network>,

    /// Node REST sidecar base URL.
    #[arg(long, env = "GOVTALLY_SIDECAR_URL")]
    sidecar_url: Option<String>,

    /// Indexer base URL (defaults to the network's public indexer).
    #[arg(long, env = "GOVTALLY_INDEXER_URL")]
    indexer_url: Option<String>,

    #[arg(long, env = "GOVTALLY_INDEXER_API_KEY")]
    indexer_api_key: Option<String>,

    /// Governance API base URL.
    #[arg(long, env = "GOVTALLY_API_URL")]
    api_url: Option<String>,

    /// How voting power reads amounts: "exact" or "display_rounded".
    #[arg(long, env = "GOVTALLY_POWER_MODE")]
    power_mode: Option<PowerMode>,

    /// Per-request timeout in seconds.
    #[arg(long, env = "GOVTALLY_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Log format: "human" or "json".
    #[arg(long, env = "GOVTALLY_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "GOVTALLY_LOG_LEVEL")]
    log_level: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "GOVTALLY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Collect tally, issuance, support and voting power for one proposal.
    Stats {
        /// Proposal (post) id.
        id: u32,

        /// Proposal type, e.g. "referendums_v2", "referendums", "council_motions".
        #[arg(long = "type", default_value = "referendums_v2")]
        proposal_type: ProposalType,

        /// Inline tally ayes, as attached to the post (hex with 0x, or decimal).
        #[arg(long)]
        ayes: Option<String>,

        #[arg(long)]
        nays: Option<String>,

        #[arg(long)]
        abstain: Option<String>,

        /// Status history entries as STATUS:BLOCK, e.g. "Confirmed:19283746".
        #[arg(long = "status", value_delimiter = ',')]
        statuses: Vec<String>,
    },

    /// Voting power of a single vote.
    Power {
        /// "yes", "no" or "abstain".
        #[arg(long)]
        decision: Decision,

        /// Raw balance in planck-like units (hex with 0x, or decimal).
        #[arg(long)]
        value: String,

        /// Conviction lock period (0 to 6).
        #[arg(long)]
        lock: Option<u8>,
    },

    /// Tips given or received by a set of addresses.
    Tips {
        #[arg(long = "address", value_delimiter = ',', required = true)]
        addresses: Vec<String>,

        /// "given" or "received".
        #[arg(long, default_value = "given")]
        status: TipStatus,
    },
}

/// Apply CLI/env overrides on top of the base configuration.
fn merge(base: StatsConfig, cli: &Cli) -> StatsConfig {
    StatsConfig {
        network: cli.network.unwrap_or(base.network),
        sidecar_url: cli.sidecar_url.clone().unwrap_or(base.sidecar_url),
        indexer_url: cli.indexer_url.clone().or(base.indexer_url),
        indexer_api_key: cli.indexer_api_key.clone().or(base.indexer_api_key),
        api_url: cli.api_url.clone().unwrap_or(base.api_url),
        power_mode: cli.power_mode.unwrap_or(base.power_mode),
        timeout_secs: cli.timeout_secs.unwrap_or(base.timeout_secs),
        log_format: cli.log_format.unwrap_or(base.log_format),
        log_level: cli.log_level.clone().unwrap_or(base.log_level),
    }
}

fn parse_status(entry: &str) -> anyhow::Result<StatusEntry> {
    let (status, block) = match entry.split_once(':') {
        Some((status, block)) => (status, Some(block.trim().parse::<u64>()?)),
        None => (entry, None),
    };
    Ok(StatusEntry {
        status: status.trim().to_string(),
        block,
    })
}

fn inline_tally(ayes: Option<String>, nays: Option<String>, abstain: Option<String>) -> Option<RawTally> {
    if ayes.is_none() && nays.is_none() && abstain.is_none() {
        return None;
    }
    Some(RawTally {
        ayes: ayes.map(RawAmount::Text),
        nays: nays.map(RawAmount::Text),
        abstain: abstain.map(RawAmount::Text),
    })
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (file_config, config_warning) = match &cli.config {
        Some(path) => match StatsConfig::from_toml_file(path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (StatsConfig::default(), Some(e)),
        },
        None => (StatsConfig::default(), None),
    };
    let config = merge(file_config, &cli);

    init_logging(config.log_format, &config.log_level);
    if let Some(e) = config_warning {
        tracing::warn!("{e}, using defaults");
    }
    tracing::debug!(network = %config.network, sidecar = %config.sidecar_url, "configuration loaded");

    let timeout = config.timeout();
    let votes = GovernanceApiClient::with_timeout(&config.api_url, config.network, timeout);

    match cli.command {
        Command::Stats {
            id,
            proposal_type,
            ayes,
            nays,
            abstain,
            statuses,
        } => {
            let chain = SidecarClient::with_timeout(&config.sidecar_url, timeout);
            let indexer = SubscanClient::with_timeout(
                config.indexer_url(),
                config.indexer_api_key.clone(),
                timeout,
            );
            let aggregator =
                StatsAggregator::new(chain, indexer, votes).with_power_mode(config.power_mode);

            let history = statuses
                .iter()
                .map(|s| parse_status(s))
                .collect::<anyhow::Result<Vec<_>>>()?;
            let mut request =
                StatsRequest::new(id, proposal_type, config.network).with_status_history(history);
            if let Some(tally) = inline_tally(ayes, nays, abstain) {
                request = request.with_inline_tally(tally);
            }

            tracing::info!(proposal = id, %proposal_type, network = %config.network, "collecting stats");
            let cache = StatsCache::default();
            match aggregator.refresh(&cache, &request).await {
                Some(stats) => {
                    tracing::info!(state = ?stats.display_state(), source = ?stats.tally_source, "stats ready");
                    print_json(stats.as_ref())?;
                }
                None => anyhow::bail!("stats for proposal {id} were superseded"),
            }
        }

        Command::Power {
            decision,
            value,
            lock,
        } => {
            let amount = govtally_tally::normalize(Some(&RawAmount::Text(value)))?;
            let balance = match decision {
                Decision::Abstain => VoteBalance {
                    abstain: Some(amount),
                    ..Default::default()
                },
                _ => VoteBalance {
                    value: Some(amount),
                    ..Default::default()
                },
            };
            let record = VoteRecord {
                voter: None,
                decision,
                balance,
                lock_period: lock,
            };
            let calculator = VotingPowerCalculator::new(config.network, config.power_mode);
            print_json(&calculator.entry(&record))?;
        }

        Command::Tips { addresses, status } => {
            let tips = votes.user_tips(&addresses, status).await?;
            tracing::info!(count = tips.len(), status = status.as_str(), "tips loaded");
            print_json(&tips)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("govtally").chain(args.iter().copied()))
            .expect("valid arguments")
    }

    #[test]
    fn cli_overrides_file_values() {
        let base = StatsConfig {
            sidecar_url: "http://file:8080".into(),
            timeout_secs: 30,
            ..Default::default()
        };
        let cli = cli(&["--network", "kusama", "--timeout-secs", "5", "power", "--decision", "yes", "--value", "1"]);
        let merged = merge(base, &cli);
        assert_eq!(merged.network, Network::Kusama);
        assert_eq!(merged.timeout_secs, 5);
        assert_eq!(merged.sidecar_url, "http://file:8080");
    }

    #[test]
    fn stats_command_parses() {
        let cli = cli(&[
            "stats",
            "42",
            "--type",
            "referendums",
            "--ayes",
            "0x10",
            "--status",
            "Submitted:1,Confirmed:100",
        ]);
        match cli.command {
            Command::Stats {
                id,
                proposal_type,
                ayes,
                statuses,
                ..
            } => {
                assert_eq!(id, 42);
                assert_eq!(proposal_type, ProposalType::Referendums);
                assert_eq!(ayes.as_deref(), Some("0x10"));
                assert_eq!(statuses.len(), 2);
            }
            _ => panic!("expected stats"),
        }
    }

    #[test]
    fn status_entries() {
        let entry = parse_status("Confirmed:100").unwrap();
        assert_eq!(entry.status, "Confirmed");
        assert_eq!(entry.block, Some(100));
        assert_eq!(parse_status("Submitted").unwrap().block, None);
        assert!(parse_status("Confirmed:abc").is_err());
    }

    #[test]
    fn inline_tally_only_when_given() {
        assert!(inline_tally(None, None, None).is_none());
        let t = inline_tally(Some("64".into()), None, None).unwrap();
        assert_eq!(t.ayes, Some(RawAmount::Text("64".into())));
        assert_eq!(t.nays, None);
    }

    #[test]
    fn power_command_parses() {
        let cli = cli(&["power", "--decision", "aye", "--value", "0x746a528800", "--lock", "3"]);
        match cli.command {
            Command::Power { decision, lock, .. } => {
                assert_eq!(decision, Decision::Yes);
                assert_eq!(lock, Some(3));
            }
            _ => panic!("expected power"),
        }
    }

    #[test]
    fn power_of_locked_vote() {
        let calc = VotingPowerCalculator::new(Network::Polkadot, PowerMode::Exact);
        let record = VoteRecord {
            voter: None,
            decision: Decision::Yes,
            balance: VoteBalance {
                value: Some(govtally_types::Balance::from(500_000_000_000u64)),
                ..Default::default()
            },
            lock_period: Some(3),
        };
        assert_eq!(calc.entry(&record).amount_display, "50 DOT");
    }
}
