//! Walks a results tree and compiles the consolidated report.

use BenchConfig;
use DistFunc;
use NetModel;
use Party;
use ThreatModel;
use aggregate::{PartyTables, aggregate};
use errors::*;
use report::Report;
use std::path::Path;
use table::ResultTable;

/// Network models in report order.
pub const NET_MODELS: [NetModel; 3] = [NetModel::Local, NetModel::Lan, NetModel::Internet];

/// Threat models in report order.
pub const THREAT_MODELS: [ThreatModel; 2] = [ThreatModel::SemiHonest, ThreatModel::Malicious];

/// Distance functions in report order.
pub const DIST_FUNCS: [DistFunc; 2] = [DistFunc::CosineSimilarity, DistFunc::EuclideanDistance];

/// Every benchmark configuration, in report order.
pub fn all_configurations() -> Vec<BenchConfig> {
    iproduct!(&NET_MODELS, &THREAT_MODELS, &DIST_FUNCS)
        .map(|(&net, &threat, &dist)| BenchConfig::new(net, threat, dist))
        .collect()
}

/// Outcome of a full compilation run.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Configurations aggregated into the report.
    pub processed: Vec<BenchConfig>,
    /// Configurations left out because a party file was missing or
    /// held no measurement rows.
    pub skipped: Vec<BenchConfig>,
}

/// Compiles every available configuration under `results_dir` into
/// `{results_dir}/compiled_time_test_results.csv`, truncating any
/// previous report.
///
/// A configuration missing any of its three party files (or whose
/// files hold no measurement rows) is skipped, not an error: benchmark
/// sweeps are often sparse. Skips are logged and reported in the
/// returned [`RunSummary`].
pub fn compile_report(results_dir: &str) -> Result<RunSummary> {
    let report_path = format!("{}/compiled_time_test_results.csv", results_dir);
    let mut report = Report::create(&report_path)?;
    let mut summary = RunSummary::default();

    for net_model in &NET_MODELS {
        for (threat_model, dist_func) in iproduct!(&THREAT_MODELS, &DIST_FUNCS) {
            let config = BenchConfig::new(*net_model, *threat_model, *dist_func);
            match load_tables(results_dir, &config)? {
                Some(tables) => {
                    let metrics = aggregate(&tables, config.threat_model)?;
                    report.write_row(&config, &metrics)?;
                    info!("processed {}", config);
                    summary.processed.push(config);
                }
                None => {
                    warn!("skipping {}: results incomplete", config);
                    summary.skipped.push(config);
                }
            }
        }
        // one separator row after each network model's block
        report.write_blank_row()?;
    }

    report.finish()?;
    Ok(summary)
}

/// Loads the three party tables for `config`, or `None` when any party
/// file is missing or empty.
fn load_tables(results_dir: &str, config: &BenchConfig) -> Result<Option<PartyTables>> {
    let sender = match load_party(results_dir, config, Party::Sender)? {
        Some(table) => table,
        None => return Ok(None),
    };
    let receiver = match load_party(results_dir, config, Party::Receiver)? {
        Some(table) => table,
        None => return Ok(None),
    };
    let coordinator = match load_party(results_dir, config, Party::Coordinator)? {
        Some(table) => table,
        None => return Ok(None),
    };
    Ok(Some(PartyTables {
        sender: sender,
        receiver: receiver,
        coordinator: coordinator,
    }))
}

/// Loads one party's table, or `None` when the file is absent or holds
/// no measurement rows.
fn load_party(results_dir: &str, config: &BenchConfig, party: Party) -> Result<Option<ResultTable>> {
    let path = config.derive_results_file(results_dir, party);
    if !Path::new(&path).is_file() {
        debug!("no results file {}", path);
        return Ok(None);
    }
    let table = ResultTable::from_path(&path)?;
    if table.is_empty() {
        debug!("results file {} has no measurement rows", path);
        return Ok(None);
    }
    Ok(Some(table))
}
