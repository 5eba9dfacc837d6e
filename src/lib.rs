//! Compiles per-party timing measurements from a two-party (plus
//! coordinator) protocol benchmark into one consolidated report.
//!
//! The benchmark harness leaves one CSV per party, per network model,
//! per threat model, per distance function. This crate discovers which
//! configurations have a complete set of party files, averages the
//! repeated trials in each, derives the online/offline time breakdown,
//! and writes `compiled_time_test_results.csv` at the results root.

#![deny(missing_docs)]

extern crate csv;
#[macro_use]
extern crate error_chain;
#[macro_use]
extern crate itertools;
#[macro_use]
extern crate log;

pub mod errors;

mod table;
pub use table::ResultTable;
pub use table::average;

mod aggregate;
pub use aggregate::ColumnLayout;
pub use aggregate::DerivedMetrics;
pub use aggregate::PartyTables;
pub use aggregate::aggregate;

mod report;
pub use report::Report;

mod driver;
pub use driver::RunSummary;
pub use driver::all_configurations;
pub use driver::compile_report;

/// A benchmark participant. Each party logs its own timing file per
/// configuration, and the role decides which derived metrics are read
/// from it.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Party {
    /// Garbler (S1): garbles the circuit and sends the garbled tables.
    Sender,
    /// Evaluator (S2): runs the oblivious transfers and evaluates.
    Receiver,
    /// Helper (C): drives the online phase and logs its total.
    Coordinator,
}

impl Party {
    /// The role code used in result file names.
    pub fn code(&self) -> &'static str {
        match *self {
            Party::Sender => "S1",
            Party::Receiver => "S2",
            Party::Coordinator => "C",
        }
    }
}

/// The simulated network condition a run executed under. The label is
/// also the name of the per-model results subdirectory.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NetModel {
    /// Loopback, no simulated delay.
    Local,
    /// Local-area latency/bandwidth profile.
    Lan,
    /// Wide-area latency/bandwidth profile.
    Internet,
}

impl NetModel {
    /// Directory name and report label for this network model.
    pub fn label(&self) -> &'static str {
        match *self {
            NetModel::Local => "local",
            NetModel::Lan => "LAN",
            NetModel::Internet => "internet",
        }
    }
}

/// Protocol security assumption for a run. Malicious-mode result files
/// carry two extra leading columns, so the threat model also selects
/// the column layout (see [`ColumnLayout`]).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ThreatModel {
    /// Semi-honest security.
    SemiHonest,
    /// Malicious security.
    Malicious,
}

impl ThreatModel {
    /// File-name code and report label for this threat model.
    pub fn code(&self) -> &'static str {
        match *self {
            ThreatModel::SemiHonest => "sh",
            ThreatModel::Malicious => "mal",
        }
    }
}

/// Which distance-function variant was benchmarked.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DistFunc {
    /// Cosine similarity.
    CosineSimilarity,
    /// Euclidean distance.
    EuclideanDistance,
}

impl DistFunc {
    /// File-name code and report label for this distance function.
    pub fn code(&self) -> &'static str {
        match *self {
            DistFunc::CosineSimilarity => "cs",
            DistFunc::EuclideanDistance => "ed",
        }
    }
}

/// One benchmark configuration: network model, threat model and
/// distance function. Identifies a run-set on disk and one row of the
/// consolidated report.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct BenchConfig {
    /// Network model of the run-set.
    pub net_model: NetModel,
    /// Threat model of the run-set.
    pub threat_model: ThreatModel,
    /// Distance function of the run-set.
    pub dist_func: DistFunc,
}

impl BenchConfig {
    /// Creates a new `BenchConfig`.
    pub fn new(net: NetModel, threat: ThreatModel, dist: DistFunc) -> Self {
        BenchConfig {
            net_model: net,
            threat_model: threat,
            dist_func: dist,
        }
    }

    /// Gets the filename of one party's result file for this
    /// configuration under the results root `dir`.
    pub fn derive_results_file(&self, dir: &str, party: Party) -> String {
        format!(
            "{}/{}/time_test_results_{}_{}_{}.csv",
            dir,
            self.net_model.label(),
            party.code(),
            self.threat_model.code(),
            self.dist_func.code()
        )
    }
}

impl ::std::fmt::Display for BenchConfig {
    fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
        write!(
            f,
            "net model {}, threat model {}, distance function {}",
            self.net_model.label(),
            self.threat_model.code(),
            self.dist_func.code()
        )
    }
}
