//! Derivation of the per-configuration timing metrics.

use Party;
use ThreatModel;
use errors::*;
use table::{ResultTable, average};

/// Column positions of each measured quantity inside the per-party
/// result tables.
///
/// The malicious-mode harness emits two extra leading columns of
/// protocol overhead before the evaluation and offline-upload columns,
/// so those positions sit two further right. Keeping every position in
/// this one table means a new threat model or a reordered file format
/// is a single edit here.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ColumnLayout {
    /// Sender garbling time.
    pub garble: usize,
    /// Sender garbled-table send time.
    pub gtable_send: usize,
    /// First of the sender offline sub-phase columns.
    pub offline_first: usize,
    /// Last of the sender offline sub-phase columns (inclusive).
    pub offline_last: usize,
    /// Receiver circuit-evaluation time.
    pub eval: usize,
    /// Oblivious-transfer time, logged by both sender and receiver.
    pub ot: usize,
    /// Coordinator online-phase total.
    pub online_total: usize,
}

impl ColumnLayout {
    /// The column layout used by result files of the given threat
    /// model.
    pub fn for_threat_model(threat: ThreatModel) -> ColumnLayout {
        let semi_honest = ColumnLayout {
            garble: 3,
            gtable_send: 5,
            offline_first: 2,
            offline_last: 5,
            eval: 9,
            ot: 9,
            online_total: 8,
        };
        match threat {
            ThreatModel::SemiHonest => semi_honest,
            ThreatModel::Malicious => {
                ColumnLayout {
                    offline_last: semi_honest.offline_last + 2,
                    eval: semi_honest.eval + 2,
                    ..semi_honest
                }
            }
        }
    }
}

/// The three per-party result tables for one configuration.
#[derive(Debug)]
pub struct PartyTables {
    /// Sender (S1) measurements.
    pub sender: ResultTable,
    /// Receiver (S2) measurements.
    pub receiver: ResultTable,
    /// Coordinator (C) measurements.
    pub coordinator: ResultTable,
}

/// The seven derived timing figures for one configuration, in seconds.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct DerivedMetrics {
    /// Time the sender spent garbling the circuit.
    pub garble_time: f64,
    /// Time the sender spent sending the garbled tables.
    pub gtable_send_time: f64,
    /// Total offline-phase time (sum of the offline sub-phase column
    /// averages).
    pub offline_total: f64,
    /// Receiver circuit-evaluation time.
    pub eval_time: f64,
    /// Oblivious-transfer time.
    pub ot_time: f64,
    /// Online time not accounted for by evaluation or OT.
    pub online_other: f64,
    /// Coordinator's online-phase total.
    pub online_total: f64,
}

/// Computes the derived metrics for one configuration from its three
/// party tables. Each metric averages one column over that party's
/// trial rows; rows too short to hold a column are skipped, not
/// counted as zero.
pub fn aggregate(tables: &PartyTables, threat: ThreatModel) -> Result<DerivedMetrics> {
    let cols = ColumnLayout::for_threat_model(threat);

    let garble_time = metric_average(&tables.sender, cols.garble, "garble_time", Party::Sender)?;
    let gtable_send_time =
        metric_average(&tables.sender, cols.gtable_send, "gtable_send_time", Party::Sender)?;

    // Sum of per-column averages. The sub-phase columns may be
    // populated for differing numbers of rows, so each column is
    // averaged on its own before summing.
    let mut offline_total = 0.0;
    for col in cols.offline_first..cols.offline_last + 1 {
        offline_total += metric_average(&tables.sender, col, "offline_total", Party::Sender)?;
    }

    let eval_time = metric_average(&tables.receiver, cols.eval, "eval_time", Party::Receiver)?;

    // Both parties log the OT phase; the lower figure is authoritative.
    let sender_ot = metric_average(&tables.sender, cols.ot, "ot_time", Party::Sender)?;
    let receiver_ot = metric_average(&tables.receiver, cols.ot, "ot_time", Party::Receiver)?;
    let ot_time = sender_ot.min(receiver_ot);

    let online_total = metric_average(
        &tables.coordinator,
        cols.online_total,
        "online_total",
        Party::Coordinator,
    )?;

    // Pass-through subtraction; negative values mean inconsistent
    // inputs and are reported as-is.
    let online_other = online_total - eval_time - ot_time;

    Ok(DerivedMetrics {
        garble_time: garble_time,
        gtable_send_time: gtable_send_time,
        offline_total: offline_total,
        eval_time: eval_time,
        ot_time: ot_time,
        online_other: online_other,
        online_total: online_total,
    })
}

/// Averages one column of `table`, tagging an empty column with the
/// metric and role it was meant to feed.
fn metric_average(table: &ResultTable, col: usize, metric: &str, role: Party) -> Result<f64> {
    let values = table.column(col)?;
    average(&values)
        .chain_err(|| ErrorKind::EmptyColumn(metric.to_string(), role.code().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(data: &str) -> ResultTable {
        ResultTable::from_reader("test", data.as_bytes()).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    // Two trials per party, ten columns (semi-honest layout).
    fn semi_honest_tables() -> PartyTables {
        PartyTables {
            // col2=0.01, garble(3)=0.02, col4=0.03, send(5)=0.04, ot(9)=0.040
            sender: table(
                "0,0,0.01,0.02,0.03,0.04,9,9,9,0.040\n\
                 0,0,0.01,0.02,0.03,0.04,9,9,9,0.040\n",
            ),
            // eval(9)=0.3, ot(9)=0.3 shares the column in this layout
            receiver: table(
                "0,0,9,9,9,9,9,9,9,0.3\n\
                 0,0,9,9,9,9,9,9,9,0.3\n",
            ),
            // online total(8)=0.5
            coordinator: table(
                "0,0,9,9,9,9,9,9,0.5,9\n\
                 0,0,9,9,9,9,9,9,0.5,9\n",
            ),
        }
    }

    #[test]
    fn semi_honest_derivation() {
        let m = aggregate(&semi_honest_tables(), ThreatModel::SemiHonest).unwrap();
        assert_eq!(m.garble_time, 0.02);
        assert_eq!(m.gtable_send_time, 0.04);
        // columns 2..=5: 0.01 + 0.02 + 0.03 + 0.04
        assert!(close(m.offline_total, 0.10));
        assert_eq!(m.eval_time, 0.3);
        // min(sender 0.040, receiver 0.3)
        assert_eq!(m.ot_time, 0.040);
        assert_eq!(m.online_total, 0.5);
        assert!(close(m.online_other, 0.5 - 0.3 - 0.040));
    }

    #[test]
    fn ot_time_takes_the_lower_party() {
        let tables = PartyTables {
            sender: table("0,0,1,1,1,1,9,9,9,0.040\n"),
            receiver: table("0,0,9,9,9,9,9,9,9,0.035\n"),
            coordinator: table("0,0,9,9,9,9,9,9,0.5,9\n"),
        };
        let m = aggregate(&tables, ThreatModel::SemiHonest).unwrap();
        assert_eq!(m.ot_time, 0.035);
    }

    #[test]
    fn online_other_is_not_clamped() {
        let tables = PartyTables {
            sender: table("0,0,1,1,1,1,9,9,9,0.05\n"),
            receiver: table("0,0,9,9,9,9,9,9,9,0.3\n"),
            coordinator: table("0,0,9,9,9,9,9,9,0.25,9\n"),
        };
        let m = aggregate(&tables, ThreatModel::SemiHonest).unwrap();
        // 0.25 - 0.3 - 0.05: inconsistent inputs pass through negative
        assert!(close(m.online_other, -0.1));
    }

    #[test]
    fn malicious_layout_shifts_eval_and_offline_upper_bound() {
        let layout = ColumnLayout::for_threat_model(ThreatModel::Malicious);
        assert_eq!(layout.eval, 11);
        assert_eq!(layout.offline_last, 7);
        // everything else stays put
        let base = ColumnLayout::for_threat_model(ThreatModel::SemiHonest);
        assert_eq!(layout.garble, base.garble);
        assert_eq!(layout.gtable_send, base.gtable_send);
        assert_eq!(layout.offline_first, base.offline_first);
        assert_eq!(layout.ot, base.ot);
        assert_eq!(layout.online_total, base.online_total);
    }

    #[test]
    fn malicious_mode_reads_shifted_columns() {
        // Twelve columns; shifted positions hold different values than
        // their unshifted counterparts so a missed shift is caught.
        let tables = PartyTables {
            sender: table("0,0,0.01,0.02,0.03,0.04,0.05,0.06,9,0.040,9,9\n"),
            receiver: table("0,0,9,9,9,9,9,9,9,0.2,9,0.3\n"),
            coordinator: table("0,0,9,9,9,9,9,9,0.5,9,9,9\n"),
        };

        let mal = aggregate(&tables, ThreatModel::Malicious).unwrap();
        // offline spans columns 2..=7
        assert!(close(mal.offline_total, 0.01 + 0.02 + 0.03 + 0.04 + 0.05 + 0.06));
        // eval comes from column 11, not 9
        assert_eq!(mal.eval_time, 0.3);
        // the OT column itself does not shift
        assert_eq!(mal.ot_time, 0.040);

        let sh = aggregate(&tables, ThreatModel::SemiHonest).unwrap();
        assert!(close(sh.offline_total, 0.01 + 0.02 + 0.03 + 0.04));
        assert_eq!(sh.eval_time, 0.2);
    }

    #[test]
    fn offline_total_sums_per_column_averages() {
        // Second trial row stops before the later offline columns, so
        // each column averages over a different row count.
        let tables = PartyTables {
            sender: table(
                "0,0,0.010,0.010,0.010,0.010,9,9,9,0.040\n\
                 0,0,0.010,0.010\n",
            ),
            receiver: table("0,0,9,9,9,9,9,9,9,0.3\n"),
            coordinator: table("0,0,9,9,9,9,9,9,0.5,9\n"),
        };
        let m = aggregate(&tables, ThreatModel::SemiHonest).unwrap();
        // four columns each averaging 0.010, regardless of row counts
        assert!(close(m.offline_total, 0.040));
    }

    #[test]
    fn empty_column_names_metric_and_role() {
        // Coordinator rows never reach column 8.
        let tables = PartyTables {
            sender: table("0,0,1,1,1,1,9,9,9,0.040\n"),
            receiver: table("0,0,9,9,9,9,9,9,9,0.3\n"),
            coordinator: table("0,0,9,9\n"),
        };
        let err = aggregate(&tables, ThreatModel::SemiHonest).unwrap_err();
        match *err.kind() {
            ErrorKind::EmptyColumn(ref metric, ref role) => {
                assert_eq!(metric, "online_total");
                assert_eq!(role, "C");
            }
            ref other => panic!("unexpected error: {:?}", other),
        }
    }
}
