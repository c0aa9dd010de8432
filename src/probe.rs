use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Probe table of a single transcript, ordered by row.
pub type ProbeTable = Vec<Probe>;

/// Nested mapping of gene identifier -> transcript identifier -> probe table.
/// Owned by the caller; the batch dispatcher replaces leaf tables in place
/// and never alters the key structure.
pub type ProbeDict = HashMap<String, HashMap<String, ProbeTable>>;

// MARK: Probe
/// One targeting probe of a transcript.
/// The three `Option` fields start out as `None` and are filled in by the
/// assigner: `readout_names` holds the colon-joined readout ids in assembly
/// order (an empty field marks the position of the target sequence),
/// `probe_barcode` the bitstring of the on-bits actually used for this probe
/// at full barcode length, and `target_readout_sequence` the final assembled
/// oligo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Probe {
    pub target_sequence: String,
    pub shift: i64,
    #[serde(default)]
    pub readout_names: Option<String>,
    #[serde(default)]
    pub probe_barcode: Option<String>,
    #[serde(default)]
    pub target_readout_sequence: Option<String>,
}

impl Probe {
    pub fn new(target_sequence: &str, shift: i64) -> Self {
        Probe {
            target_sequence: target_sequence.to_string(),
            shift,
            readout_names: None,
            probe_barcode: None,
            target_readout_sequence: None,
        }
    }
}
