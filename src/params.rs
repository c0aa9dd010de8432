use getset::{Getters, Setters};
use serde::{Deserialize, Serialize};

use crate::barcode::GeneIdKey;
use crate::error::ReadoutError;

fn default_worker_count() -> usize {
    1
}

// MARK: AssignParams
/// Options controlling readout assignment.
/// `readouts_per_probe` is the only required field; the rest default to an
/// empty spacer, gene lookup by name, a single worker and independent on-bit
/// sampling per probe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Setters)]
pub struct AssignParams {
    /// Number of readout sequences appended to each probe.
    #[getset(get = "pub", set = "pub")]
    readouts_per_probe: usize,

    /// Sequence inserted between the target sequence and each readout.
    #[getset(get = "pub", set = "pub")]
    #[serde(default)]
    spacer: String,

    /// Barcode table column used to identify genes.
    #[getset(get = "pub", set = "pub")]
    #[serde(default)]
    gene_id_key: GeneIdKey,

    /// Size of the worker pool used by the batch dispatcher.
    #[getset(get = "pub", set = "pub")]
    #[serde(default = "default_worker_count")]
    worker_count: usize,

    /// Give every readout of a probe the same on-bit.
    #[getset(get = "pub", set = "pub")]
    #[serde(default)]
    force_single_bit: bool,
}

impl AssignParams {
    pub fn new(readouts_per_probe: usize) -> Self {
        AssignParams {
            readouts_per_probe,
            spacer: String::new(),
            gene_id_key: GeneIdKey::default(),
            worker_count: default_worker_count(),
            force_single_bit: false,
        }
    }

    /// Parse parameters from a JSON string.
    /// # Example
    /// ```
    /// use merfish_readout::params::AssignParams;
    /// let params = AssignParams::from_json_str(r#"{"readouts_per_probe": 3, "spacer": "AA"}"#).unwrap();
    /// assert_eq!(*params.readouts_per_probe(), 3);
    /// assert_eq!(params.spacer(), "AA");
    /// assert_eq!(*params.worker_count(), 1);
    /// ```
    pub fn from_json_str(json_str: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json_str)
    }

    /// Check that the counts are usable before dispatching work.
    /// # Errors
    /// * `ReadoutError::InvalidParams` if `readouts_per_probe` or
    ///   `worker_count` is zero.
    pub fn validate(&self) -> Result<(), ReadoutError> {
        if self.readouts_per_probe == 0 {
            return Err(ReadoutError::InvalidParams(
                "readouts_per_probe must be at least 1".to_string(),
            ));
        }
        if self.worker_count == 0 {
            return Err(ReadoutError::InvalidParams(
                "worker_count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let params = AssignParams::new(2);
        assert_eq!(*params.readouts_per_probe(), 2);
        assert_eq!(params.spacer(), "");
        assert_eq!(*params.gene_id_key(), GeneIdKey::Name);
        assert_eq!(*params.worker_count(), 1);
        assert!(!*params.force_single_bit());
        params.validate().unwrap();
    }

    #[test]
    fn test_from_json_str_defaults() {
        let params = AssignParams::from_json_str(r#"{"readouts_per_probe": 4}"#).unwrap();
        assert_eq!(*params.readouts_per_probe(), 4);
        assert_eq!(params.spacer(), "");
        assert_eq!(*params.gene_id_key(), GeneIdKey::Name);
        assert_eq!(*params.worker_count(), 1);
        assert!(!*params.force_single_bit());
    }

    #[test]
    fn test_from_json_str_full() {
        let params = AssignParams::from_json_str(
            r#"{
                "readouts_per_probe": 2,
                "spacer": "TT",
                "gene_id_key": "id",
                "worker_count": 8,
                "force_single_bit": true
            }"#,
        )
        .unwrap();
        assert_eq!(*params.readouts_per_probe(), 2);
        assert_eq!(params.spacer(), "TT");
        assert_eq!(*params.gene_id_key(), GeneIdKey::Id);
        assert_eq!(*params.worker_count(), 8);
        assert!(*params.force_single_bit());
    }

    #[test]
    fn test_validate_rejects_zero_counts() {
        let mut params = AssignParams::new(0);
        assert!(params.validate().is_err());

        params.set_readouts_per_probe(2);
        params.set_worker_count(0);
        assert!(params.validate().is_err());

        params.set_worker_count(4);
        params.validate().unwrap();
    }
}
