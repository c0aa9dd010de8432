use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReadoutError {
    #[error("Readout id not found in the bit name list: {0}")]
    UnknownBitName(String),
    #[error("No readout sequence found for on-bit {0}")]
    MissingOnBit(usize),
    #[error("Barcode has no on-bits, cannot choose readout sequences")]
    EmptyOnBitSet,
    #[error("Gene not found in the barcode table: {0}")]
    GeneNotFound(String),
    #[error("Invalid assignment parameters: {0}")]
    InvalidParams(String),
    #[error("Failed to build the worker pool: {0}")]
    PoolBuild(String),
    #[error("Failed to assign readouts for gene {gene}, transcript {transcript}: {source}")]
    Transcript {
        gene: String,
        transcript: String,
        #[source]
        source: Box<ReadoutError>,
    },
}
