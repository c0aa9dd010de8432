//! Assignment of fluorescent readout sequences to oligonucleotide probes
//! for multiplexed imaging experiments, driven by per-gene binary barcodes.

pub mod assign;
pub mod barcode;
pub mod batch;
pub mod error;
pub mod params;
pub mod probe;
pub mod readout;

pub use assign::assign_readouts;
pub use barcode::{BarcodeRecord, GeneIdKey, barcode_to_on_bits, find_barcode, on_bits_to_barcode};
pub use batch::assign_readouts_batch;
pub use error::ReadoutError;
pub use params::AssignParams;
pub use probe::{Probe, ProbeDict, ProbeTable};
pub use readout::{ReadoutSeq, assign_on_bit_positions};
