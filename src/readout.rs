use serde::{Deserialize, Serialize};

use crate::error::ReadoutError;

// MARK: ReadoutSeq
/// One readout sequence record.
/// `on_bit` starts out as `None` and is filled in by
/// [`assign_on_bit_positions`] once the experiment's bit ordering is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadoutSeq {
    pub id: String,
    pub sequence: String,
    #[serde(default)]
    pub on_bit: Option<usize>,
}

impl ReadoutSeq {
    pub fn new(id: &str, sequence: &str) -> Self {
        ReadoutSeq {
            id: id.to_string(),
            sequence: sequence.to_string(),
            on_bit: None,
        }
    }

    pub fn with_on_bit(id: &str, sequence: &str, on_bit: usize) -> Self {
        ReadoutSeq {
            id: id.to_string(),
            sequence: sequence.to_string(),
            on_bit: Some(on_bit),
        }
    }
}

/// Record the on-bit position of each readout sequence.
/// The position of a readout is the index of its `id` within `bit_names`,
/// the ordered list of bit names for the experiment. Ids must match exactly.
/// # Errors
/// * `ReadoutError::UnknownBitName` if a readout id is absent from
///   `bit_names`.
/// # Example
/// ```
/// use merfish_readout::readout::{assign_on_bit_positions, ReadoutSeq};
/// let mut readouts = vec![
///     ReadoutSeq::new("RS0015", "ACACTACCACCATTTCCTAT"),
///     ReadoutSeq::new("RS0083", "ACTCCACTACTACTCACTCT"),
/// ];
/// assign_on_bit_positions(&mut readouts, &["RS0083", "RS0015"]).unwrap();
/// assert_eq!(readouts[0].on_bit, Some(1));
/// assert_eq!(readouts[1].on_bit, Some(0));
/// ```
pub fn assign_on_bit_positions<S: AsRef<str>>(
    readouts: &mut [ReadoutSeq],
    bit_names: &[S],
) -> Result<(), ReadoutError> {
    for readout in readouts.iter_mut() {
        let position = bit_names
            .iter()
            .position(|name| name.as_ref() == readout.id)
            .ok_or_else(|| ReadoutError::UnknownBitName(readout.id.clone()))?;
        readout.on_bit = Some(position);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_on_bit_positions() {
        let mut readouts = vec![
            ReadoutSeq::new("RS0332", "TATCCTTCAATCCCTCCACA"),
            ReadoutSeq::new("RS0175", "ACCCTCTAACTTCCATCACA"),
            ReadoutSeq::new("RS0109", "AATCTCACCTTCCGCTTCAC"),
        ];
        let bit_names = vec!["RS0109", "RS0175", "RS0332"];

        assign_on_bit_positions(&mut readouts, &bit_names).unwrap();

        assert_eq!(readouts[0].on_bit, Some(2));
        assert_eq!(readouts[1].on_bit, Some(1));
        assert_eq!(readouts[2].on_bit, Some(0));
    }

    #[test]
    fn test_assign_on_bit_positions_unknown_id() {
        let mut readouts = vec![ReadoutSeq::new("RS9999", "ACACTACCACCATTTCCTAT")];
        let bit_names = vec!["RS0109".to_string(), "RS0175".to_string()];

        let err = assign_on_bit_positions(&mut readouts, &bit_names).unwrap_err();
        assert_eq!(err, ReadoutError::UnknownBitName("RS9999".to_string()));
        // The failing record is left untouched.
        assert_eq!(readouts[0].on_bit, None);
    }
}
