use serde::{Deserialize, Serialize};

use crate::error::ReadoutError;

// MARK: BarcodeRecord
/// One gene row of the barcode table.
/// The `barcode_str` field is a fixed-length string over '0'/'1' whose length
/// equals the total number of imaging bits in the experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarcodeRecord {
    pub name: String,
    pub id: String,
    pub barcode_str: String,
}

impl BarcodeRecord {
    pub fn new(name: &str, id: &str, barcode_str: &str) -> Self {
        BarcodeRecord {
            name: name.to_string(),
            id: id.to_string(),
            barcode_str: barcode_str.to_string(),
        }
    }

    /// The gene identifier selected by `key`.
    pub fn gene_id(&self, key: GeneIdKey) -> &str {
        match key {
            GeneIdKey::Name => &self.name,
            GeneIdKey::Id => &self.id,
        }
    }
}

// MARK: GeneIdKey
/// Which barcode table column identifies genes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneIdKey {
    #[default]
    Name,
    Id,
}

/// Return the on-bit positions of a barcode in ascending order.
/// # Example
/// ```
/// use merfish_readout::barcode::barcode_to_on_bits;
/// assert_eq!(barcode_to_on_bits("1010"), vec![0, 2]);
/// assert_eq!(barcode_to_on_bits(""), Vec::<usize>::new());
/// ```
pub fn barcode_to_on_bits(barcode: &str) -> Vec<usize> {
    barcode
        .bytes()
        .enumerate()
        .filter(|(_, b)| *b == b'1')
        .map(|(i, _)| i)
        .collect()
}

/// Build a barcode string of the given length from a list of on-bits.
/// Duplicate on-bits are allowed. Indices outside `[0, barcode_length)` are
/// silently dropped rather than rejected; they can never set a position
/// inside the output string. Input order is irrelevant.
/// # Example
/// ```
/// use merfish_readout::barcode::on_bits_to_barcode;
/// assert_eq!(on_bits_to_barcode(&[2, 0], 4), "1010");
/// assert_eq!(on_bits_to_barcode(&[1, 9], 4), "0100");
/// ```
pub fn on_bits_to_barcode(on_bits: &[usize], barcode_length: usize) -> String {
    (0..barcode_length)
        .map(|i| if on_bits.contains(&i) { '1' } else { '0' })
        .collect()
}

/// Look up the barcode of a gene in the barcode table.
/// If several rows share the same identifier, the first row in table order
/// wins.
/// # Errors
/// * `ReadoutError::GeneNotFound` if no row matches `gene`.
pub fn find_barcode<'a>(
    barcode_table: &'a [BarcodeRecord],
    key: GeneIdKey,
    gene: &str,
) -> Result<&'a str, ReadoutError> {
    barcode_table
        .iter()
        .find(|record| record.gene_id(key) == gene)
        .map(|record| record.barcode_str.as_str())
        .ok_or_else(|| ReadoutError::GeneNotFound(gene.to_string()))
}

// MARK: Tests
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_barcode_to_on_bits() {
        assert_eq!(barcode_to_on_bits("1010"), vec![0, 2]);
        assert_eq!(barcode_to_on_bits("0000"), Vec::<usize>::new());
        assert_eq!(barcode_to_on_bits("1111"), vec![0, 1, 2, 3]);
        assert_eq!(barcode_to_on_bits(""), Vec::<usize>::new());
    }

    #[test]
    fn test_on_bits_to_barcode() {
        assert_eq!(on_bits_to_barcode(&[0, 2], 4), "1010");
        assert_eq!(on_bits_to_barcode(&[2, 0], 4), "1010");
        assert_eq!(on_bits_to_barcode(&[], 4), "0000");
        assert_eq!(on_bits_to_barcode(&[], 0), "");
    }

    #[test]
    fn test_on_bits_to_barcode_duplicates_and_out_of_range() {
        assert_eq!(on_bits_to_barcode(&[2, 2, 2], 4), "0010");
        assert_eq!(on_bits_to_barcode(&[1, 9], 4), "0100");
        assert_eq!(on_bits_to_barcode(&[7], 4), "0000");
    }

    #[test]
    fn test_round_trips() {
        for barcode in ["1010", "0001", "1111", "0000", "100110"] {
            let on_bits = barcode_to_on_bits(barcode);
            assert_eq!(on_bits_to_barcode(&on_bits, barcode.len()), barcode);
        }

        let on_bits = vec![1, 3, 4];
        let barcode = on_bits_to_barcode(&on_bits, 6);
        assert_eq!(barcode_to_on_bits(&barcode), on_bits);
    }

    #[test]
    fn test_find_barcode() {
        let table = vec![
            BarcodeRecord::new("SOX2", "ENSG001", "1010"),
            BarcodeRecord::new("POU5F1", "ENSG002", "0101"),
            BarcodeRecord::new("POU5F1", "ENSG003", "1111"),
        ];

        assert_eq!(find_barcode(&table, GeneIdKey::Name, "SOX2").unwrap(), "1010");
        assert_eq!(
            find_barcode(&table, GeneIdKey::Id, "ENSG002").unwrap(),
            "0101"
        );
        // Duplicate names resolve to the first row in table order.
        assert_eq!(
            find_barcode(&table, GeneIdKey::Name, "POU5F1").unwrap(),
            "0101"
        );

        let err = find_barcode(&table, GeneIdKey::Name, "NANOG").unwrap_err();
        assert_eq!(err, ReadoutError::GeneNotFound("NANOG".to_string()));
    }

    #[test]
    fn test_gene_id_key_serde() {
        assert_eq!(
            serde_json::from_str::<GeneIdKey>("\"name\"").unwrap(),
            GeneIdKey::Name
        );
        assert_eq!(
            serde_json::from_str::<GeneIdKey>("\"id\"").unwrap(),
            GeneIdKey::Id
        );
        assert_eq!(serde_json::to_string(&GeneIdKey::Name).unwrap(), "\"name\"");
    }
}
