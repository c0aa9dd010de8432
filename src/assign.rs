use std::collections::HashMap;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::barcode::{barcode_to_on_bits, on_bits_to_barcode};
use crate::error::ReadoutError;
use crate::params::AssignParams;
use crate::probe::ProbeTable;
use crate::readout::ReadoutSeq;

// MARK: on-bit lookup

/// Resolve each on-bit to its (readout id, readout sequence) pair.
/// If several rows share an on-bit, the first row in table order wins.
fn on_bit_lookup(
    readouts: &[ReadoutSeq],
    on_bits: &[usize],
) -> Result<HashMap<usize, (String, String)>, ReadoutError> {
    let mut lookup = HashMap::new();
    for &on_bit in on_bits {
        let entry = readouts
            .iter()
            .find(|readout| readout.on_bit == Some(on_bit))
            .ok_or(ReadoutError::MissingOnBit(on_bit))?;
        lookup.insert(on_bit, (entry.id.clone(), entry.sequence.clone()));
    }
    Ok(lookup)
}

// MARK: sampling

/// Choose the on-bits for one probe.
/// With `force_single_bit`, one on-bit is chosen uniformly and repeated.
/// Otherwise the sample is drawn without replacement when the on-bit set is
/// large enough, with replacement when it is not.
fn sample_on_bits(
    on_bits: &[usize],
    readouts_per_probe: usize,
    force_single_bit: bool,
    rng: &mut ChaCha8Rng,
) -> Result<Vec<usize>, ReadoutError> {
    if force_single_bit {
        let chosen = on_bits
            .choose(rng)
            .copied()
            .ok_or(ReadoutError::EmptyOnBitSet)?;
        return Ok(vec![chosen; readouts_per_probe]);
    }

    if on_bits.len() >= readouts_per_probe {
        let mut pool = on_bits.to_vec();
        let (sampled, _) = pool.partial_shuffle(rng, readouts_per_probe);
        Ok(sampled.to_vec())
    } else {
        (0..readouts_per_probe)
            .map(|_| {
                on_bits
                    .choose(rng)
                    .copied()
                    .ok_or(ReadoutError::EmptyOnBitSet)
            })
            .collect()
    }
}

// MARK: assign_readouts

/// Add readout sequences to the probes of one transcript by randomly chosen
/// on-bits.
///
/// The returned table holds the same probes sorted by ascending `shift`
/// (ties keep their input order). Each probe gets `readouts_per_probe`
/// readouts sampled from the barcode's on-bit set: the first half of the
/// sample (rounded down) is prepended in front of the target sequence, the
/// rest is appended behind it, each separated from its neighbor by the
/// spacer. Prepending works outward, so the earliest sampled readout of the
/// left group sits closest to the target. `readout_names` records the ids in
/// the same 5'->3' order, colon-separated, with an empty field at the
/// position of the target sequence. `probe_barcode` is the bitstring of the
/// sampled on-bits at full barcode length.
///
/// The random source is reseeded from OS entropy on every call. Worker pools
/// can hand tasks a copy of inherited generator state, so reseeding here is
/// what keeps sampling independent across parallel invocations.
///
/// # Arguments
/// * `probes` - The probe table of one transcript.
/// * `readouts` - Readout sequences with their on-bit positions filled in.
/// * `barcode` - The barcode of this transcript's gene.
/// * `params` - Assignment options; `gene_id_key` and `worker_count` are not
///   used here.
/// # Returns
/// * The updated probe table.
/// # Errors
/// * `ReadoutError::EmptyOnBitSet` if the barcode has no on-bits.
/// * `ReadoutError::MissingOnBit` if an on-bit has no readout table row.
/// # Example
/// ```
/// use merfish_readout::assign::assign_readouts;
/// use merfish_readout::params::AssignParams;
/// use merfish_readout::probe::Probe;
/// use merfish_readout::readout::ReadoutSeq;
///
/// let probes = vec![Probe::new("ACGTACGT", 0)];
/// let readouts = vec![ReadoutSeq::with_on_bit("RS0015", "GGGG", 1)];
/// let params = AssignParams::new(1);
///
/// // One on-bit and one readout per probe leave nothing to chance.
/// let updated = assign_readouts(probes, &readouts, "01", &params).unwrap();
/// assert_eq!(updated[0].readout_names.as_deref(), Some(":RS0015"));
/// assert_eq!(updated[0].probe_barcode.as_deref(), Some("01"));
/// assert_eq!(updated[0].target_readout_sequence.as_deref(), Some("ACGTACGTGGGG"));
/// ```
pub fn assign_readouts(
    probes: ProbeTable,
    readouts: &[ReadoutSeq],
    barcode: &str,
    params: &AssignParams,
) -> Result<ProbeTable, ReadoutError> {
    // Fresh seed per invocation, see the note above.
    let mut rng = ChaCha8Rng::from_os_rng();

    let on_bits = barcode_to_on_bits(barcode);
    if on_bits.is_empty() {
        return Err(ReadoutError::EmptyOnBitSet);
    }
    let lookup = on_bit_lookup(readouts, &on_bits)?;

    let mut probes = probes;
    probes.sort_by_key(|probe| probe.shift);

    let readouts_per_probe = *params.readouts_per_probe();
    let spacer = params.spacer();
    let n_left = readouts_per_probe / 2;

    for probe in probes.iter_mut() {
        let sampled = sample_on_bits(
            &on_bits,
            readouts_per_probe,
            *params.force_single_bit(),
            &mut rng,
        )?;

        let mut seq = probe.target_sequence.clone();
        let mut names = String::new();
        for (j, on_bit) in sampled.iter().enumerate() {
            let (ro_name, ro_seq) = lookup
                .get(on_bit)
                .ok_or(ReadoutError::MissingOnBit(*on_bit))?;
            if j < n_left {
                names = format!("{}:{}", ro_name, names);
                seq = format!("{}{}{}", ro_seq, spacer, seq);
            } else {
                names = format!("{}:{}", names, ro_name);
                seq = format!("{}{}{}", seq, spacer, ro_seq);
            }
        }

        probe.readout_names = Some(names);
        probe.probe_barcode = Some(on_bits_to_barcode(&sampled, barcode.len()));
        probe.target_readout_sequence = Some(seq);
    }

    println!("Added readout sequences to {} probes.", probes.len());

    Ok(probes)
}
