use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use rayon::prelude::*;

use crate::assign::assign_readouts;
use crate::barcode::{find_barcode, BarcodeRecord};
use crate::error::ReadoutError;
use crate::params::AssignParams;
use crate::probe::{ProbeDict, ProbeTable};
use crate::readout::ReadoutSeq;

// MARK: TranscriptTask
/// One unit of work for the pool: a transcript's probe table together with
/// the keys and barcode it travels with.
struct TranscriptTask {
    gene: String,
    transcript: String,
    probes: ProbeTable,
    barcode: String,
}

// MARK: assign_readouts_batch

/// Add readout sequences to every probe table of a probe dictionary.
///
/// Each gene's barcode is resolved from the barcode table (first matching
/// row wins), then one [`assign_readouts`] call per transcript is dispatched
/// across a pool of `worker_count` threads. The dictionary is updated in
/// place once the whole batch has completed, each result written back under
/// its own (gene, transcript) key, so completion order never matters. The
/// first failing task aborts the batch; in that case the dictionary is left
/// untouched and the error carries the failing keys.
///
/// Tasks are built in sorted key order rather than map iteration order, so
/// the dispatch sequence is deterministic run to run.
///
/// # Arguments
/// * `probe_dict` - Nested gene -> transcript -> probe table mapping.
/// * `readouts` - Readout sequences with their on-bit positions filled in.
/// * `barcode_table` - One row per gene with its barcode string.
/// * `params` - Assignment options, including `gene_id_key` and
///   `worker_count`.
/// # Errors
/// * `ReadoutError::InvalidParams` if the parameters fail validation.
/// * `ReadoutError::GeneNotFound` if a gene of `probe_dict` has no barcode
///   table row.
/// * `ReadoutError::PoolBuild` if the worker pool cannot be constructed.
/// * `ReadoutError::Transcript` wrapping the first worker-side failure.
/// # Example
/// ```
/// use std::collections::HashMap;
/// use merfish_readout::barcode::BarcodeRecord;
/// use merfish_readout::batch::assign_readouts_batch;
/// use merfish_readout::params::AssignParams;
/// use merfish_readout::probe::Probe;
/// use merfish_readout::readout::ReadoutSeq;
///
/// let mut probe_dict = HashMap::from([(
///     "SOX2".to_string(),
///     HashMap::from([("SOX2-201".to_string(), vec![Probe::new("ACGTACGT", 0)])]),
/// )]);
/// let readouts = vec![ReadoutSeq::with_on_bit("RS0015", "GGGG", 0)];
/// let barcode_table = vec![BarcodeRecord::new("SOX2", "ENSG001", "10")];
/// let params = AssignParams::new(1);
///
/// assign_readouts_batch(&mut probe_dict, &readouts, &barcode_table, &params).unwrap();
/// let probe = &probe_dict["SOX2"]["SOX2-201"][0];
/// assert_eq!(probe.target_readout_sequence.as_deref(), Some("ACGTACGTGGGG"));
/// ```
pub fn assign_readouts_batch(
    probe_dict: &mut ProbeDict,
    readouts: &[ReadoutSeq],
    barcode_table: &[BarcodeRecord],
    params: &AssignParams,
) -> Result<(), ReadoutError> {
    params.validate()?;

    // Flatten the nested mapping into an explicit task list so dispatch does
    // not depend on HashMap iteration order. Tables are cloned into tasks;
    // the dictionary is only touched again after the whole batch succeeded.
    let mut tasks = Vec::new();
    for (gene, transcripts) in probe_dict.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
        let barcode = find_barcode(barcode_table, *params.gene_id_key(), gene)?;
        for (transcript, probes) in transcripts.iter().sorted_by(|a, b| a.0.cmp(b.0)) {
            tasks.push(TranscriptTask {
                gene: gene.clone(),
                transcript: transcript.clone(),
                probes: probes.clone(),
                barcode: barcode.to_string(),
            });
        }
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(*params.worker_count())
        .build()
        .map_err(|e| ReadoutError::PoolBuild(e.to_string()))?;

    let progress = ProgressBar::new(tasks.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} transcripts").unwrap(),
    );

    let results: Result<Vec<(String, String, ProbeTable)>, ReadoutError> = pool.install(|| {
        tasks
            .into_par_iter()
            .map(|task| {
                let updated = assign_readouts(task.probes, readouts, &task.barcode, params)
                    .map_err(|e| ReadoutError::Transcript {
                        gene: task.gene.clone(),
                        transcript: task.transcript.clone(),
                        source: Box::new(e),
                    })?;
                progress.inc(1);
                Ok((task.gene, task.transcript, updated))
            })
            .collect()
    });
    let results = results?;
    progress.finish_and_clear();

    // Fan-in by key lookup, never by completion order.
    for (gene, transcript, table) in results {
        if let Some(transcripts) = probe_dict.get_mut(&gene) {
            transcripts.insert(transcript, table);
        }
    }

    Ok(())
}
