use crate::analysis::frame::{analyse_resolved, FrameAnalysis};
use crate::error::NetworkError;
use crate::fragments::{Degeneracy, Fragment};
use crate::io::{write_header, write_settings, Configuration};
use log::{info, log_enabled, warn, Level};
use ndarray::prelude::*;
use rayon::prelude::*;

/// Analyses a time series of coupling matrices. `h_frag` has the shape
/// `(n_frames, M, M)` and `frames` holds the trajectory index of each matrix.
///
/// The frames are processed in parallel. Each frame gets its own result, so an invalid
/// coupling matrix only fails its own frame. Errors that concern the whole series (shape
/// of the frame index, degeneracy) are returned directly.
pub fn analyse_series(
    frames: &[usize],
    h_frag: ArrayView3<f64>,
    fragments: &[Fragment],
    degeneracy: &Degeneracy,
    config: &Configuration,
) -> Result<Vec<Result<FrameAnalysis, NetworkError>>, NetworkError> {
    let n_frames: usize = h_frag.len_of(Axis(0));
    if frames.len() != n_frames {
        return Err(NetworkError::DimensionMismatch {
            context: "number of frames",
            expected: n_frames,
            found: frames.len(),
        });
    }
    let degeneracy: Vec<usize> = degeneracy.resolve(fragments)?;
    if log_enabled!(Level::Info) {
        write_header();
        write_settings(config);
    }
    info!("Processing {} frames", n_frames);

    let results: Vec<Result<FrameAnalysis, NetworkError>> = frames
        .par_iter()
        .enumerate()
        .map(|(k, frame)| {
            analyse_resolved(
                *frame,
                h_frag.index_axis(Axis(0), k),
                fragments,
                &degeneracy,
                config,
            )
        })
        .collect();

    for (frame, result) in frames.iter().zip(results.iter()) {
        if let Err(err) = result {
            warn!("analysis of frame {} failed: {}", frame, err);
        }
    }
    Ok(results)
}

/// Size of the largest network in every successfully analysed frame.
pub fn largest_network_sizes(results: &[Result<FrameAnalysis, NetworkError>]) -> Vec<Option<usize>> {
    results
        .iter()
        .map(|result| {
            result
                .as_ref()
                .ok()
                .map(|analysis| analysis.largest_network().map_or(0, |n| n.node_count()))
        })
        .collect()
}
