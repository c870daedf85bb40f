use crate::defaults::{PINV_INSTABILITY_RATIO, PINV_RTOL_FACTOR, PINV_STRICT};
use crate::error::NetworkError;
use log::{debug, warn};
use nalgebra::{DMatrix, SymmetricEigen};
use ndarray::prelude::*;
use ndarray_stats::QuantileExt;
use serde::{Deserialize, Serialize};

fn default_rtol_factor() -> f64 {
    PINV_RTOL_FACTOR
}
fn default_instability_ratio() -> f64 {
    PINV_INSTABILITY_RATIO
}
fn default_strict() -> bool {
    PINV_STRICT
}

/// Numerical settings of the Moore-Penrose pseudoinverse of a graph Laplacian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PseudoInverseOptions {
    /// Eigenvalues with `|lambda| <= rtol_factor * n * eps * max|lambda|` are treated as zero
    #[serde(default = "default_rtol_factor")]
    pub rtol_factor: f64,
    /// The inversion is flagged as unstable if the smallest retained eigenvalue is below
    /// `instability_ratio * max|lambda|`
    #[serde(default = "default_instability_ratio")]
    pub instability_ratio: f64,
    /// Return an error instead of logging a warning for unstable inversions
    #[serde(default = "default_strict")]
    pub strict: bool,
}

impl Default for PseudoInverseOptions {
    fn default() -> Self {
        PseudoInverseOptions {
            rtol_factor: PINV_RTOL_FACTOR,
            instability_ratio: PINV_INSTABILITY_RATIO,
            strict: PINV_STRICT,
        }
    }
}

impl PseudoInverseOptions {
    /// Absolute tolerance for a matrix of dimension `n` with the largest eigenvalue magnitude
    /// `largest`.
    pub fn tolerance(&self, n: usize, largest: f64) -> f64 {
        self.rtol_factor * n as f64 * f64::EPSILON * largest
    }
}

/// Pseudoinverse of a Laplacian together with the information of the eigen decomposition
/// that was used to compute it.
#[derive(Debug, Clone)]
pub struct PseudoInverse {
    pub matrix: Array2<f64>,
    /// Eigenvalues of the Laplacian in the order returned by the eigensolver
    pub eigenvalues: Array1<f64>,
    /// Absolute tolerance below which eigenvalues were discarded
    pub tolerance: f64,
    /// Number of discarded eigenvalues
    pub null_modes: usize,
    /// True if the inversion was close to the tolerance
    pub unstable: bool,
}

/// Moore-Penrose pseudoinverse of a symmetric graph Laplacian, computed from its eigen
/// decomposition: `L+ = sum_k 1/lambda_k v_k v_k^T` over all eigenvalues above the tolerance.
///
/// The Laplacian of a connected graph has exactly one zero eigenvalue (the all-ones vector).
/// Nothing is known about the graph here, so more than one eigenvalue below the tolerance
/// means that the graph is disconnected. If no eigenvalue falls below the tolerance, the
/// smallest one is discarded; the inversion is flagged as unstable if that eigenvalue was not
/// small compared to the largest one.
pub fn pseudo_inverse(
    laplacian: ArrayView2<f64>,
    options: &PseudoInverseOptions,
) -> Result<PseudoInverse, NetworkError> {
    invert(laplacian, options, false)
}

/// Pseudoinverse of the Laplacian of a graph that is known to be connected.
///
/// Only the smallest eigenvalue is the zero mode. Further eigenvalues below the tolerance
/// belong to couplings that vanish in floating point; they are discarded as well and the
/// inversion is flagged as unstable instead of being reported as a disconnected graph.
pub fn pseudo_inverse_connected(
    laplacian: ArrayView2<f64>,
    options: &PseudoInverseOptions,
) -> Result<PseudoInverse, NetworkError> {
    invert(laplacian, options, true)
}

fn invert(
    laplacian: ArrayView2<f64>,
    options: &PseudoInverseOptions,
    connected: bool,
) -> Result<PseudoInverse, NetworkError> {
    let n: usize = laplacian.nrows();
    if n < 2 {
        return Err(NetworkError::EmptyGraph { nodes: n });
    }
    if laplacian.ncols() != n {
        return Err(NetworkError::DimensionMismatch {
            context: "Laplacian columns",
            expected: n,
            found: laplacian.ncols(),
        });
    }

    let eig = SymmetricEigen::new(DMatrix::from_fn(n, n, |i, j| laplacian[[i, j]]));
    let eigenvalues: Array1<f64> = eig.eigenvalues.iter().copied().collect();
    let eigenvectors: Array2<f64> =
        Array2::from_shape_fn((n, n), |(i, j)| eig.eigenvectors[(i, j)]);

    let magnitudes: Array1<f64> = eigenvalues.mapv(f64::abs);
    let (largest, zero_mode): (f64, usize) = match (magnitudes.max(), magnitudes.argmin()) {
        (Ok(value), Ok(idx)) => (*value, idx),
        _ => {
            return Err(NetworkError::NumericalInstability {
                smallest: f64::NAN,
                largest: f64::NAN,
            })
        }
    };
    let tolerance: f64 = options.tolerance(n, largest);
    // smallest eigenvalue apart from the zero mode
    let smallest: f64 = magnitudes
        .iter()
        .enumerate()
        .filter(|(k, _)| *k != zero_mode)
        .fold(f64::INFINITY, |acc, (_, x)| acc.min(*x));

    let mut keep: Array1<bool> = magnitudes.mapv(|x| x > tolerance);
    let below: usize = keep.iter().filter(|k| !**k).count();
    let mut unstable: bool = false;
    if below > 1 {
        if !connected {
            return Err(NetworkError::DisconnectedGraph { null_modes: below });
        }
        warn!(
            "{} eigenvalues of the {}x{} Laplacian of a connected network are below the \
             tolerance {:e}, the weakest couplings are lost",
            below - 1,
            n,
            n,
            tolerance
        );
        unstable = true;
    } else if below == 0 {
        // the zero mode of the Laplacian was not resolved within the tolerance,
        // the smallest eigenvalue is dropped instead
        keep[zero_mode] = false;
        if magnitudes[zero_mode] > options.instability_ratio * largest {
            unstable = true;
        }
    }
    let null_modes: usize = keep.iter().filter(|k| !**k).count();

    if smallest < options.instability_ratio * largest {
        unstable = true;
    }
    if unstable {
        if options.strict {
            return Err(NetworkError::NumericalInstability { smallest, largest });
        }
        warn!(
            "pseudoinverse of the {}x{} Laplacian is ill-conditioned: smallest non-zero \
             eigenvalue {:e}, largest {:e}, tolerance {:e}",
            n, n, smallest, largest, tolerance
        );
    }

    let inverse: Array1<f64> = eigenvalues
        .iter()
        .zip(keep.iter())
        .map(|(lambda, k)| if *k { 1.0 / lambda } else { 0.0 })
        .collect();
    let scaled: Array2<f64> = &eigenvectors * &inverse;
    let matrix: Array2<f64> = scaled.dot(&eigenvectors.t());
    debug!(
        "pseudoinverse of {}x{} Laplacian, tolerance {:e}, {} null mode(s)",
        n, n, tolerance, null_modes
    );

    Ok(PseudoInverse {
        matrix,
        eigenvalues,
        tolerance,
        null_modes,
        unstable,
    })
}
