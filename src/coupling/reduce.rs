use crate::defaults::SYMMETRY_TOL;
use crate::error::NetworkError;
use crate::fragments::degeneracy::check_degeneracy;
use crate::fragments::{check_fragment_order, orbital_slices, Fragment, OrbitalSlice};
use itertools::Itertools;
use log::{debug, warn};
use ndarray::prelude::*;

/// Reduces the orbital-expanded coupling matrix `h_full` (M x M) to one coupling per pair of
/// fragments (N x N).
///
/// The coupling between fragment a and b is the element of the block
/// `h_full[orbitals(a), orbitals(b)]` with the largest absolute value, i.e. the dominant
/// coupling channel between the degenerate orbitals of both fragments. The magnitude of this
/// element is stored. The diagonal of the reduced matrix is zero, since a fragment does not
/// couple to itself in the network.
pub fn reduce_couplings(
    h_full: ArrayView2<f64>,
    fragments: &[Fragment],
    degeneracy: &[usize],
) -> Result<Array2<f64>, NetworkError> {
    let (rows, cols): (usize, usize) = h_full.dim();
    if rows != cols {
        return Err(NetworkError::DimensionMismatch {
            context: "coupling matrix columns",
            expected: rows,
            found: cols,
        });
    }
    check_fragment_order(fragments)?;
    let n_frags: usize = fragments.len();
    if degeneracy.len() != n_frags {
        return Err(NetworkError::DimensionMismatch {
            context: "degeneracy length",
            expected: n_frags,
            found: degeneracy.len(),
        });
    }
    check_degeneracy(degeneracy)?;
    check_finite(h_full)?;
    let n_orbs: usize = degeneracy.iter().sum();
    if n_orbs != rows {
        return Err(NetworkError::DimensionMismatch {
            context: "degeneracy sum",
            expected: rows,
            found: n_orbs,
        });
    }

    let asymmetry: f64 = max_asymmetry(h_full);
    let scale: f64 = h_full.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
    if asymmetry > SYMMETRY_TOL * scale.max(1.0) {
        warn!(
            "coupling matrix is not symmetric (max. deviation {:e}), the larger magnitude \
             of both blocks is used",
            asymmetry
        );
    }

    let slices: Vec<OrbitalSlice> = orbital_slices(degeneracy);
    let mut h: Array2<f64> = Array2::zeros([n_frags, n_frags]);
    for (a, b) in (0..n_frags).tuple_combinations::<(usize, usize)>() {
        let value: f64 =
            block_max_abs(h_full, &slices[a], &slices[b]).max(block_max_abs(
                h_full,
                &slices[b],
                &slices[a],
            ));
        h[[a, b]] = value;
        h[[b, a]] = value;
    }
    debug!(
        "reduced coupling matrix from {} orbitals to {} fragments",
        rows, n_frags
    );
    Ok(h)
}

/// Largest absolute value in the block between the orbitals of two fragments.
fn block_max_abs(h_full: ArrayView2<f64>, a: &OrbitalSlice, b: &OrbitalSlice) -> f64 {
    h_full
        .slice(s![a.orb_as_range(), b.orb_as_range()])
        .iter()
        .fold(0.0_f64, |acc, x| acc.max(x.abs()))
}

/// Rejects NaN and infinite couplings, which would otherwise vanish in the max-reductions.
pub fn check_finite(h: ArrayView2<f64>) -> Result<(), NetworkError> {
    match h.indexed_iter().find(|(_, x)| !x.is_finite()) {
        Some(((row, col), value)) => Err(NetworkError::NonFiniteCoupling {
            row,
            col,
            value: *value,
        }),
        None => Ok(()),
    }
}

/// Largest absolute deviation between `h` and its transpose.
pub fn max_asymmetry(h: ArrayView2<f64>) -> f64 {
    h.iter()
        .zip(h.t().iter())
        .fold(0.0_f64, |acc, (x, y)| acc.max((x - y).abs()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragments::fragments_from_count;
    use approx::AbsDiffEq;

    #[test]
    fn reduce_degenerate_blocks_to_dominant_coupling() {
        // fragment 0: one orbital, fragment 1: two orbitals, fragment 2: one orbital
        let h_full: Array2<f64> = array![
            [-5.0, 0.1, -0.4, 0.0],
            [0.1, -4.0, 0.0, 0.3],
            [-0.4, 0.0, -4.0, 0.2],
            [0.0, 0.3, 0.2, -6.0]
        ];
        let h = reduce_couplings(h_full.view(), &fragments_from_count(3), &[1, 2, 1]).unwrap();
        let expected: Array2<f64> = array![
            [0.0, 0.4, 0.0],
            [0.4, 0.0, 0.3],
            [0.0, 0.3, 0.0]
        ];
        assert!(h.abs_diff_eq(&expected, 1e-14));
        assert!(h.abs_diff_eq(&h.t(), 0.0));
    }

    #[test]
    fn non_degenerate_couplings_are_copied() {
        let h_full: Array2<f64> = array![[1.0, -0.5, 0.2], [-0.5, 1.0, 0.0], [0.2, 0.0, 1.0]];
        let h = reduce_couplings(h_full.view(), &fragments_from_count(3), &[1, 1, 1]).unwrap();
        let expected: Array2<f64> = array![[0.0, 0.5, 0.2], [0.5, 0.0, 0.0], [0.2, 0.0, 0.0]];
        assert!(h.abs_diff_eq(&expected, 1e-14));
    }

    #[test]
    fn asymmetric_input_takes_larger_block() {
        let h_full: Array2<f64> = array![[0.0, 0.1], [0.7, 0.0]];
        let h = reduce_couplings(h_full.view(), &fragments_from_count(2), &[1, 1]).unwrap();
        assert_eq!(h[[0, 1]], 0.7);
        assert_eq!(h[[1, 0]], 0.7);
    }

    #[test]
    fn non_finite_couplings_are_rejected() {
        let h_full: Array2<f64> = array![[0.0, f64::NAN], [f64::NAN, 0.0]];
        let err = reduce_couplings(h_full.view(), &fragments_from_count(2), &[1, 1]).unwrap_err();
        assert!(matches!(
            err,
            NetworkError::NonFiniteCoupling { row: 0, col: 1, .. }
        ));
        // infinities inside a degenerate block
        let mut h_full: Array2<f64> = Array2::zeros([3, 3]);
        h_full[[2, 0]] = f64::NEG_INFINITY;
        assert_eq!(
            reduce_couplings(h_full.view(), &fragments_from_count(2), &[1, 2]).unwrap_err(),
            NetworkError::NonFiniteCoupling {
                row: 2,
                col: 0,
                value: f64::NEG_INFINITY
            }
        );
    }

    #[test]
    fn dimension_errors() {
        let h_full: Array2<f64> = Array2::zeros([4, 4]);
        let fragments = fragments_from_count(3);
        assert_eq!(
            reduce_couplings(h_full.view(), &fragments, &[1, 1, 1]).unwrap_err(),
            NetworkError::DimensionMismatch {
                context: "degeneracy sum",
                expected: 4,
                found: 3
            }
        );
        assert!(matches!(
            reduce_couplings(h_full.view(), &fragments, &[2, 2]).unwrap_err(),
            NetworkError::DimensionMismatch { .. }
        ));
        assert_eq!(
            reduce_couplings(h_full.view(), &fragments, &[4, 0, 0]).unwrap_err(),
            NetworkError::InvalidDegeneracy {
                fragment: 1,
                value: 0
            }
        );
        let rectangular: Array2<f64> = Array2::zeros([4, 3]);
        assert!(matches!(
            reduce_couplings(rectangular.view(), &fragments, &[2, 1, 1]).unwrap_err(),
            NetworkError::DimensionMismatch { .. }
        ));
    }
}
