use ndarray::Slice;
use std::ops::Range;

/// Type that holds the position of the degenerate orbitals of one fragment inside the
/// orbital-expanded coupling matrix
#[derive(Debug, Clone)]
pub struct OrbitalSlice {
    /// [Slice](ndarray::prelude::Slice) for the orbitals of the fragment
    pub orb: Slice,
    /// Similar to the orbital slice, but as an Range. In contrast to the Slice the Range does not
    /// implement the Copy trait
    orb_range: Range<usize>,
}

impl OrbitalSlice {
    pub fn new(orb_index: usize, n_orbs: usize) -> Self {
        OrbitalSlice {
            orb: Slice::from(orb_index..(orb_index + n_orbs)),
            orb_range: orb_index..(orb_index + n_orbs),
        }
    }

    /// Return the range of the orbitals corresponding to this fragment
    pub fn orb_as_range(&self) -> Range<usize> {
        self.orb_range.clone()
    }

    pub fn len(&self) -> usize {
        self.orb_range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orb_range.is_empty()
    }
}

/// Start and stop indices of every fragment in the coupling matrix, built from the
/// cumulative sum of the degeneracies.
pub fn orbital_slices(degeneracy: &[usize]) -> Vec<OrbitalSlice> {
    let mut start: usize = 0;
    degeneracy
        .iter()
        .map(|&n| {
            let slice = OrbitalSlice::new(start, n);
            start += n;
            slice
        })
        .collect()
}

/// Maps every row of the coupling matrix to the index of the fragment it belongs to.
pub fn fragment_of_orbital(degeneracy: &[usize]) -> Vec<usize> {
    degeneracy
        .iter()
        .enumerate()
        .flat_map(|(frag, &n)| std::iter::repeat(frag).take(n))
        .collect()
}
