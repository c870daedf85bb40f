pub(crate) mod degeneracy;
mod slices;

pub use degeneracy::Degeneracy;
pub use slices::{fragment_of_orbital, orbital_slices, OrbitalSlice};

use crate::error::NetworkError;
use serde::{Deserialize, Serialize};

/// A single molecule of the material. The atoms themselves are owned by the trajectory
/// handling; for the network analysis only the index and the size of the fragment are needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Position of the fragment in the fragment list, `0..N`
    pub index: usize,
    /// Number of atoms in the fragment
    pub atom_count: usize,
    /// Name of the (first) residue of the fragment. Only required if the degeneracy
    /// is given per residue name.
    #[serde(default)]
    pub residue_name: Option<String>,
}

impl Fragment {
    pub fn new(index: usize, atom_count: usize) -> Self {
        Fragment {
            index,
            atom_count,
            residue_name: None,
        }
    }

    pub fn with_residue(index: usize, atom_count: usize, residue_name: &str) -> Self {
        Fragment {
            index,
            atom_count,
            residue_name: Some(String::from(residue_name)),
        }
    }
}

/// Creates `n` anonymous fragments with the indices `0..n`.
pub fn fragments_from_count(n: usize) -> Vec<Fragment> {
    (0..n).map(|i| Fragment::new(i, 0)).collect()
}

/// The rows of every coupling matrix are the fragments in list order, so the index of each
/// fragment has to be its position in the list.
pub fn check_fragment_order(fragments: &[Fragment]) -> Result<(), NetworkError> {
    match fragments
        .iter()
        .enumerate()
        .find(|(position, frag)| frag.index != *position)
    {
        Some((position, frag)) => Err(NetworkError::DimensionMismatch {
            context: "fragment index",
            expected: position,
            found: frag.index,
        }),
        None => Ok(()),
    }
}
