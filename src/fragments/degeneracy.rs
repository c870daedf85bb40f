use crate::error::NetworkError;
use crate::fragments::Fragment;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

/// Number of degenerate frontier orbitals that every fragment contributes to the
/// coupling matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Degeneracy {
    /// All fragments have the same number of orbitals.
    Uniform(usize),
    /// One value for each fragment, in the order of the fragment list.
    PerFragment(Vec<usize>),
    /// Multi-component systems: the degeneracy is looked up by the residue name of
    /// each fragment.
    ByResidue(HashMap<String, usize>),
}

impl Degeneracy {
    /// Returns the degeneracy of every fragment as a vector that is aligned with `fragments`.
    pub fn resolve(&self, fragments: &[Fragment]) -> Result<Vec<usize>, NetworkError> {
        let values: Vec<usize> = match self {
            Degeneracy::Uniform(n) => vec![*n; fragments.len()],
            Degeneracy::PerFragment(values) => {
                if values.len() != fragments.len() {
                    return Err(NetworkError::DimensionMismatch {
                        context: "degeneracy length",
                        expected: fragments.len(),
                        found: values.len(),
                    });
                }
                values.clone()
            }
            Degeneracy::ByResidue(map) => fragments
                .iter()
                .map(|frag| {
                    frag.residue_name
                        .as_ref()
                        .and_then(|name| map.get(name).copied())
                        .ok_or_else(|| NetworkError::UnknownResidue {
                            fragment: frag.index,
                            residue: frag.residue_name.clone(),
                        })
                })
                .collect::<Result<Vec<usize>, NetworkError>>()?,
        };
        check_degeneracy(&values)?;
        Ok(values)
    }
}

/// Every fragment needs at least one orbital.
pub(crate) fn check_degeneracy(values: &[usize]) -> Result<(), NetworkError> {
    match values.iter().position(|&d| d < 1) {
        Some(idx) => Err(NetworkError::InvalidDegeneracy {
            fragment: idx,
            value: values[idx],
        }),
        None => Ok(()),
    }
}
