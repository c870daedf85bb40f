use crate::error::NetworkError;
use crate::network::Network;
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};

/// Interpretation of the edges of a network when matrices are built from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weighting {
    /// Every edge carries the magnitude of the coupling.
    Weighted,
    /// Every edge counts as 1.
    Unweighted,
}

impl Default for Weighting {
    fn default() -> Self {
        Weighting::Weighted
    }
}

impl From<bool> for Weighting {
    fn from(weighted: bool) -> Self {
        if weighted {
            Weighting::Weighted
        } else {
            Weighting::Unweighted
        }
    }
}

fn check_size(network: &Network) -> Result<usize, NetworkError> {
    let n: usize = network.node_count();
    if n < 2 {
        return Err(NetworkError::EmptyGraph { nodes: n });
    }
    Ok(n)
}

/// Adjacency matrix of the network. Rows and columns follow [Network::node_ids].
pub fn adjacency_matrix(network: &Network, weighting: Weighting) -> Result<Array2<f64>, NetworkError> {
    let n: usize = check_size(network)?;
    let mut a: Array2<f64> = Array2::zeros([n, n]);
    for edge in network.edges().iter() {
        if let (Some(i), Some(j)) = (network.position(edge.a), network.position(edge.b)) {
            let value: f64 = match weighting {
                Weighting::Weighted => edge.weight,
                Weighting::Unweighted => 1.0,
            };
            a[[i, j]] = value;
            a[[j, i]] = value;
        }
    }
    Ok(a)
}

/// Diagonal matrix of the row sums of the adjacency matrix.
pub fn degree_matrix(network: &Network, weighting: Weighting) -> Result<Array2<f64>, NetworkError> {
    let a: Array2<f64> = adjacency_matrix(network, weighting)?;
    Ok(Array2::from_diag(&a.sum_axis(Axis(1))))
}

/// Graph Laplacian L = D - A of the network.
pub fn laplacian_matrix(network: &Network, weighting: Weighting) -> Result<Array2<f64>, NetworkError> {
    let a: Array2<f64> = adjacency_matrix(network, weighting)?;
    let degree: Array1<f64> = a.sum_axis(Axis(1));
    let mut l: Array2<f64> = -a;
    l.diag_mut().assign(&degree);
    Ok(l)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Edge;
    use approx::AbsDiffEq;

    fn star() -> Network {
        Network::from_edges(vec![
            Edge::new(3, 8, 0.5),
            Edge::new(3, 5, 2.0),
            Edge::new(3, 1, 0.25),
        ])
    }

    #[test]
    fn weighted_adjacency_in_fragment_order() {
        let a = adjacency_matrix(&star(), Weighting::Weighted).unwrap();
        // order: 1, 3, 5, 8
        let expected: Array2<f64> = array![
            [0.0, 0.25, 0.0, 0.0],
            [0.25, 0.0, 2.0, 0.5],
            [0.0, 2.0, 0.0, 0.0],
            [0.0, 0.5, 0.0, 0.0]
        ];
        assert!(a.abs_diff_eq(&expected, 1e-15));
    }

    #[test]
    fn unweighted_laplacian() {
        let l = laplacian_matrix(&star(), Weighting::Unweighted).unwrap();
        let expected: Array2<f64> = array![
            [1.0, -1.0, 0.0, 0.0],
            [-1.0, 3.0, -1.0, -1.0],
            [0.0, -1.0, 1.0, 0.0],
            [0.0, -1.0, 0.0, 1.0]
        ];
        assert!(l.abs_diff_eq(&expected, 1e-15));
        let d = degree_matrix(&star(), Weighting::Unweighted).unwrap();
        assert_eq!(d.diag().to_vec(), vec![1.0, 3.0, 1.0, 1.0]);
    }

    #[test]
    fn laplacian_rows_sum_to_zero() {
        for weighting in [Weighting::Weighted, Weighting::Unweighted].iter() {
            let l = laplacian_matrix(&star(), *weighting).unwrap();
            assert!(l.sum_axis(Axis(1)).iter().all(|x| *x == 0.0));
            assert!(l.abs_diff_eq(&l.t(), 0.0));
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let network = star();
        let first = adjacency_matrix(&network, Weighting::Weighted).unwrap();
        let second = adjacency_matrix(&network, Weighting::Weighted).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn too_small_networks() {
        let single = Network::new(vec![4], vec![]);
        assert_eq!(
            adjacency_matrix(&single, Weighting::Weighted).unwrap_err(),
            NetworkError::EmptyGraph { nodes: 1 }
        );
        assert_eq!(
            laplacian_matrix(&Network::new(vec![], vec![]), Weighting::Unweighted).unwrap_err(),
            NetworkError::EmptyGraph { nodes: 0 }
        );
    }
}
