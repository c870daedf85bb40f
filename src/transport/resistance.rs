use crate::error::NetworkError;
use crate::network::{laplacian_matrix, Network, Weighting};
use crate::transport::pseudoinverse::{
    pseudo_inverse_connected, PseudoInverse, PseudoInverseOptions,
};
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};

/// Resistance distance matrix of a network with the default pseudoinverse settings.
pub fn resistance_distance_matrix(
    network: &Network,
    weighting: Weighting,
) -> Result<Array2<f64>, NetworkError> {
    resistance_distance_matrix_with(network, weighting, &PseudoInverseOptions::default())
}

/// Resistance distance matrix of a network:
/// `Omega[i, j] = G[i, i] + G[j, j] - 2 G[i, j]`, with G the pseudoinverse of the Laplacian.
/// Every edge is treated as a resistor whose conductance is the coupling (weighted) or 1
/// (unweighted). Rows and columns follow [Network::node_ids].
pub fn resistance_distance_matrix_with(
    network: &Network,
    weighting: Weighting,
    options: &PseudoInverseOptions,
) -> Result<Array2<f64>, NetworkError> {
    let (omega, _): (Array2<f64>, PseudoInverse) = resistance_and_pinv(network, weighting, options)?;
    Ok(omega)
}

fn resistance_and_pinv(
    network: &Network,
    weighting: Weighting,
    options: &PseudoInverseOptions,
) -> Result<(Array2<f64>, PseudoInverse), NetworkError> {
    let n: usize = network.node_count();
    if n < 2 {
        return Err(NetworkError::EmptyGraph { nodes: n });
    }
    if !network.is_connected() {
        return Err(NetworkError::DisconnectedGraph {
            null_modes: network.component_count(),
        });
    }
    let l: Array2<f64> = laplacian_matrix(network, weighting)?;
    let pinv: PseudoInverse = pseudo_inverse_connected(l.view(), options)?;
    Ok((resistance_from_pinv(pinv.matrix.view()), pinv))
}

/// Resistance distances from the pseudoinverse of a Laplacian.
pub fn resistance_from_pinv(gamma: ArrayView2<f64>) -> Array2<f64> {
    let n: usize = gamma.nrows();
    let diag: Array1<f64> = gamma.diag().to_owned();
    let mut omega: Array2<f64> = Array2::zeros([n, n]);
    for i in 0..n {
        for j in (i + 1)..n {
            let r_ij: f64 = diag[i] + diag[j] - gamma[[i, j]] - gamma[[j, i]];
            omega[[i, j]] = r_ij;
            omega[[j, i]] = r_ij;
        }
    }
    omega
}

/// Admittance matrix: the inverse of the resistance distances off the diagonal, zero on
/// the diagonal.
pub fn admittance_matrix(omega: ArrayView2<f64>) -> Array2<f64> {
    Array2::from_shape_fn(omega.dim(), |(i, j)| {
        if i == j {
            0.0
        } else {
            1.0 / omega[[i, j]]
        }
    })
}

/// Half the sum over all entries of the resistance distance matrix.
pub fn kirchhoff_index_from_resistance(omega: ArrayView2<f64>) -> f64 {
    0.5 * omega.sum()
}

/// Sum of all admittances, normalised by `2 n^2`.
pub fn transport_index_from_resistance(omega: ArrayView2<f64>) -> f64 {
    let n: f64 = omega.nrows() as f64;
    admittance_matrix(omega).sum() / (2.0 * n * n)
}

/// Kirchhoff index of a network, the sum of all pairwise resistance distances.
pub fn kirchhoff_index(network: &Network, weighting: Weighting) -> Result<f64, NetworkError> {
    let omega: Array2<f64> = resistance_distance_matrix(network, weighting)?;
    Ok(kirchhoff_index_from_resistance(omega.view()))
}

/// Kirchhoff transport index of a network, the normalised sum of all pairwise admittances.
/// Larger values mean more efficient charge transport.
pub fn kirchhoff_transport_index(
    network: &Network,
    weighting: Weighting,
) -> Result<f64, NetworkError> {
    let omega: Array2<f64> = resistance_distance_matrix(network, weighting)?;
    Ok(transport_index_from_resistance(omega.view()))
}

/// All transport metrics of one network, computed from a single pseudoinverse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportMetrics {
    pub resistance: Array2<f64>,
    pub kirchhoff_index: f64,
    pub kirchhoff_transport_index: f64,
    /// True if the pseudoinverse was flagged as ill-conditioned
    pub unstable: bool,
}

impl TransportMetrics {
    pub fn compute(
        network: &Network,
        weighting: Weighting,
        options: &PseudoInverseOptions,
    ) -> Result<Self, NetworkError> {
        let (omega, pinv): (Array2<f64>, PseudoInverse) =
            resistance_and_pinv(network, weighting, options)?;
        Ok(TransportMetrics {
            kirchhoff_index: kirchhoff_index_from_resistance(omega.view()),
            kirchhoff_transport_index: transport_index_from_resistance(omega.view()),
            resistance: omega,
            unstable: pinv.unstable,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Edge;
    use approx::AbsDiffEq;

    fn path() -> Network {
        Network::from_edges(vec![Edge::new(0, 1, 1.0), Edge::new(1, 2, 1.0)])
    }

    #[test]
    fn resistance_of_unit_path() {
        let omega = resistance_distance_matrix(&path(), Weighting::Unweighted).unwrap();
        let expected: Array2<f64> = array![[0.0, 1.0, 2.0], [1.0, 0.0, 1.0], [2.0, 1.0, 0.0]];
        assert!(omega.abs_diff_eq(&expected, 1e-12));
        assert!(omega.abs_diff_eq(&omega.t(), 0.0));
        assert!(omega.diag().iter().all(|x| *x == 0.0));
    }

    #[test]
    fn weighted_resistance_follows_series_rule() {
        // conductances 2 and 4 in series: 1/2 + 1/4
        let network = Network::from_edges(vec![Edge::new(0, 1, 2.0), Edge::new(1, 2, 4.0)]);
        let omega = resistance_distance_matrix(&network, Weighting::Weighted).unwrap();
        assert!((omega[[0, 2]] - 0.75).abs() < 1e-12);
        assert!((omega[[0, 1]] - 0.5).abs() < 1e-12);
        let omega = resistance_distance_matrix(&network, Weighting::Unweighted).unwrap();
        assert!((omega[[0, 2]] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn parallel_paths_in_a_ring() {
        // 4-ring with unit resistors: neighbours 1*3/4, opposite 2*2/4
        let network = Network::from_edges(vec![
            Edge::new(0, 1, 1.0),
            Edge::new(1, 2, 1.0),
            Edge::new(2, 3, 1.0),
            Edge::new(0, 3, 1.0),
        ]);
        let omega = resistance_distance_matrix(&network, Weighting::Weighted).unwrap();
        assert!((omega[[0, 1]] - 0.75).abs() < 1e-12);
        assert!((omega[[0, 2]] - 1.0).abs() < 1e-12);
        let k = kirchhoff_index(&network, Weighting::Weighted).unwrap();
        assert!((k - 5.0).abs() < 1e-12);
    }

    #[test]
    fn kirchhoff_index_of_single_edge() {
        let network = Network::from_edges(vec![Edge::new(3, 9, 1.0)]);
        let k = kirchhoff_index(&network, Weighting::Weighted).unwrap();
        assert!((k - 1.0).abs() < 1e-12);
        // admittances 1 + 1, normalised by 2 * 2^2
        let kt = kirchhoff_transport_index(&network, Weighting::Weighted).unwrap();
        assert!((kt - 0.25).abs() < 1e-12);
    }

    #[test]
    fn metrics_agree_with_single_functions() {
        let metrics =
            TransportMetrics::compute(&path(), Weighting::Unweighted, &PseudoInverseOptions::default())
                .unwrap();
        // K = 1 + 2 + 1
        assert!((metrics.kirchhoff_index - 4.0).abs() < 1e-12);
        // admittances 2 * (1 + 1/2 + 1) / (2 * 9)
        assert!((metrics.kirchhoff_transport_index - 5.0 / 18.0).abs() < 1e-12);
        assert!(!metrics.unstable);
        let kt = kirchhoff_transport_index(&path(), Weighting::Unweighted).unwrap();
        assert!((kt - metrics.kirchhoff_transport_index).abs() < 1e-14);
    }

    #[test]
    fn vanishing_coupling_keeps_network_usable() {
        use crate::fragments::fragments_from_count;
        use crate::network::find_networks;

        let h: Array2<f64> = array![[0.0, 1.0, 0.0], [1.0, 0.0, 1.0e-17], [0.0, 1.0e-17, 0.0]];
        let networks = find_networks(h.view(), &fragments_from_count(3), 0.0).unwrap();
        assert_eq!(networks[0].node_ids(), &[0, 1, 2]);
        assert!(networks[0].is_connected());

        let k = kirchhoff_index(&networks[0], Weighting::Weighted).unwrap();
        assert!(k.is_finite());
        let metrics = TransportMetrics::compute(
            &networks[0],
            Weighting::Weighted,
            &PseudoInverseOptions::default(),
        )
        .unwrap();
        assert!(metrics.unstable);
        // the strong pair is unaffected
        assert!((metrics.resistance[[0, 1]] - 1.0).abs() < 1e-12);

        let strict = PseudoInverseOptions {
            strict: true,
            ..PseudoInverseOptions::default()
        };
        assert!(matches!(
            TransportMetrics::compute(&networks[0], Weighting::Weighted, &strict).unwrap_err(),
            NetworkError::NumericalInstability { .. }
        ));
        // unweighted edges do not see the size of the coupling
        let metrics = TransportMetrics::compute(
            &networks[0],
            Weighting::Unweighted,
            &PseudoInverseOptions::default(),
        )
        .unwrap();
        assert!(!metrics.unstable);
    }

    #[test]
    fn admittance_has_empty_diagonal() {
        let omega: Array2<f64> = array![[0.0, 0.5], [0.5, 0.0]];
        let admittance = admittance_matrix(omega.view());
        assert!(admittance.abs_diff_eq(&array![[0.0, 2.0], [2.0, 0.0]], 1e-15));
    }

    #[test]
    fn disconnected_and_empty_networks() {
        let network = Network::from_edges(vec![Edge::new(0, 1, 1.0), Edge::new(2, 3, 1.0)]);
        assert_eq!(
            resistance_distance_matrix(&network, Weighting::Weighted).unwrap_err(),
            NetworkError::DisconnectedGraph { null_modes: 2 }
        );
        let single = Network::new(vec![0], vec![]);
        assert_eq!(
            kirchhoff_index(&single, Weighting::Weighted).unwrap_err(),
            NetworkError::EmptyGraph { nodes: 1 }
        );
    }
}
