use crate::analysis::logging::*;
use crate::coupling::reduce_couplings;
use crate::error::NetworkError;
use crate::fragments::{Degeneracy, Fragment};
use crate::io::Configuration;
use crate::network::{find_networks, Network, Weighting};
use crate::transport::{PseudoInverseOptions, TransportMetrics};
use crate::utils::Timer;
use log::{log_enabled, Level};
use ndarray::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Transport properties of a single network. If the metrics could not be computed,
/// `error` holds the reason and the indices are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub fragments: Vec<usize>,
    pub n_edges: usize,
    pub total_coupling: f64,
    pub kirchhoff_index: Option<f64>,
    pub kirchhoff_transport_index: Option<f64>,
    pub unstable: bool,
    pub error: Option<String>,
}

impl NetworkSummary {
    pub fn new(network: &Network, weighting: Weighting, options: &PseudoInverseOptions) -> Self {
        let metrics: Result<TransportMetrics, NetworkError> =
            TransportMetrics::compute(network, weighting, options);
        let (kirchhoff_index, kirchhoff_transport_index, unstable, error) = match metrics {
            Ok(m) => (
                Some(m.kirchhoff_index),
                Some(m.kirchhoff_transport_index),
                m.unstable,
                None,
            ),
            Err(err) => (None, None, false, Some(err.to_string())),
        };
        NetworkSummary {
            fragments: network.node_ids().to_vec(),
            n_edges: network.edge_count(),
            total_coupling: network.total_coupling(),
            kirchhoff_index,
            kirchhoff_transport_index,
            unstable,
            error,
        }
    }

    pub fn size(&self) -> usize {
        self.fragments.len()
    }
}

/// Result of the network analysis of one frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameAnalysis {
    pub frame: usize,
    pub threshold: f64,
    pub weighting: Weighting,
    pub n_fragments: usize,
    /// Number of fragments that are not part of any network
    pub isolated: usize,
    /// Networks sorted by descending size
    pub networks: Vec<Network>,
    /// One summary for each network, in the same order
    pub summaries: Vec<NetworkSummary>,
}

impl FrameAnalysis {
    pub fn largest_network(&self) -> Option<&Network> {
        self.networks.first()
    }

    /// Fraction of all fragments that belong to the largest network.
    pub fn largest_fraction(&self) -> f64 {
        match (self.largest_network(), self.n_fragments) {
            (Some(network), n) if n > 0 => network.node_count() as f64 / n as f64,
            _ => 0.0,
        }
    }
}

/// Runs the complete analysis for a single frame: reduction of the degenerate couplings,
/// construction of the networks and the transport metrics of every network.
///
/// Errors in the input (dimensions, degeneracy, threshold) abort the analysis. A failure in
/// the metrics of one network is stored in its [NetworkSummary] and does not affect the
/// other networks.
pub fn analyse_frame(
    frame: usize,
    h_full: ArrayView2<f64>,
    fragments: &[Fragment],
    degeneracy: &Degeneracy,
    config: &Configuration,
) -> Result<FrameAnalysis, NetworkError> {
    let degeneracy: Vec<usize> = degeneracy.resolve(fragments)?;
    analyse_resolved(frame, h_full, fragments, &degeneracy, config)
}

pub(crate) fn analyse_resolved(
    frame: usize,
    h_full: ArrayView2<f64>,
    fragments: &[Fragment],
    degeneracy: &[usize],
    config: &Configuration,
) -> Result<FrameAnalysis, NetworkError> {
    let timer: Timer = Timer::start(&format!("frame {} analysed in", frame));
    let h: Array2<f64> = reduce_couplings(h_full, fragments, degeneracy)?;
    let networks: Vec<Network> = find_networks(h.view(), fragments, config.threshold)?;

    let summaries: Vec<NetworkSummary> = if config.parallel {
        networks
            .par_iter()
            .map(|network| NetworkSummary::new(network, config.weighting, &config.pinv))
            .collect()
    } else {
        networks
            .iter()
            .map(|network| NetworkSummary::new(network, config.weighting, &config.pinv))
            .collect()
    };

    let analysis = FrameAnalysis {
        frame,
        threshold: config.threshold,
        weighting: config.weighting,
        n_fragments: fragments.len(),
        isolated: fragments.len() - networks.iter().map(|n| n.node_count()).sum::<usize>(),
        networks,
        summaries,
    };

    if log_enabled!(Level::Info) {
        print_frame_analysis(&analysis, timer);
    }
    Ok(analysis)
}
