/*!

# Charge-transport networks

Analysis of the electronic couplings between the molecules (fragments) of a simulated
material. The orbital-expanded coupling matrix of one frame is reduced to one coupling per
pair of fragments, thresholded into a graph and split into connected charge-transport
networks. Every network is characterised by its resistance distances, which are obtained
from the Moore-Penrose pseudoinverse of its Laplacian, and the Kirchhoff indices derived
from them.

```
use ctnet::{find_networks, fragments_from_count, kirchhoff_index, Weighting};
use ndarray::array;

let h = array![[0.0, 2.0, 0.5], [2.0, 0.0, 0.0], [0.5, 0.0, 0.0]];
let networks = find_networks(h.view(), &fragments_from_count(3), 1.0).unwrap();
assert_eq!(networks[0].node_ids(), &[0, 1]);
let k = kirchhoff_index(&networks[0], Weighting::Unweighted).unwrap();
assert!((k - 1.0).abs() < 1e-12);
```
*/

pub mod analysis;
pub mod coupling;
pub mod defaults;
pub mod error;
pub mod fragments;
pub mod io;
pub mod network;
pub mod transport;
pub mod utils;

pub use analysis::{analyse_frame, analyse_series, FrameAnalysis, NetworkSummary};
pub use coupling::reduce_couplings;
pub use error::NetworkError;
pub use fragments::{fragments_from_count, Degeneracy, Fragment};
pub use io::Configuration;
pub use network::{
    adjacency_matrix, coupling_backbone, find_networks, find_networks_from_couplings,
    laplacian_matrix, Edge, Network, Weighting,
};
pub use transport::{
    admittance_matrix, kirchhoff_index, kirchhoff_transport_index, resistance_distance_matrix,
    resistance_distance_matrix_with, PseudoInverseOptions, TransportMetrics,
};
