mod builder;
mod graph;
mod matrices;
mod tree;

pub use builder::{build_graph, find_networks, find_networks_from_couplings};
pub use graph::{Edge, Network};
pub use matrices::{adjacency_matrix, degree_matrix, laplacian_matrix, Weighting};
pub use tree::coupling_backbone;
