use crate::network::{Edge, Network};
use petgraph::algo::min_spanning_tree;
use petgraph::data::Element;
use petgraph::graph::UnGraph;

/// Spanning tree of the network that keeps the strongest couplings (maximum spanning tree).
/// This is the backbone along which charges are transported most efficiently.
/// For a disconnected network a spanning forest is returned.
pub fn coupling_backbone(network: &Network) -> Network {
    // the minimum spanning tree of the negative couplings is the maximum spanning tree
    let graph: UnGraph<usize, f64> = network.to_graph().map(|_, id| *id, |_, w| -w.abs());

    let edges: Vec<Edge> = min_spanning_tree(&graph)
        .filter_map(|element| match element {
            Element::Edge {
                source,
                target,
                weight,
            } => Some(Edge::new(
                network.node_ids()[source],
                network.node_ids()[target],
                -weight,
            )),
            Element::Node { .. } => None,
        })
        .collect();
    Network::new(network.node_ids().to_vec(), edges)
}
