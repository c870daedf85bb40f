use petgraph::algo::connected_components;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::Bfs;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Undirected, weighted edge between two fragments. The fragment with the lower index is
/// always stored as `a`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    /// Magnitude of the electronic coupling between both fragments
    pub weight: f64,
}

impl Edge {
    pub fn new(a: usize, b: usize, weight: f64) -> Self {
        if a <= b {
            Edge { a, b, weight }
        } else {
            Edge { a: b, b: a, weight }
        }
    }
}

/// A charge-transport network: a set of fragment indices and the couplings between them.
///
/// The fragment indices are kept in ascending order. This order defines the rows and columns
/// of every matrix that is derived from the network (adjacency, Laplacian, resistance
/// distances), so that `matrix[[i, j]]` always refers to the fragments `node_ids()[i]` and
/// `node_ids()[j]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Network {
    nodes: Vec<usize>,
    edges: Vec<Edge>,
}

impl Network {
    /// Creates a new network. Endpoints of edges that are missing in `nodes` are added,
    /// self-loops are dropped and if an edge is given twice the larger weight is kept.
    pub fn new(nodes: Vec<usize>, edges: Vec<Edge>) -> Self {
        let mut nodes: Vec<usize> = nodes;
        nodes.extend(edges.iter().flat_map(|e| vec![e.a, e.b]));
        nodes.sort_unstable();
        nodes.dedup();

        let mut edges: Vec<Edge> = edges
            .into_iter()
            .filter(|e| e.a != e.b)
            .map(|e| Edge::new(e.a, e.b, e.weight))
            .collect();
        edges.sort_by(|x, y| {
            (x.a, x.b).cmp(&(y.a, y.b)).then(
                y.weight
                    .abs()
                    .partial_cmp(&x.weight.abs())
                    .unwrap_or(Ordering::Equal),
            )
        });
        edges.dedup_by(|later, first| later.a == first.a && later.b == first.b);
        Network { nodes, edges }
    }

    /// Network built only from a list of edges.
    pub fn from_edges(edges: Vec<Edge>) -> Self {
        Network::new(Vec::new(), edges)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Fragment indices in ascending order.
    pub fn node_ids(&self) -> &[usize] {
        &self.nodes
    }

    /// Edges sorted by their endpoints.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn contains(&self, fragment: usize) -> bool {
        self.nodes.binary_search(&fragment).is_ok()
    }

    /// Row/column index of a fragment in the matrices of this network.
    pub fn position(&self, fragment: usize) -> Option<usize> {
        self.nodes.binary_search(&fragment).ok()
    }

    pub fn min_fragment(&self) -> Option<usize> {
        self.nodes.first().copied()
    }

    /// Neighbours of a fragment together with the coupling to them.
    pub fn neighbours(&self, fragment: usize) -> Vec<(usize, f64)> {
        self.edges
            .iter()
            .filter_map(|e| {
                if e.a == fragment {
                    Some((e.b, e.weight))
                } else if e.b == fragment {
                    Some((e.a, e.weight))
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn degree(&self, fragment: usize) -> usize {
        self.edges
            .iter()
            .filter(|e| e.a == fragment || e.b == fragment)
            .count()
    }

    /// Sum of all edge weights.
    pub fn total_coupling(&self) -> f64 {
        self.edges.iter().map(|e| e.weight).sum()
    }

    /// petgraph representation of the network. Node `k` of the graph is the fragment at
    /// position `k` and carries its fragment index, edges carry the coupling.
    pub(crate) fn to_graph(&self) -> UnGraph<usize, f64> {
        let mut graph: UnGraph<usize, f64> =
            UnGraph::with_capacity(self.nodes.len(), self.edges.len());
        for id in self.nodes.iter() {
            graph.add_node(*id);
        }
        for e in self.edges.iter() {
            // both endpoints are part of the node list by construction
            if let (Some(i), Some(j)) = (self.position(e.a), self.position(e.b)) {
                graph.add_edge(NodeIndex::new(i), NodeIndex::new(j), e.weight);
            }
        }
        graph
    }

    /// True if every fragment can be reached from every other one. An empty network is
    /// not connected.
    pub fn is_connected(&self) -> bool {
        !self.nodes.is_empty() && self.component_count() == 1
    }

    /// Number of connected components, isolated fragments included.
    pub fn component_count(&self) -> usize {
        connected_components(&self.to_graph())
    }

    /// Order in which the fragments are reached when the network is spread out from its
    /// most strongly coupled fragment (largest sum of couplings, lowest index on ties).
    /// Fragments that are not reachable from there are not part of the order.
    pub fn gather_order(&self) -> Vec<usize> {
        if self.nodes.is_empty() {
            return Vec::new();
        }
        let mut strength: Vec<f64> = vec![0.0; self.nodes.len()];
        for e in self.edges.iter() {
            if let (Some(i), Some(j)) = (self.position(e.a), self.position(e.b)) {
                strength[i] += e.weight;
                strength[j] += e.weight;
            }
        }
        let start: usize = strength
            .iter()
            .enumerate()
            .fold(0, |best, (i, s)| if *s > strength[best] { i } else { best });
        let graph: UnGraph<usize, f64> = self.to_graph();
        let mut bfs = Bfs::new(&graph, NodeIndex::new(start));
        let mut order: Vec<usize> = Vec::with_capacity(self.nodes.len());
        while let Some(idx) = bfs.next(&graph) {
            order.push(graph[idx]);
        }
        order
    }
}
