use crate::coupling::{check_finite, reduce_couplings};
use crate::error::NetworkError;
use crate::fragments::{check_fragment_order, Degeneracy, Fragment};
use crate::network::{Edge, Network};
use log::debug;
use ndarray::prelude::*;
use petgraph::algo::kosaraju_scc;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

/// Builds the undirected coupling graph of all fragments. Two fragments are connected if the
/// magnitude of their coupling exceeds `threshold`; the edge carries this magnitude.
/// Row `i` of `h` belongs to `fragments[i]`, whose index must be `i`.
pub fn build_graph(
    h: ArrayView2<f64>,
    fragments: &[Fragment],
    threshold: f64,
) -> Result<UnGraph<usize, f64>, NetworkError> {
    if threshold.is_nan() || threshold < 0.0 {
        return Err(NetworkError::InvalidThreshold(threshold));
    }
    let (rows, cols): (usize, usize) = h.dim();
    if rows != cols {
        return Err(NetworkError::DimensionMismatch {
            context: "reduced coupling matrix columns",
            expected: rows,
            found: cols,
        });
    }
    if rows != fragments.len() {
        return Err(NetworkError::DimensionMismatch {
            context: "reduced coupling matrix rows",
            expected: fragments.len(),
            found: rows,
        });
    }
    check_fragment_order(fragments)?;
    check_finite(h)?;

    let mut graph: UnGraph<usize, f64> = UnGraph::with_capacity(rows, 0);
    let indexes: Vec<NodeIndex> = fragments
        .iter()
        .map(|frag| graph.add_node(frag.index))
        .collect();
    for (i, row) in h.outer_iter().enumerate() {
        for (j, value) in row.iter().enumerate().skip(i + 1) {
            // the upper and the lower triangle may differ if h was not reduced by us
            let coupling: f64 = value.abs().max(h[[j, i]].abs());
            if coupling > threshold {
                graph.add_edge(indexes[i], indexes[j], coupling);
            }
        }
    }
    Ok(graph)
}

/// Splits the coupling graph of a single frame into its connected components.
///
/// Every returned [Network] is one connected component with at least two fragments; isolated
/// fragments are dropped. The networks are sorted by descending size, networks of equal
/// size by their lowest fragment index.
pub fn find_networks(
    h: ArrayView2<f64>,
    fragments: &[Fragment],
    threshold: f64,
) -> Result<Vec<Network>, NetworkError> {
    let graph: UnGraph<usize, f64> = build_graph(h, fragments, threshold)?;

    // component id for every node of the graph
    let mut component_of: Vec<usize> = vec![0; graph.node_count()];
    let components: Vec<Vec<NodeIndex>> = kosaraju_scc(&graph);
    for (c, component) in components.iter().enumerate() {
        for idx in component.iter() {
            component_of[idx.index()] = c;
        }
    }

    let mut edges_of: Vec<Vec<Edge>> = vec![Vec::new(); components.len()];
    for edge in graph.edge_references() {
        let c: usize = component_of[edge.source().index()];
        edges_of[c].push(Edge::new(
            graph[edge.source()],
            graph[edge.target()],
            *edge.weight(),
        ));
    }

    let mut networks: Vec<Network> = components
        .iter()
        .zip(edges_of.into_iter())
        .filter(|(component, _)| component.len() > 1)
        .map(|(component, edges)| {
            Network::new(component.iter().map(|idx| graph[*idx]).collect(), edges)
        })
        .collect();
    networks.sort_by(|x, y| {
        y.node_count()
            .cmp(&x.node_count())
            .then(x.min_fragment().cmp(&y.min_fragment()))
    });

    debug!(
        "{} networks found with threshold {:e}, {} of {} fragments are isolated",
        networks.len(),
        threshold,
        fragments.len() - networks.iter().map(|n| n.node_count()).sum::<usize>(),
        fragments.len()
    );
    Ok(networks)
}

/// Reduces the orbital-expanded coupling matrix of one frame and builds the networks from it.
pub fn find_networks_from_couplings(
    h_full: ArrayView2<f64>,
    fragments: &[Fragment],
    degeneracy: &Degeneracy,
    threshold: f64,
) -> Result<Vec<Network>, NetworkError> {
    let degeneracy: Vec<usize> = degeneracy.resolve(fragments)?;
    let h: Array2<f64> = reduce_couplings(h_full, fragments, &degeneracy)?;
    find_networks(h.view(), fragments, threshold)
}
