//! Resolve a skeleton into a generation order over sample columns.

use petgraph::algo::toposort;
use petgraph::graph::DiGraph;

use cgnn_core::errors::{CgnnError, CgnnResult};
use cgnn_core::models::Sample;
use cgnn_core::traits::Skeleton;

/// Nodes, their parent sets, and a topological order, all as indices into `names`.
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    names: Vec<String>,
    order: Vec<usize>,
    parents: Vec<Vec<usize>>,
}

impl Topology {
    /// Node names in `Skeleton::list_nodes` order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Generation order: every node after all of its parents.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn parents(&self, node: usize) -> &[usize] {
        &self.parents[node]
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }
}

/// Resolve every node's parent set against `sample` and sort topologically.
///
/// Fails with `ShapeMismatch` when a node is not a sample column or a parent
/// is not a node, and with `CycleDetected` when the orientation is cyclic.
pub fn resolve(skeleton: &dyn Skeleton, sample: &Sample) -> CgnnResult<Topology> {
    let names = skeleton.list_nodes();
    if names.is_empty() {
        return Err(CgnnError::shape("skeleton has no nodes"));
    }
    for name in &names {
        sample.column_index(name)?;
    }
    let position = |name: &str| names.iter().position(|n| n == name);

    let mut parents = Vec::with_capacity(names.len());
    for name in &names {
        let resolved = skeleton
            .parents(name)?
            .iter()
            .map(|p| {
                position(p).ok_or_else(|| {
                    CgnnError::shape(format!("parent '{p}' of '{name}' is not a skeleton node"))
                })
            })
            .collect::<CgnnResult<Vec<_>>>()?;
        parents.push(resolved);
    }

    let mut graph = DiGraph::<usize, ()>::with_capacity(names.len(), 0);
    let nodes: Vec<_> = (0..names.len()).map(|i| graph.add_node(i)).collect();
    for (child, ps) in parents.iter().enumerate() {
        for &p in ps {
            graph.add_edge(nodes[p], nodes[child], ());
        }
    }
    let order = toposort(&graph, None)
        .map_err(|cycle| CgnnError::CycleDetected {
            node: names[graph[cycle.node_id()]].clone(),
        })?
        .into_iter()
        .map(|idx| graph[idx])
        .collect();

    Ok(Topology {
        names,
        order,
        parents,
    })
}
