//! Named directed graph used both as a skeleton and as the oriented output.
//!
//! Cycle checks before insertion use DFS reachability; whole-graph cycle
//! discovery uses Tarjan's SCC.

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::visit::Dfs;
use petgraph::Direction;

use cgnn_core::errors::{CgnnError, CgnnResult};
use cgnn_core::models::ScoredEdge;
use cgnn_core::traits::{EdgeOrder, Skeleton};

/// Weight carried on every edge.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeWeight {
    /// Score signed relative to the stored direction.
    pub score: f64,
    /// Insertion sequence, for [`EdgeOrder::Insertion`].
    pub seq: usize,
}

/// A `StableGraph` of variable names with a name → index map.
#[derive(Debug, Clone, Default)]
pub struct CausalGraph {
    pub graph: StableGraph<String, EdgeWeight>,
    node_index: HashMap<String, NodeIndex>,
    next_seq: usize,
}

impl CausalGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph with the given nodes (in order) and unit-score edges.
    pub fn from_edges<S: AsRef<str>>(nodes: &[S], edges: &[(S, S)]) -> Self {
        let mut graph = Self::new();
        for node in nodes {
            graph.ensure_node(node.as_ref());
        }
        for (cause, effect) in edges {
            graph.add_edge(cause.as_ref(), effect.as_ref(), 1.0);
        }
        graph
    }

    /// Index of `name`, inserting the node if needed.
    pub fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.node_index.insert(name.to_string(), idx);
        idx
    }

    pub fn get_node(&self, name: &str) -> Option<NodeIndex> {
        self.node_index.get(name).copied()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add `cause -> effect`, or overwrite the score of an existing edge.
    /// No cycle check: skeletons handed in by callers may be cyclic.
    pub fn add_edge(&mut self, cause: &str, effect: &str, score: f64) -> EdgeIndex {
        let src = self.ensure_node(cause);
        let tgt = self.ensure_node(effect);
        if let Some(edge) = self.graph.find_edge(src, tgt) {
            if let Some(weight) = self.graph.edge_weight_mut(edge) {
                weight.score = score;
            }
            return edge;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.graph.add_edge(src, tgt, EdgeWeight { score, seq })
    }

    /// Add `cause -> effect` only if the graph stays acyclic.
    pub fn add_edge_acyclic(&mut self, cause: &str, effect: &str, score: f64) -> CgnnResult<EdgeIndex> {
        if self.would_create_cycle(cause, effect) {
            return Err(CgnnError::CycleDetected {
                node: cause.to_string(),
            });
        }
        Ok(self.add_edge(cause, effect, score))
    }

    /// Whether adding `cause -> effect` would close a directed cycle.
    pub fn would_create_cycle(&self, cause: &str, effect: &str) -> bool {
        if cause == effect {
            return true;
        }
        match (self.get_node(cause), self.get_node(effect)) {
            (Some(src), Some(tgt)) => self.has_path(tgt, src),
            _ => false,
        }
    }

    fn has_path(&self, from: NodeIndex, to: NodeIndex) -> bool {
        let mut dfs = Dfs::new(&self.graph, from);
        while let Some(node) = dfs.next(&self.graph) {
            if node == to {
                return true;
            }
        }
        false
    }

    /// Strongly connected components with more than one node.
    pub fn find_cycles(&self) -> Vec<Vec<String>> {
        tarjan_scc(&self.graph)
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| scc.into_iter().map(|idx| self.graph[idx].clone()).collect())
            .collect()
    }

    pub fn contains_edge(&self, cause: &str, effect: &str) -> bool {
        match (self.get_node(cause), self.get_node(effect)) {
            (Some(src), Some(tgt)) => self.graph.contains_edge(src, tgt),
            _ => false,
        }
    }

    pub fn score(&self, cause: &str, effect: &str) -> Option<f64> {
        let src = self.get_node(cause)?;
        let tgt = self.get_node(effect)?;
        let edge = self.graph.find_edge(src, tgt)?;
        self.graph.edge_weight(edge).map(|w| w.score)
    }

    /// Copy of the graph with `cause -> effect` flipped and its score negated.
    pub fn reversed(&self, cause: &str, effect: &str) -> CgnnResult<CausalGraph> {
        let edge = self
            .get_node(cause)
            .zip(self.get_node(effect))
            .and_then(|(src, tgt)| self.graph.find_edge(src, tgt))
            .ok_or_else(|| CgnnError::shape(format!("no edge {cause} -> {effect}")))?;

        let mut copy = self.clone();
        if let Some(weight) = copy.graph.remove_edge(edge) {
            let src = copy.ensure_node(effect);
            let tgt = copy.ensure_node(cause);
            copy.graph.add_edge(
                src,
                tgt,
                EdgeWeight {
                    score: -weight.score,
                    seq: weight.seq,
                },
            );
        }
        Ok(copy)
    }
}

impl Skeleton for CausalGraph {
    fn list_nodes(&self) -> Vec<String> {
        self.graph
            .node_indices()
            .map(|idx| self.graph[idx].clone())
            .collect()
    }

    fn parents(&self, node: &str) -> CgnnResult<Vec<String>> {
        let idx = self
            .get_node(node)
            .ok_or_else(|| CgnnError::shape(format!("unknown node '{node}'")))?;
        let mut parents: Vec<NodeIndex> = self
            .graph
            .neighbors_directed(idx, Direction::Incoming)
            .collect();
        parents.sort_unstable();
        parents.dedup();
        Ok(parents.into_iter().map(|p| self.graph[p].clone()).collect())
    }

    fn edges(&self, order: EdgeOrder) -> Vec<ScoredEdge> {
        let mut edges: Vec<(usize, ScoredEdge)> = self
            .graph
            .edge_indices()
            .filter_map(|idx| {
                let (src, tgt) = self.graph.edge_endpoints(idx)?;
                let w = self.graph.edge_weight(idx)?;
                Some((
                    w.seq,
                    ScoredEdge::new(self.graph[src].clone(), self.graph[tgt].clone(), w.score),
                ))
            })
            .collect();
        edges.sort_by_key(|(seq, _)| *seq);
        if order == EdgeOrder::ScoreDescending {
            edges.sort_by(|(_, a), (_, b)| b.score.total_cmp(&a.score));
        }
        edges.into_iter().map(|(_, e)| e).collect()
    }
}
