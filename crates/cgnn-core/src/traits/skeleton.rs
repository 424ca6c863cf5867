use crate::errors::CgnnResult;
use crate::models::ScoredEdge;

/// Ordering of the edge list returned by [`Skeleton::edges`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeOrder {
    /// Order in which the edges were added.
    #[default]
    Insertion,
    /// Highest score first.
    ScoreDescending,
}

/// Graph collaborator queried by the scorers.
///
/// For pairwise orientation the edge directions are ignored and each edge is
/// treated as an unordered pair. For graph scoring `parents` defines the
/// candidate orientation.
pub trait Skeleton: Send + Sync {
    /// Node names in a stable order.
    fn list_nodes(&self) -> Vec<String>;

    /// Parents of `node` under the current orientation, without duplicates.
    /// Unknown nodes are an error.
    fn parents(&self, node: &str) -> CgnnResult<Vec<String>>;

    /// All edges as `(cause, effect, score)`.
    fn edges(&self, order: EdgeOrder) -> Vec<ScoredEdge>;
}
