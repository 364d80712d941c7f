use std::collections::VecDeque;

use log::debug;

use crate::graph::Graph;
use crate::types::NodeIndex;

/// Dependency order for one tick.
///
/// Time sources come first, followed by the remaining roots in arena order; a node is emitted
/// once every producer feeding it has been. Nodes caught in a cycle (and anything downstream of
/// one) are appended afterwards in arena order instead of failing.
pub fn topo_order(graph: &Graph) -> Vec<NodeIndex> {
    let n = graph.len();
    let mut indeg = vec![0usize; n];
    let mut adj: Vec<Vec<usize>> = vec![Vec::new(); n];

    for edge in graph.connections().edges() {
        if edge.from.0 < n && edge.to.0 < n {
            adj[edge.from.0].push(edge.to.0);
            indeg[edge.to.0] += 1;
        }
    }

    let is_time = |i: usize| {
        graph
            .node_at(NodeIndex(i))
            .is_some_and(|node| node.kind.is_time_source())
    };
    let mut q: VecDeque<usize> = (0..n).filter(|&i| indeg[i] == 0 && is_time(i)).collect();
    q.extend((0..n).filter(|&i| indeg[i] == 0 && !is_time(i)));

    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    while let Some(u) = q.pop_front() {
        visited[u] = true;
        order.push(NodeIndex(u));
        for &v in &adj[u] {
            indeg[v] -= 1;
            if indeg[v] == 0 {
                q.push_back(v);
            }
        }
    }

    if order.len() != n {
        debug!(
            "{} node(s) sit on or behind a cycle; running them in arena order",
            n - order.len()
        );
        order.extend((0..n).filter(|&i| !visited[i]).map(NodeIndex));
    }
    order
}
