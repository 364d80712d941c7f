//! Output-to-input routing between nodes of one graph.

use hashbrown::HashMap;

use crate::types::NodeIndex;

/// One destination of an output port.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub node: NodeIndex,
    pub port: String,
}

/// A resolved connection, kept in the order it was added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge {
    pub from: NodeIndex,
    pub from_port: String,
    pub to: NodeIndex,
    pub to_port: String,
}

/// Fan-out table keyed by `(source node, source port)`.
///
/// Entries refer to arena indices, never to node handles; the owning
/// [`Graph`](crate::graph::Graph) is the only thing that holds nodes. The table is append-only
/// while a graph is being evaluated.
#[derive(Debug, Clone, Default)]
pub struct ConnectionTable {
    routes: HashMap<NodeIndex, HashMap<String, Vec<Route>>>,
    edges: Vec<Edge>,
}

impl ConnectionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a destination under `(from, from_port)`. Calling this twice with the same
    /// arguments registers two routes, and the value is delivered twice.
    pub fn connect(&mut self, from: NodeIndex, from_port: &str, to: NodeIndex, to_port: &str) {
        let route = Route {
            node: to,
            port: to_port.to_string(),
        };
        let ports = self.routes.entry(from).or_default();
        match ports.get_mut(from_port) {
            Some(routes) => routes.push(route),
            None => {
                ports.insert(from_port.to_string(), vec![route]);
            }
        }
        self.edges.push(Edge {
            from,
            from_port: from_port.to_string(),
            to,
            to_port: to_port.to_string(),
        });
    }

    /// Destinations registered for `(from, port)`; empty when there are none.
    pub fn resolve(&self, from: NodeIndex, port: &str) -> &[Route] {
        self.routes
            .get(&from)
            .and_then(|ports| ports.get(port))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every connection, in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edges_from(&self, from: NodeIndex) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.from == from)
    }

    pub fn edges_into(&self, to: NodeIndex) -> impl Iterator<Item = &Edge> {
        self.edges.iter().filter(move |e| e.to == to)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Keep only the edges for which `keep` returns true, rebuilding the routing index.
    pub fn retain(&mut self, keep: impl FnMut(&Edge) -> bool) {
        let mut edges = std::mem::take(&mut self.edges);
        edges.retain(keep);
        self.routes.clear();
        for edge in edges {
            self.connect(edge.from, &edge.from_port, edge.to, &edge.to_port);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_returns_empty_for_unknown_source() {
        let table = ConnectionTable::new();
        assert!(table.resolve(NodeIndex(0), "Output").is_empty());
    }

    #[test]
    fn fan_out_keeps_every_destination_in_order() {
        let mut table = ConnectionTable::new();
        table.connect(NodeIndex(0), "Output", NodeIndex(1), "A");
        table.connect(NodeIndex(0), "Output", NodeIndex(2), "B");
        table.connect(NodeIndex(0), "Output", NodeIndex(3), "Input");

        let routes = table.resolve(NodeIndex(0), "Output");
        let targets: Vec<_> = routes.iter().map(|r| (r.node.0, r.port.as_str())).collect();
        assert_eq!(targets, vec![(1, "A"), (2, "B"), (3, "Input")]);
    }

    #[test]
    fn duplicate_connect_is_not_idempotent() {
        let mut table = ConnectionTable::new();
        table.connect(NodeIndex(0), "Output", NodeIndex(1), "Input");
        table.connect(NodeIndex(0), "Output", NodeIndex(1), "Input");
        assert_eq!(table.resolve(NodeIndex(0), "Output").len(), 2);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn retain_rebuilds_routes() {
        let mut table = ConnectionTable::new();
        table.connect(NodeIndex(0), "Output", NodeIndex(1), "A");
        table.connect(NodeIndex(0), "Output", NodeIndex(2), "B");
        table.retain(|e| e.to != NodeIndex(1));

        assert_eq!(table.len(), 1);
        let routes = table.resolve(NodeIndex(0), "Output");
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].node, NodeIndex(2));
    }
}
