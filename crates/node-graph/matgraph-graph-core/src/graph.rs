//! The live graph: a node arena plus its connection table.

use hashbrown::HashMap;
use log::debug;
use matgraph_api_core::{ResourceCatalog, ResourceRef};

use crate::connections::ConnectionTable;
use crate::document::{ConnectionData, GraphDocument, NodeData};
use crate::error::GraphError;
use crate::node::Node;
use crate::types::{NodeId, NodeIndex, NodeType};

/// Nodes are stored in a single arena in insertion order; that order is also the evaluation
/// order of non-time nodes under [`Schedule::TimeFirst`](crate::config::Schedule).
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<Node>,
    index: HashMap<NodeId, NodeIndex>,
    connections: ConnectionTable,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            index: HashMap::with_capacity(nodes),
            connections: ConnectionTable::new(),
        }
    }

    /// Add a node under its id. Ids must be unique within the graph.
    pub fn add_node(&mut self, node: Node) -> Result<NodeIndex, GraphError> {
        if self.index.contains_key(&node.id) {
            return Err(GraphError::DuplicateNode(node.id));
        }
        Ok(self.insert_or_replace(node).0)
    }

    /// Insert `node`, replacing (in place) any node already registered under the same id.
    /// Returns the arena slot and whether a node was replaced.
    pub(crate) fn insert_or_replace(&mut self, node: Node) -> (NodeIndex, bool) {
        if let Some(&idx) = self.index.get(&node.id) {
            self.nodes[idx.0] = node;
            return (idx, true);
        }
        let idx = NodeIndex(self.nodes.len());
        self.index.insert(node.id.clone(), idx);
        self.nodes.push(node);
        (idx, false)
    }

    pub fn index_of(&self, id: &str) -> Option<NodeIndex> {
        self.index.get(id).copied()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.index_of(id).and_then(|idx| self.nodes.get(idx.0))
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        let idx = self.index_of(id)?;
        self.nodes.get_mut(idx.0)
    }

    pub fn node_at(&self, idx: NodeIndex) -> Option<&Node> {
        self.nodes.get(idx.0)
    }

    /// Nodes in arena order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub fn indices(&self) -> impl Iterator<Item = NodeIndex> {
        (0..self.nodes.len()).map(NodeIndex)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn connections(&self) -> &ConnectionTable {
        &self.connections
    }

    /// Wire `from.from_port` into `to.to_port`, checking that both nodes and both ports exist.
    /// The legacy `Time2` output name is stored as `Time 2`.
    pub fn connect(
        &mut self,
        from: &str,
        from_port: &str,
        to: &str,
        to_port: &str,
    ) -> Result<(), GraphError> {
        let src = self
            .index_of(from)
            .ok_or_else(|| GraphError::UnknownNode(from.to_string()))?;
        let dst = self
            .index_of(to)
            .ok_or_else(|| GraphError::UnknownNode(to.to_string()))?;

        let out_port = self.nodes[src.0].output_port(from_port).ok_or_else(|| {
            GraphError::UnknownOutputPort {
                node: from.to_string(),
                port: from_port.to_string(),
            }
        })?;
        if !self.nodes[dst.0].has_input(to_port) {
            return Err(GraphError::UnknownInputPort {
                node: to.to_string(),
                port: to_port.to_string(),
            });
        }

        self.connections.connect(src, out_port, dst, to_port);
        Ok(())
    }

    /// Write an input slot directly, as a host seeding values would. Returns the previous value.
    pub fn set_input(&mut self, id: &str, port: &str, value: f32) -> Result<Option<f32>, GraphError> {
        let node = self
            .node_mut(id)
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))?;
        if !node.has_input(port) {
            return Err(GraphError::UnknownInputPort {
                node: id.to_string(),
                port: port.to_string(),
            });
        }
        Ok(node.inputs.set(port, value))
    }

    pub fn input(&self, id: &str, port: &str) -> Option<f32> {
        self.node(id).and_then(|n| n.inputs.get(port))
    }

    /// Deliver `value` to every destination of `(from, port)`, overwriting their slots.
    /// Returns the number of deliveries.
    pub(crate) fn propagate(&mut self, from: NodeIndex, port: &str, value: f32) -> usize {
        let routes = self.connections.resolve(from, port);
        for route in routes {
            if let Some(node) = self.nodes.get_mut(route.node.0) {
                node.inputs.set(&route.port, value);
            }
        }
        routes.len()
    }

    /// Point a material property node at a different resource (or at none).
    ///
    /// The node's ports become the resource's numeric properties. Slot values and incoming
    /// connections for ports that disappear are discarded; the rest are kept.
    pub fn rebind_material(
        &mut self,
        id: &str,
        resource: Option<ResourceRef>,
        catalog: &dyn ResourceCatalog,
    ) -> Result<(), GraphError> {
        let idx = self
            .index_of(id)
            .ok_or_else(|| GraphError::UnknownNode(id.to_string()))?;
        let node = &mut self.nodes[idx.0];
        if node.kind != NodeType::MaterialProperty {
            return Err(GraphError::NotAMaterialNode(id.to_string()));
        }

        let properties = resource
            .as_ref()
            .and_then(|r| catalog.list_numeric_properties(r))
            .unwrap_or_default();
        node.inputs.retain(|port| properties.iter().any(|p| p == port));
        debug!(
            "rebinding material node '{}' to {:?} ({} properties)",
            id,
            resource.as_ref().map(ResourceRef::as_str),
            properties.len()
        );
        node.params.material = resource;
        node.params.properties = properties;

        let properties = &self.nodes[idx.0].params.properties;
        self.connections
            .retain(|edge| edge.to != idx || properties.iter().any(|p| *p == edge.to_port));
        Ok(())
    }

    /// Rebuild the persisted form of this graph. Connections are grouped under their output
    /// node in the order they were added.
    pub fn to_document(&self) -> GraphDocument {
        let nodes = self
            .indices()
            .map(|idx| {
                let node = &self.nodes[idx.0];
                let mut data = NodeData::new(node.id.clone(), node.kind);
                data.position = node.position;
                data.material = node.params.material.clone();
                data.float_value = node.params.value;
                data.curve = node.params.curve.clone();
                data.connections = self
                    .connections
                    .edges_from(idx)
                    .map(|edge| {
                        ConnectionData::new(
                            node.id.clone(),
                            edge.from_port.clone(),
                            self.nodes[edge.to.0].id.clone(),
                            edge.to_port.clone(),
                        )
                    })
                    .collect();
                data
            })
            .collect();
        GraphDocument { nodes }
    }
}
