//! Persisted graph document exchanged with the editor.
//!
//! Serializes to JSON as:
//!
//! ```json
//! { "nodes": [
//!     { "guid": "a1", "type": "TimeNode", "position": { "x": 0, "y": 0 },
//!       "connections": [
//!         { "outputNodeGuid": "a1", "inputNodeGuid": "b2",
//!           "outputPortName": "Time", "inputPortName": "Input" } ] },
//!     { "guid": "b2", "type": "SinWaveNode", "position": { "x": 200, "y": 0 } } ] }
//! ```
//!
//! Connections are grouped under the node that owns the output side. Literal parameters
//! (`floatValue`, `material`, `curve`) are only present on the node types that use them.

use matgraph_api_core::ResourceRef;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::curve::AnimationCurve;
use crate::error::DocumentError;
use crate::types::{NodeId, NodeType, Position};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionData {
    pub output_node_guid: NodeId,
    pub input_node_guid: NodeId,
    pub output_port_name: String,
    pub input_port_name: String,
}

impl ConnectionData {
    pub fn new(
        output_node: impl Into<NodeId>,
        output_port: impl Into<String>,
        input_node: impl Into<NodeId>,
        input_port: impl Into<String>,
    ) -> Self {
        Self {
            output_node_guid: output_node.into(),
            input_node_guid: input_node.into(),
            output_port_name: output_port.into(),
            input_port_name: input_port.into(),
        }
    }

    pub fn involves(&self, guid: &str) -> bool {
        self.output_node_guid == guid || self.input_node_guid == guid
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub guid: NodeId,
    /// Kept as a raw string so documents naming node types this runtime does not know
    /// still parse; such nodes are skipped at load time.
    #[serde(rename = "type")]
    pub type_tag: String,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub connections: Vec<ConnectionData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<ResourceRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub float_value: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve: Option<AnimationCurve>,
}

impl NodeData {
    pub fn new(guid: impl Into<NodeId>, kind: NodeType) -> Self {
        Self {
            guid: guid.into(),
            type_tag: kind.tag().to_string(),
            position: Position::default(),
            connections: Vec::new(),
            material: None,
            float_value: None,
            curve: None,
        }
    }

    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.position = Position::new(x, y);
        self
    }

    pub fn with_float_value(mut self, value: f32) -> Self {
        self.float_value = Some(value);
        self
    }

    pub fn with_material(mut self, material: impl Into<ResourceRef>) -> Self {
        self.material = Some(material.into());
        self
    }

    pub fn with_curve(mut self, curve: AnimationCurve) -> Self {
        self.curve = Some(curve);
        self
    }

    pub fn kind(&self) -> Option<NodeType> {
        NodeType::from_tag(&self.type_tag)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    #[serde(default)]
    pub nodes: Vec<NodeData>,
}

impl GraphDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(json).map_err(DocumentError::Parse)
    }

    pub fn to_json(&self) -> Result<String, DocumentError> {
        serde_json::to_string(self).map_err(DocumentError::Serialize)
    }

    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        serde_json::to_string_pretty(self).map_err(DocumentError::Serialize)
    }

    pub fn with_node(mut self, node: NodeData) -> Self {
        self.nodes.push(node);
        self
    }

    /// Append a node of `kind` under a freshly minted GUID and return that GUID.
    pub fn add_node(&mut self, kind: NodeType, position: Position) -> NodeId {
        let guid = Uuid::new_v4().to_string();
        let mut node = NodeData::new(guid.clone(), kind);
        node.position = position;
        self.nodes.push(node);
        guid
    }

    pub fn node(&self, guid: &str) -> Option<&NodeData> {
        self.nodes.iter().find(|n| n.guid == guid)
    }

    pub fn node_mut(&mut self, guid: &str) -> Option<&mut NodeData> {
        self.nodes.iter_mut().find(|n| n.guid == guid)
    }

    /// Record a connection under its output node. Returns `false` (and records nothing) when
    /// the output node is not part of the document. The input side is not checked; the loader
    /// drops connections it cannot resolve.
    pub fn connect(
        &mut self,
        output_node: &str,
        output_port: &str,
        input_node: &str,
        input_port: &str,
    ) -> bool {
        let Some(owner) = self.node_mut(output_node) else {
            return false;
        };
        owner.connections.push(ConnectionData::new(
            output_node,
            output_port,
            input_node,
            input_port,
        ));
        true
    }

    /// Remove a node and every connection that references it.
    pub fn remove_node(&mut self, guid: &str) -> Option<NodeData> {
        let pos = self.nodes.iter().position(|n| n.guid == guid)?;
        let removed = self.nodes.remove(pos);
        for node in &mut self.nodes {
            node.connections.retain(|c| !c.involves(guid));
        }
        Some(removed)
    }

    /// All connections, in document order.
    pub fn connections(&self) -> impl Iterator<Item = &ConnectionData> {
        self.nodes.iter().flat_map(|n| n.connections.iter())
    }
}
