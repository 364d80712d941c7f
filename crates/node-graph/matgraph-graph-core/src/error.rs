use thiserror::Error;

use crate::types::NodeId;

/// Errors raised by the strict editing API on [`Graph`](crate::graph::Graph).
///
/// The loader and the evaluator never surface these: they absorb the condition and log it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("unknown node '{0}'")]
    UnknownNode(NodeId),
    #[error("unknown node type '{0}'")]
    UnknownNodeType(String),
    #[error("node '{node}' has no output port '{port}'")]
    UnknownOutputPort { node: NodeId, port: String },
    #[error("node '{node}' has no input port '{port}'")]
    UnknownInputPort { node: NodeId, port: String },
    #[error("node id '{0}' is already in use")]
    DuplicateNode(NodeId),
    #[error("node '{0}' is not a material property node")]
    NotAMaterialNode(NodeId),
}

/// Errors raised while reading or writing a [`GraphDocument`](crate::document::GraphDocument).
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to parse graph document: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("failed to serialize graph document: {0}")]
    Serialize(#[source] serde_json::Error),
}
