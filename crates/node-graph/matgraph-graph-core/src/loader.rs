//! Rehydrates a persisted [`GraphDocument`] into a live [`Graph`].
//!
//! Loading is lenient. Entries with an unknown type tag are skipped and connections that do not
//! resolve (missing node or port) are dropped; each case is logged and recorded in the
//! [`LoadReport`] instead of failing the load.

use log::{debug, warn};
use matgraph_api_core::ResourceCatalog;
use serde::Serialize;

use crate::curve::AnimationCurve;
use crate::document::{ConnectionData, GraphDocument, NodeData};
use crate::error::GraphError;
use crate::graph::Graph;
use crate::node::{Node, NodeParams};
use crate::types::{NodeId, NodeType};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedNode {
    pub guid: NodeId,
    pub type_tag: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    MissingOutputNode,
    MissingInputNode,
    MissingOutputPort,
    MissingInputPort,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DroppedConnection {
    pub connection: ConnectionData,
    pub reason: DropReason,
}

/// What the loader left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    pub skipped_nodes: Vec<SkippedNode>,
    pub dropped_connections: Vec<DroppedConnection>,
    /// Guids that appeared more than once; the later entry replaced the earlier one.
    pub replaced_nodes: Vec<NodeId>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped_nodes.is_empty()
            && self.dropped_connections.is_empty()
            && self.replaced_nodes.is_empty()
    }
}

/// Build a live node from its document entry, or `None` for an unknown type tag.
///
/// Every literal on the entry is kept on the node, even those its kind ignores, so saving
/// the graph again writes them back. Material property nodes take their input ports from
/// `catalog`. A material the catalog does not know leaves the node without ports.
pub fn build_node(data: &NodeData, catalog: &dyn ResourceCatalog) -> Option<Node> {
    let kind = data.kind()?;
    let mut params = NodeParams {
        value: data.float_value,
        material: data.material.clone(),
        curve: data.curve.clone().map(AnimationCurve::normalized),
        ..Default::default()
    };
    if let (NodeType::MaterialProperty, Some(resource)) = (kind, &data.material) {
        match catalog.list_numeric_properties(resource) {
            Some(properties) => params.properties = properties,
            None => warn!(
                "material node '{}' references unknown resource '{}'; it has no ports",
                data.guid, resource
            ),
        }
    }
    Some(
        Node::new(data.guid.clone(), kind)
            .at(data.position)
            .with_params(params),
    )
}

fn drop_reason(err: &GraphError, connection: &ConnectionData) -> DropReason {
    match err {
        GraphError::UnknownNode(id) if *id == connection.output_node_guid => {
            DropReason::MissingOutputNode
        }
        GraphError::UnknownNode(_) => DropReason::MissingInputNode,
        GraphError::UnknownOutputPort { .. } => DropReason::MissingOutputPort,
        _ => DropReason::MissingInputPort,
    }
}

/// Build a [`Graph`] from `doc`.
///
/// Nodes land in the arena in document order. Connections are then resolved in document
/// order (outer: owning node, inner: connection list), so the connection table preserves the
/// order in which the editor stored them.
pub fn load_graph(doc: &GraphDocument, catalog: &dyn ResourceCatalog) -> (Graph, LoadReport) {
    let mut graph = Graph::with_capacity(doc.nodes.len());
    let mut report = LoadReport::default();

    for data in &doc.nodes {
        let Some(node) = build_node(data, catalog) else {
            warn!(
                "skipping node '{}' with unknown type '{}'",
                data.guid, data.type_tag
            );
            report.skipped_nodes.push(SkippedNode {
                guid: data.guid.clone(),
                type_tag: data.type_tag.clone(),
            });
            continue;
        };
        let (_, replaced) = graph.insert_or_replace(node);
        if replaced {
            warn!("duplicate node guid '{}'; later entry replaces earlier", data.guid);
            report.replaced_nodes.push(data.guid.clone());
        }
    }

    for connection in doc.connections() {
        if let Err(err) = graph.connect(
            &connection.output_node_guid,
            &connection.output_port_name,
            &connection.input_node_guid,
            &connection.input_port_name,
        ) {
            warn!("dropping connection: {err}");
            report.dropped_connections.push(DroppedConnection {
                connection: connection.clone(),
                reason: drop_reason(&err, connection),
            });
        }
    }

    debug!(
        "loaded graph: {} node(s), {} connection(s), {} skipped, {} dropped",
        graph.len(),
        graph.connections().len(),
        report.skipped_nodes.len(),
        report.dropped_connections.len()
    );
    (graph, report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Keyframe;
    use crate::types::Position;
    use matgraph_api_core::{Material, MaterialTable};

    fn catalog() -> MaterialTable {
        MaterialTable::new().with_material(
            "water",
            Material::new()
                .with_property("_Height", 0.0)
                .with_property("_Speed", 1.0),
        )
    }

    #[test]
    fn builds_every_known_tag() {
        let catalog = catalog();
        for kind in NodeType::ALL {
            let data = NodeData::new(format!("{kind:?}"), kind);
            let node = build_node(&data, &catalog).expect("known tag");
            assert_eq!(node.kind, kind);
        }
    }

    #[test]
    fn unknown_tags_are_skipped() {
        let mut doc = GraphDocument::new().with_node(NodeData::new("t", NodeType::Time));
        let mut stray = NodeData::new("x", NodeType::Time);
        stray.type_tag = "GradientNode".into();
        doc.nodes.push(stray);

        let (graph, report) = load_graph(&doc, &catalog());
        assert_eq!(graph.len(), 1);
        assert_eq!(
            report.skipped_nodes,
            vec![SkippedNode {
                guid: "x".into(),
                type_tag: "GradientNode".into()
            }]
        );
    }

    #[test]
    fn literals_and_positions_are_applied() {
        let curve = AnimationCurve::new(vec![Keyframe::new(1.0, 2.0), Keyframe::new(0.0, 0.0)]);
        let doc = GraphDocument::new()
            .with_node(
                NodeData::new("f", NodeType::FloatValue)
                    .at(10.0, -4.0)
                    .with_float_value(2.5),
            )
            .with_node(NodeData::new("c", NodeType::AnimationCurve).with_curve(curve));

        let (graph, report) = load_graph(&doc, &catalog());
        assert!(report.is_clean());
        let f = graph.node("f").unwrap();
        assert_eq!(f.params.value, Some(2.5));
        assert_eq!(f.position, Position::new(10.0, -4.0));
        let keys = graph.node("c").unwrap().curve();
        assert_eq!(keys.keys()[0].time, 0.0);
    }

    #[test]
    fn literals_on_other_kinds_survive_a_save() {
        let doc = GraphDocument::new()
            .with_node(NodeData::new("s", NodeType::SinWave).with_float_value(1.5))
            .with_node(NodeData::new("t", NodeType::Time).with_material("water"));

        let (graph, report) = load_graph(&doc, &catalog());
        assert!(report.is_clean());
        assert!(graph.node("t").unwrap().input_ports().is_empty());
        let saved = graph.to_document();
        assert_eq!(saved.nodes[0].float_value, Some(1.5));
        assert_eq!(saved.nodes[1].material.as_ref().map(|r| r.as_str()), Some("water"));
        assert_eq!(saved, doc);
    }

    #[test]
    fn material_ports_come_from_the_catalog() {
        let doc = GraphDocument::new()
            .with_node(NodeData::new("m", NodeType::MaterialProperty).with_material("water"))
            .with_node(NodeData::new("lost", NodeType::MaterialProperty).with_material("lava"))
            .with_node(NodeData::new("unbound", NodeType::MaterialProperty));

        let (graph, _) = load_graph(&doc, &catalog());
        assert_eq!(graph.node("m").unwrap().input_ports(), vec!["_Height", "_Speed"]);

        let lost = graph.node("lost").unwrap();
        assert!(lost.input_ports().is_empty());
        assert_eq!(lost.params.material.as_ref().map(|r| r.as_str()), Some("lava"));
        assert!(graph.node("unbound").unwrap().input_ports().is_empty());
    }

    #[test]
    fn unresolvable_connections_are_dropped_with_a_reason() {
        let mut doc = GraphDocument::new()
            .with_node(NodeData::new("t", NodeType::Time))
            .with_node(NodeData::new("s", NodeType::SinWave));
        assert!(doc.connect("t", "Time", "s", "Input"));
        assert!(doc.connect("t", "Time", "ghost", "Input"));
        assert!(doc.connect("t", "Time 3", "s", "Input"));
        assert!(doc.connect("t", "Time", "s", "Radius"));
        doc.nodes[1]
            .connections
            .push(ConnectionData::new("gone", "Output", "s", "Input"));

        let (graph, report) = load_graph(&doc, &catalog());
        assert_eq!(graph.connections().len(), 1);
        let reasons: Vec<_> = report.dropped_connections.iter().map(|d| d.reason).collect();
        assert_eq!(
            reasons,
            vec![
                DropReason::MissingInputNode,
                DropReason::MissingOutputPort,
                DropReason::MissingInputPort,
                DropReason::MissingOutputNode,
            ]
        );
    }

    #[test]
    fn connections_to_skipped_nodes_are_dropped() {
        let mut doc = GraphDocument::new().with_node(NodeData::new("t", NodeType::Time));
        let mut stray = NodeData::new("x", NodeType::SinWave);
        stray.type_tag = "GradientNode".into();
        doc.nodes.push(stray);
        assert!(doc.connect("t", "Time", "x", "Input"));

        let (graph, report) = load_graph(&doc, &catalog());
        assert!(graph.connections().is_empty());
        assert_eq!(report.dropped_connections.len(), 1);
        assert_eq!(report.dropped_connections[0].reason, DropReason::MissingInputNode);
    }

    #[test]
    fn duplicate_guids_replace_in_place() {
        let doc = GraphDocument::new()
            .with_node(NodeData::new("a", NodeType::FloatValue).with_float_value(1.0))
            .with_node(NodeData::new("t", NodeType::Time))
            .with_node(NodeData::new("a", NodeType::FloatValue).with_float_value(2.0));

        let (graph, report) = load_graph(&doc, &catalog());
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.index_of("a").map(|i| i.0), Some(0));
        assert_eq!(graph.node("a").unwrap().params.value, Some(2.0));
        assert_eq!(report.replaced_nodes, vec!["a".to_string()]);
        assert!(!report.is_clean());
    }

    #[test]
    fn legacy_time2_connections_load() {
        let mut doc = GraphDocument::new()
            .with_node(NodeData::new("t", NodeType::Time))
            .with_node(NodeData::new("s", NodeType::SinWave));
        assert!(doc.connect("t", "Time2", "s", "Input"));

        let (graph, report) = load_graph(&doc, &catalog());
        assert!(report.is_clean());
        assert_eq!(graph.connections().edges()[0].from_port, "Time 2");
    }
}
