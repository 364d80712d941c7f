//! Live node instances and their input slots.

use hashbrown::HashMap;
use matgraph_api_core::ResourceRef;
use once_cell::sync::Lazy;

use crate::curve::AnimationCurve;
use crate::types::{NodeId, NodeType, Position};

static DEFAULT_CURVE: Lazy<AnimationCurve> = Lazy::new(AnimationCurve::default);

/// Named float slots written by upstream nodes. A slot that was never written is absent,
/// which is distinct from holding `0.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortValues(HashMap<String, f32>);

impl PortValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, port: &str) -> Option<f32> {
        self.0.get(port).copied()
    }

    /// Value of `port`, or `0.0` when the slot was never written.
    pub fn get_or_zero(&self, port: &str) -> f32 {
        self.get(port).unwrap_or(0.0)
    }

    /// Overwrite a slot, returning the previous value.
    pub fn set(&mut self, port: &str, value: f32) -> Option<f32> {
        match self.0.get_mut(port) {
            Some(slot) => Some(std::mem::replace(slot, value)),
            None => {
                self.0.insert(port.to_string(), value);
                None
            }
        }
    }

    pub fn contains(&self, port: &str) -> bool {
        self.0.contains_key(port)
    }

    /// All of `ports` at once, or `None` if any of them is unset.
    pub fn all<const N: usize>(&self, ports: [&str; N]) -> Option<[f32; N]> {
        let mut out = [0.0; N];
        for (slot, port) in out.iter_mut().zip(ports) {
            *slot = self.get(port)?;
        }
        Some(out)
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.0.retain(|port, _| keep(port));
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.0.iter().map(|(port, value)| (port.as_str(), *value))
    }
}

/// Literal parameters applied when a node is built from its document entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeParams {
    /// Constant emitted by float value nodes. Other kinds keep it only so it is saved again.
    pub value: Option<f32>,
    /// Resource a material property node writes into. Ignored by other kinds.
    pub material: Option<ResourceRef>,
    /// Numeric properties exposed by `material`; these are the node's input ports.
    pub properties: Vec<String>,
    /// Custom curve for animation curve nodes. `None` means the default ease-in-out curve.
    /// Ignored by other kinds.
    pub curve: Option<AnimationCurve>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeType,
    pub position: Position,
    pub params: NodeParams,
    pub inputs: PortValues,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, kind: NodeType) -> Self {
        Self {
            id: id.into(),
            kind,
            position: Position::default(),
            params: NodeParams::default(),
            inputs: PortValues::new(),
        }
    }

    pub fn with_params(mut self, params: NodeParams) -> Self {
        self.params = params;
        self
    }

    pub fn at(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Input port names, fixed per type except for material nodes.
    pub fn input_ports(&self) -> Vec<&str> {
        match self.kind {
            NodeType::MaterialProperty => {
                self.params.properties.iter().map(String::as_str).collect()
            }
            kind => kind.inputs().to_vec(),
        }
    }

    pub fn has_input(&self, port: &str) -> bool {
        match self.kind {
            NodeType::MaterialProperty => self.params.properties.iter().any(|p| p == port),
            kind => kind.inputs().contains(&port),
        }
    }

    /// Canonical name of output `port`, if this node has it.
    pub fn output_port(&self, port: &str) -> Option<&'static str> {
        self.kind.canonical_output(port)
    }

    /// Curve evaluated by animation curve nodes; the default ease-in-out when none is set.
    pub fn curve(&self) -> &AnimationCurve {
        self.params.curve.as_ref().unwrap_or(&*DEFAULT_CURVE)
    }
}
