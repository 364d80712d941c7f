use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GraphError;

/// Stable node identifier as persisted in documents (a GUID string for editor-created nodes).
pub type NodeId = String;

/// Position of a node inside the live graph arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub usize);

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Editor canvas position. Carried through load/save untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Every node variant the runtime knows how to build. The serialized form is the type tag
/// written by the editor.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeType {
    // Time & values
    #[serde(rename = "TimeNode")]
    Time,
    #[serde(rename = "FloatValueNode")]
    FloatValue,

    // Trigonometry
    #[serde(rename = "SinWaveNode")]
    SinWave,
    #[serde(rename = "CosNode")]
    Cos,
    #[serde(rename = "TanNode")]
    Tan,

    // Ranges
    #[serde(rename = "ClampNode")]
    Clamp,
    #[serde(rename = "LerpNode")]
    Lerp,
    #[serde(rename = "InverseLerpNode")]
    InverseLerp,
    #[serde(rename = "MinNode")]
    Min,
    #[serde(rename = "MaxNode")]
    Max,
    #[serde(rename = "RemapNode")]
    Remap,

    // Noise
    #[serde(rename = "PerlinNoiseNode")]
    PerlinNoise,

    // Advanced
    #[serde(rename = "SmoothstepNode")]
    Smoothstep,
    #[serde(rename = "PingPongNode")]
    PingPong,
    #[serde(rename = "PowerNode")]
    Power,
    #[serde(rename = "FractionalNode")]
    Fractional,
    #[serde(rename = "BlendNode")]
    Blend,
    #[serde(rename = "AnimationCurveNode")]
    AnimationCurve,

    // Sinks
    #[serde(rename = "MaterialPropertyNode")]
    MaterialProperty,
}

pub const PORT_OUTPUT: &str = "Output";
pub const PORT_TIME: &str = "Time";
pub const PORT_TIME_2: &str = "Time 2";
pub const PORT_FLOAT_VALUE: &str = "FloatValue";

const OUT: &[&str] = &[PORT_OUTPUT];
const UNARY: &[&str] = &["Input"];
const AB: &[&str] = &["A", "B"];

impl NodeType {
    pub const ALL: [NodeType; 19] = [
        NodeType::Time,
        NodeType::FloatValue,
        NodeType::SinWave,
        NodeType::Cos,
        NodeType::Tan,
        NodeType::Clamp,
        NodeType::Lerp,
        NodeType::InverseLerp,
        NodeType::Min,
        NodeType::Max,
        NodeType::Remap,
        NodeType::PerlinNoise,
        NodeType::Smoothstep,
        NodeType::PingPong,
        NodeType::Power,
        NodeType::Fractional,
        NodeType::Blend,
        NodeType::AnimationCurve,
        NodeType::MaterialProperty,
    ];

    /// Type tag used in graph documents.
    pub fn tag(self) -> &'static str {
        match self {
            NodeType::Time => "TimeNode",
            NodeType::FloatValue => "FloatValueNode",
            NodeType::SinWave => "SinWaveNode",
            NodeType::Cos => "CosNode",
            NodeType::Tan => "TanNode",
            NodeType::Clamp => "ClampNode",
            NodeType::Lerp => "LerpNode",
            NodeType::InverseLerp => "InverseLerpNode",
            NodeType::Min => "MinNode",
            NodeType::Max => "MaxNode",
            NodeType::Remap => "RemapNode",
            NodeType::PerlinNoise => "PerlinNoiseNode",
            NodeType::Smoothstep => "SmoothstepNode",
            NodeType::PingPong => "PingPongNode",
            NodeType::Power => "PowerNode",
            NodeType::Fractional => "FractionalNode",
            NodeType::Blend => "BlendNode",
            NodeType::AnimationCurve => "AnimationCurveNode",
            NodeType::MaterialProperty => "MaterialPropertyNode",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.tag() == tag)
    }

    /// Time sources run before every other node in a tick.
    pub fn is_time_source(self) -> bool {
        matches!(self, NodeType::Time)
    }

    /// Sinks publish external writes instead of propagating values.
    pub fn is_sink(self) -> bool {
        matches!(self, NodeType::MaterialProperty)
    }

    /// Fixed input ports. Material nodes derive theirs from the bound resource instead.
    pub fn inputs(self) -> &'static [&'static str] {
        match self {
            NodeType::Time | NodeType::FloatValue | NodeType::MaterialProperty => &[],
            NodeType::SinWave | NodeType::Cos | NodeType::Tan | NodeType::Fractional => UNARY,
            NodeType::Clamp => &["Input", "Min", "Max"],
            NodeType::Lerp => &["A", "B", "T"],
            NodeType::InverseLerp => &["A", "B", "Value"],
            NodeType::Min | NodeType::Max => AB,
            NodeType::Remap => &["Value", "FromMin", "FromMax", "ToMin", "ToMax"],
            NodeType::PerlinNoise => &["X", "Y"],
            NodeType::Smoothstep => &["Edge0", "Edge1", "Value"],
            NodeType::PingPong => &["Input", "Length"],
            NodeType::Power => &["Base", "Exponent"],
            NodeType::Blend => &["A", "B", "Weight"],
            NodeType::AnimationCurve => &[PORT_TIME],
        }
    }

    pub fn outputs(self) -> &'static [&'static str] {
        match self {
            NodeType::Time => &[PORT_TIME, PORT_TIME_2],
            NodeType::FloatValue => &[PORT_FLOAT_VALUE],
            NodeType::MaterialProperty => &[],
            _ => OUT,
        }
    }

    /// Resolve a persisted output port name, accepting the legacy `Time2` spelling.
    pub fn canonical_output(self, port: &str) -> Option<&'static str> {
        let port = match (self, port) {
            (NodeType::Time, "Time2") => PORT_TIME_2,
            _ => port,
        };
        self.outputs().iter().copied().find(|p| *p == port)
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for NodeType {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| GraphError::UnknownNodeType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_round_trip_through_serde() {
        for kind in NodeType::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.tag()));
            assert_eq!(NodeType::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert_eq!(NodeType::from_tag("HeatDiffusionNode"), None);
        assert!(matches!(
            "HeatDiffusionNode".parse::<NodeType>(),
            Err(GraphError::UnknownNodeType(tag)) if tag == "HeatDiffusionNode"
        ));
    }

    #[test]
    fn time_accepts_legacy_second_output_name() {
        assert_eq!(NodeType::Time.canonical_output("Time2"), Some(PORT_TIME_2));
        assert_eq!(NodeType::Time.canonical_output("Time 2"), Some(PORT_TIME_2));
        assert_eq!(NodeType::SinWave.canonical_output("Time2"), None);
    }

    #[test]
    fn port_names_are_unique_per_type() {
        for kind in NodeType::ALL {
            let mut inputs = kind.inputs().to_vec();
            inputs.sort_unstable();
            inputs.dedup();
            assert_eq!(inputs.len(), kind.inputs().len(), "{kind} inputs");
            let mut outputs = kind.outputs().to_vec();
            outputs.sort_unstable();
            outputs.dedup();
            assert_eq!(outputs.len(), kind.outputs().len(), "{kind} outputs");
        }
    }
}
