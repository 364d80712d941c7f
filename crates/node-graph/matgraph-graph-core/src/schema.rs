//! Static node metadata for editors and tooling: display names, search categories and port
//! descriptions, keyed by [`NodeType`].

use serde::Serialize;

use crate::types::NodeType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PortType {
    Float,
}

/// How many connections a port accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Capacity {
    Single,
    Multi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Float,
    Resource,
    Curve,
}

#[derive(Debug, Clone, Serialize)]
pub struct PortSpec {
    pub id: &'static str,
    pub ty: PortType,
    pub capacity: Capacity,
    #[serde(skip_serializing_if = "is_blank")]
    pub doc: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParamSpec {
    /// Document field carrying the literal.
    pub id: &'static str,
    pub ty: ParamType,
    pub label: &'static str,
    #[serde(skip_serializing_if = "is_blank")]
    pub doc: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_json: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeSignature {
    pub type_id: NodeType,
    pub name: &'static str,
    pub category: &'static str,
    pub inputs: Vec<PortSpec>,
    /// Inputs are derived from a bound resource rather than listed in `inputs`.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub dynamic_inputs: bool,
    pub outputs: Vec<PortSpec>,
    pub params: Vec<ParamSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registry {
    pub version: &'static str,
    pub nodes: Vec<NodeSignature>,
}

impl Registry {
    pub fn get(&self, kind: NodeType) -> Option<&NodeSignature> {
        self.nodes.iter().find(|sig| sig.type_id == kind)
    }
}

/// One group in the editor's "Create Node" search window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchCategory {
    pub name: &'static str,
    pub entries: Vec<SearchEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchEntry {
    pub name: &'static str,
    pub type_id: NodeType,
}

fn is_blank(text: &&'static str) -> bool {
    text.is_empty()
}

fn input(id: &'static str) -> PortSpec {
    PortSpec {
        id,
        ty: PortType::Float,
        capacity: Capacity::Single,
        doc: "",
    }
}

fn output(id: &'static str) -> PortSpec {
    PortSpec {
        id,
        ty: PortType::Float,
        capacity: Capacity::Multi,
        doc: "",
    }
}

fn documented(mut port: PortSpec, doc: &'static str) -> PortSpec {
    port.doc = doc;
    port
}

fn display(kind: NodeType) -> (&'static str, &'static str) {
    use NodeType::*;
    match kind {
        Time => ("Time", "Input/Time"),
        FloatValue => ("Float", "Values/Float"),
        SinWave => ("Sin", "Math/Basic"),
        Cos => ("Cos", "Math/Trigonometry"),
        Tan => ("Tan", "Math/Trigonometry"),
        Clamp => ("Clamp", "Math/Range"),
        Lerp => ("Lerp", "Math/Range"),
        InverseLerp => ("Inverse Lerp", "Math/Range"),
        Min => ("Min", "Math/Range"),
        Max => ("Max", "Math/Range"),
        Remap => ("Remap", "Math/Range"),
        PerlinNoise => ("Perlin Noise", "Math/Noise"),
        Smoothstep => ("Smoothstep", "Math/Advanced"),
        PingPong => ("Ping Pong", "Math/Advanced"),
        Power => ("Power", "Math/Value"),
        Fractional => ("Fractional", "Math/Value"),
        Blend => ("Blend", "Math/Blend"),
        AnimationCurve => ("Animation Curve", "Animation"),
        MaterialProperty => ("Mat Props", "Material"),
    }
}

fn params(kind: NodeType) -> Vec<ParamSpec> {
    match kind {
        NodeType::FloatValue => vec![ParamSpec {
            id: "floatValue",
            ty: ParamType::Float,
            label: "FloatValue",
            doc: "Constant emitted every tick.",
            default_json: Some(serde_json::json!(0.0)),
        }],
        NodeType::MaterialProperty => vec![ParamSpec {
            id: "material",
            ty: ParamType::Resource,
            label: "Material",
            doc: "Resource whose numeric properties become this node's inputs.",
            default_json: None,
        }],
        NodeType::AnimationCurve => vec![ParamSpec {
            id: "curve",
            ty: ParamType::Curve,
            label: "Curve",
            doc: "Keyframes evaluated at the Time input. Defaults to ease-in-out from (0,0) to (1,1).",
            default_json: None,
        }],
        _ => Vec::new(),
    }
}

pub fn signature(kind: NodeType) -> NodeSignature {
    let (name, category) = display(kind);
    let outputs = match kind {
        NodeType::Time => vec![
            documented(output("Time"), "Host clock time in seconds."),
            documented(output("Time 2"), "Twice the host clock time."),
        ],
        other => other.outputs().iter().copied().map(output).collect(),
    };
    NodeSignature {
        type_id: kind,
        name,
        category,
        inputs: kind.inputs().iter().copied().map(input).collect(),
        dynamic_inputs: kind == NodeType::MaterialProperty,
        outputs,
        params: params(kind),
    }
}

pub fn registry() -> Registry {
    Registry {
        version: "1.0.0",
        nodes: NodeType::ALL.iter().copied().map(signature).collect(),
    }
}

/// Signatures grouped by category; categories and entries are sorted by name.
pub fn search_tree() -> Vec<SearchCategory> {
    let mut categories: Vec<SearchCategory> = Vec::new();
    for sig in registry().nodes {
        let entry = SearchEntry {
            name: sig.name,
            type_id: sig.type_id,
        };
        match categories.iter_mut().find(|c| c.name == sig.category) {
            Some(category) => category.entries.push(entry),
            None => categories.push(SearchCategory {
                name: sig.category,
                entries: vec![entry],
            }),
        }
    }
    categories.sort_by(|a, b| a.name.cmp(b.name));
    for category in &mut categories {
        category.entries.sort_by(|a, b| a.name.cmp(b.name));
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_covers_every_node_type_once() {
        let reg = registry();
        assert_eq!(reg.nodes.len(), NodeType::ALL.len());
        for kind in NodeType::ALL {
            let sig = reg.get(kind).expect("signature present");
            assert_eq!(sig.inputs.len(), kind.inputs().len());
            assert_eq!(sig.outputs.len(), kind.outputs().len());
        }
    }

    #[test]
    fn inputs_are_single_and_outputs_multi_capacity() {
        for sig in registry().nodes {
            assert!(sig.inputs.iter().all(|p| p.capacity == Capacity::Single));
            assert!(sig.outputs.iter().all(|p| p.capacity == Capacity::Multi));
        }
    }

    #[test]
    fn material_node_declares_dynamic_inputs() {
        let sig = signature(NodeType::MaterialProperty);
        assert!(sig.dynamic_inputs);
        assert!(sig.inputs.is_empty());
        assert_eq!(sig.params[0].id, "material");
    }

    #[test]
    fn search_tree_is_sorted() {
        let tree = search_tree();
        let names: Vec<_> = tree.iter().map(|c| c.name).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);

        let range = tree
            .iter()
            .find(|c| c.name == "Math/Range")
            .expect("range category");
        let entries: Vec<_> = range.entries.iter().map(|e| e.name).collect();
        assert_eq!(entries, vec!["Clamp", "Inverse Lerp", "Lerp", "Max", "Min", "Remap"]);
    }

    #[test]
    fn registry_serializes_type_tags() {
        let json = serde_json::to_value(registry()).unwrap();
        assert_eq!(json["nodes"][0]["type_id"], "TimeNode");
        assert!(json["nodes"][0].get("dynamic_inputs").is_none());
    }
}
