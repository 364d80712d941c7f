//! Per-node evaluation logic for the material graph runtime.

use matgraph_api_core::{PropertyWrite, WriteBatch};

use crate::node::Node;
use crate::types::{NodeType, PORT_FLOAT_VALUE, PORT_OUTPUT, PORT_TIME, PORT_TIME_2};

use super::noise::perlin;
use super::numeric::{blend, clamp, fractional, inverse_lerp, lerp, ping_pong, remap, smooth_step};

/// A value leaving a node through one of its output ports.
pub type Emission = (&'static str, f32);

fn single(value: f32) -> Vec<Emission> {
    vec![(PORT_OUTPUT, value)]
}

/// Evaluate one node against its current input slots.
///
/// Returns the values to push along the node's outgoing connections. A node whose required
/// inputs have not all been written emits nothing, leaving its destinations untouched.
/// Material property nodes emit nothing; they append to `writes` instead.
pub fn eval_node(node: &Node, t: f32, writes: &mut WriteBatch) -> Vec<Emission> {
    let inputs = &node.inputs;
    let out = match node.kind {
        NodeType::Time => return vec![(PORT_TIME, t), (PORT_TIME_2, t * 2.0)],
        NodeType::FloatValue => {
            return vec![(PORT_FLOAT_VALUE, node.params.value.unwrap_or(0.0))];
        }
        NodeType::MaterialProperty => {
            write_material(node, writes);
            return Vec::new();
        }
        NodeType::SinWave => inputs.all(["Input"]).map(|[x]| x.sin()),
        NodeType::Cos => inputs.all(["Input"]).map(|[x]| x.cos()),
        NodeType::Tan => inputs.all(["Input"]).map(|[x]| x.tan()),
        NodeType::Fractional => inputs.all(["Input"]).map(|[x]| fractional(x)),
        NodeType::Clamp => inputs
            .all(["Input", "Min", "Max"])
            .map(|[v, min, max]| clamp(v, min, max)),
        NodeType::Lerp => inputs.all(["A", "B", "T"]).map(|[a, b, t]| lerp(a, b, t)),
        NodeType::InverseLerp => inputs
            .all(["A", "B", "Value"])
            .map(|[a, b, v]| inverse_lerp(a, b, v)),
        NodeType::Min => inputs.all(["A", "B"]).map(|[a, b]| a.min(b)),
        NodeType::Max => inputs.all(["A", "B"]).map(|[a, b]| a.max(b)),
        NodeType::Remap => inputs
            .all(["Value", "FromMin", "FromMax", "ToMin", "ToMax"])
            .map(|[v, from_min, from_max, to_min, to_max]| {
                remap(v, from_min, from_max, to_min, to_max)
            }),
        NodeType::PerlinNoise => inputs.all(["X", "Y"]).map(|[x, y]| perlin(x, y)),
        NodeType::Smoothstep => inputs
            .all(["Edge0", "Edge1", "Value"])
            .map(|[edge0, edge1, v]| smooth_step(edge0, edge1, v)),
        NodeType::PingPong => inputs
            .all(["Input", "Length"])
            .map(|[v, length]| ping_pong(v, length)),
        NodeType::Power => inputs
            .all(["Base", "Exponent"])
            .map(|[base, exponent]| base.powf(exponent)),
        NodeType::Blend => inputs
            .all(["A", "B", "Weight"])
            .map(|[a, b, weight]| blend(a, b, weight)),
        NodeType::AnimationCurve => inputs
            .all([PORT_TIME])
            .map(|[time]| node.curve().evaluate(time)),
    };
    out.map(single).unwrap_or_default()
}

fn write_material(node: &Node, writes: &mut WriteBatch) {
    let Some(resource) = node.params.material.as_ref() else {
        return;
    };
    for property in &node.params.properties {
        if let Some(value) = node.inputs.get(property) {
            writes.push(PropertyWrite::new(resource.clone(), property.clone(), value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{AnimationCurve, Keyframe};
    use crate::node::NodeParams;
    use matgraph_api_core::ResourceRef;

    fn node_with(kind: NodeType, inputs: &[(&str, f32)]) -> Node {
        let mut node = Node::new("n", kind);
        for (port, value) in inputs {
            node.inputs.set(port, *value);
        }
        node
    }

    fn output_of(node: &Node) -> Option<f32> {
        let mut writes = WriteBatch::new();
        match eval_node(node, 0.0, &mut writes).as_slice() {
            [(PORT_OUTPUT, value)] => Some(*value),
            [] => None,
            other => panic!("unexpected emissions {other:?}"),
        }
    }

    #[test]
    fn time_emits_both_outputs() {
        let mut writes = WriteBatch::new();
        let out = eval_node(&Node::new("t", NodeType::Time), 1.5, &mut writes);
        assert_eq!(out, vec![(PORT_TIME, 1.5), (PORT_TIME_2, 3.0)]);
        assert!(writes.is_empty());
    }

    #[test]
    fn float_value_defaults_to_zero() {
        let mut writes = WriteBatch::new();
        let node = Node::new("f", NodeType::FloatValue);
        assert_eq!(eval_node(&node, 0.0, &mut writes), vec![(PORT_FLOAT_VALUE, 0.0)]);

        let node = node.with_params(NodeParams {
            value: Some(4.25),
            ..Default::default()
        });
        assert_eq!(eval_node(&node, 0.0, &mut writes), vec![(PORT_FLOAT_VALUE, 4.25)]);
    }

    #[test]
    fn missing_inputs_emit_nothing() {
        assert_eq!(output_of(&node_with(NodeType::SinWave, &[])), None);
        assert_eq!(
            output_of(&node_with(NodeType::Clamp, &[("Input", 5.0), ("Min", 0.0)])),
            None
        );
        assert_eq!(output_of(&node_with(NodeType::AnimationCurve, &[])), None);
    }

    #[test]
    fn math_nodes_follow_engine_semantics() {
        let cases: &[(NodeType, &[(&str, f32)], f32)] = &[
            (NodeType::SinWave, &[("Input", 0.0)], 0.0),
            (NodeType::Cos, &[("Input", 0.0)], 1.0),
            (NodeType::Tan, &[("Input", 0.0)], 0.0),
            (NodeType::Fractional, &[("Input", 2.75)], 0.75),
            (NodeType::Clamp, &[("Input", 5.0), ("Min", 0.0), ("Max", 3.0)], 3.0),
            (NodeType::Clamp, &[("Input", -1.0), ("Min", 0.0), ("Max", 3.0)], 0.0),
            (NodeType::Lerp, &[("A", 0.0), ("B", 10.0), ("T", 2.0)], 10.0),
            (NodeType::InverseLerp, &[("A", 0.0), ("B", 4.0), ("Value", 1.0)], 0.25),
            (NodeType::Min, &[("A", 2.0), ("B", -1.0)], -1.0),
            (NodeType::Max, &[("A", 2.0), ("B", -1.0)], 2.0),
            (
                NodeType::Remap,
                &[("Value", 5.0), ("FromMin", 0.0), ("FromMax", 10.0), ("ToMin", 100.0), ("ToMax", 200.0)],
                150.0,
            ),
            (NodeType::Smoothstep, &[("Edge0", 0.0), ("Edge1", 1.0), ("Value", 0.5)], 0.5),
            (NodeType::PingPong, &[("Input", 1.5), ("Length", 1.0)], 0.5),
            (NodeType::Power, &[("Base", 2.0), ("Exponent", 3.0)], 8.0),
            (NodeType::Blend, &[("A", 0.0), ("B", 10.0), ("Weight", 0.25)], 2.5),
            (NodeType::PerlinNoise, &[("X", 0.0), ("Y", 0.0)], 0.5),
        ];
        for (kind, inputs, expected) in cases {
            let got = output_of(&node_with(*kind, inputs)).expect("all inputs set");
            assert!(
                (got - expected).abs() < 1e-5,
                "{kind:?} with {inputs:?}: expected {expected}, got {got}"
            );
        }
    }

    #[test]
    fn animation_curve_uses_custom_keys() {
        let mut node = node_with(NodeType::AnimationCurve, &[("Time", 0.5)]);
        assert!((output_of(&node).unwrap() - 0.5).abs() < 1e-6);

        node.params.curve = Some(AnimationCurve::new(vec![
            Keyframe::new(0.0, 0.0).with_tangents(2.0, 2.0),
            Keyframe::new(1.0, 2.0).with_tangents(2.0, 2.0),
        ]));
        assert!((output_of(&node).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn material_writes_follow_property_order() {
        let mut node = Node::new("m", NodeType::MaterialProperty).with_params(NodeParams {
            material: Some(ResourceRef::new("water")),
            properties: vec!["_Speed".into(), "_Height".into(), "_Unused".into()],
            ..Default::default()
        });
        node.inputs.set("_Height", 0.25);
        node.inputs.set("_Speed", 2.0);

        let mut writes = WriteBatch::new();
        assert!(eval_node(&node, 0.0, &mut writes).is_empty());
        let written: Vec<_> = writes
            .iter()
            .map(|w| (w.property.as_str(), w.value))
            .collect();
        assert_eq!(written, vec![("_Speed", 2.0), ("_Height", 0.25)]);
        assert!(writes.iter().all(|w| w.resource.as_str() == "water"));
    }

    #[test]
    fn unbound_material_writes_nothing() {
        let mut node = Node::new("m", NodeType::MaterialProperty);
        node.inputs.set("_Height", 1.0);
        let mut writes = WriteBatch::new();
        eval_node(&node, 0.0, &mut writes);
        assert!(writes.is_empty());
    }
}
