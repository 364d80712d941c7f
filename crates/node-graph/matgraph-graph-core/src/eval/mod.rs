//! Evaluation pipeline for the material graph.
//!
//! - [`graph_runtime`] holds the tick clock value, epoch and collected writes.
//! - [`numeric`] and [`noise`] provide engine-compatible math.
//! - [`eval_node`] houses the dispatch logic for individual [`NodeType`](crate::types::NodeType)s.
//!
//! Hosts call [`tick`] once per frame, or [`evaluate_all`] when they manage time themselves.

use log::trace;
use matgraph_api_core::Clock;

use crate::config::Schedule;
use crate::graph::Graph;
use crate::types::NodeIndex;

pub mod eval_node;
mod graph_runtime;
pub mod noise;
pub mod numeric;

pub use eval_node::{eval_node, Emission};
pub use graph_runtime::GraphRuntime;


/// Order in which one tick visits the nodes of `graph`.
///
/// Both schedules visit time sources first. Every node appears exactly once.
pub fn execution_order(graph: &Graph, schedule: Schedule) -> Vec<NodeIndex> {
    match schedule {
        Schedule::TimeFirst => {
            let (time, rest): (Vec<_>, Vec<_>) = graph
                .indices()
                .partition(|idx| graph.node_at(*idx).is_some_and(|n| n.kind.is_time_source()));
            time.into_iter().chain(rest).collect()
        }
        Schedule::Topological => crate::topo::topo_order(graph),
    }
}

/// Evaluate every node in `graph` once at time `rt.t`.
///
/// Each node reads its input slots as they stand when it is visited, so under
/// [`Schedule::TimeFirst`] a node listed before its producer sees the producer's previous
/// value. Material writes are collected into `rt.writes`; nothing is applied here.
pub fn evaluate_all(rt: &mut GraphRuntime, graph: &mut Graph) {
    rt.begin_tick();
    let order = execution_order(graph, rt.config.schedule);
    for idx in order {
        let Some(node) = graph.node_at(idx) else {
            continue;
        };
        let emissions = eval_node::eval_node(node, rt.t, &mut rt.writes);
        for (port, value) in emissions {
            let delivered = graph.propagate(idx, port, value);
            trace!("{idx} '{port}' = {value} -> {delivered} destination(s)");
        }
    }
}

/// Run one tick: sample `clock`, then evaluate the whole graph.
pub fn tick(rt: &mut GraphRuntime, graph: &mut Graph, clock: &dyn Clock) {
    rt.t = clock.now();
    evaluate_all(rt, graph);
}
