//! Host-facing driver that owns a document, its live graph and the tick runtime.

use log::debug;
use matgraph_api_core::{Clock, PropertySink, ResourceCatalog, WriteBatch};

use crate::config::Config;
use crate::document::GraphDocument;
use crate::error::DocumentError;
use crate::eval::{tick, GraphRuntime};
use crate::graph::Graph;
use crate::loader::{load_graph, LoadReport};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GraphState {
    /// No live graph. `update` does nothing.
    #[default]
    Unloaded,
    /// Graph built, not ticked yet.
    Loaded,
    Running,
}

/// Lifecycle wrapper a host component embeds: `start` once, `update` every frame,
/// `teardown` when the component goes away.
#[derive(Debug, Default)]
pub struct GraphExecutor {
    document: Option<GraphDocument>,
    graph: Option<Graph>,
    runtime: GraphRuntime,
    report: LoadReport,
    state: GraphState,
}

impl GraphExecutor {
    pub fn new(document: Option<GraphDocument>) -> Self {
        Self {
            document,
            ..Default::default()
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.runtime = GraphRuntime::with_config(config);
        self
    }

    /// Replace the document. Takes effect on the next [`start`](Self::start).
    pub fn set_document(&mut self, document: Option<GraphDocument>) {
        self.document = document;
    }

    pub fn set_document_json(&mut self, json: &str) -> Result<(), DocumentError> {
        self.document = Some(GraphDocument::from_json(json)?);
        Ok(())
    }

    /// Build the live graph from the current document. Without a document the executor stays
    /// unloaded. Calling `start` again rebuilds from scratch.
    pub fn start(&mut self, catalog: &dyn ResourceCatalog) -> GraphState {
        let Some(document) = self.document.as_ref() else {
            debug!("no graph document assigned; executor stays idle");
            self.teardown();
            return self.state;
        };
        let (graph, report) = load_graph(document, catalog);
        debug!(
            "graph started: {} node(s), {} connection(s)",
            graph.len(),
            graph.connections().len()
        );
        self.graph = Some(graph);
        self.report = report;
        self.runtime = GraphRuntime::with_config(self.runtime.config.clone());
        self.state = GraphState::Loaded;
        self.state
    }

    /// Run one tick and apply its material writes to `sink` in emission order.
    ///
    /// Returns the applied batch, or `None` when no graph is loaded.
    pub fn update(&mut self, clock: &dyn Clock, sink: &mut dyn PropertySink) -> Option<&WriteBatch> {
        let graph = self.graph.as_mut()?;
        tick(&mut self.runtime, graph, clock);
        self.runtime.writes.apply(sink);
        self.state = GraphState::Running;
        Some(&self.runtime.writes)
    }

    /// Discard the live graph. The document is kept, so `start` can rebuild it.
    pub fn teardown(&mut self) {
        if self.graph.take().is_some() {
            debug!("graph torn down after {} tick(s)", self.runtime.epoch);
        }
        self.runtime.writes.clear();
        self.report = LoadReport::default();
        self.state = GraphState::Unloaded;
    }

    pub fn state(&self) -> GraphState {
        self.state
    }

    pub fn document(&self) -> Option<&GraphDocument> {
        self.document.as_ref()
    }

    pub fn graph(&self) -> Option<&Graph> {
        self.graph.as_ref()
    }

    pub fn graph_mut(&mut self) -> Option<&mut Graph> {
        self.graph.as_mut()
    }

    pub fn runtime(&self) -> &GraphRuntime {
        &self.runtime
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }
}
