//! State carried by the evaluator between ticks.

use matgraph_api_core::WriteBatch;

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct GraphRuntime {
    /// Time fed to time source nodes on the current tick.
    pub t: f32,
    /// Number of ticks started so far.
    pub epoch: u64,
    /// Material writes collected during the most recent tick, in emission order.
    pub writes: WriteBatch,
    pub config: Config,
}

impl Default for GraphRuntime {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

impl GraphRuntime {
    pub fn with_config(config: Config) -> Self {
        Self {
            t: 0.0,
            epoch: 0,
            writes: WriteBatch::with_capacity(config.writes_capacity),
            config,
        }
    }

    /// Start a new tick: bump the epoch and drop the previous tick's writes.
    pub fn begin_tick(&mut self) {
        self.epoch += 1;
        self.writes.clear();
    }

    /// Take the writes collected so far, leaving an empty batch behind.
    pub fn take_writes(&mut self) -> WriteBatch {
        std::mem::replace(
            &mut self.writes,
            WriteBatch::with_capacity(self.config.writes_capacity),
        )
    }
}
