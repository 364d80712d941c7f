//! Evaluation configuration.

use serde::{Deserialize, Serialize};

/// Order in which a tick visits nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schedule {
    /// Time sources first, then every other node in arena (document) order. A node may read a
    /// value its producer wrote on the previous tick if the producer comes later in the arena.
    #[default]
    TimeFirst,
    /// Time sources first, then dependency order. Nodes caught in a cycle run last, in arena
    /// order.
    Topological,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub schedule: Schedule,
    /// Initial capacity hint for the per-tick write batch.
    pub writes_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schedule: Schedule::TimeFirst,
            writes_capacity: 64,
        }
    }
}
