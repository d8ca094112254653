//! Runtime options for the engine host.

/// Engine runtime configuration. Policy lives in `ProtocolConfig`; this only
/// controls how the engine behaves as a process.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Audit events retained in memory before the oldest are dropped.
    pub max_events: usize,
    /// Print every event as it is emitted.
    pub verbose: bool,
}

impl EngineConfig {
    pub fn with_verbose() -> Self {
        Self {
            verbose: true,
            ..Self::default()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_events: 100_000,
            verbose: false,
        }
    }
}
