//! Debug instrumentation: runtime toggles and tree snapshots.

pub mod inspect;
pub mod runtime;

pub use inspect::node_snapshot;
pub use inspect::snapshot_json;
pub use inspect::NodeSnapshot;
pub use inspect::PrintOptions;
pub use runtime::runtime_toggles;
pub use runtime::RuntimeToggles;
