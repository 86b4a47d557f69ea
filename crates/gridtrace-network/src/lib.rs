//! # gridtrace-network
//!
//! Electrical network tracing on top of `gridtrace-traversal`: a terminal
//! graph model, switch and feeder direction state, network conditions, and
//! prebuilt traces for connectivity, directed tracing, feeder direction
//! assignment, usage point discovery and SWER detection.

pub mod conditions;
pub mod model;
pub mod state;
pub mod step;
pub mod traces;

pub use conditions::{
    stop_at_open, DirectionCondition, EquipmentStepLimitCondition,
    EquipmentTypeStepLimitCondition, OpenCondition, ShuntCompensatorCondition,
};
pub use model::{
    Connection, Equipment, EquipmentDef, EquipmentId, EquipmentKind, EquipmentType,
    FeederDirection, NetworkModel, SinglePhaseKind, Terminal, TerminalId,
};
pub use state::{FeederDirectionStateOperations, NetworkState, OpenStateOperations};
pub use step::NetworkTraceStep;
pub use traces::{queue_next, NetworkTrace, QueueMode, TraceResult};
