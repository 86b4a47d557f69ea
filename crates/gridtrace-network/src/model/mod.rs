//! The electrical network model.

mod direction;
mod equipment;
mod network;
mod phase;

pub use direction::FeederDirection;
pub use equipment::{
    Equipment, EquipmentDef, EquipmentId, EquipmentKind, EquipmentType, Terminal, TerminalId,
};
pub use network::{Connection, NetworkModel};
pub use phase::SinglePhaseKind;
