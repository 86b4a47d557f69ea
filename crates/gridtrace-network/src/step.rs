//! The item a network trace steps through.

use std::hash::{Hash, Hasher};

use crate::model::{EquipmentId, TerminalId};

/// One hop between two terminals.
///
/// An internal hop stays inside one equipment and leaves it through
/// `to_terminal`. An external hop crosses a connectivity node and enters
/// `to_equipment` through `to_terminal`. The next hop after an internal one
/// is always external, and the reverse.
///
/// Steps compare and hash by `to_terminal` alone, so a trace reaches each
/// terminal at most once per lineage.
#[derive(Debug, Clone, Copy)]
pub struct NetworkTraceStep {
    pub from_terminal: TerminalId,
    pub to_terminal: TerminalId,
    pub from_equipment: EquipmentId,
    pub to_equipment: EquipmentId,
    pub traced_internally: bool,
}

impl NetworkTraceStep {
    /// Start leaving `equipment` through `terminal`. The first hop is external.
    pub fn start_at(terminal: TerminalId, equipment: EquipmentId) -> Self {
        Self {
            from_terminal: terminal,
            to_terminal: terminal,
            from_equipment: equipment,
            to_equipment: equipment,
            traced_internally: true,
        }
    }

    /// Start entering `equipment` through `terminal`. The first hop is internal.
    pub fn start_into(terminal: TerminalId, equipment: EquipmentId) -> Self {
        Self {
            traced_internally: false,
            ..Self::start_at(terminal, equipment)
        }
    }

    pub fn traced_externally(&self) -> bool {
        !self.traced_internally
    }

    pub fn is_start(&self) -> bool {
        self.from_terminal == self.to_terminal
    }
}

impl PartialEq for NetworkTraceStep {
    fn eq(&self, other: &Self) -> bool {
        self.to_terminal == other.to_terminal
    }
}

impl Eq for NetworkTraceStep {}

impl Hash for NetworkTraceStep {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_terminal.hash(state);
    }
}
