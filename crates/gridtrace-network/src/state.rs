//! Switch and feeder direction state, kept apart from the static model.
//!
//! Conditions consult state through the two accessor traits, so callers can
//! supply their own storage. [`NetworkState`] is the in-memory default; it
//! uses interior mutability because step actions only get `&self`.

use std::cell::RefCell;

use gridtrace_core::types::collections::{FxHashMap, PhaseVec};

use crate::model::{EquipmentId, FeederDirection, SinglePhaseKind, TerminalId};

/// Open/closed state of switching equipment.
pub trait OpenStateOperations {
    /// True if `phase` of `equipment` is open. With `None`, true if any
    /// phase is open.
    fn is_open(&self, equipment: EquipmentId, phase: Option<SinglePhaseKind>) -> bool;

    fn set_open(&self, equipment: EquipmentId, phase: SinglePhaseKind, open: bool);
}

/// Feeder direction of each terminal.
pub trait FeederDirectionStateOperations {
    fn get_direction(&self, terminal: TerminalId) -> FeederDirection;

    /// Replace the direction. Returns false if it was already `direction`.
    fn set_direction(&self, terminal: TerminalId, direction: FeederDirection) -> bool;

    /// Add `direction` to the existing one. Returns false if nothing changed.
    fn add_direction(&self, terminal: TerminalId, direction: FeederDirection) -> bool;
}

#[derive(Debug, Default)]
pub struct NetworkState {
    open_phases: RefCell<FxHashMap<EquipmentId, PhaseVec<SinglePhaseKind>>>,
    directions: RefCell<FxHashMap<TerminalId, FeederDirection>>,
}

impl NetworkState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open or close every phase in `phases`.
    pub fn set_open_phases(&self, equipment: EquipmentId, phases: &[SinglePhaseKind], open: bool) {
        for &phase in phases {
            self.set_open(equipment, phase, open);
        }
    }

    pub fn clear_directions(&self) {
        self.directions.borrow_mut().clear();
    }

    /// Terminals with a direction other than `NONE`.
    pub fn directed_terminal_count(&self) -> usize {
        self.directions
            .borrow()
            .values()
            .filter(|direction| !direction.is_none())
            .count()
    }
}

impl OpenStateOperations for NetworkState {
    fn is_open(&self, equipment: EquipmentId, phase: Option<SinglePhaseKind>) -> bool {
        let open_phases = self.open_phases.borrow();
        let Some(open) = open_phases.get(&equipment) else {
            return false;
        };
        match phase {
            Some(phase) => open.contains(&phase),
            None => !open.is_empty(),
        }
    }

    fn set_open(&self, equipment: EquipmentId, phase: SinglePhaseKind, open: bool) {
        let mut open_phases = self.open_phases.borrow_mut();
        let phases = open_phases.entry(equipment).or_default();
        let present = phases.contains(&phase);
        if open && !present {
            phases.push(phase);
        } else if !open && present {
            phases.retain(|p| *p != phase);
        }
    }
}

impl FeederDirectionStateOperations for NetworkState {
    fn get_direction(&self, terminal: TerminalId) -> FeederDirection {
        self.directions
            .borrow()
            .get(&terminal)
            .copied()
            .unwrap_or_default()
    }

    fn set_direction(&self, terminal: TerminalId, direction: FeederDirection) -> bool {
        let previous = self.directions.borrow_mut().insert(terminal, direction);
        previous.unwrap_or_default() != direction
    }

    fn add_direction(&self, terminal: TerminalId, direction: FeederDirection) -> bool {
        let mut directions = self.directions.borrow_mut();
        let current = directions.entry(terminal).or_default();
        if current.contains(direction) {
            return false;
        }
        *current |= direction;
        true
    }
}
