//! Equipment, terminals and equipment kinds.

use std::fmt;

use petgraph::stable_graph::NodeIndex;
use serde::{Deserialize, Serialize};

use gridtrace_core::types::collections::{PhaseVec, TerminalVec};

use super::SinglePhaseKind;

/// Graph index of a terminal.
pub type TerminalId = NodeIndex;

/// Index of an equipment in its [`NetworkModel`](super::NetworkModel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EquipmentId(pub(crate) u32);

impl EquipmentId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a piece of equipment is, with the data the prebuilt traces need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentKind {
    Conductor,
    Switch,
    PowerTransformer,
    /// `grounding_terminal` is the sequence number of the terminal bonded
    /// to earth.
    ShuntCompensator { grounding_terminal: Option<usize> },
    EnergyConsumer { usage_points: Vec<String> },
    Junction,
    Clamp,
    Cut,
    EnergySource,
}

impl EquipmentKind {
    pub fn equipment_type(&self) -> EquipmentType {
        match self {
            Self::Conductor => EquipmentType::Conductor,
            Self::Switch => EquipmentType::Switch,
            Self::PowerTransformer => EquipmentType::PowerTransformer,
            Self::ShuntCompensator { .. } => EquipmentType::ShuntCompensator,
            Self::EnergyConsumer { .. } => EquipmentType::EnergyConsumer,
            Self::Junction => EquipmentType::Junction,
            Self::Clamp => EquipmentType::Clamp,
            Self::Cut => EquipmentType::Cut,
            Self::EnergySource => EquipmentType::EnergySource,
        }
    }
}

/// Fieldless equipment classification, used for per-type step counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentType {
    Conductor,
    Switch,
    PowerTransformer,
    ShuntCompensator,
    EnergyConsumer,
    Junction,
    Clamp,
    Cut,
    EnergySource,
}

impl EquipmentType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Conductor => "conductor",
            Self::Switch => "switch",
            Self::PowerTransformer => "power_transformer",
            Self::ShuntCompensator => "shunt_compensator",
            Self::EnergyConsumer => "energy_consumer",
            Self::Junction => "junction",
            Self::Clamp => "clamp",
            Self::Cut => "cut",
            Self::EnergySource => "energy_source",
        }
    }

    /// Equipment that sits part way along a conductor.
    pub fn is_mid_line(self) -> bool {
        matches!(self, Self::Clamp | Self::Cut)
    }
}

impl fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A terminal: one connection point of an equipment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminal {
    pub equipment: EquipmentId,
    /// 1-based position on the equipment.
    pub sequence_number: usize,
    pub phases: PhaseVec<SinglePhaseKind>,
    pub connectivity_node: Option<String>,
}

impl Terminal {
    /// Single-wire earth return: exactly one non-neutral phase.
    pub fn is_swer(&self) -> bool {
        self.phases.iter().filter(|p| !p.is_neutral()).count() == 1
    }
}

/// A piece of network equipment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equipment {
    pub id: EquipmentId,
    pub mrid: String,
    pub name: String,
    pub kind: EquipmentKind,
    /// Nominal voltage in volts, when known.
    pub nominal_voltage: Option<u32>,
    pub terminals: TerminalVec<TerminalId>,
}

impl Equipment {
    pub fn equipment_type(&self) -> EquipmentType {
        self.kind.equipment_type()
    }

    /// Terminal with the given 1-based sequence number.
    pub fn terminal(&self, sequence_number: usize) -> Option<TerminalId> {
        let index = sequence_number.checked_sub(1)?;
        self.terminals.get(index).copied()
    }

    /// Low voltage: known to be below 1 kV.
    pub fn is_low_voltage(&self) -> bool {
        self.nominal_voltage.is_some_and(|v| v < 1_000)
    }
}

/// Description of an equipment to add to a model.
#[derive(Debug, Clone)]
pub struct EquipmentDef {
    pub mrid: String,
    pub name: String,
    pub kind: EquipmentKind,
    pub nominal_voltage: Option<u32>,
    pub terminal_phases: Vec<PhaseVec<SinglePhaseKind>>,
}

impl EquipmentDef {
    pub fn new(mrid: impl Into<String>, kind: EquipmentKind) -> Self {
        let mrid = mrid.into();
        Self {
            name: mrid.clone(),
            mrid,
            kind,
            nominal_voltage: None,
            terminal_phases: Vec::new(),
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn nominal_voltage(mut self, volts: u32) -> Self {
        self.nominal_voltage = Some(volts);
        self
    }

    /// Append a terminal carrying `phases`.
    pub fn terminal(mut self, phases: &[SinglePhaseKind]) -> Self {
        self.terminal_phases.push(phases.iter().copied().collect());
        self
    }

    /// Append `count` terminals carrying `phases`.
    pub fn terminals(mut self, count: usize, phases: &[SinglePhaseKind]) -> Self {
        for _ in 0..count {
            self.terminal_phases.push(phases.iter().copied().collect());
        }
        self
    }
}
