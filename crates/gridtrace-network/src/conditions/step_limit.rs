//! Stop after a number of equipment steps.
//!
//! Both conditions carry their own counter as a context value: an external
//! hop onto a new equipment increments it, an internal hop keeps it.

use std::rc::Rc;

use gridtrace_core::constants::{EQUIPMENT_STEP_COUNT_KEY, EQUIPMENT_TYPE_STEP_COUNT_PREFIX};
use gridtrace_traversal::{ContextValueComputer, DynContextValueComputer, StepContext, StopCondition};

use crate::model::{EquipmentType, NetworkModel};
use crate::step::NetworkTraceStep;

/// Stops once `limit` equipment have been stepped onto since the start.
#[derive(Debug, Clone)]
pub struct EquipmentStepLimitCondition {
    limit: u32,
}

impl EquipmentStepLimitCondition {
    pub fn new(limit: u32) -> Self {
        Self { limit }
    }
}

impl ContextValueComputer<NetworkTraceStep> for EquipmentStepLimitCondition {
    type Value = u32;

    fn key(&self) -> &str {
        EQUIPMENT_STEP_COUNT_KEY
    }

    fn compute_initial(&self, _item: &NetworkTraceStep) -> u32 {
        0
    }

    fn compute_next(&self, next_item: &NetworkTraceStep, current_value: &u32) -> u32 {
        if next_item.traced_internally {
            *current_value
        } else {
            current_value + 1
        }
    }
}

impl StopCondition<NetworkTraceStep> for EquipmentStepLimitCondition {
    fn should_stop(&self, _item: &NetworkTraceStep, context: &StepContext) -> bool {
        context.value(self).is_some_and(|steps| *steps >= self.limit)
    }

    fn context_computer(&self) -> Option<&dyn DynContextValueComputer<NetworkTraceStep>> {
        Some(self)
    }
}

/// Stops once `limit` equipment of one type have been stepped onto.
pub struct EquipmentTypeStepLimitCondition {
    limit: u32,
    equipment_type: EquipmentType,
    key: String,
    model: Rc<NetworkModel>,
}

impl EquipmentTypeStepLimitCondition {
    pub fn new(limit: u32, equipment_type: EquipmentType, model: Rc<NetworkModel>) -> Self {
        Self {
            limit,
            equipment_type,
            key: format!("{EQUIPMENT_TYPE_STEP_COUNT_PREFIX}{equipment_type}"),
            model,
        }
    }

    fn matches_type(&self, step: &NetworkTraceStep) -> bool {
        self.model
            .equipment_at(step.to_equipment)
            .is_some_and(|equipment| equipment.equipment_type() == self.equipment_type)
    }
}

impl ContextValueComputer<NetworkTraceStep> for EquipmentTypeStepLimitCondition {
    type Value = u32;

    fn key(&self) -> &str {
        &self.key
    }

    fn compute_initial(&self, _item: &NetworkTraceStep) -> u32 {
        0
    }

    fn compute_next(&self, next_item: &NetworkTraceStep, current_value: &u32) -> u32 {
        if next_item.traced_externally() && self.matches_type(next_item) {
            current_value + 1
        } else {
            *current_value
        }
    }
}

impl StopCondition<NetworkTraceStep> for EquipmentTypeStepLimitCondition {
    fn should_stop(&self, _item: &NetworkTraceStep, context: &StepContext) -> bool {
        context.value(self).is_some_and(|steps| *steps >= self.limit)
    }

    fn context_computer(&self) -> Option<&dyn DynContextValueComputer<NetworkTraceStep>> {
        Some(self)
    }
}
