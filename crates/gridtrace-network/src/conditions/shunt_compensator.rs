use std::rc::Rc;

use gridtrace_traversal::{QueueCondition, StepContext};

use crate::model::{EquipmentKind, NetworkModel};
use crate::step::NetworkTraceStep;

/// Keeps traces out of the grounding terminal of shunt compensators.
pub struct ShuntCompensatorCondition {
    model: Rc<NetworkModel>,
}

impl ShuntCompensatorCondition {
    pub fn new(model: Rc<NetworkModel>) -> Self {
        Self { model }
    }

    fn is_grounding_terminal(&self, step: &NetworkTraceStep) -> bool {
        let Some(equipment) = self.model.equipment_at(step.to_equipment) else {
            return false;
        };
        let EquipmentKind::ShuntCompensator {
            grounding_terminal: Some(sequence_number),
        } = &equipment.kind
        else {
            return false;
        };
        equipment
            .terminal(*sequence_number)
            .is_some_and(|grounding| grounding == step.from_terminal || grounding == step.to_terminal)
    }
}

impl QueueCondition<NetworkTraceStep> for ShuntCompensatorCondition {
    fn should_queue(
        &self,
        next_item: &NetworkTraceStep,
        _next_context: &StepContext,
        _current_item: &NetworkTraceStep,
        _current_context: &StepContext,
    ) -> bool {
        next_item.traced_externally() || !self.is_grounding_terminal(next_item)
    }
}
