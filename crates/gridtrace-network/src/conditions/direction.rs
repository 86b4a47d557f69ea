//! Queue only the steps that move in a requested feeder direction.

use std::rc::Rc;

use gridtrace_traversal::{QueueCondition, StepContext};

use crate::model::{FeederDirection, NetworkModel};
use crate::state::FeederDirectionStateOperations;
use crate::step::NetworkTraceStep;

/// Refuses steps that do not head in `direction`.
///
/// Leaving an equipment (internal hop) checks the exit terminal carries
/// `direction`. Entering one (external hop) checks the entry terminal carries
/// the opposite direction, since the terminal faces back the way we came.
/// Cuts and clamps sit part way along a conductor and often see flow from
/// both sides, so an internal hop through one is judged by its entry
/// terminal instead of its exit.
pub struct DirectionCondition {
    direction: FeederDirection,
    model: Rc<NetworkModel>,
    state: Rc<dyn FeederDirectionStateOperations>,
}

impl DirectionCondition {
    pub fn new(
        direction: FeederDirection,
        model: Rc<NetworkModel>,
        state: Rc<dyn FeederDirectionStateOperations>,
    ) -> Self {
        Self {
            direction,
            model,
            state,
        }
    }

    pub fn direction(&self) -> FeederDirection {
        self.direction
    }

    fn through_mid_line(&self, step: &NetworkTraceStep) -> bool {
        step.traced_internally
            && self
                .model
                .equipment_at(step.to_equipment)
                .is_some_and(|equipment| equipment.equipment_type().is_mid_line())
    }

    fn heads_in_direction(&self, step: &NetworkTraceStep) -> bool {
        let (terminal, required) = if self.through_mid_line(step) {
            (step.from_terminal, self.direction.complement())
        } else if step.traced_internally {
            (step.to_terminal, self.direction)
        } else {
            (step.to_terminal, self.direction.complement())
        };
        self.state.get_direction(terminal).intersects(required)
    }
}

impl QueueCondition<NetworkTraceStep> for DirectionCondition {
    fn should_queue(
        &self,
        next_item: &NetworkTraceStep,
        _next_context: &StepContext,
        _current_item: &NetworkTraceStep,
        _current_context: &StepContext,
    ) -> bool {
        match self.direction {
            FeederDirection::BOTH => true,
            FeederDirection::NONE => self.state.get_direction(next_item.to_terminal).is_none(),
            _ => self.heads_in_direction(next_item),
        }
    }
}
