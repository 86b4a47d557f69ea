//! Stop at open switches.

use std::rc::Rc;

use gridtrace_traversal::{StepContext, StopCondition};

use crate::model::SinglePhaseKind;
use crate::state::OpenStateOperations;
use crate::step::NetworkTraceStep;

/// Stops on equipment that is open for the traced phase, or for any phase
/// when no phase is given.
pub struct OpenCondition {
    state: Rc<dyn OpenStateOperations>,
    phase: Option<SinglePhaseKind>,
}

impl OpenCondition {
    pub fn new(state: Rc<dyn OpenStateOperations>, phase: Option<SinglePhaseKind>) -> Self {
        Self { state, phase }
    }
}

impl StopCondition<NetworkTraceStep> for OpenCondition {
    fn should_stop(&self, item: &NetworkTraceStep, _context: &StepContext) -> bool {
        self.state.is_open(item.to_equipment, self.phase)
    }
}

pub fn stop_at_open(
    state: Rc<dyn OpenStateOperations>,
    phase: Option<SinglePhaseKind>,
) -> OpenCondition {
    OpenCondition::new(state, phase)
}
