use std::rc::Rc;

use gridtrace_traversal::{Queuer, StepContext};

use crate::model::NetworkModel;
use crate::step::NetworkTraceStep;

/// How candidates are handed to the traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueMode {
    /// Every candidate is queued on the current traversal.
    Straight,
    /// Where a step fans out to more than one candidate, each becomes its
    /// own branch.
    Branching,
}

/// Neighbour lookup for network traces: alternates internal and external
/// hops through `model`.
pub fn queue_next(
    model: Rc<NetworkModel>,
    mode: QueueMode,
) -> impl Fn(&NetworkTraceStep, &StepContext, &mut Queuer<'_, NetworkTraceStep>) + 'static {
    move |step, _context, queuer| {
        let next = model.next_steps(step);
        let branching = mode == QueueMode::Branching && next.len() > 1;
        for candidate in next {
            if branching {
                queuer.queue_branch(candidate);
            } else {
                queuer.queue_item(candidate);
            }
        }
    }
}
