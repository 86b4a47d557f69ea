use gridtrace_core::NetworkError;
use gridtrace_traversal::StepContext;

use super::{NetworkTrace, QueueMode, TraceResult};
use crate::model::FeederDirection;
use crate::state::FeederDirectionStateOperations;
use crate::step::NetworkTraceStep;

impl NetworkTrace {
    /// Assign feeder directions outward from a feeder head terminal.
    ///
    /// Terminals a step leaves through get `DOWNSTREAM`; terminals a step
    /// enters through get `UPSTREAM`. Every fan-out becomes its own branch,
    /// so each side of a loop is walked separately and loop terminals end up
    /// with `BOTH`, while the radial path to the head keeps one direction.
    pub fn assign_feeder_directions(
        &self,
        mrid: &str,
        sequence_number: usize,
    ) -> Result<TraceResult, NetworkError> {
        let head = self.model.terminal(mrid, sequence_number)?;
        let start = self
            .start_at(head)
            .ok_or_else(|| NetworkError::UnknownTerminal {
                mrid: mrid.to_string(),
                sequence_number,
            })?;

        let state = self.state.clone();
        let mut traversal = self.traversal(QueueMode::Branching);
        traversal
            .add_step_action(move |step: &NetworkTraceStep, _: &StepContext| {
                let direction = if step.traced_internally {
                    FeederDirection::DOWNSTREAM
                } else {
                    FeederDirection::UPSTREAM
                };
                state.add_direction(step.to_terminal, direction);
            })
            .add_start_item(start);

        let result = self.collect(traversal)?;
        tracing::debug!(
            head = mrid,
            terminals = result.terminals.len(),
            branches = result.branches_run,
            "Feeder directions assigned"
        );
        Ok(result)
    }
}
