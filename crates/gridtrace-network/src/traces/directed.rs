use std::rc::Rc;

use gridtrace_core::NetworkError;

use super::{NetworkTrace, QueueMode, TraceResult};
use crate::conditions::DirectionCondition;
use crate::model::FeederDirection;

impl NetworkTrace {
    /// Trace from terminal `sequence_number` of `mrid`, only following steps
    /// that head in `direction`. Feeder directions must already be assigned.
    pub fn directed_trace(
        &self,
        mrid: &str,
        sequence_number: usize,
        direction: FeederDirection,
    ) -> Result<TraceResult, NetworkError> {
        let terminal = self.model.terminal(mrid, sequence_number)?;
        let start = self
            .start_at(terminal)
            .ok_or_else(|| NetworkError::UnknownTerminal {
                mrid: mrid.to_string(),
                sequence_number,
            })?;

        let mut traversal = self.traversal(QueueMode::Straight);
        traversal
            .add_queue_condition(self.direction_condition(direction))
            .add_start_item(start);

        let result = self.collect(traversal)?;
        tracing::debug!(
            mrid,
            %direction,
            equipment = result.equipment.len(),
            "Directed trace finished"
        );
        Ok(result)
    }

    pub fn direction_condition(&self, direction: FeederDirection) -> DirectionCondition {
        DirectionCondition::new(direction, Rc::clone(&self.model), self.state.clone())
    }
}
