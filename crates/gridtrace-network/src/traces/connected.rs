use gridtrace_core::NetworkError;

use super::{NetworkTrace, QueueMode, TraceResult};
use crate::step::NetworkTraceStep;

impl NetworkTrace {
    /// Every equipment reachable from `mrid` through any of its terminals.
    /// Open equipment is included but not traced through.
    pub fn connected_equipment(&self, mrid: &str) -> Result<TraceResult, NetworkError> {
        let equipment = self.model.equipment(mrid)?;
        let mut traversal = self.traversal(QueueMode::Straight);
        traversal.add_start_items(
            equipment
                .terminals
                .iter()
                .map(|&terminal| NetworkTraceStep::start_at(terminal, equipment.id)),
        );

        let mut result = self.collect(traversal)?;
        result.equipment.insert(equipment.mrid.clone());
        tracing::debug!(
            mrid,
            equipment = result.equipment.len(),
            terminals = result.terminals.len(),
            "Connected equipment trace finished"
        );
        Ok(result)
    }
}
