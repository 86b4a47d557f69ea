use std::collections::BTreeSet;

use gridtrace_core::NetworkError;

use super::NetworkTrace;
use crate::model::{EquipmentKind, FeederDirection};

impl NetworkTrace {
    /// Usage points of every energy consumer downstream of terminal
    /// `sequence_number` of `mrid`.
    pub fn find_usage_points(
        &self,
        mrid: &str,
        sequence_number: usize,
    ) -> Result<BTreeSet<String>, NetworkError> {
        let trace = self.directed_trace(mrid, sequence_number, FeederDirection::DOWNSTREAM)?;

        let mut usage_points = BTreeSet::new();
        for visited in &trace.equipment {
            if let EquipmentKind::EnergyConsumer { usage_points: points } =
                &self.model.equipment(visited)?.kind
            {
                usage_points.extend(points.iter().cloned());
            }
        }
        tracing::debug!(
            mrid,
            usage_points = usage_points.len(),
            "Usage point search finished"
        );
        Ok(usage_points)
    }
}
