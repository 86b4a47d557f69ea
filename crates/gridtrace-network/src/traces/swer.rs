use std::collections::BTreeSet;
use std::rc::Rc;

use gridtrace_core::NetworkError;
use gridtrace_traversal::{StepContext, Traversal};

use super::{NetworkTrace, QueueMode};
use crate::model::{EquipmentType, NetworkModel, TerminalId};
use crate::step::NetworkTraceStep;

impl NetworkTrace {
    /// Equipment on the single-wire earth return side of transformers that
    /// have a SWER terminal, plus the low voltage network those transformers
    /// feed. Each side is traced up to the next transformer.
    pub fn find_swer_equipment(&self) -> Result<BTreeSet<String>, NetworkError> {
        let mut found = BTreeSet::new();

        for transformer in self
            .model
            .all_equipment()
            .filter(|e| e.equipment_type() == EquipmentType::PowerTransformer)
        {
            let (swer, other): (Vec<TerminalId>, Vec<TerminalId>) =
                transformer.terminals.iter().copied().partition(|&terminal| {
                    self.model
                        .terminal_at(terminal)
                        .is_some_and(|t| t.is_swer())
                });
            if swer.is_empty() {
                continue;
            }
            found.insert(transformer.mrid.clone());

            let mut swer_side = self.bounded_by_transformers();
            swer_side.add_start_items(
                swer.iter()
                    .map(|&terminal| NetworkTraceStep::start_at(terminal, transformer.id)),
            );
            found.extend(self.collect(swer_side)?.equipment);

            let mut lv_side = self.bounded_by_transformers();
            let model = Rc::clone(&self.model);
            lv_side
                .add_queue_condition(
                    move |next: &NetworkTraceStep, _: &StepContext, _: &NetworkTraceStep, _: &StepContext| {
                        is_low_voltage_or_transformer(&model, next)
                    },
                )
                .add_start_items(
                    other
                        .iter()
                        .map(|&terminal| NetworkTraceStep::start_at(terminal, transformer.id)),
                );
            found.extend(self.collect(lv_side)?.equipment);
        }

        tracing::debug!(equipment = found.len(), "SWER equipment search finished");
        Ok(found)
    }

    fn bounded_by_transformers(&self) -> Traversal<NetworkTraceStep> {
        let model = Rc::clone(&self.model);
        let mut traversal = self.traversal(QueueMode::Straight);
        traversal.add_stop_condition(move |step: &NetworkTraceStep, _: &StepContext| {
            step.traced_externally()
                && model
                    .equipment_at(step.to_equipment)
                    .is_some_and(|e| e.equipment_type() == EquipmentType::PowerTransformer)
        });
        traversal
    }
}

fn is_low_voltage_or_transformer(model: &NetworkModel, step: &NetworkTraceStep) -> bool {
    model.equipment_at(step.to_equipment).is_some_and(|e| {
        e.is_low_voltage() || e.equipment_type() == EquipmentType::PowerTransformer
    })
}
