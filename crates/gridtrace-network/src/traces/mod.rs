//! Prebuilt network traces.
//!
//! Every trace is a [`Traversal`] over [`NetworkTraceStep`]s with the same
//! baseline policies: stop at open equipment, stay out of shunt compensator
//! grounding terminals, and the optional equipment step limit from
//! [`TraversalSettings`].

mod connected;
mod directed;
mod feeder_direction;
mod queue_next;
mod swer;
mod usage_points;

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use gridtrace_core::config::TraversalSettings;
use gridtrace_core::NetworkError;
use gridtrace_traversal::{QueueType, StepContext, Traversal, TraversalStats};

use crate::conditions::{stop_at_open, EquipmentStepLimitCondition, ShuntCompensatorCondition};
use crate::model::{NetworkModel, SinglePhaseKind, TerminalId};
use crate::state::NetworkState;
use crate::step::NetworkTraceStep;

pub use queue_next::{queue_next, QueueMode};

/// What a trace reached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceResult {
    /// mRIDs of every equipment stepped onto.
    pub equipment: BTreeSet<String>,
    /// `mrid-T<n>` labels of every terminal stepped onto.
    pub terminals: BTreeSet<String>,
    pub items_visited: usize,
    pub branches_run: usize,
}

impl TraceResult {
    fn with_stats(mut self, stats: TraversalStats) -> Self {
        self.items_visited = stats.items_visited;
        self.branches_run = stats.branches_run;
        self
    }
}

/// Entry point for the prebuilt traces over one model and its state.
#[derive(Debug, Clone)]
pub struct NetworkTrace {
    model: Rc<NetworkModel>,
    state: Rc<NetworkState>,
    settings: TraversalSettings,
    phase: Option<SinglePhaseKind>,
}

impl NetworkTrace {
    pub fn new(model: Rc<NetworkModel>, state: Rc<NetworkState>, settings: TraversalSettings) -> Self {
        Self {
            model,
            state,
            settings,
            phase: None,
        }
    }

    /// Only treat equipment as open when `phase` is open.
    pub fn with_phase(mut self, phase: SinglePhaseKind) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn model(&self) -> &NetworkModel {
        &self.model
    }

    pub fn state(&self) -> &NetworkState {
        &self.state
    }

    /// A traversal with the baseline policies installed.
    pub fn traversal(&self, mode: QueueMode) -> Traversal<NetworkTraceStep> {
        let queue_type = QueueType::from(self.settings.effective_queue());
        let mut traversal = Traversal::new(queue_type, queue_next(Rc::clone(&self.model), mode));
        traversal
            .add_stop_condition(stop_at_open(self.state.clone(), self.phase))
            .add_queue_condition(ShuntCompensatorCondition::new(Rc::clone(&self.model)));
        if let Some(limit) = self.settings.max_equipment_steps {
            traversal.add_stop_condition(EquipmentStepLimitCondition::new(limit));
        }
        traversal
    }

    /// Run `traversal`, collecting every step it visits.
    pub fn collect(
        &self,
        mut traversal: Traversal<NetworkTraceStep>,
    ) -> Result<TraceResult, NetworkError> {
        let collected = Rc::new(RefCell::new(TraceResult::default()));
        let sink = Rc::clone(&collected);
        let model = Rc::clone(&self.model);
        traversal.add_step_action(move |step: &NetworkTraceStep, _: &StepContext| {
            let mut result = sink.borrow_mut();
            if let Some(equipment) = model.equipment_at(step.to_equipment) {
                result.equipment.insert(equipment.mrid.clone());
            }
            if let Some(label) = model.terminal_label(step.to_terminal) {
                result.terminals.insert(label);
            }
        });

        let stats = traversal.run(self.settings.effective_can_stop_on_start_item())?;
        drop(traversal);
        let result = match Rc::try_unwrap(collected) {
            Ok(cell) => cell.into_inner(),
            Err(shared) => shared.take(),
        };
        Ok(result.with_stats(stats))
    }

    fn start_at(&self, terminal: TerminalId) -> Option<NetworkTraceStep> {
        let equipment = self.model.terminal_at(terminal)?.equipment;
        Some(NetworkTraceStep::start_at(terminal, equipment))
    }
}
