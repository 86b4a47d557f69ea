//! Registered policies of a traversal and the computer registry they feed.

use std::any::Any;
use std::rc::Rc;

use gridtrace_core::types::collections::{FxHashMap, SmallVec};
use gridtrace_core::TraversalError;

use crate::actions::{BranchStartAction, StepAction};
use crate::computer::DynContextValueComputer;
use crate::conditions::{QueueCondition, StopCondition};
use crate::context::StepContext;

/// Where a registered computer came from. Clearing a policy category drops
/// the computers that category contributed.
pub(crate) enum ComputerSource<T> {
    Standalone(Rc<dyn DynContextValueComputer<T>>),
    Stop(Rc<dyn StopCondition<T>>),
    Queue(Rc<dyn QueueCondition<T>>),
    Step(Rc<dyn StepAction<T>>),
    BranchStart(Rc<dyn BranchStartAction<T>>),
}

impl<T> ComputerSource<T> {
    pub(crate) fn computer(&self) -> Option<&dyn DynContextValueComputer<T>> {
        match self {
            Self::Standalone(computer) => Some(computer.as_ref()),
            Self::Stop(condition) => condition.context_computer(),
            Self::Queue(condition) => condition.context_computer(),
            Self::Step(action) => action.context_computer(),
            Self::BranchStart(action) => action.context_computer(),
        }
    }

    fn is_standalone(&self) -> bool {
        matches!(self, Self::Standalone(_))
    }
}

impl<T> Clone for ComputerSource<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Standalone(c) => Self::Standalone(Rc::clone(c)),
            Self::Stop(c) => Self::Stop(Rc::clone(c)),
            Self::Queue(c) => Self::Queue(Rc::clone(c)),
            Self::Step(a) => Self::Step(Rc::clone(a)),
            Self::BranchStart(a) => Self::BranchStart(Rc::clone(a)),
        }
    }
}

/// Every registration of one computer key. The newest owner computes the
/// value; the key goes away once its last owner is cleared.
type ComputerOwners<T> = SmallVec<[ComputerSource<T>; 1]>;

/// Policy lists. Cloning copies the lists; the policy objects are shared.
pub(crate) struct Policies<T> {
    pub(crate) stop_conditions: Vec<Rc<dyn StopCondition<T>>>,
    pub(crate) queue_conditions: Vec<Rc<dyn QueueCondition<T>>>,
    pub(crate) step_actions: Vec<Rc<dyn StepAction<T>>>,
    pub(crate) branch_start_actions: Vec<Rc<dyn BranchStartAction<T>>>,
    computers: FxHashMap<String, ComputerOwners<T>>,
}

impl<T> Policies<T> {
    pub(crate) fn new() -> Self {
        Self {
            stop_conditions: Vec::new(),
            queue_conditions: Vec::new(),
            step_actions: Vec::new(),
            branch_start_actions: Vec::new(),
            computers: FxHashMap::default(),
        }
    }

    fn register(&mut self, source: ComputerSource<T>) {
        let Some(key) = source.computer().map(|c| c.key_name().to_string()) else {
            return;
        };
        self.computers.entry(key).or_default().push(source);
    }

    /// Drop the registrations matching `remove`, and keys left without owners.
    fn unregister(&mut self, remove: impl Fn(&ComputerSource<T>) -> bool) {
        self.computers.retain(|_, owners| {
            owners.retain(|source| !remove(&*source));
            !owners.is_empty()
        });
    }

    fn computer_for<'a>(
        owners: &'a ComputerOwners<T>,
    ) -> Option<&'a dyn DynContextValueComputer<T>> {
        owners.last()?.computer()
    }

    pub(crate) fn computer_keys(&self) -> impl Iterator<Item = &str> {
        self.computers.keys().map(String::as_str)
    }

    pub(crate) fn add_computer(&mut self, computer: Rc<dyn DynContextValueComputer<T>>) {
        self.register(ComputerSource::Standalone(computer));
    }

    pub(crate) fn clear_computers(&mut self) {
        self.unregister(ComputerSource::is_standalone);
    }

    pub(crate) fn copy_computers(&mut self, other: &Self) {
        for source in other.computers.values().flatten() {
            if source.is_standalone() {
                self.register(source.clone());
            }
        }
    }

    pub(crate) fn add_stop_condition(&mut self, condition: Rc<dyn StopCondition<T>>) {
        self.register(ComputerSource::Stop(Rc::clone(&condition)));
        self.stop_conditions.push(condition);
    }

    pub(crate) fn clear_stop_conditions(&mut self) {
        self.stop_conditions.clear();
        self.unregister(|source| matches!(source, ComputerSource::Stop(_)));
    }

    pub(crate) fn copy_stop_conditions(&mut self, other: &Self) {
        for condition in &other.stop_conditions {
            self.add_stop_condition(Rc::clone(condition));
        }
    }

    pub(crate) fn add_queue_condition(&mut self, condition: Rc<dyn QueueCondition<T>>) {
        self.register(ComputerSource::Queue(Rc::clone(&condition)));
        self.queue_conditions.push(condition);
    }

    pub(crate) fn clear_queue_conditions(&mut self) {
        self.queue_conditions.clear();
        self.unregister(|source| matches!(source, ComputerSource::Queue(_)));
    }

    pub(crate) fn copy_queue_conditions(&mut self, other: &Self) {
        for condition in &other.queue_conditions {
            self.add_queue_condition(Rc::clone(condition));
        }
    }

    pub(crate) fn add_step_action(&mut self, action: Rc<dyn StepAction<T>>) {
        self.register(ComputerSource::Step(Rc::clone(&action)));
        self.step_actions.push(action);
    }

    pub(crate) fn clear_step_actions(&mut self) {
        self.step_actions.clear();
        self.unregister(|source| matches!(source, ComputerSource::Step(_)));
    }

    pub(crate) fn copy_step_actions(&mut self, other: &Self) {
        for action in &other.step_actions {
            self.add_step_action(Rc::clone(action));
        }
    }

    pub(crate) fn add_branch_start_action(&mut self, action: Rc<dyn BranchStartAction<T>>) {
        self.register(ComputerSource::BranchStart(Rc::clone(&action)));
        self.branch_start_actions.push(action);
    }

    pub(crate) fn clear_branch_start_actions(&mut self) {
        self.branch_start_actions.clear();
        self.unregister(|source| matches!(source, ComputerSource::BranchStart(_)));
    }

    pub(crate) fn copy_branch_start_actions(&mut self, other: &Self) {
        for action in &other.branch_start_actions {
            self.add_branch_start_action(Rc::clone(action));
        }
    }

    /// Context for a top-level start item.
    pub(crate) fn compute_initial_context(&self, item: &T) -> StepContext {
        let values = self
            .computers
            .iter()
            .filter_map(|(key, owners)| {
                let computer = Self::computer_for(owners)?;
                Some((key.clone(), computer.initial_value(item)))
            })
            .collect();
        StepContext::start().with_values(values)
    }

    /// Context for `next_item`, queued from the item owning `current`.
    pub(crate) fn compute_next_context(
        &self,
        current: &StepContext,
        next_item: &T,
        is_branch_start: bool,
    ) -> Result<StepContext, TraversalError> {
        let mut values: FxHashMap<String, Rc<dyn Any>> = FxHashMap::default();
        for (key, owners) in &self.computers {
            let Some(computer) = Self::computer_for(owners) else {
                continue;
            };
            let current_value = current
                .raw(key)
                .ok_or_else(|| TraversalError::MissingContextValue { key: key.clone() })?;
            let next_value = computer
                .next_value(next_item, current_value)
                .ok_or_else(|| TraversalError::ContextTypeMismatch { key: key.clone() })?;
            values.insert(key.clone(), next_value);
        }
        Ok(current.next(is_branch_start, values))
    }

    pub(crate) fn can_queue(
        &self,
        next_item: &T,
        next_context: &StepContext,
        current_item: &T,
        current_context: &StepContext,
    ) -> bool {
        self.queue_conditions
            .iter()
            .all(|c| c.should_queue(next_item, next_context, current_item, current_context))
    }

    pub(crate) fn can_queue_start_item(&self, item: &T) -> bool {
        self.queue_conditions
            .iter()
            .all(|c| c.should_queue_start_item(item))
    }

    /// Evaluates every stop condition, even after one has matched.
    pub(crate) fn matches_any_stop_condition(&self, item: &T, context: &StepContext) -> bool {
        let mut stop = false;
        for condition in &self.stop_conditions {
            stop |= condition.should_stop(item, context);
        }
        stop
    }

    pub(crate) fn apply_step_actions(&self, item: &T, context: &StepContext) {
        for action in &self.step_actions {
            action.apply(item, context);
        }
    }

    pub(crate) fn apply_branch_start_actions(&self, item: &T, context: &StepContext) {
        for action in &self.branch_start_actions {
            action.apply(item, context);
        }
    }
}

impl<T> Clone for Policies<T> {
    fn clone(&self) -> Self {
        Self {
            stop_conditions: self.stop_conditions.clone(),
            queue_conditions: self.queue_conditions.clone(),
            step_actions: self.step_actions.clone(),
            branch_start_actions: self.branch_start_actions.clone(),
            computers: self.computers.clone(),
        }
    }
}
