//! Stop and queue conditions.
//!
//! Both are pure decisions over an item and its context. A condition may
//! also be a [`ContextValueComputer`](crate::ContextValueComputer): it then
//! returns itself from `context_computer` and the traversal registers it
//! under its key when the condition is added.

use crate::computer::DynContextValueComputer;
use crate::context::StepContext;

/// Decides whether the traversal stops at an item.
///
/// Every registered stop condition is evaluated for every visited item; the
/// item is stopping if any returns true. A stopping item still runs step
/// actions but its neighbours are not queued.
pub trait StopCondition<T> {
    fn should_stop(&self, item: &T, context: &StepContext) -> bool;

    fn context_computer(&self) -> Option<&dyn DynContextValueComputer<T>> {
        None
    }
}

impl<T, F> StopCondition<T> for F
where
    F: Fn(&T, &StepContext) -> bool,
{
    fn should_stop(&self, item: &T, context: &StepContext) -> bool {
        self(item, context)
    }
}

/// Decides whether a candidate is admitted to the item or branch queue.
/// All registered queue conditions must pass.
pub trait QueueCondition<T> {
    /// `next_context` is already computed for the candidate; `current_*`
    /// describe the item the candidate was found from.
    fn should_queue(
        &self,
        next_item: &T,
        next_context: &StepContext,
        current_item: &T,
        current_context: &StepContext,
    ) -> bool;

    /// Checked before a start item is queued.
    fn should_queue_start_item(&self, _item: &T) -> bool {
        true
    }

    fn context_computer(&self) -> Option<&dyn DynContextValueComputer<T>> {
        None
    }
}

impl<T, F> QueueCondition<T> for F
where
    F: Fn(&T, &StepContext, &T, &StepContext) -> bool,
{
    fn should_queue(
        &self,
        next_item: &T,
        next_context: &StepContext,
        current_item: &T,
        current_context: &StepContext,
    ) -> bool {
        self(next_item, next_context, current_item, current_context)
    }
}
