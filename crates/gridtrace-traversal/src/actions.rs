//! Step actions and branch start actions.

use crate::computer::DynContextValueComputer;
use crate::context::StepContext;

/// Runs for every visited item, including start items and stopping items.
pub trait StepAction<T> {
    fn apply(&self, item: &T, context: &StepContext);

    fn context_computer(&self) -> Option<&dyn DynContextValueComputer<T>> {
        None
    }
}

impl<T, F> StepAction<T> for F
where
    F: Fn(&T, &StepContext),
{
    fn apply(&self, item: &T, context: &StepContext) {
        self(item, context)
    }
}

/// Runs once, for the start item of a branch traversal, before step actions.
/// Never runs for the top-level traversal's start items.
pub trait BranchStartAction<T> {
    fn apply(&self, item: &T, context: &StepContext);

    fn context_computer(&self) -> Option<&dyn DynContextValueComputer<T>> {
        None
    }
}

impl<T, F> BranchStartAction<T> for F
where
    F: Fn(&T, &StepContext),
{
    fn apply(&self, item: &T, context: &StepContext) {
        self(item, context)
    }
}

/// Step action that only fires for stopping items.
pub struct IfStopping<A>(A);

/// Step action that only fires for items that are not stopping.
pub struct IfNotStopping<A>(A);

pub fn if_stopping<A>(action: A) -> IfStopping<A> {
    IfStopping(action)
}

pub fn if_not_stopping<A>(action: A) -> IfNotStopping<A> {
    IfNotStopping(action)
}

impl<T, A: StepAction<T>> StepAction<T> for IfStopping<A> {
    fn apply(&self, item: &T, context: &StepContext) {
        if context.is_stopping() {
            self.0.apply(item, context);
        }
    }

    fn context_computer(&self) -> Option<&dyn DynContextValueComputer<T>> {
        self.0.context_computer()
    }
}

impl<T, A: StepAction<T>> StepAction<T> for IfNotStopping<A> {
    fn apply(&self, item: &T, context: &StepContext) {
        if !context.is_stopping() {
            self.0.apply(item, context);
        }
    }

    fn context_computer(&self) -> Option<&dyn DynContextValueComputer<T>> {
        self.0.context_computer()
    }
}
