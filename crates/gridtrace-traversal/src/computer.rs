//! Context value computers: keyed values carried along each path.

use std::any::Any;
use std::marker::PhantomData;
use std::rc::Rc;

/// Computes a value stored on every step context under `key()`.
///
/// `compute_initial` runs once per start item. `compute_next` runs once per
/// queued item and receives the value from the context of the item it was
/// queued *from*. Both must be deterministic and side-effect free.
pub trait ContextValueComputer<T> {
    type Value: 'static;

    /// Storage key. Policies sharing a key share one registration.
    fn key(&self) -> &str;

    fn compute_initial(&self, item: &T) -> Self::Value;

    fn compute_next(&self, next_item: &T, current_value: &Self::Value) -> Self::Value;
}

/// Object-safe view of a [`ContextValueComputer`], used by the engine to
/// hold computers of different value types in one registry.
pub trait DynContextValueComputer<T> {
    fn key_name(&self) -> &str;

    fn initial_value(&self, item: &T) -> Rc<dyn Any>;

    /// `None` when `current` is not this computer's value type.
    fn next_value(&self, next_item: &T, current: &dyn Any) -> Option<Rc<dyn Any>>;
}

impl<T, C> DynContextValueComputer<T> for C
where
    C: ContextValueComputer<T>,
{
    fn key_name(&self) -> &str {
        ContextValueComputer::key(self)
    }

    fn initial_value(&self, item: &T) -> Rc<dyn Any> {
        Rc::new(self.compute_initial(item))
    }

    fn next_value(&self, next_item: &T, current: &dyn Any) -> Option<Rc<dyn Any>> {
        let current = current.downcast_ref::<C::Value>()?;
        Some(Rc::new(self.compute_next(next_item, current)))
    }
}

/// A computer built from two closures.
pub struct FnComputer<T, V, I, N> {
    key: String,
    initial: I,
    next: N,
    _marker: PhantomData<fn(&T) -> V>,
}

impl<T, V, I, N> FnComputer<T, V, I, N>
where
    V: 'static,
    I: Fn(&T) -> V,
    N: Fn(&T, &V) -> V,
{
    pub fn new(key: impl Into<String>, initial: I, next: N) -> Self {
        Self {
            key: key.into(),
            initial,
            next,
            _marker: PhantomData,
        }
    }
}

impl<T, V, I, N> ContextValueComputer<T> for FnComputer<T, V, I, N>
where
    V: 'static,
    I: Fn(&T) -> V,
    N: Fn(&T, &V) -> V,
{
    type Value = V;

    fn key(&self) -> &str {
        &self.key
    }

    fn compute_initial(&self, item: &T) -> V {
        (self.initial)(item)
    }

    fn compute_next(&self, next_item: &T, current_value: &V) -> V {
        (self.next)(next_item, current_value)
    }
}
