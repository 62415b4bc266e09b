//! The world a proposition is evaluated against.

use std::any::{Any, TypeId};

/// Three-valued outcome of a typed state retrieval: present, absent, or
/// present-but-wrong-type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateLookup<T> {
    Success(T),
    NotAvailable,
    TypeMismatch { actual_type: &'static str },
}

/// Carries the current world for proposition evaluation, plus (for trace
/// contexts) the index into the trace this context was built from.
pub trait EvaluationContext {
    /// `None` for non-trace contexts (e.g. a context built for a single
    /// Kripke state outside of any particular trace).
    fn trace_index(&self) -> Option<usize>;

    /// Simple nullable typed read: `None` covers both "no state at all" and
    /// "state present but wrong type".
    fn state<T: Clone + 'static>(&self) -> Option<T>;

    /// Richer three-valued retrieval. The default implementation is built
    /// atop [`state`](Self::state) and therefore cannot distinguish a
    /// type mismatch from plain absence - it always reports
    /// [`StateLookup::NotAvailable`] on failure. Implementations that carry
    /// a type-erased state should override this to inspect the erased
    /// value's runtime type and report [`StateLookup::TypeMismatch`].
    fn state_lookup<T: Clone + 'static>(&self) -> StateLookup<T> {
        match self.state::<T>() {
            Some(value) => StateLookup::Success(value),
            None => StateLookup::NotAvailable,
        }
    }
}

/// A context carrying a single type-erased state value, capable of
/// distinguishing absence from type mismatch in
/// [`state_lookup`](EvaluationContext::state_lookup).
#[derive(Debug, Clone)]
pub struct ErasedStateContext {
    state: Option<(TypeId, &'static str, std::sync::Arc<dyn Any + Send + Sync>)>,
    trace_index: Option<usize>,
}

impl ErasedStateContext {
    pub fn empty() -> Self {
        ErasedStateContext {
            state: None,
            trace_index: None,
        }
    }

    pub fn with_state<T: Any + Send + Sync + 'static>(value: T) -> Self {
        ErasedStateContext {
            state: Some((TypeId::of::<T>(), std::any::type_name::<T>(), std::sync::Arc::new(value))),
            trace_index: None,
        }
    }

    pub fn at_trace_index(mut self, index: usize) -> Self {
        self.trace_index = Some(index);
        self
    }
}

impl EvaluationContext for ErasedStateContext {
    fn trace_index(&self) -> Option<usize> {
        self.trace_index
    }

    fn state<T: Clone + 'static>(&self) -> Option<T> {
        let (type_id, _, value) = self.state.as_ref()?;
        if *type_id != TypeId::of::<T>() {
            return None;
        }
        value.downcast_ref::<T>().cloned()
    }

    fn state_lookup<T: Clone + 'static>(&self) -> StateLookup<T> {
        match &self.state {
            None => StateLookup::NotAvailable,
            Some((type_id, type_name, value)) => {
                if *type_id == TypeId::of::<T>() {
                    match value.downcast_ref::<T>() {
                        Some(v) => StateLookup::Success(v.clone()),
                        None => StateLookup::NotAvailable,
                    }
                } else {
                    StateLookup::TypeMismatch { actual_type: type_name }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_context_reports_not_available() {
        let ctx = ErasedStateContext::empty();
        assert_eq!(ctx.state::<i32>(), None);
        assert_eq!(ctx.state_lookup::<i32>(), StateLookup::NotAvailable);
    }

    #[test]
    fn matching_type_succeeds() {
        let ctx = ErasedStateContext::with_state(42i32);
        assert_eq!(ctx.state::<i32>(), Some(42));
        assert_eq!(ctx.state_lookup::<i32>(), StateLookup::Success(42));
    }

    #[test]
    fn mismatched_type_is_distinguished_from_absence() {
        let ctx = ErasedStateContext::with_state(42i32);
        assert_eq!(ctx.state::<String>(), None);
        assert!(matches!(
            ctx.state_lookup::<String>(),
            StateLookup::TypeMismatch { .. }
        ));
    }

    #[test]
    fn trace_index_is_nil_unless_set() {
        let ctx = ErasedStateContext::empty();
        assert_eq!(ctx.trace_index(), None);
        let ctx = ctx.at_trace_index(3);
        assert_eq!(ctx.trace_index(), Some(3));
    }
}
