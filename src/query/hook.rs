//! Query extension hooks.

use std::fmt;
use std::sync::Arc;

use crate::query::{QueryError, SelectionSet};

type ExtendFn = dyn Fn(&mut SelectionSet) -> Result<(), QueryError> + Send + Sync;
type ReplaceFn = dyn Fn(&SelectionSet) -> Result<SelectionSet, QueryError> + Send + Sync;

/// A caller-supplied transformation of a query fragment.
///
/// Hooks run in registration order, each one seeing the output of the
/// previous one.
///
/// - [`QueryHook::extend`] can only add selections, so the base fields stay
///   available.
/// - [`QueryHook::replace`] returns a whole new fragment. The caller takes
///   responsibility for keeping the fields the typed models read.
///
/// # Example
///
/// ```rust
/// use magento_graphql::query::{QueryHook, SelectionSet};
///
/// let hook = QueryHook::extend(|product| {
///     product.field("meta_description");
/// });
///
/// let mut base = SelectionSet::new();
/// base.field("sku");
/// let extended = hook.apply(base).unwrap();
/// assert_eq!(extended.to_string(), "{sku meta_description}");
/// ```
#[derive(Clone)]
pub enum QueryHook {
    /// Adds selections in place.
    Extend(Arc<ExtendFn>),
    /// Produces a replacement fragment.
    Replace(Arc<ReplaceFn>),
}

impl QueryHook {
    /// Creates an additive hook.
    pub fn extend<F>(hook: F) -> Self
    where
        F: Fn(&mut SelectionSet) + Send + Sync + 'static,
    {
        Self::Extend(Arc::new(move |selection| {
            hook(selection);
            Ok(())
        }))
    }

    /// Creates an additive hook that can fail.
    pub fn try_extend<F>(hook: F) -> Self
    where
        F: Fn(&mut SelectionSet) -> Result<(), QueryError> + Send + Sync + 'static,
    {
        Self::Extend(Arc::new(hook))
    }

    /// Creates a replacing hook.
    pub fn replace<F>(hook: F) -> Self
    where
        F: Fn(&SelectionSet) -> SelectionSet + Send + Sync + 'static,
    {
        Self::Replace(Arc::new(move |selection| Ok(hook(selection))))
    }

    /// Creates a replacing hook that can fail.
    pub fn try_replace<F>(hook: F) -> Self
    where
        F: Fn(&SelectionSet) -> Result<SelectionSet, QueryError> + Send + Sync + 'static,
    {
        Self::Replace(Arc::new(hook))
    }

    /// Applies this hook to `fragment`.
    ///
    /// # Errors
    ///
    /// Returns the hook's own error; nothing is swallowed.
    pub fn apply(&self, mut fragment: SelectionSet) -> Result<SelectionSet, QueryError> {
        match self {
            Self::Extend(hook) => {
                hook(&mut fragment)?;
                Ok(fragment)
            }
            Self::Replace(hook) => hook(&fragment),
        }
    }
}

impl fmt::Debug for QueryHook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extend(_) => f.write_str("QueryHook::Extend(..)"),
            Self::Replace(_) => f.write_str("QueryHook::Replace(..)"),
        }
    }
}

/// Applies `hooks` to `base` in order.
///
/// # Errors
///
/// Stops at the first failing hook and returns its error.
pub fn apply_hooks(base: SelectionSet, hooks: &[QueryHook]) -> Result<SelectionSet, QueryError> {
    hooks.iter().try_fold(base, |fragment, hook| hook.apply(fragment))
}
