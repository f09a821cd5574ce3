//! Action tables.
//!
//! An [`ActionTable`] maps action names to plain function pointers. It is
//! built once per [`Dispatcher`](crate::Dispatcher) and shared read-only by
//! every handler and every forward.
//!
//! # Writing actions by hand
//!
//! ```rust,ignore
//! fn show(cx: &mut Dispatch<ArticlesController>, args: RouteArgs) -> ActionFuture<'_, Response> {
//!     Box::pin(async move {
//!         let id: i64 = args.arg(0)?;
//!         let mut response = cx.take_response().unwrap_or_default();
//!         response.write(&format!("article {id}"));
//!         Ok::<_, DispatchError>(response)
//!     })
//! }
//!
//! let table = ActionTable::<ArticlesController>::builder().action("show", show).build()?;
//! ```
//!
//! The `#[actions]` macro generates the same thing from `async fn`s.

use crate::dispatch::Dispatch;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::fmt;
use switchyard_core::{Controller, DispatchError, RouteArgs};

/// The future returned by an action.
pub type ActionFuture<'a, O> = BoxFuture<'a, Result<O, DispatchError>>;

/// A registered action: takes the dispatch context and the route arguments.
pub type ActionFn<C> =
    for<'a> fn(&'a mut Dispatch<C>, RouteArgs) -> ActionFuture<'a, <C as Controller>::Output>;

/// Name-to-action mapping for one controller type.
pub struct ActionTable<C: Controller> {
    actions: HashMap<String, ActionFn<C>>,
}

impl<C: Controller> ActionTable<C> {
    /// Start building a table.
    pub fn builder() -> ActionTableBuilder<C> {
        ActionTableBuilder::new()
    }

    /// Look up an action by name.
    pub fn get(&self, name: &str) -> Option<ActionFn<C>> {
        self.actions.get(name).copied()
    }

    /// Whether an action is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Number of registered actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Registered action names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<C: Controller> fmt::Debug for ActionTable<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionTable")
            .field("controller", &C::type_name())
            .field("actions", &self.names())
            .finish()
    }
}

/// Builder for constructing an [`ActionTable`].
pub struct ActionTableBuilder<C: Controller> {
    actions: HashMap<String, ActionFn<C>>,
    duplicate: Option<String>,
}

impl<C: Controller> Default for ActionTableBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Controller> ActionTableBuilder<C> {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self {
            actions: HashMap::new(),
            duplicate: None,
        }
    }

    /// Register an action.
    pub fn action(mut self, name: impl Into<String>, action: ActionFn<C>) -> Self {
        let name = name.into();
        if self.actions.contains_key(&name) {
            self.duplicate.get_or_insert(name);
        } else {
            self.actions.insert(name, action);
        }
        self
    }

    /// Build the table.
    ///
    /// # Errors
    ///
    /// [`DispatchError::DuplicateAction`] if a name was registered twice.
    pub fn build(self) -> Result<ActionTable<C>, DispatchError> {
        if let Some(name) = self.duplicate {
            return Err(DispatchError::DuplicateAction(name));
        }
        Ok(ActionTable {
            actions: self.actions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StatelessController;

    fn first(_cx: &mut Dispatch<StatelessController>, _args: RouteArgs) -> ActionFuture<'_, String> {
        Box::pin(futures::future::ready(Ok("first".to_string())))
    }

    fn second(_cx: &mut Dispatch<StatelessController>, _args: RouteArgs) -> ActionFuture<'_, String> {
        Box::pin(futures::future::ready(Ok("second".to_string())))
    }

    #[test]
    fn test_lookup() {
        let table = ActionTable::<StatelessController>::builder()
            .action("first", first)
            .action("second", second)
            .build()
            .unwrap();

        assert_eq!(table.len(), 2);
        assert!(table.contains("first"));
        assert!(table.get("missing").is_none());
        assert_eq!(table.names(), vec!["first", "second"]);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let result = ActionTable::<StatelessController>::builder()
            .action("first", first)
            .action("first", second)
            .build();

        assert!(matches!(result, Err(DispatchError::DuplicateAction(name)) if name == "first"));
    }
}
