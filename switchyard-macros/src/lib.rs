//! Procedural macros for Switchyard.
//!
//! - `#[actions]` - builds a controller's action table from its `async fn`s

use proc_macro::TokenStream;

mod actions;

/// Register every `async fn` of an inherent impl block as a controller action.
///
/// The first parameter of each action is the dispatch context; the rest are
/// extracted positionally from the route arguments. Plain `fn`s are left
/// alone unless tagged with `#[action(..)]`, which is an error on a non-async
/// method.
///
/// ```rust,ignore
/// #[switchyard::actions]
/// impl ArticlesController {
///     async fn show(cx: &mut Dispatch<Self>, id: i64) -> Result<Response, DispatchError> {
///         // ...
///     }
///
///     #[action(name = "list")]
///     async fn index(cx: &mut Dispatch<Self>) -> Result<Response, DispatchError> {
///         // ...
///     }
///
///     #[action(skip)]
///     async fn helper(cx: &mut Dispatch<Self>) -> Result<Response, DispatchError> {
///         // ...
///     }
/// }
/// ```
///
/// Generates the `Actions` implementation used by `Dispatcher::new`.
#[proc_macro_attribute]
pub fn actions(attr: TokenStream, item: TokenStream) -> TokenStream {
    actions::actions_impl(attr, item)
}
