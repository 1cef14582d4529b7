use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

#[macro_use]
extern crate quote;

mod helpers;
mod utils;
mod work;

/// Implements `TWork` and `TCommand` by delegating to the struct's `WorkHeader` field.
///
/// ## Attributes
///
/// - `#[response(...)]` - Type the handler returns. (Default is `bool`)
/// - `#[header]` - Marks the header field when it is not called `header`.
/// - `#[custom_validation]` - Skip the empty `TValidate` impl; write your own.
/// - `#[crates(...)]` - Specify the path of the courier crate. (Default is `courier`)
///
/// ## Example
/// ```ignore
/// #[derive(Debug, TCommand)]
/// #[response(Option<Uuid>)]
/// #[custom_validation]
/// pub struct CreateUser {
///     header: WorkHeader,
///     pub name: String,
/// }
///
/// impl TValidate for CreateUser {
///     fn validate(&self) -> Vec<ValidationFailure> {
///         let mut failures = ValidationFailures::new();
///         failures.ensure(!self.name.is_empty(), "name", "Name is required");
///         failures.into_vec()
///     }
/// }
/// ```
#[proc_macro_derive(TCommand, attributes(response, header, custom_validation, crates))]
pub fn command_derive(attr: TokenStream) -> TokenStream {
	let ast = parse_macro_input!(attr as DeriveInput);
	work::render_command_token(&ast).unwrap_or_else(syn::Error::into_compile_error).into()
}

/// Implements `TWork` and `TEvent` by delegating to the struct's `WorkHeader` field.
///
/// Accepts the same `#[header]`, `#[custom_validation]` and `#[crates(...)]` attributes as `TCommand`.
/// ## Example
/// ```ignore
/// #[derive(Debug, TEvent)]
/// pub struct UserCreated {
///     #[header]
///     meta: WorkHeader,
///     pub user_id: Uuid,
/// }
/// ```
#[proc_macro_derive(TEvent, attributes(header, custom_validation, crates))]
pub fn event_derive(attr: TokenStream) -> TokenStream {
	let ast = parse_macro_input!(attr as DeriveInput);
	work::render_event_token(&ast).unwrap_or_else(syn::Error::into_compile_error).into()
}
