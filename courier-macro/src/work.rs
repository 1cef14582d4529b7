use crate::helpers::generic_helpers::add_sync_trait_bounds;
use crate::utils::{find_header_field, has_attribute, locate_crate_on_derive_macro};
use proc_macro2::TokenStream;
use syn::{DeriveInput, Type};

const SYNC_BOUNDS: [&str; 3] = ["Send", "Sync", "'static"];

fn response_type(ast: &DeriveInput) -> syn::Result<Type> {
	match ast.attrs.iter().find(|attr| attr.path().is_ident("response")) {
		Some(attr) => attr.parse_args::<Type>(),
		None => Ok(syn::parse_quote!(bool)),
	}
}

fn render_work_token(ast: &DeriveInput, work_type: TokenStream) -> syn::Result<TokenStream> {
	let crates = locate_crate_on_derive_macro(ast)?;
	let header = find_header_field(ast)?;
	let name = &ast.ident;

	let mut generics = ast.generics.clone();
	add_sync_trait_bounds(&mut generics, &SYNC_BOUNDS);
	let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

	// `#[custom_validation]` means the type brings its own `TValidate`.
	let validate = if has_attribute(ast, "custom_validation") {
		quote!()
	} else {
		quote!(
			impl #impl_generics #crates::prelude::TValidate for #name #ty_generics #where_clause {}
		)
	};

	Ok(quote!(
		impl #impl_generics #crates::prelude::TWork for #name #ty_generics #where_clause {
			fn header(&self) -> &#crates::prelude::WorkHeader {
				&self.#header
			}
			fn header_mut(&mut self) -> &mut #crates::prelude::WorkHeader {
				&mut self.#header
			}
			fn work_type(&self) -> #crates::prelude::WorkType {
				#crates::prelude::WorkType::#work_type
			}
		}
		#validate
	))
}

pub(crate) fn render_command_token(ast: &DeriveInput) -> syn::Result<TokenStream> {
	let work = render_work_token(ast, quote!(Command))?;
	let crates = locate_crate_on_derive_macro(ast)?;
	let response = response_type(ast)?;
	let name = &ast.ident;

	let mut generics = ast.generics.clone();
	add_sync_trait_bounds(&mut generics, &SYNC_BOUNDS);
	let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

	Ok(quote!(
		#work
		impl #impl_generics #crates::prelude::TCommand for #name #ty_generics #where_clause {
			type Response = #response;
		}
	))
}

pub(crate) fn render_event_token(ast: &DeriveInput) -> syn::Result<TokenStream> {
	let work = render_work_token(ast, quote!(Event))?;
	let crates = locate_crate_on_derive_macro(ast)?;
	let name = &ast.ident;

	let mut generics = ast.generics.clone();
	add_sync_trait_bounds(&mut generics, &SYNC_BOUNDS);
	let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

	Ok(quote!(
		#work
		impl #impl_generics #crates::prelude::TEvent for #name #ty_generics #where_clause {}
	))
}
