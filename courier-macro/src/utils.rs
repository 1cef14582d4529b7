use syn::{spanned::Spanned, Data, DataStruct, DeriveInput, Fields, Ident, Path};

/// Root path of the courier crate, `courier` unless `#[crates(...)]` says otherwise.
pub(crate) fn locate_crate_on_derive_macro(ast: &DeriveInput) -> syn::Result<Path> {
	match ast.attrs.iter().find(|x| x.path().is_ident("crates")) {
		Some(crates) => crates.parse_args::<Path>(),
		None => Ok(Ident::new("courier", proc_macro2::Span::call_site()).into()),
	}
}

/// Field holding the `WorkHeader`: the one marked `#[header]`, or else the one named `header`.
pub(crate) fn find_header_field(ast: &DeriveInput) -> syn::Result<&Ident> {
	let fields = match &ast.data {
		Data::Struct(DataStruct {
			fields: Fields::Named(named), ..
		}) => &named.named,
		_ => return Err(syn::Error::new(ast.span(), "work items must be structs with named fields")),
	};

	let mut marked = fields.iter().filter(|f| f.attrs.iter().any(|attr| attr.path().is_ident("header")));
	if let Some(field) = marked.next() {
		if let Some(other) = marked.next() {
			return Err(syn::Error::new(other.span(), "#[header] is specified only once!"));
		}
		return field.ident.as_ref().ok_or_else(|| syn::Error::new(field.span(), "header field must be named"));
	}

	fields
		.iter()
		.filter_map(|f| f.ident.as_ref())
		.find(|ident| *ident == "header")
		.ok_or_else(|| syn::Error::new(ast.ident.span(), "no header field: add a `header: WorkHeader` field or mark one with #[header]"))
}

pub(crate) fn has_attribute(ast: &DeriveInput, name: &str) -> bool {
	ast.attrs.iter().any(|attr| attr.path().is_ident(name))
}
