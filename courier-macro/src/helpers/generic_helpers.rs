use syn::punctuated::Punctuated;

// Work items cross task boundaries, so every type parameter needs `Send`, `Sync` and `'static`.
pub fn add_sync_trait_bounds(generics: &mut syn::Generics, contraints: &[&str]) {
	generics
		.params
		.iter_mut()
		.filter_map(|param| match param {
			syn::GenericParam::Type(ty) => Some(ty),
			_ => None,
		})
		.for_each(|ty| add_type_param_bounds(&mut ty.bounds, contraints))
}

fn add_type_param_bounds(bounds: &mut Punctuated<syn::TypeParamBound, syn::token::Plus>, new_bounds: &[&str]) {
	for bound in new_bounds {
		if let Ok(bound) = syn::parse_str(bound) {
			bounds.push(bound);
		}
	}
}
