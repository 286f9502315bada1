//! Derive macros for the `Position` and `Mass` traits of `gravitree`.

mod body;

/// Derive macro generating an implementation of the trait `Position`.
///
/// The struct needs a `glam::DVec2` field named `position`, or a field marked with
/// `#[position]`.
#[proc_macro_derive(Position, attributes(position))]
pub fn position_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    body::impl_position(syn::parse(input)).unwrap_or_else(|e| e.to_compile_error().into())
}

/// Derive macro generating an implementation of the trait `Mass`.
///
/// The struct needs an `f64` field named `mass`, or a field marked with `#[mass]`.
#[proc_macro_derive(Mass, attributes(mass))]
pub fn mass_derive(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    body::impl_mass(syn::parse(input)).unwrap_or_else(|e| e.to_compile_error().into())
}

pub(crate) fn has_attribute(name: &str, attrs: &[syn::Attribute]) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}

/// Finds the field marked with the attribute `name`, falling back to the field called `name`.
pub(crate) fn get_field<'a>(
    name: &str,
    data: &'a syn::DataStruct,
) -> Option<(usize, &'a syn::Field)> {
    data.fields
        .iter()
        .enumerate()
        .find(|(_, field)| has_attribute(name, &field.attrs))
        .or_else(|| {
            data.fields
                .iter()
                .enumerate()
                .find(|(_, field)| field.ident.as_ref().is_some_and(|ident| ident == name))
        })
}
