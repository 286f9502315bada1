use proc_macro2::TokenStream;

fn struct_field<'a>(
    input: &'a syn::DeriveInput,
    name: &str,
    trait_name: &str,
) -> syn::Result<(usize, &'a syn::Field)> {
    match &input.data {
        syn::Data::Struct(data_struct) => crate::get_field(name, data_struct).ok_or_else(|| {
            syn::Error::new_spanned(
                &data_struct.fields,
                format!("no `{name}` field or field marked `#[{name}]`"),
            )
        }),
        syn::Data::Enum(data_enum) => Err(syn::Error::new_spanned(
            data_enum.enum_token,
            format!("the `{trait_name}` trait can only be derived for struct types"),
        )),
        syn::Data::Union(data_union) => Err(syn::Error::new_spanned(
            data_union.union_token,
            format!("the `{trait_name}` trait can only be derived for struct types"),
        )),
    }
}

fn field_access((index, field): (usize, &syn::Field)) -> TokenStream {
    match &field.ident {
        Some(ident) => quote::quote!(#ident),
        None => {
            let index = syn::Index::from(index);
            quote::quote!(#index)
        }
    }
}

pub fn impl_position(input: syn::Result<syn::DeriveInput>) -> syn::Result<proc_macro::TokenStream> {
    let input = input?;
    let access = field_access(struct_field(&input, "position", "Position")?);

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let name = &input.ident;

    Ok(quote::quote! {
        impl #impl_generics Position for #name #ty_generics #where_clause {
            #[inline]
            fn position(&self) -> ::glam::DVec2 {
                self.#access
            }
        }
    }
    .into())
}

pub fn impl_mass(input: syn::Result<syn::DeriveInput>) -> syn::Result<proc_macro::TokenStream> {
    let input = input?;
    let access = field_access(struct_field(&input, "mass", "Mass")?);

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let name = &input.ident;

    Ok(quote::quote! {
        impl #impl_generics Mass for #name #ty_generics #where_clause {
            #[inline]
            fn mass(&self) -> f64 {
                self.#access
            }
        }
    }
    .into())
}
