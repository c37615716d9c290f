use convert_case::{Case, Casing};
use proc_macro::TokenStream;
use quote::quote;

/// Generate a three channel color model. Each field becomes a public channel
/// and its name, in Pascal case, becomes the name of the matching input field.
#[proc_macro]
pub fn gen_channels(input: TokenStream) -> TokenStream {
    let mut input = syn::parse_macro_input!(input as syn::ItemStruct);

    if input.fields.len() != 3 {
        return quote! {
            compile_error!("Models must have exactly 3 fields, one for each channel of the color.")
        }
        .into();
    }

    if !input.generics.params.is_empty() {
        return quote! {
            compile_error!("Channel models can not be generic.")
        }
        .into();
    }

    let field_names = input
        .fields
        .iter()
        .map(|f| f.ident.clone())
        .collect::<Vec<_>>();
    let field_types = input
        .fields
        .iter()
        .map(|f| f.ty.clone())
        .collect::<Vec<_>>();
    debug_assert!(field_names.len() == 3);

    let field1 = &field_names[0];
    let field2 = &field_names[1];
    let field3 = &field_names[2];
    let ty1 = &field_types[0];
    let ty2 = &field_types[1];
    let ty3 = &field_types[2];

    let labels = field_names
        .iter()
        .map(|f| {
            f.as_ref()
                .map(|ident| ident.to_string().to_case(Case::Pascal))
                .unwrap_or_default()
        })
        .collect::<Vec<_>>();
    let label1 = &labels[0];
    let label2 = &labels[1];
    let label3 = &labels[2];

    // Make sure the 3 specified fields are public.
    input.fields.iter_mut().for_each(|f| {
        f.vis = syn::Visibility::Public(Default::default());
    });

    input
        .attrs
        .push(syn::parse_quote!(#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]));

    let struct_name = input.ident.clone();

    let new_impl = quote! {
        impl #struct_name {
            /// The input field names for the channels, in channel order.
            pub const FIELD_NAMES: [&'static str; 3] = [#label1, #label2, #label3];

            /// Create a new color with these channels.
            pub const fn new(#field1: #ty1, #field2: #ty2, #field3: #ty3) -> Self {
                Self {
                    #field1,
                    #field2,
                    #field3,
                }
            }

            /// Return the channel that belongs to the named input field.
            pub fn channel(&self, name: &str) -> Option<i64> {
                match name {
                    #label1 => Some(i64::from(self.#field1)),
                    #label2 => Some(i64::from(self.#field2)),
                    #label3 => Some(i64::from(self.#field3)),
                    _ => None,
                }
            }

            /// Return all channels widened to `i64`.
            pub fn to_array(&self) -> [i64; 3] {
                [
                    i64::from(self.#field1),
                    i64::from(self.#field2),
                    i64::from(self.#field3),
                ]
            }
        }

        impl From<(#ty1, #ty2, #ty3)> for #struct_name {
            fn from(value: (#ty1, #ty2, #ty3)) -> Self {
                Self::new(value.0, value.1, value.2)
            }
        }

        impl From<#struct_name> for (#ty1, #ty2, #ty3) {
            fn from(value: #struct_name) -> Self {
                (value.#field1, value.#field2, value.#field3)
            }
        }
    };

    quote! {
        #input
        #new_impl
    }
    .into()
}
