extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;

/// Derives the `Composite` delegation capability for a struct, together with
/// the `TypeTag`/`Encode`/`Decode` impls that route field transcoding of the
/// struct through that capability.
#[proc_macro_derive(Composite)]
pub fn composite_derive(input: TokenStream) -> TokenStream {
    let ast = syn::parse(input).unwrap();

    impl_composite(&ast)
}

fn impl_composite(ast: &syn::DeriveInput) -> TokenStream {
    let composite_trait = quote! { tuplewire::composite::Composite };
    let encode_trait = quote! { tuplewire::conv::Encode };
    let decode_trait = quote! { tuplewire::conv::Decode };
    let target_trait = quote! { tuplewire::conv::target::Target };
    let parser_trait = quote! { tuplewire::parse::Parser };
    let parse_result_type = quote! { tuplewire::parse::ParseResult };

    let name = &ast.ident;
    let name_str = name.to_string();

    let (produce_body, reconstruct_body) = match &ast.data {
        syn::Data::Enum(_) => {
            unimplemented!("Derive macro `Composite` not implemented for enums")
        }
        syn::Data::Union(_) => {
            unimplemented!("Derive macro `Composite` not implemented for unions")
        }
        syn::Data::Struct(syn::DataStruct { fields, .. }) => match fields {
            syn::Fields::Unit => (quote! {}, quote! { let _ = input; Ok((Self, 0)) }),
            syn::Fields::Unnamed(syn::FieldsUnnamed { unnamed, .. }) => {
                let i = (0..unnamed.len()).map(syn::Index::from);
                let ty = unnamed.iter().map(|x| &x.ty);
                (
                    quote! { #( #encode_trait::write_to(&self.#i, &mut out); )* },
                    quote! {
                        let mut p = tuplewire::parse::SliceParser::new(input);
                        let value = Self(#( <#ty as #decode_trait>::parse(&mut p)? ),*);
                        Ok((value, #parser_trait::offset(&p)))
                    },
                )
            }
            syn::Fields::Named(syn::FieldsNamed { named, .. }) => {
                let (fname, ty): (Vec<&syn::Ident>, Vec<&syn::Type>) = named
                    .iter()
                    .map(|x| (x.ident.as_ref().unwrap(), &x.ty))
                    .unzip();
                (
                    quote! { #( #encode_trait::write_to(&self.#fname, &mut out); )* },
                    quote! {
                        let mut p = tuplewire::parse::SliceParser::new(input);
                        let value = Self { #( #fname: <#ty as #decode_trait>::parse(&mut p)? ),* };
                        Ok((value, #parser_trait::offset(&p)))
                    },
                )
            }
        },
    };

    let gen = quote! {
        impl #composite_trait for #name {
            fn produce(&self) -> ::std::vec::Vec<u8> {
                let mut out = ::std::vec::Vec::new();
                #produce_body
                out
            }

            fn reconstruct(input: &[u8]) -> #parse_result_type<(Self, usize)> {
                #reconstruct_body
            }
        }

        impl tuplewire::schema::TypeTag for #name {
            const TAG: u64 = tuplewire::schema::tag_of(#name_str);
        }

        impl #encode_trait for #name {
            fn write_to<U: #target_trait>(&self, buf: &mut U) -> usize {
                buf.push_all(&#composite_trait::produce(self))
            }
        }

        impl #decode_trait for #name {
            fn parse<P: #parser_trait>(p: &mut P) -> #parse_result_type<Self> {
                #parser_trait::take_composite(p)
            }
        }
    };
    gen.into()
}
