use heck::ToTitleCase;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::visitors::record_visitor::{ColumnKind, RecordVisitor};

pub fn generate(visitor: &RecordVisitor<'_>) -> TokenStream {
    let patch = generate_patch(visitor);
    let trait_impl = generate_trait_impl(visitor);
    let columns = generate_columns(visitor);

    quote! {
        #patch
        #trait_impl
        #columns
    }
}

fn patch_ident(visitor: &RecordVisitor<'_>) -> syn::Ident {
    format_ident!("{}Patch", visitor.name)
}

/// `{Name}Patch`: every non-key field wrapped in `Option`.
fn generate_patch(visitor: &RecordVisitor<'_>) -> TokenStream {
    let vis = visitor.vis;
    let patch = patch_ident(visitor);
    let doc = format!("Partial update for [`{}`]; `None` fields are left as they are.", visitor.name);
    let idents: Vec<_> = visitor.fields.iter().map(|f| &f.ident).collect();
    let types: Vec<_> = visitor.fields.iter().map(|f| &f.ty).collect();

    quote! {
        #[doc = #doc]
        #[derive(Debug, Clone, Default)]
        #vis struct #patch {
            #( pub #idents: ::std::option::Option<#types>, )*
        }

        impl #patch {
            pub fn is_empty(&self) -> bool {
                true #( && self.#idents.is_none() )*
            }
        }
    }
}

fn generate_trait_impl(visitor: &RecordVisitor<'_>) -> TokenStream {
    let name = visitor.name;
    let patch = patch_ident(visitor);
    let key = &visitor.key.ident;
    let key_str = if visitor.key.is_string() {
        quote!(::std::borrow::Cow::Borrowed(self.#key.as_str()))
    } else {
        quote!(::std::borrow::Cow::Owned(::std::string::ToString::to_string(&self.#key)))
    };

    let field_arms = visitor.columns().map(|f| {
        let ident = &f.ident;
        let literal = ident.to_string();
        quote! {
            #literal => ::std::option::Option::Some(
                ::tablebase_store::FieldValue::from(::std::clone::Clone::clone(&self.#ident))
            ),
        }
    });
    let idents: Vec<_> = visitor.fields.iter().map(|f| &f.ident).collect();

    quote! {
        impl ::tablebase_store::TableRecord for #name {
            type Patch = #patch;

            fn key(&self) -> ::tablebase_store::RecordKey {
                ::tablebase_store::RecordKey::new(::std::string::ToString::to_string(&self.#key))
            }

            fn key_str(&self) -> ::std::borrow::Cow<'_, str> {
                #key_str
            }

            fn field(&self, name: &str) -> ::std::option::Option<::tablebase_store::FieldValue> {
                match name {
                    #( #field_arms )*
                    _ => ::std::option::Option::None,
                }
            }

            #[allow(unused_variables)]
            fn apply_patch(&mut self, patch: Self::Patch) {
                #(
                    if let ::std::option::Option::Some(value) = patch.#idents {
                        self.#idents = value;
                    }
                )*
            }
        }
    }
}

/// `{Name}::columns()`, the table layout in declaration order.
fn generate_columns(visitor: &RecordVisitor<'_>) -> TokenStream {
    let name = visitor.name;
    let columns = visitor.columns().map(|f| {
        let field = f.ident.to_string();
        let label = f.label.clone().unwrap_or_else(|| field.to_title_case());
        let kind = match f.kind {
            ColumnKind::Text => quote!(::tablebase_store::FieldKind::Text),
            ColumnKind::Number => quote!(::tablebase_store::FieldKind::Number),
        };
        let required = if f.required {
            quote!(.required())
        } else {
            quote!()
        };
        quote! {
            ::tablebase_store::schema::Column::new(#field, #kind).label(#label) #required
        }
    });

    quote! {
        impl #name {
            pub fn columns() -> ::std::vec::Vec<::tablebase_store::schema::Column> {
                ::std::vec![ #( #columns ),* ]
            }
        }
    }
}
