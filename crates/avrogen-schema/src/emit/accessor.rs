use crate::{
    emit::{
        RecordArtifacts,
        dispatch::{Coercion, DispatchEntry},
    },
    node::ResolvedField,
    types::{logical_tokens, primitive_tokens},
};
use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use syn::{Generics, Ident};

/// Inherent schema constants plus the `IndexedRecord` impl for `ident`.
#[must_use]
pub fn accessor_tokens(artifacts: &RecordArtifacts, ident: &Ident, generics: &Generics) -> TokenStream {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let record = artifacts.record.name();
    let namespace = match artifacts.record.namespace() {
        Some(ns) => quote!(::std::option::Option::Some(#ns)),
        None => quote!(::std::option::Option::None),
    };
    let schema_json = &artifacts.schema_json;
    let fingerprint = Literal::u64_suffixed(artifacts.fingerprint);

    let models = artifacts.record.fields().iter().map(field_model);
    let get_arms = artifacts.dispatch.entries().iter().map(get_arm);
    let put_arms = artifacts.dispatch.entries().iter().map(|e| put_arm(record, e));

    let found = if artifacts.dispatch.is_empty() {
        quote!(let _ = value;)
    } else {
        quote!(let found = value.kind();)
    };

    quote! {
        impl #impl_generics #ident #ty_generics #where_clause {
            /// Avro schema document for this record.
            pub const SCHEMA_JSON: &'static str = #schema_json;

            /// CRC-64-AVRO fingerprint of the schema's parsing canonical form.
            pub const SCHEMA_FINGERPRINT: u64 = #fingerprint;
        }

        #[automatically_derived]
        impl #impl_generics ::avrogen::traits::IndexedRecord for #ident #ty_generics #where_clause {
            const SCHEMA_JSON: &'static str = #schema_json;

            const MODEL: &'static ::avrogen::model::RecordModel = &::avrogen::model::RecordModel {
                name: #record,
                namespace: #namespace,
                fields: &[#(#models),*],
                fingerprint: #fingerprint,
            };

            fn get(
                &self,
                position: usize,
            ) -> ::std::result::Result<::avrogen::value::Value, ::avrogen::error::AccessError> {
                match position {
                    #(#get_arms)*
                    _ => ::std::result::Result::Err(
                        ::avrogen::error::AccessError::out_of_range(#record, position),
                    ),
                }
            }

            fn put(
                &mut self,
                position: usize,
                value: ::avrogen::value::Value,
            ) -> ::std::result::Result<(), ::avrogen::error::AccessError> {
                #found

                match position {
                    #(#put_arms)*
                    _ => {
                        return ::std::result::Result::Err(
                            ::avrogen::error::AccessError::out_of_range(#record, position),
                        );
                    }
                }

                ::std::result::Result::Ok(())
            }
        }
    }
}

fn field_model(field: &ResolvedField) -> TokenStream {
    let position = Literal::u32_unsuffixed(field.position());
    let name = field.wire_name();
    let property = field.property();
    let wire = field.wire();
    let primitive = primitive_tokens(wire.primitive);
    let logical = match wire.logical {
        Some(l) => {
            let l = logical_tokens(l);
            quote!(::std::option::Option::Some(#l))
        }
        None => quote!(::std::option::Option::None),
    };
    let nullable = wire.nullable;

    quote! {
        ::avrogen::model::FieldModel {
            position: #position,
            name: #name,
            property: #property,
            primitive: #primitive,
            logical: #logical,
            nullable: #nullable,
        }
    }
}

fn get_arm(entry: &DispatchEntry) -> TokenStream {
    let position = Literal::u32_unsuffixed(entry.position);
    let prop = format_ident!("{}", entry.property);

    match entry.coercion {
        Coercion::Direct => quote! {
            #position => ::std::result::Result::Ok(
                ::avrogen::traits::FieldValue::to_value(&self.#prop),
            ),
        },
        Coercion::Logical(logical) => {
            let logical = logical_tokens(logical);
            quote! {
                #position => ::std::result::Result::Ok(
                    ::avrogen::traits::LogicalValue::to_logical_value(&self.#prop, #logical),
                ),
            }
        }
    }
}

fn put_arm(record: &str, entry: &DispatchEntry) -> TokenStream {
    let position = Literal::u32_unsuffixed(entry.position);
    let prop = format_ident!("{}", entry.property);
    let wire_name = &entry.wire_name;
    let expected = entry.wire.to_string();

    let assign = match entry.coercion {
        Coercion::Direct => quote! {
            ::avrogen::traits::assign_field(&mut self.#prop, value)
        },
        Coercion::Logical(logical) => {
            let logical = logical_tokens(logical);
            quote! {
                ::avrogen::traits::assign_logical(&mut self.#prop, value, #logical)
            }
        }
    };

    quote! {
        #position => {
            if !#assign {
                return ::std::result::Result::Err(
                    ::avrogen::error::AccessError::type_mismatch(
                        #record,
                        #wire_name,
                        #position,
                        #expected,
                        found,
                    ),
                );
            }
        }
    }
}

///
/// TESTS
///
