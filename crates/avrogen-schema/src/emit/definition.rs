use crate::emit::{RecordArtifacts, accessor::accessor_tokens};
use proc_macro2::TokenStream;
use quote::quote;
use syn::{Generics, Ident};

/// A complete struct definition plus its accessors, for records that come
/// from a descriptor table rather than Rust source.
pub fn definition_tokens(artifacts: &RecordArtifacts) -> syn::Result<TokenStream> {
    let record = &artifacts.record;
    let ident = syn::parse_str::<Ident>(record.name())?;

    let mut fields = Vec::with_capacity(record.fields().len());
    for field in record.fields() {
        let prop = syn::parse_str::<Ident>(field.property())?;
        let ty = field.declared().type_tokens()?;
        let doc = format!(
            " Position {}, written as `{}` ({}).",
            field.position(),
            field.wire_name(),
            field.wire()
        );

        fields.push(quote! {
            #[doc = #doc]
            pub #prop: #ty
        });
    }

    let default = record
        .fields()
        .iter()
        .all(|f| f.declared().has_default())
        .then(|| quote!(Default,));
    let doc = format!(" Avro record `{}`.", record.full_name());
    let accessors = accessor_tokens(artifacts, &ident, &Generics::default());

    Ok(quote! {
        #[doc = #doc]
        #[derive(Clone, Debug, #default PartialEq)]
        pub struct #ident {
            #(#fields,)*
        }

        #accessors
    })
}

///
/// TESTS
///
