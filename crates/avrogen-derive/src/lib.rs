use proc_macro::TokenStream;

mod record;

/// Implements `IndexedRecord` and the `SCHEMA_JSON` / `SCHEMA_FINGERPRINT`
/// constants for a struct with named fields.
///
/// ```ignore
/// #[derive(AvroRecord)]
/// #[avro_record(namespace = "Fake.Namespace")]
/// pub struct Reading {
///     #[avro(position = 0, name = "PropertyID")]
///     pub property_id: Option<String>,
///
///     #[avro(position = 1, underlying = "long", logical = "timestamp-micros")]
///     pub hour: Option<OffsetDateTime>,
/// }
/// ```
///
/// Fields without `#[avro(..)]` are not part of the record.
#[proc_macro_derive(AvroRecord, attributes(avro_record, avro))]
pub fn derive_avro_record(input: TokenStream) -> TokenStream {
    record::derive_avro_record(input.into()).into()
}
