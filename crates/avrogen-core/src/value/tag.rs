use derive_more::Display;

///
/// ValueKind
///
/// Payload-free tag of a `Value`, used in mismatch diagnostics.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
#[remain::sorted]
pub enum ValueKind {
    #[display("boolean")]
    Boolean,
    #[display("bytes")]
    Bytes,
    #[display("date")]
    Date,
    #[display("double")]
    Double,
    #[display("float")]
    Float,
    #[display("int")]
    Int,
    #[display("long")]
    Long,
    #[display("null")]
    Null,
    #[display("string")]
    String,
    #[display("timestamp-micros")]
    TimestampMicros,
    #[display("timestamp-millis")]
    TimestampMillis,
}
