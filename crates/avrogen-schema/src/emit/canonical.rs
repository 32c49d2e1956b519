use crate::emit::schema::{FieldType, SchemaDocument, TypeRef};
use serde_json::Value as JsonValue;

/// Initial value and polynomial of the CRC-64-AVRO Rabin fingerprint.
pub const EMPTY: u64 = 0xc15d_213a_a4d7_a795;

const TABLE: [u64; 256] = table();

const fn table() -> [u64; 256] {
    let mut table = [0u64; 256];
    let mut i = 0;

    while i < 256 {
        let mut fp = i as u64;
        let mut j = 0;
        while j < 8 {
            fp = (fp >> 1) ^ (EMPTY & 0u64.wrapping_sub(fp & 1));
            j += 1;
        }
        table[i] = fp;
        i += 1;
    }

    table
}

/// CRC-64-AVRO over raw bytes.
#[must_use]
pub fn fingerprint64(bytes: &[u8]) -> u64 {
    let mut fp = EMPTY;
    for &b in bytes {
        #[expect(clippy::cast_possible_truncation)]
        let index = ((fp ^ u64::from(b)) & 0xff) as usize;
        fp = (fp >> 8) ^ TABLE[index];
    }

    fp
}

/// Parsing Canonical Form: full name, `type` and `fields` only, in that
/// key order, with logical annotations reduced to their primitive.
#[must_use]
pub fn canonical_form(document: &SchemaDocument) -> String {
    let mut out = String::new();

    out.push_str(r#"{"name":"#);
    out.push_str(&quoted(&document.full_name()));
    out.push_str(r#","type":"record","fields":["#);

    for (i, field) in document.fields.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(r#"{"name":"#);
        out.push_str(&quoted(&field.name));
        out.push_str(r#","type":"#);
        push_type(&mut out, &field.ty);
        out.push('}');
    }

    out.push_str("]}");
    out
}

/// Fingerprint of the document's canonical form.
#[must_use]
pub fn fingerprint(document: &SchemaDocument) -> u64 {
    fingerprint64(canonical_form(document).as_bytes())
}

fn push_type(out: &mut String, ty: &FieldType) {
    match ty {
        FieldType::Single(single) => out.push_str(&type_ref(single)),
        FieldType::Union(branches) => {
            out.push('[');
            for (i, branch) in branches.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&type_ref(branch));
            }
            out.push(']');
        }
    }
}

fn type_ref(ty: &TypeRef) -> String {
    quoted(ty.primitive_name())
}

fn quoted(s: &str) -> String {
    JsonValue::String(s.to_string()).to_string()
}

///
/// TESTS
///
