use crate::{
    node::ResolvedRecord,
    types::{LogicalType, WireType},
};

///
/// Coercion
///
/// How `get`/`put` convert between the Rust field and its `Value`.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Coercion {
    Direct,
    Logical(LogicalType),
}

///
/// DispatchEntry
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DispatchEntry {
    pub position: u32,
    pub property: String,
    pub wire_name: String,
    pub wire: WireType,
    pub coercion: Coercion,
}

///
/// DispatchTable
///
/// Position-keyed view of a resolved record, sorted and gap-preserving:
/// positions absent from the table are out of range.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DispatchTable {
    entries: Vec<DispatchEntry>,
}

impl DispatchTable {
    #[must_use]
    pub fn from_record(record: &ResolvedRecord) -> Self {
        let entries = record
            .fields()
            .iter()
            .map(|f| {
                let wire = f.wire();

                DispatchEntry {
                    position: f.position(),
                    property: f.property().to_string(),
                    wire_name: f.wire_name().to_string(),
                    wire,
                    coercion: wire.logical.map_or(Coercion::Direct, Coercion::Logical),
                }
            })
            .collect();

        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[DispatchEntry] {
        &self.entries
    }

    #[must_use]
    pub fn lookup(&self, position: u32) -> Option<&DispatchEntry> {
        self.entries
            .binary_search_by_key(&position, |e| e.position)
            .ok()
            .map(|i| &self.entries[i])
    }

    pub fn positions(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.iter().map(|e| e.position)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

///
/// TESTS
///
