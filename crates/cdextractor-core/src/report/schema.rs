//! Layout descriptors for the two PLATON listing tables we read.
//!
//! The column indices address the list of decimal tokens found on a data row,
//! not whitespace-separated fields. They are the only place the listing layout
//! is encoded; a PLATON format change is fixed here and nowhere else.

use crate::domain::InteractionKind;

/// Positions of the three retained values within a row's decimal tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSelection {
    pub key: usize,
    pub secondary: usize,
    pub tertiary: usize,
}

impl ColumnSelection {
    pub const fn highest_index(&self) -> usize {
        let mut highest = self.key;
        if self.secondary > highest {
            highest = self.secondary;
        }
        if self.tertiary > highest {
            highest = self.tertiary;
        }
        highest
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableSchema {
    pub kind: InteractionKind,
    /// Substring of the line that opens the table.
    pub marker: &'static str,
    /// Substring identifying the table's own column-header line.
    pub column_header: &'static str,
    /// Rows with fewer decimal tokens than this are ignored.
    pub min_tokens: usize,
    pub columns: ColumnSelection,
    /// Rows whose key value exceeds this are dropped.
    pub max_key_value: Option<f64>,
}

pub const SECTION_PREFIX: &str = "Analysis of";
pub const DIVIDER: &str = "---";

/// Lines after the marker that are always header text.
pub const HEADER_WINDOW: usize = 2;
/// An `Analysis of` line only closes the table once this many lines have passed.
pub const SECTION_GRACE: usize = 3;

pub const RING_TABLE: TableSchema = TableSchema {
    kind: InteractionKind::Ring,
    marker: "Analysis of Short Ring-Interactions with Cg-Cg Distances",
    column_header: "Cg(I) Res(I)",
    min_tokens: 11,
    columns: ColumnSelection {
        key: 1,
        secondary: 8,
        tertiary: 5,
    },
    max_key_value: Some(4.0),
};

pub const PI_TABLE: TableSchema = TableSchema {
    kind: InteractionKind::Pi,
    marker: "Analysis of Y-X...Cg(Pi-Ring) Interactions",
    column_header: "Y--X(I)",
    min_tokens: 11,
    columns: ColumnSelection {
        key: 1,
        secondary: 6,
        tertiary: 8,
    },
    max_key_value: None,
};

pub const fn schema_for(kind: InteractionKind) -> &'static TableSchema {
    match kind {
        InteractionKind::Ring => &RING_TABLE,
        InteractionKind::Pi => &PI_TABLE,
    }
}

#[cfg(test)]
mod tests {
    use super::{PI_TABLE, RING_TABLE, SECTION_PREFIX, schema_for};
    use crate::domain::InteractionKind;

    #[test]
    fn selected_columns_fit_inside_the_minimum_row() {
        for schema in [RING_TABLE, PI_TABLE] {
            assert!(schema.columns.highest_index() < schema.min_tokens);
        }
    }

    #[test]
    fn markers_open_with_the_section_prefix() {
        assert!(RING_TABLE.marker.starts_with(SECTION_PREFIX));
        assert!(PI_TABLE.marker.starts_with(SECTION_PREFIX));
    }

    #[test]
    fn only_the_ring_table_carries_a_key_ceiling() {
        assert_eq!(schema_for(InteractionKind::Ring).max_key_value, Some(4.0));
        assert_eq!(schema_for(InteractionKind::Pi).max_key_value, None);
    }
}
