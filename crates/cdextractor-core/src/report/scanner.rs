use super::numbers::{extract_decimal_tokens, leading_value};
use super::schema::{DIVIDER, HEADER_WINDOW, SECTION_GRACE, SECTION_PREFIX, TableSchema};
use std::collections::HashSet;
use tracing::{debug, trace};

/// Values picked from one accepted data row, in schema column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub key: String,
    pub secondary: String,
    pub tertiary: String,
}

/// Line-at-a-time reader for a single table kind.
///
/// Several scanners can be fed the same lines; each keeps its own
/// inside-table flag, header count and seen-key set.
#[derive(Debug)]
pub struct TableScanner<'s> {
    schema: &'s TableSchema,
    in_table: bool,
    lines_since_marker: usize,
    seen_keys: HashSet<String>,
    rows: Vec<TableRow>,
}

impl<'s> TableScanner<'s> {
    pub fn new(schema: &'s TableSchema) -> Self {
        Self {
            schema,
            in_table: false,
            lines_since_marker: 0,
            seen_keys: HashSet::new(),
            rows: Vec::new(),
        }
    }

    pub fn in_table(&self) -> bool {
        self.in_table
    }

    pub fn feed(&mut self, line_number: usize, line: &str) {
        if line.contains(self.schema.marker) {
            debug!(table = %self.schema.kind, line_number, "table marker found");
            self.in_table = true;
            self.lines_since_marker = 0;
            return;
        }

        if !self.in_table {
            return;
        }

        self.lines_since_marker += 1;
        if self.lines_since_marker <= HEADER_WINDOW {
            return;
        }

        if line.trim().is_empty() {
            self.close(line_number, "blank line");
            return;
        }

        if line.contains(self.schema.column_header) || line.contains(DIVIDER) {
            return;
        }

        if line.contains(SECTION_PREFIX) && self.lines_since_marker > SECTION_GRACE {
            self.close(line_number, "next section");
            return;
        }

        self.accept_row(line_number, line);
    }

    pub fn finish(self) -> Vec<TableRow> {
        self.rows
    }

    fn close(&mut self, line_number: usize, reason: &'static str) {
        debug!(
            table = %self.schema.kind,
            line_number,
            reason,
            rows = self.rows.len(),
            "table closed"
        );
        self.in_table = false;
    }

    fn accept_row(&mut self, line_number: usize, line: &str) {
        let tokens = extract_decimal_tokens(line);
        if tokens.len() < self.schema.min_tokens {
            trace!(
                table = %self.schema.kind,
                line_number,
                tokens = tokens.len(),
                "short row skipped"
            );
            return;
        }

        let columns = self.schema.columns;
        let key = tokens[columns.key];

        if !self.seen_keys.insert(key.to_string()) {
            trace!(table = %self.schema.kind, line_number, key, "duplicate key skipped");
            return;
        }

        if let Some(ceiling) = self.schema.max_key_value {
            let within = leading_value(key).is_some_and(|value| value <= ceiling);
            if !within {
                trace!(table = %self.schema.kind, line_number, key, ceiling, "key above ceiling");
                return;
            }
        }

        self.rows.push(TableRow {
            key: key.to_string(),
            secondary: tokens[columns.secondary].to_string(),
            tertiary: tokens[columns.tertiary].to_string(),
        });
    }
}

/// Runs one schema over `lines` and returns its accepted rows.
pub fn scan_table<'a, I>(lines: I, schema: &TableSchema) -> Vec<TableRow>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut scanner = TableScanner::new(schema);
    for (index, line) in lines.into_iter().enumerate() {
        scanner.feed(index + 1, line);
    }
    scanner.finish()
}
