//! Postal code enrichment from the city lookup.

use crate::input::DataTable;
use crate::postal::PostalLookup;
use crate::schema::columns;

/// Set the postal code of every row from its city. Returns
/// `(rows with a code, rows without)`.
pub fn enrich_postal_codes(table: &mut DataTable, lookup: &PostalLookup) -> (usize, usize) {
    let city_index = table.column_index(columns::CITY);
    let postal_index = table.ensure_column(columns::POSTAL_CODE);

    let mut matched = 0;
    for row in &mut table.rows {
        let code = city_index
            .and_then(|i| lookup.postal_code(&row[i]))
            .unwrap_or_default()
            .to_string();
        if !code.is_empty() {
            matched += 1;
        }
        row[postal_index] = code;
    }

    (matched, table.row_count() - matched)
}
