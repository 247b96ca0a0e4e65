/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::error::WasteError;
use crate::gl::ledger::{Ledger, Row};
use crate::util::date::Date;
use std::collections::HashSet;

/// Reads a ledger table from CSV. The first record is the header: the
/// product label, then one canonical `YYYY-MM-DD` date per column. Short
/// rows are padded with empty cells; anything else that does not fit the
/// shape is reported as corrupt.
pub fn parse_ledger(contents: &[u8], label: &str) -> Result<Ledger, WasteError> {
	let mut reader = csv::ReaderBuilder::new()
		.has_headers(false)
		.flexible(true)
		.from_reader(contents);

	let mut records = reader.records();
	let mut ledger = Ledger::new(label);

	let header = match records.next() {
		Some(header) => header.map_err(corrupt)?,
		// a zero-byte file is an empty ledger
		None => return Ok(ledger),
	};

	match header.get(0) {
		Some(first) if first.trim_start_matches('\u{feff}') == label => {},
		other => {
			return Err(WasteError::LedgerCorrupt(format!(
				"expected '{}' in the first header cell, found '{}'",
				label,
				other.unwrap_or_default()
			)))
		},
	}

	let mut seen_dates = HashSet::new();
	for field in header.iter().skip(1) {
		let date = Date::from_str(field).map_err(|_| {
			WasteError::LedgerCorrupt(format!("bad date header '{}'", field))
		})?;
		if date.to_string() != field {
			return Err(WasteError::LedgerCorrupt(format!(
				"date header '{}' is not in YYYY-MM-DD form",
				field
			)));
		}
		if !seen_dates.insert(date) {
			return Err(WasteError::LedgerCorrupt(format!(
				"date {} appears twice in the header",
				field
			)));
		}
		ledger.push_date(date);
	}

	let width = header.len();
	let mut seen_products = HashSet::new();
	for (i, record) in records.enumerate() {
		let record = record.map_err(corrupt)?;
		let line = i + 2;

		if record.len() > width {
			return Err(WasteError::LedgerCorrupt(format!(
				"line {} has {} fields but the header has {}",
				line,
				record.len(),
				width
			)));
		}
		if record.iter().all(|f| f.is_empty()) {
			continue;
		}

		let product = record.get(0).unwrap_or_default();
		if product.is_empty() {
			return Err(WasteError::LedgerCorrupt(format!(
				"line {} has no product name",
				line
			)));
		}
		if !seen_products.insert(product.to_string()) {
			return Err(WasteError::LedgerCorrupt(format!(
				"product '{}' appears on more than one line",
				product
			)));
		}

		let mut cells = Vec::with_capacity(width - 1);
		for field in record.iter().skip(1) {
			let cell = match field.trim() {
				"" => None,
				value => Some(value.parse::<u64>().map_err(|_| {
					WasteError::LedgerCorrupt(format!(
						"line {}: '{}' is not a quantity",
						line, value
					))
				})?),
			};
			cells.push(cell);
		}

		ledger.push_row(Row::new(product.to_string(), cells));
	}

	Ok(ledger)
}

/// Renders the whole ledger as CSV, every row padded to the header width.
pub fn render_ledger(ledger: &Ledger) -> Result<Vec<u8>, WasteError> {
	let mut writer = csv::Writer::from_writer(vec![]);
	let width = ledger.dates().len();

	writer.write_record(ledger.header()).map_err(write_failed)?;

	for row in ledger.rows() {
		let mut record = Vec::with_capacity(width + 1);
		record.push(row.product().to_string());
		for column in 0..width {
			record.push(
				row.get(column).map(|q| q.to_string()).unwrap_or_default(),
			);
		}
		writer.write_record(&record).map_err(write_failed)?;
	}

	writer
		.into_inner()
		.map_err(|e| WasteError::LedgerWriteFailed(e.to_string()))
}

fn corrupt(e: csv::Error) -> WasteError {
	WasteError::LedgerCorrupt(e.to_string())
}

fn write_failed(e: csv::Error) -> WasteError {
	WasteError::LedgerWriteFailed(e.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::gl::ledger::DEFAULT_PRODUCT_LABEL;

	fn parse(s: &str) -> Result<Ledger, WasteError> {
		parse_ledger(s.as_bytes(), DEFAULT_PRODUCT_LABEL)
	}

	fn date(s: &str) -> Date {
		Date::from_str(s).unwrap()
	}

	#[test]
	fn test_parse_sparse_table() {
		let ledger =
			parse("商品名,2024-01-01,2024-01-02\nサーモン,3,\nアサリ,,7\n")
				.unwrap();

		assert_eq!(ledger.header(), vec!["商品名", "2024-01-01", "2024-01-02"]);
		assert_eq!(ledger.cell("サーモン", &date("2024-01-01")), Some(3));
		assert_eq!(ledger.cell("サーモン", &date("2024-01-02")), None);
		assert_eq!(ledger.cell("アサリ", &date("2024-01-02")), Some(7));
	}

	#[test]
	fn test_short_rows_are_padded() {
		let ledger =
			parse("商品名,2024-01-01,2024-01-02\nサーモン\nアサリ,2\n").unwrap();

		assert_eq!(ledger.rows().len(), 2);
		assert_eq!(ledger.cell("サーモン", &date("2024-01-01")), None);
		assert_eq!(ledger.cell("アサリ", &date("2024-01-01")), Some(2));
		assert_eq!(
			String::from_utf8(render_ledger(&ledger).unwrap()).unwrap(),
			"商品名,2024-01-01,2024-01-02\nサーモン,,\nアサリ,2,\n"
		);
	}

	#[test]
	fn test_empty_input() {
		let ledger = parse("").unwrap();
		assert!(ledger.is_empty());
		assert!(ledger.dates().is_empty());
	}

	#[test]
	fn test_corrupt_shapes() {
		let cases = [
			"name,2024-01-01\n",
			"商品名,yesterday\n",
			"商品名,2024-1-1\n",
			"商品名,2024-01-01,2024-01-01\n",
			"商品名,2024-01-01\nサーモン,1,2\n",
			"商品名,2024-01-01\nサーモン,three\n",
			"商品名,2024-01-01\nサーモン,-1\n",
			"商品名,2024-01-01\nサーモン,1\nサーモン,2\n",
			"商品名,2024-01-01\n,4\n",
		];
		for case in cases {
			assert!(
				matches!(parse(case), Err(WasteError::LedgerCorrupt(_))),
				"{:?} should be corrupt",
				case
			);
		}
	}

	#[test]
	fn test_render_then_parse() {
		let mut ledger = Ledger::new(DEFAULT_PRODUCT_LABEL);
		for (product, day, quantity) in [
			("サーモン", "2024-03-01", 2),
			("塩パン, 大", "2024-03-02", 0),
			("アサリ", "2024-03-01", 11),
		] {
			let column = ledger.column_or_insert(date(day));
			let row = ledger.row_or_insert(product);
			ledger.set(row, column, quantity).unwrap();
		}

		let bytes = render_ledger(&ledger).unwrap();
		assert_eq!(parse_ledger(&bytes, DEFAULT_PRODUCT_LABEL).unwrap(), ledger);
	}
}
