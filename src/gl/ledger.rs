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
use crate::util::date::Date;
use log::debug;

/// The label written in the top-left header cell when none is configured.
pub const DEFAULT_PRODUCT_LABEL: &str = "商品名";

/// The central data structure of this system: a sparse product by date
/// matrix of waste quantities.
///
/// Dates are kept apart from the product label, so a date's column index is
/// its 0-based position in `dates`, and every row's `cells` vector is indexed
/// by that same position. On disk, date column `i` sits at field `i + 1`
/// because field 0 holds the product name. All lookups and writes go through
/// `column_for`/`column_or_insert`, so there is one convention only.
///
/// Rows and columns are only ever appended, never reordered or removed.
#[derive(Clone, Debug, PartialEq)]
pub struct Ledger {
	label: String,
	dates: Vec<Date>,
	rows: Vec<Row>,
}

#[derive(Clone, Debug)]
pub struct Row {
	product: String,
	/// May be shorter than the date list; missing trailing cells are empty
	cells: Vec<Option<u64>>,
}

impl Row {
	pub fn new(product: String, cells: Vec<Option<u64>>) -> Self {
		Self { product, cells }
	}

	pub fn product(&self) -> &str {
		&self.product
	}

	pub fn get(&self, column: usize) -> Option<u64> {
		self.cells.get(column).copied().flatten()
	}
}

/// Trailing empty cells carry no information, so a padded row and an
/// unpadded one compare equal.
impl PartialEq for Row {
	fn eq(&self, other: &Self) -> bool {
		fn recorded(cells: &[Option<u64>]) -> &[Option<u64>] {
			let end =
				cells.iter().rposition(Option::is_some).map_or(0, |i| i + 1);
			&cells[..end]
		}

		self.product == other.product
			&& recorded(&self.cells) == recorded(&other.cells)
	}
}

impl Ledger {
	pub fn new(label: &str) -> Self {
		Self {
			label: label.to_string(),
			dates: vec![],
			rows: vec![],
		}
	}

	pub fn dates(&self) -> &[Date] {
		&self.dates
	}

	pub fn rows(&self) -> &[Row] {
		&self.rows
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}

	/// The full header row as it is written to disk.
	pub fn header(&self) -> Vec<String> {
		let mut header = vec![self.label.clone()];
		header.extend(self.dates.iter().map(|d| d.to_string()));
		header
	}

	// ------------
	// -- LOOKUP --
	// ------------

	pub fn column_for(&self, date: &Date) -> Option<usize> {
		self.dates.iter().position(|d| d == date)
	}

	pub fn row_for(&self, product: &str) -> Option<usize> {
		self.rows.iter().position(|r| r.product == product)
	}

	pub fn get(&self, row: usize, column: usize) -> Option<u64> {
		self.rows.get(row).and_then(|r| r.get(column))
	}

	/// The quantity recorded for a product on a date, if any.
	pub fn cell(&self, product: &str, date: &Date) -> Option<u64> {
		let row = self.row_for(product)?;
		let column = self.column_for(date)?;
		self.get(row, column)
	}

	// ------------
	// -- UPSERT --
	// ------------

	/// Index of the date's column, appending a new one on first use.
	pub fn column_or_insert(&mut self, date: Date) -> usize {
		if let Some(column) = self.column_for(&date) {
			return column;
		}
		self.dates.push(date);
		debug!("added column {} for {}", self.dates.len() - 1, date);
		self.dates.len() - 1
	}

	/// Index of the product's row, appending a new one on first use.
	pub fn row_or_insert(&mut self, product: &str) -> usize {
		if let Some(row) = self.row_for(product) {
			return row;
		}
		self.rows.push(Row::new(product.to_string(), vec![]));
		debug!("added row {} for {}", self.rows.len() - 1, product);
		self.rows.len() - 1
	}

	/// Writes a quantity into a cell. The row and column must already exist,
	/// i.e. come from `row_or_insert`/`column_or_insert`.
	pub(crate) fn set(
		&mut self,
		row: usize,
		column: usize,
		quantity: u64,
	) -> Result<(), WasteError> {
		let out_of_range = || {
			WasteError::InvalidInput(format!(
				"no cell at row {}, column {}",
				row, column
			))
		};
		if column >= self.dates.len() {
			return Err(out_of_range());
		}

		let cells =
			&mut self.rows.get_mut(row).ok_or_else(out_of_range)?.cells;
		if cells.len() <= column {
			cells.resize(column + 1, None);
		}
		cells[column] = Some(quantity);
		Ok(())
	}

	// -------------
	// -- LOADING --
	// -------------

	/// Used by the parser, which has already checked for duplicates.
	pub(crate) fn push_date(&mut self, date: Date) {
		self.dates.push(date);
	}

	pub(crate) fn push_row(&mut self, row: Row) {
		self.rows.push(row);
	}
}
