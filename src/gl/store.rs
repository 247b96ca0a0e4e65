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
use crate::gl::ledger::Ledger;
use crate::parsing::parser::{parse_ledger, render_ledger};
use crate::util::date::Date;
use log::{debug, info};

/// Where the ledger's bytes live. `read` yields `None` when nothing has been
/// saved yet. `commit` must replace the whole content or leave the previous
/// content untouched.
pub trait LedgerFile {
	fn read(&self) -> Result<Option<Vec<u8>>, WasteError>;
	fn commit(&self, contents: &[u8]) -> Result<(), WasteError>;
}

/// What the caller needs to know before recording: whether the product
/// already has a value for the day, and what it is.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EntryInfo {
	pub entry_count: usize,
	pub previous_quantity: u64,
}

/// Owns the persisted ledger. Nothing is cached between calls: every
/// operation loads the file, works on the in-memory table, and (for
/// `record_waste`) writes the whole table back.
pub struct LedgerStore<F: LedgerFile> {
	file: F,
	label: String,
}

impl<F: LedgerFile> LedgerStore<F> {
	pub fn new(file: F, label: &str) -> Self {
		Self {
			file,
			label: label.to_string(),
		}
	}

	/// Upserts one cell. With `merge`, the quantity is added to whatever is
	/// already recorded for the product on that date; otherwise it replaces
	/// it. Returns the quantity now stored.
	pub fn record_waste(
		&self,
		product: &str,
		date: &Date,
		quantity: i64,
		merge: bool,
	) -> Result<u64, WasteError> {
		let product = product.trim();
		if product.is_empty() {
			return Err(WasteError::InvalidInput(
				"product name is empty".to_string(),
			));
		}
		let quantity = u64::try_from(quantity).map_err(|_| {
			WasteError::InvalidInput(format!(
				"quantity must not be negative, got {}",
				quantity
			))
		})?;

		let mut ledger = self.load()?;

		let column = ledger.column_or_insert(*date);
		let row = ledger.row_or_insert(product);
		let existing = ledger.get(row, column).unwrap_or(0);

		let new_quantity = if merge {
			existing.checked_add(quantity).ok_or_else(|| {
				WasteError::InvalidInput(format!(
					"{} + {} overflows",
					existing, quantity
				))
			})?
		} else {
			quantity
		};

		ledger.set(row, column, new_quantity)?;
		self.file.commit(&render_ledger(&ledger)?)?;

		info!(
			"recorded {} for {} on {} (was {}, merge: {})",
			new_quantity, product, date, existing, merge
		);
		Ok(new_quantity)
	}

	/// Looks at the single (product, date) cell.
	pub fn todays_entry_info(
		&self,
		product: &str,
		date: &Date,
	) -> Result<EntryInfo, WasteError> {
		let ledger = self.load()?;
		Ok(match ledger.cell(product.trim(), date) {
			Some(previous_quantity) => EntryInfo {
				entry_count: 1,
				previous_quantity,
			},
			None => EntryInfo::default(),
		})
	}

	/// The whole table as currently saved.
	pub fn full_ledger(&self) -> Result<Ledger, WasteError> {
		self.load()
	}

	fn load(&self) -> Result<Ledger, WasteError> {
		match self.file.read()? {
			Some(contents) => parse_ledger(&contents, &self.label),
			None => {
				debug!("no ledger saved yet, starting empty");
				Ok(Ledger::new(&self.label))
			},
		}
	}
}
