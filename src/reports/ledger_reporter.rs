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
use crate::gl::ledger::Ledger;
use crate::reports::table::Table;

pub struct LedgerReporter {
	ledger: Ledger,
}

impl LedgerReporter {
	pub fn new(ledger: Ledger) -> Self {
		Self { ledger }
	}

	/// The whole ledger as a table: one line per product, one column per
	/// date in the order the dates were first recorded. Empty cells stay
	/// blank rather than showing zero, since zero is a real entry.
	pub fn render(&self) -> String {
		if self.ledger.is_empty() {
			return "No data\n".to_string();
		}

		let header = self.ledger.header();
		let columns = self.ledger.dates().len();

		let mut table = Table::new(header.len());
		table.right_align((1..header.len()).collect());
		table.add_header(header);
		table.add_separator();

		for row in self.ledger.rows() {
			let mut cells = vec![row.product().to_string()];
			cells.extend(
				(0..columns).map(|c| {
					row.get(c).map(|q| q.to_string()).unwrap_or_default()
				}),
			);
			table.add_row(cells);
		}

		table.render()
	}

	pub fn print(&self) {
		print!("{}", self.render());
	}
}
