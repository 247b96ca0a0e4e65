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

/// Plain aligned table for terminal output. Column widths account for
/// full-width characters, which take two cells in a terminal.
pub struct Table {
	column_count: usize,
	rows: Vec<Row>,
	right_align: Vec<bool>, // indicates columns by index
}

pub enum Row {
	Header(Vec<String>),
	Data(Vec<String>),
	Separator,
}

impl Table {
	pub fn new(column_count: usize) -> Self {
		Self {
			column_count,
			rows: Vec::new(),
			right_align: vec![false; column_count],
		}
	}

	/// Adds a header row.
	pub fn add_header(&mut self, row: Vec<String>) {
		self.rows.push(Row::Header(row));
	}

	/// Adds a data row.
	pub fn add_row(&mut self, row: Vec<String>) {
		self.rows.push(Row::Data(row));
	}

	/// Adds a full separator row.
	pub fn add_separator(&mut self) {
		self.rows.push(Row::Separator);
	}

	/// Specifies columns that should be right-aligned by index.
	pub fn right_align(&mut self, cols: Vec<usize>) {
		for col in cols {
			self.right_align[col] = true;
		}
	}

	pub fn print(&self) {
		print!("{}", self.render());
	}

	pub fn render(&self) -> String {
		let mut max_widths = vec![0; self.column_count];

		for row in &self.rows {
			if let Row::Data(cells) | Row::Header(cells) = row {
				for (i, value) in cells.iter().enumerate() {
					max_widths[i] = max_widths[i].max(display_width(value));
				}
			}
		}

		let mut out = String::new();
		for row in &self.rows {
			let line = match row {
				Row::Header(cells) => {
					self.render_cells(&max_widths, cells, true)
				},
				Row::Data(cells) => {
					self.render_cells(&max_widths, cells, false)
				},
				Row::Separator => {
					let total_width = max_widths.iter().sum::<usize>()
						+ 3 * self.column_count.saturating_sub(1);
					"-".repeat(total_width)
				},
			};
			out.push_str(line.trim_end());
			out.push('\n');
		}
		out
	}

	fn render_cells(
		&self,
		max_widths: &[usize],
		cells: &[String],
		header: bool,
	) -> String {
		cells
			.iter()
			.enumerate()
			.map(|(i, value)| {
				let padding =
					max_widths[i].saturating_sub(display_width(value));
				if header {
					let left = padding / 2;
					format!(
						"{}{}{}",
						" ".repeat(left),
						value,
						" ".repeat(padding - left)
					)
				} else if self.right_align[i] {
					format!("{}{}", " ".repeat(padding), value)
				} else {
					format!("{}{}", value, " ".repeat(padding))
				}
			})
			.collect::<Vec<_>>()
			.join(if header { " | " } else { "   " })
	}
}

/// Terminal cell width: East Asian wide and full-width characters count
/// double.
fn display_width(s: &str) -> usize {
	s.chars().map(|c| if is_wide(c) { 2 } else { 1 }).sum()
}

/// Covers the scripts product names are written in: Hangul Jamo, CJK
/// radicals and punctuation, kana, CJK ideographs (including the extension
/// planes), Yi, Hangul syllables, compatibility forms, full-width ASCII and
/// signs, plus the common pictographic emoji blocks. Combining marks,
/// zero-width joiners and emoji sequences are not special-cased.
fn is_wide(c: char) -> bool {
	matches!(c as u32,
		0x1100..=0x115F // Hangul Jamo leading consonants
		| 0x2E80..=0x303E // CJK radicals, symbols and punctuation
		| 0x3041..=0x33FF // kana, CJK compatibility
		| 0x3400..=0x4DBF // CJK extension A
		| 0x4E00..=0x9FFF // CJK unified ideographs
		| 0xA000..=0xA4CF // Yi
		| 0xAC00..=0xD7A3 // Hangul syllables
		| 0xF900..=0xFAFF // CJK compatibility ideographs
		| 0xFE30..=0xFE4F // CJK compatibility forms
		| 0xFF00..=0xFF60 // full-width ASCII
		| 0xFFE0..=0xFFE6 // full-width signs
		| 0x1F300..=0x1F64F // pictographs, emoticons
		| 0x1F900..=0x1F9FF // supplemental pictographs
		| 0x20000..=0x3FFFD) // CJK extensions B and later
}
