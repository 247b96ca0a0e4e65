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
use chrono::{Datelike, Local};
use std::cmp::Ordering;
use std::fmt;

/// A calendar date. Always renders as zero-padded `YYYY-MM-DD`, which is the
/// exact form used for ledger column headers.
#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub struct Date {
	year: u32,
	month: u8,
	day: u8,
}

impl Date {
	/// Constructor to parse a string in the "YYYY-mm-dd" format
	pub fn from_str(date_str: &str) -> Result<Date, WasteError> {
		let invalid = || {
			WasteError::InvalidInput(format!(
				"date must be YYYY-MM-DD, got '{}'",
				date_str
			))
		};

		let parts: Vec<&str> = date_str.trim().split('-').collect();
		if parts.len() != 3 {
			return Err(invalid());
		}

		let year = parts[0].parse::<u32>().map_err(|_| invalid())?;
		let month = parts[1].parse::<u8>().map_err(|_| invalid())?;
		let day = parts[2].parse::<u8>().map_err(|_| invalid())?;

		if !(1..=9999).contains(&year) || !Date::is_valid_date(year, month, day)
		{
			return Err(WasteError::InvalidInput(format!(
				"no such calendar date: {}",
				date_str
			)));
		}

		Ok(Date { year, month, day })
	}

	/// The local calendar date right now.
	pub fn today() -> Date {
		let now = Local::now().date_naive();
		Date {
			year: now.year() as u32,
			month: now.month() as u8,
			day: now.day() as u8,
		}
	}

	fn is_leap_year(year: u32) -> bool {
		(year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
	}

	fn days_in_month(year: u32, month: u8) -> u8 {
		match month {
			1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
			4 | 6 | 9 | 11 => 30,
			2 => {
				if Date::is_leap_year(year) {
					29
				} else {
					28
				}
			},
			_ => 0, // Invalid month
		}
	}

	fn is_valid_date(year: u32, month: u8, day: u8) -> bool {
		if !(1..=12).contains(&month) {
			return false;
		}
		if day < 1 || day > Date::days_in_month(year, month) {
			return false;
		}
		true
	}
}

impl PartialOrd for Date {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Date {
	fn cmp(&self, other: &Self) -> Ordering {
		(self.year, self.month, self.day).cmp(&(
			other.year,
			other.month,
			other.day,
		))
	}
}

impl fmt::Display for Date {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
	}
}
