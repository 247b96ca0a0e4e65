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
use serde::Deserialize;

/// Contents of `config.toml`. Every key is optional; command line flags take
/// precedence over whatever is set here.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
	/// Path to the waste ledger CSV
	pub ledger_file: Option<String>,

	/// Path to the product catalog CSV
	pub catalog_file: Option<String>,

	/// Header of the product name column, in both the catalog and the ledger
	pub product_label: Option<String>,
}
