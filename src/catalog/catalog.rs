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
use crate::util::normalize::{matches, normalize};
use log::debug;
use std::path::Path;

/// The read-only list of known product names, in the order they appear in
/// the catalog file. Loaded once per session and then only searched.
#[derive(Debug, Default)]
pub struct Catalog {
	products: Vec<String>,
}

/// How a free-text product query resolved against the catalog.
#[derive(Debug, PartialEq)]
pub enum Resolution {
	Found(String),
	Ambiguous(Vec<String>),
	NotFound,
}

impl Catalog {
	pub fn from_products(products: Vec<String>) -> Self {
		Self { products }
	}

	/// Reads the catalog CSV, taking names from the column headed `label`.
	/// Blank names are skipped; repeated names keep their first position.
	pub fn load(path: &Path, label: &str) -> Result<Self, WasteError> {
		let unavailable =
			|e: csv::Error| WasteError::CatalogUnavailable(e.to_string());

		let mut reader = csv::ReaderBuilder::new()
			.has_headers(true)
			.flexible(true)
			.trim(csv::Trim::All)
			.from_path(path)
			.map_err(unavailable)?;

		let column = reader
			.headers()
			.map_err(unavailable)?
			.iter()
			.position(|h| h == label)
			.ok_or_else(|| {
				WasteError::CatalogUnavailable(format!(
					"{} has no '{}' column",
					path.display(),
					label
				))
			})?;

		let mut products: Vec<String> = vec![];
		for record in reader.records() {
			let record = record.map_err(unavailable)?;
			match record.get(column) {
				Some(name) if !name.is_empty() => {
					if !products.iter().any(|p| p == name) {
						products.push(name.to_string());
					}
				},
				_ => continue,
			}
		}

		debug!("loaded {} products from {}", products.len(), path.display());
		Ok(Self { products })
	}

	/// Like `load`, but a missing or unreadable catalog degrades to an empty
	/// one. The error is handed back for the caller to surface.
	pub fn load_or_empty(
		path: &Path,
		label: &str,
	) -> (Self, Option<WasteError>) {
		match Catalog::load(path, label) {
			Ok(catalog) => (catalog, None),
			Err(e) => (Catalog::default(), Some(e)),
		}
	}

	/// Products whose normalized name contains the normalized query, in
	/// catalog order.
	pub fn search(&self, query: &str) -> Vec<&str> {
		self.products
			.iter()
			.filter(|p| matches(query, p))
			.map(|p| p.as_str())
			.collect()
	}

	/// Picks a single product for a query. An exact name, or a name that is
	/// identical after normalization, wins outright; otherwise the query has
	/// to match exactly one product by substring.
	pub fn resolve(&self, query: &str) -> Resolution {
		let query = query.trim();
		if let Some(exact) = self.products.iter().find(|p| *p == query) {
			return Resolution::Found(exact.clone());
		}

		let normalized = normalize(query);
		if let Some(equivalent) =
			self.products.iter().find(|p| normalize(p) == normalized)
		{
			return Resolution::Found(equivalent.clone());
		}

		let mut found = self.search(query);
		match found.len() {
			0 => Resolution::NotFound,
			1 => Resolution::Found(found.remove(0).to_string()),
			_ => Resolution::Ambiguous(
				found.into_iter().map(|p| p.to_string()).collect(),
			),
		}
	}
}
