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
use thiserror::Error;

/// Every failure the waste ledger can report. None of these leave the store
/// unusable; each operation reloads from disk, so the next call starts clean.
#[derive(Debug, Error)]
pub enum WasteError {
	/// The catalog could not be read. Recoverable: the session continues with
	/// an empty catalog.
	#[error("catalog unavailable: {0}")]
	CatalogUnavailable(String),

	/// The ledger file exists but is not the expected table shape.
	#[error("ledger file is corrupt: {0}")]
	LedgerCorrupt(String),

	/// The save step failed; the previously committed file is unchanged.
	#[error("failed to write ledger: {0}")]
	LedgerWriteFailed(String),

	#[error("invalid input: {0}")]
	InvalidInput(String),
}
