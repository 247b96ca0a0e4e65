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

use unicode_normalization::UnicodeNormalization;

const KATAKANA: &str = "アイウエオカキクケコサシスセソタチツテトナニヌネノ\
	ハヒフヘホマミムメモヤユヨラリルレロワヲン";
const HIRAGANA: &str = "あいうえおかきくけこさしすせそたちつてとなにぬねの\
	はひふへほまみむめもやゆよらりるれろわをん";

/// Canonical form for product search: NFKC (full-width to half-width, and
/// half-width kana to full-width), lowercase, then the plain katakana gojūon
/// folded onto hiragana. Voiced and small kana are left alone.
pub fn normalize(text: &str) -> String {
	text.nfkc()
		.collect::<String>()
		.to_lowercase()
		.chars()
		.map(fold_kana)
		.collect()
}

/// Whether `query` is contained in `candidate` once both are normalized.
/// An empty query never matches.
pub fn matches(query: &str, candidate: &str) -> bool {
	let query = normalize(query.trim());
	!query.is_empty() && normalize(candidate).contains(&query)
}

fn fold_kana(c: char) -> char {
	KATAKANA
		.chars()
		.position(|k| k == c)
		.and_then(|i| HIRAGANA.chars().nth(i))
		.unwrap_or(c)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_tables_line_up() {
		assert_eq!(KATAKANA.chars().count(), 46);
		assert_eq!(HIRAGANA.chars().count(), 46);
	}

	#[test]
	fn test_katakana_folds_to_hiragana() {
		assert_eq!(normalize("アサリ"), normalize("あさり"));
		assert_eq!(normalize("アサリ"), "あさり");
	}

	#[test]
	fn test_width_and_case_folding() {
		assert_eq!(normalize("Ｓａｌｅ"), normalize("sale"));
		assert_eq!(normalize("ＡＢＣ１２３"), "abc123");
	}

	#[test]
	fn test_half_width_katakana() {
		// NFKC widens these first, then they fold like any other katakana
		assert_eq!(normalize("ｻｹ"), "さけ");
	}

	#[test]
	fn test_outside_table_passes_through() {
		// voiced kana and the long vowel mark are outside the fixed table
		assert_eq!(normalize("ガー"), "ガー");
		assert_eq!(normalize("鮭フライ"), "鮭ふらい");
	}

	#[test]
	fn test_substring_match() {
		assert!(matches("さ", "サーモン"));
		assert!(matches("もん", "サーモン"));
		assert!(matches("SALE", "ｓａｌｅ品"));
		assert!(!matches("まぐろ", "サーモン"));
	}

	#[test]
	fn test_empty_query_matches_nothing() {
		assert!(!matches("", "サーモン"));
		assert!(!matches("   ", "サーモン"));
	}
}
