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
use std::fs;
use std::path::{Path, PathBuf};
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::{tempdir, TempDir};

/// A scratch directory with an empty config file and the fixture catalog.
struct Workspace {
	dir: TempDir,
}

impl Workspace {
	fn new() -> Self {
		let dir = tempdir().expect("Failed to create temp dir");
		fs::write(dir.path().join("config.toml"), "")
			.expect("Failed to write config");
		Self { dir }
	}

	fn ledger(&self) -> PathBuf {
		self.dir.path().join("waste_log.csv")
	}

	fn path_arg(&self, name: &str) -> String {
		self.dir.path().join(name).display().to_string()
	}

	fn run(&self, args: &[&str]) -> Output {
		self.run_with_input(args, "")
	}

	fn run_with_input(&self, args: &[&str], input: &str) -> Output {
		let catalog = Path::new(env!("CARGO_MANIFEST_DIR"))
			.join("tests/test_data/products.csv")
			.display()
			.to_string();
		let ledger = self.ledger().display().to_string();
		let config = self.path_arg("config.toml");

		let mut child = Command::new(env!("CARGO_BIN_EXE_wastelog"))
			.args([
				"--config",
				config.as_str(),
				"-f",
				ledger.as_str(),
				"--catalog",
				catalog.as_str(),
			])
			.args(args)
			.stdin(Stdio::piped())
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.spawn()
			.expect("Failed to execute process");

		child
			.stdin
			.take()
			.expect("stdin is piped")
			.write_all(input.as_bytes())
			.expect("Failed to write stdin");

		child.wait_with_output().expect("Failed to wait on process")
	}
}

fn stdout(output: &Output) -> String {
	assert!(
		output.status.success(),
		"command failed: {}",
		String::from_utf8_lossy(&output.stderr)
	);
	String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_integration_first_record_creates_ledger() {
	let ws = Workspace::new();
	assert!(!ws.ledger().exists());

	let out = ws.run(&["record", "サーモン", "5", "-d", "2024-01-01"]);
	assert_eq!(stdout(&out), "Recorded 5 for サーモン on 2024-01-01");
	assert_eq!(
		fs::read_to_string(ws.ledger()).unwrap(),
		"商品名,2024-01-01\nサーモン,5\n"
	);
}

#[test]
fn test_integration_search() {
	let ws = Workspace::new();

	assert_eq!(stdout(&ws.run(&["search", "さ"])), "サーモン\nアサリ");
	assert_eq!(stdout(&ws.run(&["search", "SALE"])), "Ｓａｌｅ食パン");
	assert_eq!(
		stdout(&ws.run(&["search", "まぐろ"])),
		"No matching products"
	);
}

#[test]
fn test_integration_resolves_by_normalized_name() {
	let ws = Workspace::new();

	let out = ws.run(&["record", "あさり", "2", "-d", "2024-01-01"]);
	assert_eq!(stdout(&out), "Recorded 2 for アサリ on 2024-01-01");

	let out = ws.run(&["record", "さ", "2", "-d", "2024-01-01"]);
	assert!(!out.status.success(), "ambiguous query unexpectedly succeeded");

	let out = ws.run(&["record", "まぐろ", "2", "-d", "2024-01-01"]);
	assert!(!out.status.success(), "unknown product unexpectedly succeeded");

	let out =
		ws.run(&["record", "まぐろ", "2", "-d", "2024-01-01", "--exact"]);
	assert_eq!(stdout(&out), "Recorded 2 for まぐろ on 2024-01-01");
}

#[test]
fn test_integration_same_day_merge_and_replace() {
	let ws = Workspace::new();
	let day = "2024-01-01";

	let out = ws.run(&["info", "サーモン", "-d", day]);
	assert_eq!(stdout(&out), "サーモン on 2024-01-01: entries: 0, recorded: 0");

	stdout(&ws.run(&["record", "サーモン", "3", "-d", day]));
	let out = ws.run(&["record", "サーモン", "4", "--merge", "-d", day]);
	assert_eq!(stdout(&out), "Recorded 7 for サーモン on 2024-01-01");

	let out = ws.run(&["record", "サーモン", "1", "--replace", "-d", day]);
	assert_eq!(stdout(&out), "Recorded 1 for サーモン on 2024-01-01");

	let out = ws.run(&["info", "サーモン", "-d", day]);
	assert_eq!(stdout(&out), "サーモン on 2024-01-01: entries: 1, recorded: 1");
}

#[test]
fn test_integration_prompt_decides_merge() {
	let ws = Workspace::new();
	let record = ["record", "サーモン", "3", "-d", "2024-01-01"];

	stdout(&ws.run(&record));
	let out = ws.run_with_input(&record, "y\n");
	assert!(stdout(&out).ends_with("Recorded 6 for サーモン on 2024-01-01"));

	// no answer keeps the default of replacing
	let out = ws.run_with_input(&record, "");
	assert!(stdout(&out).ends_with("Recorded 3 for サーモン on 2024-01-01"));
}

#[test]
fn test_integration_show() {
	let ws = Workspace::new();
	assert_eq!(stdout(&ws.run(&["show"])), "No data");

	stdout(&ws.run(&["record", "サーモン", "0", "-d", "2024-01-01"]));
	stdout(&ws.run(&["record", "アサリ", "12", "-d", "2024-01-02"]));

	assert_eq!(
		stdout(&ws.run(&["show"])),
		"商品名  | 2024-01-01 | 2024-01-02\n\
		 ----------------------------------\n\
		 サーモン            0\n\
		 アサリ                          12"
	);
}

#[test]
fn test_integration_should_fail() {
	let ws = Workspace::new();

	for args in [
		vec!["record", "サーモン", "-1"],
		vec!["record", "サーモン", "1", "-d", "2024-02-30"],
		vec!["record", "サーモン", "1", "--merge", "--replace"],
		vec!["info", "サーモン", "-d", "yesterday"],
	] {
		let out = ws.run(&args);
		assert!(!out.status.success(), "{:?} unexpectedly succeeded!", args);
	}
	assert!(!ws.ledger().exists());
}

#[test]
fn test_integration_negative_quantity_is_invalid_input() {
	let ws = Workspace::new();

	let out = ws.run(&["record", "サーモン", "-3", "-d", "2024-01-01"]);
	assert!(!out.status.success(), "negative quantity unexpectedly accepted");
	assert!(String::from_utf8_lossy(&out.stderr)
		.contains("invalid input: quantity must not be negative"));
	assert!(!ws.ledger().exists());
}

#[test]
fn test_integration_corrupt_ledger_is_left_alone() {
	let ws = Workspace::new();
	let corrupt = "商品名,2024-01-01\nサーモン,many\n";
	fs::write(ws.ledger(), corrupt).unwrap();

	let out = ws.run(&["record", "サーモン", "1", "-d", "2024-01-01"]);
	assert!(!out.status.success(), "corrupt ledger unexpectedly accepted");
	assert_eq!(fs::read_to_string(ws.ledger()).unwrap(), corrupt);
}

#[test]
fn test_integration_missing_catalog_still_records() {
	let ws = Workspace::new();
	let ledger = ws.ledger().display().to_string();
	let config = ws.path_arg("config.toml");
	let missing = ws.path_arg("no_products.csv");

	let out = Command::new(env!("CARGO_BIN_EXE_wastelog"))
		.args([
			"--config",
			config.as_str(),
			"-f",
			ledger.as_str(),
			"--catalog",
			missing.as_str(),
		])
		.args(["search", "さ"])
		.env("RUST_LOG", "error")
		.output()
		.expect("Failed to execute process");
	assert_eq!(stdout(&out), "No matching products");
	// reported directly, not through the logger, so RUST_LOG can't hide it
	assert!(String::from_utf8_lossy(&out.stderr)
		.contains("Warning: catalog unavailable"));

	let out = Command::new(env!("CARGO_BIN_EXE_wastelog"))
		.args([
			"--config",
			config.as_str(),
			"-f",
			ledger.as_str(),
			"--catalog",
			missing.as_str(),
		])
		.args(["record", "サーモン", "2", "-d", "2024-01-01", "--exact"])
		.output()
		.expect("Failed to execute process");
	assert_eq!(stdout(&out), "Recorded 2 for サーモン on 2024-01-01");
}
