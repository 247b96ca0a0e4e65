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
use crate::catalog::catalog::{Catalog, Resolution};
use crate::config::config_file::Config;
use crate::gl::ledger::DEFAULT_PRODUCT_LABEL;
use crate::gl::store::LedgerStore;
use crate::parsing::filesystem::{DiskFile, Filesystem};
use crate::reports::ledger_reporter::LedgerReporter;
use crate::util::date::Date;
use anyhow::{bail, Error};
use clap::{Parser, Subcommand};
use std::cell::OnceCell;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

mod catalog;
mod config;
mod error;
mod gl;
mod parsing;
mod reports;
mod util;

const DEFAULT_LEDGER_FILE: &str = "waste_log.csv";
const DEFAULT_CATALOG_FILE: &str = "products.csv";

#[derive(Parser)]
#[command(name = "wastelog", version, about = "Daily food-waste ledger")]
struct Cli {
	/// The command to execute
	#[command(subcommand)]
	command: Directive,

	// -----------
	// -- FLAGS --
	// -----------
	/// Ledger file (default: waste_log.csv)
	#[arg(short, long, global = true)]
	file: Option<String>,

	/// Product catalog file (default: products.csv)
	#[arg(long, global = true)]
	catalog: Option<String>,

	/// Custom config file location (default: ~/.config/wastelog/config.toml)
	#[arg(long, global = true)]
	config: Option<String>,
}

#[derive(Subcommand)]
enum Directive {
	/// List catalog products matching the query
	Search { query: String },

	/// Show what is already recorded for a product on a date
	Info {
		product: String,

		/// Date to look at, YYYY-MM-DD (default: today)
		#[arg(short, long)]
		date: Option<String>,

		/// Take the product name literally instead of searching the catalog
		#[arg(long)]
		exact: bool,
	},

	/// Record a waste quantity for a product
	Record {
		product: String,

		#[arg(allow_negative_numbers = true)]
		quantity: i64,

		/// Date to record against, YYYY-MM-DD (default: today)
		#[arg(short, long)]
		date: Option<String>,

		/// Add to an existing entry for the same day
		#[arg(short, long, conflicts_with = "replace")]
		merge: bool,

		/// Overwrite an existing entry for the same day
		#[arg(short, long)]
		replace: bool,

		/// Take the product name literally instead of searching the catalog;
		/// this is how products missing from the catalog get recorded
		#[arg(long)]
		exact: bool,
	},

	/// Print the whole ledger
	Show,
}

/// Everything a single invocation works with. The catalog is read at most
/// once, on first use, and kept for the rest of the session.
struct Session {
	ledger_file: PathBuf,
	catalog_file: PathBuf,
	label: String,
	catalog: OnceCell<Catalog>,
}

impl Session {
	/// Flags win over the config file, which wins over the defaults.
	fn new(args: &Cli, config: Config) -> Self {
		let ledger_file = args
			.file
			.clone()
			.or(config.ledger_file)
			.unwrap_or_else(|| DEFAULT_LEDGER_FILE.to_string());
		let catalog_file = args
			.catalog
			.clone()
			.or(config.catalog_file)
			.unwrap_or_else(|| DEFAULT_CATALOG_FILE.to_string());

		Self {
			ledger_file: PathBuf::from(ledger_file),
			catalog_file: PathBuf::from(catalog_file),
			label: config
				.product_label
				.unwrap_or_else(|| DEFAULT_PRODUCT_LABEL.to_string()),
			catalog: OnceCell::new(),
		}
	}

	/// Loads the catalog on first use. An unavailable catalog is reported
	/// once on stderr and the session carries on with no products.
	fn catalog(&self) -> &Catalog {
		self.catalog.get_or_init(|| {
			let (catalog, unavailable) =
				Catalog::load_or_empty(&self.catalog_file, &self.label);
			if let Some(e) = unavailable {
				eprintln!("Warning: {}", e);
			}
			catalog
		})
	}

	fn store(&self) -> LedgerStore<DiskFile> {
		LedgerStore::new(DiskFile::new(&self.ledger_file), &self.label)
	}

	/// Turns what the user typed into a catalog product name.
	fn resolve_product(
		&self,
		query: &str,
		exact: bool,
	) -> Result<String, Error> {
		if exact {
			return Ok(query.trim().to_string());
		}

		match self.catalog().resolve(query) {
			Resolution::Found(product) => Ok(product),
			Resolution::Ambiguous(candidates) => bail!(
				"'{}' matches several products: {}",
				query,
				candidates.join(", ")
			),
			Resolution::NotFound => bail!(
				"No product matches '{}' (use --exact for unlisted products)",
				query
			),
		}
	}
}

fn main() -> Result<(), Error> {
	env_logger::Builder::from_env(
		env_logger::Env::default().default_filter_or("warn"),
	)
	.init();

	let args = Cli::parse();
	let config = Filesystem::get_config(args.config.as_ref())?;
	let session = Session::new(&args, config);

	match &args.command {
		Directive::Search { query } => {
			let found = session.catalog().search(query);
			if found.is_empty() {
				println!("No matching products");
			}
			for product in found {
				println!("{}", product);
			}
		},
		Directive::Info {
			product,
			date,
			exact,
		} => {
			let product = session.resolve_product(product, *exact)?;
			let date = get_date(date.as_deref())?;
			let info = session.store().todays_entry_info(&product, &date)?;
			println!(
				"{} on {}: entries: {}, recorded: {}",
				product, date, info.entry_count, info.previous_quantity
			);
		},
		Directive::Record {
			product,
			quantity,
			date,
			merge,
			replace,
			exact,
		} => {
			let product = session.resolve_product(product, *exact)?;
			let date = get_date(date.as_deref())?;
			let store = session.store();

			let info = store.todays_entry_info(&product, &date)?;
			let merge = if info.entry_count == 0 {
				// nothing recorded yet, so there is nothing to overwrite
				true
			} else if *merge || *replace {
				*merge
			} else {
				confirm_merge(&product, &date, info.previous_quantity)?
			};

			let recorded =
				store.record_waste(&product, &date, *quantity, merge)?;
			println!("Recorded {} for {} on {}", recorded, product, date);
		},
		Directive::Show => {
			LedgerReporter::new(session.store().full_ledger()?).print();
		},
	}

	Ok(())
}

fn get_date(date: Option<&str>) -> Result<Date, Error> {
	Ok(match date {
		Some(d) => Date::from_str(d)?,
		None => Date::today(),
	})
}

/// Asks on stdin whether a second entry for the same day should be added to
/// the first. Anything but an explicit yes keeps the default of replacing.
fn confirm_merge(
	product: &str,
	date: &Date,
	previous: u64,
) -> Result<bool, Error> {
	print!(
		"{} already has {} recorded for {}. Add to it? [y/N] ",
		product, previous, date
	);
	io::stdout().flush()?;

	let mut answer = String::new();
	io::stdin().lock().read_line(&mut answer)?;
	Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}
