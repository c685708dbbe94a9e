//! # Seed Data Generator
//!
//! Populates the store with the demo catalog and sample sales.
//!
//! ## Usage
//! ```bash
//! # Seed into the default data directory
//! cargo run -p tillbook-store --bin seed
//!
//! # Seed into a specific directory with a custom sale count
//! cargo run -p tillbook-store --bin seed -- --data-dir ./data --sales 50
//!
//! # Wipe the collections first
//! cargo run -p tillbook-store --bin seed -- --fresh
//! ```

use std::env;
use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tillbook_store::{seed, Storage, StoreError};

struct Args {
    data_dir: Option<String>,
    sales: usize,
    fresh: bool,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        data_dir: None,
        sales: 20,
        fresh: false,
    };

    let mut iter = env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--data-dir" => {
                args.data_dir = Some(iter.next().ok_or("--data-dir needs a path")?);
            }
            "--sales" => {
                let raw = iter.next().ok_or("--sales needs a number")?;
                args.sales = raw.parse().map_err(|_| format!("invalid count: {raw}"))?;
            }
            "--fresh" => args.fresh = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(args)
}

fn run(args: Args) -> Result<(), StoreError> {
    let storage = match args.data_dir {
        Some(dir) => Storage::open(dir)?,
        None => Storage::open_default()?,
    };
    let storage = Arc::new(storage);
    info!(root = %storage.root().display(), "seeding store");

    if args.fresh {
        storage.clear_collections()?;
    }

    let seeded = seed::seed_catalog(&storage)?;
    if seeded {
        let written = seed::seed_sales(&storage, args.sales, &mut rand::thread_rng())?;
        info!(sales = written, "demo data ready");
    }

    Ok(())
}

fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tillbook=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            error!("{message}");
            return ExitCode::FAILURE;
        }
    };

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("seeding failed: {e}");
            ExitCode::FAILURE
        }
    }
}
