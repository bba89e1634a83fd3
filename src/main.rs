// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::io;
use std::path::PathBuf;

use ledgerdash::config::{self, Config};
use ledgerdash::shell::{local_today, Shell};
use ledgerdash::store::{self, CsvStore};
use ledgerdash::{cli, commands, display, utils};

fn main() -> Result<()> {
    let matches = cli::build_cli().get_matches();
    utils::init_tracing(matches.get_count("verbose"));

    let config_path = match matches.get_one::<PathBuf>("config") {
        Some(p) => p.clone(),
        None => config::default_config_path()?,
    };
    let config = Config::load(&config_path)?;
    let data_path = config.data_path(matches.get_one::<PathBuf>("data").map(PathBuf::as_path))?;
    let store = CsvStore::new(data_path);
    let today = local_today();

    let ledger = store::open_or_init(&store, today, &config.categories)
        .with_context(|| format!("Open ledger at {}", store.path().display()))
        .inspect_err(|e| tracing::error!(error = %e, "could not open ledger"))?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!(
                "Ledger ready at {} ({} transactions)",
                store.path().display(),
                ledger.len()
            );
        }
        Some(("dashboard", _)) => println!("{}", display::dashboard(&ledger, today, &config)),
        Some(("tx", sub)) => commands::transactions::handle(&store, &ledger, &config, sub, today)?,
        Some(("report", sub)) => commands::reports::handle(&ledger, &config, sub, today)?,
        Some(("export", sub)) => commands::exporter::handle(&ledger, sub)?,
        _ => {
            let stdin = io::stdin();
            Shell::new(stdin.lock(), io::stdout(), &store, &config, ledger).run()?;
        }
    }
    Ok(())
}
