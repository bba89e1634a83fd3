// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

fn json_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn months_arg() -> Arg {
    Arg::new("months")
        .long("months")
        .value_parser(value_parser!(usize))
        .default_value("12")
        .help("Number of most recent months to show")
}

pub fn build_cli() -> Command {
    Command::new("ledgerdash")
        .version(clap::crate_version!())
        .about("Personal finance ledger with balance, cashflow, category and savings views")
        .arg(
            Arg::new("data")
                .long("data")
                .global(true)
                .env("LEDGERDASH_DATA")
                .value_parser(value_parser!(PathBuf))
                .help("Ledger CSV file (defaults to the platform data dir)"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Config JSON file (defaults to the platform config dir)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v info, -vv debug)"),
        )
        .subcommand(Command::new("init").about("Create the ledger file, seeding sample data"))
        .subcommand(Command::new("shell").about("Interactive menu (default)"))
        .subcommand(Command::new("dashboard").about("Print every view as one report"))
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Append a transaction")
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .help("YYYY-MM-DD, defaults to today"),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true)
                                .help("Positive for income, negative for expense"),
                        )
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("description").long("description")),
                )
                .subcommand(json_args(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(Arg::new("month").long("month").help("YYYY-MM"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("search")
                                .long("search")
                                .help("Regex matched against category and description"),
                        ),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Derived views")
                .subcommand_required(true)
                .subcommand(json_args(
                    Command::new("balance")
                        .about("Running balance, one point per transaction")
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize))
                                .help("Only the last N points"),
                        ),
                ))
                .subcommand(json_args(
                    Command::new("cashflow")
                        .about("Monthly income and expense")
                        .arg(months_arg()),
                ))
                .subcommand(json_args(
                    Command::new("categories")
                        .about("Monthly net amount per category")
                        .arg(months_arg()),
                ))
                .subcommand(json_args(
                    Command::new("current")
                        .about("Net amount per category for one month")
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .help("YYYY-MM, defaults to the current month"),
                        ),
                ))
                .subcommand(json_args(
                    Command::new("savings")
                        .about("Monthly savings rate")
                        .arg(months_arg()),
                ))
                .subcommand(json_args(
                    Command::new("summary")
                        .about("Income, expenses, savings and savings rate per month")
                        .arg(months_arg()),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Write the ledger to a file")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("csv")
                        .help("csv|json"),
                )
                .arg(Arg::new("out").long("out").required(true)),
        )
}
