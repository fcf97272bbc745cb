// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn filter_args() -> Vec<Arg> {
    vec![
        Arg::new("range")
            .long("range")
            .value_name("RANGE")
            .default_value("all-time")
            .help("Date range key, e.g. current-month, last-quarter, all-time"),
        Arg::new("category")
            .long("category")
            .value_name("NAME")
            .help("Restrict to one category"),
        Arg::new("account")
            .long("account")
            .value_name("NAME")
            .help("Restrict to one account"),
        Arg::new("status")
            .long("status")
            .value_name("FILTER")
            .default_value("all")
            .help("all, received, pending, completed or cancelled"),
    ]
}

fn output_flags() -> Vec<Arg> {
    vec![
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    ]
}

fn list_args() -> Vec<Arg> {
    let mut args = vec![
        Arg::new("month")
            .long("month")
            .value_name("YYYY-MM")
            .help("Restrict to one calendar month"),
        Arg::new("account").long("account").value_name("NAME"),
        Arg::new("category").long("category").value_name("NAME"),
        Arg::new("limit")
            .long("limit")
            .value_name("N")
            .value_parser(value_parser!(usize)),
    ];
    args.extend(output_flags());
    args
}

pub fn build_cli() -> Command {
    Command::new("splitbook")
        .about("Income/expense reporting with partner-split accounting and CSV export")
        .subcommand(Command::new("init").about("Initialize the database"))
        .subcommand(
            Command::new("income")
                .about("Record and list income")
                .subcommand(
                    Command::new("add")
                        .about("Record an income entry")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(Arg::new("client").long("client").required(true))
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .required(true),
                        )
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .help("Invoiced amount in the original currency"),
                        )
                        .arg(Arg::new("currency").long("currency").required(true))
                        .arg(
                            Arg::new("received")
                                .long("received")
                                .help("Amount actually received; defaults to the invoiced amount"),
                        )
                        .arg(
                            Arg::new("rate")
                                .long("rate")
                                .default_value("1")
                                .help("PKR conversion rate applied to the received amount"),
                        )
                        .arg(
                            Arg::new("converted")
                                .long("converted")
                                .help("PKR equivalent; defaults to received x rate"),
                        )
                        .arg(
                            Arg::new("split")
                                .long("split")
                                .help("Split-adjusted PKR amount; defaults to the PKR equivalent"),
                        )
                        .arg(
                            Arg::new("status")
                                .long("status")
                                .default_value("Received")
                                .help("Received, Partial, Upcoming or Cancelled"),
                        )
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(Command::new("list").about("List income entries").args(list_args())),
        )
        .subcommand(
            Command::new("expense")
                .about("Record and list expenses")
                .subcommand(
                    Command::new("add")
                        .about("Record an expense entry")
                        .arg(Arg::new("date").long("date").required(true))
                        .arg(
                            Arg::new("description")
                                .long("description")
                                .required(true),
                        )
                        .arg(Arg::new("account").long("account").required(true))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("currency").long("currency").required(true))
                        .arg(
                            Arg::new("rate")
                                .long("rate")
                                .default_value("1")
                                .help("PKR conversion rate applied to the amount"),
                        )
                        .arg(
                            Arg::new("converted")
                                .long("converted")
                                .help("PKR equivalent; defaults to amount x rate"),
                        )
                        .arg(
                            Arg::new("status")
                                .long("status")
                                .default_value("Pending")
                                .help("Pending or Done"),
                        )
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(
                    Command::new("list").about("List expense entries").args(list_args()),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Run filtered reports")
                .subcommand(
                    Command::new("summary")
                        .about("Profit and loss summary with partner splits")
                        .args(filter_args())
                        .args(output_flags()),
                )
                .subcommand(
                    Command::new("categories")
                        .about("Income and expense totals per category")
                        .args(filter_args())
                        .args(output_flags()),
                )
                .subcommand(
                    Command::new("accounts")
                        .about("Income and expense totals per account")
                        .args(filter_args())
                        .args(output_flags()),
                )
                .subcommand(
                    Command::new("currencies")
                        .about("Income breakdown per source currency")
                        .args(filter_args())
                        .args(output_flags()),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write filtered reports as CSV files")
                .subcommand(
                    Command::new("income")
                        .about("Income detail rows with per-row partner splits")
                        .args(filter_args())
                        .arg(Arg::new("dir").long("dir").default_value(".")),
                )
                .subcommand(
                    Command::new("expenses")
                        .about("Expense detail rows")
                        .args(filter_args())
                        .arg(Arg::new("dir").long("dir").default_value(".")),
                )
                .subcommand(
                    Command::new("currencies")
                        .about("Currency analysis rows")
                        .args(filter_args())
                        .arg(Arg::new("dir").long("dir").default_value(".")),
                )
                .subcommand(
                    Command::new("summary")
                        .about("Profit and loss summary rows")
                        .args(filter_args())
                        .arg(Arg::new("dir").long("dir").default_value(".")),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Bulk import records from CSV")
                .subcommand(
                    Command::new("income")
                        .arg(Arg::new("path").long("path").required(true)),
                )
                .subcommand(
                    Command::new("expenses")
                        .arg(Arg::new("path").long("path").required(true)),
                ),
        )
        .subcommand(
            Command::new("rules")
                .about("Regex rules that assign categories to new records")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("pattern").long("pattern").required(true))
                        .arg(Arg::new("category").long("category").required(true)),
                )
                .subcommand(Command::new("list"))
                .subcommand(
                    Command::new("rm").arg(Arg::new("id").long("id").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check stored records for suspect data"))
}
