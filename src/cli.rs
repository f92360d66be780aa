// Copyright (c) 2025 Fintrack contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON instead of a table"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print one JSON object per line"),
    )
}

fn tx_filter_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("type")
            .long("type")
            .value_name("KIND")
            .help("income|expense|investment"),
    )
    .arg(Arg::new("category").long("category").value_name("NAME"))
    .arg(
        Arg::new("month")
            .long("month")
            .value_name("1-12")
            .help("Calendar month of the business date"),
    )
    .arg(Arg::new("year").long("year").value_name("YYYY"))
    .arg(
        Arg::new("from")
            .long("from")
            .value_name("YYYY-MM-DD")
            .help("Inclusive start of the business-date range"),
    )
    .arg(
        Arg::new("to")
            .long("to")
            .value_name("YYYY-MM-DD")
            .help("Inclusive end of the business-date range"),
    )
    .arg(
        Arg::new("current")
            .long("current")
            .action(ArgAction::SetTrue)
            .help("Restrict to the current month and year"),
    )
    .arg(Arg::new("min-amount").long("min-amount").value_name("AMOUNT"))
    .arg(Arg::new("max-amount").long("max-amount").value_name("AMOUNT"))
}

fn loan_filter_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("type")
            .long("type")
            .value_name("DIRECTION")
            .help("borrowed|lent"),
    )
    .arg(Arg::new("person").long("person").value_name("NAME"))
    .arg(Arg::new("category").long("category").value_name("NAME"))
    .arg(Arg::new("from").long("from").value_name("YYYY-MM-DD"))
    .arg(Arg::new("to").long("to").value_name("YYYY-MM-DD"))
    .arg(Arg::new("min-amount").long("min-amount").value_name("AMOUNT"))
    .arg(Arg::new("max-amount").long("max-amount").value_name("AMOUNT"))
}

fn weight_filter_args(cmd: Command) -> Command {
    cmd.arg(Arg::new("from").long("from").value_name("YYYY-MM-DD"))
        .arg(Arg::new("to").long("to").value_name("YYYY-MM-DD"))
        .arg(Arg::new("min").long("min").value_name("WEIGHT"))
        .arg(Arg::new("max").long("max").value_name("WEIGHT"))
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .version(crate_version!())
        .about("Personal income/expense, loan, and body-weight tracking with local analytics")
        .subcommand_required(false)
        .subcommand(Command::new("init").about("Initialize the local database"))
        .subcommand(
            Command::new("user")
                .about("Select the active user id")
                .subcommand(
                    Command::new("use")
                        .about("Set the active user id")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(Command::new("show").about("Show the active user id")),
        )
        .subcommand(
            Command::new("tx")
                .about("Income/expense/investment transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a transaction")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("income|expense|investment"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD")
                                .help("Business date; defaults to today"),
                        )
                        .arg(Arg::new("desc").long("desc").value_name("TEXT")),
                )
                .subcommand(json_flags(tx_filter_args(
                    Command::new("list").about("List transactions"),
                )))
                .subcommand(
                    Command::new("edit")
                        .about("Update fields of a transaction in place")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("type").long("type"))
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD"))
                        .arg(Arg::new("desc").long("desc").value_name("TEXT")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("loan")
                .about("Inter-personal loans")
                .subcommand(
                    Command::new("add")
                        .about("Record a borrowed or lent amount")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .help("borrowed|lent"),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(Arg::new("person").long("person").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .value_name("YYYY-MM-DD")
                                .help("Business date; defaults to today"),
                        )
                        .arg(Arg::new("due").long("due").value_name("YYYY-MM-DD"))
                        .arg(Arg::new("desc").long("desc").value_name("TEXT")),
                )
                .subcommand(json_flags(loan_filter_args(
                    Command::new("list").about("List loans"),
                )))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a loan")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(json_flags(loan_filter_args(
                    Command::new("summary").about("Overall and per-person loan balances"),
                ))),
        )
        .subcommand(
            Command::new("weight")
                .about("Body-weight entries")
                .subcommand(
                    Command::new("add")
                        .about("Record a weight measurement (measurement date is now)")
                        .arg(Arg::new("value").long("value").required(true))
                        .arg(
                            Arg::new("unit")
                                .long("unit")
                                .default_value("kg")
                                .help("kg|lbs"),
                        )
                        .arg(Arg::new("notes").long("notes").value_name("TEXT")),
                )
                .subcommand(json_flags(weight_filter_args(
                    Command::new("list").about("List weight entries"),
                )))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a weight entry")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(json_flags(weight_filter_args(
                    Command::new("stats").about("Current/highest/lowest weight and trend"),
                ))),
        )
        .subcommand(
            Command::new("report")
                .about("Transaction analytics")
                .subcommand(json_flags(tx_filter_args(Command::new("summary").about(
                    "Totals, income distribution, and monthly breakdown",
                ))))
                .subcommand(json_flags(tx_filter_args(Command::new("daily").about(
                    "Day-by-day series, daily averages, and expense extremes",
                ))))
                .subcommand(json_flags(tx_filter_args(
                    Command::new("monthly").about("Month-by-month series"),
                )))
                .subcommand(json_flags(tx_filter_args(
                    Command::new("categories").about("Expense totals per category"),
                ))),
        )
        .subcommand(
            Command::new("export").about("Export records").subcommand(
                Command::new("transactions")
                    .about("Export the active user's transactions")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            ),
        )
}
