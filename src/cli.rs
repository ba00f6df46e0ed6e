// Copyright (c) AlphaVelocity.
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
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("aiwatch")
        .about("Track AI service subscriptions, accounts, budgets, and recommendations")
        .version(crate_version!())
        .subcommand(Command::new("init").about("Create the document file if missing"))
        .subcommand(
            Command::new("sub")
                .about("Manage subscriptions")
                .subcommand(
                    Command::new("add")
                        .about("Add a subscription")
                        .arg(Arg::new("name").required(true).help("Service name"))
                        .arg(Arg::new("provider").long("provider").required(true))
                        .arg(
                            Arg::new("category")
                                .long("category")
                                .required(true)
                                .help("coding|art|music|general"),
                        )
                        .arg(Arg::new("cost").long("cost").required(true).help("Monthly cost"))
                        .arg(Arg::new("plan").long("plan"))
                        .arg(Arg::new("renews").long("renews").help("Next renewal date, YYYY-MM-DD"))
                        .arg(
                            Arg::new("status")
                                .long("status")
                                .default_value("active")
                                .help("active|paused|cancelled"),
                        )
                        .arg(Arg::new("tags").long("tags").help("Comma-separated tags"))
                        .arg(Arg::new("notes").long("notes"))
                        .arg(Arg::new("id").long("id").help("Explicit id (default: generated)")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List subscriptions")
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("status").long("status")),
                ))
                .subcommand(
                    Command::new("set-status")
                        .about("Change a subscription's status")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("status").required(true).help("active|paused|cancelled")),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a subscription")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("account")
                .about("Manage service accounts")
                .subcommand(
                    Command::new("add")
                        .about("Add an account")
                        .arg(Arg::new("service").required(true).help("Subscription id"))
                        .arg(Arg::new("email").long("email").required(true))
                        .arg(Arg::new("owner").long("owner"))
                        .arg(Arg::new("notes").long("notes"))
                        .arg(Arg::new("id").long("id").help("Explicit id (default: generated)")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List accounts")
                        .arg(Arg::new("service").long("service").help("Filter by subscription id")),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Remove an account")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Manage category budgets")
                .subcommand(
                    Command::new("set")
                        .about("Set the budget for a category and period")
                        .arg(Arg::new("category").required(true).help("coding|art|music|general"))
                        .arg(Arg::new("limit").long("limit").required(true))
                        .arg(Arg::new("period").long("period").default_value("monthly"))
                        .arg(
                            Arg::new("threshold")
                                .long("threshold")
                                .default_value("100")
                                .help("Alert threshold as a percent of the limit"),
                        ),
                )
                .subcommand(json_flags(Command::new("list").about("List budgets")))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a budget")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(
            Command::new("rec")
                .about("Manage recommendations")
                .subcommand(
                    Command::new("add")
                        .about("Add a recommendation")
                        .arg(Arg::new("title").required(true))
                        .arg(Arg::new("body").long("body").required(true))
                        .arg(Arg::new("priority").long("priority").default_value("3").help("1-5"))
                        .arg(Arg::new("sub").long("sub").help("Related subscription id"))
                        .arg(Arg::new("account").long("account").help("Related account id"))
                        .arg(Arg::new("id").long("id").help("Explicit id (default: generated)")),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List open recommendations").arg(
                        Arg::new("all")
                            .long("all")
                            .action(ArgAction::SetTrue)
                            .help("Include dismissed"),
                    ),
                ))
                .subcommand(
                    Command::new("dismiss")
                        .about("Dismiss a recommendation")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Remove a recommendation")
                        .arg(Arg::new("id").required(true)),
                ),
        )
        .subcommand(json_flags(
            Command::new("dashboard").about("Spend totals, budget status, and alerts"),
        ))
        .subcommand(
            Command::new("export")
                .about("Export a collection to csv or json")
                .subcommand(export_cmd("subs"))
                .subcommand(export_cmd("accounts"))
                .subcommand(export_cmd("budgets"))
                .subcommand(export_cmd("recs")),
        )
        .subcommand(Command::new("doctor").about("Check referential integrity of the document"))
}

fn export_cmd(name: &'static str) -> Command {
    Command::new(name)
        .arg(
            Arg::new("format")
                .long("format")
                .default_value("csv")
                .help("csv|json"),
        )
        .arg(Arg::new("out").long("out").required(true).help("Output file path"))
}
