// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

use std::collections::HashMap;
use std::fs::File;
use std::process::exit;

use clap::{Arg, ArgAction};
use config_rule::commands::{APP_NAME, APP_VERSION, OUTPUT, VERBOSE};
use config_rule::rules::errors::Error;
use config_rule::utils::get_commands;
use config_rule::utils::reader::{ReadBuffer, Reader};
use config_rule::utils::writer::{WriteBuffer::File as WBFile, WriteBuffer::Stderr, WriteBuffer::Stdout, Writer};
use log::{trace, LevelFilter};
use simple_logger::SimpleLogger;

fn main() -> Result<(), Error> {
    let mut app = clap::Command::new(APP_NAME)
        .version(APP_VERSION)
        .about(
            r#"
  Compiles `config` events declared on serverless functions into AWS Config
  custom rules. Every config event adds an AWS::Config::ConfigRule invoking the
  function and an AWS::Lambda::Permission letting AWS Config call it, and the
  execution role is granted config:GetResourceConfigHistory and
  config:PutEvaluations."#,
        )
        .arg(
            Arg::new(VERBOSE.0)
                .long(VERBOSE.0)
                .short(VERBOSE.1)
                .action(ArgAction::Count)
                .global(true)
                .help("Sets the level of verbosity - add v's to increase output"),
        )
        .arg_required_else_help(true);

    let commands = get_commands();
    let mappings = commands.iter().map(|s| (s.name(), s)).fold(
        HashMap::with_capacity(commands.len()),
        |mut map, entry| {
            map.insert(entry.0, entry.1.as_ref());
            map
        },
    );

    for each in &commands {
        app = app.subcommand(each.command());
    }

    let help = app.render_usage();
    let app = app.get_matches();

    let log_level = match app.get_count(VERBOSE.0) {
        0 => LevelFilter::Error,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(e) = SimpleLogger::new().with_level(log_level).init() {
        eprintln!("Unable to initialise logging {e}");
    }
    trace!("Arguments are {:?}", app);

    match app.subcommand() {
        Some((name, value)) => {
            if let Some(command) = mappings.get(name) {
                let mut output_writer: Writer = match value.try_get_one::<String>(OUTPUT.0) {
                    Ok(Some(file)) => {
                        Writer::new(WBFile(File::create(file)?), Stderr(std::io::stderr()))
                    }
                    _ => Writer::new(Stdout(std::io::stdout()), Stderr(std::io::stderr())),
                };

                match (*command).execute(
                    value,
                    &mut output_writer,
                    &mut Reader::new(ReadBuffer::Stdin(std::io::stdin())),
                ) {
                    Err(e) => {
                        output_writer
                            .write_err(format!("Error occurred {e}"))
                            .expect("failed to write to stderr");

                        exit(-1);
                    }
                    Ok(code) => exit(code),
                }
            } else {
                println!("{}", help);
            }
        }
        None => {
            println!("{}", help);
        }
    }

    Ok(())
}
