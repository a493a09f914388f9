use std::io::Write;

use clap::{Arg, ArgAction, ArgMatches};

use crate::command::Command;
use crate::commands::helper::read_service;
use crate::commands::{FAILURE_STATUS_CODE, SERVICE, SUCCESS_STATUS_CODE, VALIDATE};
use crate::rules::emit::plan_rules;
use crate::rules::naming::ServerlessNaming;
use crate::rules::Result;
use crate::utils::reader::Reader;
use crate::utils::writer::Writer;

const ABOUT: &str = "Checks the config events of a service definition and lists the resources they compile to";
const SERVICE_HELP: &str = "Provide path to the service definition in JSON or YAML. Read from stdin when omitted";

#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Validate {}

#[allow(clippy::new_without_default)]
impl Validate {
    pub fn new() -> Self {
        Validate {}
    }
}

impl Command for Validate {
    fn name(&self) -> &'static str {
        VALIDATE
    }

    fn command(&self) -> clap::Command {
        clap::Command::new(VALIDATE).about(ABOUT).arg(
            Arg::new(SERVICE.0)
                .long(SERVICE.0)
                .short(SERVICE.1)
                .help(SERVICE_HELP)
                .action(ArgAction::Set)
                .required(false),
        )
    }

    fn execute(&self, app: &ArgMatches, writer: &mut Writer, reader: &mut Reader) -> Result<i32> {
        let service = read_service(app.get_one::<String>(SERVICE.0), reader)?;

        let planned = match plan_rules(&service.functions, &ServerlessNaming) {
            Ok(planned) => planned,
            Err(e) => {
                writer.write_err(format!("Invalid config event, Error = {e}"))?;
                return Ok(FAILURE_STATUS_CODE);
            }
        };

        if planned.is_empty() {
            writeln!(writer, "No config events found")?;
        }

        for rule in &planned {
            writeln!(
                writer,
                "{}: {} -> {}, {} [{}]",
                rule.function,
                rule.function_logical_id,
                rule.rule_logical_id,
                rule.permission_logical_id,
                rule.event.message_type
            )?;
        }

        Ok(SUCCESS_STATUS_CODE)
    }
}
