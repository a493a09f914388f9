use std::fs;
use std::io::Write;

use clap::{Arg, ArgAction, ArgMatches};
use log::info;

use crate::command::Command;
use crate::commands::helper::{parse_template, read_service};
use crate::commands::{COMPILE, OUTPUT, PRINT_YAML, ROLE, SERVICE, SUCCESS_STATUS_CODE, TEMPLATE};
use crate::rules::emit::compile_template;
use crate::rules::naming::ServerlessNaming;
use crate::rules::{CompileOptions, Result, EXECUTION_ROLE_LOGICAL_ID};
use crate::utils::reader::Reader;
use crate::utils::writer::Writer;

const ABOUT: &str = "Compiles the config events of a service definition into an existing CloudFormation template";
const SERVICE_HELP: &str = "Provide path to the service definition in JSON or YAML. Read from stdin when omitted";
const TEMPLATE_HELP: &str = "Provide path to the CloudFormation template, in JSON or YAML, to compile into";
const OUTPUT_HELP: &str = "Write to output file";
const PRINT_YAML_HELP: &str = "Print the compiled template in YAML format";
const ROLE_HELP: &str = "Logical id of the execution role that receives the config policy statement";

#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Compile {}

#[allow(clippy::new_without_default)]
impl Compile {
    pub fn new() -> Self {
        Compile {}
    }
}

impl Command for Compile {
    fn name(&self) -> &'static str {
        COMPILE
    }

    fn command(&self) -> clap::Command {
        clap::Command::new(COMPILE)
            .about(ABOUT)
            .arg(
                Arg::new(SERVICE.0)
                    .long(SERVICE.0)
                    .short(SERVICE.1)
                    .help(SERVICE_HELP)
                    .action(ArgAction::Set)
                    .required(false),
            )
            .arg(
                Arg::new(TEMPLATE.0)
                    .long(TEMPLATE.0)
                    .short(TEMPLATE.1)
                    .help(TEMPLATE_HELP)
                    .action(ArgAction::Set)
                    .required(true),
            )
            .arg(
                Arg::new(OUTPUT.0)
                    .long(OUTPUT.0)
                    .short(OUTPUT.1)
                    .help(OUTPUT_HELP)
                    .action(ArgAction::Set)
                    .required(false),
            )
            .arg(
                Arg::new(PRINT_YAML.0)
                    .long(PRINT_YAML.0)
                    .short(PRINT_YAML.1)
                    .action(ArgAction::SetTrue)
                    .help(PRINT_YAML_HELP),
            )
            .arg(
                Arg::new(ROLE.0)
                    .long(ROLE.0)
                    .short(ROLE.1)
                    .help(ROLE_HELP)
                    .action(ArgAction::Set)
                    .default_value(EXECUTION_ROLE_LOGICAL_ID),
            )
            .arg_required_else_help(true)
    }

    /// Loads the service definition and template, compiles every config
    /// event into the template and writes it out.
    ///
    /// This function will return an error if
    /// - any of the specified paths do not exist
    /// - illegal json or yaml syntax present in the service definition or template
    /// - a config event is invalid
    fn execute(&self, app: &ArgMatches, writer: &mut Writer, reader: &mut Reader) -> Result<i32> {
        let service = read_service(app.get_one::<String>(SERVICE.0), reader)?;

        let template_file = match app.get_one::<String>(TEMPLATE.0) {
            Some(file) => file,
            None => unreachable!(),
        };
        info!("Compiling config events into {}", template_file);
        let mut template = parse_template(&fs::read_to_string(template_file)?)?;

        let options = CompileOptions {
            role_logical_id: app
                .get_one::<String>(ROLE.0)
                .cloned()
                .unwrap_or_else(|| String::from(EXECUTION_ROLE_LOGICAL_ID)),
        };

        if let Err(e) = compile_template(&service, &mut template, &ServerlessNaming, &options) {
            writer.write_err(format!("Compiling config events failed, Error = {e}"))?;
            return Err(e);
        }

        if app.get_flag(PRINT_YAML.0) {
            serde_yaml::to_writer(&mut *writer, &template)?;
        } else {
            serde_json::to_writer_pretty(&mut *writer, &template)?;
            writeln!(writer)?;
        }

        Ok(SUCCESS_STATUS_CODE)
    }
}
