use std::fs;
use std::io::Read;
use std::str::FromStr;

use log::trace;
use serde_json::Value;

use crate::rules::emit::compile_template;
use crate::rules::events::ServiceDefinition;
use crate::rules::naming::ServerlessNaming;
use crate::rules::{CompileOptions, Result};
use crate::utils::reader::Reader;

/// Reads the service definition from `path`, or from `reader` when no path
/// was given.
pub(crate) fn read_service(path: Option<&String>, reader: &mut Reader) -> Result<ServiceDefinition> {
    let content = match path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut content = String::new();
            reader.read_to_string(&mut content)?;
            content
        }
    };
    trace!("Service definition is:\n'{}'", content);

    ServiceDefinition::from_str(&content)
}

/// Templates are accepted as JSON or YAML.
pub(crate) fn parse_template(content: &str) -> Result<Value> {
    match serde_json::from_str::<Value>(content) {
        Ok(value) => Ok(value),
        Err(_) => Ok(serde_yaml::from_str::<Value>(content)?),
    }
}

/// Compiles the config events of `service` into `template`, both given as
/// JSON or YAML text, and returns the resulting template.
pub(crate) fn compile_and_return_template(
    service: &str,
    template: &str,
    options: &CompileOptions,
) -> Result<Value> {
    let service = ServiceDefinition::from_str(service)?;
    let mut template = parse_template(template)?;

    compile_template(&service, &mut template, &ServerlessNaming, options)?;

    Ok(template)
}
