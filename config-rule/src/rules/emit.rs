use std::collections::HashSet;

use log::{debug, info, trace};
use serde_json::{Map, Value};

use crate::rules::errors::Error;
use crate::rules::events::{ConfigEvent, FunctionDefinition, ServiceDefinition};
use crate::rules::merge::merge_objects;
use crate::rules::naming::Naming;
use crate::rules::{resources, CompileOptions, Result};

const RESOURCES: &str = "Resources";
const ROLE_STATEMENTS: &str = "/Properties/Policies/0/PolicyDocument/Statement";

/// One config event together with the logical ids it compiles to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRule {
    pub function: String,
    pub function_logical_id: String,
    pub rule_logical_id: String,
    pub permission_logical_id: String,
    pub event: ConfigEvent,
}

/// Validates every config event and derives its logical ids, without
/// touching any template. Stops at the first invalid event.
pub fn plan_rules(functions: &[FunctionDefinition], naming: &dyn Naming) -> Result<Vec<PlannedRule>> {
    let mut planned = Vec::new();
    let mut seen = HashSet::new();

    for function in functions {
        let mut ordinal = 0;
        for declaration in &function.events {
            let event = match ConfigEvent::from_declaration(&function.name, declaration)? {
                Some(event) => event,
                None => continue,
            };
            ordinal += 1;

            let suffix = match &event.rule_name {
                Some(rule_name) => naming.normalize_alphanumeric(rule_name),
                None if ordinal == 1 => String::new(),
                None => ordinal.to_string(),
            };

            let rule = PlannedRule {
                function: function.name.clone(),
                function_logical_id: naming.lambda_logical_id(&function.name),
                rule_logical_id: naming.config_rule_logical_id(&function.name, &suffix),
                permission_logical_id: naming.lambda_permission_logical_id(&function.name, &suffix),
                event,
            };

            for logical_id in [&rule.rule_logical_id, &rule.permission_logical_id] {
                if !seen.insert(logical_id.clone()) {
                    return Err(Error::DuplicateLogicalId {
                        function: function.name.clone(),
                        logical_id: logical_id.clone(),
                    });
                }
            }

            trace!("Planned {:?}", rule);
            planned.push(rule);
        }
    }

    Ok(planned)
}

/// Compiles the config events of `functions` into `resources`.
///
/// Each event adds a config rule and a Lambda permission, deep merged into
/// the map. Once all events are in, the execution role (when the template has
/// one) gets a statement allowing the function to report evaluations. Calling
/// this twice on the same map appends that statement twice.
///
/// This function will return an error if
/// - any config event is invalid, see [`ConfigEvent::from_declaration`]
/// - two config events derive the same logical id
/// - the execution role exists without a policy statement list
pub fn compile_events(
    functions: &[FunctionDefinition],
    resources: &mut Map<String, Value>,
    naming: &dyn Naming,
    options: &CompileOptions,
) -> Result<()> {
    let planned = plan_rules(functions, naming)?;
    if planned.is_empty() {
        debug!("No config events declared, template left untouched");
        return Ok(());
    }
    let has_role = role_statements_present(resources, &options.role_logical_id)?;

    for rule in &planned {
        debug!(
            "Emitting {} and {} for function {}",
            rule.rule_logical_id, rule.permission_logical_id, rule.function
        );

        let mut emitted = Map::new();
        emitted.insert(
            rule.rule_logical_id.clone(),
            resources::config_rule(
                &rule.event,
                &rule.function_logical_id,
                &rule.permission_logical_id,
            )?,
        );
        emitted.insert(
            rule.permission_logical_id.clone(),
            resources::lambda_permission(&rule.function_logical_id)?,
        );
        merge_objects(resources, emitted);
    }

    if has_role {
        append_role_statement(resources, &options.role_logical_id)?;
    }

    info!("Compiled {} config rule(s)", planned.len());
    Ok(())
}

/// Runs [`compile_events`] against the `Resources` section of a whole template.
pub fn compile_template(
    service: &ServiceDefinition,
    template: &mut Value,
    naming: &dyn Naming,
    options: &CompileOptions,
) -> Result<()> {
    let resources = template
        .get_mut(RESOURCES)
        .and_then(Value::as_object_mut)
        .ok_or(Error::MissingResources)?;

    compile_events(&service.functions, resources, naming, options)
}

/// `Ok(false)` when the template has no execution role, an error when the
/// role exists without a statement list to append to.
fn role_statements_present(resources: &Map<String, Value>, role_logical_id: &str) -> Result<bool> {
    let role = match resources.get(role_logical_id) {
        Some(role) => role,
        None => {
            debug!(
                "Execution role {} not in template, skipping config statement",
                role_logical_id
            );
            return Ok(false);
        }
    };

    match role.pointer(ROLE_STATEMENTS) {
        Some(Value::Array(_)) => Ok(true),
        _ => Err(Error::MalformedExecutionRole(role_logical_id.to_string())),
    }
}

fn append_role_statement(resources: &mut Map<String, Value>, role_logical_id: &str) -> Result<()> {
    let statements = resources
        .get_mut(role_logical_id)
        .and_then(|role| role.pointer_mut(ROLE_STATEMENTS))
        .and_then(Value::as_array_mut)
        .ok_or_else(|| Error::MalformedExecutionRole(role_logical_id.to_string()))?;
    statements.push(resources::config_rule_statement()?);

    Ok(())
}

#[cfg(test)]
#[path = "emit_tests.rs"]
mod emit_tests;
