// Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
// SPDX-License-Identifier: Apache-2.0

pub mod command;
pub mod commands;
pub mod rules;
pub mod utils;

pub use crate::rules::emit::{compile_events, compile_template, plan_rules, PlannedRule};
pub use crate::rules::errors::Error;
pub use crate::rules::events::{
    ConfigEvent, FunctionDefinition, MaximumExecutionFrequency, MessageType, ServiceDefinition,
};
pub use crate::rules::naming::{Naming, ServerlessNaming};
pub use crate::rules::CompileOptions;

/// Compiles the config events of a service definition into a CloudFormation
/// template. Both inputs may be JSON or YAML; `role` overrides the logical id
/// of the execution role that receives the config policy statement.
pub fn compile_config_rules(
    service: &str,
    template: &str,
    role: Option<&str>,
) -> crate::rules::Result<serde_json::Value> {
    let mut options = CompileOptions::default();
    if let Some(role) = role {
        options.role_logical_id = role.to_string();
    }
    crate::commands::helper::compile_and_return_template(service, template, &options)
}
