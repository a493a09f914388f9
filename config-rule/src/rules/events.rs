use std::fmt::{Display, Formatter};
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::rules::errors::Error;
use crate::rules::Result;

pub const CONFIG_EVENT: &str = "config";

const RULE_NAME: &str = "ruleName";
const NAME: &str = "name";
const DESCRIPTION: &str = "description";
const MESSAGE_TYPE: &str = "messageType";
const MAX_EXECUTION_FREQUENCY: &str = "maxExecutionFrequency";
const RESOURCE_TYPES: &str = "resourceTypes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    ScheduledNotification,
    ConfigurationItemChangeNotification,
}

impl Default for MessageType {
    fn default() -> Self {
        MessageType::ConfigurationItemChangeNotification
    }
}

impl Display for MessageType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageType::ScheduledNotification => f.write_str("ScheduledNotification"),
            MessageType::ConfigurationItemChangeNotification => {
                f.write_str("ConfigurationItemChangeNotification")
            }
        }
    }
}

/// Frequencies accepted by AWS Config for periodic rule evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaximumExecutionFrequency {
    #[serde(rename = "One_Hour")]
    OneHour,
    #[serde(rename = "Three_Hours")]
    ThreeHours,
    #[serde(rename = "Six_Hours")]
    SixHours,
    #[serde(rename = "Twelve_Hours")]
    TwelveHours,
    #[serde(rename = "TwentyFour_Hours")]
    TwentyFourHours,
}

/// Validated payload of a `config` event declared on a function.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConfigEvent {
    /// `ruleName`, which also suffixes the emitted logical ids.
    pub rule_name: Option<String>,
    /// `name`, only ever used as the deployed rule name.
    pub name: Option<String>,
    pub description: Option<String>,
    pub message_type: MessageType,
    pub max_execution_frequency: Option<MaximumExecutionFrequency>,
    pub resource_types: Option<Vec<String>>,
}

impl ConfigEvent {
    /// Reads the `config` payload out of an event declaration.
    ///
    /// Returns `Ok(None)` for any event that is not tagged `config`. A `null`
    /// property is treated the same as an absent one.
    ///
    /// This function will return an error if
    /// - the payload is not a mapping
    /// - `resourceTypes` is absent for a rule that is not a `ScheduledNotification`
    /// - any property has the wrong shape
    pub fn from_declaration(function: &str, declaration: &Value) -> Result<Option<ConfigEvent>> {
        let payload = match declaration.get(CONFIG_EVENT) {
            Some(payload) => payload,
            None => return Ok(None),
        };

        let payload = payload.as_object().ok_or_else(|| Error::InvalidConfigKind {
            function: function.to_string(),
        })?;

        let rule_name = optional_string(function, payload, RULE_NAME)?;
        let name = optional_string(function, payload, NAME)?;
        let description = optional_string(function, payload, DESCRIPTION)?;

        let message_type = match present(payload, MESSAGE_TYPE) {
            Some(value) => serde_json::from_value::<MessageType>(value.clone()).map_err(|_| {
                Error::invalid_field(
                    function,
                    MESSAGE_TYPE,
                    "one of ScheduledNotification, ConfigurationItemChangeNotification",
                )
            })?,
            None => MessageType::default(),
        };

        let max_execution_frequency = match present(payload, MAX_EXECUTION_FREQUENCY) {
            Some(value) => Some(
                serde_json::from_value::<MaximumExecutionFrequency>(value.clone()).map_err(
                    |_| {
                        Error::invalid_field(
                            function,
                            MAX_EXECUTION_FREQUENCY,
                            "one of One_Hour, Three_Hours, Six_Hours, Twelve_Hours, TwentyFour_Hours",
                        )
                    },
                )?,
            ),
            None => None,
        };

        let resource_types = match present(payload, RESOURCE_TYPES) {
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .map(|item| {
                        item.as_str().map(String::from).ok_or_else(|| {
                            Error::invalid_field(function, RESOURCE_TYPES, "a list of strings")
                        })
                    })
                    .collect::<Result<Vec<String>>>()?,
            ),
            Some(_) => {
                return Err(Error::invalid_field(
                    function,
                    RESOURCE_TYPES,
                    "a list of strings",
                ))
            }
            None => None,
        };

        if message_type != MessageType::ScheduledNotification && resource_types.is_none() {
            return Err(Error::missing_field(function, RESOURCE_TYPES));
        }

        Ok(Some(ConfigEvent {
            rule_name,
            name,
            description,
            message_type,
            max_execution_frequency,
            resource_types,
        }))
    }

    /// `ConfigRuleName` of the emitted rule, `ruleName` winning over `name`.
    pub fn config_rule_name(&self) -> Option<&str> {
        self.rule_name.as_deref().or(self.name.as_deref())
    }

    /// Scheduled rules run once a day unless told otherwise.
    pub fn effective_frequency(&self) -> Option<MaximumExecutionFrequency> {
        match (self.max_execution_frequency, self.message_type) {
            (Some(frequency), _) => Some(frequency),
            (None, MessageType::ScheduledNotification) => {
                Some(MaximumExecutionFrequency::TwentyFourHours)
            }
            (None, MessageType::ConfigurationItemChangeNotification) => None,
        }
    }
}

fn present<'v>(payload: &'v Map<String, Value>, key: &str) -> Option<&'v Value> {
    match payload.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

fn optional_string(
    function: &str,
    payload: &Map<String, Value>,
    key: &str,
) -> Result<Option<String>> {
    match present(payload, key) {
        Some(Value::String(value)) => Ok(Some(value.clone())),
        Some(_) => Err(Error::invalid_field(function, key, "a string")),
        None => Ok(None),
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FunctionDefinition {
    pub name: String,
    pub events: Vec<Value>,
}

impl FunctionDefinition {
    pub fn new(name: impl Into<String>, events: Vec<Value>) -> Self {
        FunctionDefinition {
            name: name.into(),
            events,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawFunction {
    #[serde(default)]
    events: Option<Vec<Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawService {
    #[serde(default)]
    functions: Option<IndexMap<String, Option<RawFunction>>>,
}

/// The `functions` section of a service definition, in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceDefinition {
    pub functions: Vec<FunctionDefinition>,
}

impl ServiceDefinition {
    pub fn new(functions: Vec<FunctionDefinition>) -> Self {
        ServiceDefinition { functions }
    }
}

impl FromStr for ServiceDefinition {
    type Err = Error;

    /// Loads a service definition written in JSON or YAML. Functions without
    /// an `events` list are kept and simply have no events.
    fn from_str(content: &str) -> Result<Self> {
        let raw: RawService = match serde_json::from_str(content) {
            Ok(raw) => raw,
            Err(_) => serde_yaml::from_str(content)?,
        };

        let functions = raw
            .functions
            .unwrap_or_default()
            .into_iter()
            .map(|(name, function)| {
                let events = function.and_then(|f| f.events).unwrap_or_default();
                FunctionDefinition::new(name, events)
            })
            .collect();

        Ok(ServiceDefinition { functions })
    }
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod events_tests;
