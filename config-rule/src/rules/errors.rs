use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Error parsing incoming JSON context {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Error parsing incoming YAML context {0}")]
    YamlError(#[from] serde_yaml::Error),
    #[error("I/O error when reading {0}")]
    IoError(#[from] std::io::Error),
    #[error("Config event for function `{function}` must be an object")]
    InvalidConfigKind { function: String },
    #[error("Config event for function `{function}` is missing required property `{field}`")]
    MissingRequiredField { function: String, field: String },
    #[error("Config event for function `{function}` has an invalid `{field}`, expected {expected}")]
    InvalidFieldShape {
        function: String,
        field: String,
        expected: String,
    },
    #[error("Config event for function `{function}` produces logical id `{logical_id}` which is already in use, give each config event a distinct ruleName")]
    DuplicateLogicalId { function: String, logical_id: String },
    #[error("Execution role `{0}` has no Properties.Policies[0].PolicyDocument.Statement list")]
    MalformedExecutionRole(String),
    #[error("Template lacks a Resources section")]
    MissingResources,
}

impl Error {
    pub(crate) fn invalid_field(function: &str, field: &str, expected: &str) -> Self {
        Error::InvalidFieldShape {
            function: function.to_string(),
            field: field.to_string(),
            expected: expected.to_string(),
        }
    }

    pub(crate) fn missing_field(function: &str, field: &str) -> Self {
        Error::MissingRequiredField {
            function: function.to_string(),
            field: field.to_string(),
        }
    }
}
