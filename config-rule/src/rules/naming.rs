/// Logical id conventions of the host deployment tool.
///
/// The function ids and normalizers are supplied by the host; the rule and
/// permission ids are derived from them.
pub trait Naming {
    fn normalized_function_name(&self, function: &str) -> String;

    fn normalize_alphanumeric(&self, name: &str) -> String;

    fn lambda_logical_id(&self, function: &str) -> String;

    fn config_rule_logical_id(&self, function: &str, suffix: &str) -> String {
        format!("{}ConfigRule{}", self.normalized_function_name(function), suffix)
    }

    fn lambda_permission_logical_id(&self, function: &str, suffix: &str) -> String {
        format!(
            "{}LambdaPermission{}",
            self.normalized_function_name(function),
            suffix
        )
    }
}

/// Naming used by the Serverless Framework AWS provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServerlessNaming;

impl Naming for ServerlessNaming {
    fn normalized_function_name(&self, function: &str) -> String {
        normalize_name(&function.replace('-', "Dash").replace('_', "Underscore"))
    }

    fn normalize_alphanumeric(&self, name: &str) -> String {
        let alphanumeric = name
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>();
        normalize_name(&alphanumeric)
    }

    fn lambda_logical_id(&self, function: &str) -> String {
        format!("{}LambdaFunction", self.normalized_function_name(function))
    }
}

/// Upper-cases the first character, leaving the rest untouched.
pub fn normalize_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "naming_tests.rs"]
mod naming_tests;
