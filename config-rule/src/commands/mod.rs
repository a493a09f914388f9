pub mod compile;
pub(crate) mod helper;
pub mod validate;

//
// Constants
//
// Application metadata
pub const APP_NAME: &str = "config-rule";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
// Commands
pub const COMPILE: &str = "compile";
pub const VALIDATE: &str = "validate";
// Arguments for compile, validate
pub const SERVICE: (&str, char) = ("service", 's');
// Arguments for compile
pub const TEMPLATE: (&str, char) = ("template", 't');
pub const OUTPUT: (&str, char) = ("output", 'o');
pub const PRINT_YAML: (&str, char) = ("print-yaml", 'y');
pub const ROLE: (&str, char) = ("role", 'r');
// Global arguments
pub const VERBOSE: (&str, char) = ("verbose", 'v');

pub const FAILURE_STATUS_CODE: i32 = 19;
pub const SUCCESS_STATUS_CODE: i32 = 0;
