pub mod emit;
pub mod errors;
pub mod events;
pub mod merge;
pub mod naming;
pub(crate) mod resources;

use errors::Error;

pub type Result<R> = std::result::Result<R, Error>;

pub const EXECUTION_ROLE_LOGICAL_ID: &str = "IamRoleLambdaExecution";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Logical id of the role whose policy receives the config statement.
    pub role_logical_id: String,
}

impl Default for CompileOptions {
    fn default() -> Self {
        CompileOptions {
            role_logical_id: String::from(EXECUTION_ROLE_LOGICAL_ID),
        }
    }
}
