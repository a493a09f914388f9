use crate::{command::Command, commands};

pub mod reader;
pub mod writer;

pub fn get_commands() -> Vec<Box<dyn Command>> {
    vec![
        Box::new(commands::compile::Compile::new()),
        Box::new(commands::validate::Validate::new()),
    ]
}
