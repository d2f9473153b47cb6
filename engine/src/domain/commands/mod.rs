pub mod command;
pub mod response;

pub use command::{Command, CommandName};
pub use response::{CommandResult, Response};
