//! CLI commands

mod apply;
mod init;
mod types;
mod validate;

pub use apply::ApplyCommand;
pub use init::InitCommand;
pub use types::TypesCommand;
pub use validate::ValidateCommand;
