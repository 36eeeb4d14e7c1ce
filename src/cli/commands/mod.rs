//! One module per subcommand.  Each exposes an `execute` function.

pub mod add;
pub mod backup;
pub mod completions;
pub mod delete;
pub mod edit;
pub mod generate;
pub mod init;
pub mod list;
pub mod restore;
pub mod show;
pub mod version;
