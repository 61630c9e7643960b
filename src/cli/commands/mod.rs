//! One module per subcommand, each exposing an `execute` function.

pub mod add;
pub mod completions;
pub mod export;
pub mod find;
pub mod import_cmd;
pub mod list;
pub mod remove;
