//! One module per subcommand, each exposing `execute`.

pub mod get;
pub mod init;
pub mod list;
pub mod menu;
pub mod remove;
pub mod save;
pub mod set;
pub mod unlock;
pub mod verify;
