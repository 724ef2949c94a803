mod command_result;
pub mod init;
pub mod list;
pub mod merge;

pub use command_result::*;
