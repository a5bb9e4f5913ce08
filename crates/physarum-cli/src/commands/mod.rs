//! CLI command implementations.

pub mod bench;
pub mod init;
pub mod inspect;
pub mod presets;
pub mod run;
