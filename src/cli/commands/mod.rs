//! CLI command implementations
//!
//! Each command returns its process exit code:
//! 0 success, 2 configuration error, 4 connection error, 5 fatal error.

pub mod children;
pub mod export;
pub mod init;
pub mod validate;
