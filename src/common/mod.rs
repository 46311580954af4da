//! # Common Components
//!
//! Shared utilities and data structures used by both the signing and the
//! transfer clients.
//!
//! ## Modules
//!
//! - [`config`]: Configuration records and TOML loading
//! - [`errors`]: Error taxonomy and collaborator failure normalization
//! - [`status`]: Signing service status code table
//! - [`logging`]: Logger setup

pub mod config;
pub mod errors;
pub mod logging;
pub mod status;
