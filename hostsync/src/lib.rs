// Hosts file synchronization library
// Shared modules for daemon and tests

#![warn(missing_docs)]

//! Hosts file synchronization library
//!
//! This library keeps a hosts file in step with the addresses bound to one
//! network interface. A polling [`reconciler`] compares each reading with what
//! was last written and re-renders a Jinja2 template only when the addresses
//! change.
//!
//! # Main Components
//!
//! - [`addresses`]: Interface address reader
//! - [`config`]: Configuration file parsing and validation
//! - [`error`]: Error taxonomy
//! - [`hosts_file`]: Atomic output writer
//! - [`identity`]: Hostname resolution
//! - [`reconciler`]: Change detection and reconciliation state machine
//! - [`render`]: Template context and engine adapter
//! - [`snapshot`]: Address-set comparison
//! - [`types`]: Shared data structures

pub mod addresses;
pub mod config;
pub mod error;
pub mod hosts_file;
pub mod identity;
pub mod reconciler;
pub mod render;
pub mod snapshot;
pub mod types;
