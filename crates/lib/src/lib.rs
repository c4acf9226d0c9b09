//! shipkit-lib: packaging and build tracking for native applications
//!
//! This crate provides the pieces behind the `shipkit` command:
//! - `Variables`: ordered, single-pass resolution of `{name}` path templates
//! - `Manifest`: profiles of resources plus tracker settings, read from TOML
//! - `package`: the clean, create and copy pipeline for a resolved profile
//! - `tracker`: line counting and the persisted build counter

pub mod consts;
pub mod init;
pub mod manifest;
pub mod package;
pub mod resource;
pub mod template;
pub mod tracker;
pub mod util;
pub mod vars;
