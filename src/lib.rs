//! UPM — unified package management for .NET projects.
//!
//! The `convert` command migrates a tree from legacy per-project package
//! management (`packages.config` files plus a central `nuget.config`) to
//! the unified model: one root `upm.dependencies` manifest and one
//! `upm.references` file per project.

/// Core types: errors, versions, paths, reporting.
pub mod core;

/// Configuration management.
pub mod config;

/// Conversion and merge logic.
pub mod convert;

/// Build-system collaborators (solution/project rewiring, install trigger).
pub mod integration;

/// Legacy package-management interop (file formats and discovery).
pub mod nuget;

pub use crate::core::error::{UpmError, UpmResult};
pub use crate::core::version::Version;
