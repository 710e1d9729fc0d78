//! # targz Command Modules
//!
//! File: cli/src/commands/mod.rs
//! Author: Christi Mahu
//!
//! ## Overview
//!
//! Command handlers invoked from `main.rs`. `targz` has a single command, so
//! its arguments are flattened into the top-level parser rather than exposed
//! as a subcommand.
//!

/// Archive-and-compress command (`targz [OPTIONS] <PATH>...`).
pub mod archive;
