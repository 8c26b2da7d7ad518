//! # portal-docs
//!
//! Command line front end for the `portal-pdf` layouts.

pub mod cli;
