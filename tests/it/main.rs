//! Single test binary entry point.
//!
//! Structure:
//! - integration: file -> state -> export workflows
//! - unit: properties of the parser, statistics and downsampler

mod helpers;
mod integration;
mod unit;
