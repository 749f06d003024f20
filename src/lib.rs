//! Daily nonmarket-ethics news board.
//!
//! The generator side collects news search results, classifies them into
//! Government/Nonprofit columns with a positive/negative sentiment and writes
//! a JSON feed document. The renderer side reads that document and produces
//! a static HTML page of colored story tiles.

pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod render;
pub mod services;
pub mod sources;

#[cfg(test)]
pub(crate) mod test_utils;
