//! Multi-language preview runner for a kids' coding lab.
//!
//! JavaScript snippets run in an embedded QuickJS engine with their console
//! output captured in call order. HTML and CSS snippets are packaged into
//! complete preview documents. Python snippets are forwarded to a local
//! companion server, which this crate also provides (`--serve`).

pub mod cli;
pub mod config;
pub mod handlers;
pub mod printer;
pub mod runner;
pub mod server;
