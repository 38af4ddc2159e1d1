//! # Vacano UI Docs MCP Server
//!
//! A Model-Context-Provider (MCP) server that keeps the vacano-ui documentation
//! in memory and exposes it to an LLM through a handful of query tools.
//!
//! ## Features
//!
//! - Clone (or pull) the documentation repository on a timer
//! - Parse component docs, guides, sidebar categories and the icon catalog
//! - Serve keyword search, exact lookup, categorized listing and icon search
//!
//! ## Modules
//!
//! - `config`: command line and environment configuration
//! - `docs`: corpus model, parsers and the in-memory store
//! - `source`: fetching the documentation tree (git or the GitHub API)
//! - `refresh`: background refresh of the corpus
//! - `server`: MCP server implementation and tools

/// Command line and environment configuration
pub mod config;
/// Corpus model, parsing and storage
pub mod docs;
/// Background corpus refresh
pub mod refresh;
/// Server implementation and MCP tools
pub mod server;
/// Documentation source fetchers
pub mod source;
