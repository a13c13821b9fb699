// coursegraph - content store to Neo4j csv export
// Copyright (c) 2025 coursegraph Contributors
// Licensed under the MIT License

//! # coursegraph - content store to Neo4j export
//!
//! coursegraph walks a learning platform's content store course by course
//! and writes the course trees as csv files ready for `neo4j-import`: one
//! file per block type (the node label) and a `relationships.csv` holding
//! every parent/child edge.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Serializing** content blocks to flat csv records with a stable column
//!   list per block type
//! - **Writing** the per-type node files and the edge file, appending across
//!   courses
//! - **Generating** the `neo4j-import` command for the output directory
//! - **Uploading** the files to object storage
//! - **Extracting** plain text from html blocks
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (export, import command, html text, courses)
//! - [`adapters`] - Content store and object storage integrations
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use coursegraph::adapters::modulestore::JsonContentStore;
//! use coursegraph::core::export::{CsvDirectory, ExportCoordinator};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(JsonContentStore::open("/srv/course_exports").await?);
//!     let csv_dir = CsvDirectory::new("/tmp/csvs")?;
//!     csv_dir.clear()?;
//!
//!     let mut coordinator = ExportCoordinator::new(store, csv_dir);
//!     let summary = coordinator.dump_to_csv().await?;
//!
//!     println!("Dumped {} blocks", summary.total_blocks);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`domain::Result`], whose error type is
//! [`domain::CourseGraphError`]:
//!
//! ```rust,no_run
//! use coursegraph::domain::CourseGraphError;
//!
//! fn example() -> Result<(), CourseGraphError> {
//!     let config = coursegraph::config::load_config("coursegraph.toml")?;
//!     println!("{}", config.export.csv_dir);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
