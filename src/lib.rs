// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Convert Trello board exports to Markdown.
//!
//! This crate provides parsing and rendering functionality for transforming
//! a Trello board's JSON export into a single Markdown document suitable for
//! archival or printing.
//!
//! # Overview
//!
//! A Trello export holds lists, cards, checklists and the board's action
//! history in one JSON file. This crate:
//!
//! 1. Parses the JSON structure into typed Rust representations
//! 2. Normalizes free text (headings, bare URLs, embedded newlines)
//! 3. Renders lists, cards, checklists and comments as nested Markdown
//!
//! # Example
//!
//! ```no_run
//! use trello2md::{parser, renderer};
//!
//! let json = std::fs::read_to_string("board.json").unwrap();
//! let board = parser::parse_board(&json).unwrap();
//!
//! let opts = renderer::RenderOptions {
//!     print_labels: true,
//!     include_comments: true,
//!     ..Default::default()
//! };
//!
//! let markdown = renderer::render_board(&board, &opts).unwrap();
//! println!("{markdown}");
//! ```
//!
//! # Modules
//!
//! - [`parser`]: JSON parsing and type definitions for Trello board exports
//! - [`normalize`]: Line-level cleanup of free text fields
//! - [`comments`]: Grouping of comment actions by card
//! - [`renderer`]: Markdown generation with configurable output options

#![deny(missing_docs)]

pub mod comments;
pub mod normalize;
pub mod parser;
pub mod renderer;
