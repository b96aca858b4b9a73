// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! JSON parsing for Trello board exports.
//!
//! This module handles deserialization of the JSON document produced by
//! Trello's "Export as JSON" board menu entry. Only the fields needed for
//! rendering are modeled; everything else in the export is ignored.
//!
//! # Format Overview
//!
//! A board export contains:
//! - Board metadata (name, short URL, last activity)
//! - Flat sequences of lists, cards and checklists, cross-referenced by id
//! - The board's action history, of which only `commentCard` actions matter
//!
//! # Example
//!
//! ```
//! use trello2md::parser::parse_board;
//!
//! let json = r#"{
//!     "name": "Roadmap",
//!     "shortUrl": "https://trello.com/b/abc123",
//!     "dateLastActivity": "2024-03-01T10:00:00.000Z",
//!     "lists": [{ "id": "l1", "name": "Todo", "closed": false }],
//!     "cards": [{
//!         "id": "c1",
//!         "name": "Write docs",
//!         "desc": "",
//!         "closed": false,
//!         "idList": "l1"
//!     }]
//! }"#;
//!
//! let board = parse_board(json).unwrap();
//! assert_eq!(board.cards[0].id_list, "l1");
//! ```

use serde::Deserialize;
use snafu::prelude::*;

/// Error type for JSON parsing failures.
#[derive(Debug, Snafu)]
pub enum ParseError {
    /// Failed to parse JSON content, or a required field was absent.
    #[snafu(display("failed to parse JSON: {source}"))]
    Json {
        /// The underlying JSON parsing error.
        source: serde_json::Error,
    },
}

/// The root structure of a Trello board export.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// The board's display name.
    pub name: String,

    /// Short permalink to the board (e.g. `https://trello.com/b/abc123`).
    pub short_url: String,

    /// Timestamp of the last board activity, exactly as exported.
    pub date_last_activity: String,

    /// Lists in display order.
    pub lists: Vec<List>,

    /// Cards in display order, across all lists.
    pub cards: Vec<Card>,

    /// All checklists on the board, referenced from cards by id.
    ///
    /// Only read through card references, so a dangling id is reported
    /// when the card is rendered.
    #[serde(default)]
    pub checklists: Vec<Checklist>,

    /// The board's action history, in export order.
    ///
    /// Only needed for comments.
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// A column of cards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct List {
    /// Unique list identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Whether the list is archived.
    pub closed: bool,
}

/// A single card.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    /// Unique card identifier.
    pub id: String,

    /// Card title.
    pub name: String,

    /// Free-text description, usually Markdown written by the board's users.
    pub desc: String,

    /// Whether the card is archived.
    pub closed: bool,

    /// Identifier of the list that owns this card.
    pub id_list: String,

    /// Labels in the order Trello shows them.
    #[serde(default)]
    pub labels: Vec<Label>,

    /// Attachments in upload order.
    #[serde(default)]
    pub attachments: Vec<Attachment>,

    /// Identifiers of the card's checklists, in display order.
    #[serde(default)]
    pub id_checklists: Vec<String>,
}

/// A colored tag on a card.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Label {
    /// Label text. Trello allows this to be empty.
    pub name: String,
    /// Label color (e.g. "green"). `None` for colorless labels.
    #[serde(default)]
    pub color: Option<String>,
}

impl Label {
    /// Returns the text used to display this label.
    ///
    /// Unnamed labels are identified by their color.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.color.as_deref().unwrap_or_default()
        } else {
            &self.name
        }
    }
}

/// A file or link attached to a card.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Attachment {
    /// Display name of the attachment.
    pub name: String,
    /// Where the attachment lives.
    pub url: String,
}

/// A named group of check items.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    /// Unique checklist identifier.
    pub id: String,
    /// Checklist title.
    pub name: String,
    /// Items in display order.
    #[serde(default)]
    pub check_items: Vec<CheckItem>,
}

/// One entry of a checklist.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckItem {
    /// Item text.
    pub name: String,
}

/// An event from the board's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The raw Trello action type (e.g. "commentCard", "updateCard").
    pub action_type: String,

    /// When the action happened, exactly as exported.
    pub date: String,

    /// The decoded payload for action types we render.
    pub kind: ActionKind,
}

/// The payload of an [`Action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    /// A comment posted on a card.
    Comment {
        /// The card the comment was posted on.
        card_id: String,
        /// Full name of the commenting member.
        author: String,
        /// Comment body, usually Markdown.
        text: String,
    },

    /// Any other action type. Not rendered.
    Other,
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error as _;

        let value = serde_json::Value::deserialize(deserializer)?;

        let action_type =
            get_string(&value, &["type"]).ok_or_else(|| D::Error::missing_field("type"))?;
        let date = get_string(&value, &["date"]).ok_or_else(|| D::Error::missing_field("date"))?;

        // Comment fields are required; other action types carry arbitrary data.
        let kind = if action_type == "commentCard" {
            ActionKind::Comment {
                card_id: get_string(&value, &["data", "card", "id"])
                    .ok_or_else(|| D::Error::missing_field("data.card.id"))?,
                author: get_string(&value, &["memberCreator", "fullName"])
                    .ok_or_else(|| D::Error::missing_field("memberCreator.fullName"))?,
                text: get_string(&value, &["data", "text"])
                    .ok_or_else(|| D::Error::missing_field("data.text"))?,
            }
        } else {
            ActionKind::Other
        };

        Ok(Self {
            action_type,
            date,
            kind,
        })
    }
}

/// Navigates a JSON path and returns the string value at the end.
///
/// # Arguments
///
/// * `value` - The root JSON value to navigate from
/// * `path` - A sequence of keys to follow through the JSON structure
fn get_str<'a>(value: &'a serde_json::Value, path: &[&str]) -> Option<&'a str> {
    let mut current = value;
    for key in path {
        current = current.get(*key)?;
    }
    current.as_str()
}

/// Like [`get_str`] but returns an owned `String`.
fn get_string(value: &serde_json::Value, path: &[&str]) -> Option<String> {
    get_str(value, path).map(str::to_owned)
}

/// Parses a JSON string into a [`Board`] structure.
///
/// This is the main entry point for parsing Trello exports.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or a required field (such as
/// the board's `lists` or a card's `desc`) is missing.
///
/// # Example
///
/// ```
/// use trello2md::parser::parse_board;
///
/// let json = r#"{
///     "name": "Empty",
///     "shortUrl": "https://trello.com/b/abc123",
///     "dateLastActivity": "2024-03-01T10:00:00.000Z",
///     "lists": [],
///     "cards": []
/// }"#;
///
/// let board = parse_board(json).unwrap();
/// assert_eq!(board.name, "Empty");
/// assert!(board.checklists.is_empty());
/// ```
pub fn parse_board(json_str: &str) -> Result<Board, ParseError> {
    serde_json::from_str(json_str).context(JsonSnafu)
}
