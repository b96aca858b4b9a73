// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Markdown rendering for parsed Trello boards.
//!
//! This module transforms a [`Board`] into a single Markdown document.
//! The layout is fixed so that re-rendering the same export always produces
//! byte-identical output that can be diffed.
//!
//! # Output Format
//!
//! The rendered Markdown includes:
//! - An optional header with board metadata
//! - A `# List #` heading for every visible list, in board order
//! - A `## Card ##` block for every visible card of that list, in board order
//! - The card's description, attachments and (optionally) comments
//! - `### Checklist: ... ###` sections after each card
//!
//! # Example
//!
//! ```
//! use trello2md::parser::{Board, Card, List};
//! use trello2md::renderer::{render_board, RenderOptions};
//!
//! let board = Board {
//!     name: "Roadmap".into(),
//!     short_url: String::new(),
//!     date_last_activity: String::new(),
//!     lists: vec![List { id: "l1".into(), name: "Todo".into(), closed: false }],
//!     cards: vec![Card {
//!         id: "c1".into(),
//!         name: "Write docs".into(),
//!         desc: "Cover the CLI".into(),
//!         closed: false,
//!         id_list: "l1".into(),
//!         labels: vec![],
//!         attachments: vec![],
//!         id_checklists: vec![],
//!     }],
//!     checklists: vec![],
//!     actions: vec![],
//! };
//!
//! let markdown = render_board(&board, &RenderOptions::default()).unwrap();
//!
//! assert!(markdown.starts_with("# Todo #\n\n## Write docs ##\n"));
//! assert!(markdown.contains("Cover the CLI"));
//! ```

use crate::comments::{CommentsByCard, aggregate_comments};
use crate::normalize::{flatten_inline, normalize_block};
use crate::parser::{Board, Card, Checklist};
use snafu::prelude::*;
use std::collections::{HashMap, HashSet};
use std::fmt::Write;

/// Configuration options for Markdown rendering.
///
/// Controls which optional elements are included in the rendered output.
/// Everything is off by default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct RenderOptions {
    /// Whether to start the document with a board summary block.
    pub include_header: bool,

    /// Whether cards get a `### Comments ###` section.
    pub include_comments: bool,

    /// Whether label names are appended to card titles.
    pub print_labels: bool,

    /// Whether archived lists and cards are rendered.
    ///
    /// When disabled, closed lists are skipped with all their cards, and
    /// closed cards are skipped inside open lists.
    pub include_archived: bool,

    /// Links between cards. Accepted but currently has no effect.
    pub card_links: bool,
}

impl RenderOptions {
    /// Returns `true` if an element with the given archive state is rendered.
    const fn shows(&self, closed: bool) -> bool {
        self.include_archived || !closed
    }
}

/// Error type for references that do not resolve within the board.
#[derive(Debug, Snafu)]
pub enum RenderError {
    /// A card's `idList` names a list that is not on the board.
    #[snafu(display("card {card_id} refers to unknown list {list_id}"))]
    UnknownList {
        /// The card holding the reference.
        card_id: String,
        /// The list id that was not found.
        list_id: String,
    },

    /// A card's `idChecklists` names a checklist that is not on the board.
    #[snafu(display("card {card_id} refers to unknown checklist {checklist_id}"))]
    UnknownChecklist {
        /// The card holding the reference.
        card_id: String,
        /// The checklist id that was not found.
        checklist_id: String,
    },
}

/// Id lookups over a board, built once per conversion.
#[derive(Debug)]
pub struct BoardIndex<'a> {
    checklists: HashMap<&'a str, &'a Checklist>,
    cards_by_list: HashMap<&'a str, Vec<&'a Card>>,
}

impl<'a> BoardIndex<'a> {
    /// Indexes the board's checklists and groups its cards by list.
    ///
    /// Cards keep their board order within each list.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::UnknownList`] if any card belongs to a list
    /// that is not on the board.
    pub fn new(board: &'a Board) -> Result<Self, RenderError> {
        let list_ids: HashSet<&str> = board.lists.iter().map(|l| l.id.as_str()).collect();

        let mut cards_by_list: HashMap<&str, Vec<&Card>> = HashMap::new();
        for card in &board.cards {
            ensure!(
                list_ids.contains(card.id_list.as_str()),
                UnknownListSnafu {
                    card_id: &card.id,
                    list_id: &card.id_list,
                }
            );
            cards_by_list
                .entry(card.id_list.as_str())
                .or_default()
                .push(card);
        }

        let checklists = board
            .checklists
            .iter()
            .map(|cl| (cl.id.as_str(), cl))
            .collect();

        Ok(Self {
            checklists,
            cards_by_list,
        })
    }

    /// Returns the cards of a list in board order.
    #[must_use]
    pub fn cards_in(&self, list_id: &str) -> &[&'a Card] {
        self.cards_by_list
            .get(list_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Resolves one of `card`'s checklist ids.
    fn checklist(&self, card: &Card, checklist_id: &str) -> Result<&'a Checklist, RenderError> {
        self.checklists
            .get(checklist_id)
            .copied()
            .context(UnknownChecklistSnafu {
                card_id: &card.id,
                checklist_id,
            })
    }
}

/// Renders a parsed board as Markdown.
///
/// This is the main entry point for rendering. Lists and cards appear in
/// exactly the order of the export; filtering removes elements but never
/// reorders them.
///
/// # Errors
///
/// Returns an error if a card refers to a list or checklist that does not
/// exist. Nothing is returned in that case, not even the part of the
/// document rendered before the bad reference.
pub fn render_board(board: &Board, opts: &RenderOptions) -> Result<String, RenderError> {
    let index = BoardIndex::new(board)?;

    let comments = if opts.include_comments {
        aggregate_comments(&board.actions)
    } else {
        CommentsByCard::new()
    };

    let mut out = String::new();
    if opts.include_header {
        out.push_str(&render_header(board));
    }

    for list in board.lists.iter().filter(|l| opts.shows(l.closed)) {
        writeln!(out, "# {} #\n", flatten_inline(&list.name)).unwrap();

        for card in index.cards_in(&list.id).iter().filter(|c| opts.shows(c.closed)) {
            out.push_str(&render_card(card, &comments, opts.print_labels));
            out.push_str(&render_checklists(card, &index)?);
        }
    }

    Ok(out)
}

/// Renders the board summary block.
///
/// All values are taken verbatim from the export; the counts include
/// archived lists and cards.
#[must_use]
pub fn render_header(board: &Board) -> String {
    let mut out = String::new();
    writeln!(out, "# {} #\n", flatten_inline(&board.name)).unwrap();
    writeln!(out, "- URL: [{url}]({url})", url = board.short_url).unwrap();
    writeln!(out, "- Lists: {}", board.lists.len()).unwrap();
    writeln!(out, "- Cards: {}", board.cards.len()).unwrap();
    writeln!(out, "- Last activity: {}", board.date_last_activity).unwrap();
    out.push_str("\n---\n\n");
    out
}

/// Renders one card: title, description, attachments and comments.
///
/// The sections always appear in that order with the same spacing, even
/// when empty. The comments section is only emitted if `comments` has an
/// entry for the card.
#[must_use]
pub fn render_card(card: &Card, comments: &CommentsByCard<'_>, print_labels: bool) -> String {
    let mut out = String::new();

    let labels = if print_labels {
        render_labels(card)
    } else {
        String::new()
    };
    writeln!(out, "## {} {labels}##", flatten_inline(&card.name)).unwrap();

    out.push_str(&normalize_block(&card.desc));
    out.push_str("\n\n");

    let attachments: Vec<String> = card
        .attachments
        .iter()
        .map(|a| format!("[{}]({})", flatten_inline(&a.name), a.url))
        .collect();
    out.push_str(&attachments.join("\n\n"));
    out.push_str("\n\n");

    if let Some(entries) = comments.get(card.id.as_str()) {
        out.push_str("### Comments ###\n\n");
        out.push_str(&entries.join("\n"));
        out.push('\n');
    }

    out
}

/// Formats a card's labels as `(_a_, _b_) `, or nothing if it has none.
fn render_labels(card: &Card) -> String {
    if card.labels.is_empty() {
        return String::new();
    }

    let names: Vec<String> = card
        .labels
        .iter()
        .map(|label| format!("_{}_", flatten_inline(label.display_name())))
        .collect();
    format!("({}) ", names.join(", "))
}

/// Renders a card's checklists as `###` subsections with one bullet per item.
///
/// A card without checklists still yields a blank-line separator so that
/// spacing between cards stays uniform.
///
/// # Errors
///
/// Returns [`RenderError::UnknownChecklist`] if the card refers to a
/// checklist that is not on the board.
pub fn render_checklists(card: &Card, index: &BoardIndex<'_>) -> Result<String, RenderError> {
    let mut blocks = Vec::with_capacity(card.id_checklists.len() + 1);

    for checklist_id in &card.id_checklists {
        let checklist = index.checklist(card, checklist_id)?;
        let items: Vec<String> = checklist
            .check_items
            .iter()
            .map(|item| format!("- {}", item.name))
            .collect();
        blocks.push(format!(
            "### Checklist: {} ###\n{}",
            flatten_inline(&checklist.name),
            items.join("\n")
        ));
    }

    blocks.push("\n\n".to_owned());
    Ok(blocks.join("\n\n"))
}
