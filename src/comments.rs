// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Grouping of comment actions by the card they were posted on.
//!
//! Trello keeps comments in the board-wide action history rather than on
//! the cards themselves. [`aggregate_comments`] walks that history once and
//! pre-renders every comment so cards can look theirs up by id.

use crate::normalize::{flatten_inline, normalize_block};
use crate::parser::{Action, ActionKind};
use std::collections::HashMap;
use std::fmt::Write;

/// Rendered comments keyed by card id.
///
/// Cards without comments have no entry.
pub type CommentsByCard<'a> = HashMap<&'a str, Vec<String>>;

/// Groups comment actions by card and renders each as a list entry.
///
/// Comments keep the relative order they have in `actions`; no re-sorting
/// by date is done. Non-comment actions are skipped.
///
/// ```
/// use trello2md::comments::aggregate_comments;
/// use trello2md::parser::{Action, ActionKind};
///
/// let actions = vec![Action {
///     action_type: "commentCard".into(),
///     date: "2024-03-01".into(),
///     kind: ActionKind::Comment {
///         card_id: "c1".into(),
///         author: "Ada".into(),
///         text: "Done".into(),
///     },
/// }];
///
/// let comments = aggregate_comments(&actions);
/// assert_eq!(comments["c1"], vec!["- **Ada** (2024-03-01)\n  Done\n"]);
/// ```
#[must_use]
pub fn aggregate_comments(actions: &[Action]) -> CommentsByCard<'_> {
    let mut by_card: CommentsByCard<'_> = HashMap::new();

    for action in actions {
        if let ActionKind::Comment {
            card_id,
            author,
            text,
        } = &action.kind
        {
            by_card
                .entry(card_id.as_str())
                .or_default()
                .push(render_comment(author, &action.date, text));
        }
    }

    by_card
}

/// Renders one comment as a bulleted entry.
///
/// The author is bold and the date is shown verbatim. The body is
/// normalized and indented so it stays inside the bullet; blank lines
/// stay blank.
#[must_use]
pub fn render_comment(author: &str, date: &str, text: &str) -> String {
    let mut out = String::new();
    writeln!(out, "- **{}** ({date})", flatten_inline(author)).unwrap();

    for line in normalize_block(text).lines() {
        if line.is_empty() {
            out.push('\n');
        } else {
            writeln!(out, "  {line}").unwrap();
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment(card_id: &str, author: &str, date: &str, text: &str) -> Action {
        Action {
            action_type: "commentCard".into(),
            date: date.into(),
            kind: ActionKind::Comment {
                card_id: card_id.into(),
                author: author.into(),
                text: text.into(),
            },
        }
    }

    fn other(action_type: &str) -> Action {
        Action {
            action_type: action_type.into(),
            date: "2024-01-01T00:00:00.000Z".into(),
            kind: ActionKind::Other,
        }
    }

    #[test]
    fn renders_author_date_and_body() {
        let rendered = render_comment("Ada Lovelace", "2024-03-01T10:00:00.000Z", "Ship it");

        assert_eq!(
            rendered,
            "- **Ada Lovelace** (2024-03-01T10:00:00.000Z)\n  Ship it\n"
        );
    }

    #[test]
    fn indents_multiline_body_and_keeps_blank_lines() {
        let rendered = render_comment("Ada", "d", "first\n\nsecond");

        assert_eq!(rendered, "- **Ada** (d)\n  first\n\n  second\n");
    }

    #[test]
    fn normalizes_comment_body() {
        let rendered = render_comment("Ada", "d", "# Note #\nsee http://x.org");

        assert!(rendered.contains("  ## Note ##\n"));
        assert!(rendered.contains("  see [http://x.org](http://x.org)\n"));
    }

    #[test]
    fn renders_empty_body_as_header_only() {
        assert_eq!(render_comment("Ada", "d", ""), "- **Ada** (d)\n");
    }

    #[test]
    fn groups_by_card_preserving_order() {
        let actions = vec![
            comment("c1", "Ada", "3", "third"),
            comment("c2", "Bob", "2", "other card"),
            comment("c1", "Cy", "1", "first"),
        ];
        let grouped = aggregate_comments(&actions);

        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["c1"].len(), 2);
        assert!(grouped["c1"][0].contains("third"));
        assert!(grouped["c1"][1].contains("first"));
        assert!(grouped["c2"][0].contains("other card"));
    }

    #[test]
    fn skips_non_comment_actions() {
        let actions = vec![
            other("updateCard"),
            comment("c1", "Ada", "1", "hello"),
            other("createCard"),
        ];
        let grouped = aggregate_comments(&actions);

        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped["c1"].len(), 1);
    }

    #[test]
    fn cards_without_comments_are_absent() {
        let actions = [other("updateCard")];
        let grouped = aggregate_comments(&actions);

        assert!(grouped.is_empty());
        assert!(!grouped.contains_key("c1"));
    }
}
