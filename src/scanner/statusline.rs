//! Status line rendering
//!
//! One line per repository, laid out as `" {path} {filler}{more} {status}"`
//! and padded so its visible width is exactly the terminal width.

use crate::core::styles::{StyleRole, StyledText};
use crate::scanner::filter::RepositoryFacts;
use std::path::Path;

/// Columns kept free for the details and the status tag
const RESERVED_COLUMNS: usize = 30;
const ELLIPSIS: &str = "...";

pub fn render<F: RepositoryFacts + ?Sized>(
    path: &Path,
    facts: &F,
    line_width: usize,
) -> StyledText {
    let path = truncate_path(&path.to_string_lossy(), line_width);

    let mut details = StyledText::new();
    let mut status = StyledText::new();
    if facts.is_bare() {
        status
            .push_plain("[")
            .push_role("BARE", StyleRole::Header)
            .push_plain("]");
    } else {
        let mut tokens: Vec<StyledText> = facts
            .remote_diffs()
            .iter()
            .map(|(branch, divergence)| {
                StyledText::from(format!("{}:{}", branch, divergence).as_str())
            })
            .collect();
        if facts.has_stash() {
            let mut stash = StyledText::new();
            stash.push_role("stash", StyleRole::Header);
            tokens.push(stash);
        }
        if !tokens.is_empty() {
            details.push_plain("(");
            for (i, token) in tokens.into_iter().enumerate() {
                if i > 0 {
                    details.push_plain(",");
                }
                details.append(token);
            }
            details.push_plain(")");
        }

        let (word, role) = if facts.is_dirty() {
            ("KO", StyleRole::Invalid)
        } else {
            ("OK", StyleRole::Valid)
        };
        status
            .push_plain("[ ")
            .push_role(word, role)
            .push_plain(" ]");
    }

    let mut line = StyledText::new();
    line.push_plain(format!(" {} ", path));
    let used = line.width() + details.width() + 1 + status.width();
    line.push_plain(" ".repeat(line_width.saturating_sub(used)));
    line.append(details).push_plain(" ").append(status);
    line
}

/// Keep paths longer than the available room to their trailing characters
fn truncate_path(path: &str, line_width: usize) -> String {
    let room = line_width.saturating_sub(RESERVED_COLUMNS);
    let length = path.chars().count();
    if length <= room {
        return path.to_string();
    }
    let tail: String = path.chars().skip(length - room).collect();
    format!("{}{}", ELLIPSIS, tail)
}
