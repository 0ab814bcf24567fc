//! Diff rendering for dry-run patch previews.

use crate::transform::FileChange;
use similar::{ChangeTag, TextDiff};
use std::fmt::{self, Write};

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// Renders a unified diff of one planned change, optionally with ANSI colours.
///
/// Unmodified changes render as an empty string.
pub fn render(change: &FileChange, color: bool) -> String {
    if !change.is_modified() {
        return String::new();
    }

    let diff = TextDiff::from_lines(&change.original, &change.transformed);
    let mut output = String::new();
    let paint = |tag: ChangeTag| match (color, tag) {
        (false, _) | (true, ChangeTag::Equal) => ("", ""),
        (true, ChangeTag::Delete) => (RED, RESET),
        (true, ChangeTag::Insert) => (GREEN, RESET),
    };
    let (head, head_reset) = if color { (CYAN, RESET) } else { ("", "") };

    let path = change.path.display();
    let _ = writeln!(output, "{head}--- a/{path}{head_reset}");
    let _ = writeln!(output, "{head}+++ b/{path}{head_reset}");

    for (idx, group) in diff.grouped_ops(3).iter().enumerate() {
        if idx > 0 {
            output.push('\n');
        }
        for op in group {
            for line in diff.iter_changes(op) {
                let sign = match line.tag() {
                    ChangeTag::Delete => '-',
                    ChangeTag::Insert => '+',
                    ChangeTag::Equal => ' ',
                };
                let (start, end) = paint(line.tag());
                let _ = write!(output, "{start}{sign}{}{end}", line.value());
                if line.missing_newline() {
                    output.push('\n');
                }
            }
        }
    }

    output
}

/// Renders every modified change, separated by blank lines.
pub fn render_all<'a>(changes: impl IntoIterator<Item = &'a FileChange>, color: bool) -> String {
    changes
        .into_iter()
        .filter(|c| c.is_modified())
        .map(|c| render(c, color))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Line-level totals across planned changes.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DiffSummary {
    pub files_changed: usize,
    pub insertions: usize,
    pub deletions: usize,
}

impl DiffSummary {
    /// Summarises a set of planned changes.
    pub fn from_changes<'a>(changes: impl IntoIterator<Item = &'a FileChange>) -> Self {
        let mut summary = Self::default();
        for change in changes {
            let mut touched = false;
            let diff = TextDiff::from_lines(&change.original, &change.transformed);
            for line in diff.iter_all_changes() {
                match line.tag() {
                    ChangeTag::Insert => summary.insertions += 1,
                    ChangeTag::Delete => summary.deletions += 1,
                    ChangeTag::Equal => continue,
                }
                touched = true;
            }
            if touched {
                summary.files_changed += 1;
            }
        }
        summary
    }
}

impl fmt::Display for DiffSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} file(s) changed, {} insertions(+), {} deletions(-)",
            self.files_changed, self.insertions, self.deletions
        )
    }
}
