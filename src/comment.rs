//! Heuristic commentary for sessions logged without an explicit comment.
//!
//! Rules are evaluated in a fixed order and their remarks joined with newlines,
//! followed by a closing paragraph that is always present.

pub const PURPOSE_CLEAR: &str = "✓ The purpose of the change is clearly described";
pub const PURPOSE_ELABORATE: &str =
    "! Describing the purpose in a little more detail will make it easier to look back on later";
pub const CHANGES_SPECIFIC: &str = "✓ Specific file or function names are recorded";
pub const ERRORS_RECORDED: &str =
    "✓ Errors and their resolutions are recorded. They will be a useful reference later";
pub const CLOSING: &str = "\n[Third-party engineer's view]\n\
The granularity of this record is appropriate. \
Keeping up this pace will make reviewing and learning from development efficient.";

/// Purpose length, in UTF-16 code units, above which it counts as clearly described.
const PURPOSE_MIN_UNITS: usize = 50;

/// Substrings in `changes` that indicate file- or function-level detail.
const SPECIFICITY_MARKERS: &[&str] = &["file", "function"];

/// Inputs the heuristic looks at.
#[derive(Debug, Clone, Copy)]
pub struct CommentInput<'a> {
    pub purpose: &'a str,
    pub changes: &'a str,
    pub errors: Option<&'a str>,
}

type Rule = fn(&CommentInput<'_>) -> Option<&'static str>;

const RULES: &[Rule] = &[purpose_clarity, change_specificity, errors_recorded];

fn purpose_clarity(input: &CommentInput<'_>) -> Option<&'static str> {
    if input.purpose.encode_utf16().count() > PURPOSE_MIN_UNITS {
        Some(PURPOSE_CLEAR)
    } else {
        Some(PURPOSE_ELABORATE)
    }
}

fn change_specificity(input: &CommentInput<'_>) -> Option<&'static str> {
    SPECIFICITY_MARKERS
        .iter()
        .any(|marker| input.changes.contains(*marker))
        .then_some(CHANGES_SPECIFIC)
}

fn errors_recorded(input: &CommentInput<'_>) -> Option<&'static str> {
    input
        .errors
        .is_some_and(|e| !e.is_empty())
        .then_some(ERRORS_RECORDED)
}

/// Generate commentary for a session.
pub fn generate_comment(purpose: &str, changes: &str, errors: Option<&str>) -> String {
    let input = CommentInput {
        purpose,
        changes,
        errors,
    };
    let mut remarks: Vec<&str> = RULES.iter().filter_map(|rule| rule(&input)).collect();
    remarks.push(CLOSING);
    remarks.join("\n")
}
