//! Comment-set reconciliation.
//!
//! Merging pulls comment lines from several entries into one. Comments
//! that differ only in `#` prefixes or spacing are duplicates; the first
//! spelling seen wins and later equivalents are dropped.

use std::collections::HashSet;

/// Normalizes a comment for duplicate detection: trims, then strips every
/// leading `#` or space in any mixture.
#[must_use]
pub fn normalized(comment: &str) -> String {
    comment
        .trim()
        .trim_start_matches(['#', ' '])
        .to_string()
}

/// Builds the running duplicate-detection set for a comment list.
#[must_use]
pub fn known_comments(comments: &[String]) -> HashSet<String> {
    comments.iter().map(|c| normalized(c)).collect()
}

/// Appends each source comment not already represented (by normalized
/// form) in the target, preserving source order.
pub fn extend(target: &mut Vec<String>, source: &[String]) {
    let mut known = known_comments(target);
    extend_with(target, source, &mut known);
}

/// As [`extend`], but reuses a caller-held duplicate set so several
/// unions into the same target share one running set.
pub fn extend_with(target: &mut Vec<String>, source: &[String], known: &mut HashSet<String>) {
    for comment in source {
        let stripped = normalized(comment);
        if known.insert(stripped) {
            target.push(comment.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn normalized_strips_prefixes_and_padding() {
        assert_eq!(normalized("a b"), "a b");
        assert_eq!(normalized("##  a b  "), "a b");
        assert_eq!(normalized(" ## # a b  "), "a b");
        assert_eq!(normalized(" ##    "), "");
    }

    #[test]
    fn extend_skips_normalized_duplicates() {
        let mut target = strings(&["a", "b"]);
        extend(&mut target, &strings(&["a", "c"]));
        assert_eq!(target, strings(&["a", "b", "c"]));
    }

    #[test]
    fn extend_treats_prefixed_comment_as_duplicate() {
        let mut target = strings(&["a", "b"]);
        extend(&mut target, &strings(&["#a", "c"]));
        assert_eq!(target, strings(&["a", "b", "c"]));
    }

    #[test]
    fn shared_set_survives_several_unions() {
        let mut target = strings(&["a"]);
        let mut known = known_comments(&target);
        extend_with(&mut target, &strings(&["b"]), &mut known);
        extend_with(&mut target, &strings(&["# b", "c"]), &mut known);
        assert_eq!(target, strings(&["a", "b", "c"]));
    }
}
