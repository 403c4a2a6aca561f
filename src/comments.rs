//! Comment list operations.
//!
//! Comments live in a flat list, partitioned only by their free-form
//! `section_id`. Operations return a new list and leave their input alone.

use crate::models::Comment;
use chrono::{DateTime, Utc};
use im::Vector;

/// The ordered list of all comments.
pub type CommentList = Vector<Comment>;

/// Input for a new comment, before trimming and validation.
#[derive(Debug, Clone)]
pub struct NewComment<'a> {
    pub author: &'a str,
    pub text: &'a str,
    pub section_id: &'a str,
}

/// Generate an id for a comment created at `now`.
///
/// Ids are millisecond timestamps, bumped past the largest numeric id already
/// in `comments` so two comments in the same millisecond still differ.
/// Stored ids are read as `i128`, so an `i64::MAX` id still has a successor.
pub fn next_comment_id(comments: &CommentList, now: DateTime<Utc>) -> String {
    let millis = i128::from(now.timestamp_millis());
    let max_existing = comments
        .iter()
        .filter_map(|c| c.id.parse::<i128>().ok())
        .max();
    match max_existing {
        Some(max) if max >= millis => max.saturating_add(1).to_string(),
        _ => millis.to_string(),
    }
}

/// Append a comment.
///
/// Author and text are trimmed. Returns `None`, leaving the list untouched,
/// when either is empty after trimming. The id is not checked for uniqueness.
pub fn add_comment(
    comments: &CommentList,
    id: impl Into<String>,
    new: NewComment<'_>,
    now: DateTime<Utc>,
) -> Option<(CommentList, Comment)> {
    let author = new.author.trim();
    let text = new.text.trim();
    if author.is_empty() || text.is_empty() {
        return None;
    }

    let comment = Comment {
        id: id.into(),
        author: author.to_string(),
        text: text.to_string(),
        timestamp: now,
        section_id: new.section_id.to_string(),
    };
    let mut next = comments.clone();
    next.push_back(comment.clone());
    Some((next, comment))
}

/// Remove the comment with `id`. An unknown id leaves the list unchanged.
pub fn delete_comment(comments: &CommentList, id: &str) -> CommentList {
    comments.iter().filter(|c| c.id != id).cloned().collect()
}

/// Comments attached to `section_id`, in insertion order.
pub fn comments_for_section<'a>(comments: &'a CommentList, section_id: &str) -> Vec<&'a Comment> {
    comments
        .iter()
        .filter(|c| c.section_id == section_id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn new<'a>(author: &'a str, text: &'a str, section_id: &'a str) -> NewComment<'a> {
        NewComment {
            author,
            text,
            section_id,
        }
    }

    fn add(list: &CommentList, id: &str, section: &str) -> CommentList {
        add_comment(list, id, new("Ana", "note", section), at(0)).unwrap().0
    }

    #[test]
    fn test_add_comment_trims_and_appends() {
        let list = CommentList::new();
        let (list, comment) =
            add_comment(&list, "1", new("  Ana ", "  Ship it\n", "phase-1"), at(100)).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(comment.author, "Ana");
        assert_eq!(comment.text, "Ship it");
        assert_eq!(comment.section_id, "phase-1");
        assert_eq!(comment.timestamp, at(100));
    }

    #[test]
    fn test_add_comment_rejects_blank_author_or_text() {
        let list = add(&CommentList::new(), "1", "phase-1");
        assert!(add_comment(&list, "2", new("   ", "text", "phase-1"), at(0)).is_none());
        assert!(add_comment(&list, "2", new("Ana", "\t\n", "phase-1"), at(0)).is_none());
        assert!(add_comment(&list, "2", new("", "", "phase-1"), at(0)).is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_add_comment_allows_duplicate_ids() {
        let list = add(&add(&CommentList::new(), "1", "a"), "1", "b");
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_delete_comment() {
        let list = add(&add(&CommentList::new(), "1", "a"), "2", "a");
        let next = delete_comment(&list, "1");
        assert_eq!(next.len(), 1);
        assert_eq!(next[0].id, "2");
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_delete_missing_comment_is_noop() {
        let list = add(&CommentList::new(), "1", "a");
        assert_eq!(delete_comment(&list, "nope"), list);
    }

    #[test]
    fn test_filter_by_section_keeps_order() {
        let mut list = CommentList::new();
        for (id, section) in [("1", "phase-1"), ("2", "phase-10"), ("3", "phase-1"), ("4", "risk-0")] {
            list = add(&list, id, section);
        }
        let ids: Vec<&str> = comments_for_section(&list, "phase-1")
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
        assert!(comments_for_section(&list, "phase").is_empty());
    }

    #[test]
    fn test_next_comment_id_is_monotonic() {
        let now = at(1_700_000_000);
        let list = CommentList::new();
        assert_eq!(next_comment_id(&list, now), "1700000000000");

        let list = add(&list, "1700000000000", "a");
        assert_eq!(next_comment_id(&list, now), "1700000000001");

        let later = at(1_700_000_001);
        assert_eq!(next_comment_id(&list, later), "1700000001000");
    }

    #[test]
    fn test_next_comment_id_past_i64_max() {
        let list = add(&CommentList::new(), &i64::MAX.to_string(), "a");
        assert_eq!(next_comment_id(&list, at(5)), "9223372036854775808");

        let list = add(&list, &i128::MAX.to_string(), "a");
        assert_eq!(next_comment_id(&list, at(5)), i128::MAX.to_string());
    }

    #[test]
    fn test_next_comment_id_ignores_non_numeric_ids() {
        let list = add(&CommentList::new(), "legacy-id", "a");
        assert_eq!(next_comment_id(&list, at(5)), "5000");
    }
}
