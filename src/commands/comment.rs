//! Comment commands.

use super::{Added, Listing, Output, section_ids};
use crate::comments::{self, NewComment};
use crate::models::Comment;
use crate::storage::Storage;
use crate::{Error, Result};
use chrono::Utc;
use serde::Serialize;

/// Add a comment to `section_id`.
///
/// The author is `author` when given (and is then remembered), else the
/// remembered author, else `default_author` from config.
pub fn comment_add(
    storage: &mut Storage,
    section_id: &str,
    text: &str,
    author: Option<&str>,
    default_author: Option<&str>,
) -> Result<Added<Comment>> {
    let explicit = author.map(str::trim).filter(|a| !a.is_empty());
    let author = match explicit {
        Some(a) => a.to_string(),
        None => {
            let stored = storage.load_author()?;
            if stored.trim().is_empty() {
                default_author.unwrap_or_default().to_string()
            } else {
                stored
            }
        }
    };

    let doc = storage.load_plan()?;
    if !section_ids(&doc).iter().any(|id| id == section_id) {
        tracing::warn!(section_id, "comment attached to a section id not in the plan");
    }

    let list = storage.load_comments()?;
    let now = Utc::now();
    let id = comments::next_comment_id(&list, now);
    let new = NewComment {
        author: &author,
        text,
        section_id,
    };
    let (next, comment) = comments::add_comment(&list, id, new, now).ok_or_else(|| {
        Error::InvalidInput(
            "comment needs a non-empty author (use --author) and text".to_string(),
        )
    })?;

    storage.save_comments(&next)?;
    if let Some(a) = explicit {
        storage.save_author(a)?;
    }
    Ok(Added {
        kind: "comment",
        index: next.len() - 1,
        item: comment,
    })
}

#[derive(Debug, Serialize)]
pub struct CommentRemoved {
    pub id: String,
    pub removed: bool,
}

impl Output for CommentRemoved {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        format!("Removed comment {}", self.id)
    }
}

/// Delete the comment with `id`.
pub fn comment_remove(storage: &mut Storage, id: &str) -> Result<CommentRemoved> {
    let list = storage.load_comments()?;
    if !list.iter().any(|c| c.id == id) {
        return Err(Error::NotFound(format!("comment '{}'", id)));
    }
    storage.save_comments(&comments::delete_comment(&list, id))?;
    Ok(CommentRemoved {
        id: id.to_string(),
        removed: true,
    })
}

/// All comments, or those attached to `section_id`, in insertion order.
pub fn comment_list(storage: &Storage, section_id: Option<&str>) -> Result<Listing<Comment>> {
    let list = storage.load_comments()?;
    let items: Vec<Comment> = match section_id {
        Some(section) => comments::comments_for_section(&list, section)
            .into_iter()
            .cloned()
            .collect(),
        None => list.iter().cloned().collect(),
    };
    Ok(Listing::new("comment", items))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comment_add_remembers_explicit_author() {
        let mut storage = Storage::in_memory();
        let added = comment_add(&mut storage, "phase-1", " Check redirects ", Some("Ana"), None).unwrap();
        assert_eq!(added.item.author, "Ana");
        assert_eq!(added.item.text, "Check redirects");
        assert_eq!(storage.load_author().unwrap(), "Ana");

        let second = comment_add(&mut storage, "phase-1", "Done", None, Some("Config")).unwrap();
        assert_eq!(second.item.author, "Ana");
        assert_ne!(second.item.id, added.item.id);
    }

    #[test]
    fn test_comment_add_falls_back_to_config_author() {
        let mut storage = Storage::in_memory();
        let added = comment_add(&mut storage, "risk-0", "Watch this", None, Some("Bo")).unwrap();
        assert_eq!(added.item.author, "Bo");
        assert_eq!(storage.load_author().unwrap(), "");
    }

    #[test]
    fn test_comment_add_requires_author_and_text() {
        let mut storage = Storage::in_memory();
        let err = comment_add(&mut storage, "phase-1", "text", None, None).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        let err = comment_add(&mut storage, "phase-1", "   ", Some("Ana"), None).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(storage.load_comments().unwrap().is_empty());
        assert_eq!(storage.load_author().unwrap(), "");
    }

    #[test]
    fn test_comment_list_and_remove() {
        let mut storage = Storage::in_memory();
        let a = comment_add(&mut storage, "phase-1", "one", Some("Ana"), None).unwrap();
        comment_add(&mut storage, "phase-10", "two", None, None).unwrap();
        comment_add(&mut storage, "phase-1", "three", None, None).unwrap();

        let phase_one = comment_list(&storage, Some("phase-1")).unwrap();
        let texts: Vec<&str> = phase_one.items.iter().map(|c| c.item.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "three"]);
        assert_eq!(comment_list(&storage, None).unwrap().count, 3);

        comment_remove(&mut storage, &a.item.id).unwrap();
        assert_eq!(comment_list(&storage, Some("phase-1")).unwrap().count, 1);
        assert!(matches!(
            comment_remove(&mut storage, &a.item.id),
            Err(Error::NotFound(_))
        ));
    }
}
