//! Editing of ordered sub-entry lists embedded in a parent record (profile
//! experience/education, post likes/comments). The same shape recurs at every
//! call site: prepend new entries, look up by id, remove the first match.
//!
//! Callers apply these edits as a single read-modify-write of the parent row.
//! Two concurrent requests against the same parent race and the last persisted
//! write wins; that is a documented property of the service, not something
//! this module coordinates.

use uuid::Uuid;

/// A sub-entry with its own identifier.
pub trait SubEntry {
    fn id(&self) -> Uuid;
}

/// A sub-entry carrying the identity that created it (likes, comments).
pub trait OwnedEntry: SubEntry {
    fn owner(&self) -> Uuid;
}

/// Outcome of [`toggle_owned`].
#[derive(Debug, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// Prepend an entry: sequences are kept most-recent-first.
pub fn add_front<T>(list: &mut Vec<T>, entry: T) {
    list.insert(0, entry);
}

pub fn find_by_id<T: SubEntry>(list: &[T], id: Uuid) -> Option<&T> {
    list.iter().find(|e| e.id() == id)
}

/// Remove at most one entry - the first in sequence order whose predicate
/// holds. Returns the removed entry, or `None` when nothing matched. Whether
/// a miss is an error is the caller's contract, not this function's.
pub fn remove_first_matching<T>(list: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> Option<T> {
    let idx = list.iter().position(pred)?;
    Some(list.remove(idx))
}

/// Idempotent like-style toggle: if `owner` already holds an entry, remove
/// it; otherwise prepend a fresh one. An owner can never hold two entries.
pub fn toggle_owned<T: OwnedEntry>(
    list: &mut Vec<T>,
    owner: Uuid,
    make: impl FnOnce() -> T,
) -> Toggle {
    if remove_first_matching(list, |e| e.owner() == owner).is_some() {
        Toggle::Removed
    } else {
        add_front(list, make());
        Toggle::Added
    }
}
