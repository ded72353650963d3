//! Change classification for a watched file object

/// What happened to a watched file object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    /// Content was written
    Modified,
    /// The object was deleted
    Removed,
    /// The object was renamed away from its path
    Renamed,
}

impl ChangeKind {
    /// Returns true if the watched path no longer refers to the watched object
    pub fn detaches(&self) -> bool {
        matches!(self, ChangeKind::Removed | ChangeKind::Renamed)
    }
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeKind::Modified => write!(f, "modified"),
            ChangeKind::Removed => write!(f, "removed"),
            ChangeKind::Renamed => write!(f, "renamed"),
        }
    }
}
