use std::path::PathBuf;
use thiserror::Error;

/// Load-time failure conditions for a single skill document.
///
/// These are produced while building the registry and surfaced in the
/// [`LoadReport`](crate::skills::LoadReport); selection itself cannot fail
/// once the registry is built.
#[derive(Debug, Error)]
pub enum SkillError {
    #[error("no SKILL.md in {}", .0.display())]
    MissingDocument(PathBuf),

    #[error("failed to read {}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed header block in {}: {}", .path.display(), .reason)]
    MalformedHeader { path: PathBuf, reason: String },

    #[error("document {} has no body after the header block", .0.display())]
    MissingBody(PathBuf),

    #[error("invalid skill name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("invalid description for skill '{name}': {reason}")]
    InvalidDescription { name: String, reason: &'static str },

    /// A descriptor with no trigger keywords can never activate.
    #[error("skill '{name}' declares no trigger keywords")]
    EmptyDescriptor { name: String },

    /// Two documents declared the same name; neither is loaded.
    #[error("duplicate skill name '{name}' in registry")]
    InvalidRegistry { name: String },
}
