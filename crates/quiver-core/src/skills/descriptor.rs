use crate::error::SkillError;
use crate::skills::matcher::word_tokens;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const SKILL_FILE: &str = "SKILL.md";

/// Words too generic to act as activation triggers. Applied only when a
/// document does not declare an explicit `keywords` list.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "with", "that", "this", "from", "into", "when", "what", "how", "are",
    "can", "use", "using", "used", "all", "any", "not", "has", "have", "its", "via", "per", "you",
    "your", "will", "within", "without", "about", "such", "also", "only", "each", "them", "they",
    "then", "than", "more", "most", "like", "new", "one", "two",
];

/// The structured record extracted from a skill document's header block,
/// plus the keyword set that decides when the skill activates. The body is
/// not held in memory; it is read back from disk on demand.
#[derive(Debug, Clone)]
pub struct SkillDescriptor {
    pub name: String,
    pub description: String,
    /// Lowercase trigger keywords/phrases, deduplicated, in declaration
    /// order. Never empty for a loaded descriptor.
    pub keywords: Vec<String>,
    pub license: Option<String>,
    /// Nested header metadata, carried opaquely.
    pub metadata: BTreeMap<String, serde_yaml::Value>,
    pub(crate) skill_dir: PathBuf,
}

#[derive(Deserialize)]
struct Frontmatter {
    name: String,
    description: String,
    #[serde(default)]
    license: Option<String>,
    #[serde(default)]
    metadata: BTreeMap<String, serde_yaml::Value>,
    #[serde(default)]
    keywords: Vec<String>,
}

impl SkillDescriptor {
    /// Parse the `SKILL.md` inside `skill_dir` into a descriptor.
    pub fn parse(skill_dir: &Path) -> Result<Self, SkillError> {
        let skill_md = skill_dir.join(SKILL_FILE);
        if !skill_md.exists() {
            return Err(SkillError::MissingDocument(skill_dir.to_path_buf()));
        }
        let content = std::fs::read_to_string(&skill_md).map_err(|e| SkillError::Unreadable {
            path: skill_md,
            source: e,
        })?;
        Self::parse_document(&content, skill_dir)
    }

    pub(crate) fn parse_document(content: &str, skill_dir: &Path) -> Result<Self, SkillError> {
        let skill_md = skill_dir.join(SKILL_FILE);
        let fm = parse_frontmatter(content, &skill_md)?;
        validate_name(&fm.name)?;
        validate_description(&fm.name, &fm.description)?;

        if strip_frontmatter(content).trim().is_empty() {
            return Err(SkillError::MissingBody(skill_md));
        }

        let keywords = if fm.keywords.is_empty() {
            extract_keywords(&fm.description)
        } else {
            normalize_keywords(&fm.keywords)
        };
        if keywords.is_empty() {
            return Err(SkillError::EmptyDescriptor { name: fm.name });
        }

        Ok(Self {
            name: fm.name,
            description: fm.description,
            keywords,
            license: fm.license,
            metadata: fm.metadata,
            skill_dir: skill_dir.to_path_buf(),
        })
    }

    /// Load the opaque body text — everything after the header block.
    pub async fn body(&self) -> anyhow::Result<String> {
        let content = tokio::fs::read_to_string(self.skill_dir.join(SKILL_FILE)).await?;
        Ok(strip_frontmatter(&content))
    }

    /// One-line form used in listings and overview blocks.
    pub fn summary(&self) -> String {
        format!("- **{}**: {}", self.name, self.description)
    }
}

fn parse_frontmatter(content: &str, path: &Path) -> Result<Frontmatter, SkillError> {
    let content = content.trim_start();
    if !content.starts_with("---") {
        return Err(SkillError::MalformedHeader {
            path: path.to_path_buf(),
            reason: "missing YAML frontmatter".to_string(),
        });
    }
    let rest = &content[3..];
    let end = rest.find("\n---").ok_or_else(|| SkillError::MalformedHeader {
        path: path.to_path_buf(),
        reason: "frontmatter not closed with ---".to_string(),
    })?;
    serde_yaml::from_str(&rest[..end]).map_err(|e| SkillError::MalformedHeader {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

pub(crate) fn strip_frontmatter(content: &str) -> String {
    let content = content.trim_start();
    if !content.starts_with("---") {
        return content.to_string();
    }
    let rest = &content[3..];
    if let Some(end) = rest.find("\n---") {
        rest[end + 4..].trim_start_matches('\n').to_string()
    } else {
        content.to_string()
    }
}

/// Derive trigger keywords from the description: lowercase word tokens of
/// length >= 3, minus stopwords, deduplicated in order of first appearance.
fn extract_keywords(description: &str) -> Vec<String> {
    let mut keywords = Vec::new();
    for token in word_tokens(description) {
        if token.len() < 3 || STOPWORDS.contains(&token.as_str()) {
            continue;
        }
        if !keywords.contains(&token) {
            keywords.push(token);
        }
    }
    keywords
}

/// Lowercase and deduplicate an explicit keyword list, dropping blanks.
fn normalize_keywords(raw: &[String]) -> Vec<String> {
    let mut keywords = Vec::new();
    for kw in raw {
        let kw = kw.trim().to_lowercase();
        if kw.is_empty() {
            continue;
        }
        if !keywords.contains(&kw) {
            keywords.push(kw);
        }
    }
    keywords
}

fn validate_name(name: &str) -> Result<(), SkillError> {
    if name.is_empty() || name.len() > 64 {
        return Err(SkillError::InvalidName {
            name: name.to_string(),
            reason: "must be 1-64 characters",
        });
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(SkillError::InvalidName {
            name: name.to_string(),
            reason: "must match [a-z0-9-]",
        });
    }
    Ok(())
}

fn validate_description(name: &str, desc: &str) -> Result<(), SkillError> {
    if desc.is_empty() {
        return Err(SkillError::InvalidDescription {
            name: name.to_string(),
            reason: "must not be empty",
        });
    }
    if desc.len() > 1024 {
        return Err(SkillError::InvalidDescription {
            name: name.to_string(),
            reason: "must be <= 1024 characters",
        });
    }
    Ok(())
}
