use crate::config::RegistryConfig;
use crate::error::SkillError;
use crate::skills::descriptor::{SkillDescriptor, SKILL_FILE};
use std::path::{Path, PathBuf};
use tracing::warn;

/// A document that failed to load, with its typed reason. Surfaced to the
/// caller so a partial load is visible, not silent.
#[derive(Debug)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub reason: SkillError,
}

#[derive(Debug, Default)]
pub struct ScanOutcome {
    pub skills: Vec<SkillDescriptor>,
    pub skipped: Vec<SkippedDocument>,
}

pub struct SkillLoader;

impl SkillLoader {
    /// Discover all valid skills across all configured roots, in root order.
    /// Bad documents are logged, recorded in the outcome, and skipped —
    /// never fatal to the rest of the load.
    pub fn discover(config: &RegistryConfig) -> ScanOutcome {
        let cwd = std::env::current_dir().unwrap_or_default();
        let mut outcome = ScanOutcome::default();

        for path in &config.paths {
            let dir = if path.is_absolute() {
                path.clone()
            } else {
                cwd.join(path)
            };

            if let Err(e) = Self::scan_dir(&dir, config, &mut outcome) {
                warn!("failed to scan skill directory {:?}: {}", dir, e);
            }
        }

        outcome
    }

    /// One skill per immediate subdirectory holding a SKILL.md. Entries are
    /// sorted by name so declaration order is stable across platforms.
    fn scan_dir(
        dir: &Path,
        config: &RegistryConfig,
        outcome: &mut ScanOutcome,
    ) -> std::io::Result<()> {
        if !dir.exists() {
            return Ok(());
        }

        let mut subdirs: Vec<PathBuf> = std::fs::read_dir(dir)?
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        subdirs.sort();

        for path in subdirs {
            if !path.join(SKILL_FILE).exists() {
                warn!("skipping {:?}: no {}", path, SKILL_FILE);
                outcome.skipped.push(SkippedDocument {
                    reason: SkillError::MissingDocument(path.clone()),
                    path,
                });
                continue;
            }

            match SkillDescriptor::parse(&path) {
                Ok(skill) => {
                    let allowed =
                        config.enabled.is_empty() || config.enabled.contains(&skill.name);
                    if allowed {
                        outcome.skills.push(skill);
                    }
                }
                Err(e) => {
                    warn!("skipping skill at {:?}: {}", path, e);
                    outcome.skipped.push(SkippedDocument { path, reason: e });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_skill(root: &Path, dir: &str, content: &str) {
        let skill_dir = root.join(dir);
        fs::create_dir_all(&skill_dir).expect("create skill dir");
        fs::write(skill_dir.join(SKILL_FILE), content).expect("write SKILL.md");
    }

    fn doc(name: &str, description: &str) -> String {
        format!(
            "---\nname: {}\ndescription: {}\n---\n\nInstructions.\n",
            name, description
        )
    }

    fn config_for(root: &Path) -> RegistryConfig {
        RegistryConfig {
            paths: vec![root.to_path_buf()],
            enabled: Vec::new(),
        }
    }

    #[test]
    fn discovers_one_skill_per_subdirectory() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_skill(tmp.path(), "pest-testing", &doc("pest-testing", "Write Pest tests"));
        write_skill(tmp.path(), "theming", &doc("theming", "Build storefront themes"));

        let outcome = SkillLoader::discover(&config_for(tmp.path()));
        assert_eq!(outcome.skills.len(), 2);
        assert!(outcome.skipped.is_empty());
        // sorted by directory name
        assert_eq!(outcome.skills[0].name, "pest-testing");
        assert_eq!(outcome.skills[1].name, "theming");
    }

    #[test]
    fn subdirectory_without_document_is_reported() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_skill(tmp.path(), "theming", &doc("theming", "Build storefront themes"));
        fs::create_dir_all(tmp.path().join("assets")).expect("create dir");

        let outcome = SkillLoader::discover(&config_for(tmp.path()));
        assert_eq!(outcome.skills.len(), 1);
        assert_eq!(outcome.skipped.len(), 1);
        assert!(matches!(
            outcome.skipped[0].reason,
            SkillError::MissingDocument(_)
        ));
    }

    #[test]
    fn malformed_document_is_skipped_not_fatal() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_skill(tmp.path(), "broken", "no header at all\n");
        write_skill(tmp.path(), "theming", &doc("theming", "Build storefront themes"));

        let outcome = SkillLoader::discover(&config_for(tmp.path()));
        assert_eq!(outcome.skills.len(), 1);
        assert_eq!(outcome.skills[0].name, "theming");
        assert_eq!(outcome.skipped.len(), 1);
        assert!(matches!(
            outcome.skipped[0].reason,
            SkillError::MalformedHeader { .. }
        ));
    }

    #[test]
    fn enabled_allowlist_filters_skills() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_skill(tmp.path(), "pest-testing", &doc("pest-testing", "Write Pest tests"));
        write_skill(tmp.path(), "theming", &doc("theming", "Build storefront themes"));

        let config = RegistryConfig {
            paths: vec![tmp.path().to_path_buf()],
            enabled: vec!["theming".to_string()],
        };
        let outcome = SkillLoader::discover(&config);
        assert_eq!(outcome.skills.len(), 1);
        assert_eq!(outcome.skills[0].name, "theming");
    }

    #[tokio::test]
    async fn body_is_read_back_without_the_header() {
        let tmp = tempfile::tempdir().expect("tempdir");
        write_skill(tmp.path(), "theming", &doc("theming", "Build storefront themes"));

        let outcome = SkillLoader::discover(&config_for(tmp.path()));
        let body = outcome.skills[0].body().await.expect("read body");
        assert_eq!(body, "Instructions.\n");
    }

    #[test]
    fn missing_root_yields_empty_scan() {
        let config = RegistryConfig {
            paths: vec![PathBuf::from("/nonexistent/quiver-test-root")],
            enabled: Vec::new(),
        };
        let outcome = SkillLoader::discover(&config);
        assert!(outcome.skills.is_empty());
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn roots_are_scanned_in_configured_order() {
        let tmp_a = tempfile::tempdir().expect("tempdir");
        let tmp_b = tempfile::tempdir().expect("tempdir");
        write_skill(tmp_a.path(), "zeta", &doc("zeta", "Later alphabetically"));
        write_skill(tmp_b.path(), "alpha", &doc("alpha", "Earlier alphabetically"));

        let config = RegistryConfig {
            paths: vec![tmp_a.path().to_path_buf(), tmp_b.path().to_path_buf()],
            enabled: Vec::new(),
        };
        let outcome = SkillLoader::discover(&config);
        let names: Vec<&str> = outcome.skills.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }
}
