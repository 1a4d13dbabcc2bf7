use crate::config::RegistryConfig;
use crate::error::SkillError;
use crate::skills::descriptor::{SkillDescriptor, SKILL_FILE};
use crate::skills::loader::{SkillLoader, SkippedDocument};
use std::collections::HashMap;
use tracing::{info, warn};

/// Everything that did not make it into the registry, surfaced to the
/// caller. An empty report means every discovered document loaded cleanly.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub skipped: Vec<SkippedDocument>,
}

/// The in-memory collection of all loaded descriptors. Built once, then
/// read-only for the process lifetime, so concurrent selection needs no
/// coordination.
pub struct SkillRegistry {
    skills: Vec<SkillDescriptor>,
}

impl SkillRegistry {
    /// Scan the configured roots and build the registry. Load is
    /// partial-failure tolerant: a bad document costs only that descriptor,
    /// and the report lists every skip with its reason.
    pub fn load(config: &RegistryConfig) -> (Self, LoadReport) {
        let outcome = SkillLoader::discover(config);
        let (registry, mut report) = Self::from_descriptors(outcome.skills);
        report.skipped.extend(outcome.skipped);
        info!(count = registry.len(), "skill registry loaded");
        (registry, report)
    }

    /// Build a registry from already-parsed descriptors, enforcing name
    /// uniqueness. When two descriptors share a name, the whole pair is
    /// dropped and reported — neither half of an ambiguous pair activates.
    pub fn from_descriptors(descriptors: Vec<SkillDescriptor>) -> (Self, LoadReport) {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for skill in &descriptors {
            *counts.entry(skill.name.clone()).or_insert(0) += 1;
        }

        let mut skills = Vec::with_capacity(descriptors.len());
        let mut report = LoadReport::default();
        for skill in descriptors {
            if counts[&skill.name] > 1 {
                warn!(skill = %skill.name, "duplicate skill name, dropping");
                report.skipped.push(SkippedDocument {
                    path: skill.skill_dir.join(SKILL_FILE),
                    reason: SkillError::InvalidRegistry { name: skill.name },
                });
            } else {
                skills.push(skill);
            }
        }

        (Self { skills }, report)
    }

    /// All descriptors, in declaration order.
    pub fn skills(&self) -> &[SkillDescriptor] {
        &self.skills
    }

    pub fn get(&self, name: &str) -> Option<&SkillDescriptor> {
        self.skills.iter().find(|s| s.name == name)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Markdown block listing every skill's name and description, for
    /// injection into a downstream agent's prompt. Empty string when no
    /// skills are loaded.
    pub fn overview(&self) -> String {
        if self.skills.is_empty() {
            return String::new();
        }
        let lines = self
            .skills
            .iter()
            .map(|s| s.summary())
            .collect::<Vec<_>>()
            .join("\n");
        format!("## Available Skills\n\n{}", lines)
    }
}
