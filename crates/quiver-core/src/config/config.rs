use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Root directories scanned for skills, in order. Each immediate
    /// subdirectory holding a SKILL.md is one skill.
    #[serde(default = "default_skill_paths")]
    pub paths: Vec<PathBuf>,
    /// Allowlist of skill names. Empty means every valid skill loads.
    #[serde(default)]
    pub enabled: Vec<String>,
}

fn default_skill_paths() -> Vec<PathBuf> {
    match std::env::var("QUIVER_SKILLS_PATH") {
        Ok(path) if !path.is_empty() => vec![PathBuf::from(path)],
        _ => vec![PathBuf::from("skills")],
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            paths: default_skill_paths(),
            enabled: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuiverConfig {
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Cap on skill sections assembled into an injection context.
    /// 0 means unlimited.
    #[serde(default)]
    pub max_context_skills: usize,
}

impl Default for QuiverConfig {
    fn default() -> Self {
        Self {
            registry: RegistryConfig::default(),
            max_context_skills: 0,
        }
    }
}

impl QuiverConfig {
    /// Load `~/.quiver/config.json` when present, then shallow-merge a
    /// `.quiver.json` from the current directory over it.
    pub fn load() -> Result<Self> {
        let config_path = Self::resolve_path("config.json");

        let mut config = if config_path.exists() {
            let data = std::fs::read_to_string(&config_path)?;
            serde_json::from_str::<QuiverConfig>(&data)?
        } else {
            QuiverConfig::default()
        };

        let local_path = std::env::current_dir()
            .ok()
            .map(|d| d.join(".quiver.json"))
            .filter(|p| p.exists());

        if let Some(local) = local_path {
            let data = std::fs::read_to_string(local)?;
            let override_val: serde_json::Value = serde_json::from_str(&data)?;
            let mut base = serde_json::to_value(&config)?;
            if let (Some(base_obj), Some(over_obj)) =
                (base.as_object_mut(), override_val.as_object())
            {
                for (k, v) in over_obj {
                    base_obj.insert(k.clone(), v.clone());
                }
            }
            config = serde_json::from_value(base)?;
        }

        Ok(config)
    }

    pub fn resolve_path(relative: &str) -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".quiver")
            .join(relative)
    }
}
