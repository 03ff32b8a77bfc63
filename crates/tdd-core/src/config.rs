use crate::classifier::{default_rules, Classifier, KeywordRule, GREEN_KEYWORDS, RED_KEYWORDS, REFACTOR_KEYWORDS};
use crate::detect::{self, ProjectProfile};
use crate::error::{Result, TddError};
use crate::paths;
use crate::roadmap::RoadmapPhase;
use crate::types::Phase;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// RulesConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    #[serde(default = "default_min_coverage")]
    pub minimum_coverage: u32,
}

fn default_min_coverage() -> u32 {
    90
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            minimum_coverage: default_min_coverage(),
        }
    }
}

// ---------------------------------------------------------------------------
// KeywordsConfig
// ---------------------------------------------------------------------------

/// Keyword overrides. Evaluation order is always red, green, refactor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordsConfig {
    #[serde(default = "default_red")]
    pub red: Vec<String>,
    #[serde(default = "default_green")]
    pub green: Vec<String>,
    #[serde(default = "default_refactor")]
    pub refactor: Vec<String>,
}

fn to_owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|s| s.to_string()).collect()
}

fn default_red() -> Vec<String> {
    to_owned(RED_KEYWORDS)
}

fn default_green() -> Vec<String> {
    to_owned(GREEN_KEYWORDS)
}

fn default_refactor() -> Vec<String> {
    to_owned(REFACTOR_KEYWORDS)
}

impl Default for KeywordsConfig {
    fn default() -> Self {
        Self {
            red: default_red(),
            green: default_green(),
            refactor: default_refactor(),
        }
    }
}

impl KeywordsConfig {
    pub fn rules(&self) -> Vec<KeywordRule> {
        vec![
            KeywordRule::new(Phase::Red, self.red.iter().cloned()),
            KeywordRule::new(Phase::Green, self.green.iter().cloned()),
            KeywordRule::new(Phase::Refactor, self.refactor.iter().cloned()),
        ]
    }
}

// ---------------------------------------------------------------------------
// ProjectConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(flatten)]
    pub profile: ProjectProfile,
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub project: ProjectConfig,
    #[serde(default)]
    pub rules: RulesConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<KeywordsConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roadmap: Vec<RoadmapPhase>,
}

fn default_version() -> u32 {
    1
}

impl Config {
    pub fn new(project_name: impl Into<String>, profile: ProjectProfile) -> Self {
        Self {
            version: 1,
            project: ProjectConfig {
                name: project_name.into(),
                profile,
            },
            rules: RulesConfig::default(),
            keywords: None,
            roadmap: Vec::new(),
        }
    }

    /// Config for `root` built from what is on disk, named after the directory.
    pub fn detect(root: &Path) -> Self {
        let name = root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "project".to_string());
        Self::new(name, detect::detect_project(root))
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(TddError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Saved config, or a freshly detected one when `tdd init` was never run.
    pub fn load_or_detect(root: &Path) -> Result<Self> {
        match Self::load(root) {
            Err(TddError::NotInitialized) => Ok(Self::detect(root)),
            other => other,
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn classifier(&self) -> Classifier {
        match &self.keywords {
            Some(k) => Classifier::new(k.rules()),
            None => Classifier::new(default_rules()),
        }
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.rules.minimum_coverage > 100 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!(
                    "rules.minimum_coverage is {} but must be at most 100",
                    self.rules.minimum_coverage
                ),
            });
        }

        let rules = self.classifier().rules().to_vec();
        let mut owner: HashMap<&str, Phase> = HashMap::new();
        for rule in &rules {
            if rule.keywords.iter().all(|k| k.trim().is_empty()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("no keywords configured for {}", rule.phase),
                });
            }
            for keyword in &rule.keywords {
                match owner.get(keyword.as_str()) {
                    Some(first) if *first != rule.phase => warnings.push(ConfigWarning {
                        level: WarnLevel::Warning,
                        message: format!(
                            "keyword '{keyword}' is listed for {first} and {}; {first} always wins",
                            rule.phase
                        ),
                    }),
                    Some(_) => {}
                    None => {
                        owner.insert(keyword.as_str(), rule.phase);
                    }
                }
            }
        }

        let mut seen = HashSet::new();
        for phase in &self.roadmap {
            if paths::validate_slug(&phase.slug).is_err() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("roadmap phase slug '{}' is not a valid slug", phase.slug),
                });
            }
            if !seen.insert(phase.slug.as_str()) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: format!("roadmap phase '{}' is defined more than once", phase.slug),
                });
            }
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
