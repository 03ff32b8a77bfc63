use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

// ---------------------------------------------------------------------------
// ProjectKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectKind {
    PythonPoetry,
    PythonPip,
    Nodejs,
    Rust,
    Go,
    Unknown,
}

impl ProjectKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectKind::PythonPoetry => "python-poetry",
            ProjectKind::PythonPip => "python-pip",
            ProjectKind::Nodejs => "nodejs",
            ProjectKind::Rust => "rust",
            ProjectKind::Go => "go",
            ProjectKind::Unknown => "unknown",
        }
    }

    pub fn test_commands(self) -> &'static [&'static str] {
        match self {
            ProjectKind::PythonPoetry => &["poetry run pytest tests/ -v", "poetry run pytest tests/ --cov=src"],
            ProjectKind::PythonPip => &["python -m pytest tests/ -v", "python -m pytest tests/ --cov=src"],
            ProjectKind::Nodejs => &["npm test", "npm run test:coverage"],
            ProjectKind::Rust => &["cargo test", "cargo test --verbose"],
            ProjectKind::Go => &["go test ./...", "go test -v ./..."],
            ProjectKind::Unknown => &[],
        }
    }

    pub fn build_commands(self) -> &'static [&'static str] {
        match self {
            ProjectKind::PythonPoetry => &["poetry install", "poetry build"],
            ProjectKind::PythonPip => &["pip install -r requirements.txt"],
            ProjectKind::Nodejs => &["npm install", "npm run build"],
            ProjectKind::Rust => &["cargo build", "cargo build --release"],
            ProjectKind::Go => &["go build", "go mod tidy"],
            ProjectKind::Unknown => &[],
        }
    }
}

impl fmt::Display for ProjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Detection
// ---------------------------------------------------------------------------

/// Marker files checked in order; the first one present decides the kind.
const MARKERS: &[(&str, ProjectKind)] = &[
    ("pyproject.toml", ProjectKind::PythonPoetry),
    ("requirements.txt", ProjectKind::PythonPip),
    ("package.json", ProjectKind::Nodejs),
    ("Cargo.toml", ProjectKind::Rust),
    ("go.mod", ProjectKind::Go),
];

const COMMON_DIRS: &[&str] = &["src", "tests", "test", "lib", "docs", "examples"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectProfile {
    pub kind: ProjectKind,
    #[serde(default)]
    pub test_commands: Vec<String>,
    #[serde(default)]
    pub build_commands: Vec<String>,
    /// Common top-level directories that exist in the project.
    #[serde(default)]
    pub structure: Vec<String>,
}

impl ProjectProfile {
    pub fn for_kind(kind: ProjectKind) -> Self {
        Self {
            kind,
            test_commands: kind.test_commands().iter().map(|s| s.to_string()).collect(),
            build_commands: kind.build_commands().iter().map(|s| s.to_string()).collect(),
            structure: Vec::new(),
        }
    }

    /// Primary test command, for reports.
    pub fn test_command(&self) -> &str {
        self.test_commands.first().map(|s| s.as_str()).unwrap_or("<your test command>")
    }
}

pub fn detect_kind(root: &Path) -> ProjectKind {
    MARKERS
        .iter()
        .find(|(marker, _)| root.join(marker).exists())
        .map(|(_, kind)| *kind)
        .unwrap_or(ProjectKind::Unknown)
}

pub fn detect_project(root: &Path) -> ProjectProfile {
    let mut profile = ProjectProfile::for_kind(detect_kind(root));
    profile.structure = COMMON_DIRS
        .iter()
        .filter(|d| root.join(d).is_dir())
        .map(|d| d.to_string())
        .collect();
    tracing::debug!(kind = %profile.kind, root = %root.display(), "detected project");
    profile
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_dir_is_unknown() {
        let dir = TempDir::new().unwrap();
        let p = detect_project(dir.path());
        assert_eq!(p.kind, ProjectKind::Unknown);
        assert!(p.test_commands.is_empty());
        assert_eq!(p.test_command(), "<your test command>");
    }

    #[test]
    fn detects_rust_with_structure() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("Cargo.toml"), "[package]").unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        std::fs::create_dir(dir.path().join("tests")).unwrap();

        let p = detect_project(dir.path());
        assert_eq!(p.kind, ProjectKind::Rust);
        assert_eq!(p.test_command(), "cargo test");
        assert_eq!(p.structure, vec!["src", "tests"]);
    }

    #[test]
    fn poetry_wins_over_package_json() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        std::fs::write(dir.path().join("pyproject.toml"), "").unwrap();
        assert_eq!(detect_kind(dir.path()), ProjectKind::PythonPoetry);
    }

    #[test]
    fn nodejs_commands() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("package.json"), "{}").unwrap();
        let p = detect_project(dir.path());
        assert_eq!(p.kind, ProjectKind::Nodejs);
        assert_eq!(p.build_commands, vec!["npm install", "npm run build"]);
    }

    #[test]
    fn kind_serializes_kebab_case() {
        let yaml = serde_yaml::to_string(&ProjectKind::PythonPoetry).unwrap();
        assert_eq!(yaml.trim(), "python-poetry");
    }
}
