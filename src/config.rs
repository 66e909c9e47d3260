//! Configuration discovery and effective settings resolution.
//!
//! Pystyle reads `pystyle.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an
//! `Effective` config. Defaults:
//! - `max_line_length`: 79
//! - `output`: `human`
//! - `patterns`: `["**/*.py"]`
//!
//! Overrides precedence: CLI > config file > defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `pystyle.toml|yaml`.
pub struct StyleConfig {
    pub max_line_length: Option<usize>,
    pub output: Option<String>,
    #[serde(default)]
    pub patterns: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub max_line_length: usize,
    pub output: String,
    pub patterns: Vec<String>,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `pystyle.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if cur.join("pystyle.toml").exists()
            || cur.join("pystyle.yaml").exists()
            || cur.join("pystyle.yml").exists()
        {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `StyleConfig` from `pystyle.toml` or `pystyle.yaml|yml` if present.
pub fn load_config(root: &Path) -> Option<StyleConfig> {
    let toml_path = root.join("pystyle.toml");
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: StyleConfig = toml::from_str(&s).ok()?;
        return Some(cfg);
    }
    for yml in ["pystyle.yaml", "pystyle.yml"] {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: StyleConfig = serde_yaml::from_str(&s).ok()?;
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(
    cli_repo_root: Option<&str>,
    cli_output: Option<&str>,
    cli_max_line_length: Option<usize>,
) -> Effective {
    let start = PathBuf::from(cli_repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let cfg = load_config(&repo_root).unwrap_or_default();

    let max_line_length = cli_max_line_length.or(cfg.max_line_length).unwrap_or(79);

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let patterns = cfg
        .patterns
        .unwrap_or_else(|| vec!["**/*.py".to_string()]);

    Effective {
        repo_root,
        max_line_length,
        output,
        patterns,
    }
}
