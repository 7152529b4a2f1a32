use crate::model::{validate_app_config, AppConfig};
use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "form-builder.yaml";
pub const CONFIG_DIR_ENV: &str = "FORM_BUILDER_CONFIG_DIR";

pub fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true") || v.eq_ignore_ascii_case("yes"))
        .unwrap_or(false)
}

pub fn config_from_str(s: &str) -> Result<AppConfig> {
    let cfg: AppConfig = serde_yaml::from_str(s).context("parsing form builder config")?;
    validate_app_config(&cfg).map_err(|e| anyhow!("invalid config: {e}"))?;
    Ok(cfg)
}

fn read_config(path: &Path) -> Result<AppConfig> {
    let s = fs::read_to_string(path).with_context(|| format!("reading {path:?}"))?;
    config_from_str(&s).with_context(|| format!("loading {path:?}"))
}

/// Candidate locations searched when the env override is not set.
pub(crate) fn candidate_paths(cwd: &Path, home: Option<&Path>) -> Vec<PathBuf> {
    let mut out = vec![cwd.join(CONFIG_FILE), cwd.join(".tui").join(CONFIG_FILE)];
    let mut cur = cwd;
    while let Some(parent) = cur.parent() {
        out.push(parent.join(".tui").join(CONFIG_FILE));
        cur = parent;
    }
    if let Some(h) = home {
        let p = h.join(".tui").join(CONFIG_FILE);
        if !out.contains(&p) {
            out.push(p);
        }
    }
    out
}

/// Loads the optional config. A missing file means defaults; a file that
/// exists but does not parse is an error.
pub fn load_config() -> Result<AppConfig> {
    if let Ok(base) = std::env::var(CONFIG_DIR_ENV) {
        let entry = PathBuf::from(base).join(CONFIG_FILE);
        return read_config(&entry);
    }
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let home = std::env::var("HOME")
        .ok()
        .or_else(|| std::env::var("USERPROFILE").ok())
        .map(PathBuf::from);
    for p in candidate_paths(&cwd, home.as_deref()) {
        if p.exists() {
            return read_config(&p);
        }
    }
    Ok(AppConfig::default())
}
