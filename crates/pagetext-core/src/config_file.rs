use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{Config, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH};

pub const ENV_INPUT: &str = "PAGETEXT_INPUT";
pub const ENV_OUTPUT: &str = "PAGETEXT_OUTPUT";
pub const ENV_STRICT: &str = "PAGETEXT_STRICT";

/// Name of the per-directory config file.
pub const LOCAL_CONFIG_NAME: &str = ".pagetext.toml";

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigFile {
    pub paths: Option<PathsConfig>,
    pub behavior: Option<BehaviorConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PathsConfig {
    pub input: Option<String>,
    pub output: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BehaviorConfig {
    pub strict: Option<bool>,
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    /// `true` only when the flag was passed; absence defers to env/config.
    pub strict: bool,
}

/// Platform config directory path: `<config_dir>/pagetext/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pagetext").join("config.toml"))
}

/// Load config by cascading CWD `.pagetext.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(LOCAL_CONFIG_NAME));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => {
            tracing::debug!(path = %path.display(), "loaded config file");
            Some(config)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        paths: Some(PathsConfig {
            input: overlay
                .paths
                .as_ref()
                .and_then(|p| p.input.clone())
                .or_else(|| base.paths.as_ref().and_then(|p| p.input.clone())),
            output: overlay
                .paths
                .as_ref()
                .and_then(|p| p.output.clone())
                .or_else(|| base.paths.as_ref().and_then(|p| p.output.clone())),
        }),
        behavior: Some(BehaviorConfig {
            strict: overlay
                .behavior
                .as_ref()
                .and_then(|b| b.strict)
                .or_else(|| base.behavior.as_ref().and_then(|b| b.strict)),
        }),
    }
}

/// Resolve configuration: CLI flags > env vars > config file > defaults.
///
/// `env` looks up a variable by name; pass `|k| std::env::var(k).ok()`
/// outside of tests.
pub fn resolve_config(
    overrides: Overrides,
    file: &ConfigFile,
    env: impl Fn(&str) -> Option<String>,
) -> Config {
    let file_paths = file.paths.as_ref();

    let input = overrides
        .input
        .or_else(|| env(ENV_INPUT).map(PathBuf::from))
        .or_else(|| file_paths.and_then(|p| p.input.as_ref()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_PATH));
    let output = overrides
        .output
        .or_else(|| env(ENV_OUTPUT).map(PathBuf::from))
        .or_else(|| file_paths.and_then(|p| p.output.as_ref()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));
    let strict = overrides.strict
        || env(ENV_STRICT)
            .and_then(|v| parse_flag(&v))
            .or_else(|| file.behavior.as_ref().and_then(|b| b.strict))
            .unwrap_or(false);

    Config {
        input,
        output,
        strict,
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        other => {
            tracing::warn!(var = ENV_STRICT, value = other, "ignoring unrecognised boolean");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    fn file_with(input: Option<&str>, output: Option<&str>, strict: Option<bool>) -> ConfigFile {
        ConfigFile {
            paths: Some(PathsConfig {
                input: input.map(String::from),
                output: output.map(String::from),
            }),
            behavior: Some(BehaviorConfig { strict }),
        }
    }

    #[test]
    fn nothing_configured_gives_defaults() {
        let config = resolve_config(Overrides::default(), &ConfigFile::default(), no_env);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn config_file_beats_defaults() {
        let file = file_with(Some("in.pdf"), Some("out.txt"), Some(true));
        let config = resolve_config(Overrides::default(), &file, no_env);
        assert_eq!(config.input, PathBuf::from("in.pdf"));
        assert_eq!(config.output, PathBuf::from("out.txt"));
        assert!(config.strict);
    }

    #[test]
    fn env_beats_config_file() {
        let file = file_with(Some("file.pdf"), Some("file.txt"), Some(true));
        let env = env_from(&[
            (ENV_INPUT, "env.pdf"),
            (ENV_OUTPUT, "env.txt"),
            (ENV_STRICT, "false"),
        ]);
        let config = resolve_config(Overrides::default(), &file, env);
        assert_eq!(config.input, PathBuf::from("env.pdf"));
        assert_eq!(config.output, PathBuf::from("env.txt"));
        assert!(!config.strict);
    }

    #[test]
    fn flags_beat_env() {
        let env = env_from(&[(ENV_INPUT, "env.pdf"), (ENV_STRICT, "0")]);
        let overrides = Overrides {
            input: Some(PathBuf::from("flag.pdf")),
            output: None,
            strict: true,
        };
        let config = resolve_config(overrides, &ConfigFile::default(), env);
        assert_eq!(config.input, PathBuf::from("flag.pdf"));
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert!(config.strict);
    }

    #[test]
    fn unrecognised_strict_value_falls_through() {
        let file = file_with(None, None, Some(true));
        let env = env_from(&[(ENV_STRICT, "maybe")]);
        let config = resolve_config(Overrides::default(), &file, env);
        assert!(config.strict);
    }

    #[test]
    fn partial_toml_deserializes() {
        let parsed: ConfigFile = toml::from_str("[paths]\noutput = \"notes.txt\"\n").unwrap();
        let paths = parsed.paths.unwrap();
        assert_eq!(paths.output.as_deref(), Some("notes.txt"));
        assert!(paths.input.is_none());
        assert!(parsed.behavior.is_none());
    }

    #[test]
    fn merge_overlay_wins_and_base_fills_gaps() {
        let base = file_with(Some("base.pdf"), Some("base.txt"), Some(true));
        let overlay = file_with(Some("local.pdf"), None, None);
        let merged = merge(base, overlay);
        let paths = merged.paths.unwrap();
        assert_eq!(paths.input.as_deref(), Some("local.pdf"));
        assert_eq!(paths.output.as_deref(), Some("base.txt"));
        assert_eq!(merged.behavior.unwrap().strict, Some(true));
    }

    #[test]
    fn load_from_path_reads_and_rejects() {
        let dir = tempfile::tempdir().unwrap();

        let good = dir.path().join("good.toml");
        std::fs::write(&good, "[behavior]\nstrict = true\n").unwrap();
        let loaded = load_from_path(&good).unwrap();
        assert_eq!(loaded.behavior.unwrap().strict, Some(true));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[paths\ninput = ").unwrap();
        assert!(load_from_path(&bad).is_none());

        assert!(load_from_path(&dir.path().join("absent.toml")).is_none());
    }
}
