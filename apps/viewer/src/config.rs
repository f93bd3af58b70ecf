use std::{fs, io, ops::RangeInclusive, path::Path};

use algorithms::{GraphSpec, SORT_LEN, SORT_VALUE_RANGE};
use anyhow::Context;
use serde::Deserialize;
use shared::{domain::SpeedRange, error::VizError};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub speeds: SpeedRange,
    pub autoplay: bool,
    pub start_node: String,
    pub sort_len: usize,
    pub sort_values: RangeInclusive<u32>,
    pub seed: Option<u64>,
    pub graph: GraphSpec,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            speeds: SpeedRange::default(),
            autoplay: false,
            start_node: "A".into(),
            sort_len: SORT_LEN,
            sort_values: SORT_VALUE_RANGE,
            seed: None,
            graph: GraphSpec::sample(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FileSettings {
    speed_ms: Option<u64>,
    min_speed_ms: Option<u64>,
    max_speed_ms: Option<u64>,
    speed_step_ms: Option<u64>,
    autoplay: Option<bool>,
    start_node: Option<String>,
    sort_len: Option<usize>,
    sort_min: Option<u32>,
    sort_max: Option<u32>,
    seed: Option<u64>,
    graph: Option<GraphSpec>,
}

/// Defaults, then `path` if it exists, then `VIEWER__*` environment variables.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let file = match fs::read_to_string(path) {
        Ok(raw) => toml::from_str::<FileSettings>(&raw)
            .with_context(|| format!("failed to parse config file '{}'", path.display()))?,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            FileSettings::default()
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()))
        }
    };

    let settings = resolve(file, |key| std::env::var(key).ok())?;
    Ok(settings)
}

fn resolve(
    file: FileSettings,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings, VizError> {
    let defaults = Settings::default();

    let speeds = SpeedRange::new(
        file.min_speed_ms.unwrap_or(defaults.speeds.min_ms),
        file.max_speed_ms.unwrap_or(defaults.speeds.max_ms),
        file.speed_step_ms.unwrap_or(defaults.speeds.step_ms),
        file.speed_ms.unwrap_or(defaults.speeds.default_ms),
    )?;

    let sort_min = file.sort_min.unwrap_or(*defaults.sort_values.start());
    let sort_max = file.sort_max.unwrap_or(*defaults.sort_values.end());
    if sort_min > sort_max {
        return Err(VizError::invalid_config(format!(
            "sort value range is inverted: {sort_min} > {sort_max}"
        )));
    }

    let mut settings = Settings {
        speeds,
        autoplay: file.autoplay.unwrap_or(defaults.autoplay),
        start_node: file.start_node.unwrap_or(defaults.start_node),
        sort_len: file.sort_len.unwrap_or(defaults.sort_len),
        sort_values: sort_min..=sort_max,
        seed: file.seed,
        graph: file.graph.unwrap_or(defaults.graph),
    };

    if let Some(v) = env_value::<u64>(&env, "VIEWER__SPEED_MS") {
        settings.speeds.default_ms = settings.speeds.clamp(v);
    }
    if let Some(v) = env_value::<bool>(&env, "VIEWER__AUTOPLAY") {
        settings.autoplay = v;
    }
    if let Some(v) = env("VIEWER__START_NODE") {
        settings.start_node = v;
    }
    if let Some(v) = env_value::<u64>(&env, "VIEWER__SEED") {
        settings.seed = Some(v);
    }

    Ok(settings)
}

fn env_value<T: std::str::FromStr>(env: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = env(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use shared::error::ErrorCode;

    use super::*;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let settings = load_settings(&dir.path().join("absent.toml")).expect("settings");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.speeds.default_ms, 1500);
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("viewer.toml");
        fs::write(
            &path,
            r#"
speed_ms = 1000
autoplay = true
start_node = "B"
sort_len = 6
sort_min = 1
sort_max = 9

[graph]
nodes = [{ label = "X" }, { label = "Y", x = 10.0, y = 20.0 }]
edges = [["X", "Y"]]
"#,
        )
        .expect("write config");

        let settings = load_settings(&path).expect("settings");
        assert_eq!(settings.speeds.default_ms, 1000);
        assert!(settings.autoplay);
        assert_eq!(settings.start_node, "B");
        assert_eq!(settings.sort_len, 6);
        assert_eq!(settings.sort_values, 1..=9);
        assert_eq!(settings.graph.nodes.len(), 2);
        assert_eq!(settings.graph.edges, [("X".to_string(), "Y".to_string())]);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("viewer.toml");
        fs::write(&path, "speed_ms = \"fast\"").expect("write config");
        let err = load_settings(&path).expect_err("should fail");
        assert!(err.to_string().contains("failed to parse config file"));
    }

    #[test]
    fn environment_overrides_file() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("VIEWER__SPEED_MS", "2900"),
            ("VIEWER__AUTOPLAY", "true"),
            ("VIEWER__START_NODE", "C"),
            ("VIEWER__SEED", "42"),
        ]);
        let file = FileSettings {
            speed_ms: Some(500),
            start_node: Some("B".into()),
            ..FileSettings::default()
        };
        let settings =
            resolve(file, |key| env.get(key).map(|v| v.to_string())).expect("settings");
        assert_eq!(settings.speeds.default_ms, 3000);
        assert!(settings.autoplay);
        assert_eq!(settings.start_node, "C");
        assert_eq!(settings.seed, Some(42));
    }

    #[test]
    fn unparseable_environment_values_are_ignored() {
        let settings = resolve(FileSettings::default(), |key| {
            (key == "VIEWER__SPEED_MS").then(|| "soon".to_string())
        })
        .expect("settings");
        assert_eq!(settings.speeds.default_ms, 1500);
    }

    #[test]
    fn inverted_ranges_are_rejected() {
        let file = FileSettings {
            min_speed_ms: Some(2000),
            max_speed_ms: Some(1000),
            ..FileSettings::default()
        };
        let err = resolve(file, no_env).expect_err("inverted speeds");
        assert_eq!(err.code, ErrorCode::InvalidConfig);

        let file = FileSettings {
            sort_min: Some(50),
            sort_max: Some(10),
            ..FileSettings::default()
        };
        assert!(resolve(file, no_env).is_err());
    }
}
