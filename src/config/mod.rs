//! Layered configuration: defaults, optional config file, environment.

mod merge;

pub use merge::{merge_cli_with_config, CliOverrides};

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use serde::de::{self, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::scan::ExclusionPolicy;

/// File names looked up in the anchor directory, in order.
pub const CONFIG_FILE_NAMES: &[&str] = &["src2html.toml", "src2html.yaml", "src2html.yml"];

/// Prefix for environment overrides, e.g. `SRC2HTML_EXCLUDE_EXT=md,txt`.
pub const ENV_PREFIX: &str = "SRC2HTML_";

/// User-facing settings for a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Substrings that exclude a file by name
    #[serde(default, alias = "not_match", deserialize_with = "deserialize_list")]
    pub not_match_f: Vec<String>,

    /// Extensions to exclude, with or without the leading dot
    #[serde(default, alias = "exclude_extensions", deserialize_with = "deserialize_list")]
    pub exclude_ext: Vec<String>,

    /// Document title override
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "deserialize_opt_string")]
    pub title: Option<String>,

    /// Skip syntax coloring
    #[serde(default)]
    pub plain: bool,

    /// Open the result in the default viewer
    #[serde(default)]
    pub open: bool,
}

impl Config {
    /// Build the immutable exclusion policy for this run.
    pub fn exclusion_policy(&self) -> ExclusionPolicy {
        ExclusionPolicy::new()
            .exclude_extensions(&self.exclude_ext)
            .deny_name_substrings(&self.not_match_f)
    }
}

/// Load configuration for a run anchored at `anchor_dir`.
///
/// An explicit `config_path` must exist. Otherwise the first of
/// [`CONFIG_FILE_NAMES`] found in `anchor_dir` is used, if any. Environment
/// variables prefixed with [`ENV_PREFIX`] are layered on top.
pub fn load_config(anchor_dir: &Path, config_path: Option<&Path>) -> Result<Config> {
    load_layers(anchor_dir, config_path, Env::prefixed(ENV_PREFIX))
}

fn load_layers(anchor_dir: &Path, config_path: Option<&Path>, env: Env) -> Result<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));
    let file = locate_config_file(anchor_dir, config_path)?;

    if let Some(path) = file.as_deref() {
        tracing::debug!("Loading config from {}", path.display());
        figment = if is_yaml(path) {
            figment.merge(Yaml::file(path))
        } else {
            figment.merge(Toml::file(path))
        };
    }

    figment
        .merge(env)
        .extract()
        .with_context(|| match file {
            Some(path) => format!("Invalid configuration in {}", path.display()),
            None => "Invalid configuration in environment".to_string(),
        })
}

/// The config file a run will read, if any.
///
/// An explicit path that does not exist is an error; otherwise the first of
/// [`CONFIG_FILE_NAMES`] present in `anchor_dir` wins.
pub fn locate_config_file(anchor_dir: &Path, config_path: Option<&Path>) -> Result<Option<PathBuf>> {
    match config_path {
        Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
        Some(path) => anyhow::bail!("Config file not found: {}", path.display()),
        None => Ok(find_config_file(anchor_dir)),
    }
}

fn find_config_file(anchor_dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES.iter().map(|name| anchor_dir.join(name)).find(|p| p.is_file())
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase).as_deref(),
        Some("yaml" | "yml")
    )
}

/// A scalar config value read as text.
///
/// Environment values such as `SRC2HTML_TITLE=2024` arrive as numbers or
/// booleans; they are kept as their literal text.
struct Scalar(String);

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_any(ScalarVisitor).map(Scalar)
    }
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = String;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, number or boolean")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
        Ok(value.to_string())
    }
}

fn deserialize_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<Scalar>::deserialize(deserializer).map(|value| value.map(|s| s.0))
}

/// Accept either a comma-separated string or a list of strings.
fn deserialize_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct ListVisitor;

    impl<'de> Visitor<'de> for ListVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a comma-separated string or a list of strings")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            Ok(split_csv(value))
        }

        fn visit_bool<E: de::Error>(self, value: bool) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
            Ok(vec![value.to_string()])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut result = Vec::new();
            while let Some(Scalar(item)) = seq.next_element::<Scalar>()? {
                result.extend(split_csv(&item));
            }
            Ok(result)
        }
    }

    deserializer.deserialize_any(ListVisitor)
}

/// Split on commas, trimming and dropping empty parts.
pub fn split_csv(value: &str) -> Vec<String> {
    value.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
}
