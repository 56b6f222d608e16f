//! CLI argument merging with config

use super::Config;

#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub not_match_f: Option<Vec<String>>,
    pub exclude_ext: Option<Vec<String>>,
    pub title: Option<String>,
    pub plain: Option<bool>,
    pub open: Option<bool>,
}

pub fn merge_cli_with_config(mut base_config: Config, cli: CliOverrides) -> Config {
    if let Some(not_match_f) = cli.not_match_f {
        base_config.not_match_f = not_match_f;
    }
    if let Some(exclude_ext) = cli.exclude_ext {
        base_config.exclude_ext = exclude_ext;
    }

    if let Some(title) = cli.title {
        base_config.title = Some(title);
    }
    if let Some(plain) = cli.plain {
        base_config.plain = plain;
    }
    if let Some(open) = cli.open {
        base_config.open = open;
    }

    base_config
}
