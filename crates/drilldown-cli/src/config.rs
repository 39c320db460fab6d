// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use drilldown_app::SelectIds;
use drilldown_bootstrap::{DEFAULT_BOOTSTRAP_PATH, SeedOverride, resolve_endpoint};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

const CONFIG_VERSION: i64 = 1;
const APP_DIR: &str = "drilldown";
const DEFAULT_TIMEOUT: &str = "5s";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub api: Api,
    #[serde(default)]
    pub selects: Selects,
    #[serde(default)]
    pub initial: SeedOverride,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            api: Api::default(),
            selects: Selects::default(),
            initial: SeedOverride::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Api {
    pub url: Option<String>,
    pub base_url: Option<String>,
    pub bootstrap_path: Option<String>,
    pub with_credentials: Option<bool>,
    pub timeout: Option<String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Selects {
    pub department: Option<String>,
    pub section: Option<String>,
    pub division: Option<String>,
    pub plant: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("DRILLDOWN_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set DRILLDOWN_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(APP_DIR);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and move values under [api], [selects], and [initial]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if self.version != CONFIG_VERSION {
            bail!(
                "config {} has version {}; expected 1",
                path.display(),
                self.version
            );
        }

        if self.api.url.is_some() || self.api.base_url.is_some() {
            self.endpoint()
                .with_context(|| format!("invalid [api] section in {}", path.display()))?;
        }

        if let Some(timeout) = &self.api.timeout {
            let parsed = parse_duration(timeout)?;
            if parsed <= Duration::ZERO {
                bail!(
                    "api.timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        Ok(())
    }

    /// The resolved bootstrap URL: explicit `api.url`, else `api.base_url`
    /// joined with `api.bootstrap_path`.
    pub fn endpoint(&self) -> Result<Url> {
        resolve_endpoint(
            self.api.url.as_deref(),
            self.api.base_url.as_deref(),
            self.api.bootstrap_path.as_deref(),
        )
    }

    pub fn with_credentials(&self) -> bool {
        self.api.with_credentials.unwrap_or(false)
    }

    pub fn timeout(&self) -> Result<Duration> {
        parse_duration(self.api.timeout.as_deref().unwrap_or(DEFAULT_TIMEOUT))
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.api.headers
    }

    /// Widget ids with per-level overrides applied over the defaults.
    pub fn select_ids(&self) -> SelectIds {
        let defaults = SelectIds::default();
        SelectIds {
            department: self
                .selects
                .department
                .clone()
                .unwrap_or(defaults.department),
            section: self.selects.section.clone().unwrap_or(defaults.section),
            division: self.selects.division.clone().unwrap_or(defaults.division),
            plant: self.selects.plant.clone().unwrap_or(defaults.plant),
        }
    }

    pub fn initial_override(&self) -> &SeedOverride {
        &self.initial
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# drilldown config\n# Place this file at: {}\n\nversion = 1\n\n[api]\n# Full override; when unset, base_url + bootstrap_path are joined.\n# url = \"https://example.com/api/diagram/bootstrap\"\nbase_url = \"http://localhost:8080\"\nbootstrap_path = \"{}\"\nwith_credentials = false\ntimeout = \"{}\"\n\n# [api.headers]\n# X-Api-Key = \"secret\"\n\n[selects]\ndepartment = \"deptSelect\"\nsection = \"sectionSelect\"\ndivision = \"divisionSelect\"\nplant = \"plantSelect\"\n\n# [initial]\n# dept = \"Engineering\"\n# divs = \"Line 1\"\n",
            path.display(),
            DEFAULT_BOOTSTRAP_PATH,
            DEFAULT_TIMEOUT,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(mins * 60));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 5s)")
}
