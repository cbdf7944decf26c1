// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::env;
use std::fmt;
use std::path::Path;
use std::time::Duration;

use log::LevelFilter;
use serde::Deserialize;

use crate::cli::Options;
use crate::errors::{Error, Result};

pub const DEFAULT_REGION: &str = "ap-northeast-1";
pub const DEFAULT_ZABBIX_HOST: &str = "localhost";
pub const DEFAULT_ZABBIX_PORT: u16 = 10051;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Optional YAML file supplying defaults for anything not given on the
/// command line.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub region: Option<String>,
    pub zabbix_host: Option<String>,
    pub zabbix_port: Option<u16>,
    pub timeout_secs: Option<u64>,
    pub log_level: Option<String>,
}

pub fn load_file(path: &Path) -> Result<FileConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("reading {}: {e}", path.display())))?;
    serde_yaml::from_str(&contents)
        .map_err(|e| Error::Config(format!("parsing {}: {e}", path.display())))
}

/// Settings for one run. Built once, then only read.
#[derive(Clone, PartialEq)]
pub struct Config {
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub target_id: Option<String>,
    pub metric_name: Option<String>,
    pub zabbix_host: String,
    pub zabbix_port: u16,
    pub timeout: Duration,
    pub log_level: LevelFilter,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("target_id", &self.target_id)
            .field("metric_name", &self.metric_name)
            .field("zabbix_host", &self.zabbix_host)
            .field("zabbix_port", &self.zabbix_port)
            .field("timeout", &self.timeout)
            .field("log_level", &self.log_level)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl Config {
    /// Command line options win over the config file, which wins over the
    /// built-in defaults.
    pub fn resolve(options: Options) -> Result<Self> {
        let file = match &options.config {
            Some(path) => load_file(path)?,
            None => FileConfig::default(),
        };

        let log_level = log_level(file.log_level.as_deref());

        let (Some(access_key_id), Some(secret_access_key)) =
            (non_empty(options.key), non_empty(options.secret))
        else {
            return Err(Error::Config("Please set key information".to_string()));
        };

        Ok(Config {
            region: non_empty(options.region)
                .or(file.region)
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            access_key_id,
            secret_access_key,
            target_id: non_empty(options.id),
            metric_name: non_empty(options.metric),
            zabbix_host: non_empty(options.host)
                .or(file.zabbix_host)
                .unwrap_or_else(|| DEFAULT_ZABBIX_HOST.to_string()),
            zabbix_port: options
                .port
                .or(file.zabbix_port)
                .unwrap_or(DEFAULT_ZABBIX_PORT),
            timeout: file
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
            log_level,
        })
    }

    /// The target id, which the cloudwatch commands cannot do without.
    pub fn require_target(&self) -> Result<&str> {
        self.target_id
            .as_deref()
            .ok_or_else(|| Error::Config("Please set target id (--id)".to_string()))
    }
}

pub fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" | "warning" => LevelFilter::Warn,
        "error" | "critical" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Warn,
    }
}

/// Priority: ZAWS_LOG_LEVEL > LOG_LEVEL > config file > warn
pub fn log_level(from_file: Option<&str>) -> LevelFilter {
    if let Ok(level) = env::var("ZAWS_LOG_LEVEL") {
        return parse_log_level(&level);
    }

    if let Ok(level) = env::var("LOG_LEVEL") {
        return parse_log_level(&level);
    }

    from_file.map(parse_log_level).unwrap_or(LevelFilter::Warn)
}
