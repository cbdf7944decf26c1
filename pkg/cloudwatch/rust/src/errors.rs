// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use thiserror::Error;

use crate::model::EntityKind;
use crate::statistic::Statistic;

pub type Result<T> = std::result::Result<T, Error>;

/// Whether a failure only degrades one item or aborts the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Recoverable,
    Fatal,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Config(String),

    #[error("could not list {kind} entities: {reason}")]
    CatalogUnavailable { kind: EntityKind, reason: String },

    #[error("could not list metrics for {dimension}: {reason}")]
    MetricLookupFailed { dimension: String, reason: String },

    #[error("could not fetch statistics for {metric}: {reason}")]
    SampleFetchFailed { metric: String, reason: String },

    #[error("data point for {metric} has no {statistic} value")]
    InternalConsistency { metric: String, statistic: Statistic },

    #[error("zabbix sender error: {addr}: {source}")]
    Transport {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("zabbix protocol error: {0}")]
    Protocol(String),

    #[error("JSON encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

impl Error {
    pub fn severity(&self) -> Severity {
        match self {
            Error::MetricLookupFailed { .. } | Error::SampleFetchFailed { .. } => {
                Severity::Recoverable
            }
            _ => Severity::Fatal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_item_failures_are_recoverable() {
        let lookup = Error::MetricLookupFailed {
            dimension: "InstanceId=i-123".to_string(),
            reason: "throttled".to_string(),
        };
        let fetch = Error::SampleFetchFailed {
            metric: "CPUUtilization".to_string(),
            reason: "throttled".to_string(),
        };
        assert_eq!(lookup.severity(), Severity::Recoverable);
        assert_eq!(fetch.severity(), Severity::Recoverable);
    }

    #[test]
    fn test_run_level_failures_are_fatal() {
        let errors = [
            Error::Config("missing key".to_string()),
            Error::CatalogUnavailable {
                kind: EntityKind::Ec2,
                reason: "denied".to_string(),
            },
            Error::InternalConsistency {
                metric: "RequestCount".to_string(),
                statistic: Statistic::Sum,
            },
            Error::Protocol("bad header".to_string()),
        ];
        for err in errors {
            assert_eq!(err.severity(), Severity::Fatal, "{err}");
        }
    }

    #[test]
    fn test_internal_consistency_message_names_statistic() {
        let err = Error::InternalConsistency {
            metric: "RequestCount".to_string(),
            statistic: Statistic::Sum,
        };
        assert_eq!(err.to_string(), "data point for RequestCount has no Sum value");
    }
}
