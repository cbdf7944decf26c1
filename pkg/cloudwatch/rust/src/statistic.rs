// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::fmt;

use phf::phf_set;

use crate::model::ELB_NAMESPACE;

/// ELB metrics that count events and must be summed over the window.
static ELB_SUM_METRICS: phf::Set<&'static str> = phf_set! {
    "RequestCount",
    "HTTPCode_Backend_2XX",
    "HTTPCode_Backend_3XX",
    "HTTPCode_Backend_4XX",
    "HTTPCode_Backend_5XX",
    "HTTPCode_ELB_4XX",
    "HTTPCode_ELB_5XX",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Sum,
    Average,
}

impl Statistic {
    pub fn as_str(self) -> &'static str {
        match self {
            Statistic::Sum => "Sum",
            Statistic::Average => "Average",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn resolve_statistic(metric_name: &str, namespace: &str) -> Statistic {
    if namespace == ELB_NAMESPACE && ELB_SUM_METRICS.contains(metric_name) {
        Statistic::Sum
    } else {
        Statistic::Average
    }
}
