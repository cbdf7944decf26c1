// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use serde::Serialize;

use crate::errors::{Error, Result};
use crate::metric_name::disambiguate;
use crate::model::{DataPoint, MetricDescriptor};
use crate::statistic::Statistic;

/// One trapper item as sent to Zabbix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub host: String,
    pub key: String,
    pub value: String,
    pub clock: i64,
}

/// A metric together with the statistic that was requested for it and the
/// latest data point, if CloudWatch returned one.
#[derive(Debug, Clone)]
pub struct SampleInput {
    pub descriptor: MetricDescriptor,
    pub statistic: Statistic,
    pub datapoint: Option<DataPoint>,
}

pub fn item_key(metric_name: &str) -> String {
    format!("cloudwatch.metric[{metric_name}]")
}

pub fn format_value(value: f64) -> String {
    format!("{value:.4}")
}

fn statistic_value(input: &SampleInput, point: &DataPoint) -> Result<f64> {
    let value = match input.statistic {
        Statistic::Sum => point.sum,
        Statistic::Average => point.average,
    };
    value.ok_or_else(|| Error::InternalConsistency {
        metric: input.descriptor.name.clone(),
        statistic: input.statistic,
    })
}

/// Builds the trapper batch for one target. Metrics without a data point in
/// the window are dropped. Output order follows input order.
pub fn build_samples(
    target_id: &str,
    inputs: impl IntoIterator<Item = SampleInput>,
) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();
    for input in inputs {
        let Some(point) = &input.datapoint else {
            continue;
        };
        let value = statistic_value(&input, point)?;
        let name = disambiguate(&input.descriptor.name, &input.descriptor.dimensions);
        samples.push(Sample {
            host: target_id.to_string(),
            key: item_key(&name),
            value: format_value(value),
            clock: point.timestamp.unix_timestamp(),
        });
    }
    Ok(samples)
}
