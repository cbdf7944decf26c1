// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::time::{Duration, SystemTime};

use aws_sdk_cloudwatch::Client;
use aws_sdk_cloudwatch::error::DisplayErrorContext;
use aws_sdk_cloudwatch::primitives::DateTime;
use aws_sdk_cloudwatch::types::{self as cw, Datapoint, DimensionFilter, Metric};
use log::{debug, warn};
use time::OffsetDateTime;

use crate::errors::{Error, Result};
use crate::model::{DataPoint, Dimension, MetricDescriptor};
use crate::statistic::Statistic;

/// Trailing window the latest value is taken from.
pub const WINDOW: Duration = Duration::from_secs(10 * 60);
/// Aggregation period of each returned data point.
pub const PERIOD_SECS: i32 = 300;

fn lookup_error(dimension: &Dimension, reason: impl ToString) -> Error {
    Error::MetricLookupFailed {
        dimension: dimension.to_string(),
        reason: reason.to_string(),
    }
}

pub async fn list_metrics(client: &Client, dimension: &Dimension) -> Result<Vec<MetricDescriptor>> {
    let filter = DimensionFilter::builder()
        .name(&dimension.name)
        .value(&dimension.value)
        .build()
        .map_err(|e| lookup_error(dimension, e))?;

    let mut descriptors = Vec::new();
    let mut next_token = None;
    loop {
        let page = client
            .list_metrics()
            .dimensions(filter.clone())
            .set_next_token(next_token.take())
            .send()
            .await
            .map_err(|e| lookup_error(dimension, DisplayErrorContext(&e)))?;

        descriptors.extend(page.metrics().iter().filter_map(metric_descriptor));

        match page.next_token() {
            Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
            _ => break,
        }
    }

    debug!("found {} metric(s) for {dimension}", descriptors.len());
    Ok(descriptors)
}

pub async fn latest_datapoint(
    client: &Client,
    dimension: &Dimension,
    metric: &MetricDescriptor,
    statistic: Statistic,
) -> Result<Option<DataPoint>> {
    let fetch_error = |reason: String| Error::SampleFetchFailed {
        metric: metric.name.clone(),
        reason,
    };

    let target = cw::Dimension::builder()
        .name(&dimension.name)
        .value(&dimension.value)
        .build()
        .map_err(|e| fetch_error(e.to_string()))?;

    let end = SystemTime::now();
    let start = end.checked_sub(WINDOW).unwrap_or(SystemTime::UNIX_EPOCH);

    let output = client
        .get_metric_statistics()
        .namespace(&metric.namespace)
        .metric_name(&metric.name)
        .dimensions(target)
        .statistics(aws_statistic(statistic))
        .start_time(DateTime::from(start))
        .end_time(DateTime::from(end))
        .period(PERIOD_SECS)
        .send()
        .await
        .map_err(|e| fetch_error(DisplayErrorContext(&e).to_string()))?;

    Ok(newest(output.datapoints()))
}

fn aws_statistic(statistic: Statistic) -> cw::Statistic {
    match statistic {
        Statistic::Sum => cw::Statistic::Sum,
        Statistic::Average => cw::Statistic::Average,
    }
}

pub(crate) fn metric_descriptor(metric: &Metric) -> Option<MetricDescriptor> {
    let (Some(name), Some(namespace)) = (metric.metric_name(), metric.namespace()) else {
        warn!("skipping metric without a name or namespace");
        return None;
    };
    Some(MetricDescriptor {
        name: name.to_string(),
        namespace: namespace.to_string(),
        dimensions: metric
            .dimensions()
            .iter()
            .map(|d| Dimension::new(d.name(), d.value()))
            .collect(),
    })
}

pub(crate) fn datapoint(point: &Datapoint) -> Option<DataPoint> {
    let timestamp = OffsetDateTime::from_unix_timestamp(point.timestamp()?.secs()).ok()?;
    Some(DataPoint {
        timestamp,
        unit: point.unit().map(|u| u.as_str().to_string()),
        sum: point.sum(),
        average: point.average(),
    })
}

/// CloudWatch does not order data points; pick the most recent one.
pub(crate) fn newest(points: &[Datapoint]) -> Option<DataPoint> {
    points
        .iter()
        .filter_map(datapoint)
        .max_by_key(|point| point.timestamp)
}
