// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Boundaries between the pipeline and the outside world. The AWS and Zabbix
//! adapters implement these; tests drive the pipeline with in-memory fakes.

use async_trait::async_trait;

use crate::errors::Result;
use crate::model::{DataPoint, Dimension, Entity, EntityKind, MetricDescriptor};
use crate::samples::Sample;
use crate::statistic::Statistic;
use crate::zabbix::Ack;

/// Lists monitorable entities. Errors are `CatalogUnavailable`.
#[async_trait]
pub trait EntityCatalog {
    async fn list_entities(&self, kind: EntityKind) -> Result<Vec<Entity>>;
}

/// Lists the metric series reported for one entity. Errors are
/// `MetricLookupFailed`.
#[async_trait]
pub trait MetricCatalog {
    async fn list_metrics(&self, dimension: &Dimension) -> Result<Vec<MetricDescriptor>>;
}

/// Fetches the most recent aggregated data point of one metric. `Ok(None)`
/// means no data in the window; errors are `SampleFetchFailed`.
#[async_trait]
pub trait MetricSampler {
    async fn latest(
        &self,
        dimension: &Dimension,
        metric: &MetricDescriptor,
        statistic: Statistic,
    ) -> Result<Option<DataPoint>>;
}

/// Pushes a batch of samples in a single attempt.
#[async_trait]
pub trait SampleSink {
    async fn send(&self, samples: &[Sample]) -> Result<Ack>;
}
