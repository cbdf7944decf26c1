// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use log::{debug, info, warn};

use crate::config::Config;
use crate::discovery;
use crate::errors::{Result, Severity};
use crate::model::{Dimension, EntityKind, MetricDescriptor};
use crate::ports::{EntityCatalog, MetricCatalog, MetricSampler, SampleSink};
use crate::record::{entity_record, metric_record};
use crate::samples::{Sample, SampleInput, build_samples};
use crate::statistic::resolve_statistic;
use crate::zabbix::Ack;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Discovery document of every entity of a kind
    ListEntities(EntityKind),
    /// Discovery document of the target entity's metrics
    ListMetrics(EntityKind),
    /// Latest metric values of the target entity, sent to Zabbix
    PushStats(EntityKind),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Document(String),
    Delivered(Ack),
}

/// Turns a per-item failure into "no data" and lets run-level failures
/// through.
fn recover<T>(result: Result<T>, fallback: T) -> Result<T> {
    match result {
        Err(err) if err.severity() == Severity::Recoverable => {
            warn!("{err}");
            Ok(fallback)
        }
        other => other,
    }
}

pub struct Pipeline<'a, C> {
    cloud: &'a C,
    metric_filter: Option<&'a str>,
}

impl<'a, C> Pipeline<'a, C>
where
    C: EntityCatalog + MetricCatalog + MetricSampler + Sync,
{
    pub fn new(cloud: &'a C) -> Self {
        Pipeline {
            cloud,
            metric_filter: None,
        }
    }

    /// Restricts metric modes to series with exactly this CloudWatch name.
    pub fn with_metric_filter(mut self, metric_name: Option<&'a str>) -> Self {
        self.metric_filter = metric_name;
        self
    }

    pub async fn run(&self, mode: Mode, config: &Config, sink: &impl SampleSink) -> Result<Output> {
        match mode {
            Mode::ListEntities(kind) => self.list_entities(kind).await.map(Output::Document),
            Mode::ListMetrics(kind) => self
                .list_metrics(kind, config.require_target()?)
                .await
                .map(Output::Document),
            Mode::PushStats(kind) => self
                .push_stats(kind, config.require_target()?, sink)
                .await
                .map(Output::Delivered),
        }
    }

    pub async fn list_entities(&self, kind: EntityKind) -> Result<String> {
        let entities = self.cloud.list_entities(kind).await?;
        let records: Vec<_> = entities.iter().map(entity_record).collect();
        discovery::encode(&records)
    }

    pub async fn list_metrics(&self, kind: EntityKind, target_id: &str) -> Result<String> {
        let inputs = self.sample(kind.dimension(target_id)).await?;
        let records: Vec<_> = inputs
            .iter()
            .map(|input| metric_record(&input.descriptor, input.datapoint.as_ref()))
            .collect();
        discovery::encode(&records)
    }

    pub async fn collect_samples(&self, kind: EntityKind, target_id: &str) -> Result<Vec<Sample>> {
        let inputs = self.sample(kind.dimension(target_id)).await?;
        build_samples(target_id, inputs)
    }

    /// Sends the whole batch once. Nothing counts as delivered unless the
    /// daemon acknowledges it.
    pub async fn push_stats(
        &self,
        kind: EntityKind,
        target_id: &str,
        sink: &impl SampleSink,
    ) -> Result<Ack> {
        let samples = self.collect_samples(kind, target_id).await?;
        info!("sending {} sample(s) for {target_id}", samples.len());
        sink.send(&samples).await
    }

    async fn metrics(&self, dimension: &Dimension) -> Result<Vec<MetricDescriptor>> {
        let metrics = recover(self.cloud.list_metrics(dimension).await, Vec::new())?;
        Ok(match self.metric_filter {
            Some(name) => metrics.into_iter().filter(|m| m.name == name).collect(),
            None => metrics,
        })
    }

    /// Fetches the latest data point of every metric, one at a time in
    /// catalog order.
    async fn sample(&self, dimension: Dimension) -> Result<Vec<SampleInput>> {
        let metrics = self.metrics(&dimension).await?;
        let mut inputs = Vec::with_capacity(metrics.len());
        for descriptor in metrics {
            let statistic = resolve_statistic(&descriptor.name, &descriptor.namespace);
            let datapoint = recover(
                self.cloud.latest(&dimension, &descriptor, statistic).await,
                None,
            )?;
            if datapoint.is_none() {
                debug!("no {statistic} data for {} in window", descriptor.name);
            }
            inputs.push(SampleInput {
                descriptor,
                statistic,
                datapoint,
            });
        }
        Ok(inputs)
    }
}
