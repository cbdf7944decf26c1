// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! AWS-backed implementations of the catalog and sampler ports.

pub mod cloudwatch;
pub mod ec2;
pub mod elb;

use async_trait::async_trait;
use aws_config::retry::RetryConfig;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_ec2::config::Credentials;
use log::debug;

use crate::config::Config;
use crate::errors::Result;
use crate::model::{DataPoint, Dimension, Entity, EntityKind, MetricDescriptor};
use crate::ports::{EntityCatalog, MetricCatalog, MetricSampler};
use crate::statistic::Statistic;

const CREDENTIALS_PROVIDER: &str = "zaws";

pub struct AwsCloud {
    ec2: aws_sdk_ec2::Client,
    elb: aws_sdk_elasticloadbalancing::Client,
    cloudwatch: aws_sdk_cloudwatch::Client,
}

impl AwsCloud {
    /// Builds SDK clients for the configured region and static credentials.
    /// Every call is a single attempt bounded by the configured timeout.
    pub async fn connect(config: &Config) -> Self {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            CREDENTIALS_PROVIDER,
        );
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .retry_config(RetryConfig::disabled())
            .timeout_config(
                TimeoutConfig::builder()
                    .operation_timeout(config.timeout)
                    .build(),
            )
            .load()
            .await;
        debug!("AWS clients ready for region {}", config.region);

        AwsCloud {
            ec2: aws_sdk_ec2::Client::new(&sdk_config),
            elb: aws_sdk_elasticloadbalancing::Client::new(&sdk_config),
            cloudwatch: aws_sdk_cloudwatch::Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl EntityCatalog for AwsCloud {
    async fn list_entities(&self, kind: EntityKind) -> Result<Vec<Entity>> {
        match kind {
            EntityKind::Ec2 => ec2::list_instances(&self.ec2).await,
            EntityKind::Elb => elb::list_load_balancers(&self.elb).await,
        }
    }
}

#[async_trait]
impl MetricCatalog for AwsCloud {
    async fn list_metrics(&self, dimension: &Dimension) -> Result<Vec<MetricDescriptor>> {
        cloudwatch::list_metrics(&self.cloudwatch, dimension).await
    }
}

#[async_trait]
impl MetricSampler for AwsCloud {
    async fn latest(
        &self,
        dimension: &Dimension,
        metric: &MetricDescriptor,
        statistic: Statistic,
    ) -> Result<Option<DataPoint>> {
        cloudwatch::latest_datapoint(&self.cloudwatch, dimension, metric, statistic).await
    }
}
