// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::fmt;

use clap::ValueEnum;
use time::OffsetDateTime;

pub const EC2_NAMESPACE: &str = "AWS/EC2";
pub const ELB_NAMESPACE: &str = "AWS/ELB";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntityKind {
    /// EC2 compute instances
    Ec2,
    /// Classic elastic load balancers
    Elb,
}

impl EntityKind {
    /// CloudWatch dimension that identifies a single entity of this kind.
    pub fn dimension_name(self) -> &'static str {
        match self {
            EntityKind::Ec2 => "InstanceId",
            EntityKind::Elb => "LoadBalancerName",
        }
    }

    pub fn namespace(self) -> &'static str {
        match self {
            EntityKind::Ec2 => EC2_NAMESPACE,
            EntityKind::Elb => ELB_NAMESPACE,
        }
    }

    pub fn dimension(self, id: impl Into<String>) -> Dimension {
        Dimension::new(self.dimension_name(), id)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Ec2 => f.write_str("ec2"),
            EntityKind::Elb => f.write_str("elb"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub kind: EntityKind,
    pub id: String,
    /// Value of the `Name` tag, if any
    pub name: Option<String>,
    pub instance_type: Option<String>,
    pub private_address: Option<String>,
    pub dns_name: Option<String>,
}

impl Entity {
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Entity {
            kind,
            id: id.into(),
            name: None,
            instance_type: None,
            private_address: None,
            dns_name: None,
        }
    }

    /// The tag-derived name, falling back to the identifier.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dimension {
    pub name: String,
    pub value: String,
}

impl Dimension {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Dimension {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricDescriptor {
    pub name: String,
    pub namespace: String,
    pub dimensions: Vec<Dimension>,
}

impl MetricDescriptor {
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        MetricDescriptor {
            name: name.into(),
            namespace: namespace.into(),
            dimensions: Vec::new(),
        }
    }

    pub fn with_dimension(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.dimensions.push(Dimension::new(name, value));
        self
    }
}

/// One aggregated CloudWatch sample. Only the field for the requested
/// statistic is expected to be set.
#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub timestamp: OffsetDateTime,
    pub unit: Option<String>,
    pub sum: Option<f64>,
    pub average: Option<f64>,
}
