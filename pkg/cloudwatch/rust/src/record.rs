// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::metric_name::disambiguate;
use crate::model::{DataPoint, Entity, EntityKind, MetricDescriptor};

/// Low-level discovery macros. Declaration order is the encoding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    MetricName,
    MetricUnit,
    MetricNamespace,
    InstanceName,
    InstanceType,
    InstanceId,
    InstancePrivateAddr,
    ElbName,
    ElbDnsName,
}

impl Field {
    pub fn macro_name(self) -> &'static str {
        match self {
            Field::MetricName => "{#METRIC.NAME}",
            Field::MetricUnit => "{#METRIC.UNIT}",
            Field::MetricNamespace => "{#METRIC.NAMESPACE}",
            Field::InstanceName => "{#INSTANCE.NAME}",
            Field::InstanceType => "{#INSTANCE.TYPE}",
            Field::InstanceId => "{#INSTANCE.ID}",
            Field::InstancePrivateAddr => "{#INSTANCE.PRIVATE.ADDR}",
            Field::ElbName => "{#ELB.NAME}",
            Field::ElbDnsName => "{#ELB.DNS.NAME}",
        }
    }
}

/// A sparse discovery entry. Fields that were never set, or were set to an
/// empty string, are left out of the encoded document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: BTreeMap<Field, String>,
}

impl Record {
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.fields.insert(field, value.into());
    }

    pub fn set_opt(&mut self, field: Field, value: Option<&str>) {
        if let Some(value) = value {
            self.set(field, value);
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    /// Populated fields with non-empty values, in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields
            .iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(field, value)| (*field, value.as_str()))
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.macro_name(), value)?;
        }
        map.end()
    }
}

pub fn entity_record(entity: &Entity) -> Record {
    let mut record = Record::default();
    match entity.kind {
        EntityKind::Ec2 => {
            record.set(Field::InstanceName, entity.display_name());
            record.set_opt(Field::InstanceType, entity.instance_type.as_deref());
            record.set(Field::InstanceId, entity.id.as_str());
            record.set_opt(
                Field::InstancePrivateAddr,
                entity.private_address.as_deref(),
            );
        }
        EntityKind::Elb => {
            record.set(Field::ElbName, entity.id.as_str());
            record.set_opt(Field::ElbDnsName, entity.dns_name.as_deref());
        }
    }
    record
}

pub fn metric_record(descriptor: &MetricDescriptor, datapoint: Option<&DataPoint>) -> Record {
    let mut record = Record::default();
    record.set(
        Field::MetricName,
        disambiguate(&descriptor.name, &descriptor.dimensions),
    );
    record.set(Field::MetricNamespace, descriptor.namespace.as_str());
    record.set_opt(
        Field::MetricUnit,
        datapoint.and_then(|point| point.unit.as_deref()),
    );
    record
}
