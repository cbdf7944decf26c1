// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use crate::model::Dimension;

/// Dimension under which CloudWatch reports the same metric once per zone.
pub const ZONE_DIMENSION: &str = "AvailabilityZone";

/// Returns `name.<zone>` when the series is partitioned by availability zone,
/// so per-zone series of the same metric get distinct keys.
pub fn disambiguate(metric_name: &str, dimensions: &[Dimension]) -> String {
    match dimensions.iter().find(|d| d.name == ZONE_DIMENSION) {
        Some(zone) => format!("{metric_name}.{}", zone.value),
        None => metric_name.to_string(),
    }
}
