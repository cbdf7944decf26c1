// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use serde::Serialize;

use crate::errors::Result;
use crate::record::Record;

#[derive(Debug, Serialize)]
struct DiscoveryDocument<'a> {
    data: &'a [Record],
}

/// Encodes records as a Zabbix low-level discovery document,
/// `{"data":[{...},...]}`, keeping the input order.
pub fn encode(records: &[Record]) -> Result<String> {
    Ok(serde_json::to_string(&DiscoveryDocument { data: records })?)
}
