// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

// Correctness
#![deny(clippy::indexing_slicing)]
#![deny(clippy::string_slice)]
#![deny(clippy::cast_possible_wrap)]
// Panicking code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::unimplemented)]
#![deny(clippy::todo)]
// Debug code that shouldn't be in production
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]

pub mod aws;
pub mod cli;
pub mod config;
pub mod discovery;
mod errors;
pub mod metric_name;
pub mod model;
pub mod pipeline;
pub mod ports;
pub mod record;
pub mod samples;
pub mod statistic;
pub mod zabbix;

// Re-export the public API
pub use errors::{Error, Result, Severity};
pub use pipeline::{Mode, Output, Pipeline};
pub use statistic::{Statistic, resolve_statistic};
