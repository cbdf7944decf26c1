// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! Client side of the Zabbix trapper ("sender data") protocol.
//!
//! Every message is framed as `ZBXD`, a flags byte, an 8-byte little-endian
//! payload length and the JSON payload.

use std::fmt;
use std::io;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::config::Config;
use crate::errors::{Error, Result};
use crate::ports::SampleSink;
use crate::samples::Sample;

const MAGIC: &[u8; 4] = b"ZBXD";
const FLAG_PROTOCOL: u8 = 0x01;
const FLAG_COMPRESSED: u8 = 0x02;
const HEADER_LEN: usize = 13;
const MAX_RESPONSE_LEN: u64 = 1024 * 1024;

#[derive(Serialize)]
struct SenderRequest<'a> {
    request: &'static str,
    data: &'a [Sample],
    clock: i64,
}

/// The daemon's acknowledgement of a batch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ack {
    pub response: String,
    #[serde(default)]
    pub info: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub processed: u64,
    pub failed: u64,
    pub total: u64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed {}, failed {}, total {}",
            self.processed, self.failed, self.total
        )
    }
}

impl Ack {
    pub fn is_success(&self) -> bool {
        self.response == "success"
    }

    /// Parses `processed: 1; failed: 0; total: 1; seconds spent: 0.000055`.
    pub fn summary(&self) -> Option<Summary> {
        let mut summary = Summary::default();
        let mut seen = 0;
        for part in self.info.split(';') {
            let Some((key, value)) = part.split_once(':') else {
                continue;
            };
            let slot = match key.trim() {
                "processed" => &mut summary.processed,
                "failed" => &mut summary.failed,
                "total" => &mut summary.total,
                _ => continue,
            };
            *slot = value.trim().parse().ok()?;
            seen += 1;
        }
        (seen == 3).then_some(summary)
    }
}

fn frame(payload: &[u8]) -> Vec<u8> {
    let mut packet = Vec::with_capacity(HEADER_LEN + payload.len());
    packet.extend_from_slice(MAGIC);
    packet.push(FLAG_PROTOCOL);
    packet.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    packet.extend_from_slice(payload);
    packet
}

pub fn encode_request(samples: &[Sample], clock: i64) -> Result<Vec<u8>> {
    let payload = serde_json::to_vec(&SenderRequest {
        request: "sender data",
        data: samples,
        clock,
    })?;
    Ok(frame(&payload))
}

/// Validates a response header and returns the payload length it announces.
fn parse_header(header: &[u8; HEADER_LEN]) -> Result<u64> {
    let (magic, rest) = header.split_at(MAGIC.len());
    let (flags, len) = rest.split_at(1);
    if magic != MAGIC {
        return Err(Error::Protocol("response does not start with ZBXD".to_string()));
    }
    let flags = flags.first().copied().unwrap_or_default();
    if flags & FLAG_PROTOCOL == 0 {
        return Err(Error::Protocol(format!("unsupported header flags {flags:#04x}")));
    }
    if flags & FLAG_COMPRESSED != 0 {
        return Err(Error::Protocol("compressed responses are not supported".to_string()));
    }
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(len);
    let len = u64::from_le_bytes(bytes);
    if len > MAX_RESPONSE_LEN {
        return Err(Error::Protocol(format!("response of {len} bytes is too large")));
    }
    Ok(len)
}

pub fn decode_ack(payload: &[u8]) -> Result<Ack> {
    serde_json::from_slice(payload)
        .map_err(|e| Error::Protocol(format!("malformed response: {e}")))
}

pub struct ZabbixSender {
    addr: String,
    timeout: Duration,
}

impl ZabbixSender {
    pub fn new(host: &str, port: u16, timeout: Duration) -> Self {
        ZabbixSender {
            addr: format!("{host}:{port}"),
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.zabbix_host, config.zabbix_port, config.timeout)
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    fn transport_error(&self, source: io::Error) -> Error {
        Error::Transport {
            addr: self.addr.clone(),
            source,
        }
    }

    async fn exchange(&self, packet: &[u8]) -> Result<Vec<u8>> {
        let mut stream = TcpStream::connect(&self.addr)
            .await
            .map_err(|e| self.transport_error(e))?;
        stream
            .write_all(packet)
            .await
            .map_err(|e| self.transport_error(e))?;

        let mut header = [0u8; HEADER_LEN];
        stream
            .read_exact(&mut header)
            .await
            .map_err(|e| self.transport_error(e))?;
        let len = parse_header(&header)?;

        let mut payload = vec![0u8; len as usize];
        stream
            .read_exact(&mut payload)
            .await
            .map_err(|e| self.transport_error(e))?;
        Ok(payload)
    }
}

#[async_trait]
impl SampleSink for ZabbixSender {
    async fn send(&self, samples: &[Sample]) -> Result<Ack> {
        let packet = encode_request(samples, OffsetDateTime::now_utc().unix_timestamp())?;
        debug!("sending {} sample(s) to {}", samples.len(), self.addr);

        let payload = tokio::time::timeout(self.timeout, self.exchange(&packet))
            .await
            .map_err(|_| {
                self.transport_error(io::Error::new(io::ErrorKind::TimedOut, "timed out"))
            })??;

        let ack = decode_ack(&payload)?;
        if !ack.is_success() {
            return Err(Error::Protocol(format!(
                "server answered {:?}: {}",
                ack.response, ack.info
            )));
        }
        Ok(ack)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn sample() -> Sample {
        Sample {
            host: "i-0abc".to_string(),
            key: "cloudwatch.metric[CPUUtilization]".to_string(),
            value: "12.5000".to_string(),
            clock: 1_772_366_400,
        }
    }

    #[test]
    fn test_request_framing() {
        let packet = encode_request(&[sample()], 1_772_366_460).unwrap();

        assert_eq!(&packet[..4], b"ZBXD");
        assert_eq!(packet[4], 0x01);
        let mut len = [0u8; 8];
        len.copy_from_slice(&packet[5..13]);
        let payload = &packet[13..];
        assert_eq!(u64::from_le_bytes(len), payload.len() as u64);

        let json: serde_json::Value = serde_json::from_slice(payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "request": "sender data",
                "data": [{
                    "host": "i-0abc",
                    "key": "cloudwatch.metric[CPUUtilization]",
                    "value": "12.5000",
                    "clock": 1_772_366_400
                }],
                "clock": 1_772_366_460
            })
        );
    }

    #[test]
    fn test_parse_header_accepts_valid_frame() {
        let packet = frame(br#"{"response":"success"}"#);
        let mut header = [0u8; HEADER_LEN];
        header.copy_from_slice(&packet[..HEADER_LEN]);
        assert_eq!(parse_header(&header).unwrap(), 22);
    }

    #[test]
    fn test_parse_header_rejects_bad_magic() {
        let mut header = [0u8; HEADER_LEN];
        header[..5].copy_from_slice(b"HTTP/");
        assert!(matches!(parse_header(&header), Err(Error::Protocol(_))));
    }

    #[test]
    fn test_parse_header_rejects_compressed_and_oversized() {
        let mut header = [0u8; HEADER_LEN];
        header[..4].copy_from_slice(MAGIC);
        header[4] = FLAG_PROTOCOL | FLAG_COMPRESSED;
        assert!(matches!(parse_header(&header), Err(Error::Protocol(_))));

        header[4] = FLAG_PROTOCOL;
        header[5..].copy_from_slice(&(MAX_RESPONSE_LEN + 1).to_le_bytes());
        assert!(matches!(parse_header(&header), Err(Error::Protocol(_))));
    }

    #[test]
    fn test_ack_summary() {
        let ack = decode_ack(
            br#"{"response":"success","info":"processed: 3; failed: 1; total: 4; seconds spent: 0.000055"}"#,
        )
        .unwrap();
        assert!(ack.is_success());
        assert_eq!(
            ack.summary(),
            Some(Summary {
                processed: 3,
                failed: 1,
                total: 4
            })
        );
    }

    #[test]
    fn test_summary_display() {
        let summary = Summary {
            processed: 2,
            failed: 1,
            total: 3,
        };
        assert_eq!(summary.to_string(), "processed 2, failed 1, total 3");
    }

    #[test]
    fn test_ack_summary_unparseable_info() {
        let ack = decode_ack(br#"{"response":"success","info":"ok"}"#).unwrap();
        assert_eq!(ack.summary(), None);

        let ack = decode_ack(br#"{"response":"success"}"#).unwrap();
        assert_eq!(ack.info, "");
        assert_eq!(ack.summary(), None);
    }

    #[test]
    fn test_decode_ack_rejects_garbage() {
        assert!(matches!(decode_ack(b"not json"), Err(Error::Protocol(_))));
    }
}
