// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::time::Duration;

use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use zaws::Error;
use zaws::ports::SampleSink;
use zaws::samples::Sample;
use zaws::zabbix::ZabbixSender;

const TIMEOUT: Duration = Duration::from_secs(5);

fn samples() -> Vec<Sample> {
    vec![
        Sample {
            host: "web-lb".to_string(),
            key: "cloudwatch.metric[RequestCount]".to_string(),
            value: "42.0000".to_string(),
            clock: 1_772_366_400,
        },
        Sample {
            host: "web-lb".to_string(),
            key: "cloudwatch.metric[Latency.ap-northeast-1a]".to_string(),
            value: "0.1250".to_string(),
            clock: 1_772_366_400,
        },
    ]
}

fn frame(payload: &[u8]) -> Vec<u8> {
    let mut packet = b"ZBXD\x01".to_vec();
    packet.extend_from_slice(&(payload.len() as u64).to_le_bytes());
    packet.extend_from_slice(payload);
    packet
}

/// Accepts one connection, returns the decoded request and answers with
/// `reply`.
async fn fake_trapper(reply: Vec<u8>) -> (u16, JoinHandle<Value>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut header = [0u8; 13];
        socket.read_exact(&mut header).await.unwrap();
        assert_eq!(&header[..5], b"ZBXD\x01");
        let mut len = [0u8; 8];
        len.copy_from_slice(&header[5..]);
        let mut payload = vec![0u8; u64::from_le_bytes(len) as usize];
        socket.read_exact(&mut payload).await.unwrap();
        socket.write_all(&reply).await.unwrap();
        serde_json::from_slice(&payload).unwrap()
    });
    (port, handle)
}

#[tokio::test]
async fn test_successful_send() {
    let (port, server) = fake_trapper(frame(
        br#"{"response":"success","info":"processed: 2; failed: 0; total: 2; seconds spent: 0.000071"}"#,
    ))
    .await;

    let sender = ZabbixSender::new("127.0.0.1", port, TIMEOUT);
    let ack = sender.send(&samples()).await.unwrap();
    assert!(ack.is_success());
    let summary = ack.summary().unwrap();
    assert_eq!((summary.processed, summary.failed, summary.total), (2, 0, 2));

    let request = server.await.unwrap();
    assert_eq!(request["request"], "sender data");
    assert!(request["clock"].is_i64());
    let data = request["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["host"], "web-lb");
    assert_eq!(data[0]["key"], "cloudwatch.metric[RequestCount]");
    assert_eq!(data[0]["value"], "42.0000");
    assert_eq!(data[0]["clock"], 1_772_366_400);
    assert_eq!(data[1]["key"], "cloudwatch.metric[Latency.ap-northeast-1a]");
}

#[tokio::test]
async fn test_failed_response_is_protocol_error() {
    let (port, server) =
        fake_trapper(frame(br#"{"response":"failed","info":"host not found"}"#)).await;

    let sender = ZabbixSender::new("127.0.0.1", port, TIMEOUT);
    let err = sender.send(&samples()).await.unwrap_err();
    assert!(matches!(err, Error::Protocol(_)), "{err}");
    server.await.unwrap();
}

#[tokio::test]
async fn test_unframed_response_is_protocol_error() {
    let (port, server) = fake_trapper(b"HTTP/1.1 400 Bad Request\r\n\r\n".to_vec()).await;

    let sender = ZabbixSender::new("127.0.0.1", port, TIMEOUT);
    let err = sender.send(&samples()).await.unwrap_err();
    assert!(matches!(err, Error::Protocol(_)), "{err}");
    server.await.unwrap();
}

#[tokio::test]
async fn test_unreachable_daemon_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let sender = ZabbixSender::new("127.0.0.1", port, TIMEOUT);
    let err = sender.send(&samples()).await.unwrap_err();
    assert!(matches!(err, Error::Transport { .. }), "{err}");
}

#[tokio::test]
async fn test_silent_daemon_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let server = tokio::spawn(async move {
        let (socket, _) = listener.accept().await.unwrap();
        tokio::time::sleep(Duration::from_secs(2)).await;
        drop(socket);
    });

    let sender = ZabbixSender::new("127.0.0.1", port, Duration::from_millis(200));
    let err = sender.send(&samples()).await.unwrap_err();
    match err {
        Error::Transport { source, .. } => {
            assert_eq!(source.kind(), std::io::ErrorKind::TimedOut)
        }
        other => panic!("expected a transport error, got {other}"),
    }
    server.abort();
}
