// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use aws_sdk_elasticloadbalancing::Client;
use aws_sdk_elasticloadbalancing::error::DisplayErrorContext;
use aws_sdk_elasticloadbalancing::types::LoadBalancerDescription;
use log::{debug, warn};

use crate::errors::{Error, Result};
use crate::model::{Entity, EntityKind};

pub async fn list_load_balancers(client: &Client) -> Result<Vec<Entity>> {
    let mut entities = Vec::new();
    let mut marker = None;

    loop {
        let page = client
            .describe_load_balancers()
            .set_marker(marker.take())
            .send()
            .await
            .map_err(|e| Error::CatalogUnavailable {
                kind: EntityKind::Elb,
                reason: DisplayErrorContext(&e).to_string(),
            })?;

        for description in page.load_balancer_descriptions() {
            match load_balancer_entity(description) {
                Some(entity) => entities.push(entity),
                None => warn!("skipping load balancer without a name"),
            }
        }

        match page.next_marker() {
            Some(next) if !next.is_empty() => marker = Some(next.to_string()),
            _ => break,
        }
    }

    debug!("found {} load balancer(s)", entities.len());
    Ok(entities)
}

pub(crate) fn load_balancer_entity(description: &LoadBalancerDescription) -> Option<Entity> {
    let name = description.load_balancer_name()?;
    Some(Entity {
        dns_name: description.dns_name().map(str::to_string),
        ..Entity::new(EntityKind::Elb, name)
    })
}
