// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use aws_sdk_ec2::Client;
use aws_sdk_ec2::error::DisplayErrorContext;
use aws_sdk_ec2::types::Instance;
use log::{debug, warn};

use crate::errors::{Error, Result};
use crate::model::{Entity, EntityKind};

const NAME_TAG: &str = "Name";

pub async fn list_instances(client: &Client) -> Result<Vec<Entity>> {
    let mut entities = Vec::new();
    let mut next_token = None;

    loop {
        let page = client
            .describe_instances()
            .set_next_token(next_token.take())
            .send()
            .await
            .map_err(|e| Error::CatalogUnavailable {
                kind: EntityKind::Ec2,
                reason: DisplayErrorContext(&e).to_string(),
            })?;

        for reservation in page.reservations() {
            for instance in reservation.instances() {
                match instance_entity(instance) {
                    Some(entity) => entities.push(entity),
                    None => warn!("skipping EC2 instance without an id"),
                }
            }
        }

        match page.next_token() {
            Some(token) if !token.is_empty() => next_token = Some(token.to_string()),
            _ => break,
        }
    }

    debug!("found {} EC2 instance(s)", entities.len());
    Ok(entities)
}

pub(crate) fn instance_entity(instance: &Instance) -> Option<Entity> {
    let id = instance.instance_id()?;
    let name = instance
        .tags()
        .iter()
        .filter(|tag| tag.key() == Some(NAME_TAG))
        .filter_map(|tag| tag.value())
        .next_back();

    Some(Entity {
        name: name.map(str::to_string),
        instance_type: instance.instance_type().map(|t| t.as_str().to_string()),
        private_address: instance.private_ip_address().map(str::to_string),
        ..Entity::new(EntityKind::Ec2, id)
    })
}
