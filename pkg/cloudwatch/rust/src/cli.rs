// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::model::EntityKind;
use crate::pipeline::Mode;

// `-h` belongs to --host, so every command turns off the generated help flag
// and a long-only --help is declared globally instead.
#[derive(Parser, Debug)]
#[command(name = "zaws")]
#[command(version, disable_help_flag = true)]
#[command(about = "Zabbix discovery and trapper bridge for EC2, ELB and CloudWatch", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub options: Options,
}

#[derive(clap::Args, Debug, Default, Clone)]
pub struct Options {
    /// AWS region
    #[arg(short, long, global = true)]
    pub region: Option<String>,

    /// AWS API access key id
    #[arg(short, long, global = true, env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    pub key: Option<String>,

    /// AWS API secret access key
    #[arg(short, long, global = true, env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret: Option<String>,

    /// Target instance id or load balancer name
    #[arg(short, long, global = true)]
    pub id: Option<String>,

    /// Only handle the CloudWatch metric with this name
    #[arg(short, long, global = true)]
    pub metric: Option<String>,

    /// Zabbix server or proxy host
    #[arg(short = 'h', long, global = true)]
    pub host: Option<String>,

    /// Zabbix trapper port
    #[arg(short, long, global = true)]
    pub port: Option<u16>,

    /// YAML file with default settings
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Print help
    #[arg(long, global = true, action = ArgAction::Help)]
    pub help: Option<bool>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// EC2 instances
    #[command(disable_help_flag = true)]
    Ec2 {
        #[command(subcommand)]
        action: ListAction,
    },
    /// Classic load balancers
    #[command(disable_help_flag = true)]
    Elb {
        #[command(subcommand)]
        action: ListAction,
    },
    /// CloudWatch metrics of one instance or load balancer
    #[command(disable_help_flag = true)]
    Cloudwatch {
        #[command(subcommand)]
        action: CloudwatchAction,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    /// Print a discovery document of all resources
    #[command(disable_help_flag = true)]
    List,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudwatchAction {
    /// Print a discovery document of the target's metrics
    #[command(disable_help_flag = true)]
    List {
        #[arg(value_enum)]
        kind: EntityKind,
    },
    /// Send the target's latest metric values to Zabbix
    #[command(disable_help_flag = true)]
    Stats {
        #[arg(value_enum)]
        kind: EntityKind,
    },
}

impl Command {
    pub fn mode(self) -> Mode {
        match self {
            Command::Ec2 {
                action: ListAction::List,
            } => Mode::ListEntities(EntityKind::Ec2),
            Command::Elb {
                action: ListAction::List,
            } => Mode::ListEntities(EntityKind::Elb),
            Command::Cloudwatch {
                action: CloudwatchAction::List { kind },
            } => Mode::ListMetrics(kind),
            Command::Cloudwatch {
                action: CloudwatchAction::Stats { kind },
            } => Mode::PushStats(kind),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("zaws").chain(args.iter().copied()))
    }

    #[test]
    fn test_command_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_modes() {
        let cases = [
            (vec!["ec2", "list"], Mode::ListEntities(EntityKind::Ec2)),
            (vec!["elb", "list"], Mode::ListEntities(EntityKind::Elb)),
            (
                vec!["cloudwatch", "list", "ec2"],
                Mode::ListMetrics(EntityKind::Ec2),
            ),
            (
                vec!["cloudwatch", "list", "elb"],
                Mode::ListMetrics(EntityKind::Elb),
            ),
            (
                vec!["cloudwatch", "stats", "ec2"],
                Mode::PushStats(EntityKind::Ec2),
            ),
            (
                vec!["cloudwatch", "stats", "elb"],
                Mode::PushStats(EntityKind::Elb),
            ),
        ];
        for (argv, mode) in cases {
            let args = parse(&argv).unwrap();
            assert_eq!(args.command.mode(), mode, "{argv:?}");
        }
    }

    #[test]
    fn test_short_options_after_command() {
        let args = parse(&[
            "cloudwatch", "stats", "elb", "-r", "us-east-1", "-k", "AKID", "-s", "SECRET", "-i",
            "web-lb", "-m", "Latency", "-h", "zabbix.local", "-p", "10052",
        ])
        .unwrap();
        let o = args.options;
        assert_eq!(o.region.as_deref(), Some("us-east-1"));
        assert_eq!(o.key.as_deref(), Some("AKID"));
        assert_eq!(o.secret.as_deref(), Some("SECRET"));
        assert_eq!(o.id.as_deref(), Some("web-lb"));
        assert_eq!(o.metric.as_deref(), Some("Latency"));
        assert_eq!(o.host.as_deref(), Some("zabbix.local"));
        assert_eq!(o.port, Some(10052));
    }

    #[test]
    fn test_long_options() {
        let args = parse(&[
            "--region", "eu-west-1", "--id", "i-0abc", "--host", "zbx", "--port", "10051",
            "cloudwatch", "list", "ec2",
        ])
        .unwrap();
        assert_eq!(args.options.region.as_deref(), Some("eu-west-1"));
        assert_eq!(args.options.id.as_deref(), Some("i-0abc"));
        assert_eq!(args.options.host.as_deref(), Some("zbx"));
    }

    #[test]
    fn test_unknown_paths_are_rejected() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["rds", "list"]).is_err());
        assert!(parse(&["ec2", "show"]).is_err());
        assert!(parse(&["cloudwatch", "list"]).is_err());
        assert!(parse(&["cloudwatch", "list", "rds"]).is_err());
    }
}
