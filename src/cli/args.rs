//! Command-line argument groups shared by the CLI binaries.

use clap::{Args, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::agent::{AgentConfig, DEFAULT_COMMUNITY, DEFAULT_LISTEN, DEFAULT_LOG_LEVEL};

/// Output format for listings and GET results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned, human-readable text.
    #[default]
    Human,
    /// Pretty-printed JSON.
    Json,
}

/// Agent configuration arguments.
#[derive(Debug, Clone, Args)]
pub struct AgentArgs {
    /// Private Enterprise Number owning the agent's subtree.
    #[arg(short = 'e', long = "pen", value_name = "PEN")]
    pub enterprise: u32,

    /// Address the agent listens on.
    #[arg(short, long, default_value = DEFAULT_LISTEN)]
    pub listen: String,

    /// Community string accepted by the agent.
    #[arg(short, long, default_value = DEFAULT_COMMUNITY)]
    pub community: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

impl AgentArgs {
    /// Build the agent configuration these arguments describe.
    pub fn to_config(&self) -> AgentConfig {
        AgentConfig {
            enterprise: self.enterprise,
            listen: self.listen.clone(),
            community: self.community.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

/// Output control arguments.
#[derive(Debug, Clone, Args)]
pub struct OutputArgs {
    /// Output format.
    #[arg(short = 'O', long, value_enum, default_value = "human")]
    pub format: OutputFormat,

    /// Log at debug level regardless of --log-level.
    #[arg(short, long)]
    pub verbose: bool,
}

impl OutputArgs {
    /// Initialize the tracing subscriber.
    ///
    /// `RUST_LOG` takes precedence; otherwise the crate and the binary log
    /// at `log_level`, raised to debug by `--verbose`. Logs go to stderr so
    /// JSON output on stdout stays parseable.
    pub fn init_tracing(&self, log_level: &str) {
        let level = if self.verbose { "debug" } else { log_level };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "snmp_agent_registry={level},snmp_registry_demo={level}"
            ))
        });

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}
