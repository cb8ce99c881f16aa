//! snmp-registry-demo: Serve sample values from an in-process agent.
//!
//! Part of the snmp-agent-registry CLI utilities.

use snmp_agent_registry::cli::args::{AgentArgs, OutputArgs};
use snmp_agent_registry::cli::hints::parse_oid;
use snmp_agent_registry::cli::output::{Listing, OutputContext, write_error};
use snmp_agent_registry::transport::LocalTransport;
use snmp_agent_registry::{Agent, BoxError, Registry, Value, ValueType};

use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

/// How long to wait for the transport to pick up entries registered after start.
const SYNC_TIMEOUT: Duration = Duration::from_secs(1);

/// Start an SNMP agent with sample entries and query it in-process.
#[derive(Debug, Parser)]
#[command(name = "snmp-registry-demo", version, about)]
struct Args {
    #[command(flatten)]
    agent: AgentArgs,

    #[command(flatten)]
    output: OutputArgs,

    /// Extra static string entries, relative to the enterprise prefix.
    #[arg(long = "static", value_name = "OID=VALUE", value_parser = parse_assignment)]
    statics: Vec<(String, String)>,

    /// OIDs to GET (dotted, well-known names, or enterprise.<fragment>).
    /// Without any, the registry listing is printed instead.
    #[arg(short, long = "get", value_name = "OID")]
    gets: Vec<String>,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((oid, value)) if !oid.is_empty() => Ok((oid.to_owned(), value.to_owned())),
        _ => Err(format!("expected OID=VALUE, got '{}'", s)),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    args.output.init_tracing(&args.agent.log_level);

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            write_error(&e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<(), BoxError> {
    let transport = Arc::new(LocalTransport::new());
    let agent = Agent::new(args.agent.to_config(), Arc::clone(&transport))?;
    let registry = agent.registry();

    register_samples(registry);
    for (oid, value) in &args.statics {
        registry.register_static(oid, ValueType::OctetString, value.as_str());
    }

    agent.start().await?;

    // Registered while running; the agent re-syncs the transport.
    let requests = AtomicU32::new(0);
    registry.register_dynamic("3.1.0", ValueType::Counter32, move || {
        Ok(Value::Counter32(requests.fetch_add(1, Ordering::Relaxed) + 1))
    });
    wait_for_binding(&transport, &registry.absolute("3.1.0")).await?;

    info!(count = registry.len(), "registry ready");

    let ctx = OutputContext::new(args.output.format);
    let mut stdout = std::io::stdout().lock();

    if args.gets.is_empty() {
        ctx.write_listing(&mut stdout, &Listing::from_registry(registry))?;
    } else {
        let oids = args
            .gets
            .iter()
            .map(|s| parse_oid(s, agent.prefix()))
            .collect::<Result<Vec<_>, _>>()?;
        let oids: Vec<&str> = oids.iter().map(String::as_str).collect();

        match transport.get(args.agent.community.as_bytes(), &oids) {
            Some(response) => ctx.write_response(&mut stdout, &response)?,
            None => warn!("request dropped by transport"),
        }
    }

    agent.stop()?;
    Ok(())
}

/// Sample entries: descriptors, process metrics and a standard-tree override.
fn register_samples(registry: &Registry) {
    registry.register_static("1.1.0", ValueType::OctetString, "My SNMP Agent v1.0");
    registry.register_static("1.2.0", ValueType::OctetString, "Example Device");

    let started = Instant::now();
    registry.register_dynamic("2.1.0", ValueType::Integer, move || {
        let secs = i32::try_from(started.elapsed().as_secs())?;
        Ok(Value::Integer(secs))
    });

    registry.register_dynamic("2.2.0", ValueType::Gauge32, || {
        let cpus = std::thread::available_parallelism()?;
        Ok(Value::Gauge32(u32::try_from(cpus.get())?))
    });

    registry.register_dynamic("2.4.0", ValueType::Integer, || {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?;
        Ok(Value::Integer(i32::try_from(now.as_secs())?))
    });

    registry.register_static_absolute(
        "1.3.6.1.2.1.1.1.0",
        ValueType::OctetString,
        "Custom SNMP Agent on Linux",
    );
}

async fn wait_for_binding(transport: &LocalTransport, oid: &str) -> Result<(), BoxError> {
    tokio::time::timeout(SYNC_TIMEOUT, async {
        while !transport.bound_oids().iter().any(|bound| bound == oid) {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .map_err(|_| format!("transport did not bind {} in time", oid))?;
    Ok(())
}
