//! Output formatting for CLI tools.
//!
//! Supports human-readable and JSON output of registry listings and GET
//! responses.

use std::fmt;
use std::io::{self, Write};

use serde::Serialize;

use crate::cli::args::OutputFormat;
use crate::cli::hints;
use crate::error::ErrorStatus;
use crate::registry::{EntryKind, Registry};
use crate::transport::Response;
use crate::{Oid, Value, VarBind};

/// Snapshot of a registry's entries, ready for output.
#[derive(Debug, Serialize)]
pub struct Listing {
    pub prefix: String,
    pub entries: Vec<ListingEntry>,
}

/// One registered OID.
#[derive(Debug, Serialize)]
pub struct ListingEntry {
    pub oid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    pub kind: EntryKind,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub value_type: Option<String>,
}

impl Listing {
    /// Capture the registry's entries in OID order.
    ///
    /// Producers are not invoked.
    pub fn from_registry(registry: &Registry) -> Self {
        let mut entries: Vec<ListingEntry> = registry
            .list()
            .into_iter()
            .map(|(oid, kind)| ListingEntry {
                hint: hints::lookup(&oid).map(String::from),
                value_type: registry.value_type(&oid).map(|t| t.name().to_owned()),
                kind,
                oid,
            })
            .collect();
        entries.sort_by_cached_key(|entry| oid_sort_key(&entry.oid));

        Self {
            prefix: registry.prefix().to_owned(),
            entries,
        }
    }
}

/// Result of a GET, ready for output.
#[derive(Debug, Serialize)]
pub struct GetReport {
    pub error_status: String,
    pub error_index: i32,
    pub results: Vec<VarBindResult>,
}

/// A single varbind result.
#[derive(Debug, Serialize)]
pub struct VarBindResult {
    pub oid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
    #[serde(rename = "type")]
    pub value_type: String,
    pub value: serde_json::Value,
}

impl From<&Response> for GetReport {
    fn from(response: &Response) -> Self {
        Self {
            error_status: response.error_status.to_string(),
            error_index: response.error_index,
            results: response.varbinds.iter().map(format_varbind).collect(),
        }
    }
}

/// Output context for formatting.
#[derive(Debug, Clone, Copy)]
pub struct OutputContext {
    pub format: OutputFormat,
}

impl OutputContext {
    /// Create a new output context.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Write a registry listing.
    pub fn write_listing<W: Write>(&self, w: &mut W, listing: &Listing) -> io::Result<()> {
        match self.format {
            OutputFormat::Json => write_json(w, listing),
            OutputFormat::Human => {
                writeln!(w, "Enterprise prefix: {}", listing.prefix)?;
                writeln!(w, "Registered OIDs:   {}", listing.entries.len())?;
                for entry in &listing.entries {
                    let oid = match &entry.hint {
                        Some(hint) => format!("{} ({})", entry.oid, hint),
                        None => entry.oid.clone(),
                    };
                    writeln!(
                        w,
                        "  {:<40} {:<8} {}",
                        oid,
                        entry.kind,
                        entry.value_type.as_deref().unwrap_or("-")
                    )?;
                }
                Ok(())
            }
        }
    }

    /// Write a GET response.
    pub fn write_response<W: Write>(&self, w: &mut W, response: &Response) -> io::Result<()> {
        let report = GetReport::from(response);
        match self.format {
            OutputFormat::Json => write_json(w, &report),
            OutputFormat::Human => {
                if response.error_status != ErrorStatus::NoError {
                    writeln!(
                        w,
                        "Error in packet: {} (index {})",
                        report.error_status, report.error_index
                    )?;
                    return Ok(());
                }

                for (vb, result) in response.varbinds.iter().zip(&report.results) {
                    if let Some(ref hint) = result.hint {
                        write!(w, "{} ({})", result.oid, hint)?;
                    } else {
                        write!(w, "{}", result.oid)?;
                    }

                    if vb.value.is_exception() {
                        writeln!(w, " = No Such Object available on this agent at this OID")?;
                    } else {
                        writeln!(w, " = {}: {}", result.value_type, vb.value)?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Write an error message to stderr.
pub fn write_error(err: &dyn fmt::Display) {
    let _ = writeln!(io::stderr().lock(), "Error: {}", err);
}

fn write_json<W: Write, T: Serialize>(w: &mut W, value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    writeln!(w, "{}", json)
}

/// Sort key placing valid OIDs first in numeric order, then malformed ones
/// in string order.
fn oid_sort_key(oid: &str) -> (bool, Option<Oid>, String) {
    let parsed = Oid::parse(oid).ok();
    (parsed.is_none(), parsed, oid.to_owned())
}

fn format_varbind(vb: &VarBind) -> VarBindResult {
    let (value_type, value) = format_value(&vb.value);
    VarBindResult {
        hint: hints::lookup(&vb.oid).map(String::from),
        oid: vb.oid.clone(),
        value_type,
        value,
    }
}

/// Format a value as (type name, JSON value).
fn format_value(value: &Value) -> (String, serde_json::Value) {
    use serde_json::json;

    let type_name = match value.value_type() {
        Some(t) => t.name().to_owned(),
        None => "NoSuchObject".to_owned(),
    };

    let json = match value {
        Value::Integer(v) => json!(v),
        Value::Counter32(v) | Value::Gauge32(v) | Value::TimeTicks(v) => json!(v),
        Value::Counter64(v) => json!(v),
        Value::OctetString(bytes) | Value::Opaque(bytes) => match std::str::from_utf8(bytes) {
            Ok(s) => json!(s),
            Err(_) => json!(format_hex(bytes)),
        },
        Value::Null | Value::NoSuchObject => serde_json::Value::Null,
        Value::ObjectIdentifier(oid) => json!(oid.to_dotted()),
        Value::IpAddress(_) => json!(value.to_string()),
    };

    (type_name, json)
}

fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}
