//! The OID value registry.
//!
//! [`Registry`] maps absolute OID strings to either a stored value (static
//! entry) or a [`Producer`] evaluated on every query (dynamic entry). At most
//! one entry exists per OID; registering an OID again replaces whatever was
//! there, whichever variant it was.
//!
//! # Addressing
//!
//! Every mutation comes in two forms. The plain form takes a fragment
//! relative to the enterprise prefix (`1.3.6.1.4.1.<PEN>`); the `_absolute`
//! form takes a full OID and uses it verbatim, so standard-tree objects such
//! as `sysDescr.0` can live in the same registry. Queries always use absolute
//! OIDs, since that is what arrives on the wire.
//!
//! ```rust
//! use snmp_agent_registry::{GetResult, Registry, Value, ValueType};
//! use std::sync::atomic::{AtomicU32, Ordering};
//!
//! let registry = Registry::new(12345)?;
//!
//! // 1.3.6.1.4.1.12345.1.1.0
//! registry.register_static("1.1.0", ValueType::OctetString, "My SNMP Agent v1.0");
//!
//! // sysDescr.0
//! registry.register_static_absolute("1.3.6.1.2.1.1.1.0", ValueType::OctetString, "Linux");
//!
//! // 1.3.6.1.4.1.12345.3.1.0, incremented on every GET
//! let calls = AtomicU32::new(0);
//! registry.register_dynamic("3.1.0", ValueType::Counter32, move || {
//!     Ok(Value::Counter32(calls.fetch_add(1, Ordering::Relaxed) + 1))
//! });
//!
//! assert_eq!(
//!     registry.get("1.3.6.1.4.1.12345.3.1.0")?,
//!     GetResult::Value(Value::Counter32(1))
//! );
//! # Ok::<(), snmp_agent_registry::Error>(())
//! ```
//!
//! # Locking
//!
//! A single [`parking_lot::RwLock`] guards the entries. Lookups and listings
//! take it with `read_recursive`, so they are never queued behind a waiting
//! writer: a slow producer delays writers but not other readers, and a
//! producer may itself read the registry. Mutations take the write lock.
//! Producers run *inside* the read lock, so they always see a consistent
//! entry set, and a producer that hangs holds off every writer. A steady
//! stream of overlapping readers can likewise starve writers. The registry
//! applies no timeout of its own.
//!
//! # Transport visibility
//!
//! Once an [`Agent`](crate::Agent) is running, a newly registered OID reaches
//! the transport on the agent's resync task, after the registering call has
//! returned. Until then a GET arriving through the transport can still answer
//! `noSuchObject` for it. Overwrites and unregistrations of OIDs already bound
//! are visible immediately, since bindings resolve through [`Registry::get`].
//!
//! # Audit events
//!
//! Registrations, overwrites and unregistrations are logged under the
//! `snmp_agent_registry::audit` tracing target with `oid`, `kind` and
//! `value_type` fields (plus `value` for static entries). Overwrites are
//! logged at WARN before the INFO registration event.

mod entry;
mod results;

pub use entry::{EntryKind, Producer};
pub use results::{GetResult, status_for};

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::error::{BoxError, Error, Result};
use crate::namespace;
use crate::transport::Binding;
use crate::value::{Value, ValueType};

use entry::{Entry, Source};

/// Tracing target for registration audit events.
pub const AUDIT_TARGET: &str = "snmp_agent_registry::audit";

/// Concurrency-safe OID registry.
///
/// Share it as `Arc<Registry>`; all methods take `&self`.
#[derive(Debug)]
pub struct Registry {
    prefix: Box<str>,
    entries: RwLock<HashMap<Box<str>, Entry>>,
    /// Bumped after every successful mutation.
    revision: watch::Sender<u64>,
}

impl Registry {
    /// Create an empty registry for a Private Enterprise Number.
    ///
    /// Fails with [`Error::Config`] if `pen` is zero.
    pub fn new(pen: u32) -> Result<Self> {
        let prefix = namespace::enterprise_prefix(pen)?;
        debug!(pen, prefix = %prefix, "registry created");
        Ok(Self {
            prefix: prefix.into_boxed_str(),
            entries: RwLock::new(HashMap::new()),
            revision: watch::Sender::new(0),
        })
    }

    /// The enterprise prefix, e.g. `1.3.6.1.4.1.12345`.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Translate a fragment relative to the enterprise prefix.
    pub fn absolute(&self, relative: &str) -> String {
        namespace::to_absolute(&self.prefix, relative)
    }

    /// Register a static value under the enterprise prefix.
    pub fn register_static(&self, relative: &str, value_type: ValueType, value: impl Into<Value>) {
        self.register_static_absolute(self.absolute(relative), value_type, value);
    }

    /// Register a static value at an absolute OID.
    ///
    /// Replaces any existing entry at `oid`. A running agent's transport
    /// picks up a new OID asynchronously; see the module docs.
    pub fn register_static_absolute(
        &self,
        oid: impl Into<String>,
        value_type: ValueType,
        value: impl Into<Value>,
    ) {
        let oid = oid.into().into_boxed_str();
        let value = value.into();
        {
            let mut entries = self.entries.write();
            warn_if_overwriting(&entries, &oid, EntryKind::Static);
            info!(
                target: AUDIT_TARGET,
                oid = %oid,
                kind = "static",
                value_type = %value_type,
                value = %value,
                "registered static OID"
            );
            entries.insert(
                oid,
                Entry {
                    value_type,
                    source: Source::Constant(value),
                },
            );
            self.bump_revision();
        }
    }

    /// Register a producer under the enterprise prefix.
    pub fn register_dynamic<F>(&self, relative: &str, value_type: ValueType, producer: F)
    where
        F: Fn() -> std::result::Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.register_dynamic_absolute(self.absolute(relative), value_type, producer);
    }

    /// Register a producer at an absolute OID.
    ///
    /// Replaces any existing entry at `oid`. The producer is called once per
    /// GET and its result is never cached. A running agent's transport picks
    /// up a new OID asynchronously; see the module docs.
    pub fn register_dynamic_absolute<F>(
        &self,
        oid: impl Into<String>,
        value_type: ValueType,
        producer: F,
    ) where
        F: Fn() -> std::result::Result<Value, BoxError> + Send + Sync + 'static,
    {
        let oid = oid.into().into_boxed_str();
        let producer: Producer = Arc::new(producer);
        {
            let mut entries = self.entries.write();
            warn_if_overwriting(&entries, &oid, EntryKind::Dynamic);
            info!(
                target: AUDIT_TARGET,
                oid = %oid,
                kind = "dynamic",
                value_type = %value_type,
                "registered dynamic OID"
            );
            entries.insert(
                oid,
                Entry {
                    value_type,
                    source: Source::Computed(producer),
                },
            );
            self.bump_revision();
        }
    }

    /// Remove the entry under the enterprise prefix.
    pub fn unregister(&self, relative: &str) -> Result<()> {
        self.unregister_absolute(&self.absolute(relative))
    }

    /// Remove the entry at an absolute OID, whichever variant it is.
    ///
    /// Fails with [`Error::NotFound`] if nothing is registered there.
    pub fn unregister_absolute(&self, oid: &str) -> Result<()> {
        let mut entries = self.entries.write();
        match entries.remove(oid) {
            Some(entry) => {
                info!(
                    target: AUDIT_TARGET,
                    oid,
                    kind = %entry.kind(),
                    value_type = %entry.value_type,
                    "unregistered OID"
                );
                self.bump_revision();
                Ok(())
            }
            None => {
                warn!(target: AUDIT_TARGET, oid, "OID not found for unregistration");
                Err(Error::not_found(oid))
            }
        }
    }

    /// Resolve an absolute OID.
    ///
    /// Static entries return their stored value. Dynamic entries invoke the
    /// producer synchronously, under a recursive read lock; a producer error comes
    /// back as [`Error::Evaluation`] with the producer's error as its source.
    /// Unknown OIDs yield [`GetResult::NoSuchObject`].
    pub fn get(&self, oid: &str) -> Result<GetResult> {
        let entries = self.entries.read_recursive();
        let Some(entry) = entries.get(oid) else {
            debug!(oid, "GET for unregistered OID");
            return Ok(GetResult::NoSuchObject);
        };

        match &entry.source {
            Source::Constant(value) => {
                debug!(oid, value = %value, "GET request (static)");
                Ok(GetResult::Value(value.clone()))
            }
            Source::Computed(producer) => match producer() {
                Ok(value) => {
                    debug!(oid, value = %value, "GET request (dynamic)");
                    Ok(GetResult::Value(value))
                }
                Err(source) => {
                    error!(oid, error = %source, "value producer failed");
                    Err(Error::evaluation(oid, source))
                }
            },
        }
    }

    /// Snapshot of every registered OID and the variant holding it.
    ///
    /// Iteration order is unspecified.
    pub fn list(&self) -> HashMap<String, EntryKind> {
        self.entries
            .read_recursive()
            .iter()
            .map(|(oid, entry)| (oid.to_string(), entry.kind()))
            .collect()
    }

    /// Type tag registered for an absolute OID.
    pub fn value_type(&self, oid: &str) -> Option<ValueType> {
        self.entries.read_recursive().get(oid).map(|entry| entry.value_type)
    }

    /// Check whether an absolute OID has an entry.
    pub fn contains(&self, oid: &str) -> bool {
        self.entries.read_recursive().contains_key(oid)
    }

    /// Number of registered OIDs.
    pub fn len(&self) -> usize {
        self.entries.read_recursive().len()
    }

    /// Check whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read_recursive().is_empty()
    }

    /// Watch the mutation counter.
    ///
    /// The value increases after every registration, overwrite and
    /// unregistration; transports use it to know when to rebuild bindings.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Current mutation counter.
    pub fn revision(&self) -> u64 {
        *self.revision.borrow()
    }

    /// Build the transport binding set from the current entries.
    ///
    /// Each binding's callback re-resolves its OID through [`Registry::get`]
    /// at call time, so it follows later overwrites of the same OID.
    pub fn bindings(self: &Arc<Self>) -> Vec<Binding> {
        let entries = self.entries.read_recursive();
        entries
            .iter()
            .map(|(oid, entry)| {
                let registry = Arc::clone(self);
                let key: Arc<str> = Arc::from(&**oid);
                let lookup = Arc::clone(&key);
                Binding::new(key, entry.value_type, move || registry.get(&lookup))
            })
            .collect()
    }

    /// Called with the write lock held, so a reader that observes a
    /// mutation also observes its revision.
    fn bump_revision(&self) {
        self.revision.send_modify(|rev| *rev += 1);
    }
}

fn warn_if_overwriting(entries: &HashMap<Box<str>, Entry>, oid: &str, kind: EntryKind) {
    if let Some(previous) = entries.get(oid) {
        warn!(
            target: AUDIT_TARGET,
            oid,
            previous = %previous.kind(),
            kind = %kind,
            "OID already registered, overwriting"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

    const PREFIX: &str = "1.3.6.1.4.1.12345";

    fn registry() -> Registry {
        Registry::new(12345).unwrap()
    }

    fn oid(relative: &str) -> String {
        format!("{PREFIX}.{relative}")
    }

    #[test]
    fn test_new_rejects_zero_pen() {
        assert!(matches!(Registry::new(0), Err(Error::Config { .. })));
    }

    #[test]
    fn test_prefix() {
        let registry = registry();
        assert_eq!(registry.prefix(), PREFIX);
        assert_eq!(registry.absolute("1.1.0"), oid("1.1.0"));
    }

    #[test]
    fn test_unknown_oid() {
        let registry = registry();
        assert_eq!(registry.get(&oid("1.1.0")).unwrap(), GetResult::NoSuchObject);
        assert!(matches!(
            registry.unregister("1.1.0"),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_static_get_is_repeatable() {
        let registry = registry();
        registry.register_static("1.1.0", ValueType::OctetString, "demo");

        for _ in 0..5 {
            assert_eq!(
                registry.get(&oid("1.1.0")).unwrap(),
                GetResult::Value(Value::from("demo"))
            );
        }
    }

    #[test]
    fn test_dynamic_invoked_once_per_get() {
        let registry = registry();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        registry.register_dynamic("2.1.0", ValueType::Integer, move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(Value::Integer(n as i32))
        });

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            registry.get(&oid("2.1.0")).unwrap(),
            GetResult::Value(Value::Integer(1))
        );
        assert_eq!(
            registry.get(&oid("2.1.0")).unwrap(),
            GetResult::Value(Value::Integer(2))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_listing_does_not_invoke_producers() {
        let registry = registry();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        registry.register_dynamic("2.1.0", ValueType::Integer, move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Value::Integer(0))
        });

        let _ = registry.list();
        let _ = registry.contains(&oid("2.1.0"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_producer_error_is_forwarded() {
        #[derive(Debug, thiserror::Error)]
        #[error("sensor {0} offline")]
        struct SensorError(u8);

        let registry = registry();
        registry.register_dynamic("2.2.0", ValueType::Gauge32, || Err(SensorError(3).into()));

        let err = registry.get(&oid("2.2.0")).unwrap_err();
        assert_eq!(err.oid(), Some(oid("2.2.0").as_str()));

        let source = err.into_evaluation_source().unwrap();
        let sensor = source.downcast_ref::<SensorError>().unwrap();
        assert_eq!(sensor.0, 3);

        // The failure leaves the entry in place.
        assert_eq!(registry.list().get(&oid("2.2.0")), Some(&EntryKind::Dynamic));
    }

    #[test]
    fn test_overwrite_static_with_static() {
        let registry = registry();
        registry.register_static("1.1.0", ValueType::OctetString, "first");
        registry.register_static("1.1.0", ValueType::OctetString, "second");

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get(&oid("1.1.0")).unwrap(),
            GetResult::Value(Value::from("second"))
        );
    }

    #[test]
    fn test_overwrite_static_with_dynamic() {
        let registry = registry();
        registry.register_static("1.1.0", ValueType::OctetString, "static");
        registry.register_dynamic("1.1.0", ValueType::Integer, || Ok(Value::Integer(7)));

        let list = registry.list();
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(&oid("1.1.0")), Some(&EntryKind::Dynamic));
        assert_eq!(registry.value_type(&oid("1.1.0")), Some(ValueType::Integer));
        assert_eq!(
            registry.get(&oid("1.1.0")).unwrap(),
            GetResult::Value(Value::Integer(7))
        );
    }

    #[test]
    fn test_overwrite_dynamic_with_static() {
        let registry = registry();
        registry.register_dynamic("1.1.0", ValueType::Integer, || Ok(Value::Integer(7)));
        registry.register_static("1.1.0", ValueType::OctetString, "static");

        let list = registry.list();
        assert_eq!(list.len(), 1);
        assert_eq!(list.get(&oid("1.1.0")), Some(&EntryKind::Static));
        assert_eq!(
            registry.get(&oid("1.1.0")).unwrap(),
            GetResult::Value(Value::from("static"))
        );
    }

    #[test]
    fn test_overwrite_dynamic_with_dynamic() {
        let registry = registry();
        registry.register_dynamic("1.1.0", ValueType::Integer, || Ok(Value::Integer(1)));
        registry.register_dynamic("1.1.0", ValueType::Integer, || Ok(Value::Integer(2)));

        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.get(&oid("1.1.0")).unwrap(),
            GetResult::Value(Value::Integer(2))
        );
    }

    #[test]
    fn test_unregister_either_variant() {
        let registry = registry();
        registry.register_static("1.1.0", ValueType::OctetString, "s");
        registry.register_dynamic("2.1.0", ValueType::Integer, || Ok(Value::Integer(0)));

        registry.unregister("1.1.0").unwrap();
        registry.unregister_absolute(&oid("2.1.0")).unwrap();

        assert!(registry.is_empty());
        assert_eq!(registry.get(&oid("1.1.0")).unwrap(), GetResult::NoSuchObject);
        assert_eq!(registry.get(&oid("2.1.0")).unwrap(), GetResult::NoSuchObject);

        // Second removal is the signaled failure.
        let err = registry.unregister("1.1.0").unwrap_err();
        assert_eq!(err.oid(), Some(oid("1.1.0").as_str()));
    }

    #[test]
    fn test_absolute_registration_outside_enterprise_tree() {
        let registry = registry();
        registry.register_static_absolute(
            "1.3.6.1.2.1.1.1.0",
            ValueType::OctetString,
            "Custom SNMP Agent on Linux",
        );

        assert!(registry.contains("1.3.6.1.2.1.1.1.0"));
        assert!(!registry.contains(&oid("1.3.6.1.2.1.1.1.0")));
    }

    #[test]
    fn test_malformed_oid_accepted_verbatim() {
        let registry = registry();
        registry.register_static_absolute("not..an.oid", ValueType::Null, Value::Null);

        assert_eq!(registry.list().get("not..an.oid"), Some(&EntryKind::Static));
        assert_eq!(registry.get("not.an.oid").unwrap(), GetResult::NoSuchObject);
    }

    #[test]
    fn test_revision_bumps_on_mutation_only() {
        let registry = registry();
        assert_eq!(registry.revision(), 0);

        registry.register_static("1.1.0", ValueType::Integer, 1);
        registry.register_static("1.1.0", ValueType::Integer, 2);
        assert_eq!(registry.revision(), 2);

        let _ = registry.get(&oid("1.1.0"));
        let _ = registry.unregister("9.9.9");
        assert_eq!(registry.revision(), 2);

        registry.unregister("1.1.0").unwrap();
        assert_eq!(registry.revision(), 3);
    }

    #[test]
    fn test_subscribe_sees_changes() {
        let registry = registry();
        let mut rx = registry.subscribe();
        assert!(!rx.has_changed().unwrap());

        registry.register_static("1.1.0", ValueType::Integer, 1);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 1);
    }

    #[test]
    fn test_bindings_follow_overwrites() {
        let registry = Arc::new(registry());
        registry.register_static("1.1.0", ValueType::Integer, 1);

        let bindings = registry.bindings();
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[0].oid(), oid("1.1.0"));
        assert_eq!(bindings[0].value_type(), ValueType::Integer);

        let value = AtomicI32::new(10);
        registry.register_dynamic("1.1.0", ValueType::Integer, move || {
            Ok(Value::Integer(value.fetch_add(1, Ordering::SeqCst)))
        });

        // The old binding resolves through the registry, not a captured value.
        assert_eq!(bindings[0].get().unwrap(), GetResult::Value(Value::Integer(10)));

        registry.unregister("1.1.0").unwrap();
        assert_eq!(bindings[0].get().unwrap(), GetResult::NoSuchObject);
    }

    #[test]
    fn test_concurrent_gets_on_static_entries() {
        let registry = registry();
        for i in 0..16 {
            registry.register_static(&format!("1.{i}.0"), ValueType::Integer, i);
        }

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for round in 0..200 {
                        let i = round % 16;
                        let got = registry.get(&oid(&format!("1.{i}.0"))).unwrap();
                        assert_eq!(got, GetResult::Value(Value::Integer(i)));
                    }
                });
            }
        });
    }

    #[test]
    fn test_producer_reads_registry_while_writer_waits() {
        use std::sync::mpsc;
        use std::time::Duration;

        let registry = Arc::new(registry());
        registry.register_static("1.1.0", ValueType::Integer, Value::Integer(41));

        // Derived value: reads another OID after a writer has queued up.
        let weak = Arc::downgrade(&registry);
        registry.register_dynamic("1.2.0", ValueType::Integer, move || {
            std::thread::sleep(Duration::from_millis(100));
            let registry = weak.upgrade().ok_or("registry dropped")?;
            match registry.get(&oid("1.1.0"))? {
                GetResult::Value(Value::Integer(n)) => Ok(Value::Integer(n + 1)),
                other => Err(format!("unexpected {other:?}").into()),
            }
        });

        let (tx, rx) = mpsc::channel();
        let reader = Arc::clone(&registry);
        std::thread::spawn(move || {
            let _ = tx.send(reader.get(&oid("1.2.0")).map_err(|e| e.to_string()));
        });

        let writer = Arc::clone(&registry);
        let writer = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(30));
            writer.register_static("9.9.0", ValueType::Integer, Value::Integer(0));
        });

        let outcome = rx
            .recv_timeout(Duration::from_secs(3))
            .expect("derived GET did not complete");
        assert_eq!(outcome.unwrap(), GetResult::Value(Value::Integer(42)));

        writer.join().unwrap();
        assert!(registry.contains(&oid("9.9.0")));
    }

    #[test]
    fn test_slow_producer_does_not_stall_other_readers() {
        use std::time::{Duration, Instant};

        let registry = registry();
        registry.register_static("1.1.0", ValueType::OctetString, "fast");
        registry.register_dynamic("2.1.0", ValueType::Integer, || {
            std::thread::sleep(Duration::from_millis(400));
            Ok(Value::Integer(0))
        });

        std::thread::scope(|s| {
            s.spawn(|| registry.get(&oid("2.1.0")).unwrap());
            std::thread::sleep(Duration::from_millis(50));

            // Queued behind the in-flight producer.
            s.spawn(|| registry.register_static("9.9.0", ValueType::Integer, Value::Integer(0)));
            std::thread::sleep(Duration::from_millis(50));

            let started = Instant::now();
            assert_eq!(
                registry.get(&oid("1.1.0")).unwrap(),
                GetResult::Value(Value::from("fast"))
            );
            let waited = started.elapsed();
            assert!(
                waited < Duration::from_millis(150),
                "static GET waited {waited:?}"
            );
        });

        assert!(registry.contains(&oid("9.9.0")));
    }

    #[test]
    fn test_producers_run_concurrently() {
        use std::sync::Barrier;

        // Both readers must be inside a producer at once to pass the barrier.
        let registry = registry();
        let barrier = Arc::new(Barrier::new(2));
        let inner = Arc::clone(&barrier);
        registry.register_dynamic("2.1.0", ValueType::Integer, move || {
            inner.wait();
            Ok(Value::Integer(1))
        });

        std::thread::scope(|s| {
            for _ in 0..2 {
                s.spawn(|| registry.get(&oid("2.1.0")).unwrap());
            }
        });
    }
}
