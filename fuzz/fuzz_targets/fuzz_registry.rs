#![no_main]

use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

use snmp_agent_registry::{GetResult, Registry, Value, ValueType};

// Each input byte pair is an operation on one of a handful of OIDs; the
// registry must agree with a shadow map after every step.
fuzz_target!(|data: &[u8]| {
    let Ok(registry) = Registry::new(12345) else {
        return;
    };
    let mut shadow: std::collections::HashMap<String, Value> = Default::default();

    for pair in data.chunks_exact(2) {
        let oid = registry.absolute(&format!("{}.0", pair[0] % 8));
        match pair[1] % 3 {
            0 => {
                let value = Value::OctetString(Bytes::copy_from_slice(pair));
                registry.register_static_absolute(oid.as_str(), ValueType::OctetString, value.clone());
                shadow.insert(oid.clone(), value);
            }
            1 => {
                let n = i32::from(pair[1]);
                registry.register_dynamic_absolute(oid.as_str(), ValueType::Integer, move || {
                    Ok(Value::Integer(n))
                });
                shadow.insert(oid.clone(), Value::Integer(n));
            }
            _ => {
                let removed = registry.unregister_absolute(&oid).is_ok();
                assert_eq!(removed, shadow.remove(&oid).is_some());
            }
        }

        let expected = shadow.get(&oid).cloned();
        let got = registry.get(&oid).ok().and_then(GetResult::into_option);
        assert_eq!(got, expected);
        assert_eq!(registry.len(), shadow.len());
    }
});
