#![no_main]

use libfuzzer_sys::fuzz_target;

use snmp_agent_registry::namespace;
use snmp_agent_registry::oid::Oid;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    // Fuzz OID from dotted string notation; valid input must round-trip
    if let Ok(oid) = Oid::parse(s) {
        let dotted = oid.to_dotted();
        assert_eq!(Oid::parse(&dotted).ok(), Some(oid));
    }

    // Joining never drops either side
    let absolute = namespace::to_absolute("1.3.6.1.4.1.12345", s);
    assert!(absolute.starts_with("1.3.6.1.4.1.12345"));
    assert!(absolute.ends_with(s));
});
