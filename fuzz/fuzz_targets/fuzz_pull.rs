#![no_main]
use libfuzzer_sys::fuzz_target;
use xmlpull::{EventKind, PullParser, FEATURE_PROCESS_NAMESPACES};

fuzz_target!(|data: &[u8]| {
    let mut parser = PullParser::new();
    let _ = parser.set_feature(FEATURE_PROCESS_NAMESPACES, true);
    if parser.set_input_bytes(data).is_err() {
        // A failed input leaves nothing to replay.
        assert_eq!(parser.advance(), EventKind::None);
        return;
    }
    // Draining and querying every event should never panic.
    while parser.advance() != EventKind::None {
        let _ = parser.name();
        let _ = parser.namespace();
        let _ = parser.in_scope_namespace_count();
        if let Some(count) = parser.attribute_count() {
            for i in 0..count {
                let _ = parser.attribute_value(i);
            }
        }
        assert!(parser.depth().is_some());
    }
});
