//! Fuzz target for UCC discovery.
//!
//! Any relation the parser accepts must profile without panicking, and every
//! reported combination must actually be unique.

#![no_main]

use std::collections::HashSet;

use keyscan::{Parser, UccConfig, UccProfiler};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Keep the attribute lattice small enough to finish.
    if data.len() > 4_096 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(relation) = Parser::new().parse_str("fuzz", text) else {
        return;
    };

    let profiler = UccProfiler::with_config(UccConfig::default().with_max_arity(4));
    let uccs = profiler.profile(&relation).expect("discovery failed");

    for ucc in &uccs {
        let mut seen = HashSet::new();
        for record in relation.records() {
            let key: Vec<&str> = ucc.attributes().iter().map(|i| record[i].as_str()).collect();
            assert!(seen.insert(key), "reported UCC {} is not unique", ucc);
        }
    }
});
