#![no_main]

use granite_spirv::decode_bytes;
use libfuzzer_sys::fuzz_target;

/// Inputs past the decoder's own size cap are rejected up front; keep a lower cap here so each
/// iteration stays cheap.
const MAX_INPUT_SIZE_BYTES: usize = 256 * 1024;

fuzz_target!(|data: &[u8]| {
    if data.len() > MAX_INPUT_SIZE_BYTES {
        return;
    }

    // Any error is acceptable; panics and unbounded allocations are not.
    let Ok(program) = decode_bytes(data) else {
        return;
    };

    for (_, entry) in program.entry_points() {
        for &id in &entry.interface {
            let _ = program.variable(id);
            let _ = program.type_of(id);
        }
    }
    let _ = program.dump();
});
