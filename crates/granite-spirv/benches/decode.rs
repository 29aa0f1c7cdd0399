#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
#[cfg(not(target_arch = "wasm32"))]
use granite_spirv::{decode_bytes, Opcode, SPIRV_MAGIC};

#[cfg(not(target_arch = "wasm32"))]
fn criterion_config() -> Criterion {
    match std::env::var("GRANITE_BENCH_PROFILE").as_deref() {
        Ok("ci") => Criterion::default()
            .warm_up_time(Duration::from_millis(150))
            .measurement_time(Duration::from_millis(400))
            .sample_size(10),
        _ => Criterion::default()
            .warm_up_time(Duration::from_secs(1))
            .measurement_time(Duration::from_secs(2))
            .sample_size(50),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(words: &mut Vec<u32>, opcode: Opcode, operands: &[u32]) {
    words.push(((operands.len() as u32 + 1) << 16) | u32::from(opcode.raw()));
    words.extend_from_slice(operands);
}

/// A module declaring `types` vector types, each named and decorated, backed by one shared
/// float type.
#[cfg(not(target_arch = "wasm32"))]
fn synthetic_module(types: u32) -> Vec<u8> {
    let id_bound = types + 2;
    let mut words = vec![SPIRV_MAGIC, 0x0001_0300, 0, id_bound, 0];
    emit(&mut words, Opcode::Capability, &[1]);
    emit(&mut words, Opcode::MemoryModel, &[0, 1]);
    emit(&mut words, Opcode::TypeFloat, &[1, 32]);
    for id in 2..id_bound {
        // "vec" plus nul, one word.
        emit(&mut words, Opcode::Name, &[id, u32::from_le_bytes(*b"vec\0")]);
        emit(&mut words, Opcode::Decorate, &[id, 30, id]);
        emit(&mut words, Opcode::TypeVector, &[id, 1, 4]);
    }
    words.iter().flat_map(|w| w.to_le_bytes()).collect()
}

#[cfg(not(target_arch = "wasm32"))]
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_bytes");
    for types in [16u32, 256, 4096] {
        let bytes = synthetic_module(types);
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(types), &bytes, |b, bytes| {
            b.iter(|| decode_bytes(black_box(bytes)).expect("synthetic module decodes"))
        });
    }
    group.finish();
}

#[cfg(not(target_arch = "wasm32"))]
criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_decode
}
#[cfg(not(target_arch = "wasm32"))]
criterion_main!(benches);
