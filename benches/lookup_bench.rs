//! Decode lookup benchmarks.
//!
//! Compares string-equality scans against hashed lookup at the sizes around
//! the switch/map decode cutoff, and measures planning and emission cost.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rustc_hash::FxHashMap;

use enumstr::emitter::{EmitOptions, emit_file};
use enumstr::engine::{IntKind, Member, Settings, plan_members};

const SIZES: [usize; 4] = [8, 32, 64, 128];

fn names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("Constant{i:03}")).collect()
}

/// Members with a gap every seventh value, so larger sets split into many runs.
fn members(count: usize) -> Vec<Member> {
    names(count)
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let value = (i + i / 7) as i128;
            Member::new(name, value, IntKind::I32)
        })
        .collect()
}

fn bench_scan_vs_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_lookup");

    for size in SIZES {
        let names = names(size);
        let table: Vec<(&str, i128)> = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i as i128))
            .collect();
        let map: FxHashMap<&str, i128> = table.iter().copied().collect();
        // Every name plus one miss.
        let probes: Vec<String> = names
            .iter()
            .cloned()
            .chain(std::iter::once("NotAConstant".to_string()))
            .collect();

        group.throughput(Throughput::Elements(probes.len() as u64));
        group.bench_with_input(BenchmarkId::new("linear_scan", size), &probes, |b, probes| {
            b.iter(|| {
                for probe in probes {
                    let found = table
                        .iter()
                        .find(|(name, _)| *name == probe.as_str())
                        .map(|(_, value)| *value);
                    black_box(found);
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("fx_hash_map", size), &probes, |b, probes| {
            b.iter(|| {
                for probe in probes {
                    black_box(map.get(probe.as_str()).copied());
                }
            });
        });
    }

    group.finish();
}

fn bench_plan_decoder(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan_decoder");
    let settings = Settings::default();

    for size in SIZES {
        let members = members(size);
        let Ok(plan) = plan_members("Bench", &members, &settings) else {
            continue;
        };
        let decoder = plan.decoder();
        let texts: Vec<&str> = members.iter().map(|m| m.display_name.as_str()).collect();

        group.throughput(Throughput::Elements(texts.len() as u64));
        group.bench_with_input(BenchmarkId::new("decode", size), &texts, |b, texts| {
            b.iter(|| {
                for text in texts {
                    black_box(decoder.decode(text).ok());
                }
            });
        });
    }

    group.finish();
}

fn bench_planning(c: &mut Criterion) {
    let mut group = c.benchmark_group("planning");
    let settings = Settings::default();

    for size in SIZES {
        let members = members(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("plan_members", size), &members, |b, members| {
            b.iter(|| black_box(plan_members("Bench", black_box(members), &settings).ok()));
        });

        let Ok(plan) = plan_members("Bench", &members, &settings) else {
            continue;
        };
        let plans = [plan];
        let options = EmitOptions::default();
        group.bench_with_input(BenchmarkId::new("emit_file", size), &plans, |b, plans| {
            b.iter(|| black_box(emit_file(plans, &options)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_scan_vs_hash,
    bench_plan_decoder,
    bench_planning
);
criterion_main!(benches);
