
use config_generator::generate_config;
use criterion::{criterion_group, criterion_main, Criterion};
use treeconf::{Config, SettingType};

fn mutation_benchmarks(c: &mut Criterion) {
    let small = generate_config(50);
    let large = generate_config(1000);

    let mut group = c.benchmark_group("mutation");

    group.bench_function("set_int", |b| {
        let mut config = Config::new();
        config.read_str(&small).unwrap();
        let id = config.lookup("group0.int_0").unwrap();
        b.iter(|| config.setting_mut(id).unwrap().set_int(42))
    });

    group.bench_function("add_remove", |b| {
        let mut config = Config::new();
        config.read_str(&small).unwrap();
        let root = config.root();
        b.iter(|| {
            config.add(root, Some("scratch"), SettingType::Int).unwrap();
            config.remove(root, "scratch").unwrap();
        })
    });

    group.bench_function("append_elements", |b| {
        b.iter(|| {
            let mut config = Config::new();
            let root = config.root();
            let array = config.add(root, Some("values"), SettingType::Array).unwrap();
            for i in 0..100 {
                config.set_int_elem(array, None, i).unwrap();
            }
        })
    });

    group.bench_function("serialize_small", |b| {
        let mut config = Config::new();
        config.read_str(&small).unwrap();
        b.iter(|| config.serialize())
    });

    group.bench_function("serialize_large", |b| {
        let mut config = Config::new();
        config.read_str(&large).unwrap();
        b.iter(|| config.serialize())
    });

    // Round-trip: parse -> mutate -> serialize -> parse
    group.bench_function("round_trip", |b| {
        b.iter(|| {
            let mut config = Config::new();
            config.read_str(&small).unwrap();
            let id = config.lookup("group0.int_0").unwrap();
            config.setting_mut(id).unwrap().set_int(42).unwrap();
            let output = config.serialize();
            let mut copy = Config::new();
            copy.read_str(&output).unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, mutation_benchmarks);
criterion_main!(benches);
