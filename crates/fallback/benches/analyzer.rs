use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fallback::{analyze, analyze_profile};
use material_descriptors::{CategoricalProfile, MaterialDescriptors};
use serde_json::Number;
use std::collections::BTreeMap;

fn bench_analyze(c: &mut Criterion) {
    let record = MaterialDescriptors {
        energy_per_atom: Some(-3.2),
        density_atomic: Some(0.05),
        efermi: Some(4.1),
        volume: Some(120.5),
        density: Some(7.8),
        band_gap: Some(1.2),
        chemsys: "Fe-Fe".to_string(),
        is_magnetic: true,
        ordering: "Ferromagnetic".to_string(),
        types_of_magnetic_species: "Fe".to_string(),
        total_magnetization: Some(2.2),
        num_magnetic_sites: Some(0),
        formation_energy_per_atom: Some(2.5),
        elements: Some(BTreeMap::from([("Fe".to_string(), Number::from(2))])),
        ..Default::default()
    };
    let profile = CategoricalProfile::with_defaults();

    c.bench_function("analyze_descriptors", |b| b.iter(|| analyze(black_box(&record))));
    c.bench_function("analyze_profile", |b| b.iter(|| analyze_profile(black_box(&profile))));
    c.bench_function("render_report", |b| {
        let report = analyze(&record);
        b.iter(|| black_box(&report).to_string())
    });
}

criterion_group!(benches, bench_analyze);
criterion_main!(benches);
