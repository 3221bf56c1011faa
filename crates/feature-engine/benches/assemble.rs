use criterion::{black_box, criterion_group, criterion_main, Criterion};
use feature_engine::{ColumnSchema, FeatureAssembler, Sex, UserInput};
use std::sync::Arc;

fn bench_assemble(c: &mut Criterion) {
    let mut columns = vec![
        "Habitantes".to_string(),
        "Metales Pesados".to_string(),
        "Indice_Contaminación".to_string(),
        "Sexo_Hombres".to_string(),
        "Sexo_Mujeres".to_string(),
    ];
    columns.extend((0..52).map(|i| format!("Provincia_P{i}")));
    columns.extend((0..200).map(|i| format!("Diagnóstico_D{i}")));

    let assembler = FeatureAssembler::new(Arc::new(ColumnSchema::from_columns(columns).unwrap()));
    let input = UserInput {
        province: "P17".to_string(),
        diagnosis: "D123".to_string(),
        sex: Sex::Women.as_str().to_string(),
        inhabitants: 250_000.0,
        heavy_metals: 0.0042,
        contamination_index: 3.1,
    }
    .to_feature_input();

    c.bench_function("assemble_257_columns", |b| {
        b.iter(|| assembler.assemble(black_box(&input)))
    });
}

criterion_group!(benches, bench_assemble);
criterion_main!(benches);
