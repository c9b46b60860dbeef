use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pagecraft_compiler_html::{compile_components, CompileOptions};
use pagecraft_model::ComponentDescriptor;

fn sample_page(repeat: usize) -> Vec<ComponentDescriptor> {
    let mut components = vec![ComponentDescriptor::hero_header(
        "Summer Sale",
        "Everything 20% off this week",
        "Shop now",
        "/img/beach.jpg",
    )];

    for i in 0..repeat {
        components.push(ComponentDescriptor::dynamic_text(format!("Collection {}", i)));
        components.push(ComponentDescriptor::text("Hand-picked items for the season & more"));
        components.push(ComponentDescriptor::image(format!("/img/{}.jpg", i), "Product shot"));
        components.push(ComponentDescriptor::button("/collections/summer", "Browse"));
    }

    components
}

fn generate_small_page(c: &mut Criterion) {
    let components = sample_page(2);
    let options = CompileOptions::default();

    c.bench_function("generate_small_page", |b| {
        b.iter(|| compile_components(black_box(&components), &options))
    });
}

fn generate_large_page(c: &mut Criterion) {
    let components = sample_page(200);
    let options = CompileOptions::compact();

    c.bench_function("generate_large_page", |b| {
        b.iter(|| compile_components(black_box(&components), &options))
    });
}

criterion_group!(benches, generate_small_page, generate_large_page);
criterion_main!(benches);
