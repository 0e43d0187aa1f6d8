use asset_cache_rust::Classifier;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use url::Url;

fn bench_classification(c: &mut Criterion) {
    let classifier = Classifier::default();
    let urls: Vec<Url> = [
        "https://example.com/index.html",
        "https://example.com/style.css",
        "https://cdn.example.com/models/u2net.onnx",
        "https://cdn.example.com/ort/ort-wasm-simd.wasm",
        "https://cdn.jsdelivr.net/npm/@imgly/background-removal@1.4.5/dist/browser.mjs",
        "https://api.imgbb.com/1/upload",
        "https://fonts.googleapis.com/css2?family=Inter",
    ]
    .iter()
    .map(|u| Url::parse(u).unwrap())
    .collect();

    c.bench_function("classify_mixed_urls", |b| {
        b.iter(|| {
            for url in &urls {
                black_box(classifier.classify(black_box(url)));
            }
        })
    });
}

criterion_group!(benches, bench_classification);
criterion_main!(benches);
