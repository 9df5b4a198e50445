//! Latency benchmarks for the spam detector
//!
//! Measures vectorization and full prediction against the demo artifacts.
//!
//! Run with: cargo bench -p spamcheck-classifiers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use spamcheck_classifiers::{ArtifactLoader, ArtifactPaths, Classifier, DetectorConfig, SpamDetector};
use spamcheck_core::InputText;
use std::path::Path;
use std::sync::Arc;
use tokio::runtime::Runtime;

fn demo_detector() -> SpamDetector {
    let models = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../models");
    let loader = ArtifactLoader::new(ArtifactPaths::new(
        models.join("model.json"),
        models.join("vectorizer.json"),
    ));
    let artifacts = Arc::clone(loader.load().artifacts().expect("demo artifacts load"));
    SpamDetector::new(artifacts, DetectorConfig::default()).expect("demo detector builds")
}

fn test_cases() -> Vec<(&'static str, String)> {
    vec![
        ("short_spam", "Win a free iPhone! Click here to claim now.".to_string()),
        ("short_ham", "Lunch tomorrow?".to_string()),
        (
            "medium_ham",
            "Hi team, attached are the meeting notes and the agenda for tomorrow. Thanks, regards"
                .to_string(),
        ),
        (
            "long_mixed",
            "Congratulations winner! Claim your free cash prize now. ".repeat(40)
                + &"Please review the project report before the meeting. ".repeat(40),
        ),
    ]
}

/// Benchmark vectorization alone
fn benchmark_vectorize(c: &mut Criterion) {
    let detector = demo_detector();

    let mut group = c.benchmark_group("Vectorize");
    group.sample_size(100);

    for (name, text) in test_cases() {
        let input = InputText::parse(&text).unwrap();
        group.bench_with_input(BenchmarkId::new("transform", name), &input, |b, input| {
            b.iter(|| detector.vectorize(black_box(input)));
        });
    }

    group.finish();
}

/// Benchmark the full classify path
fn benchmark_classify(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let detector = demo_detector();

    let mut group = c.benchmark_group("Classify");
    group.significance_level(0.05);
    group.sample_size(100);

    for (name, text) in test_cases() {
        let input = InputText::parse(&text).unwrap();
        group.bench_with_input(BenchmarkId::new("classify", name), &input, |b, input| {
            b.iter(|| rt.block_on(async { detector.classify(black_box(input)).await.unwrap() }));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_vectorize, benchmark_classify);
criterion_main!(benches);
