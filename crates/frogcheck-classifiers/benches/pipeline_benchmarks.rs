//! Pipeline benchmarks
//!
//! Preprocessing dominates request latency, so the groups here isolate
//! decode + normalize from extraction and aggregation.
//!
//! Run with: cargo bench -p frogcheck-classifiers

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use tokio::runtime::Runtime;

use frogcheck_classifiers::{
    ClassifierOutput, ConfidenceExtractor, DecisionAggregator, ImageUpload, RequestPipeline,
    StaticClassifier,
};
use frogcheck_core::{ProcessingConfig, TargetVocabulary};
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};

fn jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 96]));
    let mut buf = Vec::new();
    JpegEncoder::new_with_quality(&mut buf, 90)
        .encode_image(&img)
        .expect("Failed to encode benchmark image");
    buf
}

/// End-to-end pipeline with a static classifier
fn benchmark_pipeline(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let classifier = Arc::new(StaticClassifier::new([
        ("bullfrog".to_string(), 0.4f32),
        ("tree_frog".to_string(), 0.3),
    ]));
    let pipeline = RequestPipeline::new(Arc::new(ProcessingConfig::default()), classifier)
        .expect("Failed to create pipeline");

    let sizes = [(320, 320), (1080, 1080), (4000, 3000)];

    let mut group = c.benchmark_group("Request_Pipeline");
    group.sample_size(20);

    for (width, height) in sizes {
        let upload = ImageUpload::new("image/jpeg", jpeg(width, height));
        group.bench_with_input(
            BenchmarkId::new("run", format!("{}x{}", width, height)),
            &upload,
            |b, upload| {
                b.iter(|| {
                    rt.block_on(async { pipeline.run(black_box(upload.clone())).await.unwrap() })
                });
            },
        );
    }

    group.finish();
}

/// Extraction over a full-size classifier vocabulary
fn benchmark_extraction(c: &mut Criterion) {
    let extractor = ConfidenceExtractor::new(TargetVocabulary::default());
    let aggregator = DecisionAggregator::new(0.5);

    let mut labels: Vec<String> = (0..1000).map(|i| format!("class_{}", i)).collect();
    labels[30] = "bullfrog".to_string();
    labels[31] = "tree_frog".to_string();
    labels[32] = "tailed_frog".to_string();
    let probabilities = vec![0.001f32; labels.len()];
    let output = ClassifierOutput::new(labels, probabilities);

    c.bench_function("extract_and_aggregate_1000_labels", |b| {
        b.iter(|| {
            let scores = extractor.extract(black_box(&output)).unwrap();
            aggregator.aggregate(scores).unwrap()
        })
    });
}

criterion_group!(benches, benchmark_pipeline, benchmark_extraction);
criterion_main!(benches);
