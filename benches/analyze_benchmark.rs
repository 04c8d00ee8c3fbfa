//! Benchmarks for unweb analysis performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the full pipeline over synthetic captures.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use unweb::model::{LinkRef, RawAtom, SectionBox, SectionPayload};
use unweb::{BBox, PageCapture, PipelineConfig};

const TOPICS: [&str; 8] = [
    "Features",
    "Pricing",
    "Testimonials",
    "FAQ",
    "Integrations",
    "How it works",
    "Contact",
    "Customers",
];

/// Creates a synthetic capture with the given number of sections.
fn create_test_capture(section_count: usize) -> PageCapture {
    let mut capture = PageCapture::new("https://bench.example.com");

    for i in 0..section_count {
        let top = i as f64 * 720.0;
        let topic = TOPICS[i % TOPICS.len()];
        capture
            .sections
            .push(SectionBox::new(BBox::new(0.0, top, 1440.0, 640.0)));

        let mut payload = SectionPayload::default();
        payload.body.title = Some(format!("{} {}", topic, i));
        payload.body.headings = vec![topic.to_string()];
        payload.body.texts = vec![
            format!("{} for modern teams. Plans from ${}/mo.", topic, 10 + i),
            "Get started in minutes with secure, reliable automation.".to_string(),
        ];
        payload.body.buttons = vec![LinkRef::Label("Get started".to_string())];
        for col in 0..3 {
            let x = 120.0 + col as f64 * 400.0;
            payload.body.atoms.push(RawAtom::new(
                "h3",
                format!("Card {}", col + 1),
                BBox::new(x, top + 80.0, 360.0, 40.0),
            ));
            payload.body.atoms.push(RawAtom::new(
                "p",
                "Short description of the card content.",
                BBox::new(x, top + 130.0, 360.0, 60.0),
            ));
            payload.body.atoms.push(RawAtom::new(
                "img",
                "",
                BBox::new(x, top + 200.0, 360.0, 200.0),
            ));
        }
        capture.section_payloads.push(payload);
    }

    capture
}

/// Benchmark the full pipeline on a 40-section page.
fn bench_analyze_capture(c: &mut Criterion) {
    let capture = create_test_capture(40);
    let config = PipelineConfig::default();

    c.bench_function("analyze_40_sections", |b| {
        b.iter(|| unweb::analyze_capture(black_box(&capture), &config));
    });
}

/// Benchmark batch analysis at various sizes.
fn bench_analyze_pages(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_pages");

    for page_count in [1, 4, 16].iter() {
        let captures: Vec<PageCapture> = (0..*page_count).map(|_| create_test_capture(40)).collect();

        group.bench_function(format!("{}_pages_parallel", page_count), |b| {
            b.iter(|| unweb::analyze_pages(black_box(&captures), &PipelineConfig::default()));
        });
        group.bench_function(format!("{}_pages_sequential", page_count), |b| {
            let config = PipelineConfig::default().sequential();
            b.iter(|| unweb::analyze_pages(black_box(&captures), &config));
        });
    }

    group.finish();
}

/// Benchmark capture decoding.
fn bench_load_captures(c: &mut Criterion) {
    let data = serde_json::to_vec(&create_test_capture(40)).unwrap_or_default();

    c.bench_function("load_capture_40_sections", |b| {
        b.iter(|| unweb::load_captures(black_box(&data)).map(|c| c.len()));
    });
}

criterion_group!(
    benches,
    bench_analyze_capture,
    bench_analyze_pages,
    bench_load_captures,
);
criterion_main!(benches);
