//! Benchmarks for content-stream interpretation throughput
//!
//! Run with: cargo bench

use std::rc::Rc;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use pdf_stream_engine::{Page, Rect, RecordingSink, ResourceDict, StandardFont, StreamEngine};

/// A synthetic page mixing paths, state changes and text.
fn synthetic_content(repetitions: usize) -> String {
    let mut content = String::new();
    for i in 0..repetitions {
        let x = (i % 500) as f64;
        content.push_str(&format!(
            "q 1 0 0 1 {x} 10 cm 0 0 m 20 20 l 40 0 l h S Q \
             0.2 0.4 0.6 rg {x} 40 30 30 re f \
             BT /F1 12 Tf {x} 700 Td (Hello World) Tj ET\n"
        ));
    }
    content
}

fn benchmark_process_page(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_page");

    let mut resources = ResourceDict::new();
    resources.insert_font("F1", Rc::new(StandardFont::helvetica()));
    let resources = Rc::new(resources);

    for repetitions in [100usize, 1000] {
        let content = synthetic_content(repetitions);
        group.throughput(Throughput::Bytes(content.len() as u64));
        let page = Rc::new(
            Page::new(Rect::new(0.0, 0.0, 612.0, 792.0))
                .with_contents(content.into_bytes())
                .with_resources(resources.clone()),
        );

        group.bench_function(format!("{repetitions}_ops"), |b| {
            b.iter(|| {
                let mut engine = StreamEngine::new(RecordingSink::new());
                engine.process_page(black_box(&page)).unwrap();
                engine.into_sink().glyphs.len()
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_process_page);
criterion_main!(benches);
