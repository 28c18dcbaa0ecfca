use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use theme_check::validation::{classify, normalize};

/// Generate an analyzer response with `lines` Theme Check lines and a mentor record
fn generate_analyzer_output(lines: usize) -> String {
    let markers = [
        "tc-required",
        "tc-warning",
        "tc-info",
        "tc-recommended",
        "tc-unknown",
    ];

    let items: Vec<String> = (0..lines)
        .map(|i| {
            format!(
                "<span class=\"tc-lead {}\">LEVEL</span>: file-{}.php: line {}",
                markers[i % markers.len()],
                i,
                i * 7
            )
        })
        .collect();

    serde_json::json!([
        {
            "name": "theme-mentor",
            "result": [{ "items": [{ "file": "functions.php", "line": 10 }] }]
        },
        {
            "name": "theme-check",
            "result": [{ "items": items }]
        }
    ])
    .to_string()
}

fn bench_classify(c: &mut Criterion) {
    let lines = [
        "<span class=\"tc-lead tc-required\">REQUIRED</span>: missing style.css",
        "<span class=\"tc-lead tc-recommended\">RECOMMENDED</span>: add a screenshot",
        "plain line without any marker: nothing",
    ];

    c.bench_function("classify", |b| {
        b.iter(|| {
            for line in &lines {
                black_box(classify(black_box(line)));
            }
        })
    });
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for lines in [100, 1_000, 10_000].iter() {
        let output = generate_analyzer_output(*lines);
        group.throughput(Throughput::Bytes(output.len() as u64));
        group.bench_with_input(BenchmarkId::new("lines", lines), &output, |b, output| {
            b.iter(|| {
                let records = normalize(output).expect("valid output");
                black_box(records.len())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_classify, bench_normalize);
criterion_main!(benches);
