use criterion::{Criterion, black_box, criterion_group, criterion_main};
use layout::{ExtractOptions, LayoutHost, extract_layout};
use sim_host::{Scene, SimHost};

const SMALL_SPANS: usize = 8;
const LARGE_SPANS: usize = 400;

fn make_scene(spans: usize) -> Scene {
    let mut markup = String::from("<div>");
    for i in 0..spans {
        let style = if i % 3 == 0 { " style=\"font-weight: bold\"" } else { "" };
        markup.push_str(&format!(
            "<span data-text{style}>span {i} carries a few words that wrap </span>"
        ));
    }
    markup.push_str("</div>");
    let mut scene = Scene::new(markup);
    scene.stylesheet = "div { font: 16px/20px sans-serif }".to_string();
    scene.width = 320.0;
    scene
}

fn bench_host(spans: usize) -> SimHost {
    SimHost::new(&make_scene(spans)).expect("bench scene is valid")
}

fn bench_extract(c: &mut Criterion, name: &str, spans: usize, options: ExtractOptions) {
    let host = bench_host(spans);
    let container = host.container();
    assert!(!host.text_spans(container).is_empty());
    c.bench_function(name, |b| {
        b.iter(|| {
            let mut diagnostics = Vec::new();
            let layout = extract_layout(black_box(&host), container, options, &mut diagnostics);
            black_box(layout.lines().len());
        });
    });
}

fn bench_character_small(c: &mut Criterion) {
    bench_extract(c, "bench_character_small", SMALL_SPANS, ExtractOptions::character());
}

fn bench_character_large(c: &mut Criterion) {
    bench_extract(c, "bench_character_large", LARGE_SPANS, ExtractOptions::character());
}

fn bench_run_small(c: &mut Criterion) {
    bench_extract(c, "bench_run_small", SMALL_SPANS, ExtractOptions::run());
}

fn bench_run_large(c: &mut Criterion) {
    bench_extract(c, "bench_run_large", LARGE_SPANS, ExtractOptions::run());
}

criterion_group!(
    benches,
    bench_character_small,
    bench_character_large,
    bench_run_small,
    bench_run_large
);
criterion_main!(benches);
