use criterion::{Criterion, black_box, criterion_group, criterion_main};
use composition::{ContentParser, Fragment, filter_head_fragment, head_properties};
use composition_test_support::fixtures::{NAVIGATION_HEAD, PRODUCT_UI_HTML};
use composition_test_support::perf_fixtures::{make_page, make_removed_subtree};
use markup::tokenize;

const SMALL_BLOCKS: usize = 64;
const LARGE_BLOCKS: usize = 20_000;
const REMOVE_DEPTH: usize = 5_000;

fn bench_tokenize_large(c: &mut Criterion) {
    let input = make_page(LARGE_BLOCKS);
    c.bench_function("bench_tokenize_large", |b| {
        b.iter(|| {
            let tokens = tokenize(black_box(&input)).unwrap_or_default();
            black_box(tokens.len());
        });
    });
}

fn bench_parse_small(c: &mut Criterion) {
    let parser = ContentParser::default();
    let input = make_page(SMALL_BLOCKS);
    c.bench_function("bench_parse_small", |b| {
        b.iter(|| {
            let content = parser.parse_str(black_box(&input));
            black_box(content.is_ok());
        });
    });
}

fn bench_parse_large(c: &mut Criterion) {
    let parser = ContentParser::default();
    let input = make_page(LARGE_BLOCKS);
    c.bench_function("bench_parse_large", |b| {
        b.iter(|| {
            let content = parser.parse_str(black_box(&input));
            black_box(content.map(|c| c.dependencies().len()).unwrap_or_default());
        });
    });
}

fn bench_skip_deep_subtree(c: &mut Criterion) {
    let parser = ContentParser::default();
    let input = make_removed_subtree(REMOVE_DEPTH);
    c.bench_function("bench_skip_deep_subtree", |b| {
        b.iter(|| {
            let content = parser.parse_str(black_box(&input));
            black_box(content.is_ok());
        });
    });
}

fn bench_head_filter(c: &mut Criterion) {
    let known = head_properties(&Fragment::text(NAVIGATION_HEAD)).unwrap_or_default();
    let head = ContentParser::default()
        .parse_str(PRODUCT_UI_HTML)
        .ok()
        .and_then(|content| content.head().cloned())
        .unwrap_or_default();
    c.bench_function("bench_head_filter", |b| {
        b.iter(|| {
            let mut head = head.clone();
            let _ = filter_head_fragment(black_box(&mut head), &known);
            black_box(head);
        });
    });
}

criterion_group!(
    benches,
    bench_tokenize_large,
    bench_parse_small,
    bench_parse_large,
    bench_skip_deep_subtree,
    bench_head_filter
);
criterion_main!(benches);
