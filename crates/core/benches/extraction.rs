use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use slant_core::{Document, ExtractConfig, Extractor, NoLayout, locate, normalize};

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("../../tests/fixtures/{}", name)).unwrap()
}

fn bench_parse(c: &mut Criterion) {
    let small = fixture("blog_main.html");
    let medium = fixture("news_article.html");

    let mut group = c.benchmark_group("parse");

    group.bench_with_input(BenchmarkId::new("small", "blog_main"), &small, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("medium", "news_article"), &medium, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.finish();
}

fn bench_cascade(c: &mut Criterion) {
    let config = ExtractConfig::default();
    let mut group = c.benchmark_group("locate");

    for name in ["news_article.html", "class_content.html", "div_soup.html", "table_layout.html"] {
        let doc = Document::parse(&fixture(name)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(name), &doc, |b, doc| {
            b.iter(|| locate(black_box(doc), &config, &NoLayout))
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    let doc = Document::parse(&fixture("news_article.html")).unwrap();
    let candidate = locate(&doc, &ExtractConfig::default(), &NoLayout).unwrap().unwrap();

    c.bench_function("normalize", |b| b.iter(|| normalize(black_box(&candidate.node))));
}

fn bench_full_extraction(c: &mut Criterion) {
    let html = fixture("news_article.html");
    let extractor = Extractor::new();

    c.bench_function("full_extraction", |b| b.iter(|| extractor.extract(black_box(&html))));
}

criterion_group!(benches, bench_parse, bench_cascade, bench_normalize, bench_full_extraction);
criterion_main!(benches);
