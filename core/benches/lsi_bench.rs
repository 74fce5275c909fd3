use criterion::{criterion_group, criterion_main, Criterion};
use lsi_core::{Corpus, InvertedIndex, LsiModel, StopList, SvdFactorizer};

fn corpus() -> Corpus {
    let words = ["latent", "semantic", "index", "matrix", "query", "vector", "term", "document", "rank", "singular"];
    let docs = (0..60).map(|i| {
        let body = (0..40).map(|j| words[(i * 7 + j * 3) % words.len()]).collect::<Vec<_>>().join(" ");
        (format!("doc{i:03}"), body)
    });
    Corpus::from_documents(docs)
}

fn bench_lsi(c: &mut Criterion) {
    let corpus = corpus();
    let stop = StopList::parse("the\nof");
    c.bench_function("build_model", |b| {
        b.iter(|| {
            let index = InvertedIndex::build(corpus.pairs(), &stop).unwrap();
            LsiModel::build(index, Some(5), &SvdFactorizer::default()).unwrap()
        })
    });

    let index = InvertedIndex::build(corpus.pairs(), &stop).unwrap();
    let model = LsiModel::build(index, Some(5), &SvdFactorizer::default()).unwrap();
    c.bench_function("search", |b| b.iter(|| model.search("semantic matrix rank", 5)));
}

criterion_group!(benches, bench_lsi);
criterion_main!(benches);
