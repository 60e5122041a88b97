use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tfidf_docstore::{Index, MemoryStore};

const WORDS: &[&str] = &[
    "rust", "memory", "safety", "thread", "index", "vector", "query", "corpus", "term", "weight",
    "cosine", "document", "search", "rank", "store", "parser", "network", "cache", "engine", "token",
];

/// Deterministic pseudo-random documents (xorshift32)
fn synthetic_corpus(docs: usize, words_per_doc: usize) -> Vec<(String, String)> {
    let mut state = 0x1234_5678_u32;
    let mut next = || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state
    };
    (0..docs)
        .map(|i| {
            let text: Vec<String> = (0..words_per_doc)
                .map(|_| {
                    let r = next();
                    // a long tail of rare terms next to the shared vocabulary
                    if r % 4 == 0 {
                        format!("rare{}", r % 5000)
                    } else {
                        WORDS[(r as usize) % WORDS.len()].to_string()
                    }
                })
                .collect();
            (format!("doc{i:05}.txt"), text.join(" "))
        })
        .collect()
}

fn load_and_query_benchmark(c: &mut Criterion) {
    let corpus = synthetic_corpus(2_000, 120);

    c.bench_function("load", |b| {
        b.iter(|| {
            let store = MemoryStore::with_documents(corpus.iter().cloned());
            let index: Index<MemoryStore> = Index::open(store).unwrap();
            black_box(index.indexed_num())
        });
    });

    let index: Index<MemoryStore> = Index::open(MemoryStore::with_documents(corpus.iter().cloned())).unwrap();
    c.bench_function("query", |b| {
        b.iter(|| black_box(index.query("rust memory safety cosine rare42", Some(10))));
    });
}

criterion_group!(benches, load_and_query_benchmark);
criterion_main!(benches);
