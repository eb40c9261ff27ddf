use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use searchcore::{process_queries, DocumentStatus, ExecutionPolicy, SearchServer};

const WORDS: &[&str] = &[
    "curly", "cat", "dog", "fancy", "collar", "big", "sparrow", "white", "tail", "funny", "pet",
    "nasty", "rat", "hair", "very", "not", "with", "and", "in", "at",
];

// Deterministic pseudo-random corpus so runs are comparable.
fn build_server(documents: usize) -> SearchServer {
    let mut server = SearchServer::from_stop_text("and in at with").expect("valid stop words");
    let mut state: u64 = 0x9e37_79b9_7f4a_7c15;
    for id in 0..documents {
        let mut text = String::new();
        for _ in 0..12 {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            text.push_str(WORDS[(state % WORDS.len() as u64) as usize]);
            text.push(' ');
        }
        server
            .add_document(id as i32, &text, DocumentStatus::Actual, &[(id % 10) as i32])
            .expect("valid document");
    }
    server
}

fn bench_search(c: &mut Criterion) {
    let server = build_server(5_000);
    c.bench_function("find_top_documents", |b| {
        b.iter(|| server.find_top_documents("curly dog -tail fancy"))
    });
    let queries: Vec<String> = WORDS.windows(3).map(|w| format!("{} {} -{}", w[0], w[1], w[2])).collect();
    c.bench_function("process_queries", |b| b.iter(|| process_queries(&server, &queries)));
}

fn bench_remove(c: &mut Criterion) {
    let server = build_server(2_000);
    for (name, policy) in [("remove_sequential", ExecutionPolicy::Sequential), ("remove_parallel", ExecutionPolicy::Parallel)] {
        c.bench_function(name, |b| {
            b.iter_batched(
                || server.clone(),
                |mut server| {
                    for id in 0..100 {
                        server.remove_document_with(policy, id);
                    }
                    server
                },
                BatchSize::LargeInput,
            )
        });
    }
}

criterion_group!(benches, bench_search, bench_remove);
criterion_main!(benches);
