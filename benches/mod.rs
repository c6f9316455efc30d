use criterion::{criterion_group, criterion_main};

mod cli;

criterion_group!(
    benches,
    cli::shell::bench_tokenize,
    cli::shell::bench_decode,
    cli::shell::bench_dispatch,
    cli::shell::bench_dispatch_burst
);
criterion_main!(benches);
