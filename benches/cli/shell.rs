use criterion::{BatchSize, Criterion, Throughput};
use libcli::cli::{CommandSpec, NumberPolicy, ParsedArg, Shell, decode, handler_fn, tokenize_args};
use libcli::transport::{Read, Write};
use std::hint::black_box;

const SET_LINE: &[u8] = b"set -t 3 -v 2.5 -j name\r";

/// Console that discards output and never has input
#[derive(Default)]
struct Sink {
    written: usize,
}

impl Read for Sink {
    type Error = ();
    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(0)
    }
}

impl Write for Sink {
    type Error = ();
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.written += buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

fn set_spec<'a>() -> CommandSpec<'a> {
    CommandSpec {
        name: "set",
        help: "set target, value and name",
        optstring: "t:v:j:",
        optypes: "%i%f%s",
        argc: 3,
        callback: None,
    }
}

pub fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    let line = "set -t 3 -v 2.5 -j name";
    group.throughput(Throughput::Bytes(line.len() as u64));
    group.bench_function("tokenize_args", |b| {
        b.iter(|| tokenize_args(black_box(line)).expect("Failed to tokenize"))
    });
    group.finish();
}

pub fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    let spec = set_spec();
    let tokens = tokenize_args("set -t 3 -v 2.5 -j name").expect("Failed to tokenize");
    group.bench_function("decode_lenient", |b| {
        b.iter(|| decode(black_box(&tokens), &spec, NumberPolicy::Lenient).expect("Failed to decode"))
    });
    group.bench_function("decode_strict", |b| {
        b.iter(|| decode(black_box(&tokens), &spec, NumberPolicy::Strict).expect("Failed to decode"))
    });
    group.finish();
}

pub fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Bytes(SET_LINE.len() as u64));
    group.bench_function("dispatch_line", |b| {
        let mut total = 0i32;
        let mut handler = handler_fn(|_argc, args, _out| {
            if let Some(&[ParsedArg::Int(target), ..]) = args {
                total = total.wrapping_add(target);
            }
        });
        let mut shell = Shell::new(Sink::default());
        shell
            .register(CommandSpec {
                callback: Some(&mut handler),
                ..set_spec()
            })
            .expect("Failed to register");

        b.iter(|| shell.input(black_box(SET_LINE)).expect("Failed to dispatch"));
    });
    group.finish();
}

pub fn bench_dispatch_burst(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch_burst");
    let burst: Vec<u8> = SET_LINE.repeat(50);
    group.throughput(Throughput::Bytes(burst.len() as u64));
    group.bench_function("dispatch_burst_no_echo", |b| {
        b.iter_batched_ref(
            || {
                let mut shell = Shell::new(Sink::default());
                shell.set_echo(false);
                shell.register(set_spec()).expect("Failed to register");
                shell
            },
            |shell| {
                let dispatched = shell.input(&burst).expect("Failed to dispatch");
                assert_eq!(dispatched, 50);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}
