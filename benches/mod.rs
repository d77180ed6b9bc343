use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use atmodem::http::response::Response;
use atmodem::http::url;

fn bench_parse_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("url");
    group.bench_function("parse_full", |b| {
        b.iter(|| url::parse(black_box("https://api.example.com:8443/v1/data?x=1")))
    });
    group.bench_function("parse_bare_host", |b| {
        b.iter(|| url::parse(black_box("192.168.1.100/api")))
    });
    group.finish();
}

fn bench_inspection(c: &mut Criterion) {
    let mut capture = Vec::new();
    capture.extend_from_slice(b"> Recv 111 bytes\r\nSEND OK\r\nHTTP/1.1 200 OK\r\n");
    capture.extend_from_slice(b"Content-Type: application/json\r\nConnection: close\r\n\r\n");
    capture.extend_from_slice(&[b'x'; 1024]);
    let response = Response::from_raw(&capture);

    let mut group = c.benchmark_group("inspection");
    group.bench_function("status_code", |b| {
        b.iter(|| black_box(&response).status_code())
    });
    group.bench_function("status_code_strict", |b| {
        b.iter(|| black_box(&response).status_code_strict())
    });
    group.bench_function("body", |b| b.iter(|| black_box(&response).body()));
    group.bench_function("is_success", |b| b.iter(|| black_box(&response).is_success()));
    group.finish();
}

criterion_group!(benches, bench_parse_url, bench_inspection);
criterion_main!(benches);
