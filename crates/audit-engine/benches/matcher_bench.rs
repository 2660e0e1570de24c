//! 감사 엔진 벤치마크
//!
//! catcher 매칭, 행 변환/정렬 성능을 측정합니다.

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use callaudit_engine::{CatchMatcher, CatcherRegistry, sort_rows, to_rows};

/// 매칭이 있는 Apex 클래스 본문
const CALLOUT_CLASS: &str = r#"public with sharing class InvoiceClient {
    public HttpResponse send(String body) {
        HttpRequest req = new HttpRequest();
        req.setEndpoint('callout:Billing/invoices');
        req.setMethod('POST');
        req.setBody(body);
        return new Http().send(req);
    }

    public HttpResponse fetch(Id invoiceId) {
        HttpRequest req = new HttpRequest();
        req.setEndpoint('callout:Billing/invoices/' + invoiceId);
        req.setMethod('GET');
        return new Http().send(req);
    }
}
"#;

/// 매칭이 없는 클래스 본문
const PLAIN_CLASS: &str = r#"public with sharing class InvoiceCalculator {
    public Decimal total(List<Decimal> lines) {
        Decimal sum = 0;
        for (Decimal line : lines) {
            sum += line;
        }
        return sum;
    }
}
"#;

fn matcher() -> CatchMatcher {
    CatchMatcher::new(Arc::new(
        CatcherRegistry::builtin().expect("builtin catchers compile"),
    ))
}

fn bench_match_file(c: &mut Criterion) {
    let matcher = matcher();
    let mut group = c.benchmark_group("match_file");

    group.throughput(Throughput::Bytes(CALLOUT_CLASS.len() as u64));
    group.bench_function("callout_class", |b| {
        b.iter(|| matcher.match_file(black_box("InvoiceClient.cls"), black_box(CALLOUT_CLASS)))
    });

    group.throughput(Throughput::Bytes(PLAIN_CLASS.len() as u64));
    group.bench_function("plain_class", |b| {
        b.iter(|| matcher.match_file(black_box("InvoiceCalculator.cls"), black_box(PLAIN_CLASS)))
    });

    group.finish();
}

fn bench_match_scaling(c: &mut Criterion) {
    let matcher = matcher();
    let mut group = c.benchmark_group("match_scaling");

    for repeat in [1usize, 10, 100] {
        let text = CALLOUT_CLASS.repeat(repeat);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(repeat), &text, |b, text| {
            b.iter(|| matcher.match_file("Big.cls", black_box(text)))
        });
    }

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let matcher = matcher();
    let records: Vec<_> = (0..1000)
        .flat_map(|i| matcher.match_file(&format!("classes/ns{}__Client{i}.cls", i % 7), CALLOUT_CLASS))
        .collect();

    let mut group = c.benchmark_group("aggregate");
    group.throughput(Throughput::Elements(records.len() as u64));
    group.bench_function("to_rows_and_sort_1000", |b| {
        b.iter(|| sort_rows(&to_rows(black_box(&records))))
    });
    group.finish();
}

criterion_group!(benches, bench_match_file, bench_match_scaling, bench_aggregate);
criterion_main!(benches);
