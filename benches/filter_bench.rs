// benches/filter_bench.rs
//! Benchmarks for ticket selection and record parsing.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use psa_triage::api::parser::{parse_ticket_list, tickets_from_records};
use psa_triage::{Ticket, TicketFilter, TicketId, TicketPattern};

/// Alternating ticket and incident ids, half of which match `^TICKET-`.
fn create_tickets(count: usize) -> Vec<Ticket> {
    (0..count)
        .map(|i| {
            let id = if i % 2 == 0 {
                format!("TICKET-{}", i)
            } else {
                format!("INC-{}", i)
            };
            Ticket::new(TicketId::new(id).unwrap(), Some(format!("Issue number {}", i)))
        })
        .collect()
}

fn create_page_body(count: usize) -> String {
    let records: Vec<String> = (0..count)
        .map(|i| format!(r#"{{"Id": "TICKET-{}", "Description": "Issue number {}"}}"#, i, i))
        .collect();
    format!(r#"{{"tickets": [{}]}}"#, records.join(","))
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    let filter = TicketFilter::new(TicketPattern::new("^TICKET-[0-9]+$").unwrap());

    for size in [100, 1_000, 10_000] {
        let tickets = create_tickets(size);
        group.bench_with_input(BenchmarkId::new("select", size), &tickets, |b, tickets| {
            b.iter(|| filter.select(black_box(tickets.clone())))
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [100, 1_000] {
        let body = create_page_body(size);
        group.bench_with_input(BenchmarkId::new("page_body", size), &body, |b, body| {
            b.iter(|| {
                let records = parse_ticket_list(black_box(body)).unwrap();
                tickets_from_records(&records)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filter, bench_parse);
criterion_main!(benches);
