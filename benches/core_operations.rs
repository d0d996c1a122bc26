use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use taproom::{Brewery, BreweryType, FilterCriteria, Report, RequestDescriptor, ResultAccumulator};

const STATES: [&str; 8] = [
    "California", "Colorado", "Oregon", "Texas", "Maine", "Ohio", "Michigan", "Vermont",
];

fn synthetic_records(count: usize) -> Vec<Brewery> {
    (0..count)
        .map(|i| {
            let mut brewery = Brewery::new(format!("b-{}", i), format!("Brewery Number {}", i));
            brewery.brewery_type = Some(BreweryType::KNOWN[i % BreweryType::KNOWN.len()].clone());
            brewery.state = Some(STATES[i % STATES.len()].to_string());
            brewery.city = Some(format!("City {}", i % 97));
            if i % 3 == 0 {
                brewery.website_url = Some(format!("https://b{}.example", i));
            }
            brewery
        })
        .collect()
}

fn bench_summary(c: &mut Criterion) {
    let mut group = c.benchmark_group("summary");

    for size in [50, 250, 2_500] {
        let records = synthetic_records(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &records, |b, records| {
            b.iter(|| Report::new(black_box(records), 8_000).summary())
        });
    }

    group.finish();
}

fn bench_top_states(c: &mut Criterion) {
    let records = synthetic_records(2_500);
    c.bench_function("top_n_states_by_count", |b| {
        b.iter(|| Report::new(black_box(&records), 0).top_n_states_by_count(10))
    });
}

fn bench_load_more(c: &mut Criterion) {
    let pages: Vec<Vec<Brewery>> = synthetic_records(2_500)
        .chunks(50)
        .map(<[Brewery]>::to_vec)
        .collect();

    c.bench_function("append 50 pages + facets", |b| {
        b.iter(|| {
            let mut acc = ResultAccumulator::new();
            let generation = acc.reset(FilterCriteria::default());
            for page in &pages {
                let _ = acc.append_page(generation, page.clone());
            }
            black_box(acc.derive_facets())
        })
    });
}

fn bench_request_url(c: &mut Criterion) {
    let criteria = FilterCriteria::default()
        .with_type("micro")
        .with_state("New York")
        .with_city("Saratoga Springs");

    c.bench_function("page request url", |b| {
        b.iter(|| {
            RequestDescriptor::page(black_box(&criteria), 7, 50)
                .to_url("https://api.openbrewerydb.org/v1")
        })
    });
}

criterion_group!(
    benches,
    bench_summary,
    bench_top_states,
    bench_load_more,
    bench_request_url
);
criterion_main!(benches);
