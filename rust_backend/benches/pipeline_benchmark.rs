use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use autos_analysis::core::Column;
use autos_analysis::parsing::csv_parser::parse_listings_csv;
use autos_analysis::services::aggregates::brand_summary;
use autos_analysis::services::distributions::tabulate_days;
use autos_analysis::transformations::cleaning::{clean_listings, CoercionPolicy};
use autos_analysis::AnalysisPipeline;

const HEADER: &str = "dateCrawled,name,seller,offerType,price,abtest,vehicleType,yearOfRegistration,gearbox,powerPS,model,odometer,monthOfRegistration,fuelType,brand,notRepairedDamage,dateCreated,nrOfPictures,postalCode,lastSeen";

const BRANDS: [&str; 8] = [
    "volkswagen", "bmw", "opel", "mercedes_benz", "audi", "ford", "renault", "peugeot",
];

fn synthetic_csv(rows: usize) -> String {
    let mut csv = String::with_capacity(rows * 220);
    csv.push_str(HEADER);
    csv.push('\n');
    for i in 0..rows {
        let day = 1 + i % 31;
        csv.push_str(&format!(
            "2016-03-{:02} 12:00:00,Auto_{},privat,Angebot,\"${},{:03}\",test,limousine,{},manuell,{},golf,\"{},000km\",{},benzin,{},nein,2016-03-{:02} 00:00:00,0,{},2016-04-06 06:45:54\n",
            day,
            i,
            i % 40,
            (i * 37) % 1000,
            1990 + i % 27,
            60 + i % 150,
            5 + (i % 30) * 5,
            i % 13,
            BRANDS[i % BRANDS.len()],
            day,
            10000 + i % 89999,
        ));
    }
    csv
}

fn bench_parse_and_clean(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_and_clean");

    for rows in [1_000, 10_000] {
        let csv = synthetic_csv(rows);
        group.bench_with_input(BenchmarkId::new("rows", rows), &csv, |b, input| {
            b.iter(|| {
                let raw = parse_listings_csv(black_box(input), b',').unwrap();
                black_box(clean_listings(raw, CoercionPolicy::Strict).unwrap())
            });
        });
    }

    group.finish();
}

fn bench_aggregates(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregates");

    let raw = parse_listings_csv(&synthetic_csv(10_000), b',').unwrap();
    let table = clean_listings(raw, CoercionPolicy::Strict).unwrap();

    group.bench_function("tabulate_days", |b| {
        b.iter(|| black_box(tabulate_days(black_box(&table.rows), Column::DateCrawled)));
    });
    group.bench_function("brand_summary", |b| {
        b.iter(|| black_box(brand_summary(black_box(&table.rows), 6)));
    });

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let csv = synthetic_csv(10_000);
    let pipeline = AnalysisPipeline::new();

    c.bench_function("full_pipeline_10k", |b| {
        b.iter(|| black_box(pipeline.process_bytes(black_box(csv.as_bytes())).unwrap()));
    });
}

criterion_group!(benches, bench_parse_and_clean, bench_aggregates, bench_full_pipeline);
criterion_main!(benches);
