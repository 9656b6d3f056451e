use criterion::{black_box, criterion_group, criterion_main, Criterion};

use geocase::{Capitalizer, FeatureClass, Gazetteer, GeographicRecord};

const TEXT: &str = "I visited new york on monday. The army officers arrived: captain Smith, \
colonel Johnson, and general Jones. In january, we went to the mississippi river. He speaks \
english and spanish fluently. The meeting is next wednesday in los angeles. We celebrate \
christmas and easter every year. Mount everest is in the himalayas, which are in asia. The \
atlantic ocean borders north america and europe.";

fn gazetteer() -> Gazetteer {
    let names = [
        "New York",
        "Mississippi River",
        "Los Angeles",
        "Mount Everest",
        "Himalayas",
        "Asia",
        "Atlantic Ocean",
        "North America",
        "Europe",
    ];

    let records = names.iter().enumerate().map(|(id, name)| GeographicRecord {
        geonameid: id as u64,
        name: (*name).to_owned(),
        asciiname: (*name).to_owned(),
        feature_class: Some(FeatureClass::Administrative),
        feature_code: String::new(),
        country_code: None,
        population: 0,
    });

    Gazetteer::from_records(records)
}

fn analyze(c: &mut Criterion) {
    let capitalizer = Capitalizer::new(gazetteer());
    c.bench_function("analyze paragraph", |b| {
        b.iter(|| capitalizer.analyze(black_box(TEXT)))
    });
}

fn resolve(c: &mut Criterion) {
    let capitalizer = Capitalizer::new(gazetteer());
    c.bench_function("resolve word", |b| {
        b.iter(|| capitalizer.resolve(black_box("captain"), black_box("captain Smith arrived")))
    });
}

criterion_group!(benches, analyze, resolve);
criterion_main!(benches);
