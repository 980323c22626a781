use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tariff_psr::{analyzer::parse_rule, config::RooConfig, template::TemplateVars, Questionnaire};

const RULE: &str = "CC except 0301-0303,0305 or CTH except 0302 material 'fish' \
                    or RVC parameter '40%' and CTSH condition 'provided that it is processed'";

fn roo() -> RooConfig {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/roo.json");
    RooConfig::from_file(path).unwrap()
}

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse rule", |b| b.iter(|| parse_rule(black_box(RULE)).unwrap()));
}

fn bench_build(c: &mut Criterion) {
    let roo = roo();
    let vars = TemplateVars::with_hscode("0304.41");
    c.bench_function("build questionnaire", |b| {
        b.iter(|| Questionnaire::build(black_box(RULE), &roo, &vars).unwrap())
    });
}

fn bench_iterate(c: &mut Criterion) {
    let psr = Questionnaire::build(RULE, &roo(), &TemplateVars::with_hscode("0304.41")).unwrap();
    let answers: BTreeMap<String, bool> = [("CC", false), ("CTH", false), ("CTSH", true)]
        .into_iter()
        .map(|(code, value)| (code.to_string(), value))
        .collect();
    c.bench_function("iterate", |b| b.iter(|| psr.iterate(black_box(&answers)).outcome()));
}

criterion_group!(benches, bench_parse, bench_build, bench_iterate);
criterion_main!(benches);
