use criterion::{black_box, criterion_group, criterion_main, Criterion};
use medical_kgqa::{compose, EntityExtractor, IntentClassifier, IntentTag, Lexicon, QueryOutcome};

fn sample_lexicon() -> Lexicon {
    let mut names: Vec<String> = (0..2000).map(|i| format!("disease_{i:04}")).collect();
    names.extend(["flu", "seasonal flu", "avian flu", "type 2 diabetes"].map(String::from));
    Lexicon::from_names(names)
}

fn extractor_benchmark(c: &mut Criterion) {
    let extractor = EntityExtractor::new(sample_lexicon());

    c.bench_function("entity_extractor_hit_short_name", |b| {
        b.iter(|| black_box(extractor.extract(black_box("what are the symptoms of flu"))));
    });

    c.bench_function("entity_extractor_miss", |b| {
        b.iter(|| black_box(extractor.extract(black_box("what should I eat for breakfast"))));
    });
}

fn classifier_benchmark(c: &mut Criterion) {
    let classifier = IntentClassifier::default();

    c.bench_function("intent_classifier_last_rule", |b| {
        b.iter(|| black_box(classifier.classify(black_box("does medical insurance cover flu"))));
    });
}

fn composer_benchmark(c: &mut Criterion) {
    let outcome = QueryOutcome::Found((0..32).map(|i| format!("item_{i}")).collect());

    c.bench_function("compose_answer_32_items", |b| {
        b.iter(|| {
            let reply = compose(Some("flu"), Some(IntentTag::Symptom), Some(black_box(&outcome)));
            black_box(reply.len());
        });
    });
}

criterion_group!(benches, extractor_benchmark, classifier_benchmark, composer_benchmark);
criterion_main!(benches);
