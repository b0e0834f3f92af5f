use criterion::{black_box, criterion_group, criterion_main, Criterion};
use kinoteka_core::{
    ClassificationVerdict, NameFormatter, TitleClassifier, TitleToolkit, TransliterationScorer,
};

fn bench_classify(c: &mut Criterion) {
    let classifier = TitleClassifier::new(&["Doctor Who".to_string()]).unwrap();

    let inputs = vec![
        "Show.Name.S02E05.1080p.WEB-DL.x264.mkv",
        "Movie.Title.2010.720p.BluRay.mkv",
        "Fahrenheit.451.1966.1080p.BluRay.mkv",
        "Podslushano.v.Rybinske.S01E03.1080p.mkv",
        "The.Daily.Show.2023.05.12.mkv",
    ];

    c.bench_function("classify_single", |b| {
        b.iter(|| classifier.classify(black_box(inputs[0])));
    });

    c.bench_function("classify_batch_5", |b| {
        b.iter(|| {
            for input in &inputs {
                let _ = classifier.classify(black_box(input));
            }
        });
    });
}

fn bench_plan(c: &mut Criterion) {
    let classifier = TitleClassifier::new(&[]).unwrap();
    let toolkit = TitleToolkit::new().unwrap();
    let formatter = NameFormatter::new();

    let inputs = [
        "Show.Name.S02E05.1080p.mkv",
        "Movie.Title.2010.720p.mkv",
        "1923.S01E02.720p.mkv",
    ];

    c.bench_function("classify_and_format_batch_3", |b| {
        b.iter(|| {
            for input in &inputs {
                let name = match classifier.classify(black_box(input)) {
                    ClassificationVerdict::Series(se) => {
                        formatter.episode(&toolkit.episode_fields(input, &se), &se)
                    }
                    _ => formatter.movie(&toolkit.movie_fields(input)),
                };
                black_box(name);
            }
        });
    });
}

fn bench_transliteration(c: &mut Criterion) {
    let scorer = TransliterationScorer::new().unwrap();

    c.bench_function("transliteration_evaluate", |b| {
        b.iter(|| scorer.evaluate(black_box("Tainstvennye istorii goroda")));
    });
}

criterion_group!(benches, bench_classify, bench_plan, bench_transliteration);
criterion_main!(benches);
