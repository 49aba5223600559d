use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pd_core::ingest;
use pd_core::TokenFlags;

fn generate_archive(n: usize) -> String {
    let tweets: Vec<String> = (0..n)
        .map(|i| {
            format!(
                r#"{{"id_str":"{i}","created_at":"Wed Oct 10 20:19:24 +0000 2018","text":"Post {i} about #topic{m} https://t.co/{i}","entities":{{"hashtags":[{{"text":"topic{m}"}}],"urls":[],"user_mentions":[]}},"user":{{"id_str":"{m}","screen_name":"user{m}"}}}}"#,
                m = i % 17
            )
        })
        .collect();
    format!("[{}]", tweets.join(","))
}

fn bench_classify(c: &mut Criterion) {
    let words = ["hello", "RT", "@someone", "https://t.co/abc", "2018", "seven", "!!", "#tag"];
    c.bench_function("classify_tokens_8", |b| {
        b.iter(|| {
            for w in &words {
                black_box(TokenFlags::classify(black_box(w)));
            }
        })
    });
}

fn bench_parse_tweets(c: &mut Criterion) {
    let archive = generate_archive(1000);
    c.bench_function("parse_tweets_1000", |b| {
        b.iter(|| black_box(ingest::parse_tweets(black_box(&archive)).unwrap()))
    });
}

criterion_group!(benches, bench_classify, bench_parse_tweets);
criterion_main!(benches);
