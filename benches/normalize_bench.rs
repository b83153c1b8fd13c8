use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tweetsum::transformers::{ArticleCleaner, Normalize, PostCleaner};

pub fn article(c: &mut Criterion) {
    let lines = [
        "-LRB- see table 2 -RRB- the results are `` surprisingly '' good",
        "we propose a new method for sparse attention .",
        "-LSB- 1 -RSB- -LCB- x -RCB- and more",
    ];
    let a = ArticleCleaner;
    c.bench_function("article_clean", |b| {
        b.iter(|| {
            for line in lines {
                a.normalize(black_box(line));
            }
        })
    });
}

pub fn post(c: &mut Criterion) {
    let lines = [
        "RT @alice : RT @bob : new paper on parsing ... pdf",
        "great work rt @carol [ 1 , 2 ] check it",
        "sparse attention . (arXiv 1701.1 ) http://arxiv.org/abs/1701.1 #nlp #ml",
    ];
    let p = PostCleaner;
    c.bench_function("post_compose", |b| {
        b.iter(|| {
            for line in lines {
                p.compose(black_box("A Title"), black_box(line));
            }
        })
    });
}

criterion_group!(benches, article, post);
criterion_main!(benches);
