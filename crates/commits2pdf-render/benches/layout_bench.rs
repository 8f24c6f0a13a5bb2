use chrono::{TimeZone, Utc};
use commits2pdf_git::{CommitRecord, FilterCriteria, RawCommit, RepoIdentity};
use commits2pdf_render::{LayoutEngine, LayoutStrategy, RenderOptions, ReportSummary};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

/// Commits with descriptions of varying length
fn sample_commits(len: usize) -> Vec<CommitRecord> {
    let identity = RepoIdentity::new("bench", "layout");
    (0..len)
        .map(|i| {
            let body = "Explains the change in a sentence or two. ".repeat(1 + i % 9);
            let raw = RawCommit {
                sha: format!("{:040x}", i + 1),
                message: format!("Change {i}\n\n{body}\nSecond paragraph line."),
                author: format!("Author {}", i % 5),
                author_email: format!("author{}@example.com", i % 5),
                timestamp: Utc.timestamp_opt(1_700_000_000 + i as i64 * 60, 0).unwrap(),
            };
            CommitRecord::new(&raw, &identity)
        })
        .collect()
}

fn layout_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");

    for size in [10usize, 100, 1_000] {
        let commits = sample_commits(size);
        let summary =
            ReportSummary::new("layout", "bench", "main", &FilterCriteria::default(), size);

        for strategy in [LayoutStrategy::Exact, LayoutStrategy::Estimate] {
            let engine = LayoutEngine::new(RenderOptions::new(strategy));
            group.bench_with_input(
                BenchmarkId::new(strategy.to_string(), size),
                &commits,
                |b, commits| b.iter(|| engine.lay_out(&summary, commits).expect("lay out")),
            );
        }
    }

    group.finish();
}

criterion_group!(benches, layout_benchmarks);
criterion_main!(benches);
