use pin_emulation::console::{run_console, write_record, ConsoleOptions, DELIMITER};
use pin_emulation::testing::MemoryRowSource;
use pin_emulation::{sample_at, EmulationError, OffsetBound, Sampler};
use std::time::Duration;

fn bounded(iterations: u64) -> ConsoleOptions {
    ConsoleOptions {
        iterations: Some(iterations),
        max_delay: Duration::ZERO,
    }
}

#[tokio::test]
async fn test_one_record_per_iteration() {
    let source = MemoryRowSource::fixture(30);
    let mut sampler = Sampler::seeded(100, OffsetBound::Fixed(29));
    let mut out = Vec::new();

    let printed = run_console(&mut sampler, &source, &mut out, &bounded(3))
        .await
        .unwrap();
    assert_eq!(printed, 3);
    assert_eq!(source.rows_at_calls(), 3);

    let text = String::from_utf8(out).unwrap();
    assert_eq!(text.lines().filter(|l| *l == DELIMITER).count(), 3);
    assert_eq!(text.matches("Pin data:").count(), 3);
    assert_eq!(text.matches("Geolocation data:").count(), 3);
    assert_eq!(text.matches("User data:").count(), 3);
}

#[tokio::test]
async fn test_zero_iterations_prints_nothing() {
    let source = MemoryRowSource::fixture(5);
    let mut sampler = Sampler::seeded(1, OffsetBound::Fixed(4));
    let mut out = Vec::new();

    let printed = run_console(&mut sampler, &source, &mut out, &bounded(0))
        .await
        .unwrap();
    assert_eq!(printed, 0);
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_seeded_runs_print_identical_output() {
    let source = MemoryRowSource::fixture(500);

    let mut first = Vec::new();
    let mut sampler = Sampler::seeded(100, OffsetBound::Fixed(499));
    run_console(&mut sampler, &source, &mut first, &bounded(5))
        .await
        .unwrap();

    let mut second = Vec::new();
    let mut sampler = Sampler::seeded(100, OffsetBound::Fixed(499));
    run_console(&mut sampler, &source, &mut second, &bounded(5))
        .await
        .unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_printed_record_matches_sampled_offset() {
    let source = MemoryRowSource::fixture(1);
    let mut sampler = Sampler::seeded(9, OffsetBound::RowCount);
    let mut out = Vec::new();

    run_console(&mut sampler, &source, &mut out, &bounded(1))
        .await
        .unwrap();

    let mut expected = Vec::new();
    write_record(&mut expected, &sample_at(&source, 0).await.unwrap()).unwrap();
    assert_eq!(out, expected);
}

#[tokio::test]
async fn test_missing_row_ends_loop_with_error() {
    let source = MemoryRowSource::fixture(2);
    let empty = MemoryRowSource::fixture(0);
    let mut sampler = Sampler::seeded(0, OffsetBound::Fixed(0));

    let mut out = Vec::new();
    let err = run_console(&mut sampler, &empty, &mut out, &bounded(2))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EmulationError::SampleNotFound { ref table, offset: 0 } if table == "pinterest_data"
    ));
    assert!(out.is_empty());

    // The populated source still samples fine with the same sampler.
    assert_eq!(
        run_console(&mut sampler, &source, &mut out, &bounded(1))
            .await
            .unwrap(),
        1
    );
}
