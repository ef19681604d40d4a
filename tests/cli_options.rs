use clap::Parser;
use pin_emulation::{EmulationOpts, OffsetBound, DEFAULT_MAX_OFFSET};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
struct TestCli {
    #[command(flatten)]
    opts: EmulationOpts,
}

fn parse(args: &[&str]) -> EmulationOpts {
    let mut argv = vec!["pin-emulation"];
    argv.extend_from_slice(args);
    TestCli::try_parse_from(argv).unwrap().opts
}

#[test]
fn test_defaults() {
    let opts = parse(&["--db-credentials", "db_creds_aws_emulation.yaml"]);

    assert_eq!(
        opts.db_credentials,
        PathBuf::from("db_creds_aws_emulation.yaml")
    );
    assert_eq!(opts.max_offset, DEFAULT_MAX_OFFSET);
    assert!(!opts.dynamic_bound);
    assert_eq!(opts.max_delay, Duration::from_secs(2));
    assert_eq!(opts.offset_bound(), OffsetBound::Fixed(11_000));
}

#[test]
fn test_dynamic_bound_wins_over_max_offset() {
    let opts = parse(&["--max-offset", "10", "--dynamic-bound"]);
    assert_eq!(opts.offset_bound(), OffsetBound::RowCount);
}

#[test]
fn test_max_delay_units() {
    assert_eq!(
        parse(&["--max-delay", "500ms"]).max_delay,
        Duration::from_millis(500)
    );
    assert_eq!(
        parse(&["--max-delay", "1m"]).max_delay,
        Duration::from_secs(60)
    );
    assert!(TestCli::try_parse_from(["pin-emulation", "--max-delay", "soon"]).is_err());
}

#[test]
fn test_seed_gives_reproducible_sampler() {
    let opts = parse(&["--seed", "100", "--max-offset", "1000"]);
    assert_eq!(opts.seed, Some(100));

    let source = pin_emulation::testing::MemoryRowSource::fixture(1001);
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();

    let draws = |mut sampler: pin_emulation::Sampler| {
        runtime.block_on(async {
            let mut offsets = Vec::new();
            for _ in 0..10 {
                offsets.push(sampler.draw_offset(&source).await.unwrap());
            }
            offsets
        })
    };

    assert_eq!(draws(opts.sampler()), draws(opts.sampler()));
}
