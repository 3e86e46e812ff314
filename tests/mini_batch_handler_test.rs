//! Integration tests for the orchestrator-facing mini-batch contract

mod common;

use batch_copy_agent::{
    AgentConfig, CopyJobHandler, ErrorKind, FailurePolicy, MiniBatchHandler,
};
use common::CopyFixture;

fn initialized_handler(fixture: &CopyFixture, policy: FailurePolicy) -> CopyJobHandler {
    let mut handler = CopyJobHandler::new();
    handler
        .init(&AgentConfig {
            output_path: Some(fixture.output_dir().to_path_buf()),
            failure_policy: policy,
            ..AgentConfig::default()
        })
        .unwrap();
    handler
}

#[test]
fn test_successive_mini_batches_share_output_directory() {
    let fixture = CopyFixture::new();
    let a = fixture.write_input("part1/a.txt", "hello");
    let b = fixture.write_input("part2/b.txt", "world");
    let handler = initialized_handler(&fixture, FailurePolicy::AbortBatch);

    assert_eq!(handler.run(vec![a.clone()]).unwrap(), vec![a]);
    assert_eq!(handler.run(vec![b.clone()]).unwrap(), vec![b]);

    assert_eq!(
        fixture.output_names(),
        vec!["a.txt".to_string(), "b.txt".to_string()]
    );
}

#[test]
fn test_failed_mini_batch_does_not_poison_the_next() {
    let fixture = CopyFixture::new();
    let missing = fixture.missing_input("missing.txt");
    let b = fixture.write_input("b.txt", "world");
    let handler = initialized_handler(&fixture, FailurePolicy::AbortBatch);

    let err = handler.run(vec![missing]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingInput);

    assert_eq!(handler.run(vec![b.clone()]).unwrap(), vec![b]);
    assert_eq!(fixture.read_output("b.txt"), b"world");
}

#[test]
fn test_redelivered_mini_batch_overwrites() {
    let fixture = CopyFixture::new();
    let a = fixture.write_input("a.txt", "first");
    let handler = initialized_handler(&fixture, FailurePolicy::AbortBatch);

    handler.run(vec![a.clone()]).unwrap();
    fixture.write_input("a.txt", "second");
    handler.run(vec![a]).unwrap();

    assert_eq!(fixture.read_output("a.txt"), b"second");
}

#[test]
fn test_report_variant_exposes_failures_under_continue_policy() {
    let fixture = CopyFixture::new();
    let a = fixture.write_input("a.txt", "hello");
    let missing = fixture.missing_input("missing.txt");
    let handler = initialized_handler(&fixture, FailurePolicy::ContinueOnFailure);

    let report = handler.run_with_report(&[a.clone(), missing.clone()]).unwrap();

    assert_eq!(report.succeeded, vec![a]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].path, missing);
    assert_eq!(report.policy, FailurePolicy::ContinueOnFailure);
}

#[test]
fn test_handler_is_usable_as_trait_object() {
    let fixture = CopyFixture::new();
    let a = fixture.write_input("a.txt", "hello");
    let mut handler: Box<dyn MiniBatchHandler> = Box::new(CopyJobHandler::new());

    handler
        .init(&AgentConfig {
            output_path: Some(fixture.output_dir().to_path_buf()),
            ..AgentConfig::default()
        })
        .unwrap();

    assert_eq!(handler.run(vec![a.clone()]).unwrap(), vec![a]);
}
