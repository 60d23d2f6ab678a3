use mingo_editor_core::{DiagnosticRecord, Generation};
use mingo_editor_oracle::{
    DiagnosticsDispatcher, DiagnosticsRequest, OracleError, OracleOutcome, ThreadedDispatcher,
};

fn request(generation: u64, source: &str) -> DiagnosticsRequest {
    DiagnosticsRequest {
        generation: Generation::new(generation),
        source: source.to_string(),
    }
}

fn line_count_oracle(source: &str) -> OracleOutcome {
    let lines = i64::try_from(source.lines().count()).unwrap_or(i64::MAX);
    OracleOutcome::Records(vec![DiagnosticRecord::new(lines, 1, "last line")])
}

#[test]
fn test_response_carries_request_generation() {
    let mut dispatcher = ThreadedDispatcher::spawn(line_count_oracle).unwrap();
    dispatcher.dispatch(request(7, "a\nb\nc")).unwrap();

    let response = dispatcher.recv().unwrap();
    assert_eq!(response.generation, Generation::new(7));
    assert_eq!(
        response.outcome,
        OracleOutcome::Records(vec![DiagnosticRecord::new(3, 1, "last line")])
    );
}

#[test]
fn test_latest_request_is_always_answered() {
    let mut dispatcher = ThreadedDispatcher::spawn(line_count_oracle).unwrap();
    for generation in 1..=5 {
        dispatcher.dispatch(request(generation, "x")).unwrap();
    }

    let mut answered = Vec::new();
    while let Some(response) = dispatcher.recv() {
        answered.push(response.generation.get());
        if response.generation == Generation::new(5) {
            break;
        }
    }
    assert_eq!(answered.last(), Some(&5));
    assert!(answered.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn test_dead_worker_reports_disconnected() {
    let mut dispatcher =
        ThreadedDispatcher::spawn(|_: &str| -> OracleOutcome { panic!("oracle crashed") })
            .unwrap();
    dispatcher.dispatch(request(1, "x")).unwrap();
    assert!(dispatcher.recv().is_none());
    assert!(dispatcher.try_recv().is_none());
    assert!(matches!(
        dispatcher.dispatch(request(2, "x")),
        Err(OracleError::Disconnected)
    ));
}
