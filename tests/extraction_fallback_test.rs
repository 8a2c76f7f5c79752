//! Fallback chain ordering and acceptance gate behavior

use argus::domain::{Document, DocumentKind};
use argus::extraction::{
    ChainConfig, LoaderFallbackChain, StrategyInput, StrategyTable, TextStrategy,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Strategy scripted to fail or return fixed text, counting invocations
struct Scripted {
    id: &'static str,
    output: Result<String, String>,
    calls: Arc<AtomicUsize>,
}

impl Scripted {
    fn failing(id: &'static str, reason: &str, calls: &Arc<AtomicUsize>) -> Box<dyn TextStrategy> {
        Box::new(Self {
            id,
            output: Err(reason.to_string()),
            calls: Arc::clone(calls),
        })
    }

    fn yielding(id: &'static str, text: &str, calls: &Arc<AtomicUsize>) -> Box<dyn TextStrategy> {
        Box::new(Self {
            id,
            output: Ok(text.to_string()),
            calls: Arc::clone(calls),
        })
    }
}

impl TextStrategy for Scripted {
    fn id(&self) -> &'static str {
        self.id
    }

    fn extract(&self, _input: &StrategyInput<'_>) -> Result<String, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.output.clone()
    }
}

fn chain_over(kind: DocumentKind, strategies: Vec<Box<dyn TextStrategy>>) -> LoaderFallbackChain {
    let mut table: StrategyTable = StrategyTable::new();
    table.insert(kind, strategies);
    LoaderFallbackChain::with_table(ChainConfig::default(), table)
}

#[test]
fn first_passing_strategy_wins_and_later_ones_never_run() {
    let a_calls = Arc::new(AtomicUsize::new(0));
    let b_calls = Arc::new(AtomicUsize::new(0));
    let c_calls = Arc::new(AtomicUsize::new(0));

    let chain = chain_over(
        DocumentKind::PlainText,
        vec![
            Scripted::failing("strategy-a", "simulated parse failure", &a_calls),
            Scripted::yielding("strategy-b", "a body comfortably past the gate", &b_calls),
            Scripted::yielding("strategy-c", "should never be produced", &c_calls),
        ],
    );

    let doc = Document::new(b"irrelevant".to_vec(), Some("doc.txt".to_string()));
    let outcome = chain.extract(&doc).unwrap();

    assert_eq!(outcome.strategy_used, "strategy-b");
    assert_eq!(a_calls.load(Ordering::SeqCst), 1);
    assert_eq!(b_calls.load(Ordering::SeqCst), 1);
    assert_eq!(c_calls.load(Ordering::SeqCst), 0);
}

#[test]
fn sub_gate_output_falls_through_to_next_strategy() {
    let calls = Arc::new(AtomicUsize::new(0));
    let chain = chain_over(
        DocumentKind::PlainText,
        vec![
            Scripted::yielding("short-one", "tiny", &calls),
            Scripted::yielding("long-one", "long enough to pass the ten char gate", &calls),
        ],
    );

    let doc = Document::new(b"irrelevant".to_vec(), Some("doc.txt".to_string()));
    let outcome = chain.extract(&doc).unwrap();

    assert_eq!(outcome.strategy_used, "long-one");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn exhausted_chain_reports_every_reason_in_order() {
    let calls = Arc::new(AtomicUsize::new(0));
    let chain = chain_over(
        DocumentKind::PlainText,
        vec![
            Scripted::failing("first", "reason one", &calls),
            Scripted::yielding("second", "tiny", &calls),
            Scripted::failing("third", "reason three", &calls),
        ],
    );

    let doc = Document::new(b"irrelevant".to_vec(), Some("doc.txt".to_string()));
    let err = chain.extract(&doc).unwrap_err();

    assert_eq!(err.kind, DocumentKind::PlainText);
    let ids: Vec<&str> = err.attempts.iter().map(|a| a.strategy.as_str()).collect();
    assert_eq!(ids, vec!["first", "second", "third"]);
    assert_eq!(err.attempts[0].reason, "reason one");
    assert!(err.attempts[1].reason.contains("acceptance gate"));
}

#[test]
fn structured_kinds_use_the_higher_gate() {
    // 30 chars: above the simple gate (10), below the structured gate (50).
    let calls = Arc::new(AtomicUsize::new(0));
    let body = "x".repeat(30);

    let chain = chain_over(
        DocumentKind::Pdf,
        vec![Scripted::yielding("pdf-like", &body, &calls)],
    );
    let doc = Document::new(b"irrelevant".to_vec(), Some("doc.pdf".to_string()));
    assert!(chain.extract(&doc).is_err());

    let chain = chain_over(
        DocumentKind::PlainText,
        vec![Scripted::yielding("text-like", &body, &calls)],
    );
    let doc = Document::new(b"irrelevant".to_vec(), Some("doc.txt".to_string()));
    assert!(chain.extract(&doc).is_ok());
}

#[test]
fn unmapped_kind_routes_to_the_unknown_chain() {
    let generic_calls = Arc::new(AtomicUsize::new(0));
    let mut table: StrategyTable = StrategyTable::new();
    table.insert(
        DocumentKind::Unknown,
        vec![Scripted::yielding(
            "generic-stub",
            "recovered text for an unmapped kind",
            &generic_calls,
        )],
    );
    let chain = LoaderFallbackChain::with_table(ChainConfig::default(), table);

    let doc = Document::new(b"whatever".to_vec(), Some("blob.weird".to_string()));
    let outcome = chain.extract(&doc).unwrap();

    assert_eq!(outcome.strategy_used, "generic-stub");
    assert_eq!(generic_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn scratch_copy_is_visible_to_strategies_and_removed_after() {
    struct PathProbe {
        observed: Arc<std::sync::Mutex<Option<std::path::PathBuf>>>,
    }

    impl TextStrategy for PathProbe {
        fn id(&self) -> &'static str {
            "path-probe"
        }

        fn extract(&self, input: &StrategyInput<'_>) -> Result<String, String> {
            let content = std::fs::read(input.scratch_path).map_err(|e| e.to_string())?;
            *self.observed.lock().unwrap() = Some(input.scratch_path.to_path_buf());
            String::from_utf8(content).map_err(|e| e.to_string())
        }
    }

    let observed = Arc::new(std::sync::Mutex::new(None));
    let mut table: StrategyTable = StrategyTable::new();
    table.insert(
        DocumentKind::PlainText,
        vec![Box::new(PathProbe {
            observed: Arc::clone(&observed),
        })],
    );
    let chain = LoaderFallbackChain::with_table(ChainConfig::default(), table);

    let doc = Document::new(
        b"scratch copy carries the exact payload".to_vec(),
        Some("doc.txt".to_string()),
    );
    let outcome = chain.extract(&doc).unwrap();
    assert_eq!(outcome.text, "scratch copy carries the exact payload");

    let path = observed.lock().unwrap().clone().unwrap();
    assert!(!path.exists(), "scratch file should be deleted after extract");
}
