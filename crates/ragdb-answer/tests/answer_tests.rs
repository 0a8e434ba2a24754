use std::sync::Mutex;

use ragdb_answer::context::assemble;
use ragdb_answer::generate::{generate, AnswerMode, EXTRACTIVE_PREAMBLE, NO_CONTEXT_MESSAGE};
use ragdb_core::error::Error;
use ragdb_core::traits::Generator;
use ragdb_core::types::{Hit, Provenance};

fn hit(id: &str, source: &str, text: &str) -> Hit {
    Hit {
        id: id.to_string(),
        relevance: 0.9,
        text: text.to_string(),
        provenance: Provenance { source: source.to_string(), start: 0, end: text.chars().count() },
    }
}

struct RecordingGenerator {
    calls: Mutex<Vec<(String, String)>>,
    reply: String,
}

impl RecordingGenerator {
    fn new(reply: &str) -> Self {
        Self { calls: Mutex::new(Vec::new()), reply: reply.to_string() }
    }
}

impl Generator for RecordingGenerator {
    fn complete(&self, system: &str, user: &str) -> anyhow::Result<String> {
        self.calls.lock().expect("lock").push((system.to_string(), user.to_string()));
        Ok(self.reply.clone())
    }
}

struct FailingGenerator;

impl Generator for FailingGenerator {
    fn complete(&self, _system: &str, _user: &str) -> anyhow::Result<String> {
        anyhow::bail!("401 Unauthorized")
    }
}

#[test]
fn assemble_includes_headers_and_joins_with_blank_line() {
    let hits = vec![hit("1", "barn.txt", "hay storage"), hit("2", "well.txt", "pump repair")];
    let out = assemble(&hits, 1000);
    assert_eq!(
        out,
        "[SOURCE: barn.txt @ 0-11]\nhay storage\n\n[SOURCE: well.txt @ 0-11]\npump repair"
    );
}

#[test]
fn assemble_truncates_to_budget_and_drops_later_hits() {
    let first = "a".repeat(300);
    let second = "b".repeat(300);
    let hits = vec![hit("1", "one.txt", &first), hit("2", "two.txt", &second)];

    let out = assemble(&hits, 250);
    let expected = format!("[SOURCE: one.txt @ 0-300]\n{}", "a".repeat(250));
    assert_eq!(out, expected, "first hit truncated, second omitted entirely");
    assert!(!out.contains("two.txt"), "no header for an excluded hit");
}

#[test]
fn assemble_is_deterministic() {
    let hits = vec![hit("1", "a.txt", "some content here"), hit("2", "b.txt", "more content")];
    assert_eq!(assemble(&hits, 20), assemble(&hits, 20));
}

#[test]
fn assemble_empty_hits_is_empty() {
    assert_eq!(assemble(&[], 100), "");
}

#[test]
fn extractive_fallback_with_no_hits_returns_fixed_message() {
    let out = generate(&AnswerMode::Extractive, "how do I winterize the coop?", &[], 500)
        .expect("generate");
    assert_eq!(out, NO_CONTEXT_MESSAGE);

    // Independent of the question text.
    let out2 = generate(&AnswerMode::Extractive, "", &[], 500).expect("generate");
    assert_eq!(out2, NO_CONTEXT_MESSAGE);
}

#[test]
fn extractive_fallback_returns_preamble_plus_context_verbatim() {
    let hits = vec![hit("1", "coop.txt", "insulate the north wall")];
    let out = generate(&AnswerMode::Extractive, "winterizing?", &hits, 500).expect("generate");
    let expected = format!("{EXTRACTIVE_PREAMBLE}\n\n{}", assemble(&hits, 500));
    assert_eq!(out, expected);
}

#[test]
fn llm_backed_mode_sends_question_and_context_once_and_trims() {
    let generator = RecordingGenerator::new("  Insulate the north wall. (source: coop.txt)\n");
    let hits = vec![hit("1", "coop.txt", "insulate the north wall")];
    let mode = AnswerMode::resolve(Some(&generator as &dyn Generator));

    let out = generate(&mode, "winterizing?", &hits, 500).expect("generate");
    assert_eq!(out, "Insulate the north wall. (source: coop.txt)");

    let calls = generator.calls.lock().expect("lock");
    assert_eq!(calls.len(), 1, "exactly one completion call");
    let (system, user) = &calls[0];
    assert!(system.contains("ONLY the provided context"));
    assert!(user.starts_with("Question: winterizing?"));
    assert!(user.contains("[SOURCE: coop.txt @ 0-23]"));
}

#[test]
fn generator_failure_surfaces_and_does_not_fall_back() {
    let generator = FailingGenerator;
    let mode = AnswerMode::resolve(Some(&generator as &dyn Generator));
    let hits = vec![hit("1", "coop.txt", "insulate the north wall")];
    let err = generate(&mode, "winterizing?", &hits, 500).expect_err("must fail");
    match err {
        Error::Generation(inner) => assert!(inner.to_string().contains("401")),
        other => panic!("expected Generation error, got {other}"),
    }
}

#[test]
fn resolve_without_generator_is_extractive() {
    let mode = AnswerMode::resolve(None);
    assert!(matches!(mode, AnswerMode::Extractive));
}
