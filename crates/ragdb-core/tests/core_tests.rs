use ragdb_core::chunker::{chunk, chunk_many, normalize};
use ragdb_core::config::RagConfig;
use ragdb_core::error::Error;

#[test]
fn normalize_trims_and_rejoins_paragraphs() {
    let raw = "  first paragraph \n\n\n\n  second paragraph\n\n";
    assert_eq!(normalize(raw), "first paragraph\n\nsecond paragraph");
}

#[test]
fn empty_input_yields_no_chunks() {
    assert!(chunk("", 800, 120).expect("chunk").is_empty());
    assert!(chunk("\n\n  \n\n", 800, 120).expect("chunk").is_empty());
}

#[test]
fn short_input_yields_single_full_span_chunk() {
    let text: String = "x".repeat(499);
    let chunks = chunk(&text, 500, 0).expect("chunk");
    assert_eq!(chunks.len(), 1, "input shorter than the window is one chunk");
    assert_eq!(chunks[0].start, 0);
    assert_eq!(chunks[0].end, 499);
    assert_eq!(chunks[0].text, text);
}

#[test]
fn thousand_chars_at_800_120_is_exactly_two_chunks() {
    let text: String = "a".repeat(1000);
    let chunks = chunk(&text, 800, 120).expect("chunk");
    assert_eq!(chunks.len(), 2);
    assert_eq!((chunks[0].start, chunks[0].end), (0, 800));
    assert_eq!((chunks[1].start, chunks[1].end), (680, 1000));
}

#[test]
fn chunks_cover_text_with_exact_overlap() {
    let text: String = "paragraph one text here\n\n".repeat(40);
    let (size, overlap) = (100, 25);
    let chunks = chunk(&text, size, overlap).expect("chunk");
    let n = normalize(&text).chars().count();

    assert_eq!(chunks[0].start, 0, "coverage starts at 0");
    assert_eq!(chunks.last().expect("non-empty").end, n, "coverage ends at len");
    for pair in chunks.windows(2) {
        assert_eq!(pair[0].end - pair[1].start, overlap, "consecutive chunks share exactly the overlap");
        assert!(pair[1].start > pair[0].start, "starts strictly increase");
    }
    for c in &chunks {
        assert!(c.start < c.end && c.end <= n);
        assert_eq!(c.text.chars().count(), c.end - c.start);
    }
}

#[test]
fn overlap_not_smaller_than_chunk_size_is_rejected() {
    for (size, overlap) in [(100, 100), (100, 150), (0, 0)] {
        let err = chunk("some text", size, overlap).expect_err("must reject");
        assert!(matches!(err, Error::InvalidConfig(_)), "got {err}");
    }
}

#[test]
fn chunk_many_concatenates_blocks_with_restarting_offsets() {
    let blocks = vec!["b".repeat(120), "c".repeat(50)];
    let chunks = chunk_many(&blocks, 100, 10).expect("chunk_many");
    assert_eq!(chunks.len(), 3, "two from the first block, one from the second");
    assert_eq!((chunks[0].start, chunks[0].end), (0, 100));
    assert_eq!((chunks[1].start, chunks[1].end), (90, 120));
    assert_eq!((chunks[2].start, chunks[2].end), (0, 50), "offsets restart per block");
}

#[test]
fn default_config_is_valid_and_env_overrides_apply() {
    let config = RagConfig::default();
    config.validate().expect("defaults are usable");
    assert_eq!(config.chunk_size, 800);
    assert_eq!(config.chunk_overlap, 120);

    std::env::set_var("RAGDB_TOP_K", "9");
    let loaded = RagConfig::load().expect("load");
    assert_eq!(loaded.top_k, 9);
    std::env::remove_var("RAGDB_TOP_K");
}

#[test]
fn bad_config_combinations_are_rejected() {
    let mut config = RagConfig::default();
    config.chunk_overlap = config.chunk_size;
    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

    let mut config = RagConfig::default();
    config.top_k = 0;
    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

    let mut config = RagConfig::default();
    config.max_context_chars = 0;
    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
}
