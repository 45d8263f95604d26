//! Unit and property tests for the sentence-boundary chunker.

use docdex::{Chunker, Document, SentenceBoundaryChunker};
use proptest::prelude::*;

#[test]
fn empty_text_yields_no_chunks() {
    let chunker = SentenceBoundaryChunker::default();
    assert!(chunker.split("").is_empty());
}

#[test]
fn blank_text_yields_no_chunks() {
    let chunker = SentenceBoundaryChunker::default();
    assert!(chunker.split("   \n\t  ").is_empty());
}

#[test]
fn short_text_yields_single_trimmed_chunk() {
    let chunker = SentenceBoundaryChunker::default();
    let pieces = chunker.split("  The quick brown fox.  ");
    assert_eq!(pieces, vec!["The quick brown fox.".to_string()]);
}

#[test]
fn sentence_boundaries_are_preferred() {
    let chunker = SentenceBoundaryChunker::new(20, 5);
    let pieces = chunker.split("Sentence one. Sentence two. Sentence three.");

    assert_eq!(
        pieces,
        vec![
            "Sentence one.".to_string(),
            "one. Sentence two.".to_string(),
            "two. Sentence three".to_string(),
            "three.".to_string(),
        ]
    );
    assert!(pieces.iter().all(|p| !p.trim().is_empty()));
}

#[test]
fn newline_break_preferred_when_later_than_period() {
    let chunker = SentenceBoundaryChunker::new(25, 5);
    let pieces = chunker.split("first line\nsecond line\nthird line here yes");

    assert_eq!(
        pieces,
        vec!["first line\nsecond line".to_string(), "line\nthird line here yes".to_string()]
    );
}

#[test]
fn hard_cut_when_no_boundary_in_window() {
    let chunker = SentenceBoundaryChunker::new(20, 5);
    let pieces = chunker.split(&"a".repeat(50));

    assert_eq!(pieces.len(), 3);
    assert!(pieces.iter().all(|p| p.len() == 20));
}

#[test]
fn cursor_always_advances_when_overlap_equals_chunk_size() {
    // Rejected by the config builder, but the splitter itself must still
    // terminate when constructed directly.
    let chunker = SentenceBoundaryChunker::new(10, 10);
    let pieces = chunker.split(&"b".repeat(50));

    assert_eq!(pieces.len(), 41);
    assert!(pieces.iter().all(|p| p.len() == 10));
}

#[test]
fn chunk_trait_assigns_ids_and_indexes() {
    let document =
        Document::with_id("doc-1", "a.pdf", "Sentence one. Sentence two. Sentence three.");
    let chunker = SentenceBoundaryChunker::new(20, 5);
    let chunks = chunker.chunk(&document);

    assert_eq!(chunks.len(), 4);
    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.index, i);
        assert_eq!(chunk.id, format!("doc-1_chunk_{i}"));
        assert_eq!(chunk.document_id, "doc-1");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every piece is a trimmed, non-empty substring of the input; the
    /// first and last non-whitespace characters of the input are covered;
    /// and the split terminates for any chunk_size/overlap combination,
    /// including overlap >= chunk_size.
    #[test]
    fn split_terminates_and_covers_input(
        text in "[a-z .\n]{0,300}",
        chunk_size in 1usize..60,
        overlap in 0usize..80,
    ) {
        let chunker = SentenceBoundaryChunker::new(chunk_size, overlap);
        let pieces = chunker.split(&text);

        for piece in &pieces {
            prop_assert!(!piece.is_empty());
            prop_assert_eq!(piece.trim(), piece.as_str());
            prop_assert!(text.contains(piece.as_str()));
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            prop_assert!(pieces.is_empty());
        } else {
            prop_assert!(!pieces.is_empty());
            prop_assert_eq!(pieces.first().unwrap().chars().next(), trimmed.chars().next());
            prop_assert_eq!(pieces.last().unwrap().chars().last(), trimmed.chars().last());
        }
    }
}
