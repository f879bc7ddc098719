use super::*;
use crate::foundation::core::FrameIndex;

fn timing() -> HighlightTiming {
    HighlightTiming {
        duration_frames: 24,
        gap_frames: 6,
        initial_delay_frames: 12,
    }
}

fn texts(segs: &[TextSegment]) -> Vec<(&str, bool)> {
    segs.iter().map(|s| (s.text.as_str(), s.highlighted)).collect()
}

#[test]
fn normalize_trims_lowercases_and_drops_empty() {
    let out = normalize_phrases(&["  Quick ", "", "   ", "BROWN fox"]);
    assert_eq!(out, ["quick", "brown fox"]);
}

#[test]
fn same_phrase_occurrences_do_not_overlap() {
    let m = find_matches("aaaa", &["aa"]);
    assert_eq!(
        m,
        [
            MatchRange { start: 0, end: 2 },
            MatchRange { start: 2, end: 4 }
        ]
    );
    let m = find_matches("aaa", &["aa"]);
    assert_eq!(m, [MatchRange { start: 0, end: 2 }]);
}

#[test]
fn merge_joins_overlapping_and_touching_ranges() {
    let merged = merge_ranges(vec![
        MatchRange { start: 10, end: 12 },
        MatchRange { start: 0, end: 4 },
        MatchRange { start: 2, end: 6 },
        MatchRange { start: 6, end: 8 },
    ]);
    assert_eq!(
        merged,
        [
            MatchRange { start: 0, end: 8 },
            MatchRange { start: 10, end: 12 }
        ]
    );
}

#[test]
fn overlapping_phrases_merge_into_one_span() {
    let out = segment_paragraphs(&["the quick brown fox"], &["quick brown", "brown fox"], timing());
    assert_eq!(
        texts(&out[0]),
        [("the ", false), ("quick brown fox", true)]
    );
    assert_eq!(out[0][1].window, Some(FrameRange::with_len(12, 24)));
}

#[test]
fn matching_is_case_insensitive_and_preserves_casing() {
    let out = segment_paragraphs(&["Lorem Ipsum"], &["lorem"], timing());
    assert_eq!(texts(&out[0]), [("Lorem", true), (" Ipsum", false)]);

    let out = segment_paragraphs(&["say HELLO"], &["  Hello  "], timing());
    assert_eq!(texts(&out[0]), [("say ", false), ("HELLO", true)]);
}

#[test]
fn no_match_passes_paragraph_through_without_consuming_time() {
    let out = segment_paragraphs(&["abc", "xyz here"], &["xyz"], timing());
    assert_eq!(texts(&out[0]), [("abc", false)]);
    assert_eq!(out[0][0].window, None);
    // The first window still starts at the initial delay.
    assert_eq!(out[1][0].window, Some(FrameRange::with_len(12, 24)));
}

#[test]
fn empty_phrase_list_is_not_an_error() {
    let none: [&str; 0] = [];
    let out = segment_paragraphs(&["one", "two"], &none, timing());
    assert_eq!(texts(&out[0]), [("one", false)]);
    assert_eq!(texts(&out[1]), [("two", false)]);

    let out = segment_paragraphs(&["one"], &["", "  "], timing());
    assert_eq!(texts(&out[0]), [("one", false)]);
}

#[test]
fn empty_paragraph_yields_no_segments() {
    let out = segment_paragraphs(&[""], &["x"], timing());
    assert!(out[0].is_empty());
}

#[test]
fn windows_continue_across_paragraphs() {
    let out = segment_paragraphs(
        &["alpha beta alpha", "gamma", "beta"],
        &["alpha", "beta"],
        timing(),
    );
    let windows: Vec<FrameRange> = out
        .iter()
        .flatten()
        .filter_map(|s| s.window)
        .collect();
    assert_eq!(
        windows,
        [
            FrameRange::with_len(12, 24),
            FrameRange::with_len(42, 24),
            FrameRange::with_len(72, 24),
            FrameRange::with_len(102, 24),
        ]
    );
    assert!(out.iter().flatten().all(|s| s.highlighted == s.window.is_some()));
}

#[test]
fn whole_paragraph_highlight() {
    let out = segment_paragraphs(&["Everything"], &["everything"], timing());
    assert_eq!(texts(&out[0]), [("Everything", true)]);
}

#[test]
fn unicode_folding_maps_back_to_original_bytes() {
    // 'İ' lowercases to two chars, shifting folded offsets relative to the original.
    let p = "İstanbul ÉCOLE straße";
    let out = segment_paragraphs(&[p], &["école", "STRASSE", "straße"], timing());
    let joined: String = out[0].iter().map(|s| s.text.as_str()).collect();
    assert_eq!(joined, p);
    assert_eq!(
        texts(&out[0]),
        [("İstanbul ", false), ("ÉCOLE", true), (" ", false), ("straße", true)]
    );
}

#[test]
fn partial_match_inside_expanded_char_widens_to_whole_char() {
    let m = find_matches("İx", &normalize_phrases(&["\u{307}x"]));
    assert_eq!(m, [MatchRange { start: 0, end: 3 }]);
}

#[test]
fn reveal_progress_is_clamped() {
    let w = FrameRange::new(FrameIndex(10), FrameIndex(20)).unwrap();
    assert_eq!(reveal_progress(w, 0), 0.0);
    assert_eq!(reveal_progress(w, 10), 0.0);
    assert_eq!(reveal_progress(w, 15), 0.5);
    assert_eq!(reveal_progress(w, 20), 1.0);
    assert_eq!(reveal_progress(w, 99), 1.0);
    assert_eq!(reveal_percent(reveal_progress(w, 13)), 30);
    assert_eq!(reveal_percent(1.7), 100);

    let plain = TextSegment::plain("x");
    assert_eq!(plain.reveal_progress(15), 0.0);
}

#[test]
fn default_timing_follows_fps() {
    let t = HighlightTiming::for_fps(Fps::new(30, 1).unwrap());
    assert_eq!(
        t,
        HighlightTiming {
            duration_frames: 24,
            gap_frames: 6,
            initial_delay_frames: 12
        }
    );
    let t = HighlightTiming::for_fps(Fps::new(1, 1).unwrap());
    assert_eq!(t.duration_frames, 1);
    assert_eq!(t.gap_frames, 1);
    assert_eq!(t.initial_delay_frames, 0);
}

#[test]
fn emit_segments_covers_paragraph_for_merged_ranges() {
    let ranges = merge_ranges(find_matches("abcdef", &["abcd", "cdef", "zz"]));
    let segs = emit_segments("abcdef", &ranges).unwrap();
    assert_eq!(texts(&segs), [("abcdef", true)]);

    let segs = emit_segments("abcdef", &[MatchRange { start: 1, end: 3 }]).unwrap();
    assert_eq!(texts(&segs), [("a", false), ("bc", true), ("def", false)]);
    assert!(emit_segments("abc", &[]).unwrap().iter().all(|s| !s.highlighted));
}

#[test]
fn emit_segments_rejects_malformed_ranges() {
    let r = |start, end| MatchRange { start, end };
    let cases: [(&str, Vec<MatchRange>); 5] = [
        ("abcdef", vec![r(0, 4), r(2, 6)]),
        ("abcdef", vec![r(3, 5), r(0, 2)]),
        ("abcdef", vec![r(4, 2)]),
        ("abc", vec![r(1, 9)]),
        ("İx", vec![r(1, 3)]),
    ];
    for (paragraph, ranges) in cases {
        let err = emit_segments(paragraph, &ranges).unwrap_err();
        assert!(matches!(err, ReelError::Config(_)), "{ranges:?} -> {err}");
    }
}
