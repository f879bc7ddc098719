use super::*;
use crate::foundation::core::{FrameIndex, FrameRange};

fn fps30() -> Fps {
    Fps::new(30, 1).unwrap()
}

fn props() -> TextHighlightProps {
    TextHighlightProps {
        paragraphs: vec!["The quick brown fox".to_owned(), "Lorem ipsum".to_owned()],
        highlights: vec!["quick".to_owned(), " LOREM ".to_owned()],
        theme: HighlightThemeKey::Theme2,
    }
}

#[test]
fn windows_follow_fps_derived_timing() {
    let scene = TextHighlightScene::new(props(), fps30()).unwrap();
    assert_eq!(
        scene.timing(),
        HighlightTiming {
            duration_frames: 24,
            gap_frames: 6,
            initial_delay_frames: 12,
        }
    );

    let windows: Vec<FrameRange> = scene
        .segments()
        .iter()
        .flatten()
        .filter_map(|s| s.window)
        .collect();
    assert_eq!(
        windows,
        [
            FrameRange {
                start: FrameIndex(12),
                end: FrameIndex(36)
            },
            FrameRange {
                start: FrameIndex(42),
                end: FrameIndex(66)
            },
        ]
    );
    assert_eq!(scene.reveal_end(), 66);
    assert_eq!(scene.natural_duration(), 96);
}

#[test]
fn frame_state_reports_reveal_percent_per_segment() {
    let scene = TextHighlightScene::new(props(), fps30()).unwrap();

    let at = |frame: i64| -> Vec<Vec<(String, u8)>> {
        scene
            .frame_state(frame)
            .paragraphs
            .into_iter()
            .map(|p| p.into_iter().map(|s| (s.text, s.reveal_percent)).collect())
            .collect()
    };

    let f0 = at(0);
    assert_eq!(f0[0][1], ("quick".to_owned(), 0));
    assert_eq!(f0[1][0], ("Lorem".to_owned(), 0));

    let f24 = at(24);
    assert_eq!(f24[0][1].1, 50);
    assert_eq!(f24[1][0].1, 0);

    let f100 = at(100);
    assert_eq!(f100[0][1].1, 100);
    assert_eq!(f100[1][0].1, 100);
    // Plain runs never fill.
    assert_eq!(f100[0][0], ("The ".to_owned(), 0));
}

#[test]
fn container_scale_eases_from_one_toward_one_point_three() {
    let scene = TextHighlightScene::new(props(), fps30()).unwrap();
    assert_eq!(scene.container_scale(0), 1.0);
    assert_eq!(scene.container_scale(-10), 1.0);

    let mut prev = 1.0;
    for frame in (0..3000).step_by(50) {
        let s = scene.container_scale(frame);
        assert!(s >= prev - 1e-12, "scale decreased at {frame}");
        assert!(s <= 1.3 + 1e-12);
        prev = s;
    }
    assert!((scene.container_scale(9000) - 1.3).abs() < 1e-3);
}

#[test]
fn theme_is_resolved_into_the_frame() {
    let scene = TextHighlightScene::new(props(), fps30()).unwrap();
    let f = scene.frame_state(5);
    assert_eq!(f.frame, 5);
    assert_eq!(f.theme, *HighlightThemeKey::Theme2.theme());
}

#[test]
fn empty_inputs_are_accepted() {
    let scene = TextHighlightScene::new(TextHighlightProps::default(), fps30()).unwrap();
    assert!(scene.segments().is_empty());
    assert_eq!(scene.reveal_end(), 0);
    assert_eq!(scene.natural_duration(), 30);
    assert!(scene.frame_state(0).paragraphs.is_empty());
}

#[test]
fn invalid_fps_is_rejected() {
    let err = TextHighlightScene::new(props(), Fps { num: 0, den: 1 }).unwrap_err();
    assert!(err.to_string().starts_with("config error:"));
}

#[test]
fn props_deserialize_from_camel_case_json() {
    let p: TextHighlightProps = serde_json::from_str(
        r#"{"paragraphs":["a b"],"highlightsText":["b"],"theme":"theme4"}"#,
    )
    .unwrap();
    assert_eq!(p.highlights, ["b"]);
    assert_eq!(p.theme, HighlightThemeKey::Theme4);

    let p: TextHighlightProps = serde_json::from_str(r#"{"paragraphs":[]}"#).unwrap();
    assert!(p.highlights.is_empty());
    assert_eq!(p.theme, HighlightThemeKey::Theme1);
}
