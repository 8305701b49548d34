// Unit tests for domain models

use super::*;

#[test]
fn test_time_spec_parse_seconds() {
    let time = TimeSpec::parse("123.456").unwrap();
    assert_eq!(time.seconds, 123.456);
}

#[test]
fn test_time_spec_parse_mm_ss() {
    let time = TimeSpec::parse("01:30.5").unwrap();
    assert_eq!(time.seconds, 90.5);
}

#[test]
fn test_time_spec_parse_hh_mm_ss() {
    let time = TimeSpec::parse("01:02:03").unwrap();
    assert_eq!(time.seconds, 3723.0);
}

#[test]
fn test_time_spec_parse_invalid() {
    assert!(TimeSpec::parse("invalid").is_err());
    assert!(TimeSpec::parse("00:60").is_err());
    assert!(TimeSpec::parse("01:60:00").is_err());
    assert!(TimeSpec::parse("-10").is_err());
    assert!(TimeSpec::parse("1:2:3:4").is_err());
}

#[test]
fn test_time_spec_display() {
    assert_eq!(TimeSpec::from_seconds(3723.456).to_string(), "01:02:03.456");
    assert_eq!(TimeSpec::from_seconds(123.456).to_string(), "02:03.456");
}

#[test]
fn test_time_spec_to_arg() {
    assert_eq!(TimeSpec::from_seconds(20.0).to_arg(), "20.000");
    assert_eq!(TimeSpec::from_seconds(171.5).to_arg(), "171.500");
}

#[test]
fn test_cue_time_from_seconds_rounds() {
    assert_eq!(CueTime::from_seconds(8.0).millis(), 8000);
    assert_eq!(CueTime::from_seconds(0.0015).millis(), 2);
    assert_eq!(CueTime::from_seconds(172.9996).millis(), 173_000);
}

#[test]
fn test_cue_time_display() {
    assert_eq!(CueTime::from_millis(0).to_string(), "00:00:00,000");
    assert_eq!(CueTime::from_millis(3_723_004).to_string(), "01:02:03,004");
    assert_eq!(CueTime::from_millis(-1200).to_string(), "-00:00:01,200");
}

#[test]
fn test_cue_rebase() {
    let cue = SubtitleCue::new(7, CueTime::from_millis(32_500), CueTime::from_millis(34_000), "hi");
    let local = cue.rebased(CueTime::from_millis(30_000), 1);
    assert_eq!(local.sequence_index, 1);
    assert_eq!(local.start.millis(), 2500);
    assert_eq!(local.end.millis(), 4000);
    assert_eq!(local.text, "hi");
}

#[test]
fn test_cue_rebase_keeps_negative_offset() {
    let cue = SubtitleCue::new(1, CueTime::from_millis(9_000), CueTime::from_millis(11_000), "x");
    let local = cue.rebased(CueTime::from_millis(10_000), 1);
    assert!(local.start.is_negative());
    assert_eq!(local.start.millis(), -1000);
    assert_eq!(local.end.millis(), 1000);
}

#[test]
fn test_cue_time_difference_saturates() {
    let far = CueTime::from_millis(i64::MIN + 1) - CueTime::from_millis(10);
    assert_eq!(far.millis(), i64::MIN);
}

#[test]
fn test_chapter_validation() {
    assert!(Chapter::new("Intro", 0.0, 20.0).is_ok());
    assert!(matches!(
        Chapter::new("Backwards", 20.0, 10.0),
        Err(DomainError::InvalidTimeRange(_))
    ));
    assert!(Chapter::new("Empty", 5.0, 5.0).is_err());
    assert!(Chapter::new("Negative", -1.0, 5.0).is_err());
    assert!(Chapter::new("NaN", f64::NAN, 5.0).is_err());
}

#[test]
fn test_chapter_parse_spec() {
    let chapter = Chapter::parse_spec("0:20-2:52=Inline Middleware").unwrap();
    assert_eq!(chapter.start_time, 20.0);
    assert_eq!(chapter.end_time, 172.0);
    assert_eq!(chapter.title, "Inline Middleware");

    let chapter = Chapter::parse_spec("0-20=Intro").unwrap();
    assert_eq!(chapter.duration().seconds, 20.0);

    assert!(Chapter::parse_spec("0-20").is_err());
    assert!(Chapter::parse_spec("20=Intro").is_err());
    assert!(Chapter::parse_spec("20-10=Backwards").is_err());
}

#[test]
fn test_chapter_deserializes_info_json_shape() {
    let chapter: Chapter =
        serde_json::from_str(r#"{"start_time": 0.0, "end_time": 20.0, "title": "Intro"}"#).unwrap();
    assert_eq!(chapter, Chapter::new("Intro", 0.0, 20.0).unwrap());
}

#[test]
fn test_policy_parsing() {
    assert_eq!(FailurePolicy::parse("continue").unwrap(), FailurePolicy::Continue);
    assert_eq!(FailurePolicy::parse("ABORT").unwrap(), FailurePolicy::Abort);
    assert!(FailurePolicy::parse("retry").is_err());

    assert_eq!(CueBoundary::parse("inclusive").unwrap(), CueBoundary::Inclusive);
    assert_eq!(CueBoundary::parse("half-open").unwrap(), CueBoundary::HalfOpen);
    assert!(CueBoundary::parse("overlap").is_err());
}

#[test]
fn test_playlist_totals() {
    let playlist = PlaylistMetadata {
        id: None,
        title: "Course".to_string(),
        entries: vec![
            VideoMetadata {
                title: "One".to_string(),
                duration: Some(60.0),
                subtitle_languages: vec!["en".to_string()],
                ..Default::default()
            },
            VideoMetadata {
                title: "Two".to_string(),
                duration: Some(30.5),
                ..Default::default()
            },
            VideoMetadata {
                title: "Unknown".to_string(),
                ..Default::default()
            },
        ],
    };

    assert_eq!(playlist.total_duration(), 90.5);
    assert_eq!(playlist.subtitle_languages(), ["en".to_string()]);
}

#[test]
fn test_segment_request_requires_paths() {
    assert!(SegmentRequest::new(PathBuf::new(), None, vec![], PathBuf::from("out")).is_err());
    assert!(SegmentRequest::new(PathBuf::from("v.mp4"), None, vec![], PathBuf::new()).is_err());
}

#[test]
fn test_report_success_tracks_failures() {
    let now = Utc::now();
    let mut report = SegmentReport {
        output_dir: PathBuf::from("out"),
        started_at: now,
        finished_at: now,
        chapter_count: 1,
        aborted: false,
        chapters: vec![ChapterReport {
            ordinal: 1,
            title: "Intro".to_string(),
            start_time: 0.0,
            end_time: 20.0,
            video: ArtifactStatus::Written {
                path: PathBuf::from("out/1. Intro.mp4"),
            },
            subtitles: None,
            cue_count: None,
        }],
    };
    assert!(report.is_success());

    report.chapters[0].subtitles = Some(ArtifactStatus::Failed {
        path: PathBuf::from("out/1. Intro.srt"),
        reason: "disk full".to_string(),
    });
    assert!(!report.is_success());
    assert_eq!(report.failed_chapters().count(), 1);
}
