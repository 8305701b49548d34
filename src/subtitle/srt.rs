//! SubRip (.srt) reading and writing

use tracing::debug;

use crate::domain::model::{CueTime, SubtitleCue};
use crate::error::{SplitterError, SplitterResult};

const ARROW: &str = "-->";

/// Parse a SubRip document into cues.
///
/// Cues are numbered by their position in the document; the index lines in
/// the file are not trusted. An empty document is a valid track with no cues.
pub fn parse_srt(content: &str) -> SplitterResult<Vec<SubtitleCue>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut cues = Vec::new();
    let mut lines = content.lines().enumerate().peekable();

    loop {
        while lines.next_if(|(_, line)| line.trim().is_empty()).is_some() {}

        let Some((first_no, first)) = lines.next() else {
            break;
        };

        let (timing_no, timing) = if first.contains(ARROW) {
            (first_no, first)
        } else {
            match lines.next() {
                Some((no, line)) if line.contains(ARROW) => (no, line),
                _ => {
                    return Err(SplitterError::MalformedCue {
                        line: first_no + 1,
                        message: format!("expected a timing line after '{}'", first.trim()),
                    })
                }
            }
        };

        let (start, end) = parse_timing_line(timing).map_err(|e| SplitterError::MalformedCue {
            line: timing_no + 1,
            message: e.to_string(),
        })?;

        let mut text = Vec::new();
        while let Some((_, line)) = lines.next_if(|(_, line)| !line.trim().is_empty()) {
            text.push(line.trim_end());
        }

        cues.push(SubtitleCue::new(cues.len() + 1, start, end, text.join("\n")));
    }

    debug!("Parsed {} subtitle cues", cues.len());
    Ok(cues)
}

/// Render cues as a SubRip document, numbering them by `sequence_index`
pub fn render_srt(cues: &[SubtitleCue]) -> String {
    let mut out = String::new();
    for cue in cues {
        out.push_str(&format!(
            "{}\n{} {} {}\n{}\n\n",
            cue.sequence_index, cue.start, ARROW, cue.end, cue.text
        ));
    }
    out
}

fn parse_timing_line(line: &str) -> SplitterResult<(CueTime, CueTime)> {
    let (start, rest) = line.split_once(ARROW).ok_or_else(|| SplitterError::InvalidTimestamp {
        value: line.trim().to_string(),
    })?;
    // anything after the end timestamp is positioning data
    let end = rest.split_whitespace().next().unwrap_or_default();
    Ok((parse_timestamp(start)?, parse_timestamp(end)?))
}

/// Parse `HH:MM:SS,mmm` (a `.` separator and a leading `-` are accepted)
pub fn parse_timestamp(value: &str) -> SplitterResult<CueTime> {
    let trimmed = value.trim();
    let invalid = || SplitterError::InvalidTimestamp {
        value: trimmed.to_string(),
    };

    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };

    let (clock, fraction) = body
        .split_once(|c: char| c == ',' || c == '.')
        .unwrap_or((body, "0"));
    let fields: Vec<&str> = clock.split(':').collect();
    let [hours, minutes, seconds] = fields.as_slice() else {
        return Err(invalid());
    };

    let number = |field: &str| -> SplitterResult<i64> {
        if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        field.parse::<i64>().map_err(|_| invalid())
    };

    let hours = number(*hours)?;
    let minutes = number(*minutes)?;
    let seconds = number(*seconds)?;
    if minutes >= 60 || seconds >= 60 || fraction.len() > 3 {
        return Err(invalid());
    }
    // "5" means 500 ms, "05" means 50 ms
    let millis = number(fraction)? * 10_i64.pow(3 - fraction.len() as u32);

    let total = hours
        .checked_mul(3600)
        .and_then(|t| t.checked_add(minutes * 60 + seconds))
        .and_then(|t| t.checked_mul(1000))
        .and_then(|t| t.checked_add(millis))
        .ok_or_else(invalid)?;
    Ok(CueTime::from_millis(if negative { -total } else { total }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "1\n00:00:00,000 --> 00:00:05,000\nHello there\n\n2\n00:00:04,800 --> 00:00:06,000\nTwo\nlines\n\n3\n00:00:09,000 --> 00:00:11,000\nlast\n";

    #[test]
    fn test_parse_sample() {
        let cues = parse_srt(SAMPLE).unwrap();
        assert_eq!(cues.len(), 3);
        assert_eq!(cues[0].start.millis(), 0);
        assert_eq!(cues[0].end.millis(), 5000);
        assert_eq!(cues[1].text, "Two\nlines");
        assert_eq!(cues[2].sequence_index, 3);
        assert_eq!(cues[2].start.millis(), 9000);
    }

    #[test]
    fn test_parse_crlf_bom_and_extra_blank_lines() {
        let content = "\u{feff}\r\n1\r\n00:00:01,000 --> 00:00:02,500\r\nHi\r\n\r\n\r\n2\r\n00:01:00,000 --> 00:01:01,000 X1:10 X2:20\r\nBye\r\n";
        let cues = parse_srt(content).unwrap();
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[0].text, "Hi");
        assert_eq!(cues[1].start.millis(), 60_000);
        assert_eq!(cues[1].end.millis(), 61_000);
    }

    #[test]
    fn test_parse_without_index_lines() {
        let cues = parse_srt("00:00:01,000 --> 00:00:02,000\nno index\n").unwrap();
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].sequence_index, 1);
    }

    #[test]
    fn test_parse_empty_document() {
        assert!(parse_srt("").unwrap().is_empty());
        assert!(parse_srt("\n\n").unwrap().is_empty());
    }

    #[test]
    fn test_parse_reports_line_of_bad_timing() {
        let err = parse_srt("1\n00:00:01,000 --> garbage\ntext\n").unwrap_err();
        match err {
            SplitterError::MalformedCue { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }

        let err = parse_srt("1\njust text\n").unwrap_err();
        assert!(matches!(err, SplitterError::MalformedCue { line: 1, .. }));
    }

    #[test]
    fn test_parse_timestamp_variants() {
        assert_eq!(parse_timestamp("01:02:03,004").unwrap().millis(), 3_723_004);
        assert_eq!(parse_timestamp("00:00:01.5").unwrap().millis(), 1500);
        assert_eq!(parse_timestamp("00:00:01").unwrap().millis(), 1000);
        assert_eq!(parse_timestamp("-00:00:01,200").unwrap().millis(), -1200);
        assert_eq!(parse_timestamp("100:00:00,000").unwrap().millis(), 360_000_000);
        assert!(parse_timestamp("00:61:00,000").is_err());
        assert!(parse_timestamp("00:00:00,1234").is_err());
        assert!(parse_timestamp("1:2").is_err());
        assert!(parse_timestamp("aa:bb:cc,ddd").is_err());
    }

    #[test]
    fn test_oversized_hours_are_rejected() {
        assert!(matches!(
            parse_timestamp("99999999999999999:00:00,000"),
            Err(SplitterError::InvalidTimestamp { .. })
        ));

        let err = parse_srt("1\n99999999999999999:00:00,000 --> 99999999999999999:00:01,000\nx\n\n")
            .unwrap_err();
        assert!(matches!(err, SplitterError::MalformedCue { line: 2, .. }));
    }

    #[test]
    fn test_render_uses_standard_layout() {
        let cues = vec![
            SubtitleCue::new(1, CueTime::from_millis(0), CueTime::from_millis(1500), "a"),
            SubtitleCue::new(2, CueTime::from_millis(-200), CueTime::from_millis(3000), "b\nc"),
        ];
        assert_eq!(
            render_srt(&cues),
            "1\n00:00:00,000 --> 00:00:01,500\na\n\n2\n-00:00:00,200 --> 00:00:03,000\nb\nc\n\n"
        );
    }

    #[test]
    fn test_render_empty_track_parses_back_to_nothing() {
        let rendered = render_srt(&[]);
        assert!(rendered.is_empty());
        assert!(parse_srt(&rendered).unwrap().is_empty());
    }

    #[test]
    fn test_rendered_negative_cue_reads_back() {
        let cues = vec![SubtitleCue::new(
            1,
            CueTime::from_millis(-1000),
            CueTime::from_millis(1000),
            "straddles",
        )];
        let parsed = parse_srt(&render_srt(&cues)).unwrap();
        assert_eq!(parsed, cues);
    }
}
