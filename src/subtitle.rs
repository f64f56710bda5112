use std::{fs, path::Path};

use crate::core::{Caption, Timestamp, Track, YomimakuError};

/// CSS rule giving ruby readings an opaque backdrop so they stay legible over
/// video. Appended as an extra STYLE block to every track we write.
pub const RUBY_BACKGROUND_STYLE: &str =
    "::cue(rt) {\n    background-color: rgba(0,0,0,.9);\n}";

pub fn read(path: &Path) -> Result<Track, YomimakuError> {
    let content = fs::read_to_string(path)?;
    parse(&content)
}

pub fn save(track: &Track, path: &Path) -> Result<(), YomimakuError> {
    fs::write(path, render(track))?;
    Ok(())
}

/// Parses a WebVTT document. STYLE blocks are collected, NOTE and REGION
/// blocks are skipped, everything else must be a cue.
pub fn parse(input: &str) -> Result<Track, YomimakuError> {
    let normalized = input.trim_start_matches('\u{feff}').replace("\r\n", "\n").replace('\r', "\n");

    let mut blocks = normalized
        .split("\n\n")
        .map(|block| block.trim_matches('\n'))
        .filter(|block| !block.trim().is_empty());

    let header = blocks
        .next()
        .ok_or_else(|| YomimakuError::FailedToLoadFile("empty subtitle file".to_string()))?;
    let header_line = header.lines().next().unwrap_or("");
    if header_line != "WEBVTT" && !header_line.starts_with("WEBVTT ") && !header_line.starts_with("WEBVTT\t") {
        return Err(YomimakuError::FailedToLoadFile("missing WEBVTT header".to_string()));
    }

    let mut track = Track::default();
    for block in blocks {
        let mut lines = block.lines();
        let first = lines.next().unwrap_or("");

        if first == "STYLE" {
            track.styles.push(lines.collect::<Vec<&str>>().join("\n"));
            continue;
        }
        if first == "NOTE" || first.starts_with("NOTE ") || first.starts_with("REGION") {
            continue;
        }

        let (identifier, timing) = if first.contains("-->") {
            (None, first)
        } else {
            let timing = lines.next().ok_or_else(|| {
                YomimakuError::FailedToLoadFile(format!("malformed cue block: {}", first))
            })?;
            (Some(first.to_string()), timing)
        };

        let (start_raw, end_raw) = timing
            .split_once("-->")
            .ok_or_else(|| YomimakuError::FailedToLoadFile(format!("malformed cue timing: {}", timing)))?;
        let mut end_parts = end_raw.trim().splitn(2, char::is_whitespace);
        let end_time = end_parts.next().unwrap_or("");
        let settings = end_parts.next().map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        let text = lines.collect::<Vec<&str>>().join("\n");
        if let Some(stray) = text.lines().find(|line| line.contains("-->")) {
            return Err(YomimakuError::FailedToLoadFile(format!(
                "cue text contains '-->': {}",
                stray
            )));
        }

        track.captions.push(Caption {
            identifier,
            start: parse_timestamp(start_raw)?,
            end: parse_timestamp(end_time)?,
            settings,
            text,
        });
    }

    Ok(track)
}

pub fn render(track: &Track) -> String {
    let mut out = String::from("WEBVTT\n");

    for style in &track.styles {
        out.push('\n');
        out.push_str("STYLE\n");
        out.push_str(style);
        out.push('\n');
    }

    for caption in &track.captions {
        out.push('\n');
        if let Some(identifier) = &caption.identifier {
            out.push_str(identifier);
            out.push('\n');
        }
        out.push_str(&format_timestamp(caption.start));
        out.push_str(" --> ");
        out.push_str(&format_timestamp(caption.end));
        if let Some(settings) = &caption.settings {
            out.push(' ');
            out.push_str(settings);
        }
        out.push('\n');
        out.push_str(&caption.text);
        out.push('\n');
    }

    out
}

/// Accepts `HH:MM:SS.mmm` and `MM:SS.mmm` cue times.
pub fn parse_timestamp(raw: &str) -> Result<Timestamp, YomimakuError> {
    let invalid = || YomimakuError::InvalidTimestamp(raw.trim().to_string());
    let parts: Vec<&str> = raw.trim().split(':').collect();

    let (hours, minutes, seconds) = match parts.as_slice() {
        [h, m, s] => (*h, *m, *s),
        [m, s] => ("0", *m, *s),
        _ => return Err(invalid()),
    };

    let hours: f64 = hours.parse().map_err(|_| invalid())?;
    let minutes: f64 = minutes.parse().map_err(|_| invalid())?;
    let seconds: f64 = seconds.parse().map_err(|_| invalid())?;
    if hours < 0.0 || minutes < 0.0 || seconds < 0.0 {
        return Err(invalid());
    }

    Ok(Timestamp(hours * 3600.0 + minutes * 60.0 + seconds))
}

pub fn format_timestamp(timestamp: Timestamp) -> String {
    let total_millis = (timestamp.as_secs_f64() * 1000.0).round() as u64;
    let hours = total_millis / 3_600_000;
    let minutes = total_millis / 60_000 % 60;
    let seconds = (total_millis % 60_000) as f64 / 1000.0;
    format!("{:02}:{:02}:{:06.3}", hours, minutes, seconds)
}
