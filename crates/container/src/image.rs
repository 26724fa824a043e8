// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Image presence state machine: `Absent -> Built -> Outdated`.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::ContainerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImagePresence {
    Absent,
    Built,
    Outdated,
}

/// Parses a `docker inspect -f "{{ .Created }}"` timestamp, trying the
/// formats engines are observed to emit in order, then a normalizing
/// fallback that strips sub-second precision and any trailing
/// space-separated offset before retrying the bare second-precision format.
/// Exhausting every attempt is a hard error — an unparsable timestamp must
/// never be silently treated as "up to date".
pub fn parse_image_timestamp(raw: &str) -> Result<DateTime<Utc>, ContainerError> {
    let attempts: [fn(&str) -> Option<DateTime<Utc>>; 3] = [
        |s| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.fZ")
                .ok()
                .map(|d| d.and_utc())
        },
        |s| {
            NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%SZ")
                .ok()
                .map(|d| d.and_utc())
        },
        |s| {
            // Strip fractional seconds and any trailing offset/zone name,
            // then join the date and time halves with 'T'.
            let without_fraction = s.split('.').next().unwrap_or(s).trim();
            let normalized = match without_fraction.split_once(' ') {
                Some((date, time)) => format!("{date}T{time}"),
                None => without_fraction.to_string(),
            };
            let normalized = if normalized.ends_with('Z') {
                normalized
            } else {
                format!("{normalized}Z")
            };
            NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%SZ")
                .ok()
                .map(|d| d.and_utc())
        },
    ];

    for attempt in attempts {
        if let Some(parsed) = attempt(raw.trim()) {
            return Ok(parsed);
        }
    }

    Err(ContainerError::ImageTimestampUnparsable {
        raw: raw.to_string(),
    })
}

/// `image_created < dockerfile_mtime` => Outdated.
pub fn classify_presence(
    image_created: Option<DateTime<Utc>>,
    dockerfile_mtime: Option<DateTime<Utc>>,
) -> ImagePresence {
    match (image_created, dockerfile_mtime) {
        (None, _) => ImagePresence::Absent,
        (Some(_), None) => ImagePresence::Built,
        (Some(created), Some(mtime)) if created < mtime => ImagePresence::Outdated,
        (Some(_), Some(_)) => ImagePresence::Built,
    }
}

#[cfg(test)]
#[path = "image_tests.rs"]
mod tests;
