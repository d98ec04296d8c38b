//! Inspection and debugging tools for tapframe messages.
//!
//! This crate provides utilities for looking at raw frames:
//!
//! - Split a frame into status, header and payload
//! - Report sizes and the sentinel state as JSON or plain text
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Make it easy to see how a buffer is framed.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::Serialize;
use wire::{build_frame, decode_message, Limits, STATUS_NONE};

/// Summary of one framed buffer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectReport {
    /// Message kind name, when known to the caller.
    pub kind: Option<String>,
    pub header_len: usize,
    pub frame_len: usize,
    pub status: u8,
    /// `true` when the status equals the reserved "no data" value.
    pub status_is_sentinel: bool,
    pub header_hex: String,
    pub payload_len: usize,
    pub payload_hex: Option<String>,
}

/// Frames `bytes` with the given header length and reports its layout.
pub fn inspect_frame(bytes: &[u8], header_len: usize, limits: &Limits) -> Result<InspectReport> {
    let msg = decode_message(bytes.to_vec(), header_len, limits)
        .with_context(|| format!("decode frame with {header_len}-byte header"))?;
    let status = msg.status();
    Ok(InspectReport {
        kind: None,
        header_len,
        frame_len: bytes.len(),
        status,
        status_is_sentinel: status == STATUS_NONE,
        header_hex: msg.header().map(to_hex).unwrap_or_default(),
        payload_len: msg.payload_len(),
        payload_hex: msg.payload_slice().map(to_hex),
    })
}

/// Returns the payload of a frame, empty when the frame carries none.
pub fn split_payload(bytes: Vec<u8>, header_len: usize) -> Result<Vec<u8>> {
    let msg = decode_message(bytes, header_len, &Limits::unlimited())
        .with_context(|| format!("decode frame with {header_len}-byte header"))?;
    Ok(msg.payload().unwrap_or_default())
}

/// Composes a frame from a status byte, the header bytes after it, and a
/// payload. Missing header bytes are zero-filled.
pub fn compose_frame(
    header_len: usize,
    status: u8,
    header_rest: Option<&[u8]>,
    payload: &[u8],
) -> Result<Vec<u8>> {
    anyhow::ensure!(
        header_len > 0,
        "header length must be at least 1 to hold the status byte"
    );
    let mut header = Vec::with_capacity(header_len);
    header.push(status);
    match header_rest {
        Some(rest) => header.extend_from_slice(rest),
        None => header.resize(header_len, 0),
    }
    build_frame(&header, payload, header_len).context("build frame")
}

/// Lists the regular files of `dir` in path order, keeping those whose path
/// or file name matches `glob` when one is given.
pub fn collect_frame_paths(dir: &Path, glob: Option<&str>) -> Result<Vec<PathBuf>> {
    let pattern = glob
        .map(|value| Pattern::new(value).context("invalid glob pattern"))
        .transpose()?;
    let keep = |path: &Path| {
        pattern.as_ref().map_or(true, |pattern| {
            pattern.matches_path(path)
                || path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| pattern.matches(name))
        })
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let path = entry?.path();
        if path.is_file() && keep(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Formats a report as indented plain text.
pub fn format_inspect_pretty(report: &InspectReport) -> String {
    let mut out = String::new();
    if let Some(kind) = &report.kind {
        let _ = writeln!(out, "kind: {kind}");
    }
    let sentinel = if report.status_is_sentinel {
        " (no data)"
    } else {
        ""
    };
    let _ = writeln!(out, "status: 0x{:02x}{sentinel}", report.status);
    let _ = writeln!(
        out,
        "frame: {} bytes (header {} + payload {})",
        report.frame_len, report.header_len, report.payload_len
    );
    let _ = writeln!(out, "header: {}", report.header_hex);
    match &report.payload_hex {
        Some(hex) => {
            let _ = writeln!(out, "payload: {hex}");
        }
        None => out.push_str("payload: none\n"),
    }
    out
}

/// Lowercase hex encoding without separators.
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Parses a hex string (whitespace ignored, optional `0x` prefix).
pub fn parse_hex(input: &str) -> Result<Vec<u8>> {
    let digits: String = input
        .trim()
        .trim_start_matches("0x")
        .trim_start_matches("0X")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    anyhow::ensure!(digits.is_ascii(), "hex string contains non-ASCII characters");
    anyhow::ensure!(
        digits.len() % 2 == 0,
        "hex string has odd length {}",
        digits.len()
    );
    (0..digits.len())
        .step_by(2)
        .map(|idx| {
            u8::from_str_radix(&digits[idx..idx + 2], 16)
                .with_context(|| format!("invalid hex byte at offset {idx}"))
        })
        .collect()
}

/// Parses a status byte given as decimal or `0x`-prefixed hex.
pub fn parse_status(input: &str) -> Result<u8> {
    let value = match input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => input.parse(),
    };
    value.with_context(|| format!("invalid status byte {input:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inspect_reports_layout() {
        let report = inspect_frame(&[0x03, 0x00, 0xAA, 0xBB], 2, &Limits::default()).unwrap();
        assert_eq!(report.status, 0x03);
        assert!(!report.status_is_sentinel);
        assert_eq!(report.header_hex, "0300");
        assert_eq!(report.payload_len, 2);
        assert_eq!(report.payload_hex.as_deref(), Some("aabb"));
        assert_eq!(report.frame_len, 4);
    }

    #[test]
    fn inspect_header_only_frame() {
        let report = inspect_frame(&[0x01, 0x02], 2, &Limits::default()).unwrap();
        assert_eq!(report.payload_len, 0);
        assert_eq!(report.payload_hex, None);
    }

    #[test]
    fn inspect_empty_frame_is_sentinel() {
        let report = inspect_frame(&[], 0, &Limits::default()).unwrap();
        assert!(report.status_is_sentinel);
        assert_eq!(report.header_hex, "");
    }

    #[test]
    fn inspect_rejects_short_frame() {
        let err = inspect_frame(&[0x01], 4, &Limits::default()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("4-byte header"));
        assert!(msg.contains("too short"));
    }

    #[test]
    fn inspect_honours_limits() {
        let err = inspect_frame(&[0u8; 300], 1, &Limits::for_testing()).unwrap_err();
        assert!(format!("{err:#}").contains("frame bytes"));
    }

    #[test]
    fn report_serializes_to_json() {
        let report = inspect_frame(&[0x05, 0x01], 1, &Limits::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], 5);
        assert_eq!(json["payload_hex"], "01");
        assert_eq!(json["kind"], serde_json::Value::Null);
    }

    #[test]
    fn pretty_format_lines() {
        let mut report = inspect_frame(&[0x05, 0x01], 1, &Limits::default()).unwrap();
        report.kind = Some("ack".to_string());
        let text = format_inspect_pretty(&report);
        assert!(text.contains("kind: ack"));
        assert!(text.contains("status: 0x05"));
        assert!(text.contains("payload: 01"));
    }

    #[test]
    fn hex_roundtrip() {
        assert_eq!(to_hex(&[0x00, 0x0f, 0xff]), "000fff");
        assert_eq!(parse_hex("0x00 0f ff").unwrap(), vec![0x00, 0x0f, 0xff]);
        assert!(parse_hex("abc").is_err());
        assert!(parse_hex("zz").is_err());
    }

    #[test]
    fn status_parsing() {
        assert_eq!(parse_status("3").unwrap(), 3);
        assert_eq!(parse_status("0x7e").unwrap(), 0x7E);
        assert_eq!(parse_status("0X7E").unwrap(), 0x7E);
        assert!(parse_status("256").is_err());
    }

    #[test]
    fn hex_accepts_uppercase_prefix() {
        assert_eq!(parse_hex("0XAB01").unwrap(), vec![0xAB, 0x01]);
    }

    #[test]
    fn split_header_only_frame_is_empty() {
        assert_eq!(split_payload(vec![0x01, 0x02], 2).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn split_returns_payload() {
        let payload = split_payload(vec![0x01, 0x02, 0xAA, 0xBB], 2).unwrap();
        assert_eq!(payload, vec![0xAA, 0xBB]);
    }

    #[test]
    fn split_rejects_short_frame() {
        let err = split_payload(vec![0x01], 2).unwrap_err();
        assert!(format!("{err:#}").contains("too short"));
    }

    #[test]
    fn compose_zero_fills_header() {
        let frame = compose_frame(3, 0x01, None, b"ok").unwrap();
        assert_eq!(frame, vec![0x01, 0x00, 0x00, b'o', b'k']);
    }

    #[test]
    fn compose_with_header_rest() {
        let frame = compose_frame(2, 0x02, Some(&[0x09]), &[]).unwrap();
        assert_eq!(frame, vec![0x02, 0x09]);
    }

    #[test]
    fn compose_rejects_zero_header_len() {
        let err = compose_frame(0, 0x01, None, b"x").unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn compose_rejects_reserved_status() {
        let err = compose_frame(1, STATUS_NONE, None, &[]).unwrap_err();
        assert!(format!("{err:#}").contains("reserved"));
    }

    #[test]
    fn collect_paths_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c.bin", "a.bin", "b.txt"] {
            fs::write(dir.path().join(name), [0x01]).unwrap();
        }
        fs::create_dir(dir.path().join("nested.bin")).unwrap();

        let all = collect_frame_paths(dir.path(), None).unwrap();
        let names: Vec<_> = all
            .iter()
            .map(|path| path.file_name().unwrap().to_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.bin", "b.txt", "c.bin"]);

        let filtered = collect_frame_paths(dir.path(), Some("*.bin")).unwrap();
        assert_eq!(
            filtered,
            vec![dir.path().join("a.bin"), dir.path().join("c.bin")]
        );
    }

    #[test]
    fn collect_paths_rejects_bad_glob() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collect_frame_paths(dir.path(), Some("[")).is_err());
    }
}
