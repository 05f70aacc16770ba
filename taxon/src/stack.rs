//! # Stack Capture
//!
//! Builds the `stack` string stored on every instance: a `"<name>: <message>"`
//! header followed by `    at ...` lines. Frames belonging to the capture
//! itself and to the creator machinery are dropped, so the first line after
//! the header is always the code that asked for the error.

use serde::{Deserialize, Serialize};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::panic::Location;

/// Maximum number of frames kept after the caller's frame
pub const MAX_STACK_FRAMES: usize = 64;

/// Symbol prefixes treated as capture machinery when the caller's frame
/// cannot be located by file and line.
const MACHINERY_PREFIXES: &[&str] = &[
    "std::backtrace",
    "<std::backtrace",
    "std::backtrace_rs",
    "taxon::stack::",
    "taxon::instance::",
    "taxon::variant::",
    "<taxon::",
];

/// How much of the call stack a variant records on each instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackCapture {
    /// Only the caller's source location
    Caller,
    /// A backtrace when the environment enables one (`RUST_BACKTRACE` /
    /// `RUST_LIB_BACKTRACE`), otherwise the caller's location
    #[default]
    Backtrace,
    /// Always capture a full backtrace
    Force,
}

/// Capture the stack for an instance being built at `caller`.
pub(crate) fn capture(mode: StackCapture, header: &str, caller: &Location<'_>) -> String {
    let backtrace = match mode {
        StackCapture::Caller => None,
        StackCapture::Backtrace => Some(Backtrace::capture()),
        StackCapture::Force => Some(Backtrace::force_capture()),
    };

    let frames = backtrace
        .filter(|bt| bt.status() == BacktraceStatus::Captured)
        .map(|bt| caller_frames(&bt.to_string(), caller))
        .unwrap_or_default();

    render(header, &frames, caller)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Frame {
    symbol: String,
    location: Option<String>,
}

/// Parse the text form of a `std::backtrace::Backtrace`.
///
/// Numbered lines (`  3: crate::func`) and un-numbered inlined lines both
/// start a frame; the first `at file:line:col` line after a symbol is its
/// location.
fn parse_frames(text: &str) -> Vec<Frame> {
    let mut frames: Vec<Frame> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with("note:") {
            continue;
        }

        if let Some(location) = line.strip_prefix("at ") {
            if let Some(frame) = frames.last_mut() {
                if frame.location.is_none() {
                    frame.location = Some(location.to_string());
                }
            }
            continue;
        }

        let symbol = match line.split_once(": ") {
            Some((index, rest)) if index.chars().all(|c| c.is_ascii_digit()) => rest,
            _ => line,
        };
        frames.push(Frame {
            symbol: symbol.to_string(),
            location: None,
        });
    }

    frames
}

/// Split `path:line:col` into `(path, line)`
fn split_location(location: &str) -> Option<(&str, u32)> {
    let mut parts = location.rsplitn(3, ':');
    let _column = parts.next()?;
    let line = parts.next()?.parse().ok()?;
    let file = parts.next()?;
    Some((file, line))
}

fn is_caller(frame: &Frame, caller: &Location<'_>) -> bool {
    frame
        .location
        .as_deref()
        .and_then(split_location)
        .is_some_and(|(file, line)| line == caller.line() && same_file(file, caller.file()))
}

/// Backtraces print paths relative to the crate (`./tests/x.rs`) or
/// absolute, while `Location::file` is relative to the workspace
/// (`pkg/tests/x.rs`). Two paths name the same file when one ends with the
/// other at a `/` boundary.
fn same_file(backtrace_path: &str, caller_file: &str) -> bool {
    let backtrace_path = normalize_path(backtrace_path);
    let caller_file = normalize_path(caller_file);
    ends_at_boundary(&backtrace_path, &caller_file) || ends_at_boundary(&caller_file, &backtrace_path)
}

fn normalize_path(path: &str) -> String {
    path.replace('\\', "/").trim_start_matches("./").to_string()
}

fn ends_at_boundary(path: &str, suffix: &str) -> bool {
    !suffix.is_empty()
        && path
            .strip_suffix(suffix)
            .is_some_and(|head| head.is_empty() || head.ends_with('/'))
}

fn is_machinery(symbol: &str) -> bool {
    !symbol.contains("::tests::") && MACHINERY_PREFIXES.iter().any(|p| symbol.starts_with(p))
}

/// Frames from the caller outward.
fn caller_frames(text: &str, caller: &Location<'_>) -> Vec<Frame> {
    let frames = parse_frames(text);

    let start = frames
        .iter()
        .position(|f| is_caller(f, caller))
        .or_else(|| frames.iter().position(|f| !is_machinery(&f.symbol)))
        .unwrap_or(frames.len());

    frames.into_iter().skip(start).take(MAX_STACK_FRAMES).collect()
}

fn render(header: &str, frames: &[Frame], caller: &Location<'_>) -> String {
    let mut out = String::from(header);

    if frames.is_empty() {
        out.push_str(&format!(
            "\n    at {}:{}:{}",
            caller.file(),
            caller.line(),
            caller.column()
        ));
        return out;
    }

    for frame in frames {
        match &frame.location {
            Some(location) => out.push_str(&format!("\n    at {} ({})", frame.symbol, location)),
            None => out.push_str(&format!("\n    at {}", frame.symbol)),
        }
    }
    out
}
