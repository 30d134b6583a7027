//! Location strings: slash-normalized directory paths as shown in the address bar.
//!
//! Drive roots are written `C:/` on disk and labelled `C:\` in the tree; the
//! Unix root is `/` in both places. All helpers here are pure string functions
//! so the same rules apply to the real filesystem and to in-memory ones.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::path::{Path, PathBuf};

/// Characters escaped when a directory is reported back as a URL path
const PATH_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Separator appended to drive labels (`C:` -> `C:\`)
pub const DRIVE_LABEL_SEPARATOR: char = '\\';

/// Replace backslashes with forward slashes
pub fn slashes(input: &str) -> String {
    input.replace('\\', "/")
}

/// Is this the bare `C:` drive form (no trailing separator)?
pub fn is_bare_drive(input: &str) -> bool {
    let mut chars = input.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(letter), Some(':'), None) if letter.is_ascii_alphabetic()
    )
}

/// Append the separator a bare drive needs to be a valid location (`C:` -> `C:/`)
pub fn with_drive_separator(input: &str) -> String {
    if is_bare_drive(input) {
        format!("{input}/")
    } else {
        input.to_string()
    }
}

/// Canonical form of a location: forward slashes, no empty, `.` or `..`
/// segments, a trailing slash only on roots.
///
/// Relative inputs stay relative; `..` never climbs above a root.
pub fn normalize(input: &str) -> String {
    let input = with_drive_separator(&slashes(input.trim()));
    let Some((root, segments)) = decompose(&input) else {
        return input;
    };

    let mut kept: Vec<&str> = Vec::with_capacity(segments.len());
    for segment in &segments {
        match segment.as_str() {
            "." => {}
            ".." => {
                kept.pop();
            }
            other => kept.push(other),
        }
    }

    match root {
        Root::Drive(letter) => format!("{letter}:/{}", kept.join("/")),
        Root::Slash => format!("/{}", kept.join("/")),
        Root::Relative => kept.join("/"),
    }
}

/// Root of a decomposed location
#[derive(Debug, Clone, PartialEq, Eq)]
enum Root {
    Drive(char),
    Slash,
    Relative,
}

fn decompose(input: &str) -> Option<(Root, Vec<String>)> {
    let mut segments: Vec<String> = input
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if segments.is_empty() {
        return if input.starts_with('/') {
            Some((Root::Slash, segments))
        } else {
            None
        };
    }

    if segments[0].ends_with(':') && is_bare_drive(&segments[0]) {
        let letter = segments.remove(0).chars().next()?;
        Some((Root::Drive(letter.to_ascii_uppercase()), segments))
    } else if input.starts_with('/') {
        Some((Root::Slash, segments))
    } else {
        Some((Root::Relative, segments))
    }
}

/// Split a location into the label of its tree root and the remaining segments.
///
/// `C:/Users/bob` -> (`C:\`, [`Users`, `bob`]); `/home/bob` -> (`/`, [`home`, `bob`]).
/// Returns `None` when nothing can be decomposed (empty or relative input).
pub fn split_for_tree(location: &str) -> Option<(String, Vec<String>)> {
    let location = slashes(location);
    let parts: Vec<&str> = location.split('/').filter(|s| !s.is_empty()).collect();

    if let Some(first) = parts.first() {
        if first.ends_with(':') {
            let label = format!("{first}{DRIVE_LABEL_SEPARATOR}");
            let rest = parts[1..].iter().map(|s| s.to_string()).collect();
            return Some((label, rest));
        }
    }

    if location.starts_with('/') {
        let rest = parts.iter().map(|s| s.to_string()).collect();
        return Some(("/".to_string(), rest));
    }

    None
}

/// Join a child name onto a location
pub fn join(base: &str, name: &str) -> String {
    let base = slashes(base);
    if base.ends_with('/') {
        format!("{base}{name}")
    } else {
        format!("{base}/{name}")
    }
}

/// Parent of a location, or `None` for roots and single relative segments
pub fn parent(location: &str) -> Option<String> {
    let normalized = normalize(location);
    let (root, mut segments) = decompose(&normalized)?;
    segments.pop()?;
    Some(match root {
        Root::Drive(letter) => format!("{letter}:/{}", segments.join("/")),
        Root::Slash => format!("/{}", segments.join("/")),
        Root::Relative if segments.is_empty() => return None,
        Root::Relative => segments.join("/"),
    })
}

/// Last segment of a location (`C:/Users/bob` -> `bob`, `C:/` -> `C:\`)
pub fn file_name(location: &str) -> String {
    let normalized = normalize(location);
    match decompose(&normalized) {
        Some((Root::Drive(letter), segments)) if segments.is_empty() => {
            format!("{letter}:{DRIVE_LABEL_SEPARATOR}")
        }
        Some((Root::Slash, segments)) if segments.is_empty() => "/".to_string(),
        Some((_, segments)) => segments.last().cloned().unwrap_or_default(),
        None => normalized,
    }
}

/// Percent-decode repeatedly until the string decodes to itself.
///
/// Every change either consumes an escape or replaces an invalid byte with
/// U+FFFD (which contains no `%`), so the loop always terminates.
pub fn decode(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let decoded = percent_decode_str(&current).decode_utf8_lossy().into_owned();
        if decoded == current {
            return decoded;
        }
        current = decoded;
    }
}

/// Percent-encode a location the way a browser reports a file URL path
pub fn encode(location: &str) -> String {
    let location = slashes(location);
    let encoded = utf8_percent_encode(&location, PATH_ENCODE_SET).to_string();
    if encoded.starts_with('/') {
        encoded
    } else {
        format!("/{encoded}")
    }
}

/// Strip the leading slash a URL path puts in front of a drive letter
/// (`/C:/Users` -> `C:/Users`)
pub fn from_url_path(path: &str) -> String {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let drive = trimmed.split('/').next().unwrap_or_default();
    if is_bare_drive(drive) {
        trimmed.to_string()
    } else {
        path.to_string()
    }
}

/// Location string for a filesystem path
pub fn of_path(path: &Path) -> String {
    normalize(&path.to_string_lossy())
}

/// Filesystem path for a location string
pub fn to_path(location: &str) -> PathBuf {
    PathBuf::from(normalize(location))
}
