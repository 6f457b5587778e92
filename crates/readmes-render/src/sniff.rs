//! Content sniffing.

use crate::content_type::OCTET_STREAM;

/// Guesses a content type from a file name and its leading bytes.
pub trait ContentSniffer: Send + Sync {
    /// Return a content type for `filename`, or `None` when nothing fits.
    fn sniff(&self, filename: &str, head: &[u8]) -> Option<String>;
}

/// Sniffer based on file extensions, shebang lines and binary detection.
///
/// Lookup order:
/// 1. the extension, via `mime_guess`
/// 2. a NUL byte anywhere in `head` means `application/octet-stream`
/// 3. a `#!` interpreter line
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultSniffer;

impl ContentSniffer for DefaultSniffer {
    fn sniff(&self, filename: &str, head: &[u8]) -> Option<String> {
        if let Some(mime) = mime_guess::from_path(filename).first() {
            return Some(mime.essence_str().to_owned());
        }
        if head.contains(&0) {
            return Some(OCTET_STREAM.to_owned());
        }
        shebang_type(head).map(str::to_owned)
    }
}

/// Map the interpreter named on a `#!` line to a content type.
fn shebang_type(head: &[u8]) -> Option<&'static str> {
    let line = head.strip_prefix(b"#!")?;
    let line = line.split(|&b| b == b'\n').next().unwrap_or_default();
    let line = std::str::from_utf8(line).ok()?;

    let mut words = line.split_whitespace();
    let mut program = words.next()?.rsplit('/').next()?;
    if program == "env" {
        program = words.find(|w| !w.starts_with('-'))?;
    }
    let program = program.trim_end_matches(|c: char| c.is_ascii_digit() || c == '.');

    match program {
        "python" => Some("text/x-python"),
        "sh" | "bash" | "zsh" | "ksh" => Some("application/x-sh"),
        "perl" => Some("text/x-perl"),
        "ruby" => Some("text/x-ruby"),
        "node" | "nodejs" => Some("text/javascript"),
        _ => None,
    }
}
