use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::Path;

static HOSTNAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?i)[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?(\.[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?)*$")
        .expect("hostname regex")
});

pub fn ensure_dir(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Longest target fragment kept in a run directory name.
const MAX_DIR_TARGET: usize = 64;

/// Target as it appears in a directory name. Anything outside `[A-Za-z0-9._-]` becomes `_`;
/// altered or overlong targets are cut to [`MAX_DIR_TARGET`] and get a short sha256 suffix.
pub fn dir_safe_target(target: &str) -> String {
    let cleaned: String = target
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    if !cleaned.is_empty() && cleaned == target && cleaned.len() <= MAX_DIR_TARGET {
        return cleaned;
    }
    let digest = Sha256::digest(target.as_bytes());
    let suffix: String = digest.iter().take(4).map(|b| format!("{:02x}", b)).collect();
    let head: String = cleaned.chars().take(MAX_DIR_TARGET).collect();
    format!("{}-{}", head, suffix)
}

/// `<prefix>_<target>_<YYYYmmdd_HHMMSS>` using UTC, target passed through [`dir_safe_target`].
pub fn run_dir_name(prefix: &str, target: &str, now: DateTime<Utc>) -> String {
    let ts = now.format("%Y%m%d_%H%M%S");
    format!("{}_{}_{}", prefix, dir_safe_target(target), ts)
}

pub fn looks_like_hostname(target: &str) -> bool {
    target.len() <= 253 && HOSTNAME_RE.is_match(target)
}

/// Single-quote `arg` for `sh -c` unless it only holds characters the shell treats literally.
pub fn shell_quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ',' | '/' | ':' | '@' | '=' | '+'));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// [`shell_quote`] for arguments that may not be UTF-8, such as paths. Raw bytes are quoted
/// as-is on unix.
pub fn shell_quote_os(arg: &OsStr) -> OsString {
    if let Some(s) = arg.to_str() {
        return OsString::from(shell_quote(s));
    }
    quote_bytes(arg)
}

#[cfg(unix)]
fn quote_bytes(arg: &OsStr) -> OsString {
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    let mut out = Vec::with_capacity(arg.len() + 2);
    out.push(b'\'');
    for &b in arg.as_bytes() {
        if b == b'\'' {
            out.extend_from_slice(br"'\''");
        } else {
            out.push(b);
        }
    }
    out.push(b'\'');
    OsString::from_vec(out)
}

#[cfg(not(unix))]
fn quote_bytes(arg: &OsStr) -> OsString {
    OsString::from(shell_quote(&arg.to_string_lossy()))
}
