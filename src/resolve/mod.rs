// src/resolve/mod.rs

//! Job descriptor resolution.
//!
//! A descriptor is either an `http(s)://` URL, passed to the engine as-is,
//! or a local path, which is made absolute against the launcher's working
//! directory. Normalisation is purely lexical: the file does not have to
//! exist, and `~` is not expanded.

use std::fmt;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::errors::{LauncherError, Result};

static URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://\S+\w*").expect("valid regex"));

const FILE_SCHEME: &str = "file://";

/// Number of trailing URL characters kept in a remote display name.
const REMOTE_DISPLAY_CHARS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobTarget {
    Local(PathBuf),
    Remote(String),
}

impl JobTarget {
    /// Short, file-name-safe label used when naming the engine log file.
    ///
    /// Not unique: the log file name also carries a timestamp and pid.
    pub fn display_name(&self) -> String {
        match self {
            JobTarget::Local(path) => path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            JobTarget::Remote(url) => {
                let skip = url.chars().count().saturating_sub(REMOTE_DISPLAY_CHARS);
                url.chars()
                    .skip(skip)
                    .map(|c| if c == '/' || c == '.' { '_' } else { c })
                    .collect()
            }
        }
    }

    /// The value handed to the engine's `-job` argument.
    pub fn as_arg(&self) -> String {
        match self {
            JobTarget::Local(path) => path.to_string_lossy().into_owned(),
            JobTarget::Remote(url) => url.clone(),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, JobTarget::Remote(_))
    }
}

impl fmt::Display for JobTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_arg())
    }
}

pub fn is_url(raw: &str) -> bool {
    URL.is_match(raw)
}

/// Resolve `raw` against the current working directory.
pub fn resolve(raw: &str) -> Result<JobTarget> {
    if is_url(raw) {
        return Ok(JobTarget::Remote(raw.to_string()));
    }

    let cwd = std::env::current_dir().map_err(|source| LauncherError::Resolution {
        path: raw.to_string(),
        source,
    })?;
    Ok(resolve_in(raw, &cwd))
}

/// Resolve `raw` against an explicit base directory.
pub fn resolve_in(raw: &str, cwd: &Path) -> JobTarget {
    if is_url(raw) {
        return JobTarget::Remote(raw.to_string());
    }

    let stripped = match raw.get(..FILE_SCHEME.len()) {
        Some(scheme) if scheme.eq_ignore_ascii_case(FILE_SCHEME) => &raw[FILE_SCHEME.len()..],
        _ => raw,
    };

    JobTarget::Local(absolutize(Path::new(stripped), cwd))
}

/// Join onto `cwd` when relative, then drop `.` and fold `..` lexically.
fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                // `pop` refuses to remove the root, so `/..` stays `/`.
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
