// src/config/install.rs

//! Installation root and the paths derived from it.
//!
//! Layout expected below the root:
//!
//! ```text
//! <home>/bin/dxlaunch
//! <home>/conf/launcher.toml        (optional engine profile)
//! <home>/conf/logback.xml          (passed to the engine, never read here)
//! <home>/lib/<prefix>-core-<version>.jar
//! <home>/log/
//! <home>/plugin/{reader,writer}/<name>/plugin_job_template.json
//! ```

use std::path::{Path, PathBuf};

use crate::errors::{LauncherError, Result};
use crate::fs::FileSystem;

/// Environment variable overriding the executable-relative root.
pub const HOME_ENV: &str = "DXLAUNCH_HOME";

/// Plugin kind for template lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginKind {
    Reader,
    Writer,
}

impl PluginKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PluginKind::Reader => "reader",
            PluginKind::Writer => "writer",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
    home: PathBuf,
}

impl Installation {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Locate the installation root.
    ///
    /// `DXLAUNCH_HOME` wins when set and non-empty; otherwise the root is
    /// the parent of the directory holding the running executable.
    pub fn discover() -> Result<Self> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::new(home));
        }

        let exe = std::env::current_exe()?;
        let home = exe
            .parent()
            .and_then(Path::parent)
            .ok_or_else(|| {
                LauncherError::Config(format!(
                    "cannot derive installation root from executable {:?}; set {HOME_ENV}",
                    exe
                ))
            })?;
        Ok(Self::new(home))
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn lib_dir(&self) -> PathBuf {
        self.home.join("lib")
    }

    pub fn profile_path(&self) -> PathBuf {
        self.home.join("conf").join("launcher.toml")
    }

    pub fn logback_file(&self) -> PathBuf {
        self.home.join("conf").join("logback.xml")
    }

    pub fn default_log_dir(&self) -> PathBuf {
        self.home.join("log")
    }

    pub fn plugin_template_path(&self, kind: PluginKind, name: &str) -> PathBuf {
        self.home
            .join("plugin")
            .join(kind.as_str())
            .join(name)
            .join("plugin_job_template.json")
    }

    /// Engine classpath: `extra` entries, `lib/*`, then `.` on unix.
    pub fn classpath(&self, extra: &[String]) -> String {
        let (separator, cwd_entry) = if cfg!(windows) { (";", None) } else { (":", Some(".")) };

        let lib_glob = self.lib_dir().join("*");
        let mut entries: Vec<String> = extra.to_vec();
        entries.push(lib_glob.to_string_lossy().into_owned());
        entries.extend(cwd_entry.map(str::to_string));
        entries.join(separator)
    }

    /// Version embedded in `lib/<prefix>-core-<version>.jar`, if present.
    ///
    /// The first match in directory order wins.
    pub fn core_version(&self, fs: &dyn FileSystem, prefix: &str) -> Option<String> {
        let jar_prefix = format!("{prefix}-core-");
        let entries = fs.read_dir(&self.lib_dir()).ok()?;

        entries.iter().find_map(|path| {
            let name = path.file_name()?.to_str()?;
            let version = name.strip_prefix(&jar_prefix)?.strip_suffix(".jar")?;
            Some(version.to_string())
        })
    }
}
