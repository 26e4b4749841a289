// src/config/model.rs

use serde::Deserialize;

use crate::command::CommandTemplate;

/// Default shape of the engine invocation.
pub const DEFAULT_COMMAND_TEMPLATE: &str = "${java} -server ${jvm} -classpath ${classpath} ${params} ${entry} -mode ${mode} -jobid ${jobid} -job ${job}";

/// Engine profile as read from `conf/launcher.toml`.
///
/// ```toml
/// [engine]
/// name = "Addax"
/// prefix = "addax"
/// entry_point = "com.wgzhao.addax.core.Engine"
/// ```
///
/// Every key is optional; a missing file yields the DataX defaults.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct RawLauncherConfig {
    #[serde(default)]
    pub engine: EngineSection,
}

/// `[engine]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineSection {
    /// Product name shown by `--version`.
    #[serde(default = "default_name")]
    pub name: String,

    /// Used for `-D<prefix>.home`, `-D<prefix>.log`, the log file name and
    /// the `lib/<prefix>-core-<version>.jar` lookup.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default = "default_java")]
    pub java: String,

    /// Main class of the engine.
    #[serde(default = "default_entry_point")]
    pub entry_point: String,

    /// Classpath entries placed ahead of `lib/*`.
    #[serde(default = "default_extra_classpath")]
    pub extra_classpath: Vec<String>,

    #[serde(default = "default_heap_flags")]
    pub heap_flags: String,

    #[serde(default = "default_file_encoding")]
    pub file_encoding: String,

    /// Appended to the runtime flags by `--debug`.
    #[serde(default = "default_remote_debug")]
    pub remote_debug: String,

    #[serde(default = "default_command_template")]
    pub command_template: String,

    /// Root of the plugin documentation, shown in template-display mode.
    #[serde(default = "default_doc_base_url")]
    pub doc_base_url: String,

    /// Delay between the graceful quit request and the forced kill.
    #[serde(default = "default_grace_period_ms")]
    pub grace_period_ms: u64,
}

fn default_name() -> String {
    "DataX".to_string()
}

fn default_prefix() -> String {
    "datax".to_string()
}

fn default_java() -> String {
    "java".to_string()
}

fn default_entry_point() -> String {
    "com.wgzhao.datax.core.Engine".to_string()
}

fn default_extra_classpath() -> Vec<String> {
    if cfg!(unix) {
        vec!["/etc/hbase/conf".to_string()]
    } else {
        Vec::new()
    }
}

fn default_heap_flags() -> String {
    "-Xms64m -Xmx2g".to_string()
}

fn default_file_encoding() -> String {
    "UTF-8".to_string()
}

fn default_remote_debug() -> String {
    "-Xdebug -Xrunjdwp:transport=dt_socket,server=y,address=9999".to_string()
}

fn default_command_template() -> String {
    DEFAULT_COMMAND_TEMPLATE.to_string()
}

fn default_doc_base_url() -> String {
    "https://datax.readthedocs.io/zh_CN/latest".to_string()
}

fn default_grace_period_ms() -> u64 {
    1000
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            prefix: default_prefix(),
            java: default_java(),
            entry_point: default_entry_point(),
            extra_classpath: default_extra_classpath(),
            heap_flags: default_heap_flags(),
            file_encoding: default_file_encoding(),
            remote_debug: default_remote_debug(),
            command_template: default_command_template(),
            doc_base_url: default_doc_base_url(),
            grace_period_ms: default_grace_period_ms(),
        }
    }
}

/// Validated engine profile.
///
/// Only constructible through `TryFrom<RawLauncherConfig>` (see
/// [`crate::config::validate`]), so the template is known to parse.
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    pub engine: EngineSection,
    pub template: CommandTemplate,
}

impl LauncherConfig {
    pub(crate) fn new_unchecked(engine: EngineSection, template: CommandTemplate) -> Self {
        Self { engine, template }
    }

    pub fn grace_period(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.engine.grace_period_ms)
    }
}
