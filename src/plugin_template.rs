// src/plugin_template.rs

//! Template-display mode (`-r <reader> -w <writer>`).
//!
//! Prints a job skeleton with the reader and writer sections filled from
//! each plugin's `plugin_job_template.json`. A missing or unreadable plugin
//! template is not fatal: the section is `null` and a warning is logged.

use std::path::Path;

use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::config::install::PluginKind;
use crate::config::{EngineSection, Installation};
use crate::errors::Result;
use crate::fs::FileSystem;

/// Render the full template-display output.
pub fn render(
    fs: &dyn FileSystem,
    install: &Installation,
    engine: &EngineSection,
    reader: &str,
    writer: &str,
) -> Result<String> {
    let reader_section = read_plugin_template(fs, install, PluginKind::Reader, reader);
    let writer_section = read_plugin_template(fs, install, PluginKind::Writer, writer);

    let job = json!({
        "job": {
            "setting": {
                "speed": {
                    "channel": ""
                }
            },
            "content": [
                {
                    "reader": reader_section,
                    "writer": writer_section
                }
            ]
        }
    });

    let mut out = String::new();
    out.push_str(&doc_reference(engine, PluginKind::Reader, reader));
    out.push_str(&doc_reference(engine, PluginKind::Writer, writer));
    out.push('\n');
    out.push_str(
        "Please save the following configuration as a json file and use\n     \
         dxlaunch {JSON_FILE_NAME}.json\nto run the job.\n\n",
    );
    out.push_str(&to_pretty_json(&job)?);
    out.push('\n');
    Ok(out)
}

/// Print the template-display output to stdout.
pub fn show(
    fs: &dyn FileSystem,
    install: &Installation,
    engine: &EngineSection,
    reader: &str,
    writer: &str,
) -> Result<()> {
    print!("{}", render(fs, install, engine, reader, writer)?);
    Ok(())
}

fn doc_reference(engine: &EngineSection, kind: PluginKind, name: &str) -> String {
    format!(
        "Please refer to the {} document:\n\t{}/{}/{name}.html\n",
        kind.as_str(),
        engine.doc_base_url.trim_end_matches('/'),
        kind.as_str()
    )
}

fn read_plugin_template(
    fs: &dyn FileSystem,
    install: &Installation,
    kind: PluginKind,
    name: &str,
) -> Value {
    let path = install.plugin_template_path(kind, name);
    match load_json(fs, &path) {
        Ok(value) => value,
        Err(e) => {
            warn!(
                plugin = name,
                kind = kind.as_str(),
                path = %path.display(),
                error = %e,
                "cannot read plugin template"
            );
            Value::Null
        }
    }
}

fn load_json(fs: &dyn FileSystem, path: &Path) -> anyhow::Result<Value> {
    let contents = fs.read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Four-space indent; keys come out sorted because `serde_json::Map` is a
/// `BTreeMap` without the `preserve_order` feature.
fn to_pretty_json(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|e| anyhow::anyhow!("serializing job template: {e}"))?;
    Ok(String::from_utf8(buf).map_err(|e| anyhow::anyhow!("job template is not UTF-8: {e}"))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;

    fn engine() -> EngineSection {
        EngineSection::default()
    }

    #[test]
    fn found_templates_are_embedded_with_sorted_keys() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "/opt/dx/plugin/reader/streamreader/plugin_job_template.json",
            r#"{"name": "streamreader", "parameter": {"sliceRecordCount": 10, "column": []}}"#,
        );
        fs.add_file(
            "/opt/dx/plugin/writer/streamwriter/plugin_job_template.json",
            r#"{"name": "streamwriter", "parameter": {"print": true}}"#,
        );

        let out = render(
            &fs,
            &Installation::new("/opt/dx"),
            &engine(),
            "streamreader",
            "streamwriter",
        )
        .unwrap();

        assert!(out.contains("latest/reader/streamreader.html"));
        assert!(out.contains("latest/writer/streamwriter.html"));
        assert!(out.contains("    \"job\": {"));

        let column = out.find("\"column\"").unwrap();
        let slice = out.find("\"sliceRecordCount\"").unwrap();
        assert!(column < slice, "keys must be sorted");
        assert!(out.contains("\"print\": true"));
    }

    #[test]
    fn missing_template_becomes_null() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "/opt/dx/plugin/reader/mysqlreader/plugin_job_template.json",
            r#"{"name": "mysqlreader"}"#,
        );

        let out = render(
            &fs,
            &Installation::new("/opt/dx"),
            &engine(),
            "mysqlreader",
            "nosuchwriter",
        )
        .unwrap();

        assert!(out.contains("\"writer\": null"));
        assert!(out.contains("\"name\": \"mysqlreader\""));
    }

    #[test]
    fn unparseable_template_becomes_null() {
        let fs = MockFileSystem::new();
        fs.add_file(
            "/opt/dx/plugin/reader/broken/plugin_job_template.json",
            "{ not json",
        );

        let out = render(&fs, &Installation::new("/opt/dx"), &engine(), "broken", "x").unwrap();
        assert!(out.contains("\"reader\": null"));
        assert!(out.contains("\"writer\": null"));
    }
}
