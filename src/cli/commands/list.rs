//! List command implementation.
//!
//! The `featprobe list` command shows every probe group in the manifest
//! and the macro each variant would define, without running a compiler.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cli::args::ListArgs;
use crate::config::{load_manifest, Check};
use crate::error::Result;
use crate::ui::ProbeReporter;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    manifest: PathBuf,
    args: ListArgs,
}

/// One group as shown by `list`.
#[derive(Debug, Serialize)]
pub struct GroupSummary {
    pub name: String,
    pub required: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    pub variants: Vec<VariantSummary>,
}

/// One variant as shown by `list`.
#[derive(Debug, Serialize)]
pub struct VariantSummary {
    pub name: String,
    pub kind: &'static str,
    #[serde(rename = "macro")]
    pub macro_name: String,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(manifest: &Path, args: ListArgs) -> Self {
        Self {
            manifest: manifest.to_path_buf(),
            args,
        }
    }

}

/// Summarize checks for display.
pub fn summarize(checks: &[Check]) -> Vec<GroupSummary> {
    checks
        .iter()
        .map(|check| GroupSummary {
            name: check.name().to_string(),
            required: check.is_mandatory(),
            message: check.failure_message().to_string(),
            variants: check
                .specs()
                .into_iter()
                .map(|v| VariantSummary {
                    name: v.identifier().to_string(),
                    kind: v.kind().label(),
                    macro_name: v.macro_identifier().to_string(),
                })
                .collect(),
        })
        .collect()
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn ProbeReporter) -> Result<CommandResult> {
        let manifest = load_manifest(&self.manifest)?;
        let summaries = summarize(&manifest.to_checks()?);

        if self.args.json {
            let json = serde_json::to_string_pretty(&summaries).map_err(anyhow::Error::from)?;
            println!("{}", json);
            return Ok(CommandResult::success());
        }

        for group in &summaries {
            let status = if group.required { "required" } else { "optional" };
            ui.message(&format!("{} ({})", group.name, status));
            for variant in &group.variants {
                ui.message(&format!(
                    "  {:<8} {} -> {}",
                    variant.kind, variant.name, variant.macro_name
                ));
            }
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockReporter;
    use std::fs;
    use tempfile::TempDir;

    fn setup_manifest(content: &str) -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("probes.yml");
        fs::write(&path, content).unwrap();
        (temp, path)
    }

    const MANIFEST: &str = r#"
checks:
  - kind: header
    required: true
    message: thread required.
    candidates: [thread]
  - kind: code
    candidates:
      - name: std::shared_ptr
        header: [memory]
        struct: std::shared_ptr<int>
"#;

    #[test]
    fn lists_groups_with_macros() {
        let (_temp, path) = setup_manifest(MANIFEST);
        let cmd = ListCommand::new(&path, ListArgs::default());
        let mut ui = MockReporter::new();

        let result = cmd.execute(&mut ui).unwrap();
        assert!(result.success);
        assert_eq!(
            ui.messages(),
            [
                "thread (required)",
                "  header   thread -> HAVE_THREAD",
                "std::shared_ptr (optional)",
                "  type     std::shared_ptr -> HAVE_STD_SHARED_PTR",
            ]
        );
        assert!(ui.lines().is_empty());
    }

    #[test]
    fn summaries_serialize_to_json() {
        let (_temp, path) = setup_manifest(MANIFEST);
        let checks = load_manifest(&path).unwrap().to_checks().unwrap();
        let json = serde_json::to_value(summarize(&checks)).unwrap();

        assert_eq!(json[0]["name"], "thread");
        assert_eq!(json[0]["required"], true);
        assert_eq!(json[0]["message"], "thread required.");
        assert_eq!(json[1]["variants"][0]["macro"], "HAVE_STD_SHARED_PTR");
        assert!(json[1].get("message").is_none());
    }

    #[test]
    fn missing_manifest_is_an_error() {
        let temp = TempDir::new().unwrap();
        let cmd = ListCommand::new(&temp.path().join("nope.yml"), ListArgs::default());
        let mut ui = MockReporter::new();
        assert!(cmd.execute(&mut ui).is_err());
    }

    #[test]
    fn pairs_list_header_then_library() {
        let (_temp, path) = setup_manifest(
            "checks:\n  - kind: lib_and_header\n    candidates:\n      - { name: z, header: [zlib.h] }\n",
        );
        let mut ui = MockReporter::new();

        ListCommand::new(&path, ListArgs::default())
            .execute(&mut ui)
            .unwrap();
        assert_eq!(
            ui.messages(),
            [
                "z (optional)",
                "  header   zlib.h -> HAVE_ZLIB_H",
                "  lib      z -> HAVE_Z",
            ]
        );
    }
}
