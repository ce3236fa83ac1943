//! Scoped cleanup of toolchain artifacts.

use std::path::Path;

use super::Toolchain;

/// Removes a probe's object, debug, and binary artifacts when dropped.
///
/// Created before the toolchain runs so cleanup happens on every exit
/// path, including early returns and errors.
pub struct ArtifactGuard<'a> {
    toolchain: &'a dyn Toolchain,
    workdir: &'a Path,
    stem: &'a str,
}

impl<'a> ArtifactGuard<'a> {
    /// Guard the artifacts `toolchain` produces for `stem` in `workdir`.
    pub fn new(toolchain: &'a dyn Toolchain, workdir: &'a Path, stem: &'a str) -> Self {
        Self {
            toolchain,
            workdir,
            stem,
        }
    }
}

impl Drop for ArtifactGuard<'_> {
    fn drop(&mut self) {
        self.toolchain.cleanup_artifacts(self.workdir, self.stem);
    }
}

/// Remove each artifact `toolchain` declares for `stem`, ignoring missing files.
pub fn remove_artifacts<T: Toolchain + ?Sized>(toolchain: &T, workdir: &Path, stem: &str) {
    for path in toolchain.artifacts(workdir, stem) {
        match std::fs::remove_file(&path) {
            Ok(()) => tracing::trace!("Removed {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!("Failed to remove {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct ObjectOnly;

    impl Toolchain for ObjectOnly {
        fn name(&self) -> &str {
            "object-only"
        }

        fn compile_only(&self, _source: &Path, _workdir: &Path, _stem: &str) -> Result<bool> {
            Ok(true)
        }

        fn link(&self, _source: &Path, _workdir: &Path, _stem: &str, _target: &str) -> Result<bool> {
            Ok(true)
        }

        fn artifacts(&self, workdir: &Path, stem: &str) -> Vec<PathBuf> {
            vec![workdir.join(format!("{stem}.o")), workdir.join(stem)]
        }
    }

    #[test]
    fn guard_removes_artifacts_on_drop() {
        let temp = TempDir::new().unwrap();
        let object = temp.path().join("mmap.o");
        let binary = temp.path().join("mmap");
        fs::write(&object, "obj").unwrap();
        fs::write(&binary, "bin").unwrap();

        {
            let _guard = ArtifactGuard::new(&ObjectOnly, temp.path(), "mmap");
            assert!(object.exists());
        }

        assert!(!object.exists());
        assert!(!binary.exists());
    }

    #[test]
    fn guard_leaves_sources_alone() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("mmap.cc");
        fs::write(&source, "int main() {}").unwrap();

        drop(ArtifactGuard::new(&ObjectOnly, temp.path(), "mmap"));

        assert!(source.exists());
    }

    #[test]
    fn missing_artifacts_are_ignored() {
        let temp = TempDir::new().unwrap();
        remove_artifacts(&ObjectOnly, temp.path(), "never_built");
    }

    #[test]
    fn guard_runs_on_early_return() {
        let temp = TempDir::new().unwrap();
        let object = temp.path().join("early.o");

        fn fails(workdir: &Path, object: &Path) -> Result<()> {
            let _guard = ArtifactGuard::new(&ObjectOnly, workdir, "early");
            fs::write(object, "obj")?;
            Err(crate::error::ProbeError::ManifestInvalid {
                message: "boom".into(),
            })
        }

        assert!(fails(temp.path(), &object).is_err());
        assert!(!object.exists());
    }
}
