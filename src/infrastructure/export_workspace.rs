// src/infrastructure/export_workspace.rs
//
// Export Workspace Management
//
// CRITICAL RULES:
// - One workspace directory per installation, created lazily
// - Artifact names are sanitized and timestamped; collisions are a
//   caller error, not silently overwritten data loss
// - The workspace never touches anything outside its own directory

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use regex::Regex;

use crate::error::{AppError, AppResult};

/// Directory that receives generated export artifacts.
#[derive(Debug, Clone)]
pub struct ExportWorkspace {
    root: PathBuf,
}

impl ExportWorkspace {
    /// Workspace under the platform's local data directory,
    /// falling back to the system temp directory.
    pub fn new() -> AppResult<Self> {
        let base = dirs::data_local_dir().unwrap_or_else(std::env::temp_dir);
        Self::at(base.join("bridgescope").join("exports"))
    }

    /// Workspace rooted at an explicit directory (tests, host override)
    pub fn at(root: impl Into<PathBuf>) -> AppResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Build a sanitized, timestamped artifact file name
    pub fn artifact_name(&self, dataset_name: &str, extension: &str) -> String {
        let stamp = Utc::now().format("%Y%m%d-%H%M%S");
        format!("{}-{}.{}", sanitize_file_name(dataset_name), stamp, extension)
    }

    /// Write artifact bytes and return the full path
    pub fn write_artifact(&self, file_name: &str, bytes: &[u8]) -> AppResult<PathBuf> {
        if file_name.is_empty() {
            return Err(AppError::Other("Artifact name cannot be empty".to_string()));
        }

        let path = self.root.join(file_name);
        fs::write(&path, bytes)?;
        Ok(path)
    }
}

/// Collapse anything outside [A-Za-z0-9._-] into single underscores
fn sanitize_file_name(name: &str) -> String {
    let unsafe_chars = Regex::new(r"[^A-Za-z0-9._-]+").unwrap();
    let cleaned = unsafe_chars.replace_all(name.trim(), "_");
    let cleaned = cleaned.trim_matches('_');

    if cleaned.is_empty() {
        "export".to_string()
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_artifact_creates_file() {
        let dir = TempDir::new().unwrap();
        let workspace = ExportWorkspace::at(dir.path().join("exports")).unwrap();

        let path = workspace.write_artifact("findings.csv", b"a,b\n1,2\n").unwrap();

        assert!(path.exists());
        assert_eq!(std::fs::read(&path).unwrap(), b"a,b\n1,2\n");
    }

    #[test]
    fn test_artifact_name_is_sanitized() {
        let dir = TempDir::new().unwrap();
        let workspace = ExportWorkspace::at(dir.path()).unwrap();

        let name = workspace.artifact_name("North District / 橋梁 findings", "xlsx");

        assert!(name.starts_with("North_District"));
        assert!(name.ends_with(".xlsx"));
        assert!(!name.contains('/'));
        assert!(!name.contains(' '));
    }

    #[test]
    fn test_sanitize_degenerate_name_falls_back() {
        assert_eq!(sanitize_file_name("///"), "export");
        assert_eq!(sanitize_file_name("  "), "export");
    }
}
