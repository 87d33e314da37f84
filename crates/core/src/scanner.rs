use std::path::Path;

use walkdir::WalkDir;

use crate::model::ResourceKind;

/// A regular file discovered under the vault root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultEntry {
    pub path: String,
    pub name: String,
    pub kind: ResourceKind,
}

impl VaultEntry {
    /// Sidebar title: notes drop their `.md` suffix, other files keep their full name.
    pub fn title(&self) -> &str {
        match self.kind {
            ResourceKind::Note => self.name.strip_suffix(".md").unwrap_or(&self.name),
            _ => &self.name,
        }
    }
}

/// Recursively list the files under `root`, skipping hidden entries and anything inside
/// hidden directories. Unreadable entries are dropped.
pub fn scan_directory<P: AsRef<Path>>(root: P) -> Vec<VaultEntry> {
    let mut entries = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry.file_name()));

    for entry in walker.filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        let kind = if name.ends_with(".md") {
            ResourceKind::Note
        } else {
            ResourceKind::File
        };

        entries.push(VaultEntry {
            path: entry.path().to_string_lossy().to_string(),
            name,
            kind,
        });
    }

    entries
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn classifies_markdown_and_skips_hidden() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("ideas.md"), "# Ideas").unwrap();
        fs::write(root.join("scan.pdf"), b"%PDF").unwrap();
        fs::write(root.join(".DS_Store"), b"").unwrap();
        fs::create_dir_all(root.join(".obsidian")).unwrap();
        fs::write(root.join(".obsidian").join("app.md"), "{}").unwrap();
        fs::create_dir_all(root.join("journal")).unwrap();
        fs::write(root.join("journal").join("monday.md"), "gm").unwrap();

        let entries = scan_directory(root);
        let summary: Vec<(&str, ResourceKind)> = entries
            .iter()
            .map(|e| (e.title(), e.kind))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("ideas", ResourceKind::Note),
                ("monday", ResourceKind::Note),
                ("scan.pdf", ResourceKind::File),
            ]
        );
    }

    #[test]
    fn missing_root_yields_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(scan_directory(dir.path().join("absent")).is_empty());
    }
}
