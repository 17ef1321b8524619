use crate::core::{Error, Result};
use crate::inventory::{file_name_of, InputFormat};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Candidate inventory files of one folder, in file-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderListing {
    pub files: Vec<PathBuf>,
    /// Names that matched a supported format but were excluded by name.
    pub excluded: Vec<String>,
}

pub struct InventoryWalker {
    root: PathBuf,
    formats: Vec<InputFormat>,
    excluded: BTreeSet<String>,
    /// Files the run itself reads or writes, never treated as inventories.
    own_files: Vec<PathBuf>,
}

impl InventoryWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            formats: vec![InputFormat::Xml, InputFormat::Csv, InputFormat::Json],
            excluded: BTreeSet::new(),
            own_files: Vec::new(),
        }
    }

    pub fn with_formats(mut self, formats: Vec<InputFormat>) -> Self {
        self.formats = formats;
        self
    }

    pub fn with_excluded<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded = names.into_iter().map(Into::into).collect();
        self
    }

    /// Skip these paths when they sit inside the folder, e.g. the wanted
    /// list of a previous combine or the color table.
    pub fn with_own_files<I>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        self.own_files = paths.into_iter().map(|p| comparable(&p)).collect();
        self
    }

    /// List files directly inside the folder. Excluded names are dropped
    /// here, before anything is opened.
    pub fn walk(&self) -> Result<FolderListing> {
        if !self.root.is_dir() {
            return Err(Error::config(format!(
                "input folder {} does not exist or is not a directory",
                self.root.display()
            )));
        }

        let mut listing = FolderListing::default();
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| self.root.clone());
                Error::io(path, std::io::Error::other(e.to_string()))
            })?;
            let path = entry.path();

            if !entry.file_type().is_file() || !self.should_process(path) {
                continue;
            }
            if self.is_own_file(path) {
                log::debug!("Skipping {}, it is an input or output of this run", path.display());
                continue;
            }

            let name = file_name_of(path);
            if self.excluded.contains(&name) {
                log::debug!("Excluding {}", name);
                listing.excluded.push(name);
                continue;
            }
            listing.files.push(path.to_path_buf());
        }

        log::info!(
            "Found {} inventory files in {} ({} excluded)",
            listing.files.len(),
            self.root.display(),
            listing.excluded.len()
        );
        Ok(listing)
    }

    fn should_process(&self, path: &Path) -> bool {
        InputFormat::from_path(path)
            .map(|format| self.formats.contains(&format))
            .unwrap_or(false)
    }

    fn is_own_file(&self, path: &Path) -> bool {
        !self.own_files.is_empty() && self.own_files.contains(&comparable(path))
    }
}

/// Canonical form when the path exists, so `./Sets/x.xml` and `Sets/x.xml`
/// compare equal.
fn comparable(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

pub fn find_inventory_files(root: &Path, excluded: &[String]) -> Result<FolderListing> {
    InventoryWalker::new(root.to_path_buf())
        .with_excluded(excluded.iter().cloned())
        .walk()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_walk_lists_supported_files_sorted() {
        let dir = TempDir::new().unwrap();
        for name in ["b.xml", "a.xml", "c.csv", "notes.txt"] {
            fs::write(dir.path().join(name), "").unwrap();
        }
        fs::create_dir(dir.path().join("Filtered")).unwrap();
        fs::write(dir.path().join("Filtered").join("nested.xml"), "").unwrap();

        let listing = find_inventory_files(dir.path(), &[]).unwrap();
        let names: Vec<String> = listing.files.iter().map(|p| file_name_of(p)).collect();
        assert_eq!(names, vec!["a.xml", "b.xml", "c.csv"]);
    }

    #[test]
    fn test_walk_respects_exclusions_and_formats() {
        let dir = TempDir::new().unwrap();
        for name in ["A.xml", "B.xml", "C.json"] {
            fs::write(dir.path().join(name), "").unwrap();
        }

        let listing = InventoryWalker::new(dir.path().to_path_buf())
            .with_formats(vec![InputFormat::Xml])
            .with_excluded(["B.xml"])
            .walk()
            .unwrap();

        assert_eq!(listing.files, vec![dir.path().join("A.xml")]);
        assert_eq!(listing.excluded, vec!["B.xml".to_string()]);
    }

    #[test]
    fn test_walk_skips_own_files() {
        let dir = TempDir::new().unwrap();
        for name in ["A.xml", "wanted_list.xml", "colors.json"] {
            fs::write(dir.path().join(name), "").unwrap();
        }

        let listing = InventoryWalker::new(dir.path().to_path_buf())
            .with_own_files([
                dir.path().join(".").join("wanted_list.xml"),
                dir.path().join("colors.json"),
                dir.path().join("not_written_yet.xml"),
            ])
            .walk()
            .unwrap();

        assert_eq!(listing.files, vec![dir.path().join("A.xml")]);
        assert!(listing.excluded.is_empty());
    }

    #[test]
    fn test_missing_folder_is_config_error() {
        let dir = TempDir::new().unwrap();
        let result = find_inventory_files(&dir.path().join("missing"), &[]);
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
