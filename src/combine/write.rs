use super::combiner::CombineOutput;
use super::document::WantedDocument;
use crate::core::Result;
use crate::errors::ProcessingFailure;
use crate::io::{FileDestination, OutputDestination};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Where combine results are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    pub filtered_folder: PathBuf,
    pub filtered_prefix: String,
    pub wanted_list: PathBuf,
}

impl OutputLayout {
    /// `<filtered_folder>/<prefix><stem>.xml` for an input file name.
    pub fn filtered_path(&self, file_name: &str) -> PathBuf {
        let stem = Path::new(file_name)
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.to_string());
        self.filtered_folder
            .join(format!("{}{}.xml", self.filtered_prefix, stem))
    }

    /// One distinct filtered path per input file, in order. A later file
    /// whose stem is already taken keeps its extension
    /// (`filtered_castle.xml.xml`), then gets a numeric suffix. Paths are
    /// compared case-insensitively.
    pub fn filtered_paths<'a, I>(&self, file_names: I) -> Vec<PathBuf>
    where
        I: IntoIterator<Item = &'a str>,
    {
        fn key(path: &Path) -> String {
            path.to_string_lossy().to_lowercase()
        }
        let mut taken = HashSet::new();

        file_names
            .into_iter()
            .map(|file_name| {
                let mut path = self.filtered_path(file_name);
                if taken.contains(&key(&path)) {
                    path = self
                        .filtered_folder
                        .join(format!("{}{}.xml", self.filtered_prefix, file_name));
                }
                let mut suffix = 2;
                while taken.contains(&key(&path)) {
                    path = self.filtered_folder.join(format!(
                        "{}{}_{}.xml",
                        self.filtered_prefix, file_name, suffix
                    ));
                    suffix += 1;
                }
                taken.insert(key(&path));
                path
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct WriteSummary {
    pub filtered_written: Vec<PathBuf>,
    /// Filtered documents that could not be written.
    pub failures: Vec<ProcessingFailure>,
    pub wanted_list: PathBuf,
}

/// Write filtered documents (unless `write_filtered` is false), then the
/// merged wanted list. A filtered write failure is recorded and skipped; a
/// failure to write the wanted list is returned as the error.
pub fn write_outputs(
    output: &CombineOutput,
    layout: &OutputLayout,
    write_filtered: bool,
) -> Result<WriteSummary> {
    let mut summary = WriteSummary {
        wanted_list: layout.wanted_list.clone(),
        ..WriteSummary::default()
    };

    if write_filtered {
        let paths =
            layout.filtered_paths(output.filtered.iter().map(|f| f.file_name.as_str()));
        for (filtered, path) in output.filtered.iter().zip(paths) {
            match write_document(&filtered.document, &path) {
                Ok(()) => {
                    log::debug!("Wrote {}", path.display());
                    summary.filtered_written.push(path);
                }
                Err(e) => {
                    log::warn!("Could not write filtered copy of {}: {}", filtered.file_name, e);
                    summary.failures.push(ProcessingFailure::file_write(&path, &e));
                }
            }
        }
    }

    write_document(&output.merged, &layout.wanted_list)?;
    log::info!(
        "Wrote wanted list with {} entries to {}",
        output.merged.len(),
        layout.wanted_list.display()
    );
    Ok(summary)
}

fn write_document(document: &WantedDocument, path: &Path) -> Result<()> {
    let xml = document.to_xml(path)?;
    let destination = FileDestination::new(path.to_path_buf());
    destination.write_str(&xml)?;
    destination.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combine::{Combiner, FilteredDocument};
    use crate::core::{Error, InventoryRecord};
    use crate::errors::OperationType;
    use std::fs;
    use tempfile::TempDir;

    fn layout(root: &Path) -> OutputLayout {
        OutputLayout {
            filtered_folder: root.join("Filtered"),
            filtered_prefix: "filtered_".into(),
            wanted_list: root.join("wanted_list.xml"),
        }
    }

    fn output_with(file_name: &str) -> CombineOutput {
        output_with_files(&[(file_name, "3001")])
    }

    fn output_with_files(files: &[(&str, &str)]) -> CombineOutput {
        let mut output = Combiner::new().finish();
        for (file_name, item_id) in files {
            let mut doc = WantedDocument::default();
            doc.items.push(InventoryRecord::new(*item_id, "5", 1, 0));
            output.merged.items.extend(doc.items.iter().cloned());
            output.filtered.push(FilteredDocument {
                file_name: (*file_name).into(),
                document: doc,
            });
        }
        output
    }

    #[test]
    fn test_filtered_path_uses_prefix_and_stem() {
        let layout = layout(Path::new("out"));
        assert_eq!(
            layout.filtered_path("10333.xml"),
            Path::new("out/Filtered/filtered_10333.xml")
        );
        assert_eq!(
            layout.filtered_path("castle.csv"),
            Path::new("out/Filtered/filtered_castle.xml")
        );
    }

    #[test]
    fn test_filtered_paths_keep_shared_stems_apart() {
        let layout = layout(Path::new("out"));
        let paths = layout.filtered_paths(["castle.csv", "castle.xml", "Castle.XML", "ship.xml"]);
        assert_eq!(
            paths,
            vec![
                PathBuf::from("out/Filtered/filtered_castle.xml"),
                PathBuf::from("out/Filtered/filtered_castle.xml.xml"),
                PathBuf::from("out/Filtered/filtered_Castle.XML_2.xml"),
                PathBuf::from("out/Filtered/filtered_ship.xml"),
            ]
        );
    }

    #[test]
    fn test_filtered_paths_fall_back_to_numeric_suffix() {
        let layout = layout(Path::new("out"));
        let paths = layout.filtered_paths(["a.xml", "a.csv.xml", "a.csv"]);
        assert_eq!(
            paths,
            vec![
                PathBuf::from("out/Filtered/filtered_a.xml"),
                PathBuf::from("out/Filtered/filtered_a.csv.xml"),
                PathBuf::from("out/Filtered/filtered_a.csv_2.xml"),
            ]
        );
    }

    #[test]
    fn test_same_stem_inputs_write_separate_documents() {
        let dir = TempDir::new().unwrap();
        let layout = layout(dir.path());
        let output = output_with_files(&[("castle.csv", "3001"), ("castle.xml", "3002")]);

        let summary = write_outputs(&output, &layout, true).unwrap();

        assert!(summary.failures.is_empty());
        assert_eq!(summary.filtered_written.len(), 2);
        assert_ne!(summary.filtered_written[0], summary.filtered_written[1]);
        let first = fs::read_to_string(&summary.filtered_written[0]).unwrap();
        let second = fs::read_to_string(&summary.filtered_written[1]).unwrap();
        assert!(first.contains("<ITEMID>3001</ITEMID>"));
        assert!(second.contains("<ITEMID>3002</ITEMID>"));
        assert_eq!(fs::read_dir(&layout.filtered_folder).unwrap().count(), 2);
    }

    #[test]
    fn test_writes_filtered_then_merged() {
        let dir = TempDir::new().unwrap();
        let layout = layout(dir.path());

        let summary = write_outputs(&output_with("A.xml"), &layout, true).unwrap();

        assert_eq!(summary.filtered_written, vec![layout.filtered_path("A.xml")]);
        assert!(fs::read_to_string(&layout.wanted_list)
            .unwrap()
            .contains("<ITEMID>3001</ITEMID>"));
    }

    #[test]
    fn test_skip_filtered_writes() {
        let dir = TempDir::new().unwrap();
        let layout = layout(dir.path());

        let summary = write_outputs(&output_with("A.xml"), &layout, false).unwrap();
        assert!(summary.filtered_written.is_empty());
        assert!(!layout.filtered_folder.exists());
    }

    #[test]
    fn test_filtered_write_failure_is_recoverable() {
        let dir = TempDir::new().unwrap();
        let mut layout = layout(dir.path());
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        layout.filtered_folder = blocker;

        let summary = write_outputs(&output_with("A.xml"), &layout, true).unwrap();
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].operation, OperationType::FileWrite);
        assert!(layout.wanted_list.exists());
    }

    #[test]
    fn test_merged_write_failure_is_fatal() {
        let dir = TempDir::new().unwrap();
        let mut layout = layout(dir.path());
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        layout.wanted_list = blocker.join("wanted_list.xml");

        let result = write_outputs(&output_with("A.xml"), &layout, false);
        assert!(matches!(result, Err(Error::Write { .. })));
    }
}
