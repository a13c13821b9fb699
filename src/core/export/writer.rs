//! Csv output directory
//!
//! One file per block type plus `relationships.csv`. Files are opened in
//! append mode and get their header only when they are created, so several
//! courses (or several runs) accumulate rows in the same files.

use super::serializer::{BlocksByType, ModuleStoreSerializer, Relationship};
use crate::domain::{BlockType, CourseGraphError, Result};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// File holding the parent/child edges
pub const RELATIONSHIPS_FILE: &str = "relationships.csv";

/// Header of the relationships file, as the Neo4j importer expects it
pub const RELATIONSHIPS_HEADER: [&str; 2] = [":START_ID", ":END_ID"];

const CSV_EXTENSION: &str = "csv";

/// Resolve `path` against the current directory when relative
pub fn absolutize(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}

/// Directory receiving the csv files of an export
#[derive(Debug, Clone)]
pub struct CsvDirectory {
    dir: PathBuf,
}

impl CsvDirectory {
    /// Open the output directory, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be created.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = absolutize(dir)?;
        std::fs::create_dir_all(&dir).map_err(|e| {
            CourseGraphError::Io(format!(
                "Failed to create csv directory {}: {}",
                dir.display(),
                e
            ))
        })?;
        Ok(Self { dir })
    }

    /// Absolute path of the directory
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Path of a file inside the directory
    pub fn file_path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }

    /// File name used for a block type
    pub fn file_name_for(block_type: &BlockType) -> String {
        format!("{block_type}.{CSV_EXTENSION}")
    }

    /// Delete every csv file in the directory
    ///
    /// Other files and subdirectories are left alone.
    ///
    /// # Returns
    ///
    /// The number of files removed.
    pub fn clear(&self) -> Result<usize> {
        let files = self.csv_files()?;
        for file_name in &files {
            std::fs::remove_file(self.file_path(file_name))?;
        }
        tracing::debug!(
            csv_dir = %self.dir.display(),
            removed = files.len(),
            "Cleared csv directory"
        );
        Ok(files.len())
    }

    /// Append rows to a file, writing the header first if the file is new
    pub fn append_rows<H, R, F>(&self, file_name: &str, header: H, rows: R) -> Result<usize>
    where
        H: IntoIterator,
        H::Item: AsRef<[u8]>,
        R: IntoIterator<Item = F>,
        F: IntoIterator,
        F::Item: AsRef<[u8]>,
    {
        let path = self.file_path(file_name);
        let is_new = !path.exists();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                CourseGraphError::Io(format!("Failed to open {}: {}", path.display(), e))
            })?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if is_new {
            writer.write_record(header)?;
        }

        let mut written = 0;
        for row in rows {
            writer.write_record(row)?;
            written += 1;
        }
        writer.flush()?;

        Ok(written)
    }

    /// Write a course's serialized blocks, one file per type
    ///
    /// # Returns
    ///
    /// Rows written per block type, in discovery order.
    pub fn dump_blocks(
        &self,
        serializer: &mut ModuleStoreSerializer,
        blocks_by_type: &BlocksByType,
    ) -> Result<Vec<(BlockType, usize)>> {
        let mut written = Vec::with_capacity(blocks_by_type.type_count());
        for (block_type, blocks) in blocks_by_type.iter() {
            let Some((header, rows)) = serializer.rows_for_type(block_type, blocks) else {
                continue;
            };
            let count = self.append_rows(&Self::file_name_for(block_type), &header, &rows)?;
            written.push((block_type.clone(), count));
        }
        Ok(written)
    }

    /// Append parent/child edges to the relationships file
    pub fn dump_relationships(&self, relationships: &[Relationship]) -> Result<usize> {
        self.append_rows(
            RELATIONSHIPS_FILE,
            RELATIONSHIPS_HEADER,
            relationships.iter().map(Relationship::to_row),
        )
    }

    /// Names of the csv files in the directory, sorted
    pub fn csv_files(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.dir).map_err(|e| {
            CourseGraphError::Io(format!("Failed to read {}: {}", self.dir.display(), e))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(CSV_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                files.push(name.to_string());
            }
        }
        files.sort();
        Ok(files)
    }
}
