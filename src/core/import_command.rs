//! Neo4j bulk import command
//!
//! Builds the `neo4j-import` invocation that loads a csv directory into a
//! fresh database: one `--nodes` source per block type file and a single
//! `PARENT_OF` relationship source.

use crate::config::Neo4jConfig;
use crate::core::export::writer::{absolutize, CsvDirectory, RELATIONSHIPS_FILE};
use crate::domain::Result;
use std::fmt;
use std::path::{Path, PathBuf};

/// Relationship type of the parent/child edges
pub const RELATIONSHIP_TYPE: &str = "PARENT_OF";

/// Options passed through to the importer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportOptions {
    /// Database directory under `{root}/data`
    pub database: String,
    /// Number of bad records tolerated before the import fails
    pub bad_tolerance: u64,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self::from(&Neo4jConfig::default())
    }
}

impl From<&Neo4jConfig> for ImportOptions {
    fn from(config: &Neo4jConfig) -> Self {
        Self {
            database: config.database.clone(),
            bad_tolerance: config.bad_tolerance,
        }
    }
}

/// A generated `neo4j-import` command line
///
/// ```
/// use coursegraph::core::import_command::{BulkImportCommand, ImportOptions};
/// use std::path::Path;
///
/// let files = vec!["course.csv".to_string(), "relationships.csv".to_string()];
/// let command = BulkImportCommand::generate(
///     Path::new("/opt/neo4j"),
///     Path::new("/tmp/csvs"),
///     &files,
///     ImportOptions::default(),
/// );
/// assert_eq!(
///     command.to_string(),
///     "/opt/neo4j/bin/neo4j-import --id-type string \
///      --nodes:course /tmp/csvs/course.csv \
///      --relationships:PARENT_OF /tmp/csvs/relationships.csv \
///      --into /opt/neo4j/data/coursegraph \
///      --multiline-fields=true --quote='' --bad-tolerance=1000000"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkImportCommand {
    neo4j_root: PathBuf,
    csv_dir: PathBuf,
    node_files: Vec<String>,
    options: ImportOptions,
}

impl BulkImportCommand {
    /// Build the command for a set of csv file names
    ///
    /// The relationships file is always referenced, whether or not it is in
    /// `files`. Every other `.csv` name becomes a node source labelled by
    /// its file stem, in sorted order.
    pub fn generate(
        neo4j_root: &Path,
        csv_dir: &Path,
        files: &[String],
        options: ImportOptions,
    ) -> Self {
        let mut node_files: Vec<String> = files
            .iter()
            .filter(|name| name.as_str() != RELATIONSHIPS_FILE && name.ends_with(".csv"))
            .cloned()
            .collect();
        node_files.sort();
        node_files.dedup();

        Self {
            neo4j_root: neo4j_root.to_path_buf(),
            csv_dir: csv_dir.to_path_buf(),
            node_files,
            options,
        }
    }

    /// Build the command for the files currently in a csv directory
    ///
    /// The Neo4j root is made absolute.
    pub fn for_directory(
        neo4j_root: impl AsRef<Path>,
        csv_dir: &CsvDirectory,
        options: ImportOptions,
    ) -> Result<Self> {
        let neo4j_root = absolutize(neo4j_root)?;
        let files = csv_dir.csv_files()?;
        Ok(Self::generate(&neo4j_root, csv_dir.path(), &files, options))
    }

    /// Node labels, one per block type file
    pub fn node_labels(&self) -> impl Iterator<Item = &str> {
        self.node_files
            .iter()
            .map(|name| name.trim_end_matches(".csv"))
    }

    /// Importer executable
    pub fn program(&self) -> PathBuf {
        self.neo4j_root.join("bin").join("neo4j-import")
    }

    /// Arguments after the executable
    pub fn args(&self) -> Vec<String> {
        let mut args = vec!["--id-type".to_string(), "string".to_string()];

        for (label, file) in self.node_labels().zip(&self.node_files) {
            args.push(format!("--nodes:{label}"));
            args.push(self.csv_dir.join(file).display().to_string());
        }

        args.push(format!("--relationships:{RELATIONSHIP_TYPE}"));
        args.push(self.csv_dir.join(RELATIONSHIPS_FILE).display().to_string());

        args.push("--into".to_string());
        args.push(
            self.neo4j_root
                .join("data")
                .join(&self.options.database)
                .display()
                .to_string(),
        );

        args.push("--multiline-fields=true".to_string());
        args.push("--quote=''".to_string());
        args.push(format!("--bad-tolerance={}", self.options.bad_tolerance));
        args
    }
}

impl fmt::Display for BulkImportCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program().display())?;
        for arg in self.args() {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
