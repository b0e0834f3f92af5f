use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::verdict::MediaKind;

/// The final library-relative name of a media file.
///
/// Movies live directly under the movie root; episodes live under
/// `<series dir>/Season NN/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalName {
    /// Movie or series.
    pub kind: MediaKind,
    /// Directory components below the library root.
    pub directories: Vec<String>,
    /// Final file name including the extension.
    pub file_name: String,
}

impl CanonicalName {
    /// Path relative to the library root.
    #[must_use]
    pub fn relative_path(&self) -> PathBuf {
        let mut path: PathBuf = self.directories.iter().collect();
        path.push(&self.file_name);
        path
    }

    /// The top-level directory (series directory) if there is one.
    #[must_use]
    pub fn top_directory(&self) -> Option<&str> {
        self.directories.first().map(String::as_str)
    }
}

impl fmt::Display for CanonicalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for dir in &self.directories {
            write!(f, "{dir}/")?;
        }
        f.write_str(&self.file_name)
    }
}
