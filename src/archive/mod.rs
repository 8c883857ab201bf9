//! Project archive packaging.
//!
//! Generated files are written into a gzipped tar archive built in memory.
//! Entry names are the record paths with any leading `/` stripped; duplicate
//! paths collapse last-write-wins, with the entry keeping its original
//! position.

use std::io::Write as _;

use anyhow::{Context, Result};
use flate2::{write::GzEncoder, Compression};
use tar::{Builder, Header};

use crate::types::GeneratedFile;

/// Archive entry name for a record path.
///
/// Leading slashes are stripped so absolute-looking paths land inside the
/// archive root.
pub fn entry_name(path: &str) -> &str {
    path.trim_start_matches('/')
}

/// In-memory builder for a project archive.
pub struct ProjectArchive {
    entries: Vec<(String, String)>,
}

impl ProjectArchive {
    /// Collect records into archive entries.
    ///
    /// Records with an empty normalized name or empty content are skipped.
    /// A later record for the same name replaces the earlier content.
    pub fn from_files(files: &[GeneratedFile]) -> Self {
        let mut entries: Vec<(String, String)> = Vec::new();

        for file in files {
            let name = entry_name(&file.path);
            if name.is_empty() || file.content.is_empty() {
                continue;
            }

            match entries.iter_mut().find(|(existing, _)| existing.as_str() == name) {
                Some((_, content)) => *content = file.content.clone(),
                None => entries.push((name.to_string(), file.content.clone())),
            }
        }

        Self { entries }
    }

    /// Number of entries that will be written.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the archive has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write the archive as gzipped tar bytes.
    pub fn into_tar_gz(self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        {
            let enc = GzEncoder::new(&mut buf, Compression::default());
            let mut archive = Builder::new(enc);

            for (name, content) in &self.entries {
                let mut header = Header::new_gnu();
                header.set_size(content.len() as u64);
                header.set_mode(0o644);
                header.set_cksum();

                archive
                    .append_data(&mut header, name, content.as_bytes())
                    .with_context(|| format!("failed to add {} to archive", name))?;
            }

            archive
                .into_inner()
                .context("failed to finalise tar archive")?
                .finish()
                .context("failed to finalise gzip stream")?
                .flush()
                .context("failed to flush gzip output")?;
        }

        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tar::Archive;

    fn unpack(bytes: &[u8]) -> Vec<(String, String)> {
        let mut archive = Archive::new(GzDecoder::new(bytes));
        archive
            .entries()
            .unwrap()
            .map(|entry| {
                let mut entry = entry.unwrap();
                let name = entry.path().unwrap().to_str().unwrap().to_string();
                let mut content = String::new();
                entry.read_to_string(&mut content).unwrap();
                (name, content)
            })
            .collect()
    }

    #[test]
    fn test_entry_name_strips_leading_slashes() {
        assert_eq!(entry_name("/src/index.ts"), "src/index.ts");
        assert_eq!(entry_name("//weird"), "weird");
        assert_eq!(entry_name("src/index.ts"), "src/index.ts");
    }

    #[test]
    fn test_round_trip_preserves_content() {
        let files = vec![
            GeneratedFile::new("package.json", "{\"name\":\"demo\"}", "json"),
            GeneratedFile::new("/src/index.ts", "console.log(\"hi\");", "typescript"),
        ];

        let bytes = ProjectArchive::from_files(&files).into_tar_gz().unwrap();
        let entries = unpack(&bytes);

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, "package.json");
        assert_eq!(entries[0].1, "{\"name\":\"demo\"}");
        assert_eq!(entries[1].0, "src/index.ts");
        assert_eq!(entries[1].1, "console.log(\"hi\");");
    }

    #[test]
    fn test_duplicate_paths_collapse_last_write_wins() {
        let files = vec![
            GeneratedFile::new("a.ts", "first", "typescript"),
            GeneratedFile::new("b.ts", "other", "typescript"),
            GeneratedFile::new("a.ts", "second", "typescript"),
        ];

        let archive = ProjectArchive::from_files(&files);
        assert_eq!(archive.len(), 2);

        let entries = unpack(&archive.into_tar_gz().unwrap());
        assert_eq!(entries[0], ("a.ts".to_string(), "second".to_string()));
        assert_eq!(entries[1], ("b.ts".to_string(), "other".to_string()));
    }

    #[test]
    fn test_unusable_records_are_skipped() {
        let files = vec![
            GeneratedFile::new("/", "content for an empty name", "plaintext"),
            GeneratedFile::new("kept.ts", "const kept = 1;", "typescript"),
        ];

        let archive = ProjectArchive::from_files(&files);
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn test_empty_archive_is_valid() {
        let bytes = ProjectArchive::from_files(&[]).into_tar_gz().unwrap();
        assert!(unpack(&bytes).is_empty());
    }
}
