//! Lazy depth-first discovery of markdown documents under a docs root.
//!
//! `MarkdownFiles` only yields paths; reading and rewriting is left to the
//! consumer, so traversal order and the transform step stay independent.

use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use crate::errors::SanitizeError;

pub const MARKDOWN_SUFFIX: &str = ".md";

/// Iterator over every `.md` file below a root, in file-name order.
pub struct MarkdownFiles {
    inner: walkdir::IntoIter,
}

impl MarkdownFiles {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let inner = WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter();
        Self { inner }
    }
}

impl Iterator for MarkdownFiles {
    type Item = Result<PathBuf, SanitizeError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(entry) if is_markdown_file(&entry) => return Some(Ok(entry.into_path())),
                Ok(_) => continue,
                Err(e) => return Some(Err(SanitizeError::Walk(e))),
            }
        }
    }
}

/// Case-sensitive: `README.MD` and `page.mdx` are not documents.
pub fn is_markdown_name(name: &str) -> bool {
    name.ends_with(MARKDOWN_SUFFIX)
}

fn is_markdown_file(entry: &DirEntry) -> bool {
    entry.file_type().is_file() && is_markdown_name(&entry.file_name().to_string_lossy())
}
