// Copyright (c) 2025 - Cowboy AI, Inc.
//! FileSource backed by the local filesystem

use std::io;
use std::path::Path;

use super::FileSource;

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFiles;

impl FileSource for LocalFiles {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
