use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scratch input and output directories for one test
pub struct CopyFixture {
    input: TempDir,
    output: TempDir,
}

impl CopyFixture {
    pub fn new() -> Self {
        Self {
            input: TempDir::new().unwrap(),
            output: TempDir::new().unwrap(),
        }
    }

    pub fn input_dir(&self) -> &Path {
        self.input.path()
    }

    pub fn output_dir(&self) -> &Path {
        self.output.path()
    }

    /// Write an input file, creating parent directories, and return its path
    pub fn write_input(&self, relative: &str, content: impl AsRef<[u8]>) -> PathBuf {
        let path = self.input.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Path inside the input directory that is never created
    pub fn missing_input(&self, name: &str) -> PathBuf {
        self.input.path().join(name)
    }

    pub fn read_output(&self, name: &str) -> Vec<u8> {
        fs::read(self.output.path().join(name)).unwrap()
    }

    pub fn output_exists(&self, name: &str) -> bool {
        self.output.path().join(name).exists()
    }

    /// Sorted file names currently in the output directory
    pub fn output_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.output.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
