use anyhow::{Context, Result};
use std::{fs, path::Path};

pub const EXAMPLE_FILE: &str = "example.txt";
pub const EXAMPLE_CONTENTS: &str = "Hello from Rust";

/// Overwrite `path` with `contents`, then read it back.
pub fn write_then_read(path: &Path, contents: &str) -> Result<String> {
    fs::write(path, contents)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    println!("File created!");

    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    println!("File content: {data}");

    Ok(data)
}

/// Run the demo against `example.txt` inside `dir`.
pub fn run(dir: &Path) -> Result<String> {
    write_then_read(&dir.join(EXAMPLE_FILE), EXAMPLE_CONTENTS)
}
