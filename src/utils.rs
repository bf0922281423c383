use crate::constants::OUTPUT_EXTENSION;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Get file extension from path (without the dot)
pub fn get_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
}

/// Where the extracted text of `input` is written: `<output_dir>/<stem>.txt`
pub fn output_path_for(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| input.as_os_str().to_os_string());
    let mut name = stem;
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    output_dir.join(name)
}

/// True when there is no content or it is only whitespace
pub fn is_blank(content: Option<&str>) -> bool {
    content.map_or(true, |c| c.trim().is_empty())
}

/// Check if a command is available in PATH
pub fn command_available(cmd: &str) -> bool {
    Command::new("which")
        .arg(cmd)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}
