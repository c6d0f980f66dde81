//! Input file discovery for command-line paths and project files.

use groovy_options::ProjectConfig;
use std::path::{Path, PathBuf};

const SOURCE_EXTENSIONS: &[&str] = &["groovy", "gvy", "gy", "gsh"];

/// Expand command-line arguments: files are taken as given, directories are
/// searched recursively for Groovy sources.
pub fn expand_paths(paths: &[String]) -> Vec<PathBuf> {
    let mut result = Vec::new();
    for path in paths {
        let path = PathBuf::from(path);
        if path.is_dir() {
            walk_directory(&path, None, &mut result);
        } else {
            result.push(path);
        }
    }
    result
}

/// The sources named by a project file. Relative entries are resolved
/// against the directory holding the project file.
pub fn discover_project_files(config: &ProjectConfig, project_path: &Path) -> Vec<PathBuf> {
    let root = project_path.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf);

    if let Some(files) = &config.files {
        return files.iter().map(|f| root.join(f)).filter(|p| p.exists()).collect();
    }

    let default_include = vec![".".to_string()];
    let include = config.include.as_deref().unwrap_or(&default_include);
    let mut result = Vec::new();
    for dir in include {
        walk_directory(&root.join(dir), Some(config), &mut result);
    }
    result.sort();
    result.dedup();
    result
}

fn walk_directory(dir: &Path, config: Option<&ProjectConfig>, result: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
    paths.sort();

    for path in paths {
        if config.is_some_and(|c| c.is_excluded(&path)) {
            continue;
        }
        if path.is_dir() {
            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if name.starts_with('.') || name == "build" || name == "target" {
                continue;
            }
            walk_directory(&path, config, result);
        } else if is_source_file(&path) {
            result.push(path);
        }
    }
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SOURCE_EXTENSIONS.contains(&e))
}
