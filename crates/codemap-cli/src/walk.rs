use std::{
    fs, io,
    path::{Path, PathBuf},
};

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

/// All non-hidden files below `root`, sorted, without descending into hidden
/// directories or into `exclude` (the output folder, when it lives inside the
/// input). A file `root` is returned on its own.
pub fn list_files(root: &Path, exclude: &Path) -> io::Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }
    let exclude = fs::canonicalize(exclude).ok();

    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        if exclude.is_some() && fs::canonicalize(&dir).ok() == exclude {
            continue;
        }
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if is_hidden(&path) {
                continue;
            }
            let file_type = entry.file_type()?;
            if file_type.is_dir() {
                pending.push(path);
            } else if path.is_file() {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}
