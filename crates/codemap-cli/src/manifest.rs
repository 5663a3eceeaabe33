use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

pub const MANIFEST_NAME: &str = "images.json";

/// JSON array of the written image paths, in walk order.
#[derive(Serialize)]
#[serde(transparent)]
struct Manifest<'a> {
    images: &'a [PathBuf],
}

pub fn write(output: &Path, images: &[PathBuf]) -> Result<PathBuf> {
    let path = output.join(MANIFEST_NAME);
    let file = File::create(&path).with_context(|| format!("cannot create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, &Manifest { images })
        .with_context(|| format!("cannot write {}", path.display()))?;
    writer.flush()?;
    Ok(path)
}
