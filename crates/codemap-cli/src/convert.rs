use anyhow::{Context, Result};
use codemap::{png::PngTarget, syntax::Lexer, CodemapError, ColorTable, RasterTarget, Rasterizer};
use std::{
    fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

pub enum Outcome {
    Written {
        image: PathBuf,
        width: usize,
        height: usize,
    },
    Skipped(SkipReason),
}

pub enum SkipReason {
    NoLexer,
    Empty,
}

/// `<output>/<source relative to input>.png`
pub fn image_path(source: &Path, input: &Path, output: &Path) -> PathBuf {
    let relative = match source.strip_prefix(input) {
        Ok(relative) if !relative.as_os_str().is_empty() => relative,
        _ => source.file_name().map(Path::new).unwrap_or(source),
    };
    let mut name = output.join(relative).into_os_string();
    name.push(".png");
    PathBuf::from(name)
}

/// Render one source file. The image is fully rasterized before anything is
/// written and the PNG only appears under its final name once encoded, so
/// skipped and failed sources leave nothing behind.
pub fn convert_file(
    source: &Path,
    input: &Path,
    output: &Path,
    colors: &ColorTable,
) -> Result<Outcome> {
    let bytes = fs::read(source).with_context(|| format!("cannot read {}", source.display()))?;
    let text = String::from_utf8_lossy(&bytes);

    let Some(lexer) = Lexer::detect(source, &text) else {
        return Ok(Outcome::Skipped(SkipReason::NoLexer));
    };
    tracing::trace!(file = %source.display(), lexer = lexer.name(), "lexing");

    let image = match Rasterizer::new(colors).try_rasterize(lexer.tokenize(&text)) {
        Ok(image) => image,
        Err(CodemapError::EmptyInput) => return Ok(Outcome::Skipped(SkipReason::Empty)),
        Err(err) => return Err(err).with_context(|| format!("cannot render {}", source.display())),
    };

    let path = image_path(source, input, output);
    write_atomic(&path, |writer| Ok(PngTarget::new(writer).encode(&image)?))?;

    Ok(Outcome::Written {
        image: path,
        width: image.width(),
        height: image.height(),
    })
}

/// Write `path` through a temporary file in the same directory, renamed into
/// place only when `write` succeeds. On error the temporary file is removed.
fn write_atomic(path: &Path, write: impl FnOnce(&mut dyn Write) -> Result<()>) -> Result<()> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(dir).with_context(|| format!("cannot create {}", dir.display()))?;

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("cannot create a temporary file in {}", dir.display()))?;
    {
        let mut writer = BufWriter::new(&mut tmp);
        write(&mut writer)
            .and_then(|()| Ok(writer.flush()?))
            .with_context(|| format!("cannot write {}", path.display()))?;
    }
    tmp.persist(path)
        .with_context(|| format!("cannot create {}", path.display()))?;
    Ok(())
}
