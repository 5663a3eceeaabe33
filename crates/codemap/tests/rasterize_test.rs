use codemap::{
    test_support::{token, MemoryTarget},
    CodemapError, ColorTable, Grid, Image, RasterTarget, Rasterizer, Rgb, TokenType,
};
use pretty_assertions::assert_eq;

const TEXT: Rgb = Rgb::new(10, 20, 30);
const COMMENT: Rgb = Rgb::new(5, 5, 5);
const BG: Rgb = Rgb::new(0, 0, 0);

fn table() -> ColorTable {
    ColorTable::new(BG)
        .with_color("text", TEXT)
        .with_color("comment", COMMENT)
}

fn grid(tokens: &[(TokenType, &str)]) -> codemap::Result<Grid> {
    let colors = table();
    Rasterizer::new(&colors).grid(tokens.iter().cloned())
}

#[test]
fn newline_token_closes_row() {
    let grid = grid(&[token("text", "ab"), token("text", "\n"), token("text", "c")]).unwrap();
    assert_eq!(grid.rows().to_vec(), vec![vec![TEXT, TEXT], vec![TEXT]]);

    let image = Image::from_grid(&grid, BG).unwrap();
    assert_eq!((image.width(), image.height()), (2, 6));
}

#[test]
fn multi_line_token_splits_rows() {
    let grid = grid(&[token("comment", "a\nb")]).unwrap();
    assert_eq!(grid.rows().to_vec(), vec![vec![COMMENT], vec![COMMENT]]);
}

#[test]
fn multi_line_token_continues_open_row() {
    let grid = grid(&[
        token("text", "x"),
        token("comment", "/*\n*/"),
        token("text", "y"),
    ])
    .unwrap();
    assert_eq!(
        grid.rows().to_vec(),
        vec![
            vec![TEXT, COMMENT, COMMENT],
            vec![COMMENT, COMMENT, TEXT],
        ]
    );
}

#[test]
fn tokens_without_newlines_make_one_row() {
    let tokens = [
        token("text", "let"),
        token("text", " "),
        token("comment", "x = 1;"),
        token("text", ""),
        token("comment", "  // done"),
    ];
    let grid = grid(&tokens).unwrap();
    let chars: usize = tokens.iter().map(|(_, text)| text.chars().count()).sum();
    assert_eq!(grid.len(), 1);
    assert_eq!(grid.rows()[0].len(), chars);
}

#[test]
fn last_line_without_trailing_newline_is_kept() {
    let grid = grid(&[token("text", "a\nbc")]).unwrap();
    assert_eq!(grid.len(), 2);
    assert_eq!(grid.rows()[1], vec![TEXT, TEXT]);
}

#[test]
fn trailing_newline_adds_no_row() {
    let grid = grid(&[token("text", "a"), token("text", "\n")]).unwrap();
    assert_eq!(grid.rows().to_vec(), vec![vec![TEXT]]);
}

#[test]
fn blank_lines_become_empty_rows() {
    let grid = grid(&[token("text", "a\n\n"), token("text", "\n"), token("text", "b")]).unwrap();
    assert_eq!(
        grid.rows().to_vec(),
        vec![vec![TEXT], vec![], vec![], vec![TEXT]]
    );
}

#[test]
fn whitespace_is_background_for_every_type() {
    let grid = grid(&[token("comment", " a\tb "), token("text", "  ")]).unwrap();
    assert_eq!(grid.rows()[0], vec![BG, COMMENT, BG, COMMENT, BG, BG, BG]);
}

#[test]
fn crlf_carriage_return_is_background() {
    let grid = grid(&[token("text", "ab\r\n"), token("text", "c\td")]).unwrap();
    assert_eq!(
        grid.rows().to_vec(),
        vec![vec![TEXT, TEXT, BG], vec![TEXT, BG, TEXT]]
    );
}

#[test]
fn whitespace_still_needs_a_resolvable_type() {
    let result = grid(&[token("text", "a"), token("keyword.control", " ")]);
    assert!(matches!(
        result,
        Err(CodemapError::UnresolvedTokenType(ty)) if ty.as_str() == "keyword.control"
    ));
}

#[test]
fn distinct_subtypes_resolve_to_ancestor_color() {
    let grid = grid(&[token("comment.line.rust", "ab"), token("text.plain", "c")]).unwrap();
    assert_eq!(grid.rows()[0], vec![COMMENT, COMMENT, TEXT]);
}

#[test]
fn empty_stream_is_empty_input() {
    assert!(matches!(grid(&[]), Err(CodemapError::EmptyInput)));
    assert!(matches!(
        grid(&[token("text", "")]),
        Err(CodemapError::EmptyInput)
    ));
}

#[test]
fn only_blank_lines_is_empty_image() {
    let grid = grid(&[token("text", "\n\n")]).unwrap();
    assert_eq!(grid.len(), 2);
    assert_eq!(grid.width(), 0);
    assert!(matches!(
        Image::from_grid(&grid, BG),
        Err(CodemapError::EmptyInput)
    ));
}

#[test]
fn image_layout_doubles_rows_and_adds_spacers() {
    let bg = Rgb::new(9, 9, 9);
    let colors = ColorTable::new(bg).with_color(TokenType::ROOT, TEXT);
    let image = Rasterizer::new(&colors)
        .rasterize([
            (TokenType::ROOT, "abc\n"),
            (TokenType::ROOT, "d\n"),
            (TokenType::ROOT, "\n"),
            (TokenType::ROOT, "e f"),
        ])
        .unwrap();

    assert_eq!(image.width(), 3);
    assert_eq!(image.height(), 3 * 4);
    let rows: Vec<&[u8]> = image.rows().collect();
    assert_eq!(rows.len(), image.height());

    for line in 0..4 {
        let first = rows[line * 3];
        let second = rows[line * 3 + 1];
        let spacer = rows[line * 3 + 2];
        assert_eq!(first, second, "line {line} is not doubled");
        assert_eq!(spacer.len(), image.width() * 3);
        assert!(spacer.chunks(3).all(|px| px == bg.to_array()));
    }

    // "d" padded to the grid width
    assert_eq!(image.pixel(0, 3), Some(TEXT));
    assert_eq!(image.pixel(1, 3), Some(bg));
    assert_eq!(image.pixel(2, 4), Some(bg));
    // empty line is background only
    assert!(rows[6].chunks(3).all(|px| px == bg.to_array()));
    // "e f": inner space is background
    assert_eq!(image.pixel(0, 9), Some(TEXT));
    assert_eq!(image.pixel(1, 9), Some(bg));
    assert_eq!(image.pixel(2, 10), Some(TEXT));
    assert_eq!(image.pixel(3, 0), None);
}

#[test]
fn render_encodes_exactly_once() {
    let colors = table();
    let mut target = MemoryTarget::new();
    Rasterizer::new(&colors)
        .render([token("text", "ab\n"), token("comment", "c")], &mut target)
        .unwrap();

    assert_eq!(target.images.len(), 1);
    let captured = target.last().unwrap();
    assert_eq!((captured.width, captured.height), (2, 6));
    assert_eq!(
        captured.rows,
        vec![
            vec![TEXT, TEXT],
            vec![TEXT, TEXT],
            vec![BG, BG],
            vec![COMMENT, BG],
            vec![COMMENT, BG],
            vec![BG, BG],
        ]
    );
}

#[test]
fn render_skips_target_on_empty_input() {
    let colors = table();
    let mut target = MemoryTarget::new();
    let result = Rasterizer::new(&colors).render(Vec::<(TokenType, &str)>::new(), &mut target);
    assert!(matches!(result, Err(CodemapError::EmptyInput)));
    assert!(target.images.is_empty());
}

#[derive(Debug, PartialEq)]
enum SinkError {
    Codemap(String),
    Full,
}

impl From<CodemapError> for SinkError {
    fn from(err: CodemapError) -> Self {
        SinkError::Codemap(err.to_string())
    }
}

/// Rejects every image it is given.
#[derive(Default)]
struct FullTarget {
    calls: usize,
}

impl RasterTarget for FullTarget {
    type Error = SinkError;

    fn encode(&mut self, _image: &Image) -> Result<(), SinkError> {
        self.calls += 1;
        Err(SinkError::Full)
    }
}

#[test]
fn render_returns_the_target_error() {
    let colors = table();
    let mut target = FullTarget::default();
    let result = Rasterizer::new(&colors).render([token("text", "ab\n")], &mut target);
    assert_eq!(result, Err(SinkError::Full));
    assert_eq!(target.calls, 1);
}

#[test]
fn render_converts_rasterize_errors_into_the_target_error() {
    let colors = table();
    let mut target = FullTarget::default();
    let result = Rasterizer::new(&colors).render([token("keyword", "if")], &mut target);
    assert!(matches!(result, Err(SinkError::Codemap(msg)) if msg.contains("keyword")));
    assert_eq!(target.calls, 0);
}

#[test]
fn lexer_errors_abort_the_stream() {
    let colors = table();
    let tokens = vec![
        Ok(token("text", "a\n")),
        Err(CodemapError::Lex("boom".to_string())),
        Ok(token("text", "b")),
    ];
    let result = Rasterizer::new(&colors).try_grid(tokens);
    assert!(matches!(result, Err(CodemapError::Lex(msg)) if msg == "boom"));
}
