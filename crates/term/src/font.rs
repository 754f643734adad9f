//! 3x5 pixel font for scrolling text across the LED matrix.
//!
//! Glyphs are stored column by column, bit 0 being the top pixel, which is
//! the same packing the display uses.

/// Pixel columns per glyph.
pub const GLYPH_WIDTH: usize = 3;
pub const GLYPH_HEIGHT: usize = 5;

const FONT: &[(char, [&str; GLYPH_HEIGHT])] = &[
    ('A', [".#.", "#.#", "###", "#.#", "#.#"]),
    ('B', ["##.", "#.#", "##.", "#.#", "##."]),
    ('C', [".##", "#..", "#..", "#..", ".##"]),
    ('D', ["##.", "#.#", "#.#", "#.#", "##."]),
    ('E', ["###", "#..", "##.", "#..", "###"]),
    ('F', ["###", "#..", "##.", "#..", "#.."]),
    ('G', [".##", "#..", "#.#", "#.#", ".##"]),
    ('H', ["#.#", "#.#", "###", "#.#", "#.#"]),
    ('I', ["###", ".#.", ".#.", ".#.", "###"]),
    ('J', ["..#", "..#", "..#", "#.#", ".#."]),
    ('K', ["#.#", "#.#", "##.", "#.#", "#.#"]),
    ('L', ["#..", "#..", "#..", "#..", "###"]),
    ('M', ["#.#", "###", "###", "#.#", "#.#"]),
    ('N', ["##.", "#.#", "#.#", "#.#", "#.#"]),
    ('O', [".#.", "#.#", "#.#", "#.#", ".#."]),
    ('P', ["##.", "#.#", "##.", "#..", "#.."]),
    ('Q', [".#.", "#.#", "#.#", "##.", ".##"]),
    ('R', ["##.", "#.#", "##.", "#.#", "#.#"]),
    ('S', [".##", "#..", ".#.", "..#", "##."]),
    ('T', ["###", ".#.", ".#.", ".#.", ".#."]),
    ('U', ["#.#", "#.#", "#.#", "#.#", "###"]),
    ('V', ["#.#", "#.#", "#.#", "#.#", ".#."]),
    ('W', ["#.#", "#.#", "###", "###", "#.#"]),
    ('X', ["#.#", "#.#", ".#.", "#.#", "#.#"]),
    ('Y', ["#.#", "#.#", ".#.", ".#.", ".#."]),
    ('Z', ["###", "..#", ".#.", "#..", "###"]),
    ('0', ["###", "#.#", "#.#", "#.#", "###"]),
    ('1', [".#.", "##.", ".#.", ".#.", "###"]),
    ('2', ["##.", "..#", ".#.", "#..", "###"]),
    ('3', ["##.", "..#", ".#.", "..#", "##."]),
    ('4', ["#.#", "#.#", "###", "..#", "..#"]),
    ('5', ["###", "#..", "##.", "..#", "##."]),
    ('6', [".##", "#..", "###", "#.#", "###"]),
    ('7', ["###", "..#", ".#.", ".#.", ".#."]),
    ('8', ["###", "#.#", "###", "#.#", "###"]),
    ('9', ["###", "#.#", "###", "..#", "##."]),
    (' ', ["...", "...", "...", "...", "..."]),
    ('?', ["##.", "..#", ".#.", "...", ".#."]),
    ('!', [".#.", ".#.", ".#.", "...", ".#."]),
    ('.', ["...", "...", "...", "...", ".#."]),
    (':', ["...", ".#.", "...", ".#.", "..."]),
    ('-', ["...", "...", "###", "...", "..."]),
];

/// Packed columns of `ch`. Letters are case-folded; unknown characters
/// render as `?`.
pub fn glyph_columns(ch: char) -> [u8; GLYPH_WIDTH] {
    let upper = ch.to_ascii_uppercase();
    let rows = FONT
        .iter()
        .find(|(c, _)| *c == upper)
        .or_else(|| FONT.iter().find(|(c, _)| *c == '?'))
        .map(|(_, rows)| rows);

    let mut columns = [0u8; GLYPH_WIDTH];
    if let Some(rows) = rows {
        for (y, row) in rows.iter().enumerate() {
            for (x, px) in row.bytes().enumerate().take(GLYPH_WIDTH) {
                if px == b'#' {
                    columns[x] |= 1 << y;
                }
            }
        }
    }
    columns
}

/// Columns of `text` with one blank column between glyphs.
pub fn text_columns(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len() * (GLYPH_WIDTH + 1));
    for ch in text.chars() {
        out.extend_from_slice(&glyph_columns(ch));
        out.push(0);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_packing() {
        // L: left column full height, bottom row across.
        assert_eq!(glyph_columns('L'), [0b11111, 0b10000, 0b10000]);
        assert_eq!(glyph_columns('l'), glyph_columns('L'));
        assert_eq!(glyph_columns(' '), [0, 0, 0]);
    }

    #[test]
    fn test_unknown_renders_question_mark() {
        assert_eq!(glyph_columns('~'), glyph_columns('?'));
    }

    #[test]
    fn test_text_columns_spacing() {
        let cols = text_columns("I1");
        assert_eq!(cols.len(), 8);
        assert_eq!(cols[3], 0);
        assert_eq!(cols[7], 0);
        assert_eq!(&cols[..3], &glyph_columns('I'));
    }
}
