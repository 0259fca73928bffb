use super::GlyphPosition;

///
/// A row of text produced by breaking a string into lines
///
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TextRow {
    /// Byte index of the first character in the row
    pub start: usize,

    /// Byte index just past the last visible character in the row (trailing white space is excluded)
    pub end: usize,

    /// Byte index where the following row starts
    pub next: usize,

    /// Distance from the origin of the first glyph to the advance of the last visible glyph
    pub width: f32
}

impl TextRow {
    ///
    /// The text in this row
    ///
    pub fn text<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.start..self.end).unwrap_or("")
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum CharKind {
    Space,
    Newline,
    Char
}

impl CharKind {
    fn of(character: char, previous: Option<char>) -> CharKind {
        match character {
            ' ' | '\t' | '\u{0b}' | '\u{0c}' | '\u{a0}' => CharKind::Space,

            // CR LF and LF CR both count as a single line break
            '\n'        => if previous == Some('\r') { CharKind::Space } else { CharKind::Newline },
            '\r'        => if previous == Some('\n') { CharKind::Space } else { CharKind::Newline },
            '\u{85}'    => CharKind::Newline,

            _           => CharKind::Char
        }
    }
}

///
/// The row that's currently being laid out
///
struct RowInProgress {
    start:          usize,
    end:            usize,
    start_x:        f32,
    width:          f32,

    /// Start of the last word in the row
    word_start:     usize,
    word_start_x:   f32,

    /// End of the last complete word in the row (the row start if there isn't one yet)
    break_end:      usize,
    break_width:    f32
}

impl RowInProgress {
    fn starting_at(glyph: &GlyphPosition) -> RowInProgress {
        RowInProgress {
            start:          glyph.index,
            end:            next_index(glyph),
            start_x:        glyph.x,
            width:          glyph.next_x - glyph.x,
            word_start:     glyph.index,
            word_start_x:   glyph.x,
            break_end:      glyph.index,
            break_width:    0.0
        }
    }

    fn to_row(&self, next: usize) -> TextRow {
        TextRow { start: self.start, end: self.end, next: next, width: self.width }
    }
}

#[inline]
fn next_index(glyph: &GlyphPosition) -> usize {
    glyph.index + glyph.character.len_utf8()
}

///
/// Breaks a laid-out string into rows no wider than `break_width`
///
/// White space at the start of a row is skipped, and rows are broken after the last word that fits or
/// at a new line character. A word that's too long for a row on its own is split between characters.
/// `text_len` is the length in bytes of the string that the glyphs were laid out from.
///
pub fn break_lines(text_len: usize, glyphs: &[GlyphPosition], break_width: f32) -> Vec<TextRow> {
    let mut rows                            = vec![];
    let mut row: Option<RowInProgress>      = None;
    let mut previous_char                   = None;
    let mut previous_kind                   = CharKind::Space;

    for glyph in glyphs.iter() {
        let kind = CharKind::of(glyph.character, previous_char);

        match (kind, row.as_mut()) {
            (CharKind::Newline, current) => {
                // New lines always end the row, even if it's empty
                let finished = match current {
                    Some(current)   => current.to_row(next_index(glyph)),
                    None            => TextRow { start: glyph.index, end: glyph.index, next: next_index(glyph), width: 0.0 }
                };

                rows.push(finished);
                row = None;
            }

            (CharKind::Space, None)     => { }
            (CharKind::Char, None)      => { row = Some(RowInProgress::starting_at(glyph)); }

            (kind, Some(current))       => {
                if previous_kind == CharKind::Char && kind == CharKind::Space {
                    current.break_end   = glyph.index;
                    current.break_width = current.width;
                }

                if previous_kind == CharKind::Space && kind == CharKind::Char {
                    current.word_start      = glyph.index;
                    current.word_start_x    = glyph.x;
                }

                if kind == CharKind::Char {
                    let next_width = glyph.next_x - current.start_x;

                    if next_width <= break_width {
                        current.end     = next_index(glyph);
                        current.width   = next_width;
                    } else if current.break_end == current.start {
                        // The word doesn't fit on a row by itself: split it before this character
                        rows.push(TextRow { start: current.start, end: glyph.index, next: glyph.index, width: current.width });
                        *current = RowInProgress::starting_at(glyph);
                    } else {
                        // Move the last word onto a new row
                        rows.push(TextRow { start: current.start, end: current.break_end, next: current.word_start, width: current.break_width });

                        current.start       = current.word_start;
                        current.start_x     = current.word_start_x;
                        current.end         = next_index(glyph);
                        current.width       = glyph.next_x - current.word_start_x;
                        current.break_end   = current.word_start;
                        current.break_width = 0.0;
                    }
                }
            }
        }

        previous_char = Some(glyph.character);
        previous_kind = kind;
    }

    if let Some(current) = row {
        rows.push(current.to_row(text_len));
    }

    rows
}
