//! Quote-aware CSV splitting for statement exports.
//!
//! Card issuers produce CSV that strict readers reject: ragged rows, blank
//! lines between sections, stray `\r`, padding around unquoted values. The
//! tokenizer accepts all of it and never fails; malformed quoting only moves
//! field boundaries.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unquoted,
    Quoted,
}

/// Accumulates one field. Whitespace is trimmed from the unquoted parts
/// around the quoted span only; quoted content is kept verbatim.
#[derive(Default)]
struct FieldBuf {
    text: String,
    quoted_span: Option<(usize, usize)>,
}

impl FieldBuf {
    fn push(&mut self, c: char) {
        self.text.push(c);
    }

    fn open_quote(&mut self) {
        let at = self.text.len();
        let start = self.quoted_span.map_or(at, |(start, _)| start);
        self.quoted_span = Some((start, at));
    }

    fn push_quoted(&mut self, c: char) {
        self.text.push(c);
        if let Some((_, end)) = &mut self.quoted_span {
            *end = self.text.len();
        }
    }

    fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    fn take(&mut self) -> String {
        let text = std::mem::take(&mut self.text);
        match self.quoted_span.take() {
            None => text.trim().to_string(),
            Some((start, end)) => {
                let mut out = String::with_capacity(text.len());
                out.push_str(text[..start].trim_start());
                out.push_str(&text[start..end]);
                out.push_str(text[end..].trim_end());
                out
            }
        }
    }
}

/// Split `text` into rows of fields.
///
/// `\n` ends a row outside quotes and `\r` there is dropped. A row holding a
/// single empty field is a blank line and is skipped. Inside quotes, `""` is
/// a literal quote and line breaks are data.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = FieldBuf::default();
    let mut state = State::Unquoted;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match state {
            State::Quoted => match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push_quoted('"');
                }
                '"' => state = State::Unquoted,
                other => field.push_quoted(other),
            },
            State::Unquoted => match c {
                '"' => {
                    field.open_quote();
                    state = State::Quoted;
                }
                ',' => row.push(field.take()),
                '\n' => {
                    row.push(field.take());
                    let finished = std::mem::take(&mut row);
                    if !is_blank_row(&finished) {
                        rows.push(finished);
                    }
                }
                '\r' => {}
                other => field.push(other),
            },
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field.take());
        rows.push(row);
    }

    rows
}

fn is_blank_row(row: &[String]) -> bool {
    row.len() == 1 && row[0].is_empty()
}
