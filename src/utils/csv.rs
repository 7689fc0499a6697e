//! Minimal CSV reading and writing.
//!
//! Covers what the batch table and the exports need: a header row, RFC 4180
//! quoting (URL lists are comma-joined, so they always arrive quoted), and
//! `\n` / `\r\n` record separators.

/// Escapes a single CSV field.
///
/// Wraps the value in double quotes if it contains a comma, a quote, or a
/// line break, doubling any embedded quotes.
pub fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r')
    {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Joins fields into one CSV line (without the trailing newline).
pub fn write_record<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|f| escape_field(f.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Error produced when a quoted field is never closed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unterminated quoted field starting on line {line}")]
pub struct UnterminatedQuote {
    pub line: usize,
}

/// Reads CSV text into records.
///
/// Blank lines outside quotes are skipped. Quoted fields may span lines.
///
/// # Errors
///
/// Returns [`UnterminatedQuote`] if the input ends inside a quoted field.
pub fn read_records(input: &str) -> Result<Vec<Vec<String>>, UnterminatedQuote> {
    let mut records = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;
    let mut quote_line = 0;
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(c);
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => {
                in_quotes = true;
                quote_line = line;
            }
            ',' => record.push(std::mem::take(&mut field)),
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                line += 1;
                finish_record(&mut records, &mut record, &mut field);
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(UnterminatedQuote { line: quote_line });
    }

    finish_record(&mut records, &mut record, &mut field);
    Ok(records)
}

fn finish_record(records: &mut Vec<Vec<String>>, record: &mut Vec<String>, field: &mut String) {
    if record.is_empty() && field.trim().is_empty() {
        field.clear();
        return;
    }
    record.push(std::mem::take(field));
    records.push(std::mem::take(record));
}
