// Inventory file format
//
//   <name> <price>\n
//
// One item per line. Names cannot contain whitespace (the reader splits on it).
// No header, no escaping, no versioning.

use crate::error::ParseError;
use crate::item::Item;
use std::io::{self, Write};

/// Parse one line of the inventory file
///
/// `line_no` is 1-based and only used for error reporting.
pub fn parse_line(line_no: usize, text: &str) -> Result<Item, ParseError> {
    let fail = |reason: &str| ParseError {
        line: line_no,
        content: text.to_string(),
        reason: reason.to_string(),
    };

    let mut tokens = text.split_whitespace();
    let name = tokens.next().ok_or_else(|| fail("empty line"))?;
    let price = tokens.next().ok_or_else(|| fail("missing price"))?;

    if tokens.next().is_some() {
        return Err(fail("trailing tokens after price"));
    }

    // `inf` and `NaN` parse too, so anything `format_item` writes reads back
    let price: f64 = price.parse().map_err(|_| fail("price is not a number"))?;

    Ok(Item::new(name, price))
}

/// Parse a whole file body
///
/// Blank lines are skipped. Parsing stops at the first bad line: the items
/// before it are returned together with the error that stopped the read.
pub fn parse_str(text: &str) -> (Vec<Item>, Option<ParseError>) {
    parse_bytes(text.as_bytes())
}

/// Parse raw file contents
///
/// Lines are decoded one at a time; a line that is not UTF-8 ends the read
/// like any other unreadable line.
pub fn parse_bytes(bytes: &[u8]) -> (Vec<Item>, Option<ParseError>) {
    let mut items = Vec::new();

    for (i, raw) in bytes.split(|b| *b == b'\n').enumerate() {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        let line = match std::str::from_utf8(raw) {
            Ok(line) => line,
            Err(_) => {
                let err = ParseError {
                    line: i + 1,
                    content: String::from_utf8_lossy(raw).into_owned(),
                    reason: "line is not valid UTF-8".to_string(),
                };
                return (items, Some(err));
            }
        };

        if line.trim().is_empty() {
            continue;
        }
        match parse_line(i + 1, line) {
            Ok(item) => items.push(item),
            Err(e) => return (items, Some(e)),
        }
    }

    (items, None)
}

/// Strict variant of [`parse_str`]: any bad line is an error
pub fn parse_str_strict(text: &str) -> Result<Vec<Item>, ParseError> {
    match parse_str(text) {
        (items, None) => Ok(items),
        (_, Some(e)) => Err(e),
    }
}

/// `f64` Display is the shortest representation that parses back to the same value
pub fn format_item(item: &Item) -> String {
    format!("{} {}", item.name(), item.price())
}

pub fn write_items<W: Write>(mut writer: W, items: &[Item]) -> io::Result<()> {
    for item in items {
        writeln!(writer, "{}", format_item(item))?;
    }
    writer.flush()
}
