use smallvec::SmallVec;
use spell_core::{CompileOptions, Element, RAW_TEXT_TAGS, VOID_TAGS};

use crate::error::{ParseError, ParseErrorKind};
use crate::modifiers::{parse_attribute_group, split_modifiers};

/// Bytes that can be used inside a tag name. `/` only matters for `//`
/// comment lines, but keeping it here lets the scanner treat comments as
/// ordinary tag candidates until the name is complete.
fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'@' | b'/')
}

/// Parses Spell source text into an element structure.
///
/// Indentation is normalized to tabs first (the space-per-level unit is
/// inferred from the first indented line, defaulting to 4), and a synthetic
/// trailing newline is appended so a final unterminated line still closes.
pub fn parse(source: &str, options: &CompileOptions) -> Result<Vec<Element>, ParseError> {
    let prepared = prepare_source(source);
    let (elements, _) = parse_block(&prepared, options, 0, 0)?;
    Ok(elements)
}

/// Parses one indentation level, starting at byte offset `start`.
///
/// Returns the elements found at this level together with the offset of the
/// last consumed byte. When a tag shallower than `indent` is found, the scan
/// position is rewound to just before that tag and control returns to the
/// caller, which re-reads the tag at its own level.
fn parse_block(
    code: &str,
    options: &CompileOptions,
    indent: usize,
    start: usize,
) -> Result<(Vec<Element>, usize), ParseError> {
    let bytes = code.as_bytes();
    let mut elements: Vec<Element> = Vec::new();
    let mut tag_name = String::new();
    let mut tag_indent = 0usize;
    let mut i = start;

    while i < bytes.len() {
        let c = bytes[i];

        if is_name_byte(c) {
            tag_name.push(c as char);
            i += 1;
            continue;
        }

        // A tab deepens the indent of the current line
        if c == b'\t' {
            tag_indent += 1;
        }

        if tag_name.is_empty() {
            if c == b'\n' {
                tag_indent = 0;
            }
            i += 1;
            continue;
        }

        // Comment line: discard to the end of the line
        if tag_name.starts_with("//") {
            i = find_from(code, i, '\n').unwrap_or(bytes.len());
            tag_name.clear();
            tag_indent = 0;
            i += 1;
            continue;
        }

        // A tag above our level belongs to an ancestor call: rewind to just
        // before it and hand it back
        if tag_indent < indent {
            let rewind = i.saturating_sub(tag_name.len() + 1 + tag_indent);
            return Ok((elements, rewind));
        }

        // Scan the modifier string (classes, id, attribute groups and the
        // multiline marker), respecting nesting and quoted strings
        let mut j = i;
        let mut nest = 0i32;
        let mut in_quotes = false;
        loop {
            if j >= bytes.len() {
                return Err(ParseError::at(ParseErrorKind::UnmatchedNesting, code, i));
            }
            let cj = bytes[j];
            if in_quotes {
                if cj == b'"' {
                    in_quotes = false;
                }
            } else {
                match cj {
                    b'\n' | b' ' if nest == 0 => break,
                    b'(' | b'[' | b'{' => nest += 1,
                    b')' | b']' | b'}' => nest -= 1,
                    b'"' => in_quotes = true,
                    _ => {}
                }
            }
            j += 1;
        }
        let things = split_modifiers(code[i..j].trim());
        i = j;

        let mut attributes = Vec::new();
        for group in things.iter().filter(|t| t.starts_with('(')) {
            parse_attribute_group(group, options, &mut attributes);
        }

        let classes: SmallVec<[String; 4]> = things
            .iter()
            .filter(|t| t.starts_with('.') && t.len() > 1)
            .map(|t| t[1..].to_string())
            .collect();
        let id = things
            .iter()
            .find(|t| t.starts_with('#'))
            .map(|t| t[1..].to_string());
        let is_multiline = things.last().is_some_and(|t| t == ".");

        let mut inner_text;
        let mut children = Vec::new();
        if is_multiline {
            // Capture every line until the first non-blank line back at our
            // indentation level (or above)
            let (text, end) = capture_multiline_block(code, i, indent);
            inner_text = text;
            i = end;
        } else {
            // A single-line tag can still carry trailing text...
            let until = find_from(code, i, '\n').unwrap_or(bytes.len());
            inner_text = if until > i {
                code[i + 1..until].to_string()
            } else {
                String::new()
            };
            i = until;

            // ...and it can always have children
            let (parsed, finish) = parse_block(code, options, indent + 1, i)?;
            children = parsed;
            i = finish;
        }

        let mut el = Element::new(std::mem::take(&mut tag_name), options.file_path.clone());
        el.raw_text = RAW_TEXT_TAGS.contains(el.tag_name.as_str());
        el.is_void = VOID_TAGS.contains(el.tag_name.as_str());
        el.multiline = is_multiline;
        el.attributes = attributes;
        el.classes = classes;
        el.id = id;
        el.inner_text = (!inner_text.is_empty()).then_some(inner_text);
        el.children = children;
        elements.push(el);

        tag_indent = 0;
        i += 1;
    }

    Ok((elements, i))
}

/// Captures a multiline text block starting right after offset `i` (the
/// whitespace byte that ended the tag's modifier scan). The block runs until
/// the first subsequent non-blank line indented at most `indent` tabs.
///
/// Returns the captured text (with one level of leading indentation removed)
/// and the offset scanning should resume from.
fn capture_multiline_block(code: &str, i: usize, indent: usize) -> (String, usize) {
    let bytes = code.as_bytes();

    let mut boundary = None;
    let mut line_start = match find_from(code, i, '\n') {
        Some(nl) => nl + 1,
        None => bytes.len(),
    };
    while line_start < bytes.len() {
        let mut tabs = 0;
        while bytes.get(line_start + tabs) == Some(&b'\t') {
            tabs += 1;
        }
        let first = bytes.get(line_start + tabs).copied();
        if tabs <= indent && first.is_some() && first != Some(b'\n') {
            boundary = Some(line_start);
            break;
        }
        line_start = match find_from(code, line_start, '\n') {
            Some(nl) => nl + 1,
            None => bytes.len(),
        };
    }

    let (end, resume) = match boundary {
        // Stop before the newline that precedes the boundary line
        Some(b) => (b - 1, b - 1),
        None => (bytes.len(), bytes.len()),
    };

    let mut text = &code[(i + 1).min(end)..end];
    if boundary.is_none() {
        text = text.trim_end_matches('\n');
    }

    // The block is written one level deeper than the tag; drop that
    // indentation from the first line (continuation lines keep theirs)
    let mut stripped = 0;
    while stripped < indent + 1 && text.as_bytes().first() == Some(&b'\t') {
        text = &text[1..];
        stripped += 1;
    }

    (text.to_string(), resume)
}

fn find_from(code: &str, from: usize, needle: char) -> Option<usize> {
    code[from..].find(needle).map(|n| from + n)
}

/// Rewrites leading space-runs into tabs so indentation comparisons are
/// always tab-count based, and appends the synthetic trailing newline.
fn prepare_source(source: &str) -> String {
    let unit = infer_indent_unit(source);
    let mut out = String::with_capacity(source.len() + 1);

    for line in source.split_inclusive('\n') {
        let bytes = line.as_bytes();
        let mut pos = 0;
        while pos < bytes.len() {
            match bytes[pos] {
                b'\t' => {
                    out.push('\t');
                    pos += 1;
                }
                b' ' => {
                    let mut run = 0;
                    while bytes.get(pos + run) == Some(&b' ') {
                        run += 1;
                    }
                    for _ in 0..run / unit {
                        out.push('\t');
                    }
                    for _ in 0..run % unit {
                        out.push(' ');
                    }
                    pos += run;
                    break;
                }
                _ => break,
            }
        }
        out.push_str(&line[pos..]);
    }

    out.push('\n');
    out
}

/// The number of spaces that make up one indentation level, taken from the
/// first indented line. Tab-indented sources keep the default.
fn infer_indent_unit(source: &str) -> usize {
    for line in source.lines() {
        if line.starts_with('\t') {
            break;
        }
        let spaces = line.len() - line.trim_start_matches(' ').len();
        if spaces > 0 && spaces < line.len() {
            return spaces;
        }
    }
    4
}
