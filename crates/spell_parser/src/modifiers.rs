use spell_core::{is_link_attribute, path, Attribute, CompileOptions};

/// Splits a tag's modifier string into separate tokens, breaking before
/// `#`, `(` and `.` unless they sit inside a double-quoted string.
///
/// `.card.wide#main(href="a.b")` => `[".card", ".wide", "#main", "(href=\"a.b\")"]`
pub(crate) fn split_modifiers(modifiers: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut curr = String::new();
    let mut in_quotes = false;

    for ch in modifiers.chars() {
        if in_quotes {
            curr.push(ch);
            if ch == '"' {
                in_quotes = false;
            }
            continue;
        }
        match ch {
            '"' => {
                curr.push(ch);
                in_quotes = true;
            }
            '#' | '(' | '.' => {
                if !curr.is_empty() {
                    tokens.push(std::mem::take(&mut curr));
                }
                curr.push(ch);
            }
            _ => curr.push(ch),
        }
    }
    if !curr.is_empty() {
        tokens.push(curr);
    }
    tokens
}

/// Parses one parenthesized attribute group (`(key, key=value, ...)`) into
/// the ordered attribute list. A repeated key overrides the stored value
/// without changing its position.
pub(crate) fn parse_attribute_group(
    group: &str,
    options: &CompileOptions,
    out: &mut Vec<Attribute>,
) {
    // A `(` directly followed by another separator leaves a lone `(` token;
    // that is an empty group, not a panic
    let inner = group.get(1..group.len().saturating_sub(1)).unwrap_or("");

    // Split on commas and spaces, except inside quotes
    let mut pieces: Vec<String> = Vec::new();
    let mut curr = String::new();
    let mut in_quotes = false;
    for ch in inner.chars() {
        if in_quotes {
            curr.push(ch);
            if ch == '"' {
                in_quotes = false;
            }
            continue;
        }
        match ch {
            ',' | ' ' => {
                if !curr.is_empty() {
                    pieces.push(std::mem::take(&mut curr));
                }
            }
            '"' => {
                curr.push(ch);
                in_quotes = true;
            }
            _ => curr.push(ch),
        }
    }
    if !curr.is_empty() {
        pieces.push(curr);
    }

    for piece in pieces {
        let (name, value) = match piece.split_once('=') {
            Some((name, value)) => (name.trim().to_string(), value.to_string()),
            None => (piece.trim().to_string(), String::new()),
        };
        let value = remap_link_value(&name, value, options);
        match out.iter_mut().find(|a| a.name == name) {
            Some(existing) => existing.value = value,
            None => out.push(Attribute { name, value }),
        }
    }
}

/// Rewrites a link-bearing attribute value so it stays correct relative to
/// the output location of the root file this content is inlined into.
fn remap_link_value(name: &str, value: String, options: &CompileOptions) -> String {
    let Some(target) = &options.path_remap_target else {
        return value;
    };
    if !is_link_attribute(name) {
        return value;
    }

    let raw = strip_quote_layer(&value);
    let rel = path::relative_from(
        &path::parent_dir(target),
        &path::parent_dir(&options.file_path),
    );
    format!("\"./{}\"", path::normalize(&format!("{rel}/{raw}")))
}

/// Removes one layer of surrounding quote characters, if present.
pub(crate) fn strip_quote_layer(value: &str) -> &str {
    if (value.starts_with('"') || value.starts_with('\'')) && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
