use regex::{Captures, Regex};

use crate::VariableScope;

lazy_static! {
    static ref VARIABLE: Regex = Regex::new(r"@\{[A-Za-z0-9_\-@]*?\}").unwrap();
}

/// Replaces every `@{name}` in the input with the scope's binding for
/// `name`, stripping one layer of surrounding quotes from the bound value.
/// Unresolved placeholders are left untouched.
pub(crate) fn substitute_variables(input: &str, scope: &VariableScope) -> String {
    VARIABLE
        .replace_all(input, |caps: &Captures| {
            let placeholder = caps.get(0).unwrap().as_str();
            let name = &placeholder[2..placeholder.len() - 1];
            match scope.get(name) {
                Some(value) => strip_quote_layer(value).to_string(),
                None => placeholder.to_string(),
            }
        })
        .into_owned()
}

fn strip_quote_layer(value: &str) -> &str {
    if (value.starts_with('"') || value.starts_with('\'')) && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
