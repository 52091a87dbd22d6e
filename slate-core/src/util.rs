use regex::Regex;
use std::{
    cmp::min,
    fmt::{self, Display},
    sync::LazyLock,
};

/// Writes every item of `values` through `f`, separating consecutive non-empty outputs with `separator`.
pub fn separated_by<T, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) where
    F: FnMut(&mut String, T),
{
    let mut len = out.len();
    for v in values {
        if out.len() > len {
            out.push_str(separator);
        }
        len = out.len();
        f(out, v);
    }
}

/// Same as [`separated_by`] but stops at the first error.
pub fn try_separated_by<T, E, F>(
    out: &mut String,
    values: impl IntoIterator<Item = T>,
    mut f: F,
    separator: &str,
) -> Result<(), E>
where
    F: FnMut(&mut String, T) -> Result<(), E>,
{
    let mut len = out.len();
    for v in values {
        if out.len() > len {
            out.push_str(separator);
        }
        len = out.len();
        f(out, v)?;
    }
    Ok(())
}

/// Plain identifiers can be written without quotes unless they are reserved words.
pub fn is_plain_identifier(name: &str) -> bool {
    static IDENTIFIER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("identifier regex must compile")
    });
    IDENTIFIER_REGEX.is_match(name)
}

#[macro_export]
macro_rules! write_integer {
    ($out:ident, $value:expr) => {{
        let mut buffer = $crate::itoa::Buffer::new();
        $out.push_str(buffer.format($value));
    }};
}

#[macro_export]
macro_rules! possibly_parenthesized {
    ($out:ident, $cond:expr, $v:expr) => {
        if $cond {
            $out.push('(');
            $v;
            $out.push(')');
        } else {
            $v;
        }
    };
}

/// Display adapter printing at most ~500 bytes of a query, cut on a char boundary.
pub struct Truncated<'a>(pub &'a str);

impl Display for Truncated<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut end = min(self.0.len(), 497);
        while !self.0.is_char_boundary(end) {
            end -= 1;
        }
        write!(
            f,
            "{}{}",
            self.0[..end].trim_end(),
            if self.0.len() > end { "..." } else { "" }
        )
    }
}

#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        $crate::Truncated(&$query)
    };
}
