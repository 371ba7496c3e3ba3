use std::borrow::Cow;

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

/// Splits off the longest prefix of `input` whose characters satisfy `predicate`.
pub fn consume_while<'s>(input: &mut &'s str, mut predicate: impl FnMut(&char) -> bool) -> &'s str {
    let len = input
        .char_indices()
        .find(|(_, c)| !predicate(c))
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    if len == 0 {
        return "";
    }
    let result = &input[..len];
    *input = &input[len..];
    result
}

/// Characters that can appear in field names, association names and parameter names.
pub fn is_word_char(c: &char) -> bool {
    c.is_alphanumeric() || *c == '_'
}

/// Breaks a statement on its main clauses, for human readable logs.
pub fn printable_query(query: &str) -> Cow<'_, str> {
    const CLAUSES: [&str; 6] = [
        " FROM ",
        " LEFT JOIN ",
        " JOIN ",
        " WHERE ",
        " GROUP BY ",
        " ORDER BY ",
    ];
    let next = |input: &str| {
        CLAUSES
            .iter()
            .filter_map(|clause| input.find(clause).map(|i| (i, *clause)))
            .min_by_key(|(i, _)| *i)
    };
    if next(query).is_none() {
        return Cow::Borrowed(query);
    }
    let mut result = String::with_capacity(query.len() + 16);
    let mut rest = query;
    while let Some((i, clause)) = next(rest) {
        result.push_str(&rest[..i]);
        result.push('\n');
        result.push_str(&clause[1..]);
        rest = &rest[i + clause.len()..];
    }
    result.push_str(rest);
    Cow::Owned(result)
}

/// Longest prefix of `value` not exceeding `max` bytes that ends on a char boundary.
pub fn truncate_str(value: &str, max: usize) -> &str {
    if value.len() <= max {
        return value;
    }
    let mut end = max;
    while !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}

#[macro_export]
macro_rules! truncate_long {
    ($query:expr) => {
        format_args!(
            "{}{}",
            $crate::truncate_str(&$query, 497).trim_end(),
            if $query.len() > 497 { "..." } else { "" },
        )
    };
}
