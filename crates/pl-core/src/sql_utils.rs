//! SQL quoting helpers for generated statements

/// Quote a SQL identifier, doubling embedded double quotes.
///
/// # Examples
/// ```
/// use pl_core::sql_utils::quote_ident;
/// assert_eq!(quote_ident("songs_table"), r#""songs_table""#);
/// assert_eq!(quote_ident(r#"odd"name"#), r#""odd""name""#);
/// ```
pub fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

/// Render a single-quoted SQL string literal, doubling embedded single quotes.
///
/// # Examples
/// ```
/// use pl_core::sql_utils::quote_literal;
/// assert_eq!(quote_literal("out/songs_table"), "'out/songs_table'");
/// assert_eq!(quote_literal("o'brien"), "'o''brien'");
/// ```
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Quote and comma-join a list of identifiers
pub fn ident_list(idents: &[&str]) -> String {
    idents
        .iter()
        .map(|i| quote_ident(i))
        .collect::<Vec<_>>()
        .join(", ")
}
