//! Identifier spelling

use heck::ToSnakeCase;
use proc_macro2::Ident;
use quote::format_ident;

const RUST_KEYWORDS: &[&str] = &[
    "as", "break", "const", "continue", "else", "enum", "extern", "false", "fn", "for", "if",
    "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub", "ref", "return", "static",
    "struct", "trait", "true", "type", "unsafe", "use", "where", "while", "async", "await", "dyn",
    "abstract", "become", "box", "do", "final", "gen", "macro", "override", "priv", "typeof",
    "unsized", "virtual", "yield", "try",
];

/// Keywords that cannot be raw identifiers
const PATH_KEYWORDS: &[&str] = &["self", "Self", "super", "crate", "_"];

/// Identifier for `name`, as a raw identifier if it is a keyword.
pub(super) fn escape_rust_keyword(name: &str) -> Ident {
    if PATH_KEYWORDS.contains(&name) {
        format_ident!("{}_", name)
    } else if RUST_KEYWORDS.contains(&name) {
        format_ident!("r#{}", name)
    } else {
        format_ident!("{}", name)
    }
}

/// Module (and file stem) for an artifact name.
pub(super) fn module_name(artifact: &str) -> String {
    let snake = artifact.to_snake_case();
    if PATH_KEYWORDS.contains(&snake.as_str()) {
        format!("{snake}_")
    } else {
        snake
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_rust_keyword() {
        assert_eq!(escape_rust_keyword("name").to_string(), "name");
        assert_eq!(escape_rust_keyword("type").to_string(), "r#type");
        assert_eq!(escape_rust_keyword("self").to_string(), "self_");
    }

    #[test]
    fn test_module_name() {
        assert_eq!(module_name("UserFieldSelection"), "user_field_selection");
        assert_eq!(module_name("DateTime"), "date_time");
        assert_eq!(module_name("Type"), "type");
        assert_eq!(module_name("Crate"), "crate_");
    }
}
