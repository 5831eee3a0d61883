//! Identifier case conversion.

use heck::ToSnakeCase;

/// `"CamelSnake"` -> `"camel_snake"`, for deriving column names from Rust
/// field or type names.
pub fn camel_to_snake(name: &str) -> String {
    name.to_snake_case()
}
