//! Naming utilities for code generation

use std::collections::HashSet;
use std::path::PathBuf;

use heck::{ToLowerCamelCase, ToUpperCamelCase};
use serde::{Deserialize, Serialize};

use crate::config::defaults;

/// Rules for deriving class names from table names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingOptions {
    /// Appended to the key class name
    pub key_suffix: String,
    /// Appended to the value class name
    pub value_suffix: String,
    /// Model a single-column primary key as a bare scalar instead of a class
    pub scalar_single_key: bool,
}

impl Default for NamingOptions {
    fn default() -> Self {
        Self {
            key_suffix: defaults::KEY_SUFFIX.to_string(),
            value_suffix: defaults::VALUE_SUFFIX.to_string(),
            scalar_single_key: defaults::SCALAR_SINGLE_KEY,
        }
    }
}

/// Convert a table name to a class name (UpperCamelCase)
pub fn to_class_name(table_name: &str) -> String {
    let name = table_name.to_upper_camel_case();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", name)
    } else {
        name
    }
}

/// Convert a column name to a field name (lowerCamelCase), escaping keywords
pub fn to_field_name(column_name: &str) -> String {
    let name = column_name.to_lower_camel_case();
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{}", name)
    } else if is_java_keyword(&name) {
        format!("{}_", name)
    } else {
        name
    }
}

/// Field names for a column list, made unique by numeric suffixes
/// e.g., ["user_id", "USER_ID"] -> ["userId", "userId2"]
pub fn unique_field_names<'a, I>(columns: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut used: HashSet<String> = HashSet::new();
    let mut names = Vec::new();

    for column in columns {
        let name = to_field_name(column);
        let final_name = if used.contains(&name) {
            let mut counter = 2;
            loop {
                let candidate = format!("{}{}", name, counter);
                if !used.contains(&candidate) {
                    break candidate;
                }
                counter += 1;
            }
        } else {
            name
        };

        used.insert(final_name.clone());
        names.push(final_name);
    }

    names
}

/// Property part of accessor names: "boolCol" -> "BoolCol"
pub fn to_property_name(field_name: &str) -> String {
    let mut chars = field_name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Relative directory for a dotted package: "com.example.model" -> com/example/model
pub fn package_path(package_name: &str) -> PathBuf {
    package_name
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Type a generated class may refer to by simple name, if `class_name` is one.
///
/// A generated class with such a name would shadow its own imports or the
/// `java.lang` types used by its fields and methods.
pub fn referenced_type(class_name: &str) -> Option<&'static str> {
    let qualified = match class_name {
        "Serializable" => "java.io.Serializable",
        "BigDecimal" => "java.math.BigDecimal",
        "Date" => "java.sql.Date",
        "Time" => "java.sql.Time",
        "Timestamp" => "java.sql.Timestamp",
        "Arrays" => "java.util.Arrays",
        "Object" => "java.lang.Object",
        "Override" => "java.lang.Override",
        "String" => "java.lang.String",
        "Boolean" => "java.lang.Boolean",
        "Byte" => "java.lang.Byte",
        "Short" => "java.lang.Short",
        "Integer" => "java.lang.Integer",
        "Long" => "java.lang.Long",
        "Float" => "java.lang.Float",
        "Double" => "java.lang.Double",
        _ => return None,
    };
    Some(qualified)
}

/// Check if a name is a Java reserved word or literal
pub fn is_java_keyword(name: &str) -> bool {
    matches!(
        name,
        "abstract"
            | "assert"
            | "boolean"
            | "break"
            | "byte"
            | "case"
            | "catch"
            | "char"
            | "class"
            | "const"
            | "continue"
            | "default"
            | "do"
            | "double"
            | "else"
            | "enum"
            | "extends"
            | "final"
            | "finally"
            | "float"
            | "for"
            | "goto"
            | "if"
            | "implements"
            | "import"
            | "instanceof"
            | "int"
            | "interface"
            | "long"
            | "native"
            | "new"
            | "package"
            | "private"
            | "protected"
            | "public"
            | "return"
            | "short"
            | "static"
            | "strictfp"
            | "super"
            | "switch"
            | "synchronized"
            | "this"
            | "throw"
            | "throws"
            | "transient"
            | "try"
            | "void"
            | "volatile"
            | "while"
            | "true"
            | "false"
            | "null"
            | "var"
            | "record"
            | "yield"
            | "_"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_class_name() {
        assert_eq!(to_class_name("PRIMITIVES"), "Primitives");
        assert_eq!(to_class_name("user_settings"), "UserSettings");
        assert_eq!(to_class_name("ORDER_ITEMS"), "OrderItems");
        assert_eq!(to_class_name("2fa_codes"), "_2faCodes");
    }

    #[test]
    fn test_referenced_type() {
        assert_eq!(referenced_type("Date"), Some("java.sql.Date"));
        assert_eq!(referenced_type("Arrays"), Some("java.util.Arrays"));
        assert_eq!(referenced_type("Integer"), Some("java.lang.Integer"));
        assert_eq!(referenced_type("DateKey"), None);
        assert_eq!(referenced_type("Users"), None);
    }

    #[test]
    fn test_to_field_name() {
        assert_eq!(to_field_name("boolCol"), "boolCol");
        assert_eq!(to_field_name("first_name"), "firstName");
        assert_eq!(to_field_name("PK"), "pk");
        assert_eq!(to_field_name("class"), "class_");
        assert_eq!(to_field_name("default"), "default_");
    }

    #[test]
    fn test_unique_field_names() {
        let names = unique_field_names(["user_id", "USER_ID", "userId", "name"]);
        assert_eq!(names, ["userId", "userId2", "userId3", "name"]);
    }

    #[test]
    fn test_to_property_name() {
        assert_eq!(to_property_name("boolCol"), "BoolCol");
        assert_eq!(to_property_name("pk"), "Pk");
        assert_eq!(to_property_name(""), "");
    }

    #[test]
    fn test_package_path() {
        assert_eq!(
            package_path("org.example.model"),
            PathBuf::from("org").join("example").join("model")
        );
    }
}
