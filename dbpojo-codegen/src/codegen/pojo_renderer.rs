//! Java POJO renderer - turns a schema descriptor into source text
//!
//! Rendering is pure: the same descriptor and options always produce the same
//! text, except for the header line carrying [`GENERATED_MARKER`] and the date.

use std::collections::BTreeSet;
use std::path::PathBuf;

use chrono::NaiveDate;

use super::naming::{package_path, to_property_name, unique_field_names};
use super::pojo_generator::GeneratorOptions;
use super::type_mapper::{JavaType, Primitive, TypeMapper};
use crate::config::validate_package_name;
use crate::error::Result;
use crate::parser::{Column, SchemaDescriptor};

/// Text present in the header line of every generated file
pub const GENERATED_MARKER: &str = "Code generated by dbpojo";

/// Which of a table's classes a file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Key,
    Value,
}

/// A source file rendered in memory, not yet written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    /// Path relative to the output directory
    pub relative_path: PathBuf,
    pub class_name: String,
    pub kind: ClassKind,
    pub content: String,
}

/// One field of a generated class
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub column: String,
    pub name: String,
    pub java_type: JavaType,
}

/// Resolve fields for columns of `table`, in the given order
pub fn resolve_fields(table: &str, columns: &[&Column]) -> Result<Vec<Field>> {
    let names = unique_field_names(columns.iter().map(|c| c.name.as_str()));

    columns
        .iter()
        .zip(names)
        .map(|(column, name)| {
            Ok(Field {
                column: column.name.clone(),
                name,
                java_type: TypeMapper::resolve(table, column)?,
            })
        })
        .collect()
}

/// Render every class requested for a descriptor
pub fn render_descriptor(
    desc: &SchemaDescriptor,
    options: &GeneratorOptions,
) -> Result<Vec<GeneratedFile>> {
    validate_package_name(&options.package_name)?;

    let generated_on = options
        .generated_on
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let dir = package_path(&options.package_name);
    let mut files = Vec::new();

    if options.generate_key_class && !desc.key_class_name().is_empty() {
        let fields = resolve_fields(desc.table(), &desc.key_columns())?;
        files.push(GeneratedFile {
            relative_path: dir.join(format!("{}.java", desc.key_class_name())),
            class_name: desc.key_class_name().to_string(),
            kind: ClassKind::Key,
            content: render_class(
                desc.table(),
                desc.key_class_name(),
                ClassKind::Key,
                &fields,
                options,
                generated_on,
            ),
        });
    }

    if !desc.value_class_name().is_empty() {
        let inline_keys = options.include_keys_in_value || !options.generate_key_class;
        let columns: Vec<&Column> = if inline_keys {
            desc.columns().iter().collect()
        } else {
            desc.value_columns()
        };
        let fields = resolve_fields(desc.table(), &columns)?;
        files.push(GeneratedFile {
            relative_path: dir.join(format!("{}.java", desc.value_class_name())),
            class_name: desc.value_class_name().to_string(),
            kind: ClassKind::Value,
            content: render_class(
                desc.table(),
                desc.value_class_name(),
                ClassKind::Value,
                &fields,
                options,
                generated_on,
            ),
        });
    }

    Ok(files)
}

/// Render one class
pub fn render_class(
    table: &str,
    class_name: &str,
    kind: ClassKind,
    fields: &[Field],
    options: &GeneratorOptions,
    generated_on: NaiveDate,
) -> String {
    let mut code = String::new();

    code.push_str("/**\n");
    code.push_str(&format!(
        " * {} on {}.\n",
        GENERATED_MARKER,
        generated_on.format("%Y-%m-%d")
    ));
    code.push_str(" */\n");
    code.push_str(&format!("package {};\n\n", options.package_name));

    for import in collect_imports(fields) {
        code.push_str(&format!("import {};\n", import));
    }
    code.push('\n');

    let role = match kind {
        ClassKind::Key => "Key",
        ClassKind::Value => "Value",
    };
    code.push_str("/**\n");
    code.push_str(&format!(" * {} class for table {}.\n", role, table));
    code.push_str(" */\n");
    code.push_str(&format!(
        "public class {} implements Serializable {{\n",
        class_name
    ));
    code.push_str("    /** */\n");
    code.push_str("    private static final long serialVersionUID = 0L;\n");

    for field in fields {
        code.push('\n');
        code.push_str(&format!("    /** Value for column {}. */\n", field.column));
        code.push_str(&format!(
            "    private {} {};\n",
            field.java_type.type_name(),
            field.name
        ));
    }

    code.push_str(&generate_constructors(class_name, fields, options));

    for field in fields {
        code.push_str(&generate_accessors(field));
    }

    code.push_str(&generate_equals(class_name, fields));
    code.push_str(&generate_hash_code(fields));
    code.push_str(&generate_to_string(class_name, fields));

    code.push_str("}\n");

    code
}

fn collect_imports(fields: &[Field]) -> BTreeSet<&'static str> {
    let mut imports = BTreeSet::new();
    imports.insert("java.io.Serializable");

    for field in fields {
        if let Some(import) = field.java_type.import() {
            imports.insert(import);
        }
        if field.java_type == JavaType::ByteArray {
            imports.insert("java.util.Arrays");
        }
    }

    imports
}

fn generate_constructors(class_name: &str, fields: &[Field], options: &GeneratorOptions) -> String {
    let mut code = String::new();

    code.push_str("\n    /**\n");
    code.push_str("     * Empty constructor.\n");
    code.push_str("     */\n");
    code.push_str(&format!("    public {}() {{\n", class_name));
    code.push_str("        // No-op.\n");
    code.push_str("    }\n");

    if options.constructor_with_args && !fields.is_empty() {
        code.push_str("\n    /**\n");
        code.push_str("     * Full constructor.\n");
        code.push_str("     */\n");
        code.push_str(&format!("    public {}(\n", class_name));

        let params: Vec<String> = fields
            .iter()
            .map(|f| format!("        {} {}", f.java_type.type_name(), f.name))
            .collect();
        code.push_str(&params.join(",\n"));
        code.push_str("\n    ) {\n");

        for field in fields {
            code.push_str(&format!("        this.{0} = {0};\n", field.name));
        }
        code.push_str("    }\n");
    }

    code
}

fn generate_accessors(field: &Field) -> String {
    let type_name = field.java_type.type_name();
    let property = to_property_name(&field.name);

    format!(
        r#"
    /**
     * Gets {name}.
     *
     * @return Value for {name}.
     */
    public {type_name} get{property}() {{
        return {name};
    }}

    /**
     * Sets {name}.
     *
     * @param {name} New value for {name}.
     */
    public void set{property}({type_name} {name}) {{
        this.{name} = {name};
    }}
"#,
        name = field.name,
        type_name = type_name,
        property = property,
    )
}

/// Condition that is true when the field differs between `this` and `that`
fn field_differs(field: &Field) -> String {
    let name = &field.name;
    match field.java_type {
        JavaType::Primitive(Primitive::Float) => {
            format!("Float.compare(this.{0}, that.{0}) != 0", name)
        }
        JavaType::Primitive(Primitive::Double) => {
            format!("Double.compare(this.{0}, that.{0}) != 0", name)
        }
        JavaType::Primitive(_) => format!("this.{0} != that.{0}", name),
        JavaType::ByteArray => format!("!Arrays.equals(this.{0}, that.{0})", name),
        _ => format!(
            "this.{0} != null ? !this.{0}.equals(that.{0}) : that.{0} != null",
            name
        ),
    }
}

fn field_hash(field: &Field) -> String {
    let name = &field.name;
    match field.java_type {
        JavaType::Primitive(p) => format!("{}.hashCode(this.{})", p.boxed(), name),
        JavaType::ByteArray => format!("Arrays.hashCode(this.{})", name),
        _ => format!("(this.{0} != null ? this.{0}.hashCode() : 0)", name),
    }
}

fn generate_equals(class_name: &str, fields: &[Field]) -> String {
    let mut code = String::new();

    code.push_str("\n    /** {@inheritDoc} */\n");
    code.push_str("    @Override public boolean equals(Object o) {\n");
    code.push_str("        if (this == o)\n");
    code.push_str("            return true;\n\n");
    code.push_str(&format!("        if (!(o instanceof {}))\n", class_name));
    code.push_str("            return false;\n\n");

    if !fields.is_empty() {
        code.push_str(&format!(
            "        {0} that = ({0})o;\n\n",
            class_name
        ));
    }

    for field in fields {
        code.push_str(&format!("        if ({})\n", field_differs(field)));
        code.push_str("            return false;\n\n");
    }

    code.push_str("        return true;\n");
    code.push_str("    }\n");

    code
}

fn generate_hash_code(fields: &[Field]) -> String {
    let mut code = String::new();

    code.push_str("\n    /** {@inheritDoc} */\n");
    code.push_str("    @Override public int hashCode() {\n");

    match fields.split_first() {
        Some((first, rest)) => {
            code.push_str(&format!("        int res = {};\n\n", field_hash(first)));
            for field in rest {
                code.push_str(&format!("        res = 31 * res + {};\n\n", field_hash(field)));
            }
        }
        None => code.push_str("        int res = 0;\n\n"),
    }

    code.push_str("        return res;\n");
    code.push_str("    }\n");

    code
}

fn generate_to_string(class_name: &str, fields: &[Field]) -> String {
    let mut code = String::new();

    code.push_str("\n    /** {@inheritDoc} */\n");
    code.push_str("    @Override public String toString() {\n");
    code.push_str(&format!("        return \"{} [", class_name));

    for (i, field) in fields.iter().enumerate() {
        let value = match field.java_type {
            JavaType::ByteArray => format!("Arrays.toString(this.{})", field.name),
            _ => format!("this.{}", field.name),
        };
        let separator = if i == 0 { "" } else { ", " };
        code.push_str(&format!(
            "{}{}=\" + {} +\n            \"",
            separator, field.name, value
        ));
    }

    code.push_str("]\";\n");
    code.push_str("    }\n");

    code
}
