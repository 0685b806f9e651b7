//! SQL to Java type mapping

use serde::Serialize;

use crate::error::{CodegenError, Result};
use crate::parser::{Column, SqlType};

/// Java primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Primitive {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl Primitive {
    pub fn keyword(&self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
        }
    }

    /// The `java.lang` wrapper class
    pub fn boxed(&self) -> &'static str {
        match self {
            Primitive::Boolean => "Boolean",
            Primitive::Byte => "Byte",
            Primitive::Short => "Short",
            Primitive::Int => "Integer",
            Primitive::Long => "Long",
            Primitive::Float => "Float",
            Primitive::Double => "Double",
        }
    }
}

/// Java type of a generated field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JavaType {
    Primitive(Primitive),
    /// Wrapper class of a primitive, used for nullable columns
    Boxed(Primitive),
    BigDecimal,
    String,
    Date,
    Time,
    Timestamp,
    ByteArray,
}

impl JavaType {
    /// Type name as written in a field declaration
    pub fn type_name(&self) -> &'static str {
        match self {
            JavaType::Primitive(p) => p.keyword(),
            JavaType::Boxed(p) => p.boxed(),
            JavaType::BigDecimal => "BigDecimal",
            JavaType::String => "String",
            JavaType::Date => "Date",
            JavaType::Time => "Time",
            JavaType::Timestamp => "Timestamp",
            JavaType::ByteArray => "byte[]",
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, JavaType::Primitive(_))
    }

    /// Fully qualified import needed to use the type, if any
    pub fn import(&self) -> Option<&'static str> {
        match self {
            JavaType::BigDecimal => Some("java.math.BigDecimal"),
            JavaType::Date => Some("java.sql.Date"),
            JavaType::Time => Some("java.sql.Time"),
            JavaType::Timestamp => Some("java.sql.Timestamp"),
            _ => None,
        }
    }

    /// Scalar type usable as a map key: primitives are boxed
    pub fn to_object(self) -> JavaType {
        match self {
            JavaType::Primitive(p) => JavaType::Boxed(p),
            other => other,
        }
    }
}

/// Map a SQL type to a Java type.
///
/// Returns `None` for types with no mapping. A primitive is only chosen for
/// NOT NULL columns; nullable columns get the wrapper class.
pub fn map_type(
    sql_type: SqlType,
    nullable: bool,
    precision: Option<u32>,
    _scale: Option<u32>,
) -> Option<JavaType> {
    let primitive = |p: Primitive| {
        if nullable {
            JavaType::Boxed(p)
        } else {
            JavaType::Primitive(p)
        }
    };

    let mapped = match sql_type {
        SqlType::Bit => match precision {
            Some(size) if size > 1 => JavaType::ByteArray,
            _ => primitive(Primitive::Boolean),
        },
        SqlType::Boolean => primitive(Primitive::Boolean),
        SqlType::TinyInt => primitive(Primitive::Byte),
        SqlType::SmallInt => primitive(Primitive::Short),
        SqlType::Integer => primitive(Primitive::Int),
        SqlType::BigInt => primitive(Primitive::Long),
        SqlType::Real => primitive(Primitive::Float),
        SqlType::Float => match precision {
            Some(p) if (1..=24).contains(&p) => primitive(Primitive::Float),
            _ => primitive(Primitive::Double),
        },
        SqlType::Double => primitive(Primitive::Double),
        SqlType::Decimal | SqlType::Numeric => JavaType::BigDecimal,
        SqlType::Char
        | SqlType::VarChar
        | SqlType::LongVarChar
        | SqlType::NChar
        | SqlType::NVarChar
        | SqlType::LongNVarChar
        | SqlType::Clob
        | SqlType::NClob => JavaType::String,
        SqlType::Date => JavaType::Date,
        SqlType::Time => JavaType::Time,
        SqlType::Timestamp => JavaType::Timestamp,
        SqlType::Binary | SqlType::VarBinary | SqlType::LongVarBinary | SqlType::Blob => {
            JavaType::ByteArray
        }
        SqlType::TimeWithTimezone
        | SqlType::TimestampWithTimezone
        | SqlType::Null
        | SqlType::Other
        | SqlType::JavaObject
        | SqlType::Distinct
        | SqlType::Struct
        | SqlType::Array
        | SqlType::Ref
        | SqlType::Datalink
        | SqlType::RowId
        | SqlType::SqlXml
        | SqlType::Unknown(_) => return None,
    };

    Some(mapped)
}

/// Resolve column types with table/column context on failure
pub struct TypeMapper;

impl TypeMapper {
    /// Get the Java type for a column of `table`
    pub fn resolve(table: &str, column: &Column) -> Result<JavaType> {
        map_type(column.sql_type, column.nullable, column.size, column.scale).ok_or_else(|| {
            CodegenError::UnsupportedSqlType {
                table: table.to_string(),
                column: column.name.clone(),
                code: column.sql_type.code(),
            }
        })
    }
}
