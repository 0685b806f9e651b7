//! SQL type codes as reported by JDBC-style metadata (`java.sql.Types`)

use serde::{Deserialize, Serialize};

/// A SQL column type, keyed by its JDBC type code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlType {
    Bit,
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Real,
    Float,
    Double,
    Decimal,
    Numeric,
    Char,
    VarChar,
    LongVarChar,
    NChar,
    NVarChar,
    LongNVarChar,
    Clob,
    NClob,
    Date,
    Time,
    Timestamp,
    TimeWithTimezone,
    TimestampWithTimezone,
    Binary,
    VarBinary,
    LongVarBinary,
    Blob,
    Null,
    Other,
    JavaObject,
    Distinct,
    Struct,
    Array,
    Ref,
    Datalink,
    RowId,
    SqlXml,
    /// A code with no standard meaning
    Unknown(i32),
}

impl SqlType {
    /// The JDBC type code
    pub fn code(&self) -> i32 {
        match self {
            SqlType::Bit => -7,
            SqlType::Boolean => 16,
            SqlType::TinyInt => -6,
            SqlType::SmallInt => 5,
            SqlType::Integer => 4,
            SqlType::BigInt => -5,
            SqlType::Real => 7,
            SqlType::Float => 6,
            SqlType::Double => 8,
            SqlType::Decimal => 3,
            SqlType::Numeric => 2,
            SqlType::Char => 1,
            SqlType::VarChar => 12,
            SqlType::LongVarChar => -1,
            SqlType::NChar => -15,
            SqlType::NVarChar => -9,
            SqlType::LongNVarChar => -16,
            SqlType::Clob => 2005,
            SqlType::NClob => 2011,
            SqlType::Date => 91,
            SqlType::Time => 92,
            SqlType::Timestamp => 93,
            SqlType::TimeWithTimezone => 2013,
            SqlType::TimestampWithTimezone => 2014,
            SqlType::Binary => -2,
            SqlType::VarBinary => -3,
            SqlType::LongVarBinary => -4,
            SqlType::Blob => 2004,
            SqlType::Null => 0,
            SqlType::Other => 1111,
            SqlType::JavaObject => 2000,
            SqlType::Distinct => 2001,
            SqlType::Struct => 2002,
            SqlType::Array => 2003,
            SqlType::Ref => 2006,
            SqlType::Datalink => 70,
            SqlType::RowId => -8,
            SqlType::SqlXml => 2009,
            SqlType::Unknown(code) => *code,
        }
    }

    /// Look up a type by JDBC code
    pub fn from_code(code: i32) -> SqlType {
        match code {
            -7 => SqlType::Bit,
            16 => SqlType::Boolean,
            -6 => SqlType::TinyInt,
            5 => SqlType::SmallInt,
            4 => SqlType::Integer,
            -5 => SqlType::BigInt,
            7 => SqlType::Real,
            6 => SqlType::Float,
            8 => SqlType::Double,
            3 => SqlType::Decimal,
            2 => SqlType::Numeric,
            1 => SqlType::Char,
            12 => SqlType::VarChar,
            -1 => SqlType::LongVarChar,
            -15 => SqlType::NChar,
            -9 => SqlType::NVarChar,
            -16 => SqlType::LongNVarChar,
            2005 => SqlType::Clob,
            2011 => SqlType::NClob,
            91 => SqlType::Date,
            92 => SqlType::Time,
            93 => SqlType::Timestamp,
            2013 => SqlType::TimeWithTimezone,
            2014 => SqlType::TimestampWithTimezone,
            -2 => SqlType::Binary,
            -3 => SqlType::VarBinary,
            -4 => SqlType::LongVarBinary,
            2004 => SqlType::Blob,
            0 => SqlType::Null,
            1111 => SqlType::Other,
            2000 => SqlType::JavaObject,
            2001 => SqlType::Distinct,
            2002 => SqlType::Struct,
            2003 => SqlType::Array,
            2006 => SqlType::Ref,
            70 => SqlType::Datalink,
            -8 => SqlType::RowId,
            2009 => SqlType::SqlXml,
            other => SqlType::Unknown(other),
        }
    }

    /// Resolve a declared type name such as `VARCHAR`, `int8` or `DOUBLE PRECISION`.
    ///
    /// Any size suffix must already be stripped (see [`DeclaredType::parse`]).
    /// Names that no driver would report as a standard type map to `Other`.
    pub fn from_type_name(name: &str) -> SqlType {
        let normalized = name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase();

        match normalized.as_str() {
            "BIT" => SqlType::Bit,
            "BOOL" | "BOOLEAN" => SqlType::Boolean,
            "TINYINT" => SqlType::TinyInt,
            "SMALLINT" | "INT2" => SqlType::SmallInt,
            "INT" | "INTEGER" | "INT4" | "MEDIUMINT" => SqlType::Integer,
            "BIGINT" | "INT8" => SqlType::BigInt,
            "REAL" | "FLOAT4" => SqlType::Real,
            "FLOAT" => SqlType::Float,
            "DOUBLE" | "DOUBLE PRECISION" | "FLOAT8" => SqlType::Double,
            "DECIMAL" | "DEC" => SqlType::Decimal,
            "NUMERIC" | "NUMBER" => SqlType::Numeric,
            "CHAR" | "CHARACTER" => SqlType::Char,
            "VARCHAR" | "CHARACTER VARYING" | "VARCHAR2" => SqlType::VarChar,
            "TEXT" | "TINYTEXT" | "MEDIUMTEXT" | "LONGTEXT" | "LONGVARCHAR" => {
                SqlType::LongVarChar
            }
            "NCHAR" | "NATIONAL CHARACTER" => SqlType::NChar,
            "NVARCHAR" | "NVARCHAR2" | "NATIONAL CHARACTER VARYING" => SqlType::NVarChar,
            "NTEXT" | "LONGNVARCHAR" => SqlType::LongNVarChar,
            "CLOB" | "CHARACTER LARGE OBJECT" => SqlType::Clob,
            "NCLOB" => SqlType::NClob,
            "DATE" => SqlType::Date,
            "TIME" | "TIME WITHOUT TIME ZONE" => SqlType::Time,
            "TIMESTAMP" | "DATETIME" | "TIMESTAMP WITHOUT TIME ZONE" => SqlType::Timestamp,
            "TIME WITH TIME ZONE" | "TIMETZ" => SqlType::TimeWithTimezone,
            "TIMESTAMP WITH TIME ZONE" | "TIMESTAMPTZ" => SqlType::TimestampWithTimezone,
            "BINARY" => SqlType::Binary,
            "VARBINARY" | "BINARY VARYING" | "BYTEA" => SqlType::VarBinary,
            "LONGVARBINARY" | "TINYBLOB" | "MEDIUMBLOB" | "LONGBLOB" => SqlType::LongVarBinary,
            "BLOB" | "BINARY LARGE OBJECT" => SqlType::Blob,
            "ARRAY" => SqlType::Array,
            "ROWID" => SqlType::RowId,
            "XML" => SqlType::SqlXml,
            _ => SqlType::Other,
        }
    }
}

/// A declared column type split into name, size and scale, e.g. `DECIMAL(10, 2)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredType {
    pub sql_type: SqlType,
    pub size: Option<u32>,
    pub scale: Option<u32>,
}

impl DeclaredType {
    /// Parse a declared type string. `UNSIGNED`/`SIGNED` qualifiers are ignored.
    pub fn parse(declared: &str) -> DeclaredType {
        let declared = declared.trim();
        let (name, args) = match declared.find('(') {
            Some(open) => {
                let close = declared[open..]
                    .find(')')
                    .map(|c| open + c)
                    .unwrap_or(declared.len());
                let rest = declared.get(close + 1..).unwrap_or("");
                (
                    format!("{} {}", &declared[..open], rest),
                    &declared[open + 1..close],
                )
            }
            None => (declared.to_string(), ""),
        };

        let name = name
            .split_whitespace()
            .filter(|word| {
                !word.eq_ignore_ascii_case("unsigned") && !word.eq_ignore_ascii_case("signed")
            })
            .collect::<Vec<_>>()
            .join(" ");

        let mut numbers = args.split(',').map(|n| n.trim().parse::<u32>().ok());
        let size = numbers.next().flatten();
        let scale = numbers.next().flatten();

        DeclaredType {
            sql_type: SqlType::from_type_name(&name),
            size,
            scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip_for_known_codes() {
        for ty in [
            SqlType::Bit,
            SqlType::Integer,
            SqlType::Decimal,
            SqlType::Timestamp,
            SqlType::Blob,
            SqlType::Array,
        ] {
            assert_eq!(SqlType::from_code(ty.code()), ty);
        }
        assert_eq!(SqlType::from_code(4242), SqlType::Unknown(4242));
        assert_eq!(SqlType::Unknown(4242).code(), 4242);
    }

    #[test]
    fn test_from_type_name_aliases() {
        assert_eq!(SqlType::from_type_name("int"), SqlType::Integer);
        assert_eq!(SqlType::from_type_name("INT8"), SqlType::BigInt);
        assert_eq!(SqlType::from_type_name("double  precision"), SqlType::Double);
        assert_eq!(SqlType::from_type_name("datetime"), SqlType::Timestamp);
        assert_eq!(SqlType::from_type_name("text"), SqlType::LongVarChar);
        assert_eq!(SqlType::from_type_name("json"), SqlType::Other);
    }

    #[test]
    fn test_parse_declared_type() {
        assert_eq!(
            DeclaredType::parse("DECIMAL(10, 2)"),
            DeclaredType {
                sql_type: SqlType::Decimal,
                size: Some(10),
                scale: Some(2),
            }
        );
        assert_eq!(
            DeclaredType::parse("varchar(10)"),
            DeclaredType {
                sql_type: SqlType::VarChar,
                size: Some(10),
                scale: None,
            }
        );
        assert_eq!(
            DeclaredType::parse("BIGINT UNSIGNED"),
            DeclaredType {
                sql_type: SqlType::BigInt,
                size: None,
                scale: None,
            }
        );
        assert_eq!(DeclaredType::parse("INT(11) UNSIGNED").sql_type, SqlType::Integer);
    }
}
