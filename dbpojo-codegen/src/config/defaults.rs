//! Default configuration values - single source of truth

/// Default include tables pattern (all tables)
pub const INCLUDE_TABLES: &str = "*";

/// Default exclude tables pattern (none)
pub const EXCLUDE_TABLES: &str = "";

/// Default output directory for generated sources
pub const OUTPUT_DIR: &str = "./generated";

/// Whether to emit a separate key class by default
pub const GENERATE_KEY_CLASS: bool = true;

/// Whether value classes also carry the key fields by default
pub const INCLUDE_KEYS_IN_VALUE: bool = false;

/// Whether to emit an all-fields constructor by default
pub const CONSTRUCTOR_WITH_ARGS: bool = true;

/// Whether a single-column primary key maps to a bare scalar type by default
pub const SCALAR_SINGLE_KEY: bool = false;

/// Suffix appended to key class names
pub const KEY_SUFFIX: &str = "Key";

/// Suffix appended to value class names
pub const VALUE_SUFFIX: &str = "";

/// Whether to run in dry-run mode by default
pub const DRY_RUN: bool = false;
