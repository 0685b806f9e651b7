//! POJO generator - writes rendered classes through the overwrite policy

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::overwrite::{Decision, OverwritePolicy, OverwriteState};
use super::pojo_renderer::render_descriptor;
use super::type_mapper::TypeMapper;
use crate::config::defaults;
use crate::error::{CodegenError, Result};
use crate::parser::SchemaDescriptor;

/// Options controlling what is rendered and where it is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Root directory; files land in `output_dir/<package path>/`
    pub output_dir: PathBuf,
    /// Dotted Java package name
    pub package_name: String,
    /// Emit the key class (otherwise key fields go into the value class)
    pub generate_key_class: bool,
    /// Also put the key fields into the value class
    pub include_keys_in_value: bool,
    /// Emit a constructor taking every field
    pub constructor_with_args: bool,
    /// Date written into the header line; today when unset
    pub generated_on: Option<NaiveDate>,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(defaults::OUTPUT_DIR),
            package_name: String::new(),
            generate_key_class: defaults::GENERATE_KEY_CLASS,
            include_keys_in_value: defaults::INCLUDE_KEYS_IN_VALUE,
            constructor_with_args: defaults::CONSTRUCTOR_WITH_ARGS,
            generated_on: None,
        }
    }
}

/// What happened to one target file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Created,
    Overwritten,
    Skipped,
}

/// Files touched by a generation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub files: Vec<(PathBuf, FileOutcome)>,
    /// File at which the user cancelled the run
    pub aborted_at: Option<PathBuf>,
}

impl GenerationReport {
    /// Paths that were created or overwritten
    pub fn written(&self) -> Vec<&Path> {
        self.files
            .iter()
            .filter(|(_, outcome)| *outcome != FileOutcome::Skipped)
            .map(|(path, _)| path.as_path())
            .collect()
    }

    /// Paths left untouched because the policy declined
    pub fn skipped(&self) -> Vec<&Path> {
        self.files
            .iter()
            .filter(|(_, outcome)| *outcome == FileOutcome::Skipped)
            .map(|(path, _)| path.as_path())
            .collect()
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted_at.is_some()
    }
}

/// Generate the classes of one descriptor.
///
/// Every class is rendered before any file is touched, so an unsupported
/// column type leaves the disk unchanged. Returns the state to use for the
/// next descriptor of the batch; a cancel surfaces as
/// [`CodegenError::OverwriteAborted`].
pub fn generate_pojo(
    desc: &SchemaDescriptor,
    options: &GeneratorOptions,
    state: OverwriteState,
    policy: &mut dyn OverwritePolicy,
    report: &mut GenerationReport,
) -> Result<OverwriteState> {
    let files = render_descriptor(desc, options)?;
    let mut state = state;

    for file in files {
        let path = options.output_dir.join(&file.relative_path);

        if state == OverwriteState::Aborted {
            return Err(CodegenError::OverwriteAborted { path });
        }

        let outcome = if path.exists() {
            let (next, decision) = state.decide(&path, policy);
            state = next;
            match decision {
                Decision::Abort => {
                    warn!("Generation cancelled at {}", path.display());
                    return Err(CodegenError::OverwriteAborted { path });
                }
                Decision::Skip => {
                    debug!("Keeping existing {}", path.display());
                    FileOutcome::Skipped
                }
                Decision::Overwrite => {
                    write_atomic(&path, &file.content)?;
                    FileOutcome::Overwritten
                }
            }
        } else {
            write_atomic(&path, &file.content)?;
            FileOutcome::Created
        };

        debug!("{} {} -> {:?}", file.class_name, path.display(), outcome);
        report.files.push((path, outcome));
    }

    Ok(state)
}

/// Generate every descriptor of a batch, sharing one overwrite state.
///
/// A cancel stops the batch before any further file is touched and is
/// reported through [`GenerationReport::aborted_at`], not as an error.
pub fn generate_all(
    descriptors: &[SchemaDescriptor],
    options: &GeneratorOptions,
    policy: &mut dyn OverwritePolicy,
) -> Result<GenerationReport> {
    info!(
        "Generating {} tables into {}",
        descriptors.len(),
        options.output_dir.display()
    );

    let mut report = GenerationReport::default();
    let mut state = OverwriteState::AskEach;

    for desc in descriptors {
        state = match generate_pojo(desc, options, state, policy, &mut report) {
            Ok(next) => next,
            Err(CodegenError::OverwriteAborted { path }) => {
                report.aborted_at = Some(path);
                return Ok(report);
            }
            Err(e) => return Err(e),
        };
    }

    info!(
        "Wrote {} files, skipped {}",
        report.written().len(),
        report.skipped().len()
    );
    Ok(report)
}

/// Key type name of a descriptor: the key class, or the boxed scalar type
pub fn key_type_name(desc: &SchemaDescriptor) -> Result<Option<String>> {
    if let Some(column) = desc.scalar_key_column() {
        let java_type = TypeMapper::resolve(desc.table(), column)?.to_object();
        return Ok(Some(java_type.type_name().to_string()));
    }
    if desc.key_class_name().is_empty() {
        Ok(None)
    } else {
        Ok(Some(desc.key_class_name().to_string()))
    }
}

/// Write a file so that it is either fully replaced or left as it was
pub fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let file_err = |source: std::io::Error| CodegenError::FileWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(file_err)?;

    let mut tmp = temp_file_in(dir).map_err(file_err)?;
    tmp.write_all(content.as_bytes()).map_err(file_err)?;
    tmp.flush().map_err(file_err)?;

    // A replaced file keeps its mode
    if let Ok(existing) = std::fs::metadata(path) {
        if existing.is_file() {
            tmp.as_file()
                .set_permissions(existing.permissions())
                .map_err(file_err)?;
        }
    }
    tmp.persist(path).map_err(|e| file_err(e.error))?;

    Ok(())
}

/// Temp file created with the mode a plain file create would get (umask applies)
#[cfg(unix)]
fn temp_file_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    use std::os::unix::fs::PermissionsExt;

    tempfile::Builder::new()
        .permissions(std::fs::Permissions::from_mode(0o666))
        .tempfile_in(dir)
}

#[cfg(not(unix))]
fn temp_file_in(dir: &Path) -> std::io::Result<NamedTempFile> {
    NamedTempFile::new_in(dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::{Answer, NamingOptions};
    use crate::parser::{Column, SqlType};

    fn descriptor(table: &str) -> SchemaDescriptor {
        let columns = vec![
            Column::new("id", SqlType::BigInt, false),
            Column::new("name", SqlType::VarChar, true),
        ];
        SchemaDescriptor::new(None, table, columns, &["id".to_string()], &NamingOptions::default())
            .unwrap()
    }

    fn options(dir: &Path) -> GeneratorOptions {
        GeneratorOptions {
            output_dir: dir.to_path_buf(),
            package_name: "com.example".to_string(),
            generated_on: NaiveDate::from_ymd_opt(2024, 1, 2),
            ..Default::default()
        }
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/Foo.java");

        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");

        let leftovers = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
        assert_eq!(leftovers, 1, "no temp files are left behind");
    }

    #[test]
    fn test_write_fails_when_directory_cannot_be_created() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = write_atomic(&blocker.join("Foo.java"), "content").unwrap_err();
        assert!(matches!(err, CodegenError::FileWrite { .. }));
        assert_eq!(std::fs::read_to_string(&blocker).unwrap(), "not a directory");
    }

    #[test]
    fn test_failed_replace_keeps_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory cannot be replaced by a file
        let target = dir.path().join("Foo.java");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep.txt"), "original").unwrap();

        let err = write_atomic(&target, "new content").unwrap_err();
        match err {
            CodegenError::FileWrite { path, .. } => assert_eq!(path, target),
            other => panic!("unexpected error: {}", other),
        }

        assert_eq!(
            std::fs::read_to_string(target.join("keep.txt")).unwrap(),
            "original"
        );
        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, ["Foo.java"], "no temp files are left behind");
    }

    #[cfg(unix)]
    #[test]
    fn test_created_file_gets_default_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let plain = dir.path().join("plain.txt");
        std::fs::write(&plain, "plain").unwrap();
        let expected = std::fs::metadata(&plain).unwrap().permissions().mode() & 0o777;

        let path = dir.path().join("Foo.java");
        write_atomic(&path, "content").unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, expected);
    }

    #[cfg(unix)]
    #[test]
    fn test_overwritten_file_keeps_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path());
        let value_path = dir.path().join("com/example/Users.java");
        std::fs::create_dir_all(value_path.parent().unwrap()).unwrap();
        std::fs::write(&value_path, "old").unwrap();
        std::fs::set_permissions(&value_path, std::fs::Permissions::from_mode(0o640)).unwrap();

        let report = generate_all(&[descriptor("users")], &opts, &mut |_: &str| Answer::Yes)
            .unwrap();
        assert!(report
            .files
            .contains(&(value_path.clone(), FileOutcome::Overwritten)));

        let mode = std::fs::metadata(&value_path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o640);
        assert_ne!(std::fs::read_to_string(&value_path).unwrap(), "old");
    }

    #[test]
    fn test_generate_creates_package_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let mut report = GenerationReport::default();
        let mut policy = |_: &str| -> Answer { panic!("nothing exists yet") };

        let state = generate_pojo(
            &descriptor("users"),
            &options(dir.path()),
            OverwriteState::AskEach,
            &mut policy,
            &mut report,
        )
        .unwrap();

        assert_eq!(state, OverwriteState::AskEach);
        assert!(dir.path().join("com/example/UsersKey.java").exists());
        assert!(dir.path().join("com/example/Users.java").exists());
        assert!(report
            .files
            .iter()
            .all(|(_, outcome)| *outcome == FileOutcome::Created));
    }

    #[test]
    fn test_existing_files_ask_policy() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path());
        generate_all(&[descriptor("users")], &opts, &mut |_: &str| Answer::Yes).unwrap();

        let key_path = dir.path().join("com/example/UsersKey.java");
        std::fs::write(&key_path, "hand edited").unwrap();

        let mut prompts = Vec::new();
        let mut policy = |prompt: &str| {
            prompts.push(prompt.to_string());
            Answer::No
        };
        let report = generate_all(&[descriptor("users")], &opts, &mut policy).unwrap();

        assert_eq!(prompts.len(), 2);
        assert_eq!(report.skipped().len(), 2);
        assert_eq!(std::fs::read_to_string(&key_path).unwrap(), "hand edited");
    }

    #[test]
    fn test_cancel_stops_batch() {
        let dir = tempfile::tempdir().unwrap();
        let opts = options(dir.path());
        let batch = [descriptor("alpha"), descriptor("beta")];
        generate_all(&batch[..1], &opts, &mut |_: &str| Answer::Yes).unwrap();

        let report = generate_all(&batch, &opts, &mut |_: &str| Answer::Cancel).unwrap();

        assert!(report.is_aborted());
        assert_eq!(
            report.aborted_at,
            Some(dir.path().join("com/example/AlphaKey.java"))
        );
        assert!(report.files.is_empty());
        assert!(!dir.path().join("com/example/BetaKey.java").exists());
    }

    #[test]
    fn test_key_type_name() {
        assert_eq!(
            key_type_name(&descriptor("users")).unwrap().as_deref(),
            Some("UsersKey")
        );

        let naming = NamingOptions {
            scalar_single_key: true,
            ..Default::default()
        };
        let columns = vec![
            Column::new("id", SqlType::BigInt, false),
            Column::new("name", SqlType::VarChar, true),
        ];
        let desc =
            SchemaDescriptor::new(None, "users", columns, &["id".to_string()], &naming).unwrap();
        assert_eq!(key_type_name(&desc).unwrap().as_deref(), Some("Long"));
    }
}
