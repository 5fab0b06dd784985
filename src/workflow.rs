//! Generation pipeline for the mapping registry.
//!
//! Each mapping runs read, validate, assign, write in sequence. The run
//! is fail-fast: the first failing mapping aborts everything so a build
//! never ships half-updated state.
use crate::config::MappingSpec;
use crate::error::MappingError;
use crate::merge::{assign_ids, validate_append_only};
use crate::model::MappingDocument;
use crate::reader::read_entries;
use crate::store::{load_document, write_document};
use crate::util::display_name;
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};

/// Result of generating one mapping.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The document was rewritten with this many records.
    Written(usize),
    /// The new records matched the existing document; nothing was written.
    Unchanged,
}

/// Run every mapping in registry order, stopping at the first failure.
pub fn run(registry: &[MappingSpec]) -> Result<()> {
    for spec in registry {
        let outcome =
            generate_mapping(spec).with_context(|| format!("mapping '{}'", spec.name))?;
        match outcome {
            Outcome::Written(count) => {
                println!(
                    "{}: wrote {} entries -> {}",
                    spec.name,
                    count,
                    display_name(&spec.output_path)
                );
            }
            Outcome::Unchanged => println!("{}: no changes, skipping write", spec.name),
        }
    }
    Ok(())
}

/// Execute the read, validate, assign, write pipeline for one mapping.
///
/// The writer only runs after validation succeeds, so a failing mapping
/// never leaves partial output behind.
pub fn generate_mapping(spec: &MappingSpec) -> Result<Outcome, MappingError> {
    let entries = read_entries(&spec.source_dir)?;
    if entries.is_empty() {
        return Err(MappingError::EmptySource);
    }

    let new_keys: Vec<String> = entries
        .iter()
        .map(|entry| entry.get("key").cloned().unwrap_or_default())
        .collect();

    let existing = load_document(&spec.output_path)?;
    if let Some(existing) = &existing {
        validate_append_only(&existing.keys(), &new_keys)?;
    }

    let records = assign_ids(entries);
    if let Some(existing) = &existing {
        if existing.data == records {
            return Ok(Outcome::Unchanged);
        }
    }

    tracing::debug!(
        mapping = %spec.name,
        records = records.len(),
        "writing mapping document"
    );
    let document = MappingDocument {
        schema: spec.schema_ref.clone(),
        last_updated: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        data: records,
    };
    write_document(&spec.output_path, &document)?;
    Ok(Outcome::Written(document.data.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn spec_in(dir: &TempDir) -> MappingSpec {
        MappingSpec {
            name: "sample".to_string(),
            source_dir: dir.path().join("sample"),
            output_path: dir.path().join("sample.json"),
            schema_ref: "./sample.schema.json".to_string(),
        }
    }

    fn write_source(spec: &MappingSpec, file: &str, content: &str) {
        fs::create_dir_all(&spec.source_dir).expect("create source dir");
        fs::write(spec.source_dir.join(file), content).expect("write csv");
    }

    fn output_ids_and_keys(spec: &MappingSpec) -> Vec<(u64, String)> {
        let document = load_document(&spec.output_path)
            .expect("load output")
            .expect("output present");
        document
            .data
            .iter()
            .map(|record| (record.id, record.key().unwrap_or("").to_string()))
            .collect()
    }

    #[test]
    fn fresh_run_writes_dense_ids_in_source_order() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let spec = spec_in(&dir);
        write_source(&spec, "items.csv", "key,displayName\nalpha,Alpha\nbeta,Beta\n");

        let outcome = generate_mapping(&spec).expect("generate");
        assert_eq!(outcome, Outcome::Written(2));
        assert_eq!(
            output_ids_and_keys(&spec),
            vec![(0, "alpha".to_string()), (1, "beta".to_string())]
        );
    }

    #[test]
    fn unchanged_source_skips_the_second_write() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let spec = spec_in(&dir);
        write_source(&spec, "items.csv", "key,displayName\nalpha,Alpha\n");

        generate_mapping(&spec).expect("first run");
        let before = fs::read(&spec.output_path).expect("read output");
        let outcome = generate_mapping(&spec).expect("second run");
        assert_eq!(outcome, Outcome::Unchanged);
        let after = fs::read(&spec.output_path).expect("read output");
        assert_eq!(before, after);
    }

    #[test]
    fn appended_key_keeps_existing_ids() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let spec = spec_in(&dir);
        write_source(&spec, "items.csv", "key\nalpha\nbeta\n");
        generate_mapping(&spec).expect("first run");

        write_source(&spec, "items.csv", "key\nalpha\nbeta\ngamma\n");
        let outcome = generate_mapping(&spec).expect("append run");
        assert_eq!(outcome, Outcome::Written(3));
        assert_eq!(
            output_ids_and_keys(&spec),
            vec![
                (0, "alpha".to_string()),
                (1, "beta".to_string()),
                (2, "gamma".to_string())
            ]
        );
    }

    #[test]
    fn reordered_source_fails_and_preserves_output() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let spec = spec_in(&dir);
        write_source(&spec, "items.csv", "key\nalpha\nbeta\n");
        generate_mapping(&spec).expect("first run");
        let before = fs::read(&spec.output_path).expect("read output");

        write_source(&spec, "items.csv", "key\nbeta\nalpha\n");
        let err = generate_mapping(&spec).expect_err("reorder must fail");
        assert!(matches!(err, MappingError::ReorderedKeys { .. }));
        let after = fs::read(&spec.output_path).expect("read output");
        assert_eq!(before, after);
    }

    #[test]
    fn removed_key_fails_and_names_it() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let spec = spec_in(&dir);
        write_source(&spec, "items.csv", "key\nalpha\nbeta\n");
        generate_mapping(&spec).expect("first run");

        write_source(&spec, "items.csv", "key\nalpha\n");
        let err = generate_mapping(&spec).expect_err("removal must fail");
        match err {
            MappingError::RemovedKeys { keys } => assert_eq!(keys, vec!["beta".to_string()]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_only_source_is_empty() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let spec = spec_in(&dir);
        write_source(&spec, "items.csv", "key,displayName\n");
        let err = generate_mapping(&spec).expect_err("empty source must fail");
        assert!(matches!(err, MappingError::EmptySource));
    }

    #[test]
    fn changed_attribute_rewrites_with_stable_ids() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let spec = spec_in(&dir);
        write_source(&spec, "items.csv", "key,displayName\nalpha,Alpha\n");
        generate_mapping(&spec).expect("first run");

        write_source(&spec, "items.csv", "key,displayName\nalpha,Alpha Prime\n");
        let outcome = generate_mapping(&spec).expect("rename run");
        assert_eq!(outcome, Outcome::Written(1));
        let document = load_document(&spec.output_path)
            .expect("load output")
            .expect("output present");
        assert_eq!(document.data[0].id, 0);
        assert_eq!(
            document.data[0].fields.get("displayName"),
            Some(&"Alpha Prime".to_string())
        );
    }

    #[test]
    fn corrupt_existing_output_is_fatal() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let spec = spec_in(&dir);
        write_source(&spec, "items.csv", "key\nalpha\n");
        fs::write(&spec.output_path, "not json").expect("write garbage");
        let err = generate_mapping(&spec).expect_err("corrupt output must fail");
        assert!(matches!(err, MappingError::Read { .. }));
    }
}
