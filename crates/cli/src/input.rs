use std::fs;
use std::path::Path;

use normform_core::{AttributeSet, Relation};
use normform_parser::{parse_dependency_list, parse_table, Dependencies};

use crate::{Error, InputArgs};

fn read(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_dependencies(path: &Path) -> Result<Dependencies, Error> {
    parse_dependency_list(&read(path)?).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Builds the input relation from the table file, key and dependency files.
///
/// # Errors
///
/// Returns an error if a file cannot be read or parsed, or if the key,
/// multivalued attributes or dependencies name unknown columns.
pub fn load(args: &InputArgs) -> Result<Relation, Error> {
    let table = parse_table(&read(&args.table)?).map_err(|source| Error::Parse {
        path: args.table.clone(),
        source,
    })?;

    let mut dependencies = Dependencies::default();
    for path in [&args.fds, &args.mvds].into_iter().flatten() {
        dependencies.extend(read_dependencies(path)?);
    }

    let name = args.name.clone().unwrap_or_else(|| {
        args.table
            .file_stem()
            .map_or_else(|| "Relation".to_string(), |stem| stem.to_string_lossy().into_owned())
    });
    let key = AttributeSet::parse(&args.key, ',')?;
    let multivalued = match &args.multivalued {
        Some(list) => AttributeSet::parse(list, ',')?,
        None => AttributeSet::default(),
    };

    tracing::debug!(
        relation = %name,
        rows = table.row_count(),
        fds = dependencies.functional.len(),
        mvds = dependencies.multivalued.len(),
        "loaded input"
    );

    let relation = Relation::new(name, table, key)?
        .with_dependencies(dependencies.functional, dependencies.multivalued)?
        .with_multivalued(multivalued)?;
    for fd in relation.violated_dependencies() {
        tracing::warn!(relation = relation.name(), %fd, "data contradicts dependency");
    }
    Ok(relation)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn scratch(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("normform-cli-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("should create scratch dir");
        let path = dir.join(name);
        fs::write(&path, contents).expect("should write scratch file");
        path
    }

    fn args(table: PathBuf, fds: Option<PathBuf>) -> InputArgs {
        InputArgs {
            table,
            key: "SID, CourseID".to_string(),
            fds,
            mvds: None,
            multivalued: None,
            name: None,
        }
    }

    #[test]
    fn loads_relation_named_after_file() {
        let table = scratch(
            "enrolment.csv",
            "SID,CourseID,CourseName\n1,C1,Math\n2,C1,Math\n",
        );
        let fds = scratch("enrolment.fds", "CourseID -> CourseName\nexit\n");
        let relation = load(&args(table, Some(fds))).expect("should load");
        assert_eq!(relation.name(), "enrolment");
        assert_eq!(relation.key().names(), ["SID", "CourseID"]);
        assert_eq!(relation.fds().len(), 1);
        assert!(relation.multivalued().is_none());
    }

    #[test]
    fn unknown_key_is_reported() {
        let table = scratch("unknown_key.csv", "SID,Name\n1,Ann\n");
        let err = load(&args(table, None)).expect_err("should fail");
        assert!(matches!(err, Error::Schema(_)), "{err}");
        assert!(err.to_string().contains("CourseID"), "{err}");
    }

    #[test]
    fn parse_errors_name_the_file() {
        let table = scratch("bad_fds.csv", "SID,CourseID\n1,C1\n");
        let fds = scratch("bad.fds", "SID CourseID\n");
        let err = load(&args(table, Some(fds))).expect_err("should fail");
        assert!(matches!(err, Error::Parse { .. }), "{err}");
        assert!(err.to_string().contains("bad.fds"), "{err}");
    }

    #[test]
    fn missing_file_is_reported() {
        let err = load(&args(PathBuf::from("/nonexistent/normform.csv"), None))
            .expect_err("should fail");
        assert!(matches!(err, Error::Read { .. }), "{err}");
    }
}
