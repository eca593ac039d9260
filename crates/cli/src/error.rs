use std::path::PathBuf;

use derive_more::{Display, Error, From};
use normform_core::decomposition::error::Error as DecompositionError;
use normform_core::model::Error as SchemaError;
use normform_parser::ParseError;

#[derive(Debug, Display, Error, From)]
pub enum Error {
    #[display("cannot read {}: {source}", path.display())]
    #[from(skip)]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[display("cannot write {}: {source}", path.display())]
    #[from(skip)]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[display("{}: {source}", path.display())]
    #[from(skip)]
    Parse { path: PathBuf, source: ParseError },
    #[display("{_0}")]
    Schema(SchemaError),
    #[display("{_0}")]
    Decomposition(DecompositionError),
    #[display("{_0}")]
    Json(serde_json::Error),
}
