//! Error management.

use derive_more::Display;
use std::path::Path;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Display)]
pub enum Error {
    #[display(fmt = "{}: {}", path, source)]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[display(fmt = "{}:{}: {}", path, line, reason)]
    Malformed {
        path: String,
        line: usize,
        reason: String,
    },
    #[display(fmt = "{}:{}: layer {} follows layer {}", path, line, layer, previous)]
    LayerOutOfOrder {
        path: String,
        line: usize,
        layer: usize,
        previous: usize,
    },
    #[display(fmt = "{}: layer {} has no walks and cannot be saved", path, layer)]
    EmptyLastLayer { path: String, layer: usize },
    #[display(fmt = "schema `{}` requires a node type table", schema)]
    MissingNodeTypes { schema: String },
    #[display(fmt = "invalid schema `{}`: {}", schema, reason)]
    InvalidSchema { schema: String, reason: String },
    #[display(fmt = "{}: node `{}` is not in the vocabulary", stage, node)]
    UnknownNode { node: String, stage: &'static str },
    #[display(fmt = "edge type `{}` is not in the network", edge_type)]
    UnknownEdgeType { edge_type: String },
    #[display(fmt = "no embeddings for edge type `{}`", edge_type)]
    MissingEmbeddings { edge_type: String },
    #[display(fmt = "no true edge could be scored")]
    NoTrueEdges,
    #[display(fmt = "{} scored true edges exceed {} scored edges", true_num, total)]
    TooManyTrueEdges { true_num: usize, total: usize },
    #[display(fmt = "no false edge could be scored")]
    NoFalseEdges,
    #[display(fmt = "invalid parameter `{}`: {}", name, reason)]
    InvalidParameter { name: &'static str, reason: String },
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl Error {
    pub(crate) fn io<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        Error::Io {
            path: path.as_ref().display().to_string(),
            source,
        }
    }

    pub(crate) fn malformed<P: AsRef<Path>, S: Into<String>>(
        path: P,
        line: usize,
        reason: S,
    ) -> Self {
        Error::Malformed {
            path: path.as_ref().display().to_string(),
            line,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_file_and_line() {
        let err = Error::malformed("data/train.txt", 3, "expected 3 fields, found 2");
        assert_eq!(
            err.to_string(),
            "data/train.txt:3: expected 3 fields, found 2"
        );
        let err = Error::LayerOutOfOrder {
            path: String::from("walks.txt"),
            line: 7,
            layer: 0,
            previous: 1,
        };
        assert_eq!(err.to_string(), "walks.txt:7: layer 0 follows layer 1");
    }
}
