//! Random-walk corpora.
//!
//! The traversal itself sits behind [`Walker`]; this module only drives it
//! layer by layer and persists what it returns.

pub use corpus::{CorpusSource, WalkCorpus};
pub use random_walker::RandomWalker;

mod corpus;
mod random_walker;

use crate::{
    data::NodeTypes,
    error::{Error, Result},
    graph::Adjacency,
    types::Walk,
};
use itertools::Itertools;
use std::{fmt, str::FromStr};

/// Produces walks over the adjacency of a single layer.
pub trait Walker {
    /// Returns `params.num_walks` walks of at most `params.walk_length` nodes
    /// per eligible source node.
    ///
    /// `node_types` is `Some` whenever `params.schema` is.
    fn simulate_walks(
        &self,
        graph: &Adjacency,
        node_types: Option<&NodeTypes>,
        params: &WalkParams,
    ) -> Result<Vec<Walk>>;
}

/// A comma-separated list of metapaths such as `U-I-U,I-U-I`.
///
/// Every metapath starts and ends with the same node type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    metapaths: Vec<Vec<String>>,
}

impl Schema {
    pub fn metapaths(&self) -> &[Vec<String>] {
        &self.metapaths
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.metapaths.iter().map(|metapath| metapath.join("-")).join(",")
        )
    }
}

impl FromStr for Schema {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidSchema {
            schema: s.to_string(),
            reason: reason.to_string(),
        };
        let metapaths = s
            .split(',')
            .map(|metapath| {
                let items: Vec<String> = metapath.split('-').map(str::to_string).collect();
                if items.len() < 2 || items.iter().any(String::is_empty) {
                    Err(invalid("a metapath needs at least two non-empty node types"))
                } else if items.first() != items.last() {
                    Err(invalid("a metapath must start and end with the same node type"))
                } else {
                    Ok(items)
                }
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Schema { metapaths })
    }
}

/// Walk parameters shared by every layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkParams {
    pub num_walks: usize,
    pub walk_length: usize,
    pub schema: Option<Schema>,
}

impl WalkParams {
    pub fn new(num_walks: usize, walk_length: usize, schema: Option<Schema>) -> Self {
        Self {
            num_walks,
            walk_length,
            schema,
        }
    }

    /// Rejects parameters no walker can honor, including a schema without node types.
    pub fn validate(&self, node_types: Option<&NodeTypes>) -> Result<()> {
        if self.walk_length == 0 {
            return Err(Error::InvalidParameter {
                name: "walk_length",
                reason: String::from("must be positive"),
            });
        }
        if self.num_walks == 0 {
            return Err(Error::InvalidParameter {
                name: "num_walks",
                reason: String::from("must be positive"),
            });
        }
        match (&self.schema, node_types) {
            (Some(schema), None) => Err(Error::MissingNodeTypes {
                schema: schema.to_string(),
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_schema() {
        let schema: Schema = "U-I-U,I-U-I".parse().unwrap();
        assert_eq!(
            schema.metapaths(),
            [vec!["U", "I", "U"], vec!["I", "U", "I"]]
        );
        assert_eq!(schema.to_string(), "U-I-U,I-U-I");
    }

    #[test]
    fn test_parse_schema_rejects_open_metapath() {
        assert!(matches!(
            "U-I".parse::<Schema>(),
            Err(Error::InvalidSchema { .. })
        ));
        assert!(matches!(
            "U".parse::<Schema>(),
            Err(Error::InvalidSchema { .. })
        ));
        assert!(matches!(
            "U-I-U,".parse::<Schema>(),
            Err(Error::InvalidSchema { .. })
        ));
    }

    #[test]
    fn test_validate_requires_node_types_for_schema() {
        let params = WalkParams::new(2, 5, Some("U-I-U".parse().unwrap()));
        assert!(matches!(
            params.validate(None),
            Err(Error::MissingNodeTypes { .. })
        ));
        assert!(params.validate(Some(&NodeTypes::new())).is_ok());
        assert!(WalkParams::new(2, 5, None).validate(None).is_ok());
        assert!(matches!(
            WalkParams::new(2, 0, None).validate(None),
            Err(Error::InvalidParameter { .. })
        ));
    }
}
