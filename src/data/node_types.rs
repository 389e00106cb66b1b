use super::{expect_fields, for_each_record};
use crate::{error::Result, types::NodeId};
use log::info;
use std::{collections::HashMap, path::Path};

/// Node identifier to node type label.
pub type NodeTypes = HashMap<NodeId, String>;

/// Reads `<node_id> <type_label>` lines.
pub fn load_node_types<P: AsRef<Path>>(path: P) -> Result<NodeTypes> {
    let path = path.as_ref();
    info!("loading node types from {}", path.display());
    let mut node_types = NodeTypes::new();
    for_each_record(path, |line, fields| {
        expect_fields(path, line, fields, 2)?;
        node_types.insert(fields[0].to_string(), fields[1].to_string());
        Ok(())
    })?;
    Ok(node_types)
}
