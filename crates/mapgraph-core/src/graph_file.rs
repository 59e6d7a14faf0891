use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use mapgraph_gml::{Entry, GmlEdge, GmlGraph, GmlNode, ParseError, Value, parse_graph, values_of, write_graph};
use tracing::warn;

use crate::geometry::Point;
use crate::state::{Directionality, GraphState};
use crate::store::GraphStore;

pub const DEFAULT_GRAPH_FILE: &str = "graph_corrected.gml";

const POSITION_KEY: &str = "pos";

#[derive(Debug, thiserror::Error)]
pub enum GraphFileError {
    #[error("graph file {} not found", .path.display())]
    NotFound { path: PathBuf },
    #[error("error parsing graph file {}: {source}", .path.display())]
    Parse { path: PathBuf, source: ParseError },
    #[error("cannot access graph file {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

/// A node's `pos` attribute as found in a file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionAttr {
    Present(f64, f64),
    Missing,
}

impl PositionAttr {
    /// `Present` only when `pos` appears exactly twice with numeric values.
    pub fn from_attributes(attributes: &[Entry]) -> Self {
        let values: Vec<&Value> = values_of(attributes, POSITION_KEY).collect();
        match values.as_slice() {
            [x, y] => match (x.as_f64(), y.as_f64()) {
                (Some(x), Some(y)) => PositionAttr::Present(x, y),
                _ => PositionAttr::Missing,
            },
            _ => PositionAttr::Missing,
        }
    }

    pub fn resolve(self) -> Point {
        match self {
            PositionAttr::Present(x, y) => Point::new(x, y),
            PositionAttr::Missing => Point::default(),
        }
    }
}

/// The graph part of a session as read from a file.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedGraph {
    pub store: GraphStore,
    pub directionality: Directionality,
}

impl ImportedGraph {
    pub fn apply_to(self, state: &mut GraphState) {
        state.replace_graph(self.store, self.directionality);
    }
}

pub fn export(state: &GraphState) -> String {
    let mut graph = GmlGraph::new(state.directionality.is_directed());
    for (index, node) in state.nodes().iter().enumerate() {
        graph.nodes.push(GmlNode {
            id: index as i64,
            label: Some(index.to_string()),
            attributes: vec![
                Entry::real(POSITION_KEY, node.position.x),
                Entry::real(POSITION_KEY, node.position.y),
            ],
        });
    }
    for edge in state.edges() {
        graph.edges.push(GmlEdge {
            source: edge.source as i64,
            target: edge.target as i64,
            attributes: Vec::new(),
        });
    }
    write_graph(&graph)
}

/// Nodes are numbered by their order in the file; edge endpoints are
/// resolved through the file's node ids onto that numbering.
pub fn import(input: &str) -> Result<ImportedGraph, ParseError> {
    let graph = parse_graph(input)?;

    let mut index_of = HashMap::with_capacity(graph.nodes.len());
    let mut positions = Vec::with_capacity(graph.nodes.len());
    for (index, node) in graph.nodes.iter().enumerate() {
        index_of.insert(node.id, index);
        positions.push(PositionAttr::from_attributes(&node.attributes).resolve());
    }

    // parse_graph rejects edges whose endpoints are not declared nodes.
    let mut pairs = Vec::with_capacity(graph.edges.len());
    for edge in &graph.edges {
        let (Some(&source), Some(&target)) = (index_of.get(&edge.source), index_of.get(&edge.target)) else {
            continue;
        };
        if source == target {
            warn!(node = edge.source, "dropping self-loop from graph file");
            continue;
        }
        pairs.push((source, target));
    }

    let directionality = if graph.directed {
        Directionality::Directed
    } else {
        Directionality::None
    };
    Ok(ImportedGraph {
        store: GraphStore::from_parts(positions, pairs),
        directionality,
    })
}

pub fn load_file(path: &Path) -> Result<ImportedGraph, GraphFileError> {
    let bytes = fs::read(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => GraphFileError::NotFound {
            path: path.to_path_buf(),
        },
        _ => GraphFileError::Io {
            path: path.to_path_buf(),
            source: err,
        },
    })?;
    let text = String::from_utf8(bytes).map_err(|err| GraphFileError::Parse {
        path: path.to_path_buf(),
        source: ParseError::new("file is not valid UTF-8".to_string(), err.utf8_error().valid_up_to()),
    })?;
    import(&text).map_err(|source| GraphFileError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a sibling `.tmp` file, then renames it over the target.
pub fn save_file(state: &GraphState, path: &Path) -> Result<(), GraphFileError> {
    let mut staging = OsString::from(path.as_os_str());
    staging.push(".tmp");
    let staging = PathBuf::from(staging);
    let written = fs::write(&staging, export(state)).and_then(|()| fs::rename(&staging, path));
    if let Err(source) = written {
        let _ = fs::remove_file(&staging);
        return Err(GraphFileError::Io {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}
