use std::fmt;
use std::str::FromStr;

use crate::builder::{EdgeBuilder, Selection};
use crate::geometry::Point;
use crate::store::{Edge, GraphStore, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Nodes,
    Edges,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Directionality {
    #[default]
    None,
    Directed,
}

impl Directionality {
    pub fn is_directed(self) -> bool {
        self == Directionality::Directed
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {setting} '{value}'")]
pub struct UnknownSetting {
    pub setting: &'static str,
    pub value: String,
}

impl UnknownSetting {
    fn new(setting: &'static str, value: &str) -> Self {
        Self {
            setting,
            value: value.to_string(),
        }
    }
}

impl FromStr for Mode {
    type Err = UnknownSetting;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nodes" => Ok(Mode::Nodes),
            "edges" => Ok(Mode::Edges),
            _ => Err(UnknownSetting::new("mode", s)),
        }
    }
}

impl FromStr for Directionality {
    type Err = UnknownSetting;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Directionality::None),
            "directed" => Ok(Directionality::Directed),
            _ => Err(UnknownSetting::new("directionality", s)),
        }
    }
}

/// Parses the label radio values `Show` / `Hide`.
pub fn parse_label_visibility(s: &str) -> Result<bool, UnknownSetting> {
    match s.to_ascii_lowercase().as_str() {
        "show" => Ok(true),
        "hide" => Ok(false),
        _ => Err(UnknownSetting::new("label visibility", s)),
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Nodes => write!(f, "Nodes"),
            Mode::Edges => write!(f, "Edges"),
        }
    }
}

impl fmt::Display for Directionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directionality::None => write!(f, "None"),
            Directionality::Directed => write!(f, "Directed"),
        }
    }
}

/// Everything an annotation session edits. The store and the edge builder
/// are only reachable through methods that keep them consistent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GraphState {
    store: GraphStore,
    builder: EdgeBuilder,
    pub directionality: Directionality,
    pub mode: Mode,
    pub show_labels: bool,
}

impl GraphState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn nodes(&self) -> &[Node] {
        self.store.nodes()
    }

    pub fn edges(&self) -> &[Edge] {
        self.store.edges()
    }

    pub fn pending_selection(&self) -> Option<usize> {
        self.builder.pending()
    }

    pub fn add_node(&mut self, position: Point) -> Option<usize> {
        self.store.add_node(position)
    }

    pub fn add_edge(&mut self, source: usize, target: usize) -> bool {
        self.store.add_edge(source, target)
    }

    pub fn remove_last_node(&mut self) -> Option<Node> {
        let removed = self.store.remove_last_node();
        self.builder.forget_from(self.store.nodes().len());
        removed
    }

    pub fn remove_last_edge(&mut self) -> Option<Edge> {
        self.store.remove_last_edge()
    }

    /// Feeds a resolved node index to the edge builder and commits the
    /// edge once a distinct pair is complete.
    pub fn select_endpoint(&mut self, index: usize) -> Selection {
        let selection = self.builder.select(index);
        if let Selection::Completed(edge) = selection {
            self.store.add_edge(edge.source, edge.target);
        }
        selection
    }

    /// Clears nodes, edges and the pending selection. Settings are kept.
    pub fn reset(&mut self) {
        self.store.clear();
        self.builder.reset();
    }

    pub(crate) fn replace_graph(&mut self, store: GraphStore, directionality: Directionality) {
        self.store = store;
        self.directionality = directionality;
        self.builder.reset();
    }
}
