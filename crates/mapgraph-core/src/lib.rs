//! Interactive graph construction over a map image: node placement, edge
//! building, GML persistence, and projection to draw instructions.

mod builder;
mod controller;
mod geometry;
pub mod graph_file;
mod projector;
mod state;
mod store;

pub use builder::{EdgeBuilder, Selection};
pub use controller::{Action, Click, Controller, NullRenderer, Outcome, Renderer, SessionConfig};
pub use geometry::{COINCIDENCE_EPSILON, MATCH_THRESHOLD, Point, find_node_near};
pub use graph_file::{DEFAULT_GRAPH_FILE, GraphFileError, ImportedGraph, PositionAttr};
pub use projector::{DrawCommand, PointStyle, project};
pub use state::{Directionality, GraphState, Mode, UnknownSetting, parse_label_visibility};
pub use store::{Edge, GraphStore, Node};
