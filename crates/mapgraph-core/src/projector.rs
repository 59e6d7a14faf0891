use crate::geometry::Point;
use crate::state::{Directionality, GraphState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointStyle {
    Node,
    Selected,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Point { at: Point, style: PointStyle },
    Label { at: Point, text: String },
    Line { from: Point, to: Point },
    Arrow { from: Point, to: Point },
}

/// Draw list for the current state: edges first so node markers stay on
/// top, then one marker per node, then the pending endpoint highlight.
pub fn project(state: &GraphState) -> Vec<DrawCommand> {
    let store = state.store();
    let mut commands = Vec::with_capacity(store.nodes().len() * 2 + store.edges().len() + 1);

    for edge in store.edges() {
        let (Some(source), Some(target)) = (store.node(edge.source), store.node(edge.target)) else {
            continue;
        };
        let (from, to) = (source.position, target.position);
        commands.push(match state.directionality {
            Directionality::None => DrawCommand::Line { from, to },
            Directionality::Directed => DrawCommand::Arrow { from, to },
        });
    }

    for (index, node) in store.nodes().iter().enumerate() {
        commands.push(DrawCommand::Point {
            at: node.position,
            style: PointStyle::Node,
        });
        if state.show_labels {
            commands.push(DrawCommand::Label {
                at: node.position,
                text: index.to_string(),
            });
        }
    }

    if let Some(node) = state.pending_selection().and_then(|index| store.node(index)) {
        commands.push(DrawCommand::Point {
            at: node.position,
            style: PointStyle::Selected,
        });
    }

    commands
}
