use std::path::PathBuf;

use tracing::{debug, info};

use crate::builder::Selection;
use crate::geometry::Point;
use crate::graph_file::{self, DEFAULT_GRAPH_FILE, GraphFileError};
use crate::projector::{DrawCommand, project};
use crate::state::{Directionality, GraphState, Mode};

/// The external drawing collaborator. Receives a full frame after every
/// handled event.
pub trait Renderer {
    fn present(&mut self, frame: &[DrawCommand]);
}

/// Discards frames.
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn present(&mut self, _frame: &[DrawCommand]) {}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Click {
    pub position: Point,
    pub inside_canvas: bool,
}

impl Click {
    pub fn new(x: f64, y: f64, inside_canvas: bool) -> Self {
        Self {
            position: Point::new(x, y),
            inside_canvas,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Click(Click),
    SetMode(Mode),
    SetDirectionality(Directionality),
    SetShowLabels(bool),
    Clear,
    DeleteLast,
    Load,
    Export,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// File read by the load action.
    pub graph_file: PathBuf,
    /// File written by the export action.
    pub export_file: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            graph_file: PathBuf::from(DEFAULT_GRAPH_FILE),
            export_file: PathBuf::from(DEFAULT_GRAPH_FILE),
        }
    }
}

impl SessionConfig {
    pub fn with_graph_name(graph_name: Option<PathBuf>) -> Self {
        let mut config = Self::default();
        if let Some(name) = graph_name {
            config.graph_file = name;
        }
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored,
}

pub struct Controller<R> {
    state: GraphState,
    config: SessionConfig,
    renderer: R,
}

impl<R: Renderer> Controller<R> {
    pub fn new(config: SessionConfig, renderer: R) -> Self {
        Self::with_state(GraphState::new(), config, renderer)
    }

    pub fn with_state(state: GraphState, config: SessionConfig, renderer: R) -> Self {
        Self {
            state,
            config,
            renderer,
        }
    }

    pub fn state(&self) -> &GraphState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn frame(&self) -> Vec<DrawCommand> {
        project(&self.state)
    }

    pub fn apply(&mut self, action: Action) -> Result<Outcome, GraphFileError> {
        match action {
            Action::Click(click) => Ok(self.click(click)),
            Action::SetMode(mode) => {
                self.set_mode(mode);
                Ok(Outcome::Applied)
            }
            Action::SetDirectionality(directionality) => {
                self.set_directionality(directionality);
                Ok(Outcome::Applied)
            }
            Action::SetShowLabels(show) => {
                self.set_show_labels(show);
                Ok(Outcome::Applied)
            }
            Action::Clear => {
                self.clear();
                Ok(Outcome::Applied)
            }
            Action::DeleteLast => Ok(self.delete_last()),
            Action::Load => self.load().map(|()| Outcome::Applied),
            Action::Export => self.export().map(|()| Outcome::Applied),
        }
    }

    /// Routes a raw click by mode. Clicks outside the canvas, and the
    /// spurious origin event some backends send for them, are dropped.
    pub fn click(&mut self, click: Click) -> Outcome {
        if !click.inside_canvas || click.position.is_origin() {
            debug!(x = click.position.x, y = click.position.y, "ignored click");
            return Outcome::Ignored;
        }

        let outcome = match self.state.mode {
            Mode::Nodes => match self.state.add_node(click.position) {
                Some(_) => Outcome::Applied,
                None => Outcome::Ignored,
            },
            Mode::Edges => match self.state.store().node_near(click.position) {
                Some(index) => {
                    if let Selection::SelfLoopDiscarded(index) = self.state.select_endpoint(index) {
                        debug!(index, "discarded self-loop selection");
                    }
                    Outcome::Applied
                }
                None => Outcome::Ignored,
            },
        };
        self.redraw();
        outcome
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.state.mode = mode;
        self.redraw();
    }

    pub fn set_directionality(&mut self, directionality: Directionality) {
        self.state.directionality = directionality;
        self.redraw();
    }

    pub fn set_show_labels(&mut self, show: bool) {
        self.state.show_labels = show;
        self.redraw();
    }

    pub fn clear(&mut self) {
        self.state.reset();
        self.redraw();
    }

    /// Removes the newest node or edge, depending on the mode.
    pub fn delete_last(&mut self) -> Outcome {
        let removed = match self.state.mode {
            Mode::Nodes => self.state.remove_last_node().is_some(),
            Mode::Edges => self.state.remove_last_edge().is_some(),
        };
        self.redraw();
        if removed { Outcome::Applied } else { Outcome::Ignored }
    }

    /// Replaces the graph with the configured file. Leaves the state
    /// untouched on any error.
    pub fn load(&mut self) -> Result<(), GraphFileError> {
        let path = &self.config.graph_file;
        let imported = graph_file::load_file(path)?;
        imported.apply_to(&mut self.state);
        info!(
            path = %path.display(),
            nodes = self.state.nodes().len(),
            edges = self.state.edges().len(),
            "graph loaded"
        );
        self.redraw();
        Ok(())
    }

    pub fn export(&mut self) -> Result<(), GraphFileError> {
        let path = &self.config.export_file;
        graph_file::save_file(&self.state, path)?;
        info!(path = %path.display(), "graph exported");
        Ok(())
    }

    fn redraw(&mut self) {
        let frame = project(&self.state);
        self.renderer.present(&frame);
    }
}
