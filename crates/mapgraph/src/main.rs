use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mapgraph_core::{Controller, SessionConfig};
use mapgraph_skia_render::Backdrop;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod session;

use session::{CanvasBounds, LatestFrame, Session};

const DEFAULT_IMAGE: &str = "manhattanlargezoom.png";

/// Annotate a map image with a graph of nodes and edges.
///
/// Events are read from standard input, one per line: `click X Y`,
/// `mode nodes|edges`, `direction none|directed`, `labels show|hide`,
/// `clear`, `delete`, `load`, `export`, `snapshot FILE`, `ascii`, `quit`.
#[derive(Parser, Debug)]
#[command(name = "mapgraph")]
struct Args {
    /// Path of the map image
    #[arg(value_name = "FILE_PATH", default_value = DEFAULT_IMAGE)]
    file_path: PathBuf,

    /// Graph file read by the load action
    #[arg(long = "graph-name", alias = "graph_name", value_name = "FILE")]
    graph_name: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let backdrop = Backdrop::open(&args.file_path)
        .with_context(|| format!("failed to load map image {}", args.file_path.display()))?;
    let bounds = CanvasBounds::new(backdrop.width(), backdrop.height());
    info!(
        image = %args.file_path.display(),
        width = backdrop.width(),
        height = backdrop.height(),
        "map loaded"
    );

    let controller = Controller::new(SessionConfig::with_graph_name(args.graph_name), LatestFrame::default());
    let mut session = Session::new(controller, bounds, Some(backdrop));

    let stdin = io::stdin();
    let stdout = io::stdout();
    session.run(stdin.lock(), &mut stdout.lock())?;

    let state = session.controller().state();
    info!(nodes = state.nodes().len(), edges = state.edges().len(), "session closed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::Parser;
    use clap::error::ErrorKind;

    use super::Args;

    #[test]
    fn accepts_only_the_image_and_graph_name() {
        let args = Args::try_parse_from(["mapgraph"]).expect("parse");
        assert_eq!(args.file_path, PathBuf::from("manhattanlargezoom.png"));
        assert_eq!(args.graph_name, None);

        let args = Args::try_parse_from(["mapgraph", "city.png", "--graph_name", "city.gml"]).expect("parse");
        assert_eq!(args.file_path, PathBuf::from("city.png"));
        assert_eq!(args.graph_name, Some(PathBuf::from("city.gml")));

        let err = Args::try_parse_from(["mapgraph", "--version"]).expect_err("version flag accepted");
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }
}
