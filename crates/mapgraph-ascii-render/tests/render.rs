use mapgraph_ascii_render::{AsciiRenderOptions, render_ascii};
use mapgraph_core::graph_file::import;
use mapgraph_core::{Directionality, DrawCommand, GraphState, Point, PointStyle, project};

fn options() -> AsciiRenderOptions {
    AsciiRenderOptions {
        max_width: 20,
        max_height: 10,
    }
}

#[test]
fn empty_frame_renders_nothing() {
    assert_eq!(render_ascii(&[], 100.0, 100.0, &AsciiRenderOptions::default()), "");
}

#[test]
fn renders_nodes_and_undirected_edge() {
    let mut state = GraphState::new();
    state.add_node(Point::new(10.0, 10.0));
    state.add_node(Point::new(150.0, 10.0));
    state.add_edge(0, 1);

    let output = render_ascii(&project(&state), 200.0, 100.0, &options());
    let first_row = output.lines().nth(1).expect("row");
    assert_eq!(first_row, " o-------------o");
}

#[test]
fn renders_arrow_head_and_labels() {
    let mut state = GraphState::new();
    state.add_node(Point::new(150.0, 10.0));
    state.add_node(Point::new(10.0, 10.0));
    state.add_edge(1, 0);
    state.directionality = Directionality::Directed;
    state.show_labels = true;

    let output = render_ascii(&project(&state), 200.0, 100.0, &options());
    assert!(output.contains("o0"));
    assert!(output.contains("o1"));
    assert!(output.contains('-'));
}

#[test]
fn marks_the_pending_selection() {
    let mut state = GraphState::new();
    state.add_node(Point::new(50.0, 50.0));
    state.select_endpoint(0);
    let output = render_ascii(&project(&state), 100.0, 100.0, &options());
    assert!(output.contains('@'));
    assert!(!output.contains('o'));
}

#[test]
fn ignores_points_outside_the_canvas() {
    let mut state = GraphState::new();
    state.add_node(Point::new(-50.0, 500.0));
    let output = render_ascii(&project(&state), 100.0, 100.0, &options());
    assert!(output.trim().is_empty());
}

#[test]
fn skips_edges_with_infinite_endpoints() {
    let imported = import("graph [ node [ id 0 pos -INF pos 5.0 ] node [ id 1 pos INF pos 5.0 ] edge [ source 0 target 1 ] ]")
        .expect("import failed");
    let mut state = GraphState::new();
    imported.apply_to(&mut state);
    state.directionality = Directionality::Directed;
    state.show_labels = true;

    let output = render_ascii(&project(&state), 200.0, 100.0, &options());
    assert!(output.trim().is_empty());
}

#[test]
fn clips_edges_reaching_far_outside_the_canvas() {
    let frame = [
        DrawCommand::Line {
            from: Point::new(10.0, 5.0),
            to: Point::new(1e12, 5.0),
        },
        DrawCommand::Arrow {
            from: Point::new(-1e12, 55.0),
            to: Point::new(1e12, 55.0),
        },
        DrawCommand::Line {
            from: Point::new(-1e300, 75.0),
            to: Point::new(f64::MAX, 75.0),
        },
    ];
    let output = render_ascii(&frame, 200.0, 100.0, &options());
    let rows: Vec<&str> = output.lines().collect();
    assert_eq!(rows[0], " -------------------");
    assert_eq!(rows[5], "--------------------");
    assert!(!output.contains('>'));
}

#[test]
fn labels_at_extreme_coordinates_are_dropped() {
    let frame = [
        DrawCommand::Point {
            at: Point::new(1e200, 1e200),
            style: PointStyle::Node,
        },
        DrawCommand::Label {
            at: Point::new(f64::MAX, 10.0),
            text: "12".to_string(),
        },
        DrawCommand::Label {
            at: Point::new(-f64::MAX, 10.0),
            text: "3".to_string(),
        },
    ];
    let output = render_ascii(&frame, 200.0, 100.0, &options());
    assert!(output.trim().is_empty());
}
