use mapgraph_core::{Edge, EdgeBuilder, GraphState, Point, Selection};

#[test]
fn distinct_pair_completes_and_resets() {
    let mut builder = EdgeBuilder::new();
    assert_eq!(builder.select(3), Selection::Pending(3));
    assert_eq!(builder.pending(), Some(3));
    assert_eq!(builder.select(5), Selection::Completed(Edge::new(3, 5)));
    assert!(builder.is_empty());
}

#[test]
fn repeated_index_is_discarded() {
    let mut builder = EdgeBuilder::new();
    builder.select(2);
    assert_eq!(builder.select(2), Selection::SelfLoopDiscarded(2));
    assert!(builder.is_empty());
}

#[test]
fn builder_is_cyclic() {
    let mut builder = EdgeBuilder::new();
    builder.select(0);
    builder.select(1);
    assert_eq!(builder.select(1), Selection::Pending(1));
    assert_eq!(builder.select(0), Selection::Completed(Edge::new(1, 0)));
}

#[test]
fn state_commits_completed_pairs() {
    let mut state = GraphState::new();
    state.add_node(Point::new(10.0, 10.0));
    state.add_node(Point::new(50.0, 50.0));

    state.select_endpoint(0);
    state.select_endpoint(1);
    assert_eq!(state.edges(), &[Edge::new(0, 1)]);
    assert_eq!(state.pending_selection(), None);

    state.select_endpoint(1);
    state.select_endpoint(1);
    assert_eq!(state.edges().len(), 1);
    assert_eq!(state.pending_selection(), None);
}

#[test]
fn reset_clears_graph_and_pending_selection() {
    let mut state = GraphState::new();
    state.add_node(Point::new(10.0, 10.0));
    state.add_node(Point::new(50.0, 50.0));
    state.add_edge(0, 1);
    state.select_endpoint(1);
    state.show_labels = true;

    state.reset();
    assert!(state.nodes().is_empty());
    assert!(state.edges().is_empty());
    assert_eq!(state.pending_selection(), None);
    assert!(state.show_labels);
}

#[test]
fn removing_the_pending_node_clears_the_selection() {
    let mut state = GraphState::new();
    state.add_node(Point::new(10.0, 10.0));
    state.add_node(Point::new(50.0, 50.0));
    state.select_endpoint(1);

    state.remove_last_node();
    assert_eq!(state.pending_selection(), None);

    state.select_endpoint(0);
    state.add_node(Point::new(70.0, 70.0));
    state.remove_last_node();
    assert_eq!(state.pending_selection(), Some(0));
}
