use mapgraph_gml::{
    Entry, GmlEdge, GmlGraph, GmlNode, Value, format_real, parse_document, parse_graph, values_of,
    write_graph,
};

const SAMPLE: &str = "graph [\n  directed 1\n  node [\n    id 0\n    label \"0\"\n    pos 10.0\n    pos 12.5\n  ]\n  node [\n    id 1\n    label \"1\"\n    pos 50.0\n    pos 50.0\n  ]\n  edge [\n    source 1\n    target 0\n  ]\n]\n";

#[test]
fn parses_directed_graph_with_positions() {
    let graph = parse_graph(SAMPLE).expect("parse failed");
    assert!(graph.directed);
    assert_eq!(graph.nodes.len(), 2);
    assert_eq!(graph.nodes[0].label.as_deref(), Some("0"));

    let pos: Vec<f64> = values_of(&graph.nodes[0].attributes, "pos")
        .filter_map(Value::as_f64)
        .collect();
    assert_eq!(pos, vec![10.0, 12.5]);

    assert_eq!(graph.edges.len(), 1);
    assert_eq!((graph.edges[0].source, graph.edges[0].target), (1, 0));
}

#[test]
fn missing_directed_flag_means_undirected() {
    let graph = parse_graph("graph [ node [ id 3 ] ]").expect("parse failed");
    assert!(!graph.directed);
    assert_eq!(graph.nodes[0].id, 3);
    assert!(graph.nodes[0].label.is_none());
}

#[test]
fn ignores_comments_and_unknown_keys() {
    let input = "# exported\ngraph [\n  multigraph 0\n  name \"map\"\n  node [ id 0 weight 2 ]\n]\n";
    let graph = parse_graph(input).expect("parse failed");
    assert_eq!(graph.nodes.len(), 1);
    assert_eq!(graph.nodes[0].attributes.len(), 1);
}

#[test]
fn reads_special_reals_and_exponents() {
    let document = parse_document("a INF\nb -INF\nc NAN\nd 1.5e3\ne -2\nf .5").expect("parse failed");
    let values: Vec<&Value> = document.entries.iter().map(|entry| &entry.value).collect();
    assert_eq!(values[0], &Value::Real(f64::INFINITY));
    assert_eq!(values[1], &Value::Real(f64::NEG_INFINITY));
    assert!(matches!(values[2], Value::Real(v) if v.is_nan()));
    assert_eq!(values[3], &Value::Real(1500.0));
    assert_eq!(values[4], &Value::Int(-2));
    assert_eq!(values[5], &Value::Real(0.5));
}

#[test]
fn decodes_character_entities() {
    let document = parse_document("label \"a &quot;b&quot; &amp; &#233;\"").expect("parse failed");
    assert_eq!(document.entries[0].value, Value::Str("a \"b\" & \u{e9}".to_string()));
}

#[test]
fn errors_carry_byte_offsets() {
    let err = parse_document("graph [\n  node [ id 0 ]\n").unwrap_err();
    assert!(err.message.contains("unterminated"));
    assert_eq!(err.offset, 6);

    let err = parse_document("graph [ 12 ]").unwrap_err();
    assert_eq!(err.message, "expected key");
    assert_eq!(err.offset, 8);
    assert_eq!(err.to_string(), "expected key at byte 8");
}

#[test]
fn errors_on_unterminated_string() {
    assert!(parse_document("label \"open").is_err());
}

#[test]
fn errors_on_missing_graph() {
    let err = parse_graph("node [ id 0 ]").unwrap_err();
    assert!(err.message.contains("graph"));
}

#[test]
fn errors_on_more_than_one_graph() {
    assert!(parse_graph("graph [ ] graph [ ]").is_err());
}

#[test]
fn errors_on_duplicate_node_ids() {
    let err = parse_graph("graph [ node [ id 1 ] node [ id 1 ] ]").unwrap_err();
    assert!(err.message.contains("duplicate node id 1"));
}

#[test]
fn errors_on_node_without_id() {
    let err = parse_graph("graph [ node [ pos 1.0 pos 2.0 ] ]").unwrap_err();
    assert!(err.message.contains("missing 'id'"));
}

#[test]
fn errors_on_edge_to_unknown_node() {
    let err = parse_graph("graph [ node [ id 0 ] edge [ source 0 target 7 ] ]").unwrap_err();
    assert!(err.message.contains("unknown node id 7"));
}

#[test]
fn accepts_edges_before_their_nodes() {
    let graph = parse_graph("graph [ edge [ source 0 target 1 ] node [ id 0 ] node [ id 1 ] ]")
        .expect("parse failed");
    assert_eq!(graph.edges.len(), 1);
}

#[test]
fn writes_tuples_as_repeated_keys() {
    let graph = GmlGraph {
        directed: false,
        nodes: vec![GmlNode {
            id: 0,
            label: Some("0".to_string()),
            attributes: vec![Entry::real("pos", 10.0), Entry::real("pos", 20.25)],
        }],
        edges: Vec::new(),
    };
    let output = write_graph(&graph);
    assert_eq!(
        output,
        "graph [\n  node [\n    id 0\n    label \"0\"\n    pos 10.0\n    pos 20.25\n  ]\n]\n"
    );
}

#[test]
fn written_graph_reads_back() {
    let mut graph = GmlGraph::new(true);
    for id in 0..3 {
        graph.nodes.push(GmlNode {
            id,
            label: Some(format!("node \"{id}\"")),
            attributes: vec![Entry::real("pos", id as f64 * 1.0e-7), Entry::real("pos", 3.0)],
        });
    }
    graph.edges.push(GmlEdge {
        source: 2,
        target: 0,
        attributes: Vec::new(),
    });

    let parsed = parse_graph(&write_graph(&graph)).expect("parse failed");
    assert!(parsed.directed);
    assert_eq!(parsed.nodes.len(), 3);
    assert_eq!(parsed.nodes[1].label.as_deref(), Some("node \"1\""));
    assert_eq!(parsed.nodes[1].attributes[0].value, Value::Real(1.0e-7));
    assert_eq!((parsed.edges[0].source, parsed.edges[0].target), (2, 0));
}

#[test]
fn formats_reals_with_a_decimal_point() {
    assert_eq!(format_real(10.0), "10.0");
    assert_eq!(format_real(0.1), "0.1");
    assert_eq!(format_real(1e-7), "1.0e-7");
    assert_eq!(format_real(1e21), "1.0e21");
    assert_eq!(format_real(f64::NEG_INFINITY), "-INF");
}
