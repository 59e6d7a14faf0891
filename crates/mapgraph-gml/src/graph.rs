use std::collections::HashSet;

use crate::ParseError;
use crate::ast::{Document, Entry, Value, first_of};
use crate::parser::parse_document;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GmlNode {
    pub id: i64,
    pub label: Option<String>,
    pub attributes: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GmlEdge {
    pub source: i64,
    pub target: i64,
    pub attributes: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GmlGraph {
    pub directed: bool,
    pub nodes: Vec<GmlNode>,
    pub edges: Vec<GmlEdge>,
}

impl GmlGraph {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

pub fn parse_graph(input: &str) -> Result<GmlGraph, ParseError> {
    let document = parse_document(input)?;
    GmlGraph::from_document(&document)
}

impl GmlGraph {
    pub fn from_document(document: &Document) -> Result<Self, ParseError> {
        let mut graphs = document.entries.iter().filter(|entry| entry.key == "graph");
        let Some(entry) = graphs.next() else {
            return Err(ParseError::new("expected a 'graph' list".to_string(), 0));
        };
        if let Some(extra) = graphs.next() {
            return Err(ParseError::new("input contains more than one graph".to_string(), extra.offset));
        }
        let body = entry
            .value
            .as_list()
            .ok_or_else(|| ParseError::new("'graph' must be a list".to_string(), entry.offset))?;

        let directed = match first_of(body, "directed") {
            Some(flag) => flag
                .value
                .as_i64()
                .map(|value| value != 0)
                .ok_or_else(|| ParseError::new("'directed' must be an integer".to_string(), flag.offset))?,
            None => false,
        };

        let mut graph = GmlGraph::new(directed);
        let mut seen = HashSet::new();
        for item in body {
            match item.key.as_str() {
                "node" => {
                    let node = parse_node(item)?;
                    if !seen.insert(node.id) {
                        return Err(ParseError::new(format!("duplicate node id {}", node.id), item.offset));
                    }
                    graph.nodes.push(node);
                }
                "edge" => graph.edges.push(parse_edge(item)?),
                _ => {}
            }
        }

        // Edges may precede the nodes they reference.
        for (edge, item) in graph.edges.iter().zip(body.iter().filter(|item| item.key == "edge")) {
            for endpoint in [edge.source, edge.target] {
                if !seen.contains(&endpoint) {
                    return Err(ParseError::new(
                        format!("edge references unknown node id {endpoint}"),
                        item.offset,
                    ));
                }
            }
        }

        Ok(graph)
    }
}

fn parse_node(item: &Entry) -> Result<GmlNode, ParseError> {
    let fields = item
        .value
        .as_list()
        .ok_or_else(|| ParseError::new("'node' must be a list".to_string(), item.offset))?;
    let id = required_int(fields, "id", "node", item.offset)?;
    let label = match first_of(fields, "label") {
        Some(entry) => Some(match &entry.value {
            Value::Str(text) => text.clone(),
            Value::Int(value) => value.to_string(),
            _ => return Err(ParseError::new("node 'label' must be a string".to_string(), entry.offset)),
        }),
        None => None,
    };
    let attributes = fields
        .iter()
        .filter(|entry| entry.key != "id" && entry.key != "label")
        .cloned()
        .collect();
    Ok(GmlNode { id, label, attributes })
}

fn parse_edge(item: &Entry) -> Result<GmlEdge, ParseError> {
    let fields = item
        .value
        .as_list()
        .ok_or_else(|| ParseError::new("'edge' must be a list".to_string(), item.offset))?;
    let source = required_int(fields, "source", "edge", item.offset)?;
    let target = required_int(fields, "target", "edge", item.offset)?;
    let attributes = fields
        .iter()
        .filter(|entry| entry.key != "source" && entry.key != "target")
        .cloned()
        .collect();
    Ok(GmlEdge {
        source,
        target,
        attributes,
    })
}

fn required_int(fields: &[Entry], key: &str, owner: &str, owner_offset: usize) -> Result<i64, ParseError> {
    let entry = first_of(fields, key)
        .ok_or_else(|| ParseError::new(format!("{owner} is missing '{key}'"), owner_offset))?;
    entry
        .value
        .as_i64()
        .ok_or_else(|| ParseError::new(format!("{owner} '{key}' must be an integer"), entry.offset))
}
