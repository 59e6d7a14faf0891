use std::fmt::Write;

use crate::ast::{Document, Entry, Value};
use crate::graph::GmlGraph;

const INDENT: &str = "  ";

pub fn write_graph(graph: &GmlGraph) -> String {
    let mut body = Vec::new();
    if graph.directed {
        body.push(Entry::int("directed", 1));
    }
    for node in &graph.nodes {
        let mut fields = vec![Entry::int("id", node.id)];
        if let Some(label) = &node.label {
            fields.push(Entry::string("label", label));
        }
        fields.extend(node.attributes.iter().cloned());
        body.push(Entry::list("node", fields));
    }
    for edge in &graph.edges {
        let mut fields = vec![Entry::int("source", edge.source), Entry::int("target", edge.target)];
        fields.extend(edge.attributes.iter().cloned());
        body.push(Entry::list("edge", fields));
    }
    write_document(&Document::new(vec![Entry::list("graph", body)]))
}

pub fn write_document(document: &Document) -> String {
    let mut output = String::new();
    write_entries(&mut output, &document.entries, 0);
    output
}

fn write_entries(output: &mut String, entries: &[Entry], depth: usize) {
    for entry in entries {
        let indent = INDENT.repeat(depth);
        match &entry.value {
            Value::List(children) => {
                let _ = writeln!(output, "{indent}{} [", entry.key);
                write_entries(output, children, depth + 1);
                let _ = writeln!(output, "{indent}]");
            }
            Value::Int(value) => {
                let _ = writeln!(output, "{indent}{} {value}", entry.key);
            }
            Value::Real(value) => {
                let _ = writeln!(output, "{indent}{} {}", entry.key, format_real(*value));
            }
            Value::Str(text) => {
                let _ = writeln!(output, "{indent}{} \"{}\"", entry.key, escape(text));
            }
        }
    }
}

/// Formats a real so that it reads back as a real: the mantissa always
/// carries a decimal point and non-finite values use the GML spellings.
pub fn format_real(value: f64) -> String {
    if value.is_nan() {
        return "NAN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "INF" } else { "-INF" }.to_string();
    }
    let text = format!("{value:?}");
    match text.find('e') {
        Some(exp) if !text[..exp].contains('.') => format!("{}.0{}", &text[..exp], &text[exp..]),
        _ => text,
    }
}

fn escape(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '"' => output.push_str("&quot;"),
            ch if ch.is_ascii() && !ch.is_ascii_control() => output.push(ch),
            ch => {
                let _ = write!(output, "&#{};", ch as u32);
            }
        }
    }
    output
}
