//! DGML (Directed Graph Markup Language) rendering.
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <DirectedGraph xmlns="http://schemas.microsoft.com/vs/2009/dgml">
//!   <Nodes>
//!     <Node Id="Newtonsoft.Json" Label="Newtonsoft.Json [13.0.1]" Category="package"/>
//!   </Nodes>
//!   <Links>
//!     <Link Source="App" Target="Newtonsoft.Json" Label="[13.0.1, )"/>
//!   </Links>
//!   <Categories>
//!     <Category Id="package" Label="package" Background="#FF1A2B3C"/>
//!   </Categories>
//! </DirectedGraph>
//! ```

use anyhow::Result;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use std::collections::BTreeSet;
use std::io::Cursor;

use crate::graph::Graph;

/// Namespace of the DGML schema.
pub const DGML_NAMESPACE: &str = "http://schemas.microsoft.com/vs/2009/dgml";

/// Render `graph` as an indented DGML document.
///
/// # Errors
///
/// Returns an error if the XML writer fails.
pub fn to_dgml(graph: &Graph) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
    writer.write_event(Event::Start(
        BytesStart::new("DirectedGraph").with_attributes([("xmlns", DGML_NAMESPACE)]),
    ))?;

    writer.write_event(Event::Start(BytesStart::new("Nodes")))?;
    for node in graph.nodes() {
        let mut element = BytesStart::new("Node");
        element.push_attribute(("Id", node.id.as_str()));
        if let Some(label) = &node.label {
            element.push_attribute(("Label", label.as_str()));
        }
        if let Some(category) = &node.category {
            element.push_attribute(("Category", category.as_str()));
        }
        for (key, value) in &node.properties {
            element.push_attribute((key.as_str(), value.as_str()));
        }
        writer.write_event(Event::Empty(element))?;
    }
    writer.write_event(Event::End(BytesEnd::new("Nodes")))?;

    writer.write_event(Event::Start(BytesStart::new("Links")))?;
    for edge in graph.edges() {
        let mut element = BytesStart::new("Link");
        element.push_attribute(("Source", edge.source.as_str()));
        element.push_attribute(("Target", edge.target.as_str()));
        if let Some(label) = &edge.label {
            element.push_attribute(("Label", label.as_str()));
        }
        writer.write_event(Event::Empty(element))?;
    }
    writer.write_event(Event::End(BytesEnd::new("Links")))?;

    writer.write_event(Event::Start(BytesStart::new("Categories")))?;
    for category in graph.categories() {
        let mut element = BytesStart::new("Category");
        element.push_attribute(("Id", category.id.as_str()));
        element.push_attribute(("Label", category.label.as_str()));
        if let Some(background) = category.background {
            element.push_attribute(("Background", background.to_string().as_str()));
        }
        writer.write_event(Event::Empty(element))?;
    }
    writer.write_event(Event::End(BytesEnd::new("Categories")))?;

    if graph.has_properties() {
        let keys: BTreeSet<&str> =
            graph.nodes().iter().flat_map(|node| node.properties.keys()).map(String::as_str).collect();

        writer.write_event(Event::Start(BytesStart::new("Properties")))?;
        for key in keys {
            writer.write_event(Event::Empty(
                BytesStart::new("Property")
                    .with_attributes([("Id", key), ("DataType", "System.String")]),
            ))?;
        }
        writer.write_event(Event::End(BytesEnd::new("Properties")))?;
    }

    writer.write_event(Event::End(BytesEnd::new("DirectedGraph")))?;

    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Category, Color, Edge, Node};

    fn sample_graph() -> Graph {
        let mut graph = Graph::new();
        graph.add_node(Node::new("App"));
        graph.add_node(
            Node::new("Newtonsoft.Json")
                .with_label("Newtonsoft.Json [13.0.1]")
                .with_category("package"),
        );
        graph.add_edge(Edge::new("App", "Newtonsoft.Json"));
        graph.add_edge(Edge::new("App", "Newtonsoft.Json").with_label("[13.0.1, )"));
        graph.add_category(Category {
            id: "package".to_string(),
            label: "package".to_string(),
            background: Some(Color::rgb(0x1A, 0x2B, 0x3C)),
        });
        graph
    }

    #[test]
    fn test_document_structure() {
        let xml = to_dgml(&sample_graph()).unwrap();

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="utf-8"?>"#));
        assert!(xml.contains(r#"<DirectedGraph xmlns="http://schemas.microsoft.com/vs/2009/dgml">"#));
        assert!(xml.contains(r#"<Node Id="App"/>"#));
        assert!(xml.contains(
            r#"<Node Id="Newtonsoft.Json" Label="Newtonsoft.Json [13.0.1]" Category="package"/>"#
        ));
        assert!(xml.contains(r#"<Link Source="App" Target="Newtonsoft.Json"/>"#));
        assert!(xml.contains(r#"<Link Source="App" Target="Newtonsoft.Json" Label="[13.0.1, )"/>"#));
        assert!(xml.contains(r##"<Category Id="package" Label="package" Background="#FF1A2B3C"/>"##));
        assert!(!xml.contains("<Properties>"));
        assert!(xml.trim_end().ends_with("</DirectedGraph>"));
    }

    #[test]
    fn test_sections_in_order() {
        let xml = to_dgml(&sample_graph()).unwrap();
        let nodes = xml.find("<Nodes>").unwrap();
        let links = xml.find("<Links>").unwrap();
        let categories = xml.find("<Categories>").unwrap();
        assert!(nodes < links && links < categories);
    }

    #[test]
    fn test_node_properties() {
        let mut graph = Graph::new();
        graph.add_node(Node::new("Serilog").with_label("Serilog").with_property("Version", "2.10.0"));

        let xml = to_dgml(&graph).unwrap();
        assert!(xml.contains(r#"<Node Id="Serilog" Label="Serilog" Version="2.10.0"/>"#));
        assert!(xml.contains(r#"<Property Id="Version" DataType="System.String"/>"#));
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let mut graph = Graph::new();
        graph.add_node(Node::new("A&B").with_label("<A>"));

        let xml = to_dgml(&graph).unwrap();
        assert!(xml.contains(r#"Id="A&amp;B""#));
        assert!(xml.contains(r#"Label="&lt;A&gt;""#));
    }
}
