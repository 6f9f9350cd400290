//! Graph elements phase: workflow blocks → editor nodes and edges.
//!
//! Each block sequence (the top level, or the body of a loop) is laid out as
//! `start → block… → nodeAdder`. Positions are left to the renderer.
//!
//! Ids live in two namespaces: block nodes are `block-{label}`, structural
//! nodes are `start`/`nodeAdder`, suffixed with the loop label inside a loop
//! body. A block label can therefore never collide with a structural node.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::EditorError;
use crate::parse::WorkflowBlock;
use crate::settings::WorkflowSettings;

pub const START_NODE: &str = "start";
pub const NODE_ADDER_NODE: &str = "nodeAdder";

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GraphElements {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    /// `start`, `nodeAdder`, or the block type.
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub data: NodeData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NodeData {
    Start(StartNodeData),
    Block(BlockNodeData),
    NodeAdder {},
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartNodeData {
    pub editable: bool,
    pub within_loop: bool,
    /// Present only on the top-level start node.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<WorkflowSettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockNodeData {
    pub label: String,
    pub editable: bool,
    pub config: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EdgeType {
    #[serde(rename = "edgeWithAddButton")]
    WithAddButton,
    #[serde(rename = "default")]
    Default,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
}

impl GraphNode {
    pub fn is_start(&self) -> bool {
        self.node_type == START_NODE
    }
}

/// Build editor nodes and edges for a block list.
///
/// `read_only` marks every node non-editable (global workflows).
pub fn build_elements(
    blocks: &[WorkflowBlock],
    settings: &WorkflowSettings,
    read_only: bool,
) -> GraphElements {
    let mut elements = GraphElements::default();
    build_sequence(blocks, None, Some(settings), !read_only, &mut elements);
    elements
}

fn build_sequence(
    blocks: &[WorkflowBlock],
    parent: Option<&str>,
    settings: Option<&WorkflowSettings>,
    editable: bool,
    out: &mut GraphElements,
) {
    let start_id = scoped_id(parent, START_NODE);
    let adder_id = scoped_id(parent, NODE_ADDER_NODE);
    let parent_id = parent.map(block_id);

    out.nodes.push(GraphNode {
        id: start_id.clone(),
        node_type: START_NODE.into(),
        parent_id: parent_id.clone(),
        data: NodeData::Start(StartNodeData {
            editable,
            within_loop: parent.is_some(),
            settings: settings.cloned(),
        }),
    });

    let mut previous = start_id;
    for block in blocks {
        let id = block_id(&block.label);
        out.nodes.push(GraphNode {
            id: id.clone(),
            node_type: block.block_type.clone(),
            parent_id: parent_id.clone(),
            data: NodeData::Block(BlockNodeData {
                label: block.label.clone(),
                editable,
                config: block.config.clone(),
            }),
        });
        out.edges.push(edge(&previous, &id, EdgeType::WithAddButton));

        if block.is_loop() {
            build_sequence(&block.loop_blocks, Some(block.label.as_str()), None, editable, out);
        }
        previous = id;
    }

    out.nodes.push(GraphNode {
        id: adder_id.clone(),
        node_type: NODE_ADDER_NODE.into(),
        parent_id,
        data: NodeData::NodeAdder {},
    });
    out.edges.push(edge(&previous, &adder_id, EdgeType::Default));
}

/// Report node ids that occur more than once (`G001`).
///
/// Ids are unique by construction unless two blocks share a label.
pub fn validate_elements(elements: &GraphElements) -> Vec<EditorError> {
    let mut seen = HashSet::new();
    let mut errors = Vec::new();
    for node in &elements.nodes {
        if !seen.insert(node.id.as_str()) {
            errors.push(EditorError::elements(
                "G001",
                format!("Duplicate node id '{}'", node.id),
            ));
        }
    }
    errors
}

fn block_id(label: &str) -> String {
    format!("block-{}", label)
}

fn scoped_id(loop_label: Option<&str>, name: &str) -> String {
    match loop_label {
        Some(label) => format!("{}-{}", name, label),
        None => name.to_string(),
    }
}

/// Every node has at most one incoming edge, so the target names the edge.
fn edge(source: &str, target: &str, edge_type: EdgeType) -> GraphEdge {
    GraphEdge {
        id: format!("edge-{}", target),
        source: source.into(),
        target: target.into(),
        edge_type,
    }
}
