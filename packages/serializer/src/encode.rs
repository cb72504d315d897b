use crate::records::{AttributeRecord, SavedDocument, TagRecord, NO_PARENT};
use crate::SerializeResult;
use pagecraft_document::{Document, DocumentNode};
use tracing::{debug, instrument};

/// Flatten a document into pre-order records.
///
/// Indices are derived fresh on every call and never stored on the tree.
#[instrument(skip(doc))]
pub fn to_records(doc: &Document) -> SavedDocument {
    let mut tag_tree = Vec::new();
    let mut pending: Vec<(&DocumentNode, i64)> = vec![(doc.root(), NO_PARENT)];

    while let Some((node, parent_index)) = pending.pop() {
        let node_index = tag_tree.len() as i64;
        tag_tree.push(record_for(node, node_index, parent_index));

        // Reversed so the first child is popped next
        pending.extend(node.children().iter().rev().map(|child| (child, node_index)));
    }

    debug!("Encoded {} tag records", tag_tree.len());
    SavedDocument {
        tag_tree,
        css_content: doc.stylesheet_text().to_string(),
    }
}

fn record_for(node: &DocumentNode, node_index: i64, parent_index: i64) -> TagRecord {
    let tag = node.tag();
    TagRecord {
        tag: tag.name().to_string(),
        has_closing_tag: tag.has_closing_tag(),
        legal_parents: tag.legal_parents().to_vec(),
        attributes: tag
            .attributes()
            .map(|(name, value)| AttributeRecord {
                attribute_name: name.to_string(),
                attribute_value: value.to_string(),
            })
            .collect(),
        number_of_children: node.children().len(),
        node_index,
        parent_index,
    }
}

/// Render a document as pretty-printed JSON
pub fn serialize(doc: &Document) -> SerializeResult<String> {
    Ok(serde_json::to_string_pretty(&to_records(doc))?)
}
