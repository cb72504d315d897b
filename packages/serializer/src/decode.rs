use crate::records::{SavedDocument, TagRecord, NO_PARENT};
use crate::{SerializeError, SerializeResult};
use pagecraft_document::{Document, DocumentNode, TagPrototype};
use tracing::{debug, instrument};

/// Rebuild a document from its records.
///
/// Every structural check runs before any node is assembled, so a corrupt
/// payload never yields a partial tree.
#[instrument(skip(saved), fields(records = saved.tag_tree.len()))]
pub fn from_records(saved: SavedDocument) -> SerializeResult<Document> {
    let SavedDocument {
        tag_tree,
        css_content,
    } = saved;

    if tag_tree.is_empty() {
        return Err(SerializeError::corrupt("no root record"));
    }

    let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); tag_tree.len()];
    let mut expected_children = Vec::with_capacity(tag_tree.len());
    let mut tags = Vec::with_capacity(tag_tree.len());

    for (position, record) in tag_tree.into_iter().enumerate() {
        if record.node_index != position as i64 {
            return Err(SerializeError::corrupt(format!(
                "record {} carries node index {}",
                position, record.node_index
            )));
        }

        match (position, record.parent_index) {
            (0, NO_PARENT) => {}
            (0, parent) => {
                return Err(SerializeError::corrupt(format!(
                    "root record has parent index {}",
                    parent
                )));
            }
            (_, NO_PARENT) => {
                return Err(SerializeError::corrupt(format!(
                    "record {} is a second root",
                    position
                )));
            }
            (_, parent) if parent < 0 || parent >= position as i64 => {
                return Err(SerializeError::corrupt(format!(
                    "record {} references parent {} before it was defined",
                    position, parent
                )));
            }
            (_, parent) => children_of[parent as usize].push(position),
        }

        expected_children.push(record.number_of_children);
        tags.push(Some(tag_from_record(record)?));
    }

    for (index, (children, expected)) in children_of.iter().zip(&expected_children).enumerate() {
        if children.len() != *expected {
            return Err(SerializeError::corrupt(format!(
                "record {} declares {} children but {} reference it",
                index,
                expected,
                children.len()
            )));
        }
    }

    // Children always carry larger indices than their parent, so walking
    // backwards finishes every subtree before its parent needs it.
    let mut built: Vec<Option<DocumentNode>> = vec![None; tags.len()];
    for index in (0..tags.len()).rev() {
        let tag = tags[index]
            .take()
            .ok_or_else(|| SerializeError::corrupt(format!("record {} used twice", index)))?;
        let mut node = DocumentNode::new(tag);
        for &child in &children_of[index] {
            let child_node = built[child].take().ok_or_else(|| {
                SerializeError::corrupt(format!("record {} attached twice", child))
            })?;
            node.push_child(child_node);
        }
        built[index] = Some(node);
    }

    let root = built[0]
        .take()
        .ok_or_else(|| SerializeError::corrupt("root was not rebuilt"))?;

    debug!("Decoded tree rooted at <{}>", root.name());
    Ok(Document::from_tree(root, css_content))
}

fn tag_from_record(record: TagRecord) -> SerializeResult<TagPrototype> {
    let mut tag = TagPrototype::new(record.tag, record.has_closing_tag)
        .with_legal_parents(record.legal_parents);

    for attribute in record.attributes {
        if tag.has_attribute(&attribute.attribute_name) {
            return Err(SerializeError::corrupt(format!(
                "<{}> lists attribute '{}' twice",
                tag.name(),
                attribute.attribute_name
            )));
        }
        tag = tag.with_attribute(attribute.attribute_name, attribute.attribute_value);
    }

    Ok(tag)
}

/// Parse a JSON payload back into a document
pub fn deserialize(payload: &str) -> SerializeResult<Document> {
    let saved: SavedDocument = serde_json::from_str(payload)?;
    from_records(saved)
}
