//! Reads existing DOM content back into [`VirtualNode`]s,
//! for example to diff against server-rendered markup.
//!
//! Loading fails on nodes that are neither elements nor text, like comments,
//! since skipping them would shift the positions of their following siblings.

use crate::vnode::{Attributes, Element, VirtualNode};
use core::convert::TryFrom;
use tracing::warn;
use wasm_bindgen::JsCast;
use web_sys::{Attr, NamedNodeMap, Node, NodeList, Text};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadError {
	/// See [`Node::node_type`].
	#[error("DOM node of type {node_type} has no virtual representation")]
	UnsupportedNode { node_type: u16 },
}

/// Loads `node` and its subtree.
///
/// # Errors
///
/// Iff `node` or one of its descendants is neither an element nor text.
pub fn load_node(node: &Node) -> Result<VirtualNode, LoadError> {
	if let Some(element) = node.dyn_ref::<web_sys::Element>() {
		load_element(element).map(Into::into)
	} else if let Some(text) = node.dyn_ref::<Text>() {
		Ok(VirtualNode::text(text.data()))
	} else {
		let node_type = node.node_type();
		warn!("Can't load DOM node of type {}.", node_type);
		Err(LoadError::UnsupportedNode { node_type })
	}
}

/// # Errors
///
/// See [`load_node`].
pub fn load_child_nodes(child_nodes: &NodeList) -> Result<Vec<VirtualNode>, LoadError> {
	(0..child_nodes.length()).filter_map(|i| child_nodes.item(i)).map(|child| load_node(&child)).collect()
}

/// Loads `element` with its local (lowercase for HTML) tag name.
///
/// # Errors
///
/// See [`load_node`].
pub fn load_element(element: &web_sys::Element) -> Result<Element, LoadError> {
	let node: &Node = element.as_ref();
	let mut loaded = Element::new(element.local_name()).children(load_child_nodes(&node.child_nodes())?);
	for (name, value) in &load_attributes(&element.attributes()) {
		loaded = loaded.attribute(name, value);
	}
	Ok(loaded)
}

#[must_use]
pub fn load_attributes(attributes: &NamedNodeMap) -> Attributes {
	(0..attributes.length()).filter_map(|i| attributes.item(i)).map(|attribute| load_attribute(&attribute)).collect()
}

#[must_use]
pub fn load_attribute(attribute: &Attr) -> (String, String) {
	(attribute.local_name(), attribute.value())
}

/// Loads the `index`th child node of `parent`, if there is one.
///
/// # Errors
///
/// See [`load_node`].
pub fn load_child_at(parent: &Node, index: usize) -> Result<Option<VirtualNode>, LoadError> {
	let child = u32::try_from(index).ok().and_then(|index| parent.child_nodes().item(index));
	child.as_ref().map(load_node).transpose()
}
