//! [`LiveTree`] for the browser DOM, via [`web_sys`].

use crate::live::LiveTree;
use core::convert::TryFrom;
use tracing::{instrument, trace};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Node};

/// Attribute names that the DOM spells differently, as `(virtual name, DOM name)`.
pub const ATTRIBUTE_ALIASES: &[(&str, &str)] = &[("className", "class"), ("htmlFor", "for")];

/// Translates a virtual attribute name to the DOM's attribute name.
#[must_use]
pub fn dom_attribute_name(name: &str) -> &str {
	ATTRIBUTE_ALIASES.iter().find(|(alias, _)| *alias == name).map_or(name, |&(_, dom_name)| dom_name)
}

/// Creates and mutates DOM nodes owned by one [`Document`].
#[derive(Debug, Clone)]
pub struct WebDom {
	document: Document,
}

impl WebDom {
	#[must_use]
	pub fn new(document: Document) -> Self {
		Self { document }
	}

	/// Uses the owner document of `element`.
	#[must_use]
	pub fn for_element(element: &Element) -> Option<Self> {
		element.owner_document().map(Self::new)
	}

	#[must_use]
	pub fn document(&self) -> &Document {
		&self.document
	}
}

fn as_element(node: &Node) -> Result<&Element, JsValue> {
	node.dyn_ref::<Element>().ok_or_else(|| JsValue::from_str("vtree-patch: Expected a DOM element."))
}

impl LiveTree for WebDom {
	type Node = Node;
	type Error = JsValue;

	fn is_element(&self, node: &Node) -> bool {
		node.dyn_ref::<Element>().is_some()
	}

	fn create_text(&mut self, text: &str) -> Result<Node, JsValue> {
		Ok(self.document.create_text_node(text).into())
	}

	#[instrument(level = "trace", skip(self))]
	fn create_element(&mut self, tag: &str) -> Result<Node, JsValue> {
		self.document.create_element(tag).map(Into::into)
	}

	fn set_attribute(&mut self, element: &Node, name: &str, value: &str) -> Result<(), JsValue> {
		let dom_name = dom_attribute_name(name);
		if dom_name != name {
			trace!(name, dom_name, "Translated attribute name.");
		}
		as_element(element)?.set_attribute(dom_name, value)
	}

	fn remove_attribute(&mut self, element: &Node, name: &str) -> Result<(), JsValue> {
		as_element(element)?.remove_attribute(dom_attribute_name(name))
	}

	fn append(&mut self, parent: &Node, child: &Node) -> Result<(), JsValue> {
		parent.append_child(child).map(drop)
	}

	fn replace(&mut self, parent: &Node, old_child: &Node, new_child: &Node) -> Result<(), JsValue> {
		parent.replace_child(new_child, old_child).map(drop)
	}

	fn remove(&mut self, parent: &Node, child: &Node) -> Result<(), JsValue> {
		parent.remove_child(child).map(drop)
	}

	fn child_at(&self, element: &Node, index: usize) -> Option<Node> {
		let index = u32::try_from(index).ok()?;
		element.child_nodes().get(index)
	}
}
