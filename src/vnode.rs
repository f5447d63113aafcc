//! The immutable virtual tree that [`diff`](`crate::diff::diff`) compares.

use core::{iter::FromIterator, slice};
use tracing::warn;

/// Attribute name that is reserved for structural content and can't be stored as an attribute.
pub const RESERVED_CHILDREN: &str = "children";

/// A description of a desired tree shape.
///
/// Once built, a [`VirtualNode`] is never mutated by diffing or patching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VirtualNode {
	/// A leaf holding literal text content.
	Text(String),
	/// A tagged node with attributes and ordered children.
	Element(Element),
}

impl VirtualNode {
	/// Creates a text leaf.
	pub fn text(text: impl Into<String>) -> Self {
		Self::Text(text.into())
	}

	/// Creates an [`Element`] builder with the given tag, no attributes and no children.
	///
	/// The builder converts into a [`VirtualNode`] via [`From`].
	pub fn element(tag: impl Into<String>) -> Element {
		Element::new(tag)
	}

	#[must_use]
	pub fn as_element(&self) -> Option<&Element> {
		match self {
			VirtualNode::Element(element) => Some(element),
			VirtualNode::Text(_) => None,
		}
	}

	#[must_use]
	pub fn as_text(&self) -> Option<&str> {
		match self {
			VirtualNode::Text(text) => Some(text),
			VirtualNode::Element(_) => None,
		}
	}
}

impl From<Element> for VirtualNode {
	fn from(element: Element) -> Self {
		Self::Element(element)
	}
}

impl From<&str> for VirtualNode {
	fn from(text: &str) -> Self {
		Self::text(text)
	}
}

impl From<String> for VirtualNode {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

/// An element description: tag name, attributes and children in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
	tag: String,
	attributes: Attributes,
	children: Vec<VirtualNode>,
}

impl Element {
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			attributes: Attributes::new(),
			children: Vec::new(),
		}
	}

	/// Sets an attribute, overwriting an earlier value with the same name in place.
	///
	/// The reserved name `"children"` is refused.
	#[must_use]
	pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attributes.insert(name, value);
		self
	}

	#[must_use]
	pub fn child(mut self, child: impl Into<VirtualNode>) -> Self {
		self.children.push(child.into());
		self
	}

	#[must_use]
	pub fn children<I>(mut self, children: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<VirtualNode>,
	{
		self.children.extend(children.into_iter().map(Into::into));
		self
	}

	#[must_use]
	pub fn tag(&self) -> &str {
		&self.tag
	}

	#[must_use]
	pub fn attributes(&self) -> &Attributes {
		&self.attributes
	}

	#[must_use]
	pub fn child_nodes(&self) -> &[VirtualNode] {
		&self.children
	}
}

/// Uniquely named attributes, kept in insertion order.
///
/// Equality ignores order.
#[derive(Debug, Clone, Default, Eq)]
pub struct Attributes(Vec<(String, String)>);

impl Attributes {
	#[must_use]
	pub fn new() -> Self {
		Self(Vec::new())
	}

	/// Returns `false` iff `name` was refused.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
		let name = name.into();
		if name == RESERVED_CHILDREN {
			warn!("Refusing to store reserved attribute name {:?}.", RESERVED_CHILDREN);
			return false;
		}

		let value = value.into();
		match self.0.iter_mut().find(|(n, _)| *n == name) {
			Some((_, existing)) => *existing = value,
			None => self.0.push((name, value)),
		}
		true
	}

	#[must_use]
	pub fn get(&self, name: &str) -> Option<&str> {
		self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
	}

	#[must_use]
	pub fn contains(&self, name: &str) -> bool {
		self.get(name).is_some()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> Iter<'_> {
		Iter(self.0.iter())
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.iter().map(|(name, _)| name)
	}
}

impl PartialEq for Attributes {
	fn eq(&self, other: &Self) -> bool {
		self.len() == other.len() && self.iter().all(|(name, value)| other.get(name) == Some(value))
	}
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Attributes {
	fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
		let mut attributes = Self::new();
		for (name, value) in iter {
			attributes.insert(name, value);
		}
		attributes
	}
}

impl<'a> IntoIterator for &'a Attributes {
	type Item = (&'a str, &'a str);
	type IntoIter = Iter<'a>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Iterates `(name, value)` pairs in insertion order.
#[derive(Debug, Clone)]
pub struct Iter<'a>(slice::Iter<'a, (String, String)>);

impl<'a> Iterator for Iter<'a> {
	type Item = (&'a str, &'a str);

	fn next(&mut self) -> Option<Self::Item> {
		self.0.next().map(|(name, value)| (name.as_str(), value.as_str()))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		self.0.size_hint()
	}
}

impl ExactSizeIterator for Iter<'_> {}
