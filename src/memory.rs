//! An arena-backed in-memory [`LiveTree`] that can journal its mutations.
//!
//! Useful for tests and for headless hosts.
//! Unlike a forgiving host, it rejects mutations that don't fit the tree's current shape.
//!
//! Subtrees detached by [`remove`](`LiveTree::remove`) or [`replace`](`LiveTree::replace`) are freed right away
//! and their slots reused. Handles to freed nodes become stale and are reported as [`MemoryError::UnknownNode`].

use crate::{
	live::LiveTree,
	vnode::{Element, VirtualNode},
};
use tracing::trace;

/// Handle of a node in a [`MemoryTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
	index: usize,
	generation: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum MemoryNode {
	Text(String),
	Element { tag: String, attributes: Vec<(String, String)>, children: Vec<NodeId> },
}

/// One observed mutation of a [`MemoryTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
	CreateText { node: NodeId },
	CreateElement { node: NodeId, tag: String },
	SetAttribute { element: NodeId, name: String, value: String },
	RemoveAttribute { element: NodeId, name: String },
	Append { parent: NodeId, child: NodeId },
	Replace { parent: NodeId, old_child: NodeId, new_child: NodeId },
	Remove { parent: NodeId, child: NodeId },
}

impl Mutation {
	#[must_use]
	pub fn kind(&self) -> &'static str {
		match self {
			Mutation::CreateText { .. } => "create_text",
			Mutation::CreateElement { .. } => "create_element",
			Mutation::SetAttribute { .. } => "set_attribute",
			Mutation::RemoveAttribute { .. } => "remove_attribute",
			Mutation::Append { .. } => "append",
			Mutation::Replace { .. } => "replace",
			Mutation::Remove { .. } => "remove",
		}
	}

	/// Whether this mutation changed an existing node, as opposed to only creating a detached one.
	#[must_use]
	pub fn is_structural(&self) -> bool {
		!matches!(self, Mutation::CreateText { .. } | Mutation::CreateElement { .. })
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemoryError {
	#[error("unknown node {0:?}")]
	UnknownNode(NodeId),
	#[error("{0:?} is not an element")]
	NotAnElement(NodeId),
	#[error("{child:?} is not a child of {parent:?}")]
	NotAChild { parent: NodeId, child: NodeId },
}

#[derive(Debug, Clone, Default)]
struct Slot {
	generation: u32,
	node: Option<MemoryNode>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTree {
	slots: Vec<Slot>,
	free: Vec<usize>,
	journal: Option<Vec<Mutation>>,
}

impl MemoryTree {
	/// Creates an empty tree that doesn't journal.
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty tree that records every mutation in its [`journal`](`MemoryTree::journal`).
	///
	/// The journal grows until it's [taken](`MemoryTree::take_journal`).
	#[must_use]
	pub fn with_journal() -> Self {
		Self {
			journal: Some(Vec::new()),
			..Self::default()
		}
	}

	/// All mutations since creation or the last [`take_journal`](`MemoryTree::take_journal`), oldest first.
	///
	/// Always empty if the tree wasn't created [`with_journal`](`MemoryTree::with_journal`).
	#[must_use]
	pub fn journal(&self) -> &[Mutation] {
		self.journal.as_deref().unwrap_or(&[])
	}

	/// Takes the journal, leaving it empty but enabled if it was before.
	pub fn take_journal(&mut self) -> Vec<Mutation> {
		self.journal.as_mut().map(std::mem::take).unwrap_or_default()
	}

	/// The number of nodes currently allocated, attached or not.
	#[must_use]
	pub fn len(&self) -> usize {
		self.slots.len() - self.free.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// The number of slots in the arena, including free ones.
	#[must_use]
	pub fn capacity(&self) -> usize {
		self.slots.len()
	}

	/// Returns the child handles of `node`, which are empty for text nodes.
	///
	/// # Errors
	///
	/// Iff `node` is unknown.
	pub fn children(&self, node: NodeId) -> Result<&[NodeId], MemoryError> {
		match self.node(node)? {
			MemoryNode::Text(_) => Ok(&[]),
			MemoryNode::Element { children, .. } => Ok(children),
		}
	}

	/// Returns the value of the attribute `name` on `element`.
	#[must_use]
	pub fn attribute(&self, element: NodeId, name: &str) -> Option<&str> {
		match self.node(element).ok()? {
			MemoryNode::Text(_) => None,
			MemoryNode::Element { attributes, .. } => attributes.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str()),
		}
	}

	/// Reads the live subtree at `node` back into a [`VirtualNode`].
	///
	/// # Errors
	///
	/// Iff `node` or one of its descendants is unknown.
	pub fn snapshot(&self, node: NodeId) -> Result<VirtualNode, MemoryError> {
		Ok(match self.node(node)? {
			MemoryNode::Text(text) => VirtualNode::text(text.as_str()),
			MemoryNode::Element { tag, attributes, children } => {
				let mut element = Element::new(tag.as_str());
				for (name, value) in attributes {
					element = element.attribute(name.as_str(), value.as_str());
				}
				for &child in children {
					element = element.child(self.snapshot(child)?);
				}
				element.into()
			}
		})
	}

	fn node(&self, id: NodeId) -> Result<&MemoryNode, MemoryError> {
		self.slots
			.get(id.index)
			.filter(|slot| slot.generation == id.generation)
			.and_then(|slot| slot.node.as_ref())
			.ok_or(MemoryError::UnknownNode(id))
	}

	fn node_mut(&mut self, id: NodeId) -> Result<&mut MemoryNode, MemoryError> {
		self.slots
			.get_mut(id.index)
			.filter(|slot| slot.generation == id.generation)
			.and_then(|slot| slot.node.as_mut())
			.ok_or(MemoryError::UnknownNode(id))
	}

	fn insert(&mut self, node: MemoryNode) -> NodeId {
		if let Some(index) = self.free.pop() {
			if let Some(slot) = self.slots.get_mut(index) {
				slot.node = Some(node);
				return NodeId { index, generation: slot.generation };
			}
		}
		self.slots.push(Slot { generation: 0, node: Some(node) });
		NodeId {
			index: self.slots.len() - 1,
			generation: 0,
		}
	}

	/// Frees `root` and its descendants. `root` must already be detached.
	fn release(&mut self, root: NodeId) {
		let mut pending = vec![root];
		let mut released = 0_usize;
		while let Some(id) = pending.pop() {
			let slot = match self.slots.get_mut(id.index) {
				Some(slot) if slot.generation == id.generation => slot,
				_ => continue,
			};
			if let Some(MemoryNode::Element { children, .. }) = slot.node.take() {
				pending.extend(children);
			}
			slot.generation = slot.generation.wrapping_add(1);
			self.free.push(id.index);
			released += 1;
		}
		trace!(released, "Freed detached node(s).");
	}

	fn attributes_mut(&mut self, element: NodeId) -> Result<&mut Vec<(String, String)>, MemoryError> {
		match self.node_mut(element)? {
			MemoryNode::Text(_) => Err(MemoryError::NotAnElement(element)),
			MemoryNode::Element { attributes, .. } => Ok(attributes),
		}
	}

	fn children_mut(&mut self, parent: NodeId) -> Result<&mut Vec<NodeId>, MemoryError> {
		match self.node_mut(parent)? {
			MemoryNode::Text(_) => Err(MemoryError::NotAnElement(parent)),
			MemoryNode::Element { children, .. } => Ok(children),
		}
	}

	fn position(&mut self, parent: NodeId, child: NodeId) -> Result<(&mut Vec<NodeId>, usize), MemoryError> {
		let children = self.children_mut(parent)?;
		match children.iter().position(|&c| c == child) {
			Some(i) => Ok((children, i)),
			None => Err(MemoryError::NotAChild { parent, child }),
		}
	}

	fn record(&mut self, mutation: Mutation) {
		if cfg!(feature = "dangerous-logging") {
			trace!(kind = mutation.kind(), ?mutation, "Mutated live tree.");
		} else {
			trace!(kind = mutation.kind(), "Mutated live tree.");
		}
		if let Some(journal) = &mut self.journal {
			journal.push(mutation);
		}
	}
}

impl LiveTree for MemoryTree {
	type Node = NodeId;
	type Error = MemoryError;

	fn is_element(&self, node: &NodeId) -> bool {
		matches!(self.node(*node), Ok(MemoryNode::Element { .. }))
	}

	fn create_text(&mut self, text: &str) -> Result<NodeId, MemoryError> {
		let node = self.insert(MemoryNode::Text(text.to_owned()));
		self.record(Mutation::CreateText { node });
		Ok(node)
	}

	fn create_element(&mut self, tag: &str) -> Result<NodeId, MemoryError> {
		let node = self.insert(MemoryNode::Element {
			tag: tag.to_owned(),
			attributes: Vec::new(),
			children: Vec::new(),
		});
		self.record(Mutation::CreateElement { node, tag: tag.to_owned() });
		Ok(node)
	}

	fn set_attribute(&mut self, element: &NodeId, name: &str, value: &str) -> Result<(), MemoryError> {
		let attributes = self.attributes_mut(*element)?;
		match attributes.iter_mut().find(|(n, _)| n == name) {
			Some((_, existing)) => value.clone_into(existing),
			None => attributes.push((name.to_owned(), value.to_owned())),
		}
		self.record(Mutation::SetAttribute {
			element: *element,
			name: name.to_owned(),
			value: value.to_owned(),
		});
		Ok(())
	}

	fn remove_attribute(&mut self, element: &NodeId, name: &str) -> Result<(), MemoryError> {
		self.attributes_mut(*element)?.retain(|(n, _)| n != name);
		self.record(Mutation::RemoveAttribute {
			element: *element,
			name: name.to_owned(),
		});
		Ok(())
	}

	fn append(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), MemoryError> {
		self.node(*child)?;
		self.children_mut(*parent)?.push(*child);
		self.record(Mutation::Append { parent: *parent, child: *child });
		Ok(())
	}

	fn replace(&mut self, parent: &NodeId, old_child: &NodeId, new_child: &NodeId) -> Result<(), MemoryError> {
		self.node(*new_child)?;
		let (children, i) = self.position(*parent, *old_child)?;
		children[i] = *new_child;
		self.release(*old_child);
		self.record(Mutation::Replace {
			parent: *parent,
			old_child: *old_child,
			new_child: *new_child,
		});
		Ok(())
	}

	fn remove(&mut self, parent: &NodeId, child: &NodeId) -> Result<(), MemoryError> {
		let (children, i) = self.position(*parent, *child)?;
		children.remove(i);
		self.release(*child);
		self.record(Mutation::Remove { parent: *parent, child: *child });
		Ok(())
	}

	fn child_at(&self, element: &NodeId, index: usize) -> Option<NodeId> {
		self.children(*element).ok()?.get(index).copied()
	}
}
