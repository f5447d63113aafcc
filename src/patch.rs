use crate::vnode::VirtualNode;

/// The change required for one attribute slot of an updated element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropPatch<'a> {
	Stay,
	/// Create or overwrite the attribute.
	SetAttribute { name: &'a str, value: &'a str },
	RemoveAttribute { name: &'a str },
}

/// An edit script for one live node and, through [`NodePatch::Update`], its subtree.
///
/// Patches borrow from the new virtual tree they were diffed from
/// and are consumed by exactly one [`apply`](`crate::apply::apply`) call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodePatch<'a> {
	/// The subtree is unchanged.
	Stay,
	/// Materialize `node` and append it to the parent.
	Add { node: &'a VirtualNode },
	/// Detach the live node from its parent.
	Remove,
	/// Materialize `node` and put it in place of the live node.
	Replace { node: &'a VirtualNode },
	/// Patch the live element's attributes, then its children by position.
	Update {
		attribute_patches: Vec<PropPatch<'a>>,
		child_patches: Vec<NodePatch<'a>>,
	},
}

impl PropPatch<'_> {
	#[must_use]
	pub fn is_stay(&self) -> bool {
		matches!(self, PropPatch::Stay)
	}
}

impl NodePatch<'_> {
	#[must_use]
	pub fn is_stay(&self) -> bool {
		matches!(self, NodePatch::Stay)
	}

	/// Counts the node and attribute patches in this tree that aren't [`Stay`](`NodePatch::Stay`).
	///
	/// An [`Update`](`NodePatch::Update`) itself is not counted, only its contents.
	#[must_use]
	pub fn count_changes(&self) -> usize {
		match self {
			NodePatch::Stay => 0,
			NodePatch::Add { .. } | NodePatch::Remove | NodePatch::Replace { .. } => 1,
			NodePatch::Update {
				attribute_patches,
				child_patches,
			} => attribute_patches.iter().filter(|patch| !patch.is_stay()).count() + child_patches.iter().map(NodePatch::count_changes).sum::<usize>(),
		}
	}
}
