//! Positional diffing of two virtual trees.
//!
//! Children are matched by index only. There is no keyed matching,
//! so moving a child shows up as a replacement of every shifted slot.

use crate::{
	patch::{NodePatch, PropPatch},
	vnode::{Element, VirtualNode},
};
use core::cmp::max;
use hashbrown::HashSet;
use tracing::{instrument, trace};

/// Computes the patch that turns a live tree matching `old` into one matching `new`.
///
/// `None` stands for an absent node on that side.
/// Neither input is modified. The patch borrows from both.
#[must_use]
#[instrument(level = "trace", skip(new, old))]
pub fn diff<'a>(new: Option<&'a VirtualNode>, old: Option<&'a VirtualNode>) -> NodePatch<'a> {
	let (new, old) = match (new, old) {
		(None, None) => return NodePatch::Stay,
		(Some(new), None) => return NodePatch::Add { node: new },
		(None, Some(_)) => return NodePatch::Remove,
		(Some(new), Some(old)) => (new, old),
	};

	match (new, old) {
		(VirtualNode::Element(e_new), VirtualNode::Element(e_old)) if e_new.tag() == e_old.tag() => NodePatch::Update {
			attribute_patches: diff_attributes(e_new, e_old),
			child_patches: diff_children(e_new, e_old),
		},
		(VirtualNode::Text(t_new), VirtualNode::Text(t_old)) if t_new == t_old => NodePatch::Stay,
		// Different kinds, different text or different tags.
		_ => {
			trace!("Replacing mismatching node.");
			NodePatch::Replace { node: new }
		}
	}
}

/// Diffs the attributes of two elements with the same tag.
///
/// One patch is produced per name in the union of both attribute sets:
/// first `new`'s names in its order, then names only `old` has in `old`'s order.
#[must_use]
pub fn diff_attributes<'a>(new: &'a Element, old: &'a Element) -> Vec<PropPatch<'a>> {
	let (a_new, a_old) = (new.attributes(), old.attributes());

	let mut seen = HashSet::with_capacity(a_new.len() + a_old.len());
	let mut patches = Vec::with_capacity(a_new.len() + a_old.len());

	for (name, value) in a_new {
		seen.insert(name);
		patches.push(match a_old.get(name) {
			Some(old_value) if old_value == value => PropPatch::Stay,
			_ => PropPatch::SetAttribute { name, value },
		});
	}

	patches.extend(a_old.names().filter(|name| !seen.contains(name)).map(|name| PropPatch::RemoveAttribute { name }));

	patches
}

/// Diffs the children of two elements by position.
///
/// The result always has one patch per index of the longer child list.
#[must_use]
pub fn diff_children<'a>(new: &'a Element, old: &'a Element) -> Vec<NodePatch<'a>> {
	let (c_new, c_old) = (new.child_nodes(), old.child_nodes());
	(0..max(c_new.len(), c_old.len())).map(|i| diff(c_new.get(i), c_old.get(i))).collect()
}
