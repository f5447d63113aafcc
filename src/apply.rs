//! Applying [`NodePatch`]es to a [`LiveTree`].

use crate::{
	live::LiveTree,
	patch::{NodePatch, PropPatch},
	vnode::VirtualNode,
};
use tracing::{error, instrument, trace, trace_span};

/// Raised when a patch doesn't fit the live tree it's applied to.
///
/// [`ShapeMismatch`](`PatchError::ShapeMismatch`) and [`IndexOutOfRange`](`PatchError::IndexOutOfRange`)
/// mean the live tree didn't match the old virtual tree the patch was diffed against.
/// The live tree may be left partially patched and should be rebuilt from scratch.
///
/// [`MissingLiveNode`](`PatchError::MissingLiveNode`) means [`apply`] was called without a live node
/// for a patch other than [`NodePatch::Add`]. Nothing is changed in that case.
#[derive(Debug, thiserror::Error)]
pub enum PatchError<E> {
	#[error("expected to update a live element at index {index} but found a non-element node")]
	ShapeMismatch { index: usize },

	#[error("a patch other than `Add` was applied at index {index} without a live node")]
	MissingLiveNode { index: usize },

	#[error("patch addresses live child {index} but only {len} child node(s) were present")]
	IndexOutOfRange { index: usize, len: usize },

	#[error("host operation failed: {0:?}")]
	Host(E),
}

/// Applies `patch` to `live`, a child of `parent`.
///
/// `live` is [`None`] only for [`NodePatch::Add`], which appends to `parent`.
///
/// Returns the live node that occupies the patched slot afterwards,
/// which is a new node after [`NodePatch::Add`] or [`NodePatch::Replace`] and [`None`] after [`NodePatch::Remove`].
///
/// # Errors
///
/// Fails fast with the first contract violation or host error, without attempting the rest of the patch.
#[instrument(level = "debug", skip(host, parent, live, patch))]
pub fn apply<H: LiveTree>(host: &mut H, parent: &H::Node, live: Option<&H::Node>, patch: &NodePatch<'_>) -> Result<Option<H::Node>, PatchError<H::Error>> {
	apply_at(host, parent, live, patch, 0)
}

fn apply_at<H: LiveTree>(host: &mut H, parent: &H::Node, live: Option<&H::Node>, patch: &NodePatch<'_>, index: usize) -> Result<Option<H::Node>, PatchError<H::Error>> {
	match patch {
		NodePatch::Stay => Ok(live.cloned()),

		NodePatch::Add { node } => {
			let span = trace_span!("Adding node", index);
			let _enter = span.enter();
			let created = materialize(host, node)?;
			host.append(parent, &created).map_err(PatchError::Host)?;
			Ok(Some(created))
		}

		NodePatch::Remove => {
			let span = trace_span!("Removing node", index);
			let _enter = span.enter();
			let live = require_live::<H>(live, index)?;
			host.remove(parent, live).map_err(PatchError::Host)?;
			Ok(None)
		}

		NodePatch::Replace { node } => {
			let span = trace_span!("Replacing node", index);
			let _enter = span.enter();
			let live = require_live::<H>(live, index)?;
			let created = materialize(host, node)?;
			host.replace(parent, live, &created).map_err(PatchError::Host)?;
			Ok(Some(created))
		}

		NodePatch::Update {
			attribute_patches,
			child_patches,
		} => {
			let span = trace_span!("Updating element", index, "attribute_patches.len()" = attribute_patches.len(), "child_patches.len()" = child_patches.len());
			let _enter = span.enter();
			let element = require_live::<H>(live, index)?;
			if !host.is_element(element) {
				error!("Expected to update an element but found a non-element node.");
				return Err(PatchError::ShapeMismatch { index });
			}

			for attribute_patch in attribute_patches {
				apply_attribute(host, element, attribute_patch)?;
			}

			// Indices refer to the child list as it was before this pass.
			let snapshot: Vec<Option<H::Node>> = (0..child_patches.len()).map(|i| host.child_at(element, i)).collect();
			let len = snapshot.iter().take_while(|child| child.is_some()).count();
			for (i, (child_patch, child)) in child_patches.iter().zip(&snapshot).enumerate() {
				if child.is_none() && !matches!(child_patch, NodePatch::Add { .. }) {
					error!("Child patch {} addresses a child beyond the live child list ({} child node(s)).", i, len);
					return Err(PatchError::IndexOutOfRange { index: i, len });
				}
				apply_at(host, element, child.as_ref(), child_patch, i)?;
			}

			Ok(Some(element.clone()))
		}
	}
}

fn apply_attribute<H: LiveTree>(host: &mut H, element: &H::Node, patch: &PropPatch<'_>) -> Result<(), PatchError<H::Error>> {
	match *patch {
		PropPatch::Stay => Ok(()),
		PropPatch::SetAttribute { name, value } => {
			if cfg!(feature = "dangerous-logging") {
				trace!(name, value, "Setting attribute.");
			} else {
				trace!(name, "Setting attribute.");
			}
			host.set_attribute(element, name, value).map_err(PatchError::Host)
		}
		PropPatch::RemoveAttribute { name } => {
			trace!(name, "Removing attribute.");
			host.remove_attribute(element, name).map_err(PatchError::Host)
		}
	}
}

fn require_live<H: LiveTree>(live: Option<&H::Node>, index: usize) -> Result<&H::Node, PatchError<H::Error>> {
	live.ok_or_else(|| {
		error!("Expected a live node at index {} but found none.", index);
		PatchError::MissingLiveNode { index }
	})
}

/// Constructs a brand-new live subtree from `node`.
///
/// Attributes go through [`LiveTree::set_attribute`], same as for updates.
/// The result is not attached to anything yet.
///
/// # Errors
///
/// Iff a host primitive fails.
pub fn materialize<H: LiveTree>(host: &mut H, node: &VirtualNode) -> Result<H::Node, PatchError<H::Error>> {
	match node {
		VirtualNode::Text(text) => {
			if cfg!(feature = "dangerous-logging") {
				trace!(text = text.as_str(), "Creating text node.");
			} else {
				trace!("Creating text node.");
			}
			host.create_text(text).map_err(PatchError::Host)
		}
		VirtualNode::Element(element) => {
			let span = trace_span!("Creating element", tag = element.tag());
			let _enter = span.enter();
			let created = host.create_element(element.tag()).map_err(PatchError::Host)?;
			for (name, value) in element.attributes() {
				apply_attribute(host, &created, &PropPatch::SetAttribute { name, value })?;
			}
			for child in element.child_nodes() {
				let child = materialize(host, child)?;
				host.append(&created, &child).map_err(PatchError::Host)?;
			}
			Ok(created)
		}
	}
}
