//! Keeps a mounted live subtree in step with successive virtual trees.
//!
//! Each [`Reconciler::update`] diffs against the previous [`VirtualNode`] and applies only the difference.

use crate::{
	apply::{apply, materialize, PatchError},
	diff::diff,
	live::LiveTree,
	vnode::VirtualNode,
};
use tracing::{debug, instrument};

/// Keeps one live subtree in sync with the latest [`VirtualNode`] it was given.
///
/// # Correct Use
///
/// The live subtree must not be modified by anything else between updates,
/// since each update is diffed against the previously rendered [`VirtualNode`] rather than the live tree.
/// If an update fails, the live subtree may be partially patched and the [`Reconciler`] should be discarded.
pub struct Reconciler<H: LiveTree> {
	host: H,
	parent: H::Node,
	live_root: H::Node,
	current: VirtualNode,
}

impl<H: LiveTree> Reconciler<H> {
	/// Materializes `vdom` and appends it to `parent`.
	///
	/// # Errors
	///
	/// Iff a host primitive fails.
	#[instrument(skip(host, parent, vdom))]
	pub fn mount(mut host: H, parent: H::Node, vdom: VirtualNode) -> Result<Self, PatchError<H::Error>> {
		let live_root = materialize(&mut host, &vdom)?;
		host.append(&parent, &live_root).map_err(PatchError::Host)?;
		Ok(Self {
			host,
			parent,
			live_root,
			current: vdom,
		})
	}

	/// Diffs `next` against the current tree and patches the live subtree to match it.
	///
	/// Returns the number of node and attribute changes that were applied.
	///
	/// # Errors
	///
	/// See [`apply`].
	#[instrument(skip(self, next))]
	pub fn update(&mut self, next: VirtualNode) -> Result<usize, PatchError<H::Error>> {
		let patch = diff(Some(&next), Some(&self.current));
		let changes = patch.count_changes();
		debug!(changes, "Diffed update.");

		// `diff` never removes a present root.
		if changes > 0 {
			if let Some(live_root) = apply(&mut self.host, &self.parent, Some(&self.live_root), &patch)? {
				self.live_root = live_root;
			}
		}

		self.current = next;
		Ok(changes)
	}

	#[must_use]
	pub fn host(&self) -> &H {
		&self.host
	}

	pub fn host_mut(&mut self) -> &mut H {
		&mut self.host
	}

	#[must_use]
	pub fn parent(&self) -> &H::Node {
		&self.parent
	}

	/// The live node that currently renders [`current`](`Reconciler::current`).
	///
	/// This changes when the root is replaced.
	#[must_use]
	pub fn live_root(&self) -> &H::Node {
		&self.live_root
	}

	#[must_use]
	pub fn current(&self) -> &VirtualNode {
		&self.current
	}

	#[must_use]
	pub fn into_host(self) -> H {
		self.host
	}
}
