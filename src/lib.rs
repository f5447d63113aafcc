#![doc(html_root_url = "https://docs.rs/vtree-patch/0.0.1")]
#![warn(clippy::pedantic)]

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod apply;
pub mod diff;
pub mod live;
pub mod load;
pub mod memory;
pub mod patch;
pub mod reconciler;
pub mod vnode;
pub mod web;

pub use apply::{apply, materialize, PatchError};
pub use diff::diff;
pub use live::LiveTree;
pub use patch::{NodePatch, PropPatch};
pub use reconciler::Reconciler;
pub use vnode::{Attributes, Element, VirtualNode};
