//! The capabilities a host must provide so patches can be applied to its live tree.

/// A mutable live tree, addressed through node handles.
///
/// Implemented once per host environment,
/// for example [`WebDom`](`crate::web::WebDom`) for the browser DOM and [`MemoryTree`](`crate::memory::MemoryTree`) for tests.
///
/// Handles are cheap to clone and keep referring to the same live node while it's moved around.
pub trait LiveTree {
	type Node: Clone;
	/// The failure type of the host's primitives. Use [`Infallible`](`core::convert::Infallible`) if they can't fail.
	type Error;

	/// Distinguishes element nodes from text (or other) nodes.
	fn is_element(&self, node: &Self::Node) -> bool;

	fn create_text(&mut self, text: &str) -> Result<Self::Node, Self::Error>;
	fn create_element(&mut self, tag: &str) -> Result<Self::Node, Self::Error>;

	/// Creates or overwrites an attribute.
	///
	/// Hosts translate reserved attribute names to their own here.
	fn set_attribute(&mut self, element: &Self::Node, name: &str, value: &str) -> Result<(), Self::Error>;
	fn remove_attribute(&mut self, element: &Self::Node, name: &str) -> Result<(), Self::Error>;

	/// Appends `child` as the last child of `parent`.
	fn append(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), Self::Error>;
	/// Puts `new_child` in `old_child`'s position under `parent`, detaching `old_child`.
	fn replace(&mut self, parent: &Self::Node, old_child: &Self::Node, new_child: &Self::Node) -> Result<(), Self::Error>;
	fn remove(&mut self, parent: &Self::Node, child: &Self::Node) -> Result<(), Self::Error>;

	/// Returns the `index`th child of `element`, or [`None`] if out of range.
	fn child_at(&self, element: &Self::Node, index: usize) -> Option<Self::Node>;
}
