use vtree_patch::{memory::MemoryTree, LiveTree, Reconciler, VirtualNode};


fn view(count: usize) -> VirtualNode {
	VirtualNode::element("ul")
		.attribute("id", count.to_string())
		.attribute("className", "list")
		.child(VirtualNode::element("li").attribute("className", "list__first list__item").child("Top"))
		.children((0..5).map(|i| {
			VirtualNode::element("li")
				.attribute("id", count.to_string())
				.attribute("className", "list__item")
				.child("Item ")
				.child(((count + 1) * 7919 + i * 104_729).to_string())
		}))
		.child(VirtualNode::element("li").attribute("className", "list__first list__item").child("Bottom"))
		.into()
}

fn mounted(vdom: VirtualNode) -> Reconciler<MemoryTree> {
	log_::init();
	let mut host = MemoryTree::with_journal();
	let body = host.create_element("body").unwrap();
	Reconciler::mount(host, body, vdom).unwrap()
}

#[test]
fn ticks_converge() {
	let mut reconciler = mounted(view(0));
	let root = *reconciler.live_root();

	for count in 1..=100 {
		// One `id` on the list, and one `id` plus one number per item.
		assert_eq!(reconciler.update(view(count)).unwrap(), 11);
		assert_eq!(*reconciler.live_root(), root);
		assert_eq!(reconciler.current(), &view(count));
		assert_eq!(reconciler.host().snapshot(root).unwrap(), view(count));
	}
}

#[test]
fn unchanged_update_is_free() {
	let mut reconciler = mounted(view(3));
	reconciler.host_mut().take_journal();

	assert_eq!(reconciler.update(view(3)).unwrap(), 0);
	assert!(reconciler.host().journal().is_empty());
}

#[test]
fn root_replacement_is_tracked() {
	let mut reconciler = mounted(view(0));
	let old_root = *reconciler.live_root();

	let replacement: VirtualNode = VirtualNode::element("ol").child("Gone").into();
	assert_eq!(reconciler.update(replacement.clone()).unwrap(), 1);

	let new_root = *reconciler.live_root();
	assert_ne!(new_root, old_root);
	assert_eq!(reconciler.host().snapshot(new_root).unwrap(), replacement);

	// Updates keep working against the new root.
	assert_eq!(reconciler.update(view(1)).unwrap(), 1);
	let (body, live_root) = (*reconciler.parent(), *reconciler.live_root());
	let host = reconciler.into_host();
	assert_eq!(host.children(body).unwrap(), &[live_root]);
	assert_eq!(host.snapshot(live_root).unwrap(), view(1));
}

fn node_count(node: &VirtualNode) -> usize {
	1 + node.as_element().map_or(0, |element| element.child_nodes().iter().map(node_count).sum())
}

#[test]
fn long_running_updates_stay_bounded() {
	log_::init();
	let mut host = MemoryTree::new();
	let body = host.create_element("body").unwrap();
	let mut reconciler = Reconciler::mount(host, body, view(0)).unwrap();

	reconciler.update(view(1)).unwrap();
	let capacity = reconciler.host().capacity();
	for count in 2..=1000 {
		assert_eq!(reconciler.update(view(count)).unwrap(), 11);
	}

	let host = reconciler.host();
	assert_eq!(host.len(), 1 + node_count(&view(1000)));
	assert_eq!(host.capacity(), capacity);
	assert!(host.journal().is_empty());
}
