use vtree_patch::{
	diff::{diff, diff_attributes, diff_children},
	Element, NodePatch, PropPatch, VirtualNode,
};


fn list(items: &[&str]) -> VirtualNode {
	VirtualNode::element("ul")
		.attribute("className", "list")
		.children(items.iter().map(|&item| VirtualNode::element("li").attribute("className", "list__item").child(item)))
		.into()
}

fn element(node: &VirtualNode) -> &Element {
	node.as_element().unwrap()
}

fn assert_all_stay(patch: &NodePatch) {
	match patch {
		NodePatch::Stay => (),
		NodePatch::Update {
			attribute_patches,
			child_patches,
		} => {
			assert!(attribute_patches.iter().all(PropPatch::is_stay), "{:?}", attribute_patches);
			child_patches.iter().for_each(assert_all_stay);
		}
		other => panic!("Expected only `Stay`s but found {:?}", other),
	}
}

#[test]
fn identical_trees_stay() {
	log_::init();
	let vdom = list(&["Top", "Middle", "Bottom"]);
	let patch = diff(Some(&vdom), Some(&vdom));
	assert_all_stay(&patch);
	assert_eq!(patch.count_changes(), 0);

	let text = VirtualNode::text("Hello");
	assert_eq!(diff(Some(&text), Some(&text)), NodePatch::Stay);
}

#[test]
fn deterministic() {
	let (a, b) = (list(&["Top", "Bottom"]), list(&["Top", "Middle"]));
	let (a_2, b_2) = (a.clone(), b.clone());
	assert_eq!(diff(Some(&a), Some(&b)), diff(Some(&a_2), Some(&b_2)));
}

#[test]
fn add_and_remove() {
	let vdom = list(&["Item"]);
	assert_eq!(diff(None, Some(&vdom)), NodePatch::Remove);
	assert_eq!(diff(Some(&vdom), None), NodePatch::Add { node: &vdom });
	assert_eq!(diff(None, None), NodePatch::Stay);
}

#[test]
fn tag_change_replaces() {
	let div = VirtualNode::element("div").child("same").into();
	let span = VirtualNode::element("span").child("same").into();
	assert_eq!(diff(Some(&div), Some(&span)), NodePatch::Replace { node: &div });
}

#[test]
fn kind_change_replaces() {
	let text = VirtualNode::text("a");
	let div = VirtualNode::element("div").into();
	assert_eq!(diff(Some(&text), Some(&div)), NodePatch::Replace { node: &text });
	assert_eq!(diff(Some(&div), Some(&text)), NodePatch::Replace { node: &div });
}

#[test]
fn text_change_replaces() {
	let (a, b) = (VirtualNode::text("a"), VirtualNode::text("b"));
	assert_eq!(diff(Some(&b), Some(&a)), NodePatch::Replace { node: &b });
}

#[test]
fn attribute_union() {
	let old = VirtualNode::element("div").attribute("id", "1").attribute("cls", "a").into();
	let new = VirtualNode::element("div").attribute("cls", "b").attribute("title", "t").into();

	assert_eq!(
		diff_attributes(element(&new), element(&old)),
		vec![
			PropPatch::SetAttribute { name: "cls", value: "b" },
			PropPatch::SetAttribute { name: "title", value: "t" },
			PropPatch::RemoveAttribute { name: "id" },
		]
	);
}

#[test]
fn attribute_order_follows_new_then_old() {
	let old = VirtualNode::element("a").attribute("x", "1").attribute("gone", "2").attribute("y", "3").attribute("also-gone", "4").into();
	let new = VirtualNode::element("a").attribute("y", "3").attribute("x", "changed").attribute("z", "5").into();

	assert_eq!(
		diff_attributes(element(&new), element(&old)),
		vec![
			PropPatch::Stay,
			PropPatch::SetAttribute { name: "x", value: "changed" },
			PropPatch::SetAttribute { name: "z", value: "5" },
			PropPatch::RemoveAttribute { name: "gone" },
			PropPatch::RemoveAttribute { name: "also-gone" },
		]
	);
}

#[test]
fn reserved_children_attribute_is_refused() {
	let vdom: VirtualNode = VirtualNode::element("div").attribute("children", "nope").attribute("id", "1").into();
	let attributes = element(&vdom).attributes();
	assert_eq!(attributes.len(), 1);
	assert!(!attributes.contains("children"));
}

#[test]
fn shift_left_is_diffed_by_position() {
	let (a, b, c) = (VirtualNode::text("A"), VirtualNode::text("B"), VirtualNode::text("C"));
	let old = VirtualNode::element("div").children(vec![a, b.clone(), c.clone()]).into();
	let new = VirtualNode::element("div").children(vec![b.clone(), c.clone()]).into();

	assert_eq!(
		diff_children(element(&new), element(&old)),
		vec![NodePatch::Replace { node: &b }, NodePatch::Replace { node: &c }, NodePatch::Remove]
	);
}

#[test]
fn shift_left_of_differently_tagged_elements() {
	let a: VirtualNode = VirtualNode::element("a").into();
	let b: VirtualNode = VirtualNode::element("b").into();
	let c: VirtualNode = VirtualNode::element("c").into();
	let old = VirtualNode::element("div").children(vec![a, b.clone(), c.clone()]).into();
	let new = VirtualNode::element("div").children(vec![b.clone(), c.clone()]).into();

	match diff(Some(&new), Some(&old)) {
		NodePatch::Update {
			attribute_patches,
			child_patches,
		} => {
			assert!(attribute_patches.is_empty());
			assert_eq!(child_patches, vec![NodePatch::Replace { node: &b }, NodePatch::Replace { node: &c }, NodePatch::Remove]);
		}
		other => panic!("Expected `Update` but found {:?}", other),
	}
}

#[test]
fn appended_children_are_added() {
	let (old, new) = (list(&["Top"]), list(&["Top", "Bottom"]));
	let child_patches = diff_children(element(&new), element(&old));

	assert_eq!(child_patches.len(), 2);
	assert_all_stay(&child_patches[0]);
	assert_eq!(child_patches[1], NodePatch::Add { node: &element(&new).child_nodes()[1] });
}

#[test]
fn nested_text_change() {
	let (old, new) = (list(&["Top", "Item 1", "Bottom"]), list(&["Top", "Item 2", "Bottom"]));
	let patch = diff(Some(&new), Some(&old));
	assert_eq!(patch.count_changes(), 1);

	let item = &element(&new).child_nodes()[1];
	let expected_text = &element(item).child_nodes()[0];
	assert_eq!(
		patch,
		NodePatch::Update {
			attribute_patches: vec![PropPatch::Stay],
			child_patches: vec![
				NodePatch::Update {
					attribute_patches: vec![PropPatch::Stay],
					child_patches: vec![NodePatch::Stay],
				},
				NodePatch::Update {
					attribute_patches: vec![PropPatch::Stay],
					child_patches: vec![NodePatch::Replace { node: expected_text }],
				},
				NodePatch::Update {
					attribute_patches: vec![PropPatch::Stay],
					child_patches: vec![NodePatch::Stay],
				},
			],
		}
	);
}
