use std::path::Path;

#[test]
fn relative_links_resolve() {
	let readme = include_str!("../README.md");
	let root = Path::new(env!("CARGO_MANIFEST_DIR"));

	let targets = readme.split("](").skip(1).filter_map(|rest| rest.split(')').next());
	for target in targets.filter(|target| !target.contains("://") && !target.starts_with('#')) {
		assert!(root.join(target).is_file(), "README.md links to missing file {:?}", target);
	}
}
