use assert_cmd::Command;
use predicates::prelude::*;

fn hublfmt() -> Command {
	let mut command = Command::cargo_bin("hublfmt").unwrap();
	command.arg("--no-color");
	command
}

#[test]
fn masks_style_values() {
	hublfmt()
		.arg("mask")
		.write_stdin("<style>color: {{ c }};</style>")
		.assert()
		.success()
		.stdout("<style>color: __STYLE_VALUE_1__;</style>\n");
}

#[test]
fn masks_duplicate_tag_name_references_to_one_token() {
	hublfmt()
		.arg("mask")
		.write_stdin("<{{ tag }}>{{ tag }}</{{ tag }}>")
		.assert()
		.success()
		.stdout("<npe1_><!--placeholder-2--></npe1_>\n");
}

#[test]
fn verbose_lists_vault_entries() {
	hublfmt()
		.args(["--verbose", "mask"])
		.write_stdin("<p>{{ greeting }}</p>")
		.assert()
		.success()
		.stdout("<p><!--placeholder-1--></p>\n")
		.stderr(predicate::str::contains("<!--placeholder-1--> -> {{ greeting }}"));
}

#[test]
fn masks_file_argument() {
	let dir = tempfile::tempdir().unwrap();
	let file = dir.path().join("page.hubl.html");
	std::fs::write(&file, "{# note #}\n").unwrap();

	hublfmt()
		.arg("mask")
		.arg(&file)
		.assert()
		.success()
		.stdout("<!--1-->\n");
}
