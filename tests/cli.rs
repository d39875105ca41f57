use std::fs;
use std::path::Path;

use clap::Parser;
use json_apex::cli::CommandLineInterface;
use json_apex::codegen::NEWLINE;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn run(args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["json-apex"];
    argv.extend_from_slice(args);
    CommandLineInterface::try_parse_from(argv)?.run()
}

fn write_input(dir: &Path, name: &str, json: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, json).unwrap();
    path.to_string_lossy().into_owned()
}

fn text(lines: &[&str]) -> String {
    let mut out = lines.join(NEWLINE);
    out.push_str(NEWLINE);
    out
}

#[test]
fn writes_class_file_into_a_fresh_directory() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(tmp.path(), "in.json", r#"{"id": 7, "owner": {"name": "x"}}"#);
    let out_dir = tmp.path().join("out").join("classes");
    let out_str = out_dir.to_string_lossy().into_owned();

    run(&["apex", &input, "--output-dir", &out_str, "--class-name", "Account"]).unwrap();

    let src = fs::read_to_string(out_dir.join("Account.cls")).unwrap();
    assert_eq!(src, text(&[
        "public class Account {",
        "   public Integer id;",
        "   public TOwner owner;",
        "   public class TOwner {",
        "      public String name;",
        "   }",
        "}",
    ]));
    assert!(!out_dir.join("TestAccount.cls").exists());
}

#[test]
fn generates_test_class_and_parse_method_on_request() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(tmp.path(), "in.json", r#"{"ok": true}"#);
    let out_str = tmp.path().to_string_lossy().into_owned();

    run(&[
        "apex", &input,
        "--output-dir", &out_str,
        "--indent-spaces", "2",
        "--generate-test",
        "--parse-method",
    ]).unwrap();

    let class_src = fs::read_to_string(tmp.path().join("TRoot.cls")).unwrap();
    assert!(class_src.contains("  public static TRoot parse(String json) {"));
    let test_src = fs::read_to_string(tmp.path().join("TestTRoot.cls")).unwrap();
    assert_eq!(test_src, text(&[
        "@IsTest",
        "public class TestTRoot {",
        "  @IsTest",
        "  static void testParse() {",
        "    String json = '{' +",
        r#"      '  "ok": true' +"#,
        "      '}';",
        "    TRoot obj = (TRoot) System.JSON.deserialize(json, TRoot.class);",
        "    System.assert(obj != null);",
        "  }",
        "}",
    ]));
}

#[test]
fn json_pointer_selects_the_root_object() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(tmp.path(), "in.json", r#"{"data": [{"when": "2021-01-01"}]}"#);
    let out_str = tmp.path().to_string_lossy().into_owned();

    run(&["apex", &input, "--output-dir", &out_str, "--json-pointer", "/data/0"]).unwrap();

    let src = fs::read_to_string(tmp.path().join("TRoot.cls")).unwrap();
    assert_eq!(src, text(&["public class TRoot {", "   public Datetime when;", "}"]));
}

#[test]
fn empty_array_fails_without_writing() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(tmp.path(), "in.json", r#"{"tags": []}"#);
    let out_str = tmp.path().to_string_lossy().into_owned();

    let err = run(&["apex", &input, "--output-dir", &out_str]).unwrap_err();
    assert!(format!("{err:#}").contains("empty array at $.tags"), "{err:#}");
    assert!(!tmp.path().join("TRoot.cls").exists());
}

#[test]
fn malformed_and_non_object_input_are_rejected() {
    let tmp = TempDir::new().unwrap();
    let out_str = tmp.path().to_string_lossy().into_owned();

    let broken = write_input(tmp.path(), "broken.json", r#"{"a": "#);
    let err = run(&["apex", &broken, "--output-dir", &out_str]).unwrap_err();
    assert!(format!("{err:#}").contains("failed to parse JSON"), "{err:#}");

    let list = write_input(tmp.path(), "list.json", "[1, 2]");
    let err = run(&["apex", &list, "--output-dir", &out_str]).unwrap_err();
    assert!(format!("{err:#}").contains("must be an object, found array"), "{err:#}");

    let err = run(&["apex", "does-not-exist.json", "--output-dir", &out_str]).unwrap_err();
    assert!(format!("{err:#}").contains("failed to read input file"), "{err:#}");
}

#[test]
fn unusable_output_directory_is_reported_before_reading_input() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("not-a-dir");
    fs::write(&blocker, "x").unwrap();
    let blocker_str = blocker.to_string_lossy().into_owned();

    // input does not exist either; the directory check must fire first
    let err = run(&["apex", "missing.json", "--output-dir", &blocker_str]).unwrap_err();
    assert!(format!("{err:#}").contains("is not a valid directory path"), "{err:#}");
}

#[test]
fn invalid_class_name_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(tmp.path(), "in.json", "{}");
    let out_str = tmp.path().to_string_lossy().into_owned();

    let err = run(&["apex", &input, "--output-dir", &out_str, "--class-name", "../Evil"]).unwrap_err();
    assert!(format!("{err:#}").contains("not a valid Apex class name"), "{err:#}");
}

#[test]
fn tree_subcommand_writes_json_view() {
    let tmp = TempDir::new().unwrap();
    let input = write_input(tmp.path(), "in.json", r#"{"a": {"x": {"k": 1}}, "b": {"x": {"k": "s"}}}"#);
    let out = tmp.path().join("tree.json");
    let out_str = out.to_string_lossy().into_owned();

    run(&["tree", &input, "--out", &out_str]).unwrap();

    let tree: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(tree["root"], "TRoot");
    let names: Vec<&String> = tree["records"].as_object().unwrap().keys().collect();
    assert_eq!(names, ["TRoot", "TA", "TX", "TB", "TX2"]);
    assert_eq!(tree["records"]["TX2"]["fields"]["k"]["of"], "string");
}
