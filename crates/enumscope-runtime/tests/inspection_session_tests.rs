//! End-to-end inspection tests: a frame of enum variables declared in a
//! project file, inspected through MI `-var-create` requests.

use enumscope_config::ConfigLoader;
use enumscope_runtime::debugger::InspectionSession;
use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};
use std::fs;
use tempfile::TempDir;

const FRAME: &str = r#"
[[enum]]
name = "enum1"
members = [
    { name = "read", value = 1 },
    { name = "write", value = 2 },
    { name = "append", value = 3 },
]

[[enum]]
name = "enum2"
members = [
    { name = "append", value = 3 },
    { name = "write", value = 2 },
    { name = "read", value = 1 },
    { name = "None", value = 0 },
]

[[enum]]
name = "enum3"
flags = true
members = [
    { name = "append", value = 4 },
    { name = "write", value = 2 },
    { name = "read", value = 1 },
]

[[enum]]
name = "enum4"
flags = true
members = [
    { name = "read", value = 1 },
    { name = "write", value = 2 },
    { name = "append", value = 4 },
    { name = "None", value = 0 },
]

[[enum]]
name = "enum5"
flags = true
members = [
    { name = "read", value = 1 },
    { name = "write", value = 2 },
    { name = "append", value = 3 },
]

[[enum]]
name = "enum6"
flags = true
members = [
    { name = "append", value = 3 },
    { name = "write", value = 2 },
    { name = "read", value = 1 },
]

[[enum]]
name = "enum7"
underlying = "u8"
members = [{ name = "read", value = 1 }, { name = "write", value = 2 }]

[[enum]]
name = "enum8"
underlying = "u16"
members = [{ name = "read", value = 1 }, { name = "write", value = 2 }]

[[enum]]
name = "enum9"
underlying = "u32"
members = [{ name = "read", value = 1 }, { name = "write", value = 2 }]

[[enum]]
name = "enum10"
underlying = "u64"
members = [{ name = "read", value = 1 }, { name = "write", value = 2 }]

[[variable]]
name = "enum1_test0"
type = "enum1"
value = 0

[[variable]]
name = "enum1_test4"
type = "enum1"
value = 0

[[variable]]
name = "enum1_test5"
type = "enum1"
value = 3

[[variable]]
name = "enum1_test6"
type = "enum1"
value = 101

[[variable]]
name = "enum2_test0"
type = "enum2"
value = 0

[[variable]]
name = "enum2_test6"
type = "enum2"
value = 101

[[variable]]
name = "enum3_test0"
type = "enum3"
value = 0

[[variable]]
name = "enum3_test5"
type = "enum3"
value = 7

[[variable]]
name = "enum3_test6"
type = "enum3"
value = 101

[[variable]]
name = "enum4_test0"
type = "enum4"
value = 0

[[variable]]
name = "enum4_test5"
type = "enum4"
value = 7

[[variable]]
name = "enum4_test6"
type = "enum4"
value = 101

[[variable]]
name = "enum5_test2"
type = "enum5"
value = 3

[[variable]]
name = "enum6_test3"
type = "enum6"
value = 3

[[variable]]
name = "enum7_test2"
type = "enum7"
value = 2

[[variable]]
name = "enum10_test1"
type = "enum10"
value = 1
"#;

#[fixture]
fn session() -> InspectionSession {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("enumscope.toml");
    fs::write(&config_path, FRAME).unwrap();

    let mut loader = ConfigLoader::with_global_config_path(temp_dir.path().join("global.toml"));
    let config = loader.load_from_file(&config_path).unwrap();
    InspectionSession::from_config(&config)
}

fn value_of(session: &mut InspectionSession, expression: &str) -> String {
    let reply = session.handle_mi_line(&format!("-var-create - * \"{expression}\""));
    assert!(reply.text.starts_with("^done,"), "{}", reply.text);
    let start = reply.text.find("value=\"").unwrap() + "value=\"".len();
    let end = start + reply.text[start..].find('"').unwrap();
    reply.text[start..end].to_string()
}

#[rstest]
#[case("enum1_test0", "0")]
#[case("enum1_test4", "0")]
#[case("enum1_test5", "append")]
#[case("enum1_test6", "101")]
#[case("enum2_test0", "None")]
#[case("enum2_test6", "101")]
#[case("enum3_test0", "0")]
#[case("enum3_test5", "read | write | append")]
#[case("enum3_test6", "101")]
#[case("enum4_test0", "None")]
#[case("enum4_test5", "read | write | append")]
#[case("enum4_test6", "101")]
#[case("enum5_test2", "append")]
#[case("enum6_test3", "append")]
#[case("enum7_test2", "write")]
#[case("enum10_test1", "read")]
fn test_frame_variables(
    mut session: InspectionSession,
    #[case] variable: &str,
    #[case] expected: &str,
) {
    assert_eq!(value_of(&mut session, variable), expected);
}

#[rstest]
#[case("(enum1)1", "read")]
#[case("(enum1)2", "write")]
#[case("(enum2)1", "read")]
#[case("(enum3)4", "append")]
#[case("(enum3)3", "read | write")]
#[case("(enum4)2", "write")]
#[case("(enum5)3", "append")]
#[case("(enum6)1", "read")]
#[case("(enum8)2", "write")]
#[case("(enum9)1", "read")]
#[case("(enum10)2", "write")]
fn test_cast_expressions(
    mut session: InspectionSession,
    #[case] expression: &str,
    #[case] expected: &str,
) {
    assert_eq!(value_of(&mut session, expression), expected);
}

#[rstest]
fn test_full_reply_shape(mut session: InspectionSession) {
    let reply = session.handle_mi_line(r#"7-var-create - * "enum4_test5""#);
    insta::assert_snapshot!(
        reply.text,
        @r#"7^done,name="var1",exp="enum4_test5",numchild="0",value="read | write | append",type="enum4""#
    );
}

#[rstest]
fn test_print_matches_var_create(mut session: InspectionSession) {
    assert_eq!(session.print(None), "The history is empty.");
    assert_eq!(session.print(Some("enum3_test5")), "enum3_test5 = read | write | append");
    assert_eq!(session.print(None), "enum3_test5 = read | write | append");
    assert_eq!(
        session.print(Some("enum9_test1")),
        "No symbol \"enum9_test1\" in current context."
    );
}

#[rstest]
fn test_descriptors_resolved_once(mut session: InspectionSession) {
    value_of(&mut session, "enum3_test0");
    value_of(&mut session, "enum3_test5");
    value_of(&mut session, "(enum3)2");
    value_of(&mut session, "enum4_test0");
    assert_eq!(session.descriptor_cache().len(), 2);
}

#[rstest]
fn test_exit(mut session: InspectionSession) {
    let reply = session.handle_mi_line("-gdb-exit");
    assert_eq!(reply.text, "^exit");
    assert!(reply.exit);
}

#[test]
fn test_configured_separator_reaches_replies() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("enumscope.toml");
    fs::write(
        &config_path,
        format!("[display]\nflags_separator = \", \"\n{FRAME}"),
    )
    .unwrap();

    let mut loader = ConfigLoader::with_global_config_path(temp_dir.path().join("global.toml"));
    let config = loader.load_from_file(&config_path).unwrap();
    let mut session = InspectionSession::from_config(&config);

    assert_eq!(value_of(&mut session, "enum3_test5"), "read, write, append");
}
