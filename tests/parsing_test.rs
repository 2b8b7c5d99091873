//! Reading configuration text into a tree.

use treeconf::{Config, ConfigError, SettingType};

#[test]
fn test_all_scalar_kinds() {
    let mut config = Config::new();
    config
        .read_str(
            r#"
int_value = -42;
hex_value = 0xFF;
float_value = 3.14159;
exp_value = 1.5e2;
string_value = "hello \"world\"\n";
bool_value = TRUE;
"#,
        )
        .unwrap();

    assert_eq!(config.lookup_int("int_value"), -42);
    assert_eq!(config.lookup_int("hex_value"), 255);
    assert_eq!(config.lookup_float("float_value"), 3.14159);
    assert_eq!(config.lookup_float("exp_value"), 150.0);
    assert_eq!(config.lookup_string("string_value"), Some("hello \"world\"\n"));
    assert!(config.lookup_bool("bool_value"));
}

#[test]
fn test_group_forms() {
    let mut config = Config::new();
    config
        .read_str(
            r#"
plain
  {
  a = 1;
  }
assigned = {
  b = 2;
};
nested { inner { c = 3; } }
empty { }
"#,
        )
        .unwrap();

    assert_eq!(config.lookup_int("plain.a"), 1);
    assert_eq!(config.lookup_int("assigned.b"), 2);
    assert_eq!(config.lookup_int("nested.inner.c"), 3);

    let empty = config.lookup("empty").unwrap();
    assert_eq!(config.setting(empty).unwrap().setting_type(), SettingType::Group);
    assert_eq!(config.length(empty), 0);
}

#[test]
fn test_terminator_is_optional() {
    let mut config = Config::new();
    config.read_str("a = 1\nb = 2;\nc = \"x\"").unwrap();

    assert_eq!(config.lookup_int("a"), 1);
    assert_eq!(config.lookup_int("b"), 2);
    assert_eq!(config.lookup_string("c"), Some("x"));
}

#[test]
fn test_comments() {
    let mut config = Config::new();
    config
        .read_str(
            r#"
# hash comment
// slash comment
value = 1; /* block
comment */ other = 2;
"#,
        )
        .unwrap();

    assert_eq!(config.lookup_int("value"), 1);
    assert_eq!(config.lookup_int("other"), 2);
}

#[test]
fn test_adjacent_strings_concatenate() {
    let mut config = Config::new();
    config.read_str(r#"msg = "first " "second";"#).unwrap();
    assert_eq!(config.lookup_string("msg"), Some("first second"));
}

#[test]
fn test_arrays() {
    let mut config = Config::new();
    config
        .read_str(
            r#"
ints = [ 1, 2, 3 ];
strings = [ "a", "b" ];
empty = [ ];
"#,
        )
        .unwrap();

    let ints = config.lookup("ints").unwrap();
    assert_eq!(config.length(ints), 3);
    assert_eq!(config.get_int_elem(ints, 2), 3);

    let strings = config.lookup("strings").unwrap();
    assert_eq!(config.get_string_elem(strings, 0), Some("a"));

    let empty = config.lookup("empty").unwrap();
    assert!(config.setting(empty).unwrap().is_array());
    assert_eq!(config.length(empty), 0);
}

#[test]
fn test_array_elements_are_unnamed() {
    let mut config = Config::new();
    config.read_str("a = [ 1, 2 ];").unwrap();
    let a = config.lookup("a").unwrap();
    for elem in config.children(a) {
        let elem = config.setting(elem).unwrap();
        assert_eq!(elem.name(), None);
        assert_eq!(elem.parent(), Some(a));
    }
}

#[test]
fn test_duplicate_names_are_accepted_when_parsing() {
    let mut config = Config::new();
    config.read_str("x = 1; x = 2;").unwrap();

    let root = config.root();
    assert_eq!(config.length(root), 2);
    assert_eq!(config.lookup_int("x"), 1);

    let second = config.get_elem(root, 1).unwrap();
    let second = config.setting(second).unwrap();
    assert_eq!(second.name(), Some("x"));
    assert_eq!(second.get_int(), 2);
}

#[test]
fn test_failure_on_line_five_leaves_tree_empty() {
    let mut config = Config::new();
    let result = config.read_str(
        "a = 1;\n\
         b = 2;\n\
         g\n\
         {\n\
         c = = 3;\n\
         }\n",
    );

    let err = result.unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { line: 5, .. }));
    assert_eq!(config.error_line(), 5);
    assert!(config.error_text().unwrap().contains("syntax error"));
    assert_eq!(config.length(config.root()), 0);
    assert!(config.lookup("a").is_none());
}

#[test]
fn test_garbage_aborts_parse() {
    let mut config = Config::new();
    let err = config.read_str("ok = 1;\nbad = $;\n").unwrap_err();

    assert_eq!(err.line(), Some(2));
    assert!(config.error_text().unwrap().contains("'$'"));
    assert_eq!(config.length(config.root()), 0);
}

#[test]
fn test_mixed_array_is_rejected() {
    let mut config = Config::new();
    let err = config.read_str("\n\nmixed = [ 1, \"two\" ];").unwrap_err();

    assert_eq!(err.line(), Some(3));
    assert!(config.error_text().unwrap().contains("array element type mismatch"));
    assert_eq!(config.length(config.root()), 0);
}

#[test]
fn test_structural_errors() {
    let cases = [
        ("g { a = 1;", "unterminated"),
        ("}", "unexpected '}'"),
        ("a = [ 1, ];", "unexpected ']'"),
        ("a = [ [ 1 ] ];", "unexpected '['"),
        ("= 1;", "unexpected '='"),
        ("a 1;", "unexpected integer 1"),
        ("a = 1 2;", "unexpected integer 2"),
        ("a = ;", "unexpected ';'"),
    ];

    for (input, expected) in cases {
        let mut config = Config::new();
        let err = config.read_str(input).unwrap_err();
        assert!(
            err.to_string().contains(expected),
            "input {:?} gave {}",
            input,
            err
        );
    }
}

#[test]
fn test_reread_replaces_content_and_clears_error() {
    let mut config = Config::new();
    config.read_str("old = 1;").unwrap();
    let old = config.lookup("old").unwrap();

    assert!(config.read_str("broken = ").is_err());
    assert!(config.error_text().is_some());
    assert!(config.setting(old).is_none());

    config.read_str("new = 2;").unwrap();
    assert_eq!(config.error_text(), None);
    assert_eq!(config.error_line(), 0);
    assert!(config.lookup("old").is_none());
    assert_eq!(config.lookup_int("new"), 2);
}

#[test]
fn test_read_from_stream() {
    let mut config = Config::new();
    let input = b"stream = \"bytes\";" as &[u8];
    config.read(input).unwrap();
    assert_eq!(config.lookup_string("stream"), Some("bytes"));
}

#[test]
fn test_integer_out_of_range() {
    let mut config = Config::new();
    let err = config.read_str("big = 123456789012345678901234567890;").unwrap_err();
    assert_eq!(err.line(), Some(1));
    assert!(config.error_text().unwrap().contains("out of range"));
}
