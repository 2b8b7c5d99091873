use std::cell::RefCell;
use std::rc::Rc;
use treeconf::{Config, ConfigError, SettingType};

#[test]
fn test_type_pinning() {
    let mut config = Config::new();
    let root = config.root();
    let id = config.add(root, Some("pinned"), SettingType::None).unwrap();

    let setting = config.setting_mut(id).unwrap();
    assert_eq!(setting.setting_type(), SettingType::None);
    setting.set_int(10).unwrap();
    assert_eq!(setting.setting_type(), SettingType::Int);

    assert!(matches!(setting.set_float(1.0), Err(ConfigError::TypeMismatch { .. })));
    assert!(matches!(setting.set_bool(true), Err(ConfigError::TypeMismatch { .. })));
    assert!(matches!(setting.set_string("s"), Err(ConfigError::TypeMismatch { .. })));

    setting.set_int(11).unwrap();
    assert_eq!(config.setting(id).unwrap().get_int(), 11);
}

#[test]
fn test_mismatched_getters_return_zero_values() {
    let mut config = Config::new();
    config.read_str("text = \"abc\"; number = 5;").unwrap();

    assert_eq!(config.lookup_int("text"), 0);
    assert_eq!(config.lookup_float("text"), 0.0);
    assert!(!config.lookup_bool("number"));
    assert_eq!(config.lookup_string("number"), None);
}

#[test]
fn test_containers_cannot_take_scalars() {
    let mut config = Config::new();
    let root = config.root();
    let group = config.add(root, Some("group"), SettingType::Group).unwrap();

    let setting = config.setting_mut(group).unwrap();
    assert!(setting.set_int(1).is_err());
    assert_eq!(setting.setting_type(), SettingType::Group);
}

#[test]
fn test_array_monomorphism() {
    let mut config = Config::new();
    let root = config.root();
    let ints = config.add(root, Some("ints"), SettingType::Array).unwrap();

    config.set_int_elem(ints, None, 1).unwrap();
    let err = config.set_string_elem(ints, None, "two").unwrap_err();
    assert!(matches!(err, ConfigError::TypeMismatch { .. }));
    assert_eq!(config.length(ints), 1);

    for (name, append) in [
        ("bools", 0usize),
        ("floats", 1),
        ("strings", 2),
        ("more_ints", 3),
    ] {
        let array = config.add(root, Some(name), SettingType::Array).unwrap();
        match append {
            0 => config.set_bool_elem(array, None, true).map(|_| ()),
            1 => config.set_float_elem(array, None, 0.5).map(|_| ()),
            2 => config.set_string_elem(array, None, "x").map(|_| ()),
            _ => config.set_int_elem(array, None, 9).map(|_| ()),
        }
        .unwrap();
        assert_eq!(config.length(array), 1, "{} should accept its first element", name);
    }
}

#[test]
fn test_element_writes_need_existing_index() {
    let mut config = Config::new();
    let root = config.root();
    let array = config.add(root, Some("array"), SettingType::Array).unwrap();

    assert!(config.set_int_elem(array, Some(0), 1).is_err());
    config.set_int_elem(array, None, 1).unwrap();
    config.set_int_elem(array, Some(0), 2).unwrap();
    assert_eq!(config.get_int_elem(array, 0), 2);
    assert_eq!(config.length(array), 1);
}

#[test]
fn test_element_writes_need_an_array() {
    let mut config = Config::new();
    let root = config.root();
    let group = config.add(root, Some("group"), SettingType::Group).unwrap();

    assert!(matches!(
        config.set_int_elem(group, None, 1),
        Err(ConfigError::TypeMismatch { .. })
    ));
}

#[test]
fn test_removal_preserves_order() {
    let mut config = Config::new();
    let root = config.root();
    for name in ["p", "q", "r", "s"] {
        config.add(root, Some(name), SettingType::Int).unwrap();
    }

    config.remove(root, "q").unwrap();

    let names: Vec<_> = config
        .children(root)
        .map(|id| config.setting(id).unwrap().name().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["p", "r", "s"]);
    assert!(config.get_member(root, "r").is_some());
    assert!(config.get_member(root, "q").is_none());
}

#[test]
fn test_member_and_index_access() {
    let mut config = Config::new();
    config.read_str("g { a = 1; b = 2; }").unwrap();
    let g = config.lookup("g").unwrap();

    let b = config.get_member(g, "b").unwrap();
    assert_eq!(config.get_elem(g, 1), Some(b));
    assert_eq!(config.get_elem(g, 2), None);
    assert_eq!(config.get_int_elem(g, 0), 1);
}

#[test]
fn test_parent_links() {
    let mut config = Config::new();
    let root = config.root();
    let outer = config.add(root, Some("outer"), SettingType::Group).unwrap();
    let inner = config.add(outer, Some("inner"), SettingType::Int).unwrap();

    assert_eq!(config.setting(inner).unwrap().parent(), Some(outer));
    assert_eq!(config.setting(outer).unwrap().parent(), Some(root));
    assert_eq!(config.setting(root).unwrap().parent(), None);
}

#[test]
fn test_hooks_are_released_through_destructor() {
    let released = Rc::new(RefCell::new(Vec::new()));
    let mut config = Config::new();
    let sink = Rc::clone(&released);
    config.set_destructor(move |hook| {
        if let Ok(value) = hook.downcast::<u32>() {
            sink.borrow_mut().push(*value);
        }
    });

    config.read_str("a = 1; b { c = 2; }").unwrap();
    let a = config.lookup("a").unwrap();
    let c = config.lookup("b.c").unwrap();
    config.setting_mut(a).unwrap().set_hook(Box::new(1u32));
    config.setting_mut(c).unwrap().set_hook(Box::new(3u32));

    assert_eq!(config.setting(a).unwrap().hook_as::<u32>(), Some(&1));

    config.remove(config.root(), "b").unwrap();
    assert_eq!(*released.borrow(), vec![3]);

    drop(config);
    assert_eq!(*released.borrow(), vec![3, 1]);
}

#[test]
fn test_settings_without_hooks_skip_destructor() {
    let calls = Rc::new(RefCell::new(0));
    let mut config = Config::new();
    let sink = Rc::clone(&calls);
    config.set_destructor(move |_| *sink.borrow_mut() += 1);

    config.read_str("a = 1; b = 2;").unwrap();
    config.remove(config.root(), "a").unwrap();
    drop(config);

    assert_eq!(*calls.borrow(), 0);
}
