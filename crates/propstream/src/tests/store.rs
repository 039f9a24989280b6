use alloc::{
    string::{String, ToString},
    sync::Arc,
    vec::Vec,
};

use crate::{PropertyMap, WriteOptions};

#[test]
fn last_write_wins_on_load() {
    let map = PropertyMap::new();
    let count = map.load_str("k=1\nk=2\n").unwrap();
    assert_eq!(count, 2);
    assert_eq!(map.get("k").as_deref(), Some("2"));
    assert_eq!(map.len(), 1);
}

#[test]
fn basic_mutations() {
    let map = PropertyMap::new();
    assert_eq!(map.set("a", "1"), None);
    assert_eq!(map.set("a", "2").as_deref(), Some("1"));
    assert!(map.contains_key("a"));
    assert!(map.contains_value("2"));
    assert!(!map.contains_value("1"));
    assert_eq!(map.remove("a").as_deref(), Some("2"));
    assert_eq!(map.remove("a"), None);
    assert!(map.is_empty());
}

#[test]
fn merge_is_last_write_wins() {
    let map = PropertyMap::new();
    map.set("a", "old");
    map.merge([
        ("a".to_string(), "new".to_string()),
        ("b".to_string(), "1".to_string()),
        ("b".to_string(), "2".to_string()),
    ]);
    assert_eq!(map.get("a").as_deref(), Some("new"));
    assert_eq!(map.get("b").as_deref(), Some("2"));
}

#[test]
fn clear_empties_the_store() {
    let map = PropertyMap::new();
    map.load_str("a=1\nb=2\n").unwrap();
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.get("a"), None);
}

#[test]
fn failed_load_keeps_prior_records() {
    let map = PropertyMap::new();
    assert!(map.load_str("good=1\nbad=\\u12\n").is_err());
    assert_eq!(map.get("good").as_deref(), Some("1"));
}

#[test]
fn load_from_reader() {
    let map = PropertyMap::new();
    let bytes = "k\u{00E9}y = valu\u{00E9}\n".as_bytes().to_vec();
    map.load_read(std::io::Cursor::new(bytes)).unwrap();
    assert_eq!(map.get("kéy").as_deref(), Some("valué"));
}

#[test]
fn save_then_load_round_trips() {
    let map = PropertyMap::new();
    map.set("plain", "value");
    map.set("spaced key", " leading and trailing ");
    map.set("reserved=:#!", "a\\b");
    map.set("newline", "one\ntwo");
    map.set("unicode", "π 😀 é");
    map.set("", "empty key");
    map.set("empty.value", "");

    for escape_unicode in [false, true] {
        let text = map.to_text(Some("round trip"), WriteOptions { escape_unicode });
        let reloaded = PropertyMap::new();
        reloaded.load_str(&text).unwrap();

        let mut before = map.entries();
        let mut after = reloaded.entries();
        before.sort_unstable_by(|a, b| a.key.cmp(&b.key));
        after.sort_unstable_by(|a, b| a.key.cmp(&b.key));
        assert_eq!(before, after, "escape_unicode = {escape_unicode}");
    }
}

#[test]
fn saved_text_is_deterministic_and_commented() {
    let map = PropertyMap::new();
    map.set("b", "2");
    map.set("a", "1");
    let text = map.to_text(Some("header\nsecond line"), WriteOptions::default());
    assert_eq!(text, "#header\n#second line\na=1\nb=2\n");

    let mut sink = Vec::new();
    map.save(&mut sink, Some("header\nsecond line"), WriteOptions::default())
        .unwrap();
    assert_eq!(String::from_utf8(sink).unwrap(), text);
}

#[test]
fn concurrent_readers_and_writers() {
    let map = Arc::new(PropertyMap::new());
    map.load_str("seed=0\n").unwrap();

    let mut handles = Vec::new();
    for worker in 0..4 {
        let map = Arc::clone(&map);
        handles.push(std::thread::spawn(move || {
            for i in 0..100 {
                map.set("seed", alloc::format!("{worker}:{i}"));
                // Reads run against the map without taking the writer lock
                let _ = map.get("seed");
                assert!(map.contains_key("seed"));
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }

    let last = map.get("seed").unwrap();
    assert!(last.contains(':'));
    assert_eq!(map.len(), 1);
}
