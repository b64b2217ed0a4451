use std::sync::Arc;

use super::common::{PluginA, PluginB};
use crate::plugin_system::assembler::PluginList;
use crate::plugin_system::plugin::{LoadedPlugin, PluginKey};

#[test]
fn test_insert_appends_in_order() {
    let mut list = PluginList::new();
    assert!(list.is_empty());

    assert!(list.insert(LoadedPlugin::new("A", Arc::new(PluginA))));
    assert!(list.insert(LoadedPlugin::new("B", Arc::new(PluginB))));

    assert_eq!(list.len(), 2);
    assert_eq!(list.names(), vec!["A", "B"]);
    assert_eq!(list.position("B"), Some(1));
}

#[test]
fn test_first_write_wins() {
    let mut list = PluginList::new();
    list.insert(LoadedPlugin::new("A", Arc::new(PluginA)).with_path("/first"));

    let inserted = list.insert(LoadedPlugin::new("A", Arc::new(PluginB)).with_path("/second"));

    assert!(!inserted);
    assert_eq!(list.len(), 1);
    let entry = list.get(PluginKey::Name("A")).unwrap();
    assert_eq!(entry.path(), Some("/first"));
    assert!(entry.is::<PluginA>());
}

#[test]
fn test_get_by_index_and_name() {
    let mut list = PluginList::new();
    list.insert(LoadedPlugin::new("A", Arc::new(PluginA)));
    list.insert(LoadedPlugin::new("B", Arc::new(PluginB)));

    assert_eq!(list.get(PluginKey::Index(1)).unwrap().name(), "B");
    assert_eq!(list.get("A".into()).unwrap().name(), "A");
    assert!(list.get(PluginKey::Index(2)).is_none());
    assert!(list.get(PluginKey::Name("C")).is_none());
    assert!(!list.contains("C"));
}

#[test]
fn test_iter_matches_names() {
    let mut list = PluginList::new();
    for name in ["X", "Y", "Z"] {
        list.insert(LoadedPlugin::new(name, Arc::new(PluginA)));
    }

    let names: Vec<_> = list.iter().map(|plugin| plugin.name()).collect();
    assert_eq!(names, ["X", "Y", "Z"]);
}
