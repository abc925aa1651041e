use std::sync::Arc;

use super::SuffixIndex;
use crate::matcher::MatchOptions;
use crate::{AssetInfo, Platform};

fn asset_on(name: &str, platform: Platform) -> Arc<AssetInfo> {
    Arc::new(AssetInfo {
        id: format!("id-{name}"),
        name: name.into(),
        url: format!("https://cdn.example/{name}/2x.png"),
        zero_width: false,
        animated: false,
        width: None,
        height: None,
        platform,
        timestamp: None,
    })
}

fn asset(name: &str) -> Arc<AssetInfo> {
    asset_on(name, Platform::SevenInSet)
}

fn dated(name: &str, timestamp: i64) -> Arc<AssetInfo> {
    let mut a = (*asset(name)).clone();
    a.timestamp = Some(timestamp);
    Arc::new(a)
}

fn index_of(entries: &[(&Arc<AssetInfo>, u32)]) -> SuffixIndex {
    let mut index = SuffixIndex::new();
    for (asset, priority) in entries {
        index.insert_all_suffixes(asset, *priority);
    }
    index
}

#[test]
fn query_single_matches_any_substring() {
    let kappa = asset("Kappa");
    let index = index_of(&[(&kappa, 1)]);

    for query in ["kappa", "Kappa", "KAPPA", "kap", "appa", "pp", "a"] {
        let hit = index.query_single(query).unwrap();
        assert_eq!(hit.id, "id-Kappa", "query {query:?}");
    }
    assert!(index.query_single("x").is_none());
    assert!(index.query_single("kappax").is_none());
    assert!(index.query_single("").is_none());
}

#[test]
fn query_single_is_deterministic() {
    let a = asset("Wide");
    let b = asset("Sideways");
    let index = index_of(&[(&a, 2), (&b, 1)]);

    let first = index.query_single("ide").unwrap().id.clone();
    for _ in 0..10 {
        assert_eq!(index.query_single("ide").unwrap().id, first);
    }
}

#[test]
fn exact_case_beats_priority() {
    let upper = asset("Foo");
    let lower = asset("foo");
    let index = index_of(&[(&upper, 1), (&lower, 9)]);

    assert_eq!(index.query_single("Foo").unwrap().id, "id-Foo");
    assert_eq!(index.query_single("foo").unwrap().id, "id-foo");
    // No exact-case candidate; the higher-priority record wins.
    assert_eq!(index.query_single("FOO").unwrap().id, "id-foo");
}

#[test]
fn priority_wins_at_shared_suffix() {
    let low = asset("Babc");
    let high = asset("Xabc");
    let index = index_of(&[(&low, 1), (&high, 2)]);

    assert_eq!(index.query_single("abc").unwrap().id, "id-Xabc");
}

#[test]
fn lower_priority_insertions_append() {
    let first = asset("Zephyr");
    let second = asset("Decipher");
    let index = index_of(&[(&first, 2), (&second, 1)]);

    // Both names contain "ph"; the earlier, higher-priority one stays in
    // front.
    assert_eq!(index.query_single("ph").unwrap().id, "id-Zephyr");
}

#[test]
fn unique_path_tracks_insertion_chains() {
    let aaa = asset("aaa");
    let mut index = index_of(&[(&aaa, 1)]);

    // Three suffix chains pass through "a", two through "aa", one ends the
    // full name.
    assert!(!index.query_unique("a", "aaa"));
    assert!(!index.query_unique("aa", "aaa"));
    assert!(index.query_unique("aaa", "aaa"));

    let xaaa = asset("xaaa");
    index.insert_all_suffixes(&xaaa, 2);
    assert!(!index.query_unique("aaa", "aaa"));
    assert!(index.query_unique("xaaa", "xaaa"));
}

#[test]
fn unique_path_requires_matching_name() {
    let kappa = asset("Kappa");
    let keepo = asset("Keepo");
    let index = index_of(&[(&kappa, 2), (&keepo, 1)]);

    assert!(index.query_unique("ka", "Kappa"));
    assert!(!index.query_unique("ka", "Keepo"));
    assert!(!index.query_unique("k", "Kappa"));
}

#[test]
fn query_exact_is_case_sensitive() {
    let kappa = asset("Kappa");
    let index = index_of(&[(&kappa, 1)]);

    assert!(index.query_exact("Kappa"));
    assert!(!index.query_exact("kappa"));
    assert!(!index.query_exact("Kapp"));
}

#[test]
fn query_array_dedups_by_identity() {
    let aaa = asset("aaa");
    let index = index_of(&[(&aaa, 1)]);

    // The node for "a" was touched once per suffix passing through it.
    assert_eq!(index.asset_count_at("a"), 3);
    let found = index.query_array("a", &MatchOptions::default()).unwrap();
    assert_eq!(found.len(), 1);
}

#[test]
fn query_array_applies_filters() {
    let plain = asset_on("AlphaPog", Platform::SevenInSet);
    let mut animated = (*asset_on("BetaPog", Platform::Bttv)).clone();
    animated.animated = true;
    let animated = Arc::new(animated);
    let mut overlay = (*asset_on("GammaPog", Platform::SevenInSet)).clone();
    overlay.zero_width = true;
    let overlay = Arc::new(overlay);

    let index = index_of(&[(&plain, 3), (&animated, 2), (&overlay, 1)]);

    let bttv_only = index
        .query_array(
            "pog",
            &MatchOptions {
                platform: Some(Platform::Bttv),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(bttv_only.len(), 1);
    assert_eq!(bttv_only[0].id, "id-BetaPog");

    let stills = index
        .query_array(
            "pog",
            &MatchOptions {
                animated: Some(false),
                ..Default::default()
            },
        )
        .unwrap();
    let names: Vec<_> = stills.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["AlphaPog", "GammaPog"]);

    let overlays = index
        .query_array(
            "pog",
            &MatchOptions {
                zero_width: Some(true),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(overlays[0].id, "id-GammaPog");

    // Everything filtered away is a miss, not an empty list.
    assert!(
        index
            .query_array(
                "pog",
                &MatchOptions {
                    platform: Some(Platform::Twitch),
                    ..Default::default()
                },
            )
            .is_none()
    );

    let capped = index
        .query_array(
            "pog",
            &MatchOptions {
                max: Some(2),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(capped.len(), 2);
}

#[test]
fn query_array_sorts_by_name() {
    let b = asset("Bravozz");
    let a = asset("Alphazz");
    let c = asset("Charliezz");
    let index = index_of(&[(&b, 3), (&a, 2), (&c, 1)]);

    let sorted = index
        .query_array(
            "zz",
            &MatchOptions {
                sort_by_name: true,
                ..Default::default()
            },
        )
        .unwrap();
    let names: Vec<_> = sorted.iter().map(|x| x.name.as_str()).collect();
    assert_eq!(names, vec!["Alphazz", "Bravozz", "Charliezz"]);
}

#[test]
fn query_array_sorts_newest_first_with_undated_last() {
    let old = dated("Oldzz", 100);
    let new = dated("Newzz", 200);
    let undated = asset("Nozz");
    let index = index_of(&[(&old, 3), (&new, 2), (&undated, 1)]);

    let sorted = index
        .query_array(
            "zz",
            &MatchOptions {
                sort_by_date_added: true,
                ..Default::default()
            },
        )
        .unwrap();
    let names: Vec<_> = sorted.iter().map(|x| x.name.as_str()).collect();
    assert_eq!(names, vec!["Newzz", "Oldzz", "Nozz"]);
}

#[test]
fn query_array_preferred_ordering() {
    let contains = asset("absol");
    let prefix = asset("Solid");
    let ci_exact = asset("SO");
    let exact = asset("so");
    let index = index_of(&[(&contains, 4), (&prefix, 3), (&ci_exact, 2), (&exact, 1)]);

    let found = index.query_array("so", &MatchOptions::default()).unwrap();
    let names: Vec<_> = found.iter().map(|x| x.name.as_str()).collect();
    assert_eq!(names, vec!["so", "SO", "Solid", "absol"]);
}
