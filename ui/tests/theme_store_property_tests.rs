use proptest::prelude::*;
use zeropoint::theme::{
    BackgroundPattern, BorderRadius, Document, FontSize, KeyValueStore, MemoryStorage,
    STORAGE_KEY, STYLE_SLOT_ID, ThemeConfig, ThemePatch, ThemeStore,
};

fn text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z -]{1,40}",
        ".{0,30}",
    ]
}

fn patch_strategy() -> impl Strategy<Value = ThemePatch> {
    (
        prop::option::of(text()),
        prop::option::of(text()),
        prop::option::of(text()),
        prop::option::of(text()),
        prop::option::of(prop::sample::select(FontSize::ALL.to_vec())),
        prop::option::of(prop::sample::select(BorderRadius::ALL.to_vec())),
        prop::option::of(prop::sample::select(BackgroundPattern::ALL.to_vec())),
        prop::option::of(text()),
        prop::option::of(text()),
        prop::option::of(text()),
    )
        .prop_map(
            |(
                primary_color,
                secondary_color,
                accent_color,
                font_family,
                font_size,
                border_radius,
                background_pattern,
                brand_name,
                logo_url,
                custom_css,
            )| ThemePatch {
                primary_color,
                secondary_color,
                accent_color,
                font_family,
                font_size,
                border_radius,
                background_pattern,
                brand_name,
                logo_url,
                custom_css,
            },
        )
}

fn open() -> (ThemeStore, MemoryStorage, Document) {
    let storage = MemoryStorage::new();
    let document = Document::new();
    let store = ThemeStore::load(Box::new(storage.clone()), Box::new(document.clone()))
        .expect("memory storage accepts writes");
    (store, storage, document)
}

fn stored(storage: &MemoryStorage) -> ThemeConfig {
    let text = storage.get_item(STORAGE_KEY).unwrap().unwrap();
    serde_json::from_str(&text).unwrap()
}

#[cfg(test)]
mod merge_laws {
    use super::*;

    proptest! {
        #[test]
        fn test_update_is_a_shallow_merge(first in patch_strategy(), second in patch_strategy()) {
            let (mut store, storage, _) = open();

            store.update(first).unwrap();
            let before = store.get();

            store.update(second.clone()).unwrap();
            let after = store.get();

            // Property: every field present in the patch wins, every other field is kept
            prop_assert_eq!(&after, &before.merged(&second));
            if second.font_size.is_none() {
                prop_assert_eq!(after.font_size, before.font_size);
            }

            // Property: storage always mirrors memory
            prop_assert_eq!(stored(&storage), after);
        }

        #[test]
        fn test_reset_always_restores_defaults(patches in prop::collection::vec(patch_strategy(), 0..5)) {
            let (mut store, storage, _) = open();
            for patch in patches {
                store.update(patch).unwrap();
            }

            store.reset().unwrap();
            prop_assert_eq!(store.get(), ThemeConfig::default());
            prop_assert_eq!(stored(&storage), ThemeConfig::default());
        }
    }
}

#[cfg(test)]
mod snapshot_laws {
    use super::*;

    proptest! {
        #[test]
        fn test_export_import_round_trip(patch in patch_strategy()) {
            let (mut store, _, _) = open();
            store.update(patch).unwrap();
            let before = store.get();

            let exported = store.export_snapshot().unwrap();
            store.reset().unwrap();
            store.import_snapshot(&exported).unwrap();

            prop_assert_eq!(store.get(), before);
        }

        #[test]
        fn test_import_of_partial_object_merges_over_defaults(
            current in patch_strategy(),
            imported in patch_strategy()
        ) {
            let (mut store, _, _) = open();
            store.update(current).unwrap();

            let text = serde_json::to_string(&imported).unwrap();
            store.import_snapshot(&text).unwrap();

            prop_assert_eq!(store.get(), ThemeConfig::default().merged(&imported));
        }

        #[test]
        fn test_malformed_import_changes_nothing(
            patch in patch_strategy(),
            garbage in "[^{}]{0,40}"
        ) {
            let (mut store, storage, _) = open();
            store.update(patch).unwrap();
            let before = store.get();
            let writes = storage.write_count();

            // Text without braces can never be a JSON object
            prop_assert!(store.import_snapshot(&garbage).is_err());

            prop_assert_eq!(store.get(), before.clone());
            prop_assert_eq!(stored(&storage), before);
            prop_assert_eq!(storage.write_count(), writes);
        }

        #[test]
        fn test_style_slot_stays_unique(patches in prop::collection::vec(patch_strategy(), 1..6)) {
            let (mut store, _, document) = open();
            for patch in patches {
                store.update(patch).unwrap();
            }

            prop_assert_eq!(document.count_styles_with_id(STYLE_SLOT_ID), 1);
            prop_assert_eq!(document.style_content(STYLE_SLOT_ID), Some(store.stylesheet()));
        }
    }
}
