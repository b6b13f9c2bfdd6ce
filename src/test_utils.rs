//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use serde_json::json;

use crate::manager::{
    LocaleManager,
    LocaleTable,
};
use crate::tree::TranslationTree;

/// テスト用のロケールテーブルを作成する
///
/// `en` と `fr` の 2 ロケールで、同じキー構造を持つ。
pub(crate) fn create_table() -> LocaleTable {
    let en = json!({
        "title": "Title",
        "nested": {
            "greeting": "Hello {name}",
            "items": "{count} items, {count} in total"
        }
    });
    let fr = json!({
        "title": "Titre",
        "nested": {
            "greeting": "Bonjour {name}",
            "items": "{count} éléments, {count} au total"
        }
    });

    LocaleTable::from([
        ("en".to_string(), TranslationTree::from_json(en).unwrap()),
        ("fr".to_string(), TranslationTree::from_json(fr).unwrap()),
    ])
}

/// テスト用の `LocaleManager` を作成する（デフォルトロケール: `en`）
pub(crate) fn create_manager() -> LocaleManager {
    LocaleManager::new(create_table(), "en").unwrap()
}
