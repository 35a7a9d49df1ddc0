//! 属性バッグ
//!
//! アプリケーション・エンドポイント・トピックに付与される
//! 文字列キー／文字列値の順序付きマップ

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// 真偽値として扱う予約済み属性キー
pub const BOOLEAN_KEYS: [&str; 1] = ["Enabled"];

/// 真偽値文字列を解釈（大文字小文字を区別しない）
pub fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// 属性値として格納できる型
///
/// 真偽値は `"True"` / `"False"` として保存される。
pub trait AttributeValue {
    /// 保存用の文字列表現に変換
    fn into_attribute_string(self) -> String;
}

impl AttributeValue for String {
    fn into_attribute_string(self) -> String {
        self
    }
}

impl AttributeValue for &str {
    fn into_attribute_string(self) -> String {
        self.to_string()
    }
}

impl AttributeValue for &String {
    fn into_attribute_string(self) -> String {
        self.clone()
    }
}

impl AttributeValue for bool {
    fn into_attribute_string(self) -> String {
        let value = if self { "True" } else { "False" };
        value.to_string()
    }
}

macro_rules! integer_attribute_value {
    ($($ty:ty),*) => {
        $(
            impl AttributeValue for $ty {
                fn into_attribute_string(self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

integer_attribute_value!(i32, i64, u16, u32, u64, usize);

/// 属性マップ（挿入順を保持）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(IndexMap<String, String>);

impl Attributes {
    /// 空の属性マップを作成
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// 属性を設定（既存キーは上書き、位置は維持）
    pub fn insert(&mut self, key: impl Into<String>, value: impl AttributeValue) -> &mut Self {
        self.0.insert(key.into(), value.into_attribute_string());
        self
    }

    /// ビルダー形式で属性を追加
    pub fn with(mut self, key: impl Into<String>, value: impl AttributeValue) -> Self {
        self.insert(key, value);
        self
    }

    /// 属性を取得
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// キーが存在するか
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// 部分更新: `partial` に含まれるキーだけを上書き・追加する
    pub fn merge(&mut self, partial: &Attributes) {
        for (key, value) in &partial.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// 属性数
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 空かどうか
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 挿入順に走査
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 真偽値属性を解釈（大文字小文字を区別しない）
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        parse_bool(self.get(key)?)
    }

    /// 文字列で受け取った値を挿入する
    ///
    /// `BOOLEAN_KEYS` の値は `"True"` / `"False"` に正規化する。
    pub fn insert_wire(&mut self, key: &str, value: &str) -> &mut Self {
        match parse_bool(value) {
            Some(flag) if BOOLEAN_KEYS.contains(&key) => self.insert(key, flag),
            _ => self.insert(key, value),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Attributes
where
    K: Into<String>,
    V: AttributeValue,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a String, &'a String);
    type IntoIter = indexmap::map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
