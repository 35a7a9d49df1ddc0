//! Query API パラメータ
//!
//! `Action=...&Name=...&Attributes.entry.1.key=...` 形式のフォームを解釈する

use std::collections::{BTreeMap, HashMap};

use sns_mock_common::{
    attributes::Attributes,
    error::{SnsError, SnsResult},
};

/// フォーム／クエリ文字列のパラメータ
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    values: HashMap<String, String>,
}

impl QueryParams {
    /// キー・値の組から作成（重複キーは後勝ち）
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            values: pairs.into_iter().collect(),
        }
    }

    /// `Action`
    pub fn action(&self) -> SnsResult<&str> {
        self.get("Action").ok_or_else(|| SnsError::missing("Action"))
    }

    /// 任意パラメータ
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// 任意パラメータ（所有権付き）
    pub fn optional(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }

    /// 必須パラメータ
    pub fn required(&self, name: &str) -> SnsResult<String> {
        self.optional(name).ok_or_else(|| SnsError::missing(name))
    }

    /// `ContentType=JSON` が指定されたか
    pub fn wants_json(&self) -> bool {
        self.get("ContentType")
            .is_some_and(|value| value.eq_ignore_ascii_case("JSON"))
    }

    /// `<prefix>.entry.N.key` / `<prefix>.entry.N.value` を番号順に属性へ変換
    pub fn attributes(&self, prefix: &str) -> SnsResult<Attributes> {
        let entry_prefix = format!("{}.entry.", prefix);
        let mut keys: BTreeMap<u32, &str> = BTreeMap::new();
        let mut values: BTreeMap<u32, &str> = BTreeMap::new();

        for (name, value) in &self.values {
            let Some(rest) = name.strip_prefix(&entry_prefix) else {
                continue;
            };
            let Some((index, field)) = rest.split_once('.') else {
                return Err(invalid_entry(name));
            };
            let index: u32 = index.parse().map_err(|_| invalid_entry(name))?;
            match field {
                "key" => keys.insert(index, value.as_str()),
                "value" => values.insert(index, value.as_str()),
                _ => return Err(invalid_entry(name)),
            };
        }

        let mut attributes = Attributes::new();
        for (index, key) in keys {
            let value = values.remove(&index).ok_or_else(|| {
                SnsError::InvalidParameter(format!(
                    "Invalid parameter: {} Reason: entry {} has a key but no value",
                    prefix, index
                ))
            })?;
            attributes.insert_wire(key, value);
        }
        if let Some(index) = values.keys().next() {
            return Err(SnsError::InvalidParameter(format!(
                "Invalid parameter: {} Reason: entry {} has a value but no key",
                prefix, index
            )));
        }

        Ok(attributes)
    }
}

fn invalid_entry(name: &str) -> SnsError {
    SnsError::InvalidParameter(format!("Invalid parameter: {}", name))
}
