//! テスト共通ヘルパー
