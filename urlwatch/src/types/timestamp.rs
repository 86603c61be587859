//! タイムスタンプの保存形式
//!
//! `checked_at` は範囲検索と並び替えのキーを兼ねるため、常に固定長
//! （マイクロ秒精度・`Z`終端のRFC 3339）で保存する。文字列比較の順序が
//! 時系列順と一致する。

use chrono::{DateTime, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// 保存精度に切り詰めた現在時刻（UTC）
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// 保存用の固定長文字列に変換する
pub fn format(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// 保存済みの文字列を解析する
///
/// タイムゾーン指定のない ISO-8601（`2024-05-01T12:00:00.123456`）は
/// UTC として扱う。
pub fn parse(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(ts) => Ok(ts.with_timezone(&Utc)),
        Err(err) => NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|_| err),
    }
}

/// serde用シリアライザ（`#[serde(with = "crate::types::timestamp")]`）
pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(ts))
}

/// serde用デシリアライザ
pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse(&value).map_err(serde::de::Error::custom)
}
