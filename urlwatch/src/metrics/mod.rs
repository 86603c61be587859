//! メトリクス集計
//!
//! Observation Storeから読み取り専用でフリート全体の稼働状況、
//! URL単位の稼働率、継続中のダウンタイムを算出する。

use crate::common::error::{MonitorError, MonitorResult};
use crate::db::ObservationRepository;
use crate::types::{timestamp, DowntimeEntry, Observation};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

/// 稼働率の集計期間
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UptimePeriod {
    /// 直近24時間
    #[default]
    Day,
    /// 直近7日間
    Week,
    /// 直近30日間
    Month,
}

impl UptimePeriod {
    /// 期間の長さ
    pub fn duration(&self) -> Duration {
        match self {
            Self::Day => Duration::hours(24),
            Self::Week => Duration::days(7),
            Self::Month => Duration::days(30),
        }
    }
}

impl FromStr for UptimePeriod {
    type Err = MonitorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "24h" => Ok(Self::Day),
            "7d" => Ok(Self::Week),
            "30d" => Ok(Self::Month),
            other => Err(MonitorError::InvalidPeriod(other.to_string())),
        }
    }
}

/// フリート全体の稼働状況
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetHealth {
    /// 一度でもチェックされたURL数
    pub total_monitored: usize,
    /// 最新ステータスがUPのURL数
    pub current_up: usize,
    /// `total_monitored - current_up`
    pub current_down: usize,
    /// 直近24時間に記録があるURLの稼働率の平均（%）
    pub average_uptime_last_24h: Option<f64>,
}

/// URL単位の稼働率
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UptimeReport {
    /// 対象URL
    pub url: String,
    /// 稼働率（%）。期間内の記録がなければ`None`
    pub uptime_percentage: Option<f64>,
    /// 集計開始日時
    #[serde(with = "crate::types::timestamp")]
    pub period_start: DateTime<Utc>,
    /// 集計終了日時
    #[serde(with = "crate::types::timestamp")]
    pub period_end: DateTime<Utc>,
}

/// メトリクス集計器
#[derive(Clone)]
pub struct MetricsAggregator {
    repository: Arc<dyn ObservationRepository>,
}

impl MetricsAggregator {
    /// 新しい集計器を作成
    pub fn new(repository: Arc<dyn ObservationRepository>) -> Self {
        Self { repository }
    }

    /// フリート全体の稼働状況
    pub async fn fleet_health(&self) -> MonitorResult<FleetHealth> {
        let urls = self.repository.distinct_urls().await?;
        let now = timestamp::now();
        let day_ago = now - UptimePeriod::Day.duration();

        let mut current_up = 0;
        let mut percentages = Vec::with_capacity(urls.len());
        for url in &urls {
            if let Some(status) = self.repository.latest_status(url).await? {
                if status.is_up() {
                    current_up += 1;
                }
            }

            let window = self.repository.in_range(url, day_ago, now).await?;
            if let Some(pct) = uptime_percentage(&window) {
                percentages.push(pct);
            }
        }

        let average_uptime_last_24h = if percentages.is_empty() {
            None
        } else {
            Some(percentages.iter().sum::<f64>() / percentages.len() as f64)
        };

        Ok(FleetHealth {
            total_monitored: urls.len(),
            current_up,
            current_down: urls.len() - current_up,
            average_uptime_last_24h,
        })
    }

    /// URL単位の稼働率
    pub async fn uptime(&self, url: &str, period: UptimePeriod) -> MonitorResult<UptimeReport> {
        let period_end = timestamp::now();
        let period_start = period_end - period.duration();
        let observations = self
            .repository
            .in_range(url, period_start, period_end)
            .await?;

        Ok(UptimeReport {
            url: url.to_string(),
            uptime_percentage: uptime_percentage(&observations),
            period_start,
            period_end,
        })
    }

    /// ダウン継続中のURL（開始が新しい順に最大`limit`件）
    pub async fn recent_downtime(&self, limit: u32) -> MonitorResult<Vec<DowntimeEntry>> {
        self.repository.grouped_downtime(limit).await
    }
}

fn uptime_percentage(observations: &[Observation]) -> Option<f64> {
    if observations.is_empty() {
        return None;
    }
    let up = observations.iter().filter(|o| o.status.is_up()).count();
    Some(up as f64 / observations.len() as f64 * 100.0)
}
