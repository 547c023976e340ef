// ==========================================
// 物流流转分析系统 - 在库核算引擎
// ==========================================
// 依据: Flow_Engine_Specs_v0.2.md - 3.4 Inventory Reconciler
// ==========================================
// 职责: 由累计到达/离开量核算月末在库
// 红线: 仓库负在库钳到0且必须可观测(计数),不得静默丢弃
// 红线: 站点在库 = 双独立口径取小(保守策略),current_location
//       全局缺失时退回累计到达口径 —— 此规则为业务策略,必须原样保留
// ==========================================

use crate::domain::quality::{QualityCategory, QualityCollector};
use crate::domain::shipment::ItemJourney;
use crate::engine::period::Period;
use tracing::warn;

// ==========================================
// 保守双口径策略
// ==========================================

/// 站点在库的保守估计
///
/// # 规则 (Flow_Engine_Specs 3.4)
/// - current_location 口径可用 → min(累计到达, current_location 计数)
/// - 不可用 → 累计到达
///
/// 两个口径独立推导,取小是为了在 current_location 字段存在
/// 已知录入缺口时避免站点在库高估。
pub fn conservative_site_estimate(
    cumulative_arrivals: i64,
    current_location_count: Option<i64>,
) -> i64 {
    match current_location_count {
        Some(count) => cumulative_arrivals.min(count),
        None => cumulative_arrivals,
    }
}

// ==========================================
// InventoryReconciler - 在库核算引擎
// ==========================================
pub struct InventoryReconciler;

impl InventoryReconciler {
    pub fn new() -> Self {
        Self
    }

    /// 仓库月末在库
    ///
    /// # 规则
    /// - max(0, 累计到达 − 累计离开)
    /// - 原始值为负(数据质量缺口所致) → 钳到0并计入质量报告
    ///
    /// # 参数
    /// - location/period: 仅用于质量报告定位
    /// - cumulative_inbound/cumulative_outbound: 截至本月末的累计量
    pub fn warehouse_inventory(
        &self,
        location: &str,
        period: Period,
        cumulative_inbound: i64,
        cumulative_outbound: i64,
        quality: &mut QualityCollector,
    ) -> i64 {
        let raw = cumulative_inbound - cumulative_outbound;
        if raw < 0 {
            warn!(
                location = %location,
                period = %period,
                raw,
                "仓库原始在库为负,钳到0"
            );
            quality.record_aggregate(
                QualityCategory::NegativeInventoryClamp,
                location,
                format!("{} 原始在库 {} → 0", period, raw),
            );
            return 0;
        }
        raw
    }

    /// 站点月末在库(保守双口径)
    ///
    /// # 参数
    /// - cumulative_arrivals: 截至本月末的累计到达量
    /// - current_location_count: current_location 口径计数
    ///   (全数据集不可用时传 None,退回累计到达口径)
    pub fn site_inventory(
        &self,
        cumulative_arrivals: i64,
        current_location_count: Option<i64>,
    ) -> i64 {
        conservative_site_estimate(cumulative_arrivals, current_location_count)
    }

    /// current_location 口径是否在本数据集可用
    ///
    /// 任一货件携带该字段即视为可用(全局开关,非逐件判断)
    pub fn current_location_available(journeys: &[ItemJourney]) -> bool {
        journeys.iter().any(|j| j.current_location.is_some())
    }

    /// current_location 口径计数(包裹数加权)
    pub fn current_location_count(journeys: &[ItemJourney], location: &str) -> i64 {
        journeys
            .iter()
            .filter(|j| j.current_location.as_deref() == Some(location))
            .map(|j| j.package_count)
            .sum()
    }
}

impl Default for InventoryReconciler {
    fn default() -> Self {
        Self::new()
    }
}
