// ==========================================
// 物流流转分析系统 - 领域类型定义
// ==========================================
// 依据: Flow_Engine_Specs_v0.2.md - 0.1 位置体系 / 0.3 路径分级
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 位置类型 (Location Kind)
// ==========================================
// 红线: 只有两类位置,仓库参与跳数统计,站点不参与
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationKind {
    Warehouse, // 中转仓库
    Site,      // 最终交付站点
}

impl LocationKind {
    /// 同刻并列时的排序权重（仓库优先于站点）
    pub fn tie_break_rank(&self) -> u8 {
        match self {
            LocationKind::Warehouse => 0,
            LocationKind::Site => 1,
        }
    }
}

impl fmt::Display for LocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationKind::Warehouse => write!(f, "warehouse"),
            LocationKind::Site => write!(f, "site"),
        }
    }
}

// ==========================================
// 路径分级 (Route Band)
// ==========================================
// 红线: 等级制,3跳及以上合并为一档,下游一律同等对待
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RouteBand {
    DirectOrPreArrival, // 0跳: 直送或尚未移动
    SingleWarehouse,    // 1跳: 单仓中转
    TwoWarehouse,       // 2跳: 双仓中转
    ThreeOrMore,        // ≥3跳: 多仓中转(饱和档)
}

impl RouteBand {
    /// 由仓库跳数归档
    ///
    /// # 规则 (Flow_Engine_Specs 0.3)
    /// - 0 → DirectOrPreArrival
    /// - 1 → SingleWarehouse
    /// - 2 → TwoWarehouse
    /// - ≥3 → ThreeOrMore(不再细分)
    pub fn from_hop_count(hop_count: u32) -> Self {
        match hop_count {
            0 => RouteBand::DirectOrPreArrival,
            1 => RouteBand::SingleWarehouse,
            2 => RouteBand::TwoWarehouse,
            _ => RouteBand::ThreeOrMore,
        }
    }
}

impl fmt::Display for RouteBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteBand::DirectOrPreArrival => write!(f, "DIRECT_OR_PRE_ARRIVAL"),
            RouteBand::SingleWarehouse => write!(f, "SINGLE_WAREHOUSE"),
            RouteBand::TwoWarehouse => write!(f, "TWO_WAREHOUSE"),
            RouteBand::ThreeOrMore => write!(f, "THREE_OR_MORE"),
        }
    }
}

// ==========================================
// 流量指标 (Flow Metric)
// ==========================================
// 仓库报表列: INBOUND/OUTBOUND/INVENTORY
// 站点报表列: INBOUND/INVENTORY
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowMetric {
    Inbound,   // 当月到达
    Outbound,  // 当月离开(由下一事件推断)
    Inventory, // 月末在库(累计口径)
}

impl fmt::Display for FlowMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowMetric::Inbound => write!(f, "INBOUND"),
            FlowMetric::Outbound => write!(f, "OUTBOUND"),
            FlowMetric::Inventory => write!(f, "INVENTORY"),
        }
    }
}
