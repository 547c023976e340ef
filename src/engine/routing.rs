// ==========================================
// 物流流转分析系统 - 路径分级引擎
// ==========================================
// 依据: Flow_Engine_Specs_v0.2.md - 3.2 Routing Classifier
// ==========================================
// 职责: 统计仓库跳数并归档,生成可读路径描述
// 红线: 等级制,≥3跳饱和为一档;站点永不计入跳数
// ==========================================

use crate::domain::shipment::{ItemJourney, RouteClassification};
use crate::domain::types::{LocationKind, RouteBand};

// ==========================================
// RoutingClassifier - 路径分级引擎
// ==========================================
pub struct RoutingClassifier;

impl RoutingClassifier {
    pub fn new() -> Self {
        Self
    }

    /// 分级一个货件的行程
    ///
    /// # 规则 (Flow_Engine_Specs 3.2)
    /// - hop_count = 事件序列中仓库类事件数(站点不计)
    /// - band: 0/1/2/≥3 四档,≥3 饱和
    /// - route_label = 按到访顺序拼接位置类型,如 "warehouse→site"
    ///
    /// # 边界
    /// - 空序列 → hop_count=0, band=DirectOrPreArrival, label 为空串
    pub fn classify(&self, journey: &ItemJourney) -> RouteClassification {
        let hop_count = journey
            .events
            .iter()
            .filter(|e| e.kind == LocationKind::Warehouse)
            .count() as u32;

        let route_label = journey
            .events
            .iter()
            .map(|e| e.kind.to_string())
            .collect::<Vec<_>>()
            .join("→");

        RouteClassification {
            item_id: journey.item_id.clone(),
            hop_count,
            band: RouteBand::from_hop_count(hop_count),
            route_label,
        }
    }
}

impl Default for RoutingClassifier {
    fn default() -> Self {
        Self::new()
    }
}
