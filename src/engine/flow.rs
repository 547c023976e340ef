// ==========================================
// 物流流转分析系统 - 流量聚合引擎
// ==========================================
// 依据: Flow_Engine_Specs_v0.2.md - 3.3 Flow Aggregator
// ==========================================
// 职责: 按 (位置, 自然月) 统计到达/离开量,包裹数加权
// 红线: 离开量不依赖任何"发出"字段,纯粹由时间相邻关系推断
// 红线: 末事件位置永不产生离开量(货件仍在该处)
// ==========================================

use crate::domain::shipment::ItemJourney;
use crate::engine::period::Period;
use serde::{Deserialize, Serialize};

// ==========================================
// FlowCounts - 单位置单月流量
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowCounts {
    pub inbound: i64,  // 当月到达量(包裹数加权)
    pub outbound: i64, // 当月离开量(包裹数加权)
}

// ==========================================
// FlowAggregator - 流量聚合引擎
// ==========================================
pub struct FlowAggregator;

impl FlowAggregator {
    pub fn new() -> Self {
        Self
    }

    /// 统计一个位置在一个自然月内的到达/离开量
    ///
    /// # 规则 (Flow_Engine_Specs 3.3)
    /// - 到达: 货件在该位置的事件时刻落在本月 → 计入 package_count
    /// - 离开: 货件在该位置有事件,且其紧随事件(任意位置/类型)
    ///   的时刻落在本月 → 计入 package_count
    /// - 该位置为货件末事件 → 任何月份都不产生离开量
    /// - 仓库→仓库 与 仓库→站点 的转移同等视为离开
    ///
    /// # 参数
    /// - journeys: 全量货件行程(只读共享)
    /// - location: 目标位置名
    /// - period: 目标自然月
    pub fn aggregate(
        &self,
        journeys: &[ItemJourney],
        location: &str,
        period: Period,
    ) -> FlowCounts {
        let mut counts = FlowCounts::default();

        for journey in journeys {
            for (i, event) in journey.events.iter().enumerate() {
                if event.location != location {
                    continue;
                }

                if period.contains(event.at) {
                    counts.inbound += journey.package_count;
                }

                // 紧随事件的时刻决定离开月份
                if let Some(next) = journey.events.get(i + 1) {
                    if period.contains(next.at) {
                        counts.outbound += journey.package_count;
                    }
                }
            }
        }

        counts
    }
}

impl Default for FlowAggregator {
    fn default() -> Self {
        Self::new()
    }
}
