// ==========================================
// 物流流转分析系统 - 月度报表构建引擎
// ==========================================
// 依据: Flow_Engine_Specs_v0.2.md - 3.5 Monthly Report Builder
// ==========================================
// 职责: 将流量/在库格汇编为 周期 × (位置 × 指标) 两级结构
// 红线: 观测区间内每个周期必须含全部注册位置的条目,零值也要落格
// 红线: 空数据集 → 空报表,不是错误
// ==========================================

use crate::config::registry::LocationRegistry;
use crate::domain::quality::QualityCollector;
use crate::domain::shipment::ItemJourney;
use crate::domain::types::{FlowMetric, LocationKind};
use crate::engine::flow::FlowAggregator;
use crate::engine::inventory::InventoryReconciler;
use crate::engine::period::Period;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// ==========================================
// MonthlyReport - 月度报表
// ==========================================
// 两级结构: 外层键 = 周期(升序),内层键 = 位置 → 指标
// 仓库指标列: INBOUND/OUTBOUND/INVENTORY; 站点指标列: INBOUND/INVENTORY
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub run_id: String,                 // 运行 ID(UUID)
    pub generated_at: DateTime<Utc>,    // 生成时刻
    pub periods: BTreeMap<Period, BTreeMap<String, BTreeMap<FlowMetric, i64>>>,
}

impl MonthlyReport {
    /// 空报表(零货件数据集)
    pub fn empty() -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            periods: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// 取单格计数
    pub fn get(&self, period: Period, location: &str, metric: FlowMetric) -> Option<i64> {
        self.periods
            .get(&period)?
            .get(location)?
            .get(&metric)
            .copied()
    }

    /// 观测区间(最早/最晚周期)
    pub fn observed_range(&self) -> Option<(Period, Period)> {
        let first = *self.periods.keys().next()?;
        let last = *self.periods.keys().last()?;
        Some((first, last))
    }
}

// ==========================================
// MonthlyReportBuilder - 月度报表构建引擎
// ==========================================
pub struct MonthlyReportBuilder {
    flow: FlowAggregator,
    inventory: InventoryReconciler,
}

impl MonthlyReportBuilder {
    pub fn new() -> Self {
        Self {
            flow: FlowAggregator::new(),
            inventory: InventoryReconciler::new(),
        }
    }

    /// 构建月度报表
    ///
    /// # 规则 (Flow_Engine_Specs 3.5)
    /// - 观测区间 = 数据集最早..=最晚时间戳(月粒度,闭区间)
    /// - 每个周期落格全部注册位置(零值也落格)
    /// - 在库为累计口径,按周期升序逐月推进(位置间相互独立)
    /// - 零货件或零事件 → 空报表
    ///
    /// # 参数
    /// - journeys: 全量货件行程(只读共享,由 Event Extractor 一次性产出)
    /// - registry: 位置注册表
    /// - quality: 质量收集器(负在库钳制在此期间记录)
    pub fn build(
        &self,
        journeys: &[ItemJourney],
        registry: &LocationRegistry,
        quality: &mut QualityCollector,
    ) -> MonthlyReport {
        // 观测区间
        let timestamps: Vec<DateTime<Utc>> = journeys
            .iter()
            .flat_map(|j| j.events.iter().map(|e| e.at))
            .collect();
        let (first, last) = match (timestamps.iter().min(), timestamps.iter().max()) {
            (Some(&min), Some(&max)) => (Period::of(min), Period::of(max)),
            _ => return MonthlyReport::empty(),
        };
        let periods = Period::range_inclusive(first, last);

        // current_location 口径可用性是全局开关
        let current_available = InventoryReconciler::current_location_available(journeys);

        let mut report = MonthlyReport::empty();
        for &period in &periods {
            report.periods.insert(period, BTreeMap::new());
        }

        // 位置间相互独立;位置内按周期升序推进累计量
        for location in registry.canonical_locations() {
            let mut cumulative_inbound: i64 = 0;
            let mut cumulative_outbound: i64 = 0;

            let current_count = if current_available {
                Some(InventoryReconciler::current_location_count(
                    journeys,
                    &location.name,
                ))
            } else {
                None
            };

            for &period in &periods {
                let counts = self.flow.aggregate(journeys, &location.name, period);
                cumulative_inbound += counts.inbound;
                cumulative_outbound += counts.outbound;

                let mut metrics = BTreeMap::new();
                metrics.insert(FlowMetric::Inbound, counts.inbound);
                match location.kind {
                    LocationKind::Warehouse => {
                        metrics.insert(FlowMetric::Outbound, counts.outbound);
                        metrics.insert(
                            FlowMetric::Inventory,
                            self.inventory.warehouse_inventory(
                                &location.name,
                                period,
                                cumulative_inbound,
                                cumulative_outbound,
                                quality,
                            ),
                        );
                    }
                    LocationKind::Site => {
                        metrics.insert(
                            FlowMetric::Inventory,
                            self.inventory
                                .site_inventory(cumulative_inbound, current_count),
                        );
                    }
                }

                report
                    .periods
                    .entry(period)
                    .or_default()
                    .insert(location.name.clone(), metrics);
            }
        }

        report
    }
}

impl Default for MonthlyReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::location::Location;
    use crate::domain::shipment::MovementEvent;
    use chrono::TimeZone;

    fn test_registry() -> LocationRegistry {
        LocationRegistry::new(vec![
            Location::warehouse("Warehouse-A"),
            Location::warehouse("Warehouse-B"),
            Location::site("Site-X"),
        ])
        .unwrap()
    }

    fn journey(
        item_id: &str,
        stops: Vec<(&str, LocationKind, (i32, u32, u32))>,
        current: Option<&str>,
    ) -> ItemJourney {
        let events = stops
            .into_iter()
            .map(|(location, kind, (y, m, d))| MovementEvent {
                location: location.to_string(),
                kind,
                at: Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap(),
            })
            .collect();
        ItemJourney {
            item_id: item_id.to_string(),
            events,
            package_count: 1,
            current_location: current.map(|s| s.to_string()),
        }
    }

    #[test]
    fn test_empty_dataset_yields_empty_report() {
        let builder = MonthlyReportBuilder::new();
        let registry = test_registry();
        let mut quality = QualityCollector::new();

        let report = builder.build(&[], &registry, &mut quality);
        assert!(report.is_empty());
        assert!(report.observed_range().is_none());
    }

    #[test]
    fn test_dense_grid_over_observed_range() {
        let builder = MonthlyReportBuilder::new();
        let registry = test_registry();
        let mut quality = QualityCollector::new();

        // 单货件: 1月仓库,3月站点 → 观测区间 1-3月,中间 2月也必须落格
        let journeys = vec![journey(
            "ITEM001",
            vec![
                ("Warehouse-A", LocationKind::Warehouse, (2024, 1, 5)),
                ("Site-X", LocationKind::Site, (2024, 3, 20)),
            ],
            None,
        )];
        let report = builder.build(&journeys, &registry, &mut quality);

        let jan = Period::new(2024, 1).unwrap();
        let feb = Period::new(2024, 2).unwrap();
        let mar = Period::new(2024, 3).unwrap();
        assert_eq!(report.observed_range(), Some((jan, mar)));

        // 每周期全部位置落格
        for &period in &[jan, feb, mar] {
            let cells = report.periods.get(&period).unwrap();
            assert_eq!(cells.len(), 3, "{} 应含全部 3 个位置", period);
        }

        // 未到访仓库全程零值
        assert_eq!(report.get(feb, "Warehouse-B", FlowMetric::Inbound), Some(0));
        assert_eq!(report.get(feb, "Warehouse-B", FlowMetric::Inventory), Some(0));

        // 仓库三列,站点两列
        let jan_a = &report.periods[&jan]["Warehouse-A"];
        assert_eq!(jan_a.len(), 3);
        let jan_x = &report.periods[&jan]["Site-X"];
        assert_eq!(jan_x.len(), 2);
        assert!(!jan_x.contains_key(&FlowMetric::Outbound));
    }

    #[test]
    fn test_e2e_scenario_figures() {
        let builder = MonthlyReportBuilder::new();
        let registry = test_registry();
        let mut quality = QualityCollector::new();

        let journeys = vec![
            journey(
                "ITEM001",
                vec![
                    ("Warehouse-A", LocationKind::Warehouse, (2024, 1, 5)),
                    ("Site-X", LocationKind::Site, (2024, 1, 20)),
                ],
                None,
            ),
            journey(
                "ITEM002",
                vec![
                    ("Warehouse-A", LocationKind::Warehouse, (2024, 1, 10)),
                    ("Warehouse-B", LocationKind::Warehouse, (2024, 2, 1)),
                    ("Site-X", LocationKind::Site, (2024, 2, 15)),
                ],
                None,
            ),
        ];
        let report = builder.build(&journeys, &registry, &mut quality);

        let jan = Period::new(2024, 1).unwrap();
        let feb = Period::new(2024, 2).unwrap();

        assert_eq!(report.get(jan, "Warehouse-A", FlowMetric::Inbound), Some(2));
        assert_eq!(report.get(jan, "Warehouse-A", FlowMetric::Outbound), Some(1));
        assert_eq!(report.get(feb, "Warehouse-A", FlowMetric::Outbound), Some(1));
        assert_eq!(report.get(jan, "Warehouse-A", FlowMetric::Inventory), Some(1));
        assert_eq!(report.get(feb, "Warehouse-A", FlowMetric::Inventory), Some(0));
        assert_eq!(report.get(jan, "Site-X", FlowMetric::Inbound), Some(1));
        assert_eq!(report.get(feb, "Site-X", FlowMetric::Inbound), Some(1));
        // 站点在库: current_location 全局缺失 → 累计到达口径
        assert_eq!(report.get(feb, "Site-X", FlowMetric::Inventory), Some(2));
    }

    #[test]
    fn test_site_inventory_conservative_bound() {
        let builder = MonthlyReportBuilder::new();
        let registry = test_registry();
        let mut quality = QualityCollector::new();

        // 两货件到站,但 current_location 口径只有一件在站
        let journeys = vec![
            journey(
                "ITEM001",
                vec![("Site-X", LocationKind::Site, (2024, 1, 10))],
                Some("Site-X"),
            ),
            journey(
                "ITEM002",
                vec![("Site-X", LocationKind::Site, (2024, 1, 15))],
                Some("Warehouse-A"),
            ),
        ];
        let report = builder.build(&journeys, &registry, &mut quality);

        let jan = Period::new(2024, 1).unwrap();
        // min(累计到达=2, current_location计数=1) = 1
        assert_eq!(report.get(jan, "Site-X", FlowMetric::Inventory), Some(1));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let builder = MonthlyReportBuilder::new();
        let registry = test_registry();
        let mut quality = QualityCollector::new();

        let journeys = vec![journey(
            "ITEM001",
            vec![("Warehouse-A", LocationKind::Warehouse, (2024, 1, 5))],
            None,
        )];
        let report = builder.build(&journeys, &registry, &mut quality);

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"2024-01\""));
        assert!(json.contains("Warehouse-A"));
    }
}
