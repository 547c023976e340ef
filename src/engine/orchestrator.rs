// ==========================================
// 物流流转分析系统 - 引擎编排器
// ==========================================
// 依据: Flow_Engine_Specs_v0.2.md - 2. 计算主流程
// 用途: 协调提取/分级/聚合/核算/报表引擎的执行顺序
// ==========================================
// 红线: 事件序列只提取一次,全下游只读共享
// 红线: 输入记录绝不改写;任何有效数据存在时必须产出报表
// ==========================================

use crate::config::registry::LocationRegistry;
use crate::domain::quality::{QualityCollector, QualityReport};
use crate::domain::shipment::{ItemJourney, RawShipmentRecord, RouteClassification};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::event_extractor::EventExtractor;
use crate::engine::report::{MonthlyReport, MonthlyReportBuilder};
use crate::engine::routing::RoutingClassifier;
use std::collections::HashSet;
use tracing::{debug, info};

// ==========================================
// FlowRunResult - 管道运行结果
// ==========================================
#[derive(Debug, Clone)]
pub struct FlowRunResult {
    // Monthly Report Builder 输出
    pub report: MonthlyReport,

    // Routing Classifier 输出(逐货件,随报表交付渲染层)
    pub routes: Vec<RouteClassification>,

    // 质量元数据(行级异常汇总,绝不以异常形式抛出)
    pub quality: QualityReport,
}

// ==========================================
// FlowOrchestrator - 引擎编排器
// ==========================================
pub struct FlowOrchestrator {
    extractor: EventExtractor,
    classifier: RoutingClassifier,
    builder: MonthlyReportBuilder,
}

impl FlowOrchestrator {
    pub fn new() -> Self {
        Self {
            extractor: EventExtractor::new(),
            classifier: RoutingClassifier::new(),
            builder: MonthlyReportBuilder::new(),
        }
    }

    /// 执行完整流转分析管道
    ///
    /// # 参数
    /// - records: 货件原始记录集(调用方所有,本引擎只读)
    /// - registry: 位置注册表
    ///
    /// # 错误
    /// - AllLocationsUnregistered: 输入引用的位置全部未注册(配置级,致命)
    ///
    /// # 返回
    /// 报表 + 逐货件路径分级 + 质量报告;零货件 → 空报表(非错误)
    pub fn run(
        &self,
        records: &[RawShipmentRecord],
        registry: &LocationRegistry,
    ) -> EngineResult<FlowRunResult> {
        info!(
            records_count = records.len(),
            locations_count = registry.len(),
            "开始执行流转分析管道"
        );

        // ==========================================
        // 步骤0: 配置级校验
        // ==========================================
        self.check_registry_coverage(records, registry)?;

        // ==========================================
        // 步骤1: Event Extractor - 事件序列重建(每货件一次)
        // ==========================================
        debug!("步骤1: 重建移动事件序列");

        let mut quality = QualityCollector::new();
        let journeys: Vec<ItemJourney> = records
            .iter()
            .map(|record| self.extractor.extract(record, registry, &mut quality))
            .collect();

        let total_events: usize = journeys.iter().map(|j| j.events.len()).sum();
        info!(
            journeys_count = journeys.len(),
            total_events, "事件序列重建完成"
        );

        // ==========================================
        // 步骤2: Routing Classifier - 路径分级(逐货件)
        // ==========================================
        debug!("步骤2: 执行路径分级");

        let routes: Vec<RouteClassification> = journeys
            .iter()
            .map(|journey| self.classifier.classify(journey))
            .collect();

        // ==========================================
        // 步骤3: Flow Aggregator + Inventory Reconciler + Report Builder
        // ==========================================
        debug!("步骤3: 构建月度报表");

        let report = self.builder.build(&journeys, registry, &mut quality);

        let quality_report = quality.into_report();
        info!(
            periods_count = report.periods.len(),
            quality_total = quality_report.summary.total(),
            "流转分析管道完成"
        );

        Ok(FlowRunResult {
            report,
            routes,
            quality: quality_report,
        })
    }

    /// 配置级覆盖校验
    ///
    /// # 规则
    /// - 输入引用了位置列,且引用的名称没有一个在注册表中 → 致命
    /// - 部分未注册 → 行级质量违规(由 Event Extractor 记录),继续运行
    fn check_registry_coverage(
        &self,
        records: &[RawShipmentRecord],
        registry: &LocationRegistry,
    ) -> EngineResult<()> {
        let referenced: HashSet<&str> = records
            .iter()
            .flat_map(|r| r.location_cells.iter().map(|(name, _)| name.as_str()))
            .collect();

        if !referenced.is_empty() && !referenced.iter().any(|name| registry.contains(name)) {
            return Err(EngineError::AllLocationsUnregistered);
        }
        Ok(())
    }
}

impl Default for FlowOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::location::Location;

    fn test_registry() -> LocationRegistry {
        LocationRegistry::new(vec![
            Location::warehouse("Warehouse-A"),
            Location::site("Site-X"),
        ])
        .unwrap()
    }

    fn record(item_id: &str, cells: Vec<(&str, &str)>) -> RawShipmentRecord {
        RawShipmentRecord {
            item_id: item_id.to_string(),
            location_cells: cells
                .into_iter()
                .map(|(l, c)| (l.to_string(), c.to_string()))
                .collect(),
            current_location: None,
            package_count: None,
            row_number: 1,
        }
    }

    #[test]
    fn test_empty_dataset_is_not_an_error() {
        let orchestrator = FlowOrchestrator::new();
        let registry = test_registry();

        let result = orchestrator.run(&[], &registry).unwrap();
        assert!(result.report.is_empty());
        assert!(result.routes.is_empty());
        assert_eq!(result.quality.summary.total(), 0);
    }

    #[test]
    fn test_all_locations_unregistered_is_fatal() {
        let orchestrator = FlowOrchestrator::new();
        let registry = test_registry();

        let records = vec![record(
            "ITEM001",
            vec![("Dock-1", "2024-01-05"), ("Dock-2", "2024-01-10")],
        )];
        let result = orchestrator.run(&records, &registry);
        assert!(matches!(result, Err(EngineError::AllLocationsUnregistered)));
    }

    #[test]
    fn test_partial_unregistered_recovers() {
        let orchestrator = FlowOrchestrator::new();
        let registry = test_registry();

        let records = vec![record(
            "ITEM001",
            vec![("Dock-1", "2024-01-05"), ("Site-X", "2024-01-10")],
        )];
        let result = orchestrator.run(&records, &registry).unwrap();

        // 未注册列排除但产出报表
        assert!(!result.report.is_empty());
        assert_eq!(result.quality.summary.unregistered_locations, 1);
    }
}
