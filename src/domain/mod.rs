// ==========================================
// 物流流转分析系统 - 领域层
// ==========================================
// 依据: Flow_Engine_Specs_v0.2.md - 1. 数据模型
// 职责: 实体与类型定义,不含业务规则
// ==========================================

pub mod location;
pub mod quality;
pub mod shipment;
pub mod types;

// 重导出核心实体
pub use location::Location;
pub use quality::{
    QualityCategory, QualityCollector, QualityLevel, QualityReport, QualitySummary,
    QualityViolation,
};
pub use shipment::{ItemJourney, MovementEvent, RawShipmentRecord, RouteClassification};
pub use types::{FlowMetric, LocationKind, RouteBand};
