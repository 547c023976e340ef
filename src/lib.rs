// ==========================================
// 物流流转分析系统 - 核心库
// ==========================================
// 依据: Flow_Engine_Specs_v0.2.md - 系统宪法
// 系统定位: 移动路径重建 + 月度流量/在库汇总引擎
// 红线: 纯内存计算,不做文件 I/O;装载与渲染由外部协作方承担
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 位置注册表
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{FlowMetric, LocationKind, RouteBand};

// 领域实体
pub use domain::{
    ItemJourney, Location, MovementEvent, QualityCategory, QualityReport, QualitySummary,
    QualityViolation, RawShipmentRecord, RouteClassification,
};

// 配置
pub use config::LocationRegistry;

// 引擎
pub use engine::{
    EngineError, EngineResult, EventExtractor, FlowAggregator, FlowCounts, FlowOrchestrator,
    FlowRunResult, InventoryReconciler, MonthlyReport, MonthlyReportBuilder, Period,
    RoutingClassifier,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "物流流转分析系统";

// ==========================================
// 预编译检查
// ==========================================
