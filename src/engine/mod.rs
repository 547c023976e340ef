// ==========================================
// 物流流转分析系统 - 引擎层
// ==========================================
// 依据: Flow_Engine_Specs_v0.2.md - 2. 计算主流程
// ==========================================
// 职责: 实现移动重建与月度汇总的业务规则
// 红线: 无状态、无副作用、无 I/O;全部异常必须可解释
// ==========================================

pub mod error;
pub mod event_extractor;
pub mod flow;
pub mod inventory;
pub mod orchestrator;
pub mod period;
pub mod report;
pub mod routing;

// 重导出核心引擎
pub use error::{EngineError, EngineResult};
pub use event_extractor::EventExtractor;
pub use flow::{FlowAggregator, FlowCounts};
pub use inventory::{conservative_site_estimate, InventoryReconciler};
pub use orchestrator::{FlowOrchestrator, FlowRunResult};
pub use period::Period;
pub use report::{MonthlyReport, MonthlyReportBuilder};
pub use routing::RoutingClassifier;
