// ==========================================
// 物流流转分析系统 - 配置层
// ==========================================
// 依据: Flow_Engine_Specs_v0.2.md - 5. 配置面
// ==========================================
// 职责: 位置注册表是本引擎唯一必需的外部配置
// ==========================================

pub mod registry;

pub use registry::LocationRegistry;
