// ==========================================
// 物流流转分析系统 - 数据质量模型
// ==========================================
// 依据: Flow_Engine_Specs_v0.2.md - 6. 错误处理
// ==========================================
// 红线: 行级异常就地恢复并计数,绝不中断运行
// 红线: 质量问题作为元数据随报表返回,不以异常形式抛出
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==========================================
// QualityLevel - 质量违规级别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityLevel {
    Warning, // 警告(已恢复,结果可能保守)
    Info,    // 提示(仅记录)
}

// ==========================================
// QualityCategory - 质量违规类别
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualityCategory {
    MalformedTimestamp,          // 单元格无法解析为时间戳 → 按缺失处理
    UnregisteredLocation,        // 位置名未注册 → 该列排除
    NegativeInventoryClamp,      // 仓库在库为负 → 钳到0
    InconsistentCurrentLocation, // current_location 不在自身事件序列中
    NonPositivePackageCount,     // 包裹数 ≤0 → 按1计
}

impl fmt::Display for QualityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QualityCategory::MalformedTimestamp => write!(f, "MALFORMED_TIMESTAMP"),
            QualityCategory::UnregisteredLocation => write!(f, "UNREGISTERED_LOCATION"),
            QualityCategory::NegativeInventoryClamp => write!(f, "NEGATIVE_INVENTORY_CLAMP"),
            QualityCategory::InconsistentCurrentLocation => {
                write!(f, "INCONSISTENT_CURRENT_LOCATION")
            }
            QualityCategory::NonPositivePackageCount => write!(f, "NON_POSITIVE_PACKAGE_COUNT"),
        }
    }
}

// ==========================================
// QualityViolation - 质量违规明细
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityViolation {
    pub row_number: Option<usize>,  // 原始文件行号(行级违规)
    pub item_id: Option<String>,    // 货件标识(如可定位)
    pub level: QualityLevel,        // 违规级别
    pub category: QualityCategory,  // 违规类别
    pub field: String,              // 违规字段(位置名/包裹数等)
    pub message: String,            // 违规描述
}

// ==========================================
// QualitySummary - 质量汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualitySummary {
    pub malformed_timestamps: usize,           // 无法解析的时间戳单元格数
    pub unregistered_locations: usize,         // 未注册位置引用次数
    pub negative_inventory_clamps: usize,      // 负在库钳制次数
    pub inconsistent_current_locations: usize, // current_location 不一致货件数
    pub non_positive_package_counts: usize,    // 非法包裹数货件数
}

impl QualitySummary {
    pub fn total(&self) -> usize {
        self.malformed_timestamps
            + self.unregistered_locations
            + self.negative_inventory_clamps
            + self.inconsistent_current_locations
            + self.non_positive_package_counts
    }
}

// ==========================================
// QualityReport - 质量报告
// ==========================================
// 用途: 随月度报表一并返回的元数据
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub run_id: String,                    // 运行 ID(UUID)
    pub summary: QualitySummary,           // 汇总统计
    pub violations: Vec<QualityViolation>, // 违规明细
}

// ==========================================
// QualityCollector - 质量收集器
// ==========================================
// 用途: 管道各引擎就地记录违规,末尾汇总成报告
#[derive(Debug, Default)]
pub struct QualityCollector {
    violations: Vec<QualityViolation>,
}

impl QualityCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录一条违规
    pub fn record(&mut self, violation: QualityViolation) {
        self.violations.push(violation);
    }

    /// 行级违规便捷入口
    pub fn record_row(
        &mut self,
        row_number: usize,
        item_id: &str,
        category: QualityCategory,
        field: &str,
        message: String,
    ) {
        self.violations.push(QualityViolation {
            row_number: Some(row_number),
            item_id: Some(item_id.to_string()),
            level: QualityLevel::Warning,
            category,
            field: field.to_string(),
            message,
        });
    }

    /// 非行级违规(聚合阶段产生,如负在库钳制)
    pub fn record_aggregate(&mut self, category: QualityCategory, field: &str, message: String) {
        self.violations.push(QualityViolation {
            row_number: None,
            item_id: None,
            level: QualityLevel::Info,
            category,
            field: field.to_string(),
            message,
        });
    }

    pub fn violations(&self) -> &[QualityViolation] {
        &self.violations
    }

    /// 汇总并产出质量报告
    pub fn into_report(self) -> QualityReport {
        let mut summary = QualitySummary::default();
        for v in &self.violations {
            match v.category {
                QualityCategory::MalformedTimestamp => summary.malformed_timestamps += 1,
                QualityCategory::UnregisteredLocation => summary.unregistered_locations += 1,
                QualityCategory::NegativeInventoryClamp => summary.negative_inventory_clamps += 1,
                QualityCategory::InconsistentCurrentLocation => {
                    summary.inconsistent_current_locations += 1
                }
                QualityCategory::NonPositivePackageCount => {
                    summary.non_positive_package_counts += 1
                }
            }
        }
        QualityReport {
            run_id: Uuid::new_v4().to_string(),
            summary,
            violations: self.violations,
        }
    }
}
