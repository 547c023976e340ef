// ==========================================
// 物流流转分析系统 - 货件领域模型
// ==========================================
// 依据: Flow_Engine_Specs_v0.2.md - 1. 数据模型
// 依据: Field_Mapping_Spec_v0.2.md - 宽表时间戳列映射
// ==========================================
// 红线: 原始记录由装载层写入,引擎层只读,绝不回写
// ==========================================

use crate::domain::types::{LocationKind, RouteBand};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// RawShipmentRecord - 货件原始记录
// ==========================================
// 用途: 装载层产物(文件解析 → 列名规范化 → 此结构)
// 形态: 宽表稀疏时间戳列,每个可能位置一列,到达才填值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawShipmentRecord {
    // ===== 主键 =====
    pub item_id: String, // 货件唯一标识

    // ===== 位置时间戳列(源列顺序保留,仅用于质量报告) =====
    // (位置名, 原始单元格文本); 单元格可能无法解析 → 按缺失处理并计入质量报告
    pub location_cells: Vec<(String, String)>,

    // ===== 独立核对字段 =====
    pub current_location: Option<String>, // 最后已知位置(独立录入,仅用于站点在库核对)
    pub package_count: Option<i64>,       // 包裹数乘数(缺省按1计)

    // ===== 元信息 =====
    pub row_number: usize, // 原始文件行号(用于质量报告)
}

impl RawShipmentRecord {
    /// 生效包裹数
    ///
    /// # 规则
    /// - 缺失 → 1
    /// - ≤0 → 1(质量违规由调用方记录)
    pub fn effective_package_count(&self) -> i64 {
        match self.package_count {
            Some(n) if n > 0 => n,
            _ => 1,
        }
    }
}

// ==========================================
// MovementEvent - 移动事件
// ==========================================
// 用途: Event Extractor 输出,全下游共享的唯一事实层
// 红线: 每货件提取一次,按时间升序,不可被下游改写
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementEvent {
    pub location: String,      // 位置名称
    pub kind: LocationKind,    // 位置类型
    pub at: DateTime<Utc>,     // 到达时刻
}

// ==========================================
// ItemJourney - 货件行程
// ==========================================
// 用途: 一个货件的有序事件序列 + 聚合所需的权重/核对字段
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemJourney {
    pub item_id: String,                  // 货件唯一标识
    pub events: Vec<MovementEvent>,       // 升序事件序列(可为空 = 尚未移动)
    pub package_count: i64,               // 生效包裹数(≥1)
    pub current_location: Option<String>, // 最后已知位置(已通过注册表校验)
}

// ==========================================
// RouteClassification - 路径分级结果
// ==========================================
// 用途: Routing Classifier 输出,随报表一并交付渲染层
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteClassification {
    pub item_id: String,     // 货件唯一标识
    pub hop_count: u32,      // 仓库跳数(站点不计入)
    pub band: RouteBand,     // 分级档位(≥3跳饱和)
    pub route_label: String, // 路径描述,如 "warehouse→warehouse→site"
}
