// ==========================================
// 物流流转分析系统 - 位置领域模型
// ==========================================
// 依据: Flow_Engine_Specs_v0.2.md - 0.1 位置体系
// 红线: 位置在配置期一次定义,运行期只读
// ==========================================

use crate::domain::types::LocationKind;
use serde::{Deserialize, Serialize};

// ==========================================
// Location - 位置配置实体
// ==========================================
// 用途: 位置注册表的条目,配置层写入,引擎层只读
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,       // 位置名称(数据列的规范名)
    pub kind: LocationKind, // 位置类型(WAREHOUSE/SITE)
}

impl Location {
    pub fn warehouse(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: LocationKind::Warehouse,
        }
    }

    pub fn site(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: LocationKind::Site,
        }
    }
}
