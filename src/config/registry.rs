// ==========================================
// 物流流转分析系统 - 位置注册表
// ==========================================
// 依据: Flow_Engine_Specs_v0.2.md - 0.1 位置体系 / 5. 配置面
// ==========================================
// 职责: 枚举输入数据可能引用的全部位置名及其类型
// 红线: 配置期构造一次,不可变,显式传入各引擎(不做全局状态)
// 红线: 同刻并列唯一裁决者 —— 规范序 = (仓库优先, 同类按名称字典序)
// ==========================================

use crate::domain::location::Location;
use crate::domain::types::LocationKind;
use crate::engine::error::{EngineError, EngineResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// LocationRegistry - 位置注册表
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<Location>", into = "Vec<Location>")]
pub struct LocationRegistry {
    // 声明顺序(配置文件原样)
    locations: Vec<Location>,
    // 名称 → 声明下标
    index: HashMap<String, usize>,
    // 名称 → 规范序(同刻并列裁决用)
    canonical_rank: HashMap<String, usize>,
}

impl LocationRegistry {
    /// 构造注册表
    ///
    /// # 参数
    /// - locations: 位置声明列表(顺序保留)
    ///
    /// # 错误
    /// - EmptyRegistry: 空注册表(致命,终止运行)
    /// - DuplicateLocation: 位置名重复声明
    pub fn new(locations: Vec<Location>) -> EngineResult<Self> {
        if locations.is_empty() {
            return Err(EngineError::EmptyRegistry);
        }

        let mut index = HashMap::with_capacity(locations.len());
        for (i, loc) in locations.iter().enumerate() {
            if index.insert(loc.name.clone(), i).is_some() {
                return Err(EngineError::DuplicateLocation(loc.name.clone()));
            }
        }

        // 规范序: 仓库优先于站点,同类内按名称字典序
        let mut canonical: Vec<&Location> = locations.iter().collect();
        canonical.sort_by(|a, b| {
            a.kind
                .tie_break_rank()
                .cmp(&b.kind.tie_break_rank())
                .then_with(|| a.name.cmp(&b.name))
        });
        let canonical_rank = canonical
            .iter()
            .enumerate()
            .map(|(rank, loc)| (loc.name.clone(), rank))
            .collect();

        Ok(Self {
            locations,
            index,
            canonical_rank,
        })
    }

    /// 从 JSON 配置构造
    ///
    /// 格式: [{"name": "Warehouse-A", "kind": "WAREHOUSE"}, ...]
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let locations: Vec<Location> =
            serde_json::from_str(json).map_err(|e| EngineError::ConfigParse(e.to_string()))?;
        Self::new(locations)
    }

    /// 按名称查找
    pub fn get(&self, name: &str) -> Option<&Location> {
        self.index.get(name).map(|&i| &self.locations[i])
    }

    /// 位置类型
    pub fn kind_of(&self, name: &str) -> Option<LocationKind> {
        self.get(name).map(|loc| loc.kind)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// 规范序(越小越优先)
    pub fn canonical_rank(&self, name: &str) -> Option<usize> {
        self.canonical_rank.get(name).copied()
    }

    /// 声明顺序的全部位置
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// 规范序的全部位置(报表列顺序)
    pub fn canonical_locations(&self) -> Vec<&Location> {
        let mut sorted: Vec<&Location> = self.locations.iter().collect();
        sorted.sort_by_key(|loc| self.canonical_rank[&loc.name]);
        sorted
    }

    pub fn warehouses(&self) -> impl Iterator<Item = &Location> {
        self.locations
            .iter()
            .filter(|loc| loc.kind == LocationKind::Warehouse)
    }

    pub fn sites(&self) -> impl Iterator<Item = &Location> {
        self.locations
            .iter()
            .filter(|loc| loc.kind == LocationKind::Site)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}

// serde 辅助转换(注册表以声明列表形态持久化)
impl TryFrom<Vec<Location>> for LocationRegistry {
    type Error = EngineError;

    fn try_from(locations: Vec<Location>) -> Result<Self, Self::Error> {
        Self::new(locations)
    }
}

impl From<LocationRegistry> for Vec<Location> {
    fn from(registry: LocationRegistry) -> Self {
        registry.locations
    }
}
