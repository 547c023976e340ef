// ==========================================
// 物流流转分析系统 - 月度周期值类型
// ==========================================
// 依据: Flow_Engine_Specs_v0.2.md - 2. 周期口径(自然月)
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::engine::error::{EngineError, EngineResult};
use chrono::{DateTime, Datelike, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

// ==========================================
// Period - 自然月周期
// ==========================================
// 排序语义: 时间先后(BTreeMap 键即为报表行序)
// 序列化形态: "YYYY-MM" 字符串(可作 JSON map 键)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    pub year: i32,
    pub month: u32, // 1-12
}

impl Period {
    /// 构造周期
    ///
    /// # 错误
    /// - InvalidPeriod: month ∉ 1..=12
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(EngineError::InvalidPeriod { year, month });
        }
        Ok(Self { year, month })
    }

    /// 时间戳所属周期
    pub fn of(ts: DateTime<Utc>) -> Self {
        Self {
            year: ts.year(),
            month: ts.month(),
        }
    }

    /// 时间戳是否落在本周期内
    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts.year() == self.year && ts.month() == self.month
    }

    /// 下一个自然月
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// 闭区间周期序列 [start, end]
    ///
    /// # 边界
    /// - start > end → 空序列
    pub fn range_inclusive(start: Period, end: Period) -> Vec<Period> {
        let mut periods = Vec::new();
        let mut current = start;
        while current <= end {
            periods.push(current);
            current = current.next();
        }
        periods
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| EngineError::ConfigParse(format!("非法周期: '{}'", s)))?;
        let year: i32 = year
            .parse()
            .map_err(|_| EngineError::ConfigParse(format!("非法周期: '{}'", s)))?;
        let month: u32 = month
            .parse()
            .map_err(|_| EngineError::ConfigParse(format!("非法周期: '{}'", s)))?;
        Period::new(year, month)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}
