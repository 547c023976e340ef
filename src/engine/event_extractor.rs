// ==========================================
// 物流流转分析系统 - 事件提取引擎
// ==========================================
// 依据: Flow_Engine_Specs_v0.2.md - 3.1 Event Extractor
// 依据: Field_Mapping_Spec_v0.2.md - 宽表时间戳列 → 事件序列
// ==========================================
// 职责: 将稀疏宽表的位置时间戳列重建为升序移动事件序列
// 红线: 每货件提取一次,下游共享只读;输入记录绝不改写
// 红线: 行级异常(解析失败/未注册列)就地恢复并计入质量报告,不中断
// ==========================================

use crate::config::registry::LocationRegistry;
use crate::domain::quality::{QualityCategory, QualityCollector};
use crate::domain::shipment::{ItemJourney, MovementEvent, RawShipmentRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::warn;

// ==========================================
// EventExtractor - 事件提取引擎
// ==========================================
pub struct EventExtractor;

impl EventExtractor {
    pub fn new() -> Self {
        Self
    }

    /// 提取一个货件的行程
    ///
    /// # 规则 (Flow_Engine_Specs 3.1)
    /// 1. 空白单元格 → 跳过(该位置未到达)
    /// 2. 无法解析的时间戳 → 按缺失处理,记 MALFORMED_TIMESTAMP
    /// 3. 未注册位置列 → 排除,记 UNREGISTERED_LOCATION
    /// 4. 事件按时间升序;同刻并列按注册表规范序(仓库优先,同类字典序)
    /// 5. 零个有效单元格 → 空序列(合法,表示尚未移动)
    ///
    /// # 参数
    /// - record: 货件原始记录(只读)
    /// - registry: 位置注册表
    /// - quality: 质量收集器
    pub fn extract(
        &self,
        record: &RawShipmentRecord,
        registry: &LocationRegistry,
        quality: &mut QualityCollector,
    ) -> ItemJourney {
        let mut events: Vec<MovementEvent> = Vec::new();

        for (location, cell) in &record.location_cells {
            let text = cell.trim();
            // 空白 = 未到达
            if text.is_empty() {
                continue;
            }

            // 未注册位置列 → 排除
            let kind = match registry.kind_of(location) {
                Some(kind) => kind,
                None => {
                    warn!(
                        item_id = %record.item_id,
                        location = %location,
                        "位置未注册,该列排除"
                    );
                    quality.record_row(
                        record.row_number,
                        &record.item_id,
                        QualityCategory::UnregisteredLocation,
                        location,
                        format!("位置 '{}' 未在注册表声明", location),
                    );
                    continue;
                }
            };

            // 解析失败 → 按缺失处理
            let at = match Self::parse_timestamp(text) {
                Some(ts) => ts,
                None => {
                    warn!(
                        item_id = %record.item_id,
                        location = %location,
                        cell = %text,
                        "时间戳无法解析,按缺失处理"
                    );
                    quality.record_row(
                        record.row_number,
                        &record.item_id,
                        QualityCategory::MalformedTimestamp,
                        location,
                        format!("无法解析: '{}'", text),
                    );
                    continue;
                }
            };

            events.push(MovementEvent {
                location: location.clone(),
                kind,
                at,
            });
        }

        // 升序排序;同刻并列由规范序裁决(确定性)
        events.sort_by(|a, b| {
            a.at.cmp(&b.at).then_with(|| {
                registry
                    .canonical_rank(&a.location)
                    .cmp(&registry.canonical_rank(&b.location))
            })
        });

        // 包裹数校验: ≤0 → 按1计并记违规
        let package_count = match record.package_count {
            Some(n) if n <= 0 => {
                quality.record_row(
                    record.row_number,
                    &record.item_id,
                    QualityCategory::NonPositivePackageCount,
                    "package_count",
                    format!("包裹数 {} 非法,按 1 计", n),
                );
                1
            }
            _ => record.effective_package_count(),
        };

        // current_location 校验
        let current_location = self.validate_current_location(record, registry, &events, quality);

        ItemJourney {
            item_id: record.item_id.clone(),
            events,
            package_count,
            current_location,
        }
    }

    /// 校验 current_location 字段
    ///
    /// # 规则
    /// - 未注册 → 记 UNREGISTERED_LOCATION,字段置空
    /// - 不在自身事件序列中 → 记 INCONSISTENT_CURRENT_LOCATION,字段保留
    ///   (站点在库的双口径取小规则天然吸收此类不一致)
    fn validate_current_location(
        &self,
        record: &RawShipmentRecord,
        registry: &LocationRegistry,
        events: &[MovementEvent],
        quality: &mut QualityCollector,
    ) -> Option<String> {
        let name = record.current_location.as_deref()?.trim();
        if name.is_empty() {
            return None;
        }

        if !registry.contains(name) {
            quality.record_row(
                record.row_number,
                &record.item_id,
                QualityCategory::UnregisteredLocation,
                "current_location",
                format!("current_location '{}' 未在注册表声明", name),
            );
            return None;
        }

        if !events.iter().any(|e| e.location == name) {
            quality.record_row(
                record.row_number,
                &record.item_id,
                QualityCategory::InconsistentCurrentLocation,
                "current_location",
                format!("current_location '{}' 不在该货件事件序列中", name),
            );
        }

        Some(name.to_string())
    }

    /// 解析时间戳单元格
    ///
    /// # 支持格式
    /// - RFC 3339: 2024-01-05T08:00:00Z
    /// - 日期时间: 2024-01-05 08:00:00
    /// - 纯日期:   2024-01-05 (按 UTC 零点计)
    pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
        let text = text.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(dt.with_timezone(&Utc));
        }

        if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S") {
            return Some(naive.and_utc());
        }

        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return Some(date.and_hms_opt(0, 0, 0)?.and_utc());
        }

        None
    }
}

impl Default for EventExtractor {
    fn default() -> Self {
        Self::new()
    }
}
