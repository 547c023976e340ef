// ==========================================
// 物流流转分析系统 - 引擎层错误类型
// ==========================================
// 依据: Flow_Engine_Specs_v0.2.md - 6. 错误处理
// ==========================================
// 红线: 只有配置级问题才致命;行级异常一律就地恢复并计入质量报告
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
/// 所有错误信息必须包含显式原因(可解释性)
#[derive(Error, Debug)]
pub enum EngineError {
    // ==========================================
    // 配置错误(致命,终止运行)
    // ==========================================
    #[error("位置注册表为空")]
    EmptyRegistry,

    #[error("位置重复声明: {0}")]
    DuplicateLocation(String),

    #[error("输入引用的位置全部未注册,无法继续")]
    AllLocationsUnregistered,

    #[error("配置解析失败: {0}")]
    ConfigParse(String),

    // ==========================================
    // 参数错误
    // ==========================================
    #[error("非法月份: year={year}, month={month}")]
    InvalidPeriod { year: i32, month: u32 },

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
