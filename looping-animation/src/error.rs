//! # Error 模块
//!
//! 定义 looping-animation 中使用的错误类型。
//!
//! 循环动画本身的操作（`start` / `reset` / 注册回调）没有可恢复的失败路径；
//! 这里的错误只出现在校验外部传入的配置时。

use thiserror::Error;

use crate::Direction;

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 动画段时长无效
    #[error("{direction} 段时长无效: {duration}（必须为有限正数）")]
    InvalidDuration { direction: Direction, duration: f32 },

    /// 动画目标值无效
    #[error("动画目标值无效: {value}（必须为有限正数）")]
    InvalidValue { value: f32 },
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
