//! # Direction 模块
//!
//! 循环动画当前所处的方向（增长段 / 衰减段）。

use serde::{Deserialize, Serialize};

/// 动画方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// 增长段：0 → max
    #[default]
    Increase,
    /// 衰减段：max → 0
    Decrease,
}

impl Direction {
    /// 相反方向
    ///
    /// 满足 `d.opposite().opposite() == d`。
    pub fn opposite(self) -> Self {
        match self {
            Direction::Increase => Direction::Decrease,
            Direction::Decrease => Direction::Increase,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Increase => write!(f, "increase"),
            Direction::Decrease => write!(f, "decrease"),
        }
    }
}
