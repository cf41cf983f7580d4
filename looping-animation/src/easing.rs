//! # Easing 模块
//!
//! 动画曲线，把线性时间进度映射为缓动后的进度。
//!
//! 所有曲线都满足 `apply(0.0) == 0.0`、`apply(1.0) == 1.0`，
//! 且输出始终落在 `[0.0, 1.0]` 内。

use serde::{Deserialize, Serialize};

/// 动画曲线
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationCurve {
    /// 线性（匀速）
    Linear,
    /// 缓入（先慢后快）
    EaseIn,
    /// 缓出（先快后慢）
    EaseOut,
    /// 缓入缓出（两头慢中间快）
    #[default]
    EaseInOut,
}

impl AnimationCurve {
    /// 全部曲线，按声明顺序
    pub const ALL: [AnimationCurve; 4] = [
        AnimationCurve::Linear,
        AnimationCurve::EaseIn,
        AnimationCurve::EaseOut,
        AnimationCurve::EaseInOut,
    ];

    /// 计算缓动值
    ///
    /// # 参数
    /// - `t`: 时间进度 (0.0 - 1.0)，超出范围会被截断
    ///
    /// # 返回
    /// - 缓动后的进度值 (0.0 - 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        let eased = match self {
            AnimationCurve::Linear => t,
            AnimationCurve::EaseIn => t * t * t,
            AnimationCurve::EaseOut => 1.0 - (1.0 - t).powi(3),
            AnimationCurve::EaseInOut => ease_in_out_cubic(t),
        };

        eased.clamp(0.0, 1.0)
    }
}

/// 缓入缓出（Cubic）
fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
