//! # Config 模块
//!
//! 循环动画的配置：增长段与衰减段各自的时长和曲线。
//!
//! 配置在循环创建后不可变。

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::{AnimationCurve, Direction, SmoothAnimation};

/// 默认单段时长（秒）
pub const DEFAULT_DURATION: f32 = 1.0;

/// 单段动画配置
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimationStep {
    /// 动画时长（秒）
    #[serde(default = "default_duration")]
    pub duration: f32,

    /// 动画曲线
    #[serde(default)]
    pub curve: AnimationCurve,
}

impl AnimationStep {
    pub fn new(duration: f32, curve: AnimationCurve) -> Self {
        Self { duration, curve }
    }

    /// 按本段配置创建一个新的平滑动画（未启动）
    pub fn smooth_animation(&self) -> SmoothAnimation {
        SmoothAnimation::new(self.duration, self.curve)
    }
}

impl Default for AnimationStep {
    fn default() -> Self {
        Self::new(default_duration(), AnimationCurve::default())
    }
}

/// 循环配置
///
/// 增长段与衰减段分别配置，允许"慢吸快呼"这类不对称的节奏。
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoopConfiguration {
    /// 增长段
    #[serde(default)]
    pub increase: AnimationStep,

    /// 衰减段
    #[serde(default)]
    pub decrease: AnimationStep,
}

impl LoopConfiguration {
    pub fn new(increase: AnimationStep, decrease: AnimationStep) -> Self {
        Self { increase, decrease }
    }

    /// 由四个参数构造
    pub fn with_steps(
        increase_duration: f32,
        increase_curve: AnimationCurve,
        decrease_duration: f32,
        decrease_curve: AnimationCurve,
    ) -> Self {
        Self::new(
            AnimationStep::new(increase_duration, increase_curve),
            AnimationStep::new(decrease_duration, decrease_curve),
        )
    }

    /// 两段使用相同的时长和曲线
    pub fn uniform(duration: f32, curve: AnimationCurve) -> Self {
        Self::with_steps(duration, curve, duration, curve)
    }

    /// 取某个方向对应的段配置
    pub fn step(&self, direction: Direction) -> &AnimationStep {
        match direction {
            Direction::Increase => &self.increase,
            Direction::Decrease => &self.decrease,
        }
    }

    /// 一个完整周期（增长 + 衰减）的时长
    pub fn cycle_duration(&self) -> f32 {
        self.increase.duration + self.decrease.duration
    }

    /// 验证配置有效性
    ///
    /// 时长必须为有限正数。
    pub fn validate(&self) -> ConfigResult<()> {
        for direction in [Direction::Increase, Direction::Decrease] {
            let duration = self.step(direction).duration;
            if !duration.is_finite() || duration <= 0.0 {
                return Err(ConfigError::InvalidDuration {
                    direction,
                    duration,
                });
            }
        }
        Ok(())
    }
}

fn default_duration() -> f32 {
    DEFAULT_DURATION
}
