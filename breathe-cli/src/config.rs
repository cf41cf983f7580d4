//! # Config 模块
//!
//! 呼吸指示器的运行配置。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (breathe.json)
//! 3. 默认值（最低）

use std::fs;
use std::path::Path;

use looping_animation::{
    AnimationCurve, AnimationLoop, ConfigError, DEFAULT_FRAME_RATE, Direction, LoopConfiguration,
    ValueAnimationLoop,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

/// 允许的最大帧率
pub const MAX_FRAME_RATE: u32 = 240;

/// 呼吸指示器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreathingConfig {
    /// 呼吸幅度（最大内缩量）
    #[serde(default = "default_value")]
    pub value: f32,

    /// 增长段 / 衰减段配置
    #[serde(rename = "loop", default = "default_loop")]
    pub animation: LoopConfiguration,

    /// 驱动帧率
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,

    /// 第一段的方向
    #[serde(default)]
    pub start_with: Direction,
}

// 默认值函数
fn default_value() -> f32 {
    40.0
}

fn default_loop() -> LoopConfiguration {
    // 吸气 3 秒，呼气 2 秒
    LoopConfiguration::with_steps(3.0, AnimationCurve::EaseInOut, 2.0, AnimationCurve::EaseInOut)
}

fn default_frame_rate() -> u32 {
    DEFAULT_FRAME_RATE
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            value: default_value(),
            animation: default_loop(),
            frame_rate: default_frame_rate(),
            start_with: Direction::default(),
        }
    }
}

impl BreathingConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并记录警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = %path.display(), "配置文件不存在，使用默认配置");
            return Self::default();
        }

        match Self::load_strict(path) {
            Ok(config) => {
                info!(path = %path.display(), "配置文件加载成功");
                config
            }
            Err(e) => {
                warn!(error = %e, "配置文件加载失败，使用默认配置");
                Self::default()
            }
        }
    }

    /// 加载配置文件，失败时返回错误
    pub fn load_strict(path: impl AsRef<Path>) -> Result<Self, BreathingConfigError> {
        let content = fs::read_to_string(path)?;
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BreathingConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| BreathingConfigError::SerializationFailed(e.to_string()))?;

        fs::write(path, json)?;

        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), BreathingConfigError> {
        if !self.value.is_finite() || self.value <= 0.0 {
            return Err(ConfigError::InvalidValue { value: self.value }.into());
        }

        if self.frame_rate == 0 || self.frame_rate > MAX_FRAME_RATE {
            return Err(BreathingConfigError::InvalidFrameRate {
                frame_rate: self.frame_rate,
            });
        }

        self.animation.validate()?;

        Ok(())
    }

    /// 按配置创建数值循环
    pub fn value_loop(&self) -> ValueAnimationLoop {
        ValueAnimationLoop::from_loop(
            self.value,
            AnimationLoop::new(self.animation, self.start_with),
        )
    }
}

/// 配置错误
#[derive(Error, Debug)]
pub enum BreathingConfigError {
    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 解析失败
    #[error("配置解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    SerializationFailed(String),

    /// 帧率越界
    #[error("帧率无效: {frame_rate}（必须在 1 - 240 之间）")]
    InvalidFrameRate { frame_rate: u32 },

    /// 循环配置无效
    #[error("配置验证失败: {0}")]
    Loop(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BreathingConfig::default();
        assert_eq!(config.value, 40.0);
        assert_eq!(config.frame_rate, 60);
        assert_eq!(config.animation.step(Direction::Increase).duration, 3.0);
        assert_eq!(config.animation.step(Direction::Decrease).duration, 2.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "value": 12.5, "loop": { "increase": { "duration": 4.0, "curve": "linear" } } }"#;
        let config: BreathingConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.value, 12.5);
        assert_eq!(config.frame_rate, 60);
        assert_eq!(config.start_with, Direction::Increase);
        assert_eq!(config.animation.increase.duration, 4.0);
        assert_eq!(config.animation.increase.curve, AnimationCurve::Linear);
        // 缺省的段落回到单段默认值
        assert_eq!(config.animation.decrease.duration, 1.0);
    }

    #[test]
    fn test_config_validation() {
        let mut config = BreathingConfig::default();

        config.value = 0.0;
        assert!(matches!(
            config.validate(),
            Err(BreathingConfigError::Loop(ConfigError::InvalidValue { .. }))
        ));
        config.value = 40.0;

        config.frame_rate = 1000;
        assert!(matches!(
            config.validate(),
            Err(BreathingConfigError::InvalidFrameRate { frame_rate: 1000 })
        ));
        config.frame_rate = 30;

        config.animation.increase.duration = -2.0;
        assert!(matches!(
            config.validate(),
            Err(BreathingConfigError::Loop(ConfigError::InvalidDuration { .. }))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("breathe.json");

        let mut config = BreathingConfig::default();
        config.value = 18.0;
        config.frame_rate = 30;
        config.save(&path).unwrap();

        let loaded = BreathingConfig::load_strict(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(BreathingConfig::load(&path), config);
    }

    #[test]
    fn test_load_missing_or_broken_falls_back() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.json");
        assert_eq!(BreathingConfig::load(&missing), BreathingConfig::default());
        assert!(matches!(
            BreathingConfig::load_strict(&missing),
            Err(BreathingConfigError::Io(_))
        ));

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        assert_eq!(BreathingConfig::load(&broken), BreathingConfig::default());
        assert!(matches!(
            BreathingConfig::load_strict(&broken),
            Err(BreathingConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_value_loop_from_config() {
        let config = BreathingConfig::default();
        let breathing = config.value_loop();
        assert_eq!(breathing.value(), 40.0);
        assert_eq!(*breathing.animation_loop().configuration(), config.animation);
        assert_eq!(breathing.current_direction(), Direction::Increase);
    }

    #[test]
    fn test_start_with_decrease() {
        let json = r#"{ "start_with": "decrease" }"#;
        let config: BreathingConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.start_with, Direction::Decrease);

        let mut breathing = config.value_loop();
        let first = std::rc::Rc::new(std::cell::Cell::new(None));
        let sink = first.clone();
        breathing.set_progress_handler(move |v| {
            if sink.get().is_none() {
                sink.set(Some(v));
            }
        });
        breathing.start();

        // 从衰减段开始，首帧为最大值
        assert_eq!(first.get(), Some(40.0));
        assert_eq!(breathing.current_direction(), Direction::Decrease);
    }
}
