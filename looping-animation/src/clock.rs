//! # Clock 模块
//!
//! 固定帧率时钟：把帧率换算成每帧的 `dt`，并把真实经过的时间累积成整帧数。
//!
//! 循环动画本身不计时，宿主按帧调用 `advance(dt)`；
//! 这里提供宿主常用的两种驱动方式：
//! - 模拟：按固定步长连续推进若干帧
//! - 实时：每次醒来把实际经过的时间喂给 [`FrameClock::accumulate`]，按返回的帧数推进

use std::time::Duration;

/// 默认帧率
pub const DEFAULT_FRAME_RATE: u32 = 60;

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// 固定帧率时钟
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameClock {
    frame_rate: u32,
    /// 尚未凑满一帧的剩余时间，单位为 `纳秒 × 帧率`，用整数保存避免累积误差
    pending: u128,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_RATE)
    }
}

impl FrameClock {
    /// 创建时钟，帧率至少为 1
    pub fn new(frame_rate: u32) -> Self {
        Self {
            frame_rate: frame_rate.max(1),
            pending: 0,
        }
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    /// 每帧时长（秒）
    pub fn frame_interval(&self) -> f32 {
        1.0 / self.frame_rate as f32
    }

    /// 每帧时长
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.frame_rate))
    }

    /// 覆盖 `seconds` 秒所需的帧数（向上取整）
    pub fn frames_in(&self, seconds: f32) -> u64 {
        if seconds <= 0.0 || seconds.is_nan() {
            return 0;
        }
        // 容忍 f32 表示误差，0.3 秒 @ 10fps 应为 3 帧而不是 4 帧
        let frames = f64::from(seconds) * f64::from(self.frame_rate);
        (frames - 1e-6).ceil() as u64
    }

    /// 累积真实经过的时间
    ///
    /// # 返回
    /// 本次凑满的整帧数，不足一帧的部分留到下次。
    pub fn accumulate(&mut self, elapsed: Duration) -> u64 {
        self.pending += elapsed.as_nanos() * u128::from(self.frame_rate);

        let frames = self.pending / NANOS_PER_SEC;
        self.pending %= NANOS_PER_SEC;
        u64::try_from(frames).unwrap_or(u64::MAX)
    }
}
