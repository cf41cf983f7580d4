//! # Looping Animation
//!
//! 循环往复的数值动画：在 0 与最大值之间来回摆动，用来驱动"呼吸"一类的视觉效果。
//!
//! ## 架构概述
//!
//! 本 crate 只负责 **时间轴与进度状态机**，不做任何绘制。
//! 宿主按帧推进时间，并在回调里拿到当前数值：
//!
//! ```text
//! Host                                   looping-animation
//!   │                                           │
//!   │──── start() / reset() ──────────────────►│ ValueAnimationLoop
//!   │──── advance(dt) ────────────────────────►│   └─ AnimationLoop
//!   │                                           │        └─ SmoothAnimation（当前段）
//!   │◄─── progress_handler(value) ──────────────│
//!   │                                           │
//! ```
//!
//! ## 核心类型
//!
//! - [`SmoothAnimation`]：单段 0.0 → 1.0 的平滑动画
//! - [`AnimationLoop`]：增长段 / 衰减段交替的循环，上报 `(进度, 方向)`
//! - [`ValueAnimationLoop`]：把循环进度映射为 `[0, value]` 内的数值
//! - [`LoopConfiguration`]：两段各自的时长与曲线
//! - [`FrameClock`]：固定帧率时钟
//!
//! ## 线程模型
//!
//! 单线程。所有状态变化都发生在调用 `advance` 的线程上，
//! 回调槽基于 `Rc`，类型本身不是 `Send`。
//!
//! ## 使用示例
//!
//! ```ignore
//! use looping_animation::{AnimationCurve, FrameClock, ValueAnimationLoop};
//!
//! let mut breathing =
//!     ValueAnimationLoop::new(40.0, 3.0, AnimationCurve::EaseInOut, 2.0, AnimationCurve::EaseInOut);
//! breathing.set_progress_handler(|value| redraw(value));
//! breathing.start();
//!
//! let clock = FrameClock::default();
//! loop {
//!     breathing.advance(clock.frame_interval());
//! }
//! ```

pub mod animation_loop;
pub mod clock;
pub mod config;
pub mod direction;
pub mod easing;
pub mod error;
pub mod smooth;
pub mod value_loop;

// 重导出核心类型
pub use animation_loop::{AnimationLoop, DirectedAnimation, LoopProgressHandler};
pub use clock::{DEFAULT_FRAME_RATE, FrameClock};
pub use config::{AnimationStep, DEFAULT_DURATION, LoopConfiguration};
pub use direction::Direction;
pub use easing::AnimationCurve;
pub use error::{ConfigError, ConfigResult};
pub use smooth::{AnimationState, Progress, ProgressHandler, SmoothAnimation, Tick};
pub use value_loop::{ValueAnimationLoop, ValueHandler, map_progress};
