//! # Smooth 模块
//!
//! 单段平滑动画：在 `duration` 内把进度从 0.0 推到 1.0。
//!
//! 核心设计：
//! - 时间由宿主通过 [`SmoothAnimation::advance`] 推进，动画本身不持有计时器
//! - 每次 tick 都通过进度回调上报缓动后的连续进度（不做分档）
//! - 自然完成通过 `advance` 的返回值 [`Tick::Completed`] 通知持有者，与进度回调分开
//! - `stop()` 会向仍挂着的回调补发一帧停止位置的进度；不想收到这一帧的持有者需先摘掉回调

use tracing::warn;

use crate::AnimationCurve;

/// 进度值（0.0 - 1.0）
pub type Progress = f32;

/// 进度回调
pub type ProgressHandler = Box<dyn FnMut(Progress)>;

/// 动画状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationState {
    /// 尚未启动
    #[default]
    Idle,
    /// 正在插值
    Running,
    /// 自然完成
    Finished,
    /// 被中途停止
    Stopped,
}

impl AnimationState {
    /// 是否为活跃状态（需要更新）
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Running)
    }
}

/// 单次推进的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// 动画未在运行，本次推进无效果
    Idle,
    /// 动画仍在进行中
    Progressed,
    /// 本次推进使动画自然完成
    Completed,
}

/// 平滑动画
pub struct SmoothAnimation {
    /// 动画时长（秒）
    duration: f32,
    /// 动画曲线
    curve: AnimationCurve,
    /// 当前状态
    state: AnimationState,
    /// 当前进度（0.0 - 1.0，已应用缓动）
    progress: Progress,
    /// 已经过的时间
    elapsed: f32,
    /// 进度回调
    progress_handler: Option<ProgressHandler>,
}

impl std::fmt::Debug for SmoothAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmoothAnimation")
            .field("duration", &self.duration)
            .field("curve", &self.curve)
            .field("state", &self.state)
            .field("progress", &self.progress)
            .field("elapsed", &self.elapsed)
            .field("has_handler", &self.progress_handler.is_some())
            .finish()
    }
}

impl SmoothAnimation {
    /// 创建新的动画（未启动）
    pub fn new(duration: f32, curve: AnimationCurve) -> Self {
        Self {
            duration,
            curve,
            state: AnimationState::Idle,
            progress: 0.0,
            elapsed: 0.0,
            progress_handler: None,
        }
    }

    /// 设置进度回调
    pub fn set_progress_handler(&mut self, handler: impl FnMut(Progress) + 'static) {
        self.progress_handler = Some(Box::new(handler));
    }

    /// 摘掉进度回调并返回
    pub fn take_progress_handler(&mut self) -> Option<ProgressHandler> {
        self.progress_handler.take()
    }

    /// 启动动画
    ///
    /// 进度归零并立即上报一帧 0.0。已在运行时忽略。
    pub fn start(&mut self) {
        if self.state.is_active() {
            warn!("SmoothAnimation 已在运行，忽略重复 start");
            return;
        }

        self.state = AnimationState::Running;
        self.elapsed = 0.0;
        self.progress = 0.0;
        self.emit_progress();
    }

    /// 停止动画
    ///
    /// 停在当前进度，之后不再上报进度，也不会产生完成事件。
    /// 仍挂着的回调会收到最后一帧（当前进度）。
    pub fn stop(&mut self) {
        if !self.state.is_active() {
            return;
        }

        self.state = AnimationState::Stopped;
        self.emit_progress();
    }

    /// 推进动画
    ///
    /// # 参数
    /// - `dt`: 距上次推进经过的时间（秒），负值按 0 处理
    pub fn advance(&mut self, dt: f32) -> Tick {
        if !self.state.is_active() {
            return Tick::Idle;
        }

        self.elapsed += dt.max(0.0);

        // 非正（或 NaN）时长直接视为完成
        let finished =
            self.duration.is_nan() || self.duration <= 0.0 || self.elapsed >= self.duration;
        if finished {
            self.progress = 1.0;
            self.state = AnimationState::Finished;
            self.emit_progress();
            Tick::Completed
        } else {
            self.progress = self.curve.apply(self.elapsed / self.duration);
            self.emit_progress();
            Tick::Progressed
        }
    }

    fn emit_progress(&mut self) {
        let progress = self.progress;
        if let Some(handler) = self.progress_handler.as_mut() {
            handler(progress);
        }
    }

    /// 是否正在插值
    pub fn is_animating(&self) -> bool {
        self.state.is_active()
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn curve(&self) -> AnimationCurve {
        self.curve
    }
}
