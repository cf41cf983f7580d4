//! # ValueAnimationLoop 模块
//!
//! 把循环进度翻译成 `0..=value` 之间的数值：增长段 0 → value，衰减段 value → 0。
//!
//! ```rust,ignore
//! let mut breathing = ValueAnimationLoop::new(40.0, 3.0, AnimationCurve::EaseInOut, 2.0, AnimationCurve::EaseInOut);
//! breathing.set_progress_handler(|value| view.set_inset(value));
//! breathing.start();
//!
//! // 每帧
//! breathing.advance(dt);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::smooth::{Progress, Tick};
use crate::{AnimationCurve, AnimationLoop, Direction, LoopConfiguration};

/// 数值回调
pub type ValueHandler = Box<dyn FnMut(f32)>;

/// 把 `(进度, 方向)` 映射为 `[0, value]` 内的数值
///
/// - 增长段：`progress * value`
/// - 衰减段：`value - progress * value`
pub fn map_progress(progress: Progress, direction: Direction, value: f32) -> f32 {
    match direction {
        Direction::Increase => progress * value,
        Direction::Decrease => value - (progress * value),
    }
}

/// 数值循环动画
pub struct ValueAnimationLoop {
    animation_loop: AnimationLoop,
    value: f32,
    progress_handler: Rc<RefCell<Option<ValueHandler>>>,
}

impl std::fmt::Debug for ValueAnimationLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueAnimationLoop")
            .field("value", &self.value)
            .field("animation_loop", &self.animation_loop)
            .finish()
    }
}

impl ValueAnimationLoop {
    /// 由四个参数构造
    ///
    /// 常规取值为两段各 1 秒、缓入缓出，见 [`ValueAnimationLoop::with_value`]。
    pub fn new(
        value: f32,
        increase_duration: f32,
        increase_curve: AnimationCurve,
        decrease_duration: f32,
        decrease_curve: AnimationCurve,
    ) -> Self {
        Self::with_configuration(
            value,
            LoopConfiguration::with_steps(
                increase_duration,
                increase_curve,
                decrease_duration,
                decrease_curve,
            ),
        )
    }

    /// 两段各 1 秒、缓入缓出
    pub fn with_value(value: f32) -> Self {
        Self::with_configuration(value, LoopConfiguration::default())
    }

    pub fn with_configuration(value: f32, configuration: LoopConfiguration) -> Self {
        Self::from_loop(value, AnimationLoop::with_configuration(configuration))
    }

    /// 包装一个已有的循环
    ///
    /// 会接管该循环的进度回调。
    pub fn from_loop(value: f32, mut animation_loop: AnimationLoop) -> Self {
        let progress_handler: Rc<RefCell<Option<ValueHandler>>> = Rc::new(RefCell::new(None));

        let slot = Rc::downgrade(&progress_handler);
        animation_loop.set_progress_handler(move |progress, direction| {
            let Some(slot) = slot.upgrade() else {
                return;
            };
            if let Some(handler) = slot.borrow_mut().as_mut() {
                handler(map_progress(progress, direction, value));
            }
        });

        Self {
            animation_loop,
            value,
            progress_handler,
        }
    }

    /// 设置数值回调
    ///
    /// 回调在 `start` / `advance` 内同步触发，适合直接在里面标记重绘。
    pub fn set_progress_handler(&mut self, handler: impl FnMut(f32) + 'static) {
        *self.progress_handler.borrow_mut() = Some(Box::new(handler));
    }

    /// 移除数值回调
    pub fn clear_progress_handler(&mut self) {
        self.progress_handler.borrow_mut().take();
    }

    /// 启动
    ///
    /// # Panics
    ///
    /// 已在运行时 panic，同 [`AnimationLoop::start`]。
    pub fn start(&mut self) {
        self.animation_loop.start();
    }

    pub fn reset(&mut self) {
        self.animation_loop.reset();
    }

    pub fn advance(&mut self, dt: f32) -> Tick {
        self.animation_loop.advance(dt)
    }

    pub fn is_animating(&self) -> bool {
        self.animation_loop.is_animating()
    }

    /// 最大值
    pub fn value(&self) -> f32 {
        self.value
    }

    /// 按当前进度与方向计算出的数值
    pub fn current_value(&self) -> f32 {
        map_progress(
            self.animation_loop.progress(),
            self.animation_loop.current_direction(),
            self.value,
        )
    }

    pub fn current_direction(&self) -> Direction {
        self.animation_loop.current_direction()
    }

    pub fn animation_loop(&self) -> &AnimationLoop {
        &self.animation_loop
    }
}
