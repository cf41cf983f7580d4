//! # AnimationLoop 模块
//!
//! 增长段与衰减段交替进行的循环动画。
//!
//! ## 状态机
//!
//! ```text
//!   start()            完成                 完成
//! ─────────► Increase ──────► Decrease ──────► Increase ──► …
//!               ▲                                  │
//!               └──────────── reset() ◄────────────┘
//! ```
//!
//! - 任意时刻只持有一个 [`DirectedAnimation`]，到段尾时整体替换，从不叠加
//! - 段切换（翻转方向、创建新段、启动）在一次 `advance` 内完成，
//!   外部观察不到两段之间 `is_animating() == false` 的空档
//! - `reset()` 先摘掉当前段的进度回调再停止它，不会漏出停止帧

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::smooth::{Progress, SmoothAnimation, Tick};
use crate::{AnimationCurve, Direction, LoopConfiguration};

/// 循环进度回调：`(段内进度, 当前方向)`
pub type LoopProgressHandler = Box<dyn FnMut(Progress, Direction)>;

/// 循环回调槽，由循环持有，各段只保留弱引用
type HandlerSlot = Rc<RefCell<Option<LoopProgressHandler>>>;

/// 带方向的单段动画
#[derive(Debug)]
pub struct DirectedAnimation {
    animation: SmoothAnimation,
    direction: Direction,
}

impl DirectedAnimation {
    pub fn new(animation: SmoothAnimation, direction: Direction) -> Self {
        Self {
            animation,
            direction,
        }
    }

    pub fn start(&mut self) {
        self.animation.start();
    }

    /// 取消本段
    ///
    /// 先摘掉进度回调，再停止动画，停止帧不会被转发出去。
    pub fn cancel(&mut self) {
        self.animation.take_progress_handler();
        self.animation.stop();
    }

    pub fn advance(&mut self, dt: f32) -> Tick {
        self.animation.advance(dt)
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_animating()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn animation(&self) -> &SmoothAnimation {
        &self.animation
    }
}

/// 循环动画
pub struct AnimationLoop {
    /// 两段配置
    configuration: LoopConfiguration,
    /// 当前段
    running: DirectedAnimation,
    /// 外部进度回调
    progress_handler: HandlerSlot,
    /// 自上次 reset 以来自然完成的段数
    completed_legs: u64,
}

impl std::fmt::Debug for AnimationLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationLoop")
            .field("configuration", &self.configuration)
            .field("running", &self.running)
            .field("completed_legs", &self.completed_legs)
            .finish()
    }
}

impl Default for AnimationLoop {
    /// 两段各 1 秒，缓入缓出
    fn default() -> Self {
        Self::with_configuration(LoopConfiguration::default())
    }
}

impl AnimationLoop {
    /// 创建循环
    ///
    /// # 参数
    /// - `configuration`: 两段的时长与曲线
    /// - `start_with`: 第一段的方向
    pub fn new(configuration: LoopConfiguration, start_with: Direction) -> Self {
        let progress_handler: HandlerSlot = Rc::new(RefCell::new(None));
        let running = Self::create_animation(&configuration, &progress_handler, start_with);

        Self {
            configuration,
            running,
            progress_handler,
            completed_legs: 0,
        }
    }

    /// 从增长段开始的循环
    pub fn with_configuration(configuration: LoopConfiguration) -> Self {
        Self::new(configuration, Direction::Increase)
    }

    /// 由四个参数构造
    pub fn with_steps(
        increase_duration: f32,
        increase_curve: AnimationCurve,
        decrease_duration: f32,
        decrease_curve: AnimationCurve,
    ) -> Self {
        Self::with_configuration(LoopConfiguration::with_steps(
            increase_duration,
            increase_curve,
            decrease_duration,
            decrease_curve,
        ))
    }

    /// 两段使用相同的时长和曲线
    pub fn uniform(duration: f32, curve: AnimationCurve) -> Self {
        Self::with_configuration(LoopConfiguration::uniform(duration, curve))
    }

    fn create_animation(
        configuration: &LoopConfiguration,
        slot: &HandlerSlot,
        direction: Direction,
    ) -> DirectedAnimation {
        let mut animation = configuration.step(direction).smooth_animation();

        let slot = Rc::downgrade(slot);
        animation.set_progress_handler(move |progress| {
            let Some(slot) = slot.upgrade() else {
                return;
            };
            if let Some(handler) = slot.borrow_mut().as_mut() {
                handler(progress, direction);
            }
        });

        DirectedAnimation::new(animation, direction)
    }

    /// 设置进度回调
    pub fn set_progress_handler(&mut self, handler: impl FnMut(Progress, Direction) + 'static) {
        *self.progress_handler.borrow_mut() = Some(Box::new(handler));
    }

    /// 移除进度回调
    pub fn clear_progress_handler(&mut self) {
        self.progress_handler.borrow_mut().take();
    }

    /// 启动循环
    ///
    /// # Panics
    ///
    /// 循环已在运行时调用属于调用方的逻辑错误，直接 panic。
    pub fn start(&mut self) {
        assert!(!self.is_animating(), "AnimationLoop 正在运行，不能重复 start");

        debug!(direction = %self.running.direction(), "动画循环启动");
        self.running.start();
    }

    /// 重置循环
    ///
    /// 取消当前段（不漏出停止帧），换成一个未启动的增长段。任何状态下都可以调用。
    pub fn reset(&mut self) {
        self.running.cancel();
        self.running = Self::create_animation(
            &self.configuration,
            &self.progress_handler,
            Direction::Increase,
        );
        self.completed_legs = 0;
        debug!("动画循环已重置");
    }

    /// 推进循环
    ///
    /// 当前段自然完成时，在同一次调用里切换到反方向的新段并启动。
    /// 超出段尾的剩余时间不会带入下一段。
    ///
    /// # 返回
    /// 当前段本次推进的结果；`Tick::Completed` 表示发生了段切换。
    pub fn advance(&mut self, dt: f32) -> Tick {
        let tick = self.running.advance(dt);
        if tick == Tick::Completed {
            self.start_next_animation();
        }
        tick
    }

    fn start_next_animation(&mut self) {
        self.completed_legs += 1;

        let next_direction = self.running.direction().opposite();
        self.running =
            Self::create_animation(&self.configuration, &self.progress_handler, next_direction);

        debug!(
            direction = %next_direction,
            completed_legs = self.completed_legs,
            "动画循环切换方向"
        );
        self.running.start();
    }

    /// 当前段是否正在插值
    pub fn is_animating(&self) -> bool {
        self.running.is_animating()
    }

    pub fn current_direction(&self) -> Direction {
        self.running.direction()
    }

    /// 当前段的进度
    pub fn progress(&self) -> Progress {
        self.running.animation().progress()
    }

    pub fn configuration(&self) -> &LoopConfiguration {
        &self.configuration
    }

    /// 自上次 reset 以来自然完成的段数
    pub fn completed_legs(&self) -> u64 {
        self.completed_legs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Frames = Rc<RefCell<Vec<(Progress, Direction)>>>;

    fn recorded(animation_loop: &mut AnimationLoop) -> Frames {
        let frames: Frames = Rc::new(RefCell::new(Vec::new()));
        let sink = frames.clone();
        animation_loop.set_progress_handler(move |p, d| sink.borrow_mut().push((p, d)));
        frames
    }

    #[test]
    fn test_loop_creation() {
        let animation_loop = AnimationLoop::default();
        assert!(!animation_loop.is_animating());
        assert_eq!(animation_loop.current_direction(), Direction::Increase);
        assert_eq!(animation_loop.completed_legs(), 0);
        assert_eq!(
            *animation_loop.configuration(),
            LoopConfiguration::uniform(1.0, AnimationCurve::EaseInOut)
        );
    }

    #[test]
    fn test_start_with_decrease() {
        let mut animation_loop =
            AnimationLoop::new(LoopConfiguration::default(), Direction::Decrease);
        let frames = recorded(&mut animation_loop);

        animation_loop.start();
        assert_eq!(frames.borrow()[0], (0.0, Direction::Decrease));
    }

    #[test]
    fn test_start_emits_initial_frame() {
        let mut animation_loop = AnimationLoop::uniform(1.0, AnimationCurve::Linear);
        let frames = recorded(&mut animation_loop);

        animation_loop.start();
        assert!(animation_loop.is_animating());
        assert_eq!(*frames.borrow(), vec![(0.0, Direction::Increase)]);
    }

    #[test]
    fn test_hand_off_flips_direction() {
        let mut animation_loop = AnimationLoop::with_steps(
            1.0,
            AnimationCurve::Linear,
            0.5,
            AnimationCurve::Linear,
        );
        let frames = recorded(&mut animation_loop);
        animation_loop.start();

        assert_eq!(animation_loop.advance(0.5), Tick::Progressed);
        assert_eq!(animation_loop.advance(0.5), Tick::Completed);

        // 段切换后立即处于衰减段，并且仍在运行
        assert!(animation_loop.is_animating());
        assert_eq!(animation_loop.current_direction(), Direction::Decrease);
        assert_eq!(animation_loop.progress(), 0.0);
        assert_eq!(animation_loop.completed_legs(), 1);

        assert_eq!(
            *frames.borrow(),
            vec![
                (0.0, Direction::Increase),
                (0.5, Direction::Increase),
                (1.0, Direction::Increase),
                (0.0, Direction::Decrease),
            ]
        );

        // 衰减段 0.5 秒
        assert_eq!(animation_loop.advance(0.5), Tick::Completed);
        assert_eq!(animation_loop.current_direction(), Direction::Increase);
        assert_eq!(animation_loop.completed_legs(), 2);
    }

    #[test]
    #[should_panic(expected = "不能重复 start")]
    fn test_double_start_panics() {
        let mut animation_loop = AnimationLoop::default();
        animation_loop.start();
        animation_loop.start();
    }

    #[test]
    fn test_reset_suppresses_trailing_frame() {
        let mut animation_loop = AnimationLoop::uniform(1.0, AnimationCurve::Linear);
        let frames = recorded(&mut animation_loop);

        animation_loop.start();
        animation_loop.advance(0.4);
        let before = frames.borrow().len();

        animation_loop.reset();
        assert!(!animation_loop.is_animating());
        assert_eq!(frames.borrow().len(), before);

        for _ in 0..10 {
            animation_loop.advance(0.5);
        }
        assert_eq!(frames.borrow().len(), before);
    }

    #[test]
    fn test_reset_returns_to_increase() {
        let mut animation_loop =
            AnimationLoop::new(LoopConfiguration::default(), Direction::Decrease);
        animation_loop.start();
        animation_loop.reset();

        assert_eq!(animation_loop.current_direction(), Direction::Increase);
        assert_eq!(animation_loop.progress(), 0.0);

        // reset 后可以再次 start
        animation_loop.start();
        assert!(animation_loop.is_animating());
    }

    #[test]
    fn test_reset_before_start_is_safe() {
        let mut animation_loop = AnimationLoop::default();
        animation_loop.reset();
        animation_loop.reset();
        assert!(!animation_loop.is_animating());
    }

    #[test]
    fn test_clear_progress_handler() {
        let mut animation_loop = AnimationLoop::uniform(1.0, AnimationCurve::Linear);
        let frames = recorded(&mut animation_loop);

        animation_loop.start();
        animation_loop.clear_progress_handler();
        animation_loop.advance(0.5);

        assert_eq!(frames.borrow().len(), 1);
        assert!(animation_loop.is_animating());
    }
}
