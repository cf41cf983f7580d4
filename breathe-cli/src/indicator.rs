//! # Indicator 模块
//!
//! 无界面的呼吸指示器，扮演视图的角色：
//! - 显示时启动循环，隐藏时重置循环
//! - 在数值回调里记录最新的呼吸值并标记需要重绘
//!
//! 绘制层拿 [`BreathingIndicator::inset`] 决定图形向内收缩多少。

use std::cell::Cell;
use std::rc::Rc;

use looping_animation::{Direction, Tick, ValueAnimationLoop};
use tracing::debug;

/// 呼吸指示器
#[derive(Debug)]
pub struct BreathingIndicator {
    animation: ValueAnimationLoop,
    /// 最新的呼吸值
    breathing_value: Rc<Cell<f32>>,
    /// 需要重绘的次数
    redraws: Rc<Cell<u64>>,
    visible: bool,
}

impl BreathingIndicator {
    pub fn new(mut animation: ValueAnimationLoop) -> Self {
        let breathing_value = Rc::new(Cell::new(0.0));
        let redraws = Rc::new(Cell::new(0));

        let value_sink = breathing_value.clone();
        let redraw_sink = redraws.clone();
        animation.set_progress_handler(move |value| {
            value_sink.set(value);
            redraw_sink.set(redraw_sink.get() + 1);
        });

        Self {
            animation,
            breathing_value,
            redraws,
            visible: false,
        }
    }

    /// 切换可见性
    ///
    /// 变为可见时启动循环，变为隐藏时重置循环；状态不变时不做任何事。
    pub fn set_visible(&mut self, visible: bool) {
        if self.visible == visible {
            return;
        }
        self.visible = visible;

        if visible {
            debug!("指示器显示，启动呼吸循环");
            self.animation.start();
        } else {
            debug!("指示器隐藏，重置呼吸循环");
            self.animation.reset();
        }
    }

    /// 推进一帧
    pub fn tick(&mut self, dt: f32) -> Tick {
        self.animation.advance(dt)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_animating()
    }

    /// 最新的呼吸值；隐藏后保持最后一次收到的值
    pub fn breathing_value(&self) -> f32 {
        self.breathing_value.get()
    }

    /// 图形的内缩量：`max - breathing_value`
    pub fn inset(&self) -> f32 {
        self.animation.value() - self.breathing_value()
    }

    pub fn direction(&self) -> Direction {
        self.animation.current_direction()
    }

    pub fn redraw_count(&self) -> u64 {
        self.redraws.get()
    }
}
