//! # Run 模块
//!
//! 按固定帧率驱动呼吸指示器，并按间隔采样输出。
//!
//! - 模拟模式：不等待，连续推进所有帧
//! - 实时模式：每帧睡眠一个帧间隔，按实际经过的时间补帧

use std::thread;
use std::time::Instant;

use looping_animation::{Direction, FrameClock, Tick};
use serde::Serialize;

use crate::indicator::BreathingIndicator;

/// 运行参数
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// 总时长（秒）
    pub seconds: f32,
    /// 每隔多少帧采样一次
    pub sample_every: u64,
    /// 在第几秒隐藏指示器
    pub hide_after: Option<f32>,
    /// 是否按真实时间运行
    pub realtime: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            seconds: 5.0,
            sample_every: 6,
            hide_after: None,
            realtime: false,
        }
    }
}

/// 一次采样
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub frame: u64,
    /// 虚拟时间（秒）
    pub time: f32,
    pub direction: Direction,
    pub value: f32,
    pub inset: f32,
    pub visible: bool,
    pub animating: bool,
}

/// 运行统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub hand_offs: u64,
    pub redraws: u64,
    pub hidden_at: Option<u64>,
}

/// 显示指示器并推进到结束
///
/// 采样回调返回错误时立即停止推进并把错误向上传递。
pub fn run(
    indicator: &mut BreathingIndicator,
    clock: &mut FrameClock,
    options: &RunOptions,
    mut on_sample: impl FnMut(&Sample) -> anyhow::Result<()>,
) -> anyhow::Result<RunSummary> {
    let total_frames = clock.frames_in(options.seconds);
    let hide_frame = options.hide_after.map(|seconds| clock.frames_in(seconds).max(1));
    let sample_every = options.sample_every.max(1);
    let dt = clock.frame_interval();

    let mut summary = RunSummary::default();
    let mut frame = 0;
    let mut last_wake = Instant::now();

    indicator.set_visible(true);

    while frame < total_frames {
        let due = if options.realtime {
            thread::sleep(clock.frame_duration());
            let now = Instant::now();
            let due = clock.accumulate(now - last_wake);
            last_wake = now;
            due
        } else {
            1
        };

        for _ in 0..due {
            if frame >= total_frames {
                break;
            }
            frame += 1;

            if hide_frame == Some(frame) {
                indicator.set_visible(false);
                summary.hidden_at = Some(frame);
            }

            if indicator.tick(dt) == Tick::Completed {
                summary.hand_offs += 1;
            }

            if frame % sample_every == 0 || frame == total_frames {
                on_sample(&Sample {
                    frame,
                    time: frame as f32 * dt,
                    direction: indicator.direction(),
                    value: indicator.breathing_value(),
                    inset: indicator.inset(),
                    visible: indicator.is_visible(),
                    animating: indicator.is_animating(),
                })?;
            }
        }
    }

    summary.frames = frame;
    summary.redraws = indicator.redraw_count();
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use looping_animation::{AnimationCurve, ValueAnimationLoop};

    fn indicator() -> BreathingIndicator {
        BreathingIndicator::new(ValueAnimationLoop::new(
            40.0,
            0.5,
            AnimationCurve::Linear,
            0.5,
            AnimationCurve::Linear,
        ))
    }

    #[test]
    fn test_simulated_run() {
        let mut indicator = indicator();
        let mut clock = FrameClock::new(10);
        let options = RunOptions {
            seconds: 2.0,
            sample_every: 5,
            ..RunOptions::default()
        };

        let mut samples = Vec::new();
        let summary = run(&mut indicator, &mut clock, &options, |s| {
            samples.push(*s);
            Ok(())
        })
        .unwrap();

        assert_eq!(summary.frames, 20);
        assert_eq!(samples.len(), 4);
        assert!(summary.hand_offs >= 3);
        assert!(samples.iter().all(|s| (0.0..=40.0).contains(&s.value)));
        assert!(samples.iter().all(|s| s.animating));
        assert_eq!(summary.hidden_at, None);
        // 启动帧 + 每帧一次 + 每次段切换多出的起始帧
        assert_eq!(summary.redraws, 1 + summary.frames + summary.hand_offs);
    }

    #[test]
    fn test_hide_after_stops_redraws() {
        let mut indicator = indicator();
        let mut clock = FrameClock::new(10);
        let options = RunOptions {
            seconds: 2.0,
            sample_every: 1,
            hide_after: Some(0.3),
            realtime: false,
        };

        let mut samples = Vec::new();
        let summary = run(&mut indicator, &mut clock, &options, |s| {
            samples.push(*s);
            Ok(())
        })
        .unwrap();

        assert_eq!(summary.hidden_at, Some(3));
        assert_eq!(summary.hand_offs, 0);
        // 启动帧 + 隐藏前的两帧
        assert_eq!(summary.redraws, 3);
        assert!(samples[2..].iter().all(|s| !s.animating && !s.visible));
        assert!(!indicator.is_visible());
    }

    #[test]
    fn test_realtime_run() {
        let mut indicator = indicator();
        let mut clock = FrameClock::new(100);
        let options = RunOptions {
            seconds: 0.05,
            sample_every: 2,
            hide_after: None,
            realtime: true,
        };

        let mut samples = Vec::new();
        let summary = run(&mut indicator, &mut clock, &options, |s| {
            samples.push(*s);
            Ok(())
        })
        .unwrap();

        assert_eq!(summary.frames, clock.frames_in(0.05));
        assert_eq!(summary.frames, 5);
        // 每 2 帧一次，外加最后一帧
        let frames: Vec<u64> = samples.iter().map(|s| s.frame).collect();
        assert_eq!(frames, vec![2, 4, 5]);
        assert!(samples.iter().all(|s| s.animating));
    }

    #[test]
    fn test_sample_error_stops_run() {
        let mut indicator = indicator();
        let mut clock = FrameClock::new(10);
        let options = RunOptions {
            seconds: 60.0,
            sample_every: 1,
            ..RunOptions::default()
        };

        let mut calls = 0;
        let result = run(&mut indicator, &mut clock, &options, |_| {
            calls += 1;
            if calls == 3 {
                bail!("输出已关闭");
            }
            Ok(())
        });

        assert!(result.is_err());
        assert_eq!(calls, 3);
        // 出错后不再推进：启动帧 + 3 帧
        assert_eq!(indicator.redraw_count(), 4);
    }

    #[test]
    fn test_sample_serializes() {
        let sample = Sample {
            frame: 1,
            time: 0.5,
            direction: Direction::Decrease,
            value: 2.0,
            inset: 38.0,
            visible: true,
            animating: true,
        };
        let json = serde_json::to_string(&sample).unwrap();
        assert_eq!(
            json,
            r#"{"frame":1,"time":0.5,"direction":"decrease","value":2.0,"inset":38.0,"visible":true,"animating":true}"#
        );
    }
}
