//! # breathe
//!
//! 呼吸动画的命令行驱动：按固定帧率推进循环，输出每个采样点的呼吸值。
//!
//! ## 用法
//!
//! ```bash
//! # 默认：吸气 3 秒、呼气 2 秒、幅度 40，模拟 5 秒
//! cargo run -p breathe-cli
//!
//! # 指定配置文件并覆盖部分参数
//! cargo run -p breathe-cli -- --config breathe.json --value 20 --seconds 12
//!
//! # 按真实时间运行，3 秒后隐藏指示器
//! cargo run -p breathe-cli -- --realtime --hide-after 3
//!
//! # 生成 / 检查配置文件
//! cargo run -p breathe-cli -- init-config breathe.json
//! cargo run -p breathe-cli -- check breathe.json
//! ```

mod config;
mod indicator;
mod run;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use looping_animation::{AnimationCurve, Direction, FrameClock};
use tracing::{Level, debug, info};

use crate::config::BreathingConfig;
use crate::indicator::BreathingIndicator;
use crate::run::{RunOptions, Sample};

#[derive(Parser)]
#[command(name = "breathe")]
#[command(about = "呼吸动画驱动 - 在 0 与最大值之间循环输出数值")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// 日志级别（trace/debug/info/warn/error）
    #[arg(long, default_value = "info", global = true)]
    log_level: Level,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Args)]
struct RunArgs {
    /// 配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 呼吸幅度
    #[arg(long)]
    value: Option<f32>,

    /// 增长段时长（秒）
    #[arg(long)]
    increase: Option<f32>,

    /// 衰减段时长（秒）
    #[arg(long)]
    decrease: Option<f32>,

    /// 两段共用的动画曲线（linear / ease-in / ease-out / ease-in-out）
    #[arg(long, value_parser = parse_curve)]
    curve: Option<AnimationCurve>,

    /// 帧率
    #[arg(long)]
    fps: Option<u32>,

    /// 从衰减段开始
    #[arg(long)]
    start_decreasing: bool,

    /// 运行时长（秒）
    #[arg(short, long, default_value_t = 5.0)]
    seconds: f32,

    /// 每隔多少帧输出一次
    #[arg(long, default_value_t = 6)]
    every: u64,

    /// 在第几秒隐藏指示器（重置循环）
    #[arg(long)]
    hide_after: Option<f32>,

    /// 按真实时间运行
    #[arg(long)]
    realtime: bool,

    /// 以 JSON Lines 输出采样
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// 写出默认配置文件
    InitConfig {
        /// 输出路径
        #[arg(default_value = "breathe.json")]
        path: PathBuf,
    },

    /// 检查配置文件
    Check {
        /// 配置文件路径
        path: PathBuf,
    },
}

fn parse_curve(s: &str) -> Result<AnimationCurve, String> {
    let name = s.trim().to_ascii_lowercase().replace('-', "_");
    serde_json::from_value(serde_json::Value::String(name))
        .map_err(|_| format!("未知的动画曲线: {s}"))
}

fn init_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    if let Err(e) = real_main(cli) {
        eprintln!("breathe error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn real_main(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::InitConfig { path }) => {
            BreathingConfig::default()
                .save(&path)
                .with_context(|| format!("写出配置失败: {}", path.display()))?;
            info!(path = %path.display(), "已写出默认配置");
        }
        Some(Commands::Check { path }) => {
            let config = BreathingConfig::load_strict(&path)
                .with_context(|| format!("读取配置失败: {}", path.display()))?;
            config
                .validate()
                .with_context(|| format!("配置无效: {}", path.display()))?;
            println!("{}: ok", path.display());
        }
        None => simulate(cli.run)?,
    }

    Ok(())
}

/// 合并配置：命令行 > 配置文件 > 默认值
fn resolve_config(args: &RunArgs) -> BreathingConfig {
    let mut config = match &args.config {
        Some(path) => BreathingConfig::load(path),
        None => BreathingConfig::default(),
    };

    if let Some(value) = args.value {
        config.value = value;
    }
    if let Some(duration) = args.increase {
        config.animation.increase.duration = duration;
    }
    if let Some(duration) = args.decrease {
        config.animation.decrease.duration = duration;
    }
    if let Some(curve) = args.curve {
        config.animation.increase.curve = curve;
        config.animation.decrease.curve = curve;
    }
    if let Some(fps) = args.fps {
        config.frame_rate = fps;
    }
    if args.start_decreasing {
        config.start_with = Direction::Decrease;
    }

    config
}

fn simulate(args: RunArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args);
    config.validate().context("运行配置无效")?;

    info!(
        value = config.value,
        increase = config.animation.increase.duration,
        decrease = config.animation.decrease.duration,
        frame_rate = config.frame_rate,
        start_with = %config.start_with,
        "开始呼吸循环"
    );

    let mut indicator = BreathingIndicator::new(config.value_loop());
    let mut clock = FrameClock::new(config.frame_rate);
    let options = RunOptions {
        seconds: args.seconds,
        sample_every: args.every,
        hide_after: args.hide_after,
        realtime: args.realtime,
    };

    let json = args.json;
    let mut stdout = io::stdout().lock();
    let result = run::run(&mut indicator, &mut clock, &options, |sample| {
        Ok(print_sample(&mut stdout, sample, json)?)
    });
    let summary = match result {
        Ok(summary) => summary,
        Err(e) if is_broken_pipe(&e) => {
            debug!("输出端已关闭，提前结束");
            return Ok(());
        }
        Err(e) => return Err(e).context("输出采样失败"),
    };

    info!(
        frames = summary.frames,
        hand_offs = summary.hand_offs,
        redraws = summary.redraws,
        hidden_at = ?summary.hidden_at,
        "呼吸循环结束"
    );

    Ok(())
}

fn print_sample(out: &mut impl Write, sample: &Sample, json: bool) -> io::Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(sample)?)
    } else {
        writeln!(
            out,
            "{:>6} {:>8.3}s {:<8} {:>9.3} {:>9.3}{}",
            sample.frame,
            sample.time,
            sample.direction.to_string(),
            sample.value,
            sample.inset,
            if sample.animating { "" } else { "  (stopped)" },
        )
    }
}

/// 下游关闭了管道（如 `breathe | head`），视为正常结束
fn is_broken_pipe(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
}
