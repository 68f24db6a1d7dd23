//! dpres-grade 的日志输出.
//!
//! 评级结果写到 stdout, 日志因此走另外两路:
//! - stderr: 彩色, 平时只显示警告, `-v` 逐级放开, `--quiet` 关闭
//! - logs/dpres-grade.{date}.log: 按天滚动, 记录每次评级, `DPRES_LOG` 可覆盖级别
//!
//! 库 crate 经 `log` 发出的记录由 tracing-subscriber 的 log 桥接收.

use std::sync::OnceLock;

use anyhow::{Context, Result};
use chrono::Local;
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, FormatEvent, FormatFields, format::Writer},
    layer::{Layer, SubscriberExt},
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// 日志目录, 相对当前工作目录
const LOG_DIR: &str = "logs";

/// 覆盖日志文件级别的环境变量
const LOG_ENV: &str = "DPRES_LOG";

/// 进程退出前必须保留, 否则非阻塞写线程会丢弃尾部记录
static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// stderr 上的级别
fn stderr_directive(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "off";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// 日志文件的级别, 环境变量优先
fn file_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(match verbosity {
            0 => "info",
            1 => "debug",
            _ => "trace",
        })
    })
}

/// 安装全局订阅器
///
/// `file_prefix` 决定日志文件名, `verbosity` 为 `-v` 出现的次数.
/// 订阅器已存在或日志目录不可写时返回错误, 调用方可以忽略并继续评级.
pub fn init(file_prefix: &str, verbosity: u8, quiet: bool) -> Result<()> {
    std::fs::create_dir_all(LOG_DIR).with_context(|| format!("无法创建日志目录 {LOG_DIR}"))?;

    let appender = tracing_appender::rolling::RollingFileAppender::builder()
        .rotation(tracing_appender::rolling::Rotation::DAILY)
        .filename_prefix(file_prefix)
        .filename_suffix("log")
        .build(LOG_DIR)
        .context("无法打开滚动日志文件")?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    FILE_GUARD.set(guard).ok();

    let stderr_layer = fmt::Layer::default()
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .event_format(StderrFormat)
        .with_filter(EnvFilter::new(stderr_directive(verbosity, quiet)));

    let file_layer = fmt::Layer::default()
        .with_writer(writer)
        .with_ansi(false)
        .event_format(LogFileFormat)
        .with_filter(file_filter(verbosity));

    Registry::default()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("全局日志订阅器已被安装")
}

/// stderr 行格式: `HH:MM:SS.mmm LEVEL 消息`, 级别着色
struct StderrFormat;

impl<S, N> FormatEvent<S, N> for StderrFormat
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let level = *event.metadata().level();
        let color = match level {
            tracing::Level::ERROR => "\x1b[31m",
            tracing::Level::WARN => "\x1b[33m",
            tracing::Level::INFO => "\x1b[32m",
            _ => "\x1b[2m",
        };
        write!(
            writer,
            "{} {color}{level:>5}\x1b[0m ",
            Local::now().format("%H:%M:%S%.3f")
        )?;
        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// 日志文件行格式: `YYYY-MM-DD HH:MM:SS.mmm LEVEL target: 消息`
struct LogFileFormat;

impl<S, N> FormatEvent<S, N> for LogFileFormat
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        write!(
            writer,
            "{} {:>5} {}: ",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            meta.level(),
            meta.target()
        )?;
        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_directive() {
        assert_eq!(stderr_directive(0, false), "warn");
        assert_eq!(stderr_directive(2, false), "debug");
        assert_eq!(stderr_directive(5, false), "trace");
        assert_eq!(stderr_directive(3, true), "off");
    }
}
