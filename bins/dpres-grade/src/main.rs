//! dpres-grade - 文件格式保存等级评定工具
//!
//! 根据文件的 MIME 类型、版本和流描述给出数字保存等级, 并可列出词表中的格式和容器.

mod logging;
mod request;

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use rayon::prelude::*;
use serde::Serialize;

use dpres_core::Grade;
use dpres_format::loader::{
    builtin_container_streams, builtin_file_formats, read_container_streams, read_file_formats,
};
use dpres_format::selection::{
    containers_streams_grading, flatten_versions, mimetypes_grading, select_formats,
};
use dpres_format::{
    ContainerRecord, FileFormatRecord, FormatSelection, StreamFormat, Vocabulary,
};
use dpres_grading::{Assessment, Grader, GraderConfig, Verdict};

use crate::request::{GradeRequest, collect_streams, default_version, read_batch};

/// dpres 文件格式评级工具
#[derive(Parser, Debug)]
#[command(name = "dpres-grade", version, about = "数字保存文件格式等级评定工具")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// 文件格式词表 (JSON), 缺省使用内置词表
    #[arg(long, global = true)]
    file_formats: Option<PathBuf>,

    /// 容器内嵌流词表 (JSON), 缺省使用内置词表
    #[arg(long, global = true)]
    containers: Option<PathBuf>,

    /// 评级配置 (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 日志详细程度 (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// 静默模式 (不在控制台输出日志)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 评定单个文件
    Grade {
        /// 文件 MIME 类型
        mimetype: String,

        /// 文件版本
        #[arg(long, default_value_t = default_version())]
        version: String,

        /// 流描述 INDEX=MIMETYPE[;VERSION[;CHARSET]], 可重复
        #[arg(long = "stream", value_name = "SPEC")]
        streams: Vec<String>,

        /// 从 JSON 文件读取流描述
        #[arg(long = "streams", value_name = "FILE")]
        streams_file: Option<PathBuf>,

        /// 列出每条适用规则给出的等级
        #[arg(long)]
        explain: bool,

        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,
    },
    /// 并行评定 JSON 文件中的一批请求
    Batch {
        /// 批量请求文件 (JSON 数组)
        file: PathBuf,

        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,
    },
    /// 列出文件格式
    Formats {
        /// 包含已退出规范的版本
        #[arg(long)]
        deprecated: bool,

        /// 包含未正式收录的版本
        #[arg(long)]
        unofficial: bool,

        /// 每个版本单独列出
        #[arg(long)]
        versions_separately: bool,

        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,
    },
    /// 列出 MIME 类型各版本的等级
    Mimetypes {
        /// 只列出文本类格式
        #[arg(long)]
        text_only: bool,

        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,
    },
    /// 列出容器允许的内嵌流
    Containers {
        /// 只统计该等级的档位 (如 RECOMMENDED)
        #[arg(long)]
        grade: Option<Grade>,

        /// 输出 JSON 格式
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init("dpres-grade", cli.verbose, cli.quiet) {
        eprintln!("警告: 日志初始化失败: {e:#}");
    }

    if let Err(e) = run(cli) {
        log::error!("{e:#}");
        eprintln!("错误: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Grade {
            ref mimetype,
            ref version,
            ref streams,
            ref streams_file,
            explain,
            json,
        } => {
            let grader = build_grader(&cli)?;
            let streams = collect_streams(streams_file.as_deref(), streams)?;
            let assessment = grader.assess(Some(mimetype), version, &streams)?;
            info!("{mimetype} {version}: {}", assessment.verdict);
            print_assessment(&assessment, explain, json)
        }
        Command::Batch { ref file, json } => {
            let grader = build_grader(&cli)?;
            let requests = read_batch(file)?;
            run_batch(&grader, requests, json)
        }
        Command::Formats {
            deprecated,
            unofficial,
            versions_separately,
            json,
        } => {
            let records = load_file_formats(cli.file_formats.as_deref())?;
            let selected = select_formats(
                &records,
                FormatSelection {
                    deprecated,
                    unofficial,
                },
            );
            if versions_separately {
                let flat = flatten_versions(&selected);
                if json {
                    return print_json(&flat);
                }
                for entry in &flat {
                    println!(
                        "{:<40} {:<12} {}",
                        entry.mimetype, entry.version.version, entry.version.grade
                    );
                }
            } else {
                if json {
                    return print_json(&selected);
                }
                for record in &selected {
                    let versions: Vec<&str> =
                        record.versions.iter().map(|v| v.version.as_str()).collect();
                    println!(
                        "{:<40} {:<12} {}",
                        record.mimetype,
                        record.format_name_short,
                        versions.join(", ")
                    );
                }
            }
            Ok(())
        }
        Command::Mimetypes { text_only, json } => {
            let records = load_file_formats(cli.file_formats.as_deref())?;
            let grading = mimetypes_grading(&records, text_only);
            if json {
                return print_json(&grading);
            }
            for (mimetype, versions) in &grading {
                for (version, grade) in versions {
                    println!("{mimetype:<40} {version:<12} {}", grade.short_name());
                }
            }
            Ok(())
        }
        Command::Containers { grade, json } => {
            let records = load_container_streams(cli.containers.as_deref())?;
            let grading = containers_streams_grading(&records, grade);
            if json {
                return print_json(&grading);
            }
            print_containers(&grading);
            Ok(())
        }
    }
}

// ============================================================
// 词表与评级器
// ============================================================

fn load_file_formats(path: Option<&Path>) -> Result<Vec<FileFormatRecord>> {
    match path {
        Some(path) => {
            debug!("读取文件格式词表: {}", path.display());
            read_file_formats(path)
                .with_context(|| format!("加载文件格式词表失败: {}", path.display()))
        }
        None => Ok(builtin_file_formats()?),
    }
}

fn load_container_streams(path: Option<&Path>) -> Result<Vec<ContainerRecord>> {
    match path {
        Some(path) => {
            debug!("读取容器词表: {}", path.display());
            read_container_streams(path)
                .with_context(|| format!("加载容器词表失败: {}", path.display()))
        }
        None => Ok(builtin_container_streams()?),
    }
}

fn build_grader(cli: &Cli) -> Result<Grader> {
    let formats = load_file_formats(cli.file_formats.as_deref())?;
    let containers = load_container_streams(cli.containers.as_deref())?;
    let vocabulary = Vocabulary::from_records(&formats, &containers);
    debug!(
        "词表: {} 个格式版本, {} 个容器档位",
        vocabulary.formats.len(),
        vocabulary.containers.len()
    );

    let config = match &cli.config {
        Some(path) => GraderConfig::load(path)
            .with_context(|| format!("加载评级配置失败: {}", path.display()))?,
        None => GraderConfig::default(),
    };
    Ok(Grader::with_config(Arc::new(vocabulary), config))
}

// ============================================================
// 输出
// ============================================================

/// 批量评级结果中的一项
#[derive(Serialize)]
struct BatchItem<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    mimetype: Option<&'a str>,
    version: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    verdict: Option<Verdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn run_batch(grader: &Grader, requests: Vec<GradeRequest>, json: bool) -> Result<()> {
    info!("批量评级 {} 个请求", requests.len());
    let results: Vec<_> = requests
        .par_iter()
        .map(|req| grader.grade(req.mimetype.as_deref(), &req.version, &req.streams))
        .collect();

    let items: Vec<BatchItem<'_>> = requests
        .iter()
        .zip(results)
        .map(|(req, result)| {
            let (verdict, error) = match result {
                Ok(verdict) => (Some(verdict), None),
                Err(e) => (None, Some(e.to_string())),
            };
            BatchItem {
                mimetype: req.mimetype.as_deref(),
                version: &req.version,
                verdict,
                error,
            }
        })
        .collect();
    let failed = items.iter().filter(|item| item.error.is_some()).count();

    if json {
        print_json(&items)?;
    } else {
        for (i, item) in items.iter().enumerate() {
            let outcome = match (&item.verdict, &item.error) {
                (Some(verdict), _) => verdict.to_string(),
                (None, Some(error)) => format!("错误: {error}"),
                (None, None) => String::new(),
            };
            println!(
                "{i}\t{}\t{}\t{outcome}",
                item.mimetype.unwrap_or("-"),
                item.version
            );
        }
    }

    if failed > 0 {
        warn!("{failed} 个请求评级失败");
        anyhow::bail!("{failed} / {} 个请求评级失败", items.len());
    }
    Ok(())
}

fn print_assessment(assessment: &Assessment, explain: bool, json: bool) -> Result<()> {
    if json {
        if explain {
            return print_json(assessment);
        }
        return print_json(&assessment.verdict);
    }
    println!("{}", assessment.verdict);
    if explain {
        for rule_grade in &assessment.rule_grades {
            println!("  {:<18} {}", rule_grade.rule, rule_grade.grade);
        }
    }
    Ok(())
}

fn print_containers(grading: &BTreeMap<String, BTreeSet<StreamFormat>>) {
    for (container, streams) in grading {
        println!("{container}");
        for stream in streams {
            println!("  {stream}");
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("JSON 序列化失败")?;
    println!("{text}");
    Ok(())
}

// ============================================================
// 测试
// ============================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use dpres_grading::StreamMap;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_grade_command() {
        let cli = Cli::try_parse_from([
            "dpres-grade",
            "-vv",
            "grade",
            "video/mp4",
            "--stream",
            "0=video/mp4;(:unap)",
            "--stream",
            "1=audio/aac;(:unap)",
            "--explain",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Grade {
                mimetype,
                version,
                streams,
                explain,
                json,
                ..
            } => {
                assert_eq!(mimetype, "video/mp4");
                assert_eq!(version, "(:unap)");
                assert_eq!(streams.len(), 2);
                assert!(explain);
                assert!(!json);
            }
            other => panic!("意外的子命令: {other:?}"),
        }
    }

    #[test]
    fn test_parse_containers_grade_filter() {
        let cli =
            Cli::try_parse_from(["dpres-grade", "containers", "--grade", "acceptable"]).unwrap();
        match cli.command {
            Command::Containers { grade, .. } => assert_eq!(grade, Some(Grade::Acceptable)),
            other => panic!("意外的子命令: {other:?}"),
        }
    }

    #[test]
    fn test_batch_grades_in_request_order() {
        let cli = Cli::try_parse_from(["dpres-grade", "batch", "unused.json"]).unwrap();
        let grader = build_grader(&cli).unwrap();
        let requests = vec![
            GradeRequest {
                mimetype: Some("application/pdf".into()),
                version: "A-1a".into(),
                streams: StreamMap::new(),
            },
            GradeRequest {
                mimetype: None,
                version: default_version(),
                streams: StreamMap::new(),
            },
        ];
        run_batch(&grader, requests, true).unwrap();
    }
}
