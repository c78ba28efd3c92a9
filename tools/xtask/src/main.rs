//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `cov-core`: 运行 tween-core 覆盖率
//! - `tween-check`: 检查补间定义文件（JSON 格式、缓动名、废弃选项）

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;

use clap::{Parser, Subcommand};
use tracing::info;
use tween_core::{EasingRegistry, PropertyBag, TweenAction, TweenDefinition, TweenWarning};
use walkdir::WalkDir;
use xshell::{Shell, cmd};

#[derive(Parser)]
#[command(name = "xtask", about = "开发辅助工具")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 运行 fmt、clippy、test 门禁检查
    CheckAll,
    /// 运行 tween-core 覆盖率报告
    CovCore,
    /// 检查补间定义文件
    ///
    /// 不带参数：检查 assets/tweens/ 下所有 .json 文件
    TweenCheck {
        /// 指定文件或目录
        path: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_target(false).init();

    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let sh = Shell::new()?;

    match cli.command {
        Command::CheckAll => {
            eprintln!("\n==> cargo fmt --all -- --check");
            cmd!(sh, "cargo fmt --all -- --check").run()?;

            eprintln!("\n==> cargo clippy --workspace --all-targets");
            cmd!(sh, "cargo clippy --workspace --all-targets").run()?;

            eprintln!("\n==> cargo test --workspace");
            cmd!(sh, "cargo test --workspace").run()?;
        }
        Command::CovCore => {
            ensure_cargo_llvm_cov_available(&sh)?;

            eprintln!("\n==> cargo llvm-cov -p tween-core --all-features --html");
            cmd!(sh, "cargo llvm-cov -p tween-core --all-features --html").run()?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        Command::TweenCheck { path } => {
            tween_check(path.as_deref())?;
        }
    }

    Ok(())
}

fn ensure_cargo_llvm_cov_available(sh: &Shell) -> anyhow::Result<()> {
    if cmd!(sh, "cargo llvm-cov --version").quiet().run().is_err() {
        anyhow::bail!(
            "cargo llvm-cov 不可用。\n\
请先安装：\n\
  - cargo install cargo-llvm-cov\n\
  - rustup component add llvm-tools-preview\n\
然后重试。"
        );
    }
    Ok(())
}

//=============================================================================
// tween-check 命令实现
//=============================================================================

/// 默认的补间定义目录（相对于 workspace root）
const DEFAULT_TWEENS_DIR: &str = "assets/tweens";

/// 检查结果
#[derive(Default)]
struct TweenCheckResult {
    /// 检查的文件数量
    files_checked: usize,
    /// 解析失败数量
    errors: usize,
    /// 警告（文件, 警告）
    warnings: Vec<(String, TweenWarning)>,
}

fn tween_check(path: Option<&Path>) -> anyhow::Result<()> {
    let root = path.unwrap_or_else(|| Path::new(DEFAULT_TWEENS_DIR));
    if !root.exists() {
        anyhow::bail!(
            "路径不存在: {}\n请在 workspace 根目录运行，或指定文件路径",
            root.display()
        );
    }

    let files = collect_definition_files(root);
    if files.is_empty() {
        eprintln!("未找到补间定义文件（.json）");
        return Ok(());
    }

    info!(count = files.len(), "检查补间定义");

    let registry = Rc::new(EasingRegistry::with_builtins());
    let mut result = TweenCheckResult::default();
    for file in &files {
        check_definition_file(file, &registry, &mut result);
    }

    print_check_result(&result);

    if result.errors > 0 {
        anyhow::bail!("补间定义检查发现错误");
    }
    Ok(())
}

/// 收集目录下的所有 .json 文件
fn collect_definition_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    files
}

/// 检查单个补间定义文件
fn check_definition_file(file: &Path, registry: &Rc<EasingRegistry>, result: &mut TweenCheckResult) {
    let file_id = file.display().to_string();
    result.files_checked += 1;

    let definition = match TweenDefinition::from_file(file) {
        Ok(d) => d,
        Err(e) => {
            eprintln!("[ERROR] {}: {}", file_id, e);
            result.errors += 1;
            return;
        }
    };

    let action: TweenAction<PropertyBag> = definition.build(Rc::clone(registry));
    if action.specs().is_empty() {
        eprintln!("[WARN] {}: 没有可补间的属性", file_id);
    }
    for warning in action.warnings() {
        result.warnings.push((file_id.clone(), warning.clone()));
    }
}

/// 输出检查结果
fn print_check_result(result: &TweenCheckResult) {
    eprintln!("─────────────────────────────────────────────────────");
    eprintln!("检查完成: {} 个文件", result.files_checked);
    eprintln!();

    for (file, warning) in &result.warnings {
        eprintln!("[WARN] {}: {}", file, warning);
    }

    eprintln!();
    if result.errors > 0 {
        eprintln!("❌ {} 个错误, {} 个警告", result.errors, result.warnings.len());
    } else if !result.warnings.is_empty() {
        eprintln!("⚠️  0 个错误, {} 个警告", result.warnings.len());
    } else {
        eprintln!("✅ 检查通过，无错误");
    }
}
