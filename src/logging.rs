//! ロギングシステム
//!
//! `log` ファサードの出力先。TUI が端末を占有している間は stderr を使わずファイルへ追記する

use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// ログ出力の設定
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// 出力するログレベル
    pub level: LevelFilter,
    /// 追記先ファイル
    pub output_file: Option<PathBuf>,
    /// 標準エラー出力へも書くか
    pub output_stderr: bool,
}

impl LoggerConfig {
    /// 環境変数 `XO_LOG` からレベルを決定
    pub fn from_env() -> Self {
        let level = std::env::var("XO_LOG")
            .ok()
            .and_then(|value| parse_level(&value))
            .unwrap_or(LevelFilter::Warn);
        Self {
            level,
            output_file: None,
            output_stderr: false,
        }
    }

    /// ファイル出力を設定
    pub fn with_file_output<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// ログレベルを変更
    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_level(value: &str) -> Option<LevelFilter> {
    match value.trim().to_ascii_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// ロガー
#[derive(Debug)]
pub struct Logger {
    level: LevelFilter,
    output_stderr: bool,
    output_file: Option<Mutex<File>>,
}

impl Logger {
    /// 設定からロガーを構築（ファイルを開けない場合はファイル出力なし）
    pub fn new(config: &LoggerConfig) -> Self {
        let output_file = config.output_file.as_ref().and_then(|path| {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
                .map(Mutex::new)
        });

        Self {
            level: config.level,
            output_stderr: config.output_stderr,
            output_file,
        }
    }

    fn format(record: &Record<'_>) -> String {
        format!("{} {}: {}", record.level(), record.target(), record.args())
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = Self::format(record);

        if self.output_stderr {
            eprintln!("{}", line);
        }

        if let Some(file) = &self.output_file {
            if let Ok(mut file) = file.lock() {
                let _ = writeln!(file, "{}", line);
            }
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.output_file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

/// グローバルロガーを一度だけ設定（二度目以降は無視）
pub fn init(config: LoggerConfig) {
    let level = config.level;
    let logger = Logger::new(&config);
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }
}
