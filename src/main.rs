use anyhow::{bail, Context};
use std::path::PathBuf;
use xo::config::EditorConfig;
use xo::error::{self, FileError};
use xo::file::{expand_path, parse_location, touch};
use xo::logging::{self, LoggerConfig};
use xo::ui::Theme;
use xo::{Session, TuiApplication};

const USAGE: &str = "\
usage: xo <path[:line[:col]]> [--log <file>]

path may include colon separated line and column numbers, eg 'src/main.rs:10:42'.
A missing file is created empty. Press esc inside the editor for key commands.";

/// コマンドライン引数
#[derive(Debug, Default)]
struct CliOptions {
    location: Option<String>,
    log_file: Option<PathBuf>,
    show_help: bool,
    show_version: bool,
}

fn parse_args(args: &[String]) -> anyhow::Result<CliOptions> {
    let mut options = CliOptions::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => options.show_help = true,
            "-V" | "--version" => options.show_version = true,
            "--log" => match iter.next() {
                Some(path) => options.log_file = Some(PathBuf::from(path)),
                None => bail!("--log requires a file path"),
            },
            other if other.starts_with("--") => bail!("unknown option: {}", other),
            other => {
                if options.location.is_some() {
                    bail!("only one path may be given");
                }
                options.location = Some(other.to_string());
            }
        }
    }

    Ok(options)
}

fn main() -> anyhow::Result<()> {
    error::setup_panic_handler();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_args(&args)?;

    if options.show_help {
        println!("{}", USAGE);
        return Ok(());
    }
    if options.show_version {
        println!("xo {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let Some(argument) = options.location else {
        eprintln!("{}", USAGE);
        std::process::exit(2);
    };

    let mut logger_config = LoggerConfig::from_env();
    if let Some(log_file) = &options.log_file {
        logger_config = logger_config.with_file_output(log_file);
    }
    logging::init(logger_config);

    let config = match EditorConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("warning: {}; using default settings", err);
            log::warn!("config ignored: {}", err);
            EditorConfig::default()
        }
    };

    let location = parse_location(&argument);
    let path = expand_path(&location.path.to_string_lossy())
        .with_context(|| format!("invalid path {:?}", argument))?;

    if !path.exists() {
        touch(&path).with_context(|| format!("could not create {}", path.display()))?;
        log::info!("created {}", path.display());
    } else if path.is_dir() {
        return Err(FileError::IsDirectory {
            path: path.display().to_string(),
        }
        .into());
    }

    let session = Session::open(&path, &config)
        .with_context(|| format!("could not open {}", path.display()))?;

    let theme = Theme::by_name(&config.style).unwrap_or_else(|| {
        log::warn!("unknown style {:?}, using default", config.style);
        Theme::default()
    });

    let mut app = TuiApplication::new(session, theme);
    app.run(location.line, location.column)?;
    Ok(())
}
