use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use checklist_core::model::Catalog;
use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{Clock, ExportFormat, ReportService, SessionSettings};
use storage::Storage;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_EXPORT_DIR: &str = "exports";
const ENV_EXPORT_DIR: &str = "CHECKLIST_EXPORT_DIR";
const ENV_EXPORT_FORMAT: &str = "CHECKLIST_EXPORT_FORMAT";
const ENV_REQUIRE_EXPLICIT: &str = "CHECKLIST_REQUIRE_EXPLICIT_ANSWER";

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidFormat { raw: String },
    InvalidExportDir { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidFormat { raw } => {
                write!(f, "invalid --format value: {raw} (expected xlsx or csv)")
            }
            ArgsError::InvalidExportDir { raw } => write!(f, "invalid --export-dir value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    catalog: Arc<Catalog>,
    settings: SessionSettings,
    report_service: Arc<ReportService>,
}

impl UiApp for DesktopApp {
    fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    fn session_settings(&self) -> SessionSettings {
        self.settings
    }

    fn report_service(&self) -> Arc<ReportService> {
        Arc::clone(&self.report_service)
    }
}

#[derive(Debug, PartialEq, Eq)]
struct Args {
    export_dir: PathBuf,
    format: ExportFormat,
    require_explicit_answer: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--export-dir <dir>] [--format xlsx|csv] [--require-explicit-answer]"
    );
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --export-dir {DEFAULT_EXPORT_DIR}");
    eprintln!("  --format xlsx");
    eprintln!("  unanswered questions are prefilled with Yes");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  {ENV_EXPORT_DIR}, {ENV_EXPORT_FORMAT}, {ENV_REQUIRE_EXPLICIT}=1|true");
    eprintln!("  RUST_LOG (default: info)");
}

fn parse_format(raw: String) -> Result<ExportFormat, ArgsError> {
    raw.parse()
        .map_err(|_| ArgsError::InvalidFormat { raw })
}

fn parse_export_dir(raw: String) -> Result<PathBuf, ArgsError> {
    if raw.trim().is_empty() {
        return Err(ArgsError::InvalidExportDir { raw });
    }
    Ok(PathBuf::from(raw))
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

impl Args {
    /// Parse flags, falling back to `env` for anything not given on the command line.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut export_dir = env(ENV_EXPORT_DIR)
            .map(parse_export_dir)
            .transpose()?
            .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_DIR));
        let mut format = env(ENV_EXPORT_FORMAT)
            .map(parse_format)
            .transpose()?
            .unwrap_or_default();
        let mut require_explicit_answer = env(ENV_REQUIRE_EXPLICIT).is_some_and(|v| is_truthy(&v));

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--export-dir" => {
                    export_dir = parse_export_dir(require_value(args, "--export-dir")?)?;
                }
                "--format" => {
                    format = parse_format(require_value(args, "--format")?)?;
                }
                "--require-explicit-answer" => require_explicit_answer = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            export_dir,
            format,
            require_explicit_answer,
        })
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv, |key| std::env::var(key).ok()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing();

    let catalog = Arc::new(Catalog::builtin()?);
    info!(
        groups = catalog.group_count(),
        questions = catalog.question_count(),
        export_dir = %parsed.export_dir.display(),
        format = %parsed.format,
        strict = parsed.require_explicit_answer,
        "starting checklist"
    );

    let storage = Storage::filesystem(&parsed.export_dir);
    let report_service =
        Arc::new(ReportService::new(Clock::system(), storage.exports).with_format(parsed.format));
    let settings =
        SessionSettings::default().with_require_explicit_answer(parsed.require_explicit_answer);

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        catalog,
        settings,
        report_service,
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("CX Checklist")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
