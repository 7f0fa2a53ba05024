use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::QuizCatalog;
use services::{ApiConfig, HttpScoringBackend, QuizFlowService};
use ui::{App, UiApp, build_app_context};

/// Fallback catalog, derived from the reference backend's quiz parts.
const DEFAULT_CATALOG: &str = include_str!("../assets/catalog.json");

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api value: {raw}"),
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

struct Args {
    api: ApiConfig,
    catalog_path: Option<PathBuf>,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut api = ApiConfig::from_env().map_err(|_| ArgsError::InvalidApiUrl {
            raw: std::env::var("QUIZ_API_URL").unwrap_or_default(),
        })?;
        let mut catalog_path = std::env::var("QUIZ_CATALOG").ok().map(PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api" => {
                    let value = require_value(args, "--api")?;
                    api = ApiConfig::new(&value)
                        .map_err(|_| ArgsError::InvalidApiUrl { raw: value })?;
                }
                "--catalog" => {
                    let value = require_value(args, "--catalog")?;
                    catalog_path = Some(PathBuf::from(value));
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { api, catalog_path })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api <base_url>] [--catalog <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api http://127.0.0.1:5000");
    eprintln!("  --catalog <embedded sorting-quiz catalog>");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_API_URL, QUIZ_CATALOG");
}

struct DesktopApp {
    catalog: Option<Arc<QuizCatalog>>,
    quiz_flow: QuizFlowService,
}

impl UiApp for DesktopApp {
    fn catalog(&self) -> Option<Arc<QuizCatalog>> {
        self.catalog.clone()
    }

    fn quiz_flow(&self) -> QuizFlowService {
        self.quiz_flow.clone()
    }
}

/// Load the catalog from the configured file, or the embedded default.
///
/// A missing or malformed catalog degrades to `None` (the UI shows a
/// "no quiz available" screen) rather than aborting the launch.
fn load_catalog(path: Option<&PathBuf>) -> Option<Arc<QuizCatalog>> {
    let raw = match path {
        Some(path) => match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(err) => {
                eprintln!("failed to read catalog {}: {err}", path.display());
                return None;
            }
        },
        None => DEFAULT_CATALOG.to_string(),
    };

    match QuizCatalog::from_json(&raw) {
        Ok(catalog) => Some(Arc::new(catalog)),
        Err(err) => {
            eprintln!("failed to load catalog: {err}");
            None
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let catalog = load_catalog(args.catalog_path.as_ref());
    let backend = Arc::new(HttpScoringBackend::new(args.api));
    let quiz_flow = QuizFlowService::new(backend);

    let app = DesktopApp { catalog, quiz_flow };
    let context = build_app_context(&(Arc::new(app) as Arc<dyn UiApp>));

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Sorting Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}
