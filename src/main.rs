// EHR Log Analyzer - main.rs
//
// Application entry point. Handles:
// 1. CLI argument parsing
// 2. Configuration loading and logging initialisation
// 3. Headless export mode (--export-dir / --json)
// 4. eframe GUI launch

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod gui;

// Re-export modules from the library crate so that `gui.rs` and other
// binary-side code can still use `crate::app::...`, `crate::core::...` etc.
pub use ehr_log_analyzer::app;

pub use ehr_log_analyzer::core;
pub use ehr_log_analyzer::platform;
pub use ehr_log_analyzer::ui;
pub use ehr_log_analyzer::util;

use clap::Parser;
use std::path::PathBuf;

/// EHR Log Analyzer - extract players, RPC events, chat and anti-cheat
/// reports from a saved EHR client log.
///
/// Without options, opens the GUI (loading PATH if given). With
/// --export-dir or --json, parses PATH and exits without a window.
#[derive(Parser, Debug)]
#[command(name = "ehr-log-analyzer", version, about)]
struct Cli {
    /// Log file (.html) to open.
    path: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug")]
    debug: bool,

    /// Parse PATH and write the four collections into this directory.
    #[arg(long = "export-dir", value_name = "DIR", requires = "path")]
    export_dir: Option<PathBuf>,

    /// Parse PATH and print the full result as JSON on stdout.
    #[arg(long = "json", requires = "path", conflicts_with = "export_dir")]
    json: bool,
}

fn main() {
    let cli = Cli::parse();

    // Configuration comes first so its [logging] section can shape the subscriber.
    let platform_paths = platform::config::PlatformPaths::resolve();
    let (config, config_warnings) = platform::config::load_config(&platform_paths.config_dir);

    let log_file = config
        .log_file
        .as_deref()
        .map(|file| platform_paths.log_file(file));
    util::logging::init(cli.debug, config.log_level.as_deref(), log_file.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config = %platform_paths.config_file().display(),
        "EHR Log Analyzer starting"
    );
    for warning in &config_warnings {
        tracing::warn!(warning = %warning, "Configuration warning");
    }

    // Headless mode
    let headless_output = match (&cli.export_dir, cli.json) {
        (Some(dir), _) => Some(app::headless::HeadlessOutput::ExportDir {
            dir: dir.clone(),
            format: config.export_format,
        }),
        (None, true) => Some(app::headless::HeadlessOutput::JsonStdout),
        (None, false) => None,
    };
    if let (Some(output), Some(path)) = (headless_output, cli.path.as_deref()) {
        match app::headless::run(path, &output, config.max_file_size) {
            Ok(result) => {
                tracing::info!(
                    players = result.players.len(),
                    rpc_events = result.total_rpc_events(),
                    chats = result.chats.len(),
                    eac_reports = result.eac_reports.len(),
                    "Headless run complete"
                );
                if let app::headless::HeadlessOutput::ExportDir { dir, .. } = output {
                    eprintln!(
                        "Wrote {} players, {} RPC rows, {} chat messages, {} EAC reports to {}",
                        result.players.len(),
                        result.rpcs.len(),
                        result.chats.len(),
                        result.eac_reports.len(),
                        dir.display()
                    );
                }
                return;
            }
            Err(e) => {
                tracing::error!(error = %e, "Headless run failed");
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    }

    // Create application state
    let dark_mode = config.dark_mode;
    let font_size = config.font_size;
    let mut state = app::state::AppState::new(config, cli.debug);

    // If a path was provided on the CLI, queue it through the normal intake path
    state.pending_path = cli.path.clone();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(format!(
                "{} v{}",
                util::constants::APP_NAME,
                util::constants::APP_VERSION
            ))
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 500.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    let result = eframe::run_native(
        util::constants::APP_NAME,
        native_options,
        Box::new(move |cc| {
            ui::theme::apply(&cc.egui_ctx, dark_mode, font_size);
            Ok(Box::new(gui::AnalyzerApp::new(state)))
        }),
    );

    if let Err(e) = result {
        tracing::error!(error = %e, "Failed to launch GUI");
        eprintln!("Error: Failed to launch EHR Log Analyzer GUI: {e}");
        std::process::exit(1);
    }
}
