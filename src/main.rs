//! main.rs
//! Entry point for dirscope

use dirscope::app::{BrowserSession, SessionOptions};
use dirscope::config::Config;
use dirscope::core::terminal;
use dirscope::core::{FsLister, UpdateBaseline};
use dirscope::utils::cli::{CliAction, handle_args};
use dirscope::utils::resolve_initial_dir;

use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::{self, File};
use std::sync::Arc;

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        eprintln!("\n[dirscope] Error occurred: {}", info);

        #[cfg(debug_assertions)]
        {
            let bt = std::backtrace::Backtrace::force_capture();
            eprintln!("\nStack Backtrace:\n{}", bt);
        }
    }));

    let opts = match handle_args() {
        CliAction::Run(opts) => opts,
        CliAction::Exit => return Ok(()),
        CliAction::Invalid => std::process::exit(2),
    };

    let config = Config::load();
    init_logging(&config);

    let root = resolve_initial_dir(opts.path.as_deref(), config.general().root().map(|p| p.as_path()));
    if !root.is_dir() {
        eprintln!("\n[dirscope] Error: Path '{}' cannot be opened.", root.display());
        std::process::exit(1);
    }

    let baseline = match opts.since {
        Some(time) => UpdateBaseline::since(time),
        None => UpdateBaseline::window(config.updated().window()),
    };
    let lister = FsLister::new(root.clone(), baseline)
        .with_show_hidden(config.general().show_hidden())
        .with_max_depth(config.updated().max_depth())
        .with_max_results(config.updated().max_results());

    log::info!(
        "dirscope starting in {} (sort {}, updated since {:?})",
        lister.root().display(),
        opts.sort,
        lister.baseline().time()
    );

    let options = SessionOptions {
        initial_sort: opts.sort,
        updated_view: opts.updated,
        ..SessionOptions::from_config(&config)
    };
    let mut session = BrowserSession::new(root, Arc::new(lister), options);
    session.grant_permission();

    terminal::run_terminal(&mut session)
}

/// Writes the log to the configured file. Logging stays off when the file cannot be created.
fn init_logging(config: &Config) {
    let Some(path) = config.log().file() else {
        return;
    };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create(&path) {
        let _ = WriteLogger::init(config.log().level(), log_config, log_file);
    }
}
