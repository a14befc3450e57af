mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{AuthCommand, Cli, Command, ThemeCommand};
use server::auth::{AuthStateManager, SessionPhase, create_auth_provider};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::mpsc::{self, Sender};
use zeropoint::app::{Route, guard};
use zeropoint::config::{AppConfig, load_config};
use zeropoint::constants::env_vars::{
    BACKEND_ANON_KEY, BACKEND_ON_MISSING_CREDENTIALS, BACKEND_URL, STORAGE_DIR,
};
use zeropoint::error::{AppError, AppResult, ErrorContext, ErrorReporter, ErrorSeverity};
use zeropoint::logger;
use zeropoint::services::notifications::{Notification, notify};
use zeropoint::services::session_cache::{clear_session, load_session, save_session};
use zeropoint::services::AuthService;
use zeropoint::theme::{ColorPreset, FileStorage, FileStyleHost, ThemeStore};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())
        .into_result()
        .context("Could not load configuration")?;

    if let Err(e) = logger::setup_logger(config.logging()) {
        eprintln!("Warning: logger already initialized: {e}");
    }

    let storage_dir = cli
        .storage_dir
        .clone()
        .unwrap_or_else(|| config.storage_dir());
    log::debug!(
        "Using storage directory {} (override with --storage-dir or {STORAGE_DIR})",
        storage_dir.display()
    );

    let (tx, rx) = mpsc::channel();
    let reporter = ErrorReporter::new(tx.clone());

    let result = match cli.command {
        Command::Theme(command) => run_theme(command, &storage_dir, &tx),
        Command::Auth(command) => run_auth(command, &config, &storage_dir, tx.clone()).await,
        Command::Route { path } => run_route(&path, &config, &storage_dir, tx.clone()).await,
    };

    if let Err(error) = &result {
        match error {
            // Already surfaced as a toast by the auth service
            AppError::Auth(msg) => log::debug!("Auth command failed: {msg}"),
            AppError::Config(_) => reporter.report(
                error.clone(),
                ErrorContext::new("cli", "startup")
                    .with_severity(ErrorSeverity::Critical)
                    .with_suggestion("Fix config.toml or the environment and run the command again."),
            ),
            other => reporter.report_simple(other.clone(), "cli", "command"),
        }
    }

    drop(reporter);
    drop(tx);
    for notification in rx.iter() {
        eprintln!("{notification}");
    }

    Ok(if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn open_store(storage_dir: &Path) -> AppResult<ThemeStore> {
    let store = ThemeStore::load(
        Box::new(FileStorage::in_dir(storage_dir)),
        Box::new(FileStyleHost::new(storage_dir)),
    )?;
    Ok(store)
}

fn run_theme(command: ThemeCommand, storage_dir: &Path, tx: &Sender<Notification>) -> AppResult<()> {
    if let ThemeCommand::Presets = command {
        for preset in ColorPreset::ALL {
            println!("{:<12} {:<20} {}", preset.as_str(), preset.label(), preset.gradient());
        }
        return Ok(());
    }

    let mut store = open_store(storage_dir)?;

    match command {
        ThemeCommand::Show => {
            println!("{}", store.export_snapshot()?);
        }
        ThemeCommand::Set(args) => {
            let patch = args.into_patch();
            if patch.is_empty() {
                notify(tx, Notification::info("Nothing to change"));
                return Ok(());
            }
            store.update(patch)?;
            notify(tx, Notification::success("Theme updated"));
        }
        ThemeCommand::Reset => {
            store.reset()?;
            notify(tx, Notification::success("Theme reset to defaults"));
        }
        ThemeCommand::Export { dir } => {
            let dir = dir.unwrap_or_else(|| PathBuf::from("."));
            let path = store.export_to_file(&dir)?;
            println!("{}", path.display());
            notify(tx, Notification::success("Theme exported successfully!"));
        }
        ThemeCommand::Import { file } => {
            store.import_from_file(&file)?;
            notify(tx, Notification::success("Theme imported successfully!"));
        }
        ThemeCommand::Css => {
            print!("{}", store.stylesheet());
        }
        // Handled before the store is opened
        ThemeCommand::Presets => {}
    }

    Ok(())
}

async fn start_auth(
    config: &AppConfig,
    storage_dir: &Path,
    tx: Sender<Notification>,
) -> AppResult<(AuthService, FileStorage)> {
    let provider = create_auth_provider(config.backend())
        .map_err(|e| {
            AppError::Config(format!(
                "{e}. Set {BACKEND_URL} and {BACKEND_ANON_KEY}, or {BACKEND_ON_MISSING_CREDENTIALS}=stub to run without a backend"
            ))
        })?;

    let service = AuthService::new(provider, Arc::new(AuthStateManager::new()), tx);
    let storage = FileStorage::in_dir(storage_dir);

    if let Some(session) = load_session(&storage) {
        service.restore(session).await;
    }
    service.initialize().await;

    Ok((service, storage))
}

async fn run_auth(
    command: AuthCommand,
    config: &AppConfig,
    storage_dir: &Path,
    tx: Sender<Notification>,
) -> AppResult<()> {
    let (service, mut storage) = start_auth(config, storage_dir, tx).await?;

    match command {
        AuthCommand::Status => match service.auth_state().phase() {
            SessionPhase::Authenticated(user) => {
                println!("Signed in as {} <{}>", user.label(), user.email);
            }
            _ => {
                println!("Not signed in");
                if !config.backend().has_credentials() {
                    println!("Backend not configured: set {BACKEND_URL} and {BACKEND_ANON_KEY}");
                }
            }
        },
        AuthCommand::SignIn { email, password } => {
            let session = service.sign_in(&email, &password).await?;
            save_session(&mut storage, &session)?;
        }
        AuthCommand::SignUp {
            email,
            password,
            name,
        } => match service.sign_up(&email, &password, &name).await? {
            Some(session) => save_session(&mut storage, &session)?,
            None => println!("Check your email to confirm the account, then sign in"),
        },
        AuthCommand::SignOut => {
            service.sign_out().await;
            clear_session(&mut storage)?;
        }
    }

    Ok(())
}

async fn run_route(
    path: &str,
    config: &AppConfig,
    storage_dir: &Path,
    tx: Sender<Notification>,
) -> AppResult<()> {
    let (service, _) = start_auth(config, storage_dir, tx).await?;

    let decision = guard(&service.auth_state().phase(), &Route::parse(path));
    match &decision.redirect_to {
        Some(target) => println!("{} -> {target}", decision.view),
        None => println!("{}", decision.view),
    }
    Ok(())
}
