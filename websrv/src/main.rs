// SPDX-FileCopyrightText: Copyright (C) 2023-2026 The citygen authors
// SPDX-License-Identifier: AGPL-3.0-or-later

#![cfg_attr(not(test), deny(clippy::panic_in_result_fn))]

use std::{
    env::current_exe,
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;

use crate::config::Config;

mod config;
mod env;
mod routing;
mod runtime;

#[must_use]
fn app_name() -> &'static str {
    env!("CARGO_PKG_NAME")
}

#[must_use]
fn app_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "citygen", app_name())
}

#[must_use]
fn app_config_dir(app_dirs: &ProjectDirs) -> &Path {
    app_dirs.config_dir()
}

#[must_use]
fn new_config_file_path(app_dirs: &ProjectDirs, file_suffix: &str) -> PathBuf {
    let mut path_buf = app_config_dir(app_dirs).to_path_buf();
    path_buf.push("config");
    path_buf.set_extension(file_suffix);
    path_buf
}

#[must_use]
fn load_app_config(app_dirs: &ProjectDirs) -> Config {
    let file_path = new_config_file_path(app_dirs, "ron");
    log::info!("Loading configuration from file: {}", file_path.display());
    match fs::read(&file_path) {
        Ok(bytes) => ron::de::from_bytes(&bytes)
            .map_err(|err| {
                log::warn!("Failed to parse configuration data: {err}");
            })
            .unwrap_or_default(),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            log::info!("Configuration file not found");
            Default::default()
        }
        Err(err) => {
            log::warn!("Failed to read configuration data from file: {err}");
            Default::default()
        }
    }
}

fn main() {
    env::init_environment();

    if let Err(err) = env::init_tracing_and_logging() {
        eprintln!("Failed to initialize tracing and logging: {err}");
        return;
    }

    if let Ok(exe_path) = current_exe() {
        log::info!("Executable: {}", exe_path.display());
    }
    log::info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let mut config = if env::parse_default_config() {
        log::info!("Using default configuration");
        Config::default()
    } else {
        app_dirs().as_ref().map(load_app_config).unwrap_or_default()
    };

    log::info!("Patching configuration from .env file and environment variables");
    env::parse_config_into(&mut config);
    log::debug!("Configuration: {config:?}");

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(err) => {
            log::error!("Failed to create runtime: {err}");
            return;
        }
    };

    if let Err(err) = rt.block_on(runtime::run(config)) {
        log::error!("Runtime terminated with error: {err}");
        std::process::exit(1);
    }

    log::info!("Exiting");
}
