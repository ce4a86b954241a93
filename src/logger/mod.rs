//! Logger module
//!
//! Provides logging utilities for the proxy including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Upstream provider call logging
//! - Error and warning logging

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use crate::translator::{ProviderRequest, TranslatorError};
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config, provider: &str) {
    write_info("======================================");
    write_info("Asset proxy started successfully");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    write_info(&format!("Provider: {provider}"));
    if config.provider.api_key.is_none() {
        write_error(&format!(
            "[WARN] {} is not set; searches will fail until it is configured",
            config.provider.backend.credential_env()
        ));
    }
    write_info(&format!("Static root: {}", config.static_files.root));
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_info(message: &str) {
    write_info(message);
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    write_info(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_provider_call(provider: &str, request: &ProviderRequest) {
    let params: Vec<String> = request
        .params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect();
    write_info(&format!(
        "[Provider] {provider} GET {} {}",
        request.path,
        params.join("&")
    ));
}

pub fn log_provider_error(provider: &str, err: &TranslatorError) {
    write_error(&format!("[Provider ERROR] {provider}: {err}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_shutdown() {
    write_info("\n[Shutdown] Stopped accepting connections");
}
