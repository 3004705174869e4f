use std::sync::Arc;

use client_logging::client_info;
use msgboard_client::{ClientBuildError, ClientSettings, HelloStore, MessageStore, ReqwestApi};
use msgboard_core::{postable_content, CONTENT_LIMIT};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Client(#[from] ClientBuildError),
    #[error("{0}")]
    Operation(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Show,
    Post(String),
    Remove(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    base_url: String,
    command: Command,
}

pub fn parse_args(mut args: impl Iterator<Item = String>) -> Result<CliOptions, AppError> {
    let mut base_url = ClientSettings::default().base_url;
    let mut command = Command::Show;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--base" => {
                base_url = args
                    .next()
                    .ok_or_else(|| AppError::Usage("--base requires a url".to_string()))?;
            }
            "show" => command = Command::Show,
            "post" => {
                let content = args
                    .next()
                    .ok_or_else(|| AppError::Usage("post requires the message content".to_string()))?;
                command = Command::Post(content);
            }
            "remove" => {
                let id = args
                    .next()
                    .ok_or_else(|| AppError::Usage("remove requires a message id".to_string()))?
                    .parse()
                    .map_err(|_| AppError::Usage("remove requires a numeric id".to_string()))?;
                command = Command::Remove(id);
            }
            other => {
                return Err(AppError::Usage(format!("unknown argument {other:?}")));
            }
        }
    }

    Ok(CliOptions { base_url, command })
}

pub async fn run(options: CliOptions) -> Result<(), AppError> {
    client_info!("command {:?} against {}", options.command, options.base_url);

    let api = Arc::new(ReqwestApi::new(ClientSettings {
        base_url: options.base_url,
        ..ClientSettings::default()
    })?);
    let hello = HelloStore::new(api.clone());
    let messages = MessageStore::new(api);

    hello.load().await;
    let greeting = hello.state();
    match greeting.error {
        // The greeting is informational; a dead probe is not fatal here.
        Some(error) => println!("backend unreachable ({error})"),
        None => println!("{}", greeting.value),
    }

    match options.command {
        Command::Show => messages.load().await,
        Command::Post(content) => {
            if postable_content(&content).is_none() {
                return Err(AppError::Usage(format!(
                    "message must be 1..={CONTENT_LIMIT} characters after trimming"
                )));
            }
            messages.create(&content).await;
        }
        Command::Remove(id) => messages.remove(id).await,
    }

    let state = messages.state();
    if let Some(error) = state.error {
        return Err(AppError::Operation(error));
    }

    if state.value.is_empty() {
        println!("no messages yet");
    } else {
        println!("{} message(s):", messages.count());
        for message in &state.value {
            println!("  [{}] {}  ({})", message.id, message.content, message.created_at);
        }
    }

    Ok(())
}
