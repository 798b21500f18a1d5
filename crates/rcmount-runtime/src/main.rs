//! rcmount: status and mount manager for rclone remotes.
//! One-shot binary: every invocation polls the daemon from scratch and
//! either renders the remote listing or dispatches a single action.

use clap::Parser;

mod cli;
mod cmd_status;
mod dispatch;
mod notify;
mod render;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    let settings = args.settings();

    let default_filter = if settings.verbose { "debug" } else { "info" };
    let filter = std::env::var("RCMOUNT_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| default_filter.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let command = args.command.unwrap_or(cli::Command::Status);

    match command {
        cli::Command::Status => {
            cmd_status::cmd_status(&settings).await?;
        }
        cli::Command::Mount {
            name,
            mount_point,
            volume,
        } => {
            dispatch::dispatch(
                &settings,
                dispatch::Request::Mount {
                    name,
                    mount_point,
                    volume,
                },
            )
            .await?;
        }
        cli::Command::Unmount { target } => {
            dispatch::dispatch(&settings, dispatch::Request::Unmount { target }).await?;
        }
        cli::Command::Open { target } => {
            dispatch::dispatch(&settings, dispatch::Request::Open { target }).await?;
        }
    }

    Ok(())
}
