//! Command dispatch and handlers.

pub mod export;
pub mod map;
pub mod show;

use tracing::info;

use crate::cassette::session::RecordingSession;
use crate::cli::Command;
use crate::config::Settings;
use crate::context::ServiceContext;

/// Dispatch a parsed command to its handler.
///
/// `show` runs offline. The other commands get a context chosen by the
/// settings: replayed from `NDVI_REPLAY`, recorded into `NDVI_RECORD`, or
/// live.
///
/// # Errors
///
/// Returns an error string if context setup or the selected command fails.
pub fn dispatch(command: &Command, settings: &Settings) -> Result<(), String> {
    if let Command::Show { years } = command {
        return show::run(years.selection()?);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;

    runtime.block_on(dispatch_async(command, settings))
}

async fn dispatch_async(command: &Command, settings: &Settings) -> Result<(), String> {
    if let Some(dir) = &settings.replay_dir {
        info!(dir = %dir.display(), "replaying cassettes");
        let ctx = ServiceContext::replaying_dir(dir)?;
        return dispatch_with_context(command, &ctx).await;
    }

    if let Some(root) = &settings.record_dir {
        // Authenticate before creating the cassette directory.
        let live = ServiceContext::live(settings).await?;
        let session = RecordingSession::new(root)?;
        info!(dir = %session.output_dir().display(), "recording cassettes");
        let ctx = ServiceContext::recording(live, &session);
        let result = dispatch_with_context(command, &ctx).await;

        // Drop context first to release Arc references
        drop(ctx);
        finish_recording(session)?;
        return result;
    }

    let ctx = ServiceContext::live(settings).await?;
    dispatch_with_context(command, &ctx).await
}

/// Dispatch a command with the given service context.
async fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Map { years, output, height } => {
            map::run(ctx, years.selection()?, output, *height).await
        }
        Command::Export { years } => export::run(ctx, years.selection()?).await,
        Command::Show { years } => show::run(years.selection()?),
    }
}

/// Finish a recording session and print the output directory.
fn finish_recording(session: RecordingSession) -> Result<(), String> {
    let output_dir = session.finish()?;
    eprintln!("Recording saved to: {}", output_dir.display());
    Ok(())
}
