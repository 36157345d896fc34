//! Line-oriented color picker driving the presenter.

use crate::presenter::{PresenterError, PresenterHandle, Snapshot};
use glasses_core::{ColorChoice, ParseColorError};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[derive(Error, Debug)]
pub enum PickerError {
    #[error("failed to read picker input: {0}")]
    Input(#[from] std::io::Error),
    #[error(transparent)]
    Presenter(#[from] PresenterError),
}

/// What one line of picker input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerAction {
    Select(ColorChoice),
    /// Blank line.
    Skip,
    Quit,
    /// Unknown label; the selection stays as it is.
    Rejected(ParseColorError),
}

/// Interpret one input line. Labels and `quit` are case-insensitive.
pub fn handle_line(line: &str) -> PickerAction {
    let input = line.trim();
    if input.is_empty() {
        return PickerAction::Skip;
    }
    if input.eq_ignore_ascii_case("quit") {
        return PickerAction::Quit;
    }
    match input.parse() {
        Ok(color) => PickerAction::Select(color),
        Err(e) => PickerAction::Rejected(e),
    }
}

/// Outcome reported for each line that was not skipped.
pub enum PickerEvent<'a> {
    /// The scene was replaced for the selected color.
    Presented(&'a Snapshot),
    Rejected(&'a ParseColorError),
}

/// Read lines from `input` until `quit` or EOF, selecting each valid color.
pub async fn run_picker<R, F>(
    handle: &PresenterHandle,
    input: R,
    mut on_event: F,
) -> Result<(), PickerError>
where
    R: AsyncBufRead + Unpin,
    F: FnMut(PickerEvent<'_>),
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match handle_line(&line) {
            PickerAction::Skip => continue,
            PickerAction::Quit => {
                tracing::info!("picker closed");
                break;
            }
            PickerAction::Select(color) => {
                let snapshot = handle.select(color).await?;
                on_event(PickerEvent::Presented(&snapshot));
            }
            PickerAction::Rejected(e) => {
                tracing::warn!(input = line.trim(), "ignoring picker input");
                on_event(PickerEvent::Rejected(&e));
            }
        }
    }
    Ok(())
}
