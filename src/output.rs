use serde::Serialize;
use thiserror::Error;

use crate::participants::ParticipantRecord;
use crate::service::ChatRecord;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JsonFormat {
    Pretty,
    Compact,
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantListOutput {
    pub chat: ChatRecord,
    pub participants: Vec<ParticipantRecord>,
}

pub fn resolve_json_format(compact: bool) -> JsonFormat {
    if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    }
}

pub fn json_string<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String, OutputError> {
    let payload = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value)?,
        JsonFormat::Compact => serde_json::to_string(value)?,
    };
    Ok(payload)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<(), OutputError> {
    let payload = json_string(value, format)?;
    println!("{payload}");
    Ok(())
}

pub fn participant_lines(output: &ParticipantListOutput) -> Vec<String> {
    output.participants.iter().map(ToString::to_string).collect()
}

pub fn print_participants(
    output: &ParticipantListOutput,
    json: Option<JsonFormat>,
) -> Result<(), OutputError> {
    if let Some(format) = json {
        return print_json(output, format);
    }

    for line in participant_lines(output) {
        println!("{line}");
    }
    Ok(())
}
