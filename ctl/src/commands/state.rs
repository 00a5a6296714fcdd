use std::path::PathBuf;

use clap::Parser;
use mcontrol_common::{params::UpdateStateParams, views::MachineState};
use mcontrol_db::storage::StateStore;
use serde_json::Value;

#[derive(Clone, Parser)]
pub struct ImportStateParams {
    /// JSON file holding a (partial) state document.
    #[clap(short, long)]
    pub file: PathBuf,
}

/// Reads the state the same way `GET /api/state` does and renders it as
/// pretty JSON.
pub async fn show_state(stg: &impl StateStore) -> anyhow::Result<String> {
    let state: MachineState = stg.get_state().await?.into();
    Ok(serde_json::to_string_pretty(&state)?)
}

pub async fn import_state(
    stg: &impl StateStore,
    ImportStateParams { file }: ImportStateParams,
) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(&file)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", file.display()))?;

    let patch = parse_patch(&contents)?;
    stg.put_state(&patch).await?;

    Ok(())
}

fn parse_patch(contents: &str) -> anyhow::Result<UpdateStateParams> {
    match serde_json::from_str::<Value>(contents)? {
        Value::Object(fields) => Ok(UpdateStateParams::new(fields)),
        _ => anyhow::bail!("State file must contain a JSON object"),
    }
}
