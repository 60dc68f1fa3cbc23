use anyhow::Context;

use crate::snacks::dto::{GenerateSnackRequest, SnackDetailsResponse};
use crate::snacks::repo;
use crate::state::AppState;

/// Runs the generator and persists the result. The generator itself never
/// fails (it falls back to a deterministic recipe), so the only error path
/// here is the database write.
pub async fn generate_and_store(
    state: &AppState,
    prefs: &GenerateSnackRequest,
) -> anyhow::Result<SnackDetailsResponse> {
    let ai = crate::ai::generate(state.ai.as_ref(), state.connectivity.as_ref(), prefs).await;

    let snack = repo::insert(&state.db, prefs, &ai)
        .await
        .context("save snack recommendation")?;

    Ok(SnackDetailsResponse::from(snack))
}
