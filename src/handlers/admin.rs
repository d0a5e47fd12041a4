use std::sync::Arc;

use axum::extract::State;

use super::{json, ApiResp, Consts, Ctx, Result};
use crate::models::Stats;

/// Get corpus stats.
pub async fn get_stats(State(ctx): State<Arc<Ctx>>) -> Result<ApiResp<Stats>> {
    Ok(json(Stats {
        phrases: ctx.corpus.len(),
        loaded: ctx.is_loaded(),
    }))
}

/// Get public config.
pub async fn get_config(State(ctx): State<Arc<Ctx>>) -> Result<ApiResp<Consts>> {
    Ok(json(ctx.consts.clone()))
}
