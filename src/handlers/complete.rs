use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
};

use super::{clamp_limit, json, ApiErr, ApiResp, Ctx, Result};
use crate::{autocomplete, models::CompletionResults};

/// Completion query params.
#[derive(Debug, serde::Deserialize, Default)]
pub struct CompleteQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub limit: usize,
}

/// Complete a partial input.
pub async fn complete(
    State(ctx): State<Arc<Ctx>>,
    query: std::result::Result<Query<CompleteQuery>, QueryRejection>,
) -> Result<ApiResp<CompletionResults>> {
    let Query(query) =
        query.map_err(|e| ApiErr::new(e.body_text(), StatusCode::BAD_REQUEST))?;

    if query.q.trim().is_empty() {
        return Err(ApiErr::new("query is required", StatusCode::BAD_REQUEST));
    }

    if !ctx.is_loaded() {
        return Err(ApiErr::new(
            "corpus is still loading",
            StatusCode::SERVICE_UNAVAILABLE,
        ));
    }

    let limit = clamp_limit(
        query.limit,
        ctx.consts.max_results,
        ctx.consts.default_results,
    );

    let mut results = autocomplete::complete(&ctx.corpus, &query.q);
    let total = results.len();
    results.truncate(limit);

    log::debug!("complete '{}': {} results", query.q, total);

    Ok(json(CompletionResults {
        query: query.q,
        results,
        total,
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use axum::{http::Uri, response::IntoResponse};

    use super::*;
    use crate::{corpus::Corpus, handlers::Consts, models::Phrase};

    fn ctx(loaded: bool) -> Arc<Ctx> {
        let corpus: Corpus = [
            Phrase::unscored("whatever"),
            Phrase::new("a very common thing", 3),
            Phrase::new("a very common phrase", 2),
            Phrase::new("a very good call", 1),
            Phrase::new("welcome to the", 0),
            Phrase::new("welcome to my", 0),
        ]
        .into_iter()
        .collect();

        Arc::new(Ctx {
            corpus: Arc::new(corpus),
            loaded: AtomicBool::new(loaded),
            consts: Consts {
                default_results: 2,
                max_results: 10,
            },
        })
    }

    fn query(
        q: &str,
        limit: usize,
    ) -> std::result::Result<Query<CompleteQuery>, QueryRejection> {
        Ok(Query(CompleteQuery {
            q: q.to_string(),
            limit,
        }))
    }

    #[tokio::test]
    async fn completes_and_truncates() {
        let resp = complete(State(ctx(true)), query("a ver", 0)).await.unwrap();
        let data = resp.data.unwrap();

        assert_eq!(data.query, "a ver");
        assert_eq!(data.total, 3);
        assert_eq!(data.results, vec!["a very common thing", "a very common phrase"]);

        let resp = complete(State(ctx(true)), query("WELtm", 5)).await.unwrap();
        assert_eq!(resp.data.unwrap().results, vec!["welcome to my"]);
    }

    #[tokio::test]
    async fn blank_query_rejected() {
        let err = complete(State(ctx(true)), query("   ", 0)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unavailable_while_loading() {
        let c = ctx(false);
        let err = complete(State(c.clone()), query("a ver", 0)).await.unwrap_err();
        assert_eq!(err.status, StatusCode::SERVICE_UNAVAILABLE);

        c.set_loaded();
        assert!(complete(State(c), query("a ver", 0)).await.is_ok());
    }

    #[tokio::test]
    async fn bad_query_string_gets_json_error() {
        let uri: Uri = "/api/complete?q=a%20ver&limit=abc".parse().unwrap();
        let query = Query::<CompleteQuery>::try_from_uri(&uri);
        assert!(query.is_err());

        let err = complete(State(ctx(true)), query).await.unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);

        let resp = err.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let v: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(v["data"].is_null());
        assert!(v["message"].as_str().unwrap().contains("query string"));
    }

    #[tokio::test]
    async fn parses_query_string() {
        let uri: Uri = "/api/complete?q=weltm&limit=1".parse().unwrap();
        let query = Query::<CompleteQuery>::try_from_uri(&uri);

        let resp = complete(State(ctx(true)), query).await.unwrap();
        assert_eq!(resp.data.unwrap().results, vec!["welcome to my"]);
    }
}
