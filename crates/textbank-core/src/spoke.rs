//! Read-only queries against the Spoke postgres database.
//!
//! Everything here is async because sqlx is; callers that live in the
//! otherwise-blocking command path bridge with a tokio runtime. Columns are
//! cast in SQL so the row shapes decode the same way regardless of how a
//! given Spoke deployment typed its ids and timestamps.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgPool;
use tracing::debug;

use crate::config::SpokeConfig;
use crate::error::Result;

/// A canvass answer joined with its VAN question mapping, ready to post.
#[derive(Debug, Clone)]
pub struct CanvassResponse {
    pub qr_id: i64,
    pub qr_created_at: DateTime<Utc>,
    pub qr_value: String,
    pub cc_external_id: String,
    pub external_response: String,
    pub external_question: String,
}

const CANVASS_RESPONSES_SQL: &str = r#"
SELECT qr.id::bigint AS qr_id,
       qr.created_at::timestamptz AS qr_created_at,
       qr.value AS qr_value,
       cc.external_id AS cc_external_id,
       istep.external_response AS external_response,
       istep.external_question AS external_question
FROM question_response qr
JOIN campaign_contact cc ON cc.id = qr.campaign_contact_id
JOIN interaction_step istep ON istep.id = qr.interaction_step_id
WHERE cc.external_id IS NOT NULL
  AND istep.external_question IS NOT NULL
ORDER BY qr.id
"#;

const OPTOUT_CELLS_SQL: &str = "SELECT DISTINCT cell FROM opt_out ORDER BY cell";

pub async fn connect(config: &SpokeConfig) -> Result<PgPool> {
    let pool = PgPool::connect(&config.database_url).await?;
    Ok(pool)
}

/// All canvass responses that carry a VAN question mapping.
pub async fn fetch_canvass_responses(pool: &PgPool) -> Result<Vec<CanvassResponse>> {
    let rows: Vec<(i64, DateTime<Utc>, String, String, String, String)> =
        sqlx::query_as(CANVASS_RESPONSES_SQL).fetch_all(pool).await?;
    debug!(rows = rows.len(), "fetched canvass responses");
    Ok(rows
        .into_iter()
        .map(
            |(qr_id, qr_created_at, qr_value, cc_external_id, external_response, external_question)| {
                CanvassResponse {
                    qr_id,
                    qr_created_at,
                    qr_value,
                    cc_external_id,
                    external_response,
                    external_question,
                }
            },
        )
        .collect())
}

/// Every opted-out cell number, deduplicated and sorted.
pub async fn fetch_optout_cells(pool: &PgPool) -> Result<Vec<String>> {
    let rows: Vec<(String,)> = sqlx::query_as(OPTOUT_CELLS_SQL).fetch_all(pool).await?;
    debug!(rows = rows.len(), "fetched opt-out cells");
    Ok(rows.into_iter().map(|(cell,)| cell).collect())
}
