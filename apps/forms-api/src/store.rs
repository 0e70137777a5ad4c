//! Acta summaries and property records

use shared_types::{ActaSummary, Alicuota};
use sqlx::SqlitePool;

use crate::models::{DbActa, DbAlicuota, NewAlicuotaRequest};

/// Record a generated acta for `group_id`, returning the row id
pub async fn insert_acta(
    pool: &SqlitePool,
    summary: &ActaSummary,
    group_id: i64,
    user_name: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO actas (makedate, cianame, ciatype, celebdate, accnumber, primary_group_id, user_name, accdata)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&summary.makedate)
    .bind(&summary.cianame)
    .bind(&summary.ciatype)
    .bind(&summary.celebdate)
    .bind(summary.accnumber)
    .bind(group_id)
    .bind(user_name)
    .bind(&summary.accdata)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Actas of a group, newest first
pub async fn list_actas(pool: &SqlitePool, group_id: i64) -> Result<Vec<DbActa>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT id, makedate, cianame, ciatype, celebdate, accnumber, primary_group_id, user_name, accdata
        FROM actas
        WHERE primary_group_id = ?
        ORDER BY id DESC
        "#,
    )
    .bind(group_id)
    .fetch_all(pool)
    .await
}

pub async fn list_alicuotas(pool: &SqlitePool) -> Result<Vec<Alicuota>, sqlx::Error> {
    let rows: Vec<DbAlicuota> = sqlx::query_as(
        r#"
        SELECT id, alicuota, info1, info2, info3, info4, info5
        FROM alicuotas
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Alicuota::from).collect())
}

pub async fn get_alicuota(pool: &SqlitePool, id: i64) -> Result<Option<Alicuota>, sqlx::Error> {
    let row: Option<DbAlicuota> = sqlx::query_as(
        r#"
        SELECT id, alicuota, info1, info2, info3, info4, info5
        FROM alicuotas
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Alicuota::from))
}

pub async fn insert_alicuota(
    pool: &SqlitePool,
    req: &NewAlicuotaRequest,
) -> Result<Alicuota, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO alicuotas (alicuota, info1, info2, info3, info4, info5)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(req.alicuota.trim())
    .bind(req.info1.trim())
    .bind(req.info2.trim())
    .bind(req.info3.trim())
    .bind(req.info4.trim())
    .bind(req.info5.trim())
    .execute(pool)
    .await?;

    Ok(Alicuota {
        id: result.last_insert_rowid(),
        alicuota: req.alicuota.trim().to_string(),
        info1: req.info1.trim().to_string(),
        info2: req.info2.trim().to_string(),
        info3: req.info3.trim().to_string(),
        info4: req.info4.trim().to_string(),
        info5: req.info5.trim().to_string(),
    })
}
