use sqlx::SqlitePool;

use crate::models::focus::{FocusCategory, FocusLabelEntry};

/// All five categories with any user override applied.
pub async fn list_labels(pool: &SqlitePool) -> sqlx::Result<Vec<FocusLabelEntry>> {
    let overrides: Vec<(FocusCategory, String)> =
        sqlx::query_as("SELECT focus_id, label FROM focus_labels")
            .fetch_all(pool)
            .await?;

    Ok(FocusCategory::ALL
        .into_iter()
        .map(|c| {
            let custom = overrides.iter().find(|(id, _)| *id == c).map(|(_, l)| l);
            FocusLabelEntry {
                id: c,
                label: custom.cloned().unwrap_or_else(|| c.default_label().into()),
                default_label: c.default_label(),
                color: c.color(),
                is_custom: custom.is_some(),
            }
        })
        .collect())
}

/// Set a custom label. Blank input restores the default instead.
pub async fn set_label(
    pool: &SqlitePool,
    focus: FocusCategory,
    label: &str,
) -> sqlx::Result<FocusLabelEntry> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        clear_label(pool, focus).await?;
    } else {
        sqlx::query(
            r#"
            INSERT INTO focus_labels (focus_id, label) VALUES (?1, ?2)
            ON CONFLICT (focus_id) DO UPDATE SET label = excluded.label
            "#,
        )
        .bind(focus)
        .bind(trimmed)
        .execute(pool)
        .await?;
    }
    get_label(pool, focus).await
}

pub async fn clear_label(pool: &SqlitePool, focus: FocusCategory) -> sqlx::Result<()> {
    sqlx::query("DELETE FROM focus_labels WHERE focus_id = ?1")
        .bind(focus)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn get_label(pool: &SqlitePool, focus: FocusCategory) -> sqlx::Result<FocusLabelEntry> {
    let custom: Option<String> =
        sqlx::query_scalar("SELECT label FROM focus_labels WHERE focus_id = ?1")
            .bind(focus)
            .fetch_optional(pool)
            .await?;
    let is_custom = custom.is_some();
    Ok(FocusLabelEntry {
        id: focus,
        label: custom.unwrap_or_else(|| focus.default_label().into()),
        default_label: focus.default_label(),
        color: focus.color(),
        is_custom,
    })
}
