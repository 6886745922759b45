/// Query building blocks shared by the manga list repositories.
///
/// Everything here runs on a borrowed connection so callers can compose the
/// helpers inside one `spawn_blocking` call or one transaction.
use std::collections::{HashMap, HashSet};

use diesel::dsl::{count_star, max};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

use super::mapper::{item_from_model, summary_from_models};
use crate::modules::manga_list::domain::entities::{MangaListItem, MangaSummary};
use crate::modules::manga_list::domain::services::ordering::{
    classify_bulk_candidates, dedupe_ids, next_order_after, order_range_exhausted,
};
use crate::modules::manga_list::domain::value_objects::BulkValidation;
use crate::modules::manga_list::infrastructure::models::{
    MangaListItemModel, MangaModel, MangaTranslationModel,
};
use crate::schema::{manga, manga_list_items, manga_list_likes, manga_translations};
use crate::shared::errors::AppResult;

/// `max(order) + 1` for the list, `0` when it has no members.
pub fn next_order(conn: &mut PgConnection, list_id: Uuid) -> AppResult<i32> {
    let current: Option<i32> = manga_list_items::table
        .filter(manga_list_items::list_id.eq(list_id))
        .select(max(manga_list_items::order_value))
        .first(conn)?;

    next_order_after(current).ok_or_else(|| order_range_exhausted(list_id))
}

/// Two reads: catalog presence and current membership of the candidates.
pub fn classify_candidates(
    conn: &mut PgConnection,
    list_id: Uuid,
    candidates: &[Uuid],
) -> QueryResult<BulkValidation> {
    let candidates = dedupe_ids(candidates);
    if candidates.is_empty() {
        return Ok(BulkValidation::default());
    }

    let in_catalog: HashSet<Uuid> = manga::table
        .filter(manga::id.eq_any(&candidates))
        .select(manga::id)
        .load::<Uuid>(conn)?
        .into_iter()
        .collect();

    let members: HashSet<Uuid> = manga_list_items::table
        .filter(manga_list_items::list_id.eq(list_id))
        .filter(manga_list_items::manga_id.eq_any(&candidates))
        .select(manga_list_items::manga_id)
        .load::<Uuid>(conn)?
        .into_iter()
        .collect();

    Ok(classify_bulk_candidates(&candidates, &in_catalog, &members))
}

/// Members of a list in display order: `order` ascending, ties by `added_at`.
pub fn load_items(conn: &mut PgConnection, list_id: Uuid) -> QueryResult<Vec<MangaListItem>> {
    let rows = manga_list_items::table
        .filter(manga_list_items::list_id.eq(list_id))
        .order((
            manga_list_items::order_value.asc(),
            manga_list_items::added_at.asc(),
        ))
        .select(MangaListItemModel::as_select())
        .load::<MangaListItemModel>(conn)?;

    attach_summaries(conn, rows)
}

/// Convert membership rows to entities carrying their manga projection.
pub fn attach_summaries(
    conn: &mut PgConnection,
    rows: Vec<MangaListItemModel>,
) -> QueryResult<Vec<MangaListItem>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let manga_ids = dedupe_ids(&rows.iter().map(|r| r.manga_id).collect::<Vec<_>>());
    let summaries = load_manga_summaries(conn, &manga_ids)?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let manga = summaries.get(&row.manga_id).cloned();
            item_from_model(row, manga)
        })
        .collect())
}

pub fn load_manga_summaries(
    conn: &mut PgConnection,
    manga_ids: &[Uuid],
) -> QueryResult<HashMap<Uuid, MangaSummary>> {
    let mangas = manga::table
        .filter(manga::id.eq_any(manga_ids))
        .select(MangaModel::as_select())
        .load::<MangaModel>(conn)?;

    let translations = MangaTranslationModel::belonging_to(&mangas)
        .select(MangaTranslationModel::as_select())
        .order(manga_translations::language.asc())
        .load::<MangaTranslationModel>(conn)?;
    let grouped = translations.grouped_by(&mangas);

    Ok(mangas
        .into_iter()
        .zip(grouped)
        .map(|(m, t)| (m.id, summary_from_models(m, t)))
        .collect())
}

/// Member count per list; lists without members are absent from the map.
pub fn member_counts(conn: &mut PgConnection, list_ids: &[Uuid]) -> QueryResult<HashMap<Uuid, i64>> {
    let rows = manga_list_items::table
        .filter(manga_list_items::list_id.eq_any(list_ids))
        .group_by(manga_list_items::list_id)
        .select((manga_list_items::list_id, count_star()))
        .load::<(Uuid, i64)>(conn)?;

    Ok(rows.into_iter().collect())
}

/// Like count per list; lists without likes are absent from the map.
pub fn like_counts(conn: &mut PgConnection, list_ids: &[Uuid]) -> QueryResult<HashMap<Uuid, i64>> {
    let rows = manga_list_likes::table
        .filter(manga_list_likes::list_id.eq_any(list_ids))
        .group_by(manga_list_likes::list_id)
        .select((manga_list_likes::list_id, count_star()))
        .load::<(Uuid, i64)>(conn)?;

    Ok(rows.into_iter().collect())
}

/// Substring pattern for `ILIKE` with the wildcard characters escaped.
pub fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_wraps_term() {
        assert_eq!(like_pattern("cozy"), "%cozy%");
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("100%_done"), "%100\\%\\_done%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
