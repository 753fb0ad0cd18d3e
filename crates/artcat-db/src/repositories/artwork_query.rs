//! Translation of search criteria into SQL.

use artcat_core::{ArtworkFilter, ArtworkQuery, ArtworkSort};
use sqlx::{QueryBuilder, Sqlite};

use super::row_mappers::ARTWORK_SELECT_COLUMNS;

/// Escape `LIKE` wildcards and wrap the needle for a substring match.
pub fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn push_filter<'a>(qb: &mut QueryBuilder<'a, Sqlite>, filter: &ArtworkFilter) {
    qb.push(" WHERE 1 = 1");

    // search_text is lowercased on write, so any script compares correctly.
    if let Some(ref query) = filter.query {
        qb.push(" AND instr(search_text, ")
            .push_bind(query.to_lowercase())
            .push(") > 0");
    }
    if let Some(ref artist) = filter.artist {
        qb.push(" AND artist LIKE ")
            .push_bind(like_pattern(artist))
            .push(" ESCAPE '\\'");
    }
    if let Some(ref medium) = filter.medium {
        qb.push(" AND medium LIKE ")
            .push_bind(like_pattern(medium))
            .push(" ESCAPE '\\'");
    }
    if let Some(min) = filter.year_min {
        qb.push(" AND year >= ").push_bind(min);
    }
    if let Some(max) = filter.year_max {
        qb.push(" AND year <= ").push_bind(max);
    }
    if let Some(min) = filter.width_min {
        qb.push(" AND width_cm >= ").push_bind(min);
    }
    if let Some(max) = filter.width_max {
        qb.push(" AND width_cm <= ").push_bind(max);
    }
}

// Generated ids order by their number (so A10000 follows A9999); ids in
// any other format come after them, alphabetically.
const fn order_clause(sort: ArtworkSort) -> &'static str {
    match sort {
        ArtworkSort::IdAsc => " ORDER BY id_seq IS NULL, id_seq ASC, id ASC",
        ArtworkSort::IdDesc => " ORDER BY id_seq IS NULL, id_seq DESC, id DESC",
        ArtworkSort::YearAsc => {
            " ORDER BY year IS NULL, year ASC, id_seq IS NULL, id_seq ASC, id ASC"
        }
        ArtworkSort::YearDesc => {
            " ORDER BY year IS NULL, year DESC, id_seq IS NULL, id_seq ASC, id ASC"
        }
        ArtworkSort::TitleAsc => {
            " ORDER BY title COLLATE NOCASE ASC, id_seq IS NULL, id_seq ASC, id ASC"
        }
    }
}

/// Build the SELECT for a search request.
pub fn search_query(query: &ArtworkQuery) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::new(format!("SELECT {ARTWORK_SELECT_COLUMNS} FROM artworks"));
    push_filter(&mut qb, &query.filter);
    qb.push(order_clause(query.sort));

    // SQLite treats a negative LIMIT as "no limit".
    let limit = query.page.limit.map_or(-1, i64::from);
    qb.push(" LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(i64::from(query.page.offset));
    qb
}

/// Build the COUNT for a filter.
pub fn count_query(filter: &ArtworkFilter) -> QueryBuilder<'static, Sqlite> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM artworks");
    push_filter(&mut qb, filter);
    qb
}
