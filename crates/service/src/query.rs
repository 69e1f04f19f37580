//! Filter-by-example building blocks shared by the SeaORM repositories.
//!
//! Text fields match case-insensitively by substring, ids by equality.

use sea_orm::sea_query::{Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, Select};

use crate::pagination::PageRequest;

const LIKE_ESCAPE: char = '\\';

/// `lower(col) LIKE '%needle%'` with LIKE metacharacters in `needle` escaped.
pub fn contains_ci<C: ColumnTrait>(col: C, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
    Expr::expr(Func::lower(Expr::col(col.as_column_ref()))).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

pub fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if ch == '%' || ch == '_' || ch == LIKE_ESCAPE {
            out.push(LIKE_ESCAPE);
        }
        out.push(ch);
    }
    out
}

/// Text filter values that constrain nothing are treated as absent.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Run `select` for one page and count every row it matches.
///
/// A page whose offset cannot be expressed in SQL is empty.
pub async fn fetch_page<E, C>(db: &C, select: Select<E>, page: PageRequest) -> Result<(Vec<E::Model>, u64), DbErr>
where
    E: EntityTrait,
    E::Model: Sync,
    C: ConnectionTrait,
{
    let paginator = select.paginate(db, page.size);
    let total = paginator.num_items().await?;
    if page.size == 0 || page.offset().is_none() {
        return Ok((Vec::new(), total));
    }
    let items = paginator.fetch_page(page.page).await?;
    Ok((items, total))
}
