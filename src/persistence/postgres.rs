//! PostgreSQL implementation of the hotel store.
//!
//! Bookings live in a `JSONB` array column on the hotel row, so appending a
//! booking is a single `UPDATE ... SET bookings = bookings || $2`, which
//! Postgres applies atomically per row.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::models::{HOTEL_COLUMNS, HotelRow};
use super::{HotelStore, SearchResult};
use crate::domain::{Booking, Hotel, HotelId, PageRequest, SearchQuery, SortOption};
use crate::error::BookingError;

/// PostgreSQL-backed hotel store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresHotelStore {
    pool: PgPool,
}

impl PostgresHotelStore {
    /// Creates a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies pending migrations from `migrations/`.
    ///
    /// # Errors
    ///
    /// Returns a [`BookingError::PersistenceError`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), BookingError> {
        sqlx::migrate!()
            .run(&self.pool)
            .await
            .map_err(|e| BookingError::PersistenceError(e.to_string()))
    }
}

fn db_error(e: sqlx::Error) -> BookingError {
    BookingError::PersistenceError(e.to_string())
}

fn into_hotels(rows: Vec<HotelRow>) -> Result<Vec<Hotel>, BookingError> {
    rows.into_iter().map(Hotel::try_from).collect()
}

/// Escapes `LIKE` metacharacters so the destination is matched literally.
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Appends a `WHERE` clause for every constraint set on `query`.
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, query: &SearchQuery) {
    builder.push(" WHERE TRUE");

    if let Some(destination) = &query.destination {
        let pattern = format!("%{}%", escape_like(destination));
        builder
            .push(" AND (city ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR country ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
    if let Some(min) = query.min_adults {
        builder.push(" AND adult_count >= ").push_bind(i64::from(min));
    }
    if let Some(min) = query.min_children {
        builder.push(" AND child_count >= ").push_bind(i64::from(min));
    }
    if let Some(facilities) = &query.all_facilities {
        builder
            .push(" AND facilities @> ")
            .push_bind(facilities.clone());
    }
    if let Some(types) = &query.type_in {
        builder.push(" AND hotel_type = ANY(").push_bind(types.clone()).push(")");
    }
    if let Some(stars) = &query.stars_in {
        let stars: Vec<i16> = stars.iter().map(|s| i16::from(*s)).collect();
        builder.push(" AND star_rating = ANY(").push_bind(stars).push(")");
    }
    if let Some(max) = query.max_price {
        builder.push(" AND price_per_night <= ").push_bind(max);
    }
}

/// `id` breaks ties so pages never overlap.
const fn order_clause(sort: SortOption) -> &'static str {
    match sort {
        SortOption::Unsorted => " ORDER BY created_at, id",
        SortOption::StarRating => " ORDER BY star_rating DESC, created_at, id",
        SortOption::PricePerNightAsc => " ORDER BY price_per_night ASC, created_at, id",
        SortOption::PricePerNightDesc => " ORDER BY price_per_night DESC, created_at, id",
    }
}

#[async_trait]
impl HotelStore for PostgresHotelStore {
    async fn insert(&self, hotel: Hotel) -> Result<HotelId, BookingError> {
        let result = sqlx::query(
            "INSERT INTO hotels (id, user_id, name, city, country, description, hotel_type, \
             adult_count, child_count, facilities, price_per_night, star_rating, image_urls, \
             last_updated, bookings) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(*hotel.id.as_uuid())
        .bind(&hotel.user_id)
        .bind(&hotel.name)
        .bind(&hotel.city)
        .bind(&hotel.country)
        .bind(&hotel.description)
        .bind(&hotel.hotel_type)
        .bind(i64::from(hotel.adult_count))
        .bind(i64::from(hotel.child_count))
        .bind(&hotel.facilities)
        .bind(hotel.price_per_night)
        .bind(i16::from(hotel.star_rating))
        .bind(&hotel.image_urls)
        .bind(hotel.last_updated)
        .bind(Json(&hotel.bookings))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Err(BookingError::InvalidRequest(format!(
                "hotel {} already exists",
                hotel.id
            )));
        }
        Ok(hotel.id)
    }

    async fn find_by_id(&self, id: HotelId) -> Result<Option<Hotel>, BookingError> {
        let row = sqlx::query_as::<_, HotelRow>(&format!(
            "SELECT {HOTEL_COLUMNS} FROM hotels WHERE id = $1"
        ))
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(Hotel::try_from).transpose()
    }

    async fn list(&self) -> Result<Vec<Hotel>, BookingError> {
        let rows = sqlx::query_as::<_, HotelRow>(&format!(
            "SELECT {HOTEL_COLUMNS} FROM hotels ORDER BY last_updated DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        into_hotels(rows)
    }

    async fn search(
        &self,
        query: &SearchQuery,
        sort: SortOption,
        page: PageRequest,
    ) -> Result<SearchResult, BookingError> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM hotels");
        push_filters(&mut count, query);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;

        let mut select = QueryBuilder::<Postgres>::new(format!("SELECT {HOTEL_COLUMNS} FROM hotels"));
        push_filters(&mut select, query);
        select
            .push(order_clause(sort))
            .push(" LIMIT ")
            .push_bind(i64::try_from(page.limit()).unwrap_or(i64::MAX))
            .push(" OFFSET ")
            .push_bind(i64::try_from(page.offset()).unwrap_or(i64::MAX));
        let rows = select
            .build_query_as::<HotelRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(SearchResult {
            hotels: into_hotels(rows)?,
            total: u64::try_from(total).unwrap_or(0),
        })
    }

    async fn append_booking(&self, id: HotelId, booking: Booking) -> Result<bool, BookingError> {
        let result = sqlx::query(
            "UPDATE hotels SET bookings = bookings || jsonb_build_array($2::jsonb) WHERE id = $1",
        )
        .bind(*id.as_uuid())
        .bind(Json(&booking))
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_booked_by(&self, user_id: &str) -> Result<Vec<Hotel>, BookingError> {
        let rows = sqlx::query_as::<_, HotelRow>(&format!(
            "SELECT {HOTEL_COLUMNS} FROM hotels \
             WHERE bookings @> jsonb_build_array(jsonb_build_object('userId', $1::text)) \
             ORDER BY last_updated DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        Ok(into_hotels(rows)?
            .iter()
            .map(|h| h.with_bookings_of(user_id))
            .collect())
    }
}
