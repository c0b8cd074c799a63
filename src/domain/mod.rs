//! Domain layer: hotels, bookings, search and payment intents.
//!
//! Everything here is storage- and transport-agnostic. Stores and the
//! payment processor client consume these types; handlers convert them to
//! and from JSON.

pub mod hotel;
pub mod hotel_id;
pub mod pagination;
pub mod payment;
pub mod search;

pub use hotel::{Booking, BookingDetails, Hotel};
pub use hotel_id::HotelId;
pub use pagination::{PageRequest, PaginationMeta, SEARCH_PAGE_SIZE};
pub use payment::{NewPaymentIntent, PaymentIntent, PaymentIntentStatus};
pub use search::{SearchParams, SearchQuery, SortOption};
