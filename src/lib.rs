//! # hotel-booking
//!
//! REST API server for a hotel booking site: hotel search with filters,
//! sorting and pagination, plus a two-step booking flow backed by Stripe
//! payment intents.
//!
//! A booking is only recorded after the payment processor itself reports
//! the intent as succeeded for the same hotel and user; the client's word
//! is never taken for payment state or price.
//!
//! ## Architecture
//!
//! ```text
//! Browser (cookie or bearer JWT)
//!     │
//!     ├── REST Handlers (api/) ── AuthUser extractor (auth)
//!     │
//!     ├── HotelService, BookingService (service/)
//!     │
//!     ├── HotelStore (persistence/) ── PostgreSQL or in-memory
//!     └── PaymentProcessor (payment/) ── Stripe or in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod auth;
pub mod config;
pub mod domain;
pub mod error;
pub mod payment;
pub mod persistence;
pub mod service;
