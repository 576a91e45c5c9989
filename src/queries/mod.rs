//! Query modules for the card comparison SDK.
//!
//! Each module provides a query struct that borrows from a [`Session`](crate::session::Session)
//! and exposes methods returning `Result<T>` with typed model payloads. The
//! free functions underneath operate on the session's parts directly so the
//! two sources can be searched from separate threads.

pub mod currency;
pub mod liga;
pub mod tcgplayer;

pub use currency::CurrencyQuery;
pub use liga::LigaQuery;
pub use tcgplayer::TcgPlayerQuery;
