//! Supabase outbound adapters.
//!
//! The hosted store is reached over its REST surfaces: PostgREST for the
//! `users` and `query_history` tables and the Storage API for uploaded
//! photos. All adapters share one [`SupabaseClient`].

mod client;
mod dto;
mod history;
mod storage;
mod users;

pub use client::{SupabaseClient, SupabaseFailure};
pub use history::SupabaseHistoryRepository;
pub use storage::{DEFAULT_IMAGE_BUCKET, SupabaseImageStore};
pub use users::SupabaseUserRepository;
