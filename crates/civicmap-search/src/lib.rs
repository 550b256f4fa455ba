//! Civicmap Search - Distance-ranked, resumable proximity search
//!
//! Pages are ordered by (distance, identifier). A client continues a search by
//! sending back the last item's [`ResumeToken`](civicmap_core::models::ResumeToken);
//! no cursor state is held on the server.
//!
//! Pagination is best-effort under concurrent writes: a record already returned
//! is never returned again, but a record inserted after the first page and ranked
//! ahead of the resume point will not appear in later pages.

pub mod engine;

pub use engine::ProximitySearchEngine;
