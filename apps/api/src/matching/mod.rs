//! AI resume matching: the scoring-service client, its cache, and the merge
//! of ranked results into the job-applications view.

pub mod cache;
pub mod client;
pub mod handlers;
pub mod merge;

pub use cache::MatchCache;
pub use client::{MatchClient, MatchError, MatchRequest, MatchSummary};
