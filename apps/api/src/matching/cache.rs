use redis::Client as RedisClient;
use tracing::{debug, warn};

use crate::matching::client::{MatchRequest, MatchResponse};

/// Short-lived Redis cache for successful AI match responses.
///
/// Cache failures never fail a request: they are logged and the caller
/// falls through to the service.
#[derive(Clone)]
pub struct MatchCache {
    client: RedisClient,
    ttl_secs: u64,
}

impl MatchCache {
    pub fn new(client: RedisClient, ttl_secs: u64) -> Self {
        Self { client, ttl_secs }
    }

    pub async fn get(&self, request: &MatchRequest) -> Option<MatchResponse> {
        let key = request.cache_key();
        let mut conn = match self.client.get_multiplexed_async_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Match cache unavailable: {e}");
                return None;
            }
        };

        let raw: Option<String> = match redis::cmd("GET")
            .arg(&key)
            .query_async::<_, Option<String>>(&mut conn)
            .await
        {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Match cache read failed for {key}: {e}");
                return None;
            }
        };

        match serde_json::from_str(&raw?) {
            Ok(response) => Some(response),
            Err(e) => {
                warn!("Discarding unreadable match cache entry {key}: {e}");
                None
            }
        }
    }

    pub async fn put(&self, request: &MatchRequest, response: &MatchResponse) {
        let key = request.cache_key();
        let payload = match serde_json::to_string(response) {
            Ok(p) => p,
            Err(e) => {
                warn!("Could not encode match response for cache: {e}");
                return;
            }
        };

        let mut conn = match self.client.get_multiplexed_async_connection().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Match cache unavailable: {e}");
                return;
            }
        };

        let result = redis::cmd("SET")
            .arg(&key)
            .arg(payload)
            .arg("EX")
            .arg(self.ttl_secs)
            .query_async::<_, ()>(&mut conn)
            .await;
        match result {
            Ok(()) => debug!("Cached match response {key} for {}s", self.ttl_secs),
            Err(e) => warn!("Match cache write failed for {key}: {e}"),
        }
    }
}
