use crate::configuration::{Configuration, FallbackPolicy};
use crate::fallback;
use log::{error, info, warn};
use pool_structures::{Pool, PoolsResponse};
use std::fmt::{Display, Formatter};
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Day {
    Today,
    Yesterday,
}

impl Day {
    fn path(self) -> &'static str {
        match self {
            Day::Today => "today",
            Day::Yesterday => "yesterday",
        }
    }
}

impl Display for Day {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("{url} did not answer with JSON")]
    Body {
        url: String,
        #[source]
        source: pool_structures::Error,
    },
}

/// Where the displayed pools come from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataOrigin {
    Live,
    Fallback,
    /// One collection is live, the other one fell back
    Partial,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPools {
    pub today: Vec<Pool>,
    pub yesterday: Vec<Pool>,
    pub origin: DataOrigin,
}

pub struct PoolsClient {
    http: reqwest::Client,
    base_url: String,
    policy: FallbackPolicy,
}

impl PoolsClient {
    pub fn new(config: &Configuration) -> reqwest::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(PoolsClient {
            http: builder.build()?,
            base_url: config.base_url().to_owned(),
            policy: config.fallback,
        })
    }

    pub async fn fetch_day(&self, day: Day) -> Result<Vec<Pool>, FetchError> {
        let url = format!("{}/api/pools/{}", self.base_url, day.path());

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Request {
            url: url.clone(),
            source,
        })?;
        let response =
            PoolsResponse::from_slice(&body).map_err(|source| FetchError::Body { url, source })?;

        info!(
            "{} pools for {day} (announced: {:?}, generated at: {:?})",
            response.pools.len(),
            response.count,
            response.generated_at
        );
        audit_cost_split(&response.pools);
        Ok(response.pools)
    }

    /// Reads both days at once and waits for both answers.
    pub async fn load(&self) -> LoadedPools {
        let (today, yesterday) =
            futures::future::join(self.fetch_day(Day::Today), self.fetch_day(Day::Yesterday))
                .await;
        resolve(self.policy, today, yesterday)
    }
}

fn audit_cost_split(pools: &[Pool]) {
    for pool in pools {
        if let Some(difference) = pool.split_discrepancy() {
            warn!(
                "pool {}: per person cost {:.2} is off an even split of {:.2} by {:+.2}",
                pool.id, pool.per_person, pool.total_cost, difference
            );
        }
    }
}

fn log_failure(day: Day, e: &FetchError) {
    match std::error::Error::source(e) {
        Some(source) => error!("Error fetching {day} pools: {e}: {source}"),
        None => error!("Error fetching {day} pools: {e}"),
    }
}

fn resolve(
    policy: FallbackPolicy,
    today: Result<Vec<Pool>, FetchError>,
    yesterday: Result<Vec<Pool>, FetchError>,
) -> LoadedPools {
    match policy {
        FallbackPolicy::Combined => match (today, yesterday) {
            (Ok(today), Ok(yesterday)) => LoadedPools {
                today,
                yesterday,
                origin: DataOrigin::Live,
            },
            (today, yesterday) => {
                if let Err(e) = &today {
                    log_failure(Day::Today, e);
                }
                if let Err(e) = &yesterday {
                    log_failure(Day::Yesterday, e);
                }
                warn!("Using fallback pools for both days");
                LoadedPools {
                    today: fallback::today(),
                    yesterday: fallback::yesterday(),
                    origin: DataOrigin::Fallback,
                }
            }
        },
        FallbackPolicy::Independent => {
            let live = today.is_ok() as u8 + yesterday.is_ok() as u8;
            let today = today.unwrap_or_else(|e| {
                log_failure(Day::Today, &e);
                fallback::today()
            });
            let yesterday = yesterday.unwrap_or_else(|e| {
                log_failure(Day::Yesterday, &e);
                fallback::yesterday()
            });
            let origin = match live {
                2 => DataOrigin::Live,
                0 => DataOrigin::Fallback,
                _ => DataOrigin::Partial,
            };
            LoadedPools {
                today,
                yesterday,
                origin,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use warp::http::StatusCode;
    use warp::{Filter, Reply};

    #[derive(Clone)]
    enum Answer {
        Json(Value),
        Status(u16),
        Text(&'static str),
    }

    fn reply(answer: Answer) -> warp::reply::Response {
        match answer {
            Answer::Json(body) => warp::reply::json(&body).into_response(),
            Answer::Status(code) => warp::reply::with_status(
                "unavailable",
                StatusCode::from_u16(code).unwrap(),
            )
            .into_response(),
            Answer::Text(body) => body.into_response(),
        }
    }

    /// Starts a pools API on a free port and returns its base address
    fn serve(today: Answer, yesterday: Answer) -> String {
        let today = warp::path!("api" / "pools" / "today").map(move || reply(today.clone()));
        let yesterday =
            warp::path!("api" / "pools" / "yesterday").map(move || reply(yesterday.clone()));
        let routes = warp::get().and(today.or(yesterday));

        let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);
        format!("http://{addr}")
    }

    fn client(base_url: &str, policy: FallbackPolicy) -> PoolsClient {
        let mut config = Configuration::new(base_url);
        config.fallback = policy;
        PoolsClient::new(&config).unwrap()
    }

    fn pools(ids: &[&str]) -> Value {
        let pools: Vec<Value> = ids
            .iter()
            .map(|id| {
                json!({
                    "id": id,
                    "route_name": "Mumbai North Shuttle",
                    "riders": [
                        {"name": "Rahul Mehta", "pickup": "Bandra Kurla Complex", "time": "9:00 AM"},
                        {"name": "Kavya Nair", "pickup": "Phoenix Mall", "time": "9:20 AM"}
                    ],
                    "total_cost": 380.0,
                    "per_person": 190.0,
                    "distance": 24.0,
                    "duration": "1h 5m",
                    "pickup_order": ["Bandra Kurla Complex", "Phoenix Mall"],
                    "destination": "Jio World Convention Centre"
                })
            })
            .collect();
        json!({ "pools": pools, "count": ids.len() })
    }

    fn ids(pools: &[Pool]) -> Vec<&str> {
        pools.iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn live_pools() {
        let base = serve(
            Answer::Json(pools(&["pool-002", "pool-003"])),
            Answer::Json(pools(&["pool-y002"])),
        );
        let loaded = client(&base, FallbackPolicy::Combined).load().await;

        assert_eq!(DataOrigin::Live, loaded.origin);
        assert_eq!(vec!["pool-002", "pool-003"], ids(&loaded.today));
        assert_eq!(vec!["pool-y002"], ids(&loaded.yesterday));
        assert_eq!("Phoenix Mall", loaded.today[1].riders[1].pickup);
    }

    #[tokio::test]
    async fn one_failure_replaces_both_days() {
        let base = serve(
            Answer::Status(500),
            Answer::Json(pools(&["pool-y002"])),
        );
        let loaded = client(&base, FallbackPolicy::Combined).load().await;

        assert_eq!(DataOrigin::Fallback, loaded.origin);
        assert_eq!(fallback::today(), loaded.today);
        assert_eq!(fallback::yesterday(), loaded.yesterday);
    }

    #[tokio::test]
    async fn body_that_is_not_json_is_a_failure() {
        let base = serve(
            Answer::Json(pools(&["pool-002"])),
            Answer::Text("<html>Bad Gateway</html>"),
        );
        let loaded = client(&base, FallbackPolicy::Combined).load().await;

        assert_eq!(DataOrigin::Fallback, loaded.origin);
        assert_eq!(vec!["pool-001"], ids(&loaded.today));
        assert_eq!(vec!["pool-y001"], ids(&loaded.yesterday));
    }

    #[tokio::test]
    async fn missing_pools_field_is_empty() {
        let base = serve(
            Answer::Json(json!({ "message": "nothing today" })),
            Answer::Json(json!({ "pools": "n/a" })),
        );
        let loaded = client(&base, FallbackPolicy::Combined).load().await;

        assert_eq!(DataOrigin::Live, loaded.origin);
        assert!(loaded.today.is_empty());
        assert!(loaded.yesterday.is_empty());
    }

    #[tokio::test]
    async fn unreachable_api() {
        let loaded = client("http://127.0.0.1:1", FallbackPolicy::Combined)
            .load()
            .await;

        assert_eq!(DataOrigin::Fallback, loaded.origin);
        assert_eq!(fallback::today(), loaded.today);
        assert_eq!(fallback::yesterday(), loaded.yesterday);
    }

    #[tokio::test]
    async fn independent_fallback_keeps_the_live_day() {
        let base = serve(
            Answer::Status(503),
            Answer::Json(pools(&["pool-y002", "pool-y003"])),
        );
        let loaded = client(&base, FallbackPolicy::Independent).load().await;

        assert_eq!(DataOrigin::Partial, loaded.origin);
        assert_eq!(fallback::today(), loaded.today);
        assert_eq!(vec!["pool-y002", "pool-y003"], ids(&loaded.yesterday));
    }

    #[tokio::test]
    async fn status_error_names_the_url() {
        let base = serve(Answer::Status(404), Answer::Status(404));
        let e = client(&base, FallbackPolicy::Combined)
            .fetch_day(Day::Yesterday)
            .await
            .unwrap_err();

        assert!(matches!(&e, FetchError::Status { status, .. } if status.as_u16() == 404));
        assert_eq!(
            format!("{base}/api/pools/yesterday answered 404 Not Found"),
            e.to_string()
        );
    }

    #[test]
    fn independent_policy_with_both_failures_is_fallback() {
        let failure = || FetchError::Status {
            url: "http://localhost:8000/api/pools/today".to_owned(),
            status: reqwest::StatusCode::BAD_GATEWAY,
        };
        let loaded = resolve(FallbackPolicy::Independent, Err(failure()), Err(failure()));
        assert_eq!(DataOrigin::Fallback, loaded.origin);
        assert_eq!(fallback::yesterday(), loaded.yesterday);
    }
}
