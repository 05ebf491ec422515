use std::collections::HashMap;

use store::StoreError;
use tracing::error;

use super::{HttpRequest, HttpResponse, split_target};
use crate::config::ApiConfig;
use crate::db::Database;
use crate::ops;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathMatch {
    Exact(&'static str),
    Prefix(&'static str),
}

impl PathMatch {
    fn matches(self, path: &str) -> bool {
        match self {
            PathMatch::Exact(expected) => path == expected,
            PathMatch::Prefix(prefix) => path.starts_with(prefix),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Health,
    ListCrops,
    CropsBySeason,
    PricesByLocation,
    CreatePrice,
    ListSchemes,
    SchemesByState,
    UserProfile,
    CreateUser,
}

/// Evaluated top to bottom; the first matching rule wins. The `/season`,
/// `/state`, and `/profile` suffixed paths match loosely by prefix.
const ROUTE_TABLE: &[(&str, PathMatch, Operation)] = &[
    ("GET", PathMatch::Exact("/api/health"), Operation::Health),
    ("GET", PathMatch::Exact("/api/crops"), Operation::ListCrops),
    (
        "GET",
        PathMatch::Prefix("/api/crops/season"),
        Operation::CropsBySeason,
    ),
    (
        "GET",
        PathMatch::Prefix("/api/prices"),
        Operation::PricesByLocation,
    ),
    ("POST", PathMatch::Exact("/api/prices"), Operation::CreatePrice),
    ("GET", PathMatch::Exact("/api/schemes"), Operation::ListSchemes),
    (
        "GET",
        PathMatch::Prefix("/api/schemes/state"),
        Operation::SchemesByState,
    ),
    (
        "GET",
        PathMatch::Prefix("/api/users/profile"),
        Operation::UserProfile,
    ),
    ("POST", PathMatch::Exact("/api/users"), Operation::CreateUser),
];

/// Route one request descriptor to its operation. Holds no state between
/// calls; failures escaping an operation are converted to a 500 here and
/// nowhere else.
pub async fn handle_request(
    db: &Database,
    config: &ApiConfig,
    request: &HttpRequest,
) -> HttpResponse {
    if request.method == "OPTIONS" {
        return HttpResponse::preflight_ok();
    }

    let (path, query) = split_target(&request.target);
    for (method, matcher, operation) in ROUTE_TABLE {
        if *method == request.method && matcher.matches(&path) {
            return match execute(*operation, db, config, &query, &request.body).await {
                Ok(response) => response,
                Err(err) => {
                    error!(path = %path, error = %err, "request failed");
                    HttpResponse::internal_server_error(&err.to_string())
                }
            };
        }
    }
    HttpResponse::not_found("API endpoint not found")
}

async fn execute(
    operation: Operation,
    db: &Database,
    config: &ApiConfig,
    query: &HashMap<String, String>,
    body: &[u8],
) -> Result<HttpResponse, StoreError> {
    match operation {
        // Health never touches the store.
        Operation::Health => Ok(ops::health()),
        Operation::ListCrops => ops::list_crops(db.handle(config).await?).await,
        Operation::CropsBySeason => ops::crops_by_season(db.handle(config).await?, query).await,
        Operation::PricesByLocation => {
            ops::prices_by_location(db.handle(config).await?, query).await
        }
        Operation::CreatePrice => ops::create_price(db.handle(config).await?, body).await,
        Operation::ListSchemes => ops::list_schemes(db.handle(config).await?).await,
        Operation::SchemesByState => ops::schemes_by_state(db.handle(config).await?, query).await,
        Operation::UserProfile => ops::user_profile(db.handle(config).await?, query).await,
        Operation::CreateUser => ops::create_user(db.handle(config).await?, body).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_match(method: &str, path: &str) -> Option<Operation> {
        ROUTE_TABLE
            .iter()
            .find(|(rule_method, matcher, _)| *rule_method == method && matcher.matches(path))
            .map(|(_, _, operation)| *operation)
    }

    #[test]
    fn exact_rules_do_not_match_suffixed_paths() {
        assert_eq!(first_match("GET", "/api/crops"), Some(Operation::ListCrops));
        assert_eq!(
            first_match("GET", "/api/crops/season"),
            Some(Operation::CropsBySeason)
        );
        assert_eq!(first_match("POST", "/api/prices/extra"), None);
    }

    #[test]
    fn prefix_rules_match_loosely_in_declared_order() {
        // A longer suffix still lands on the season rule.
        assert_eq!(
            first_match("GET", "/api/crops/seasonal"),
            Some(Operation::CropsBySeason)
        );
        assert_eq!(
            first_match("GET", "/api/prices/today"),
            Some(Operation::PricesByLocation)
        );
        assert_eq!(
            first_match("GET", "/api/users/profile/settings"),
            Some(Operation::UserProfile)
        );
    }

    #[test]
    fn method_participates_in_matching() {
        assert_eq!(first_match("POST", "/api/prices"), Some(Operation::CreatePrice));
        assert_eq!(first_match("GET", "/api/prices"), Some(Operation::PricesByLocation));
        assert_eq!(first_match("DELETE", "/api/prices"), None);
        assert_eq!(first_match("GET", "/api/users"), None);
    }
}
