//! Authorization seam for request handlers.
//!
//! Handlers ask the injected [`AccessPolicy`] before touching the search engine
//! or the store. Authentication is handled upstream; the caller's identity
//! arrives in the `x-actor-id` header.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use civicmap_core::models::{ActorId, RecordId};

use crate::error::ApiError;

/// Header carrying the authenticated user's id
pub const ACTOR_HEADER: &str = "x-actor-id";

/// Who is making the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Anonymous,
    User(ActorId),
}

impl Actor {
    pub fn id(&self) -> Option<ActorId> {
        match self {
            Actor::Anonymous => None,
            Actor::User(id) => Some(*id),
        }
    }
}

impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(ACTOR_HEADER) else {
            return Ok(Actor::Anonymous);
        };

        value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(|id| Actor::User(ActorId(id)))
            .ok_or_else(|| ApiError::bad_request(format!("Invalid {} header", ACTOR_HEADER)))
    }
}

/// What the request wants to touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    NearbyReports,
    NewReport,
    Report { id: RecordId, owner_id: ActorId },
    ReportMutation { id: RecordId, owner_id: ActorId },
}

/// Capability check consulted before every operation
pub trait AccessPolicy: Send + Sync {
    fn can_access(&self, actor: &Actor, resource: &Resource) -> bool;
}

impl<F> AccessPolicy for F
where
    F: Fn(&Actor, &Resource) -> bool + Send + Sync,
{
    fn can_access(&self, actor: &Actor, resource: &Resource) -> bool {
        self(actor, resource)
    }
}

/// Default rules for the citizen-facing API: anyone may search and read,
/// signed-in users may report, and only a report's owner may change or delete it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CitizenPolicy;

impl AccessPolicy for CitizenPolicy {
    fn can_access(&self, actor: &Actor, resource: &Resource) -> bool {
        match resource {
            Resource::NearbyReports | Resource::Report { .. } => true,
            Resource::NewReport => actor.id().is_some(),
            Resource::ReportMutation { owner_id, .. } => actor.id() == Some(*owner_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_citizen_policy() {
        let owner = Actor::User(ActorId(1));
        let stranger = Actor::User(ActorId(2));
        let mutation = Resource::ReportMutation { id: RecordId(5), owner_id: ActorId(1) };

        assert!(CitizenPolicy.can_access(&Actor::Anonymous, &Resource::NearbyReports));
        assert!(!CitizenPolicy.can_access(&Actor::Anonymous, &Resource::NewReport));
        assert!(CitizenPolicy.can_access(&stranger, &Resource::NewReport));
        assert!(CitizenPolicy.can_access(&owner, &mutation));
        assert!(!CitizenPolicy.can_access(&stranger, &mutation));
        assert!(!CitizenPolicy.can_access(&Actor::Anonymous, &mutation));
    }

    #[test]
    fn test_closure_policy() {
        let deny_all = |_: &Actor, _: &Resource| false;
        assert!(!deny_all.can_access(&Actor::Anonymous, &Resource::NearbyReports));
    }
}
