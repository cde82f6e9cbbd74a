//! Cache key generation and declarative invalidation.
//!
//! Every cached view in the system has exactly one key builder here, and every
//! write operation maps to a [`Mutation`] whose [`stale_keys`](Mutation::stale_keys)
//! list is the single source of truth for what the write makes stale.

use crate::RedisCache;
use tracing::warn;

/// Cache keys for applicant (user) data.
pub mod users {
    /// Profile view for an authenticated user.
    pub fn profile(user_id: i64) -> String {
        format!("user:profile:{user_id}")
    }

    /// Admin-facing summary list of all users.
    pub fn all() -> String {
        "user:all".to_string()
    }

    /// Admin-facing detail view of one user.
    pub fn detail(user_id: i64) -> String {
        format!("detail:user:{user_id}")
    }
}

/// Cache keys for employer data.
pub mod employers {
    /// Profile view for an authenticated employer.
    pub fn profile(employer_id: i64) -> String {
        format!("employer:profile:{employer_id}")
    }

    /// Admin-facing summary list of all employers.
    pub fn all() -> String {
        "employer:all".to_string()
    }

    /// Admin-facing detail view of one employer.
    pub fn detail(employer_id: i64) -> String {
        format!("detail:employer:{employer_id}")
    }

    /// An employer's own activity list.
    pub fn activities(employer_id: i64) -> String {
        format!("employer:activities:{employer_id}")
    }

    /// An employer's detail view of one of its activities.
    pub fn activity_detail(employer_id: i64, activity_id: i64) -> String {
        format!("detail:activity:{employer_id}:{activity_id}")
    }

    /// An employer's applicant list across its activities.
    pub fn applicants(employer_id: i64) -> String {
        format!("employer:applicants:{employer_id}")
    }

    /// An employer's detail view of one applicant.
    pub fn applicant_detail(employer_id: i64, user_id: i64) -> String {
        format!("detail:applicant:{employer_id}:{user_id}")
    }
}

/// Cache keys for admin data.
pub mod admins {
    /// Profile view for an authenticated admin.
    pub fn profile(admin_id: i64) -> String {
        format!("admin:profile:{admin_id}")
    }
}

/// Cache keys for the public activity catalog.
pub mod activities {
    /// Public list of all open activities.
    pub fn all() -> String {
        "activity:all".to_string()
    }

    /// Public detail view of one activity.
    pub fn detail(activity_id: i64) -> String {
        format!("detail:activity:{activity_id}")
    }
}

/// Cache keys for category data.
pub mod categories {
    /// Admin-facing list of all categories.
    pub fn all() -> String {
        "category:all".to_string()
    }
}

/// A write operation that makes cached views stale.
///
/// Mutation sites name what happened; the fan-out to cache keys lives in
/// [`stale_keys`](Mutation::stale_keys) so the full invalidation table is
/// auditable in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    UserRegistered,
    UserProfileUpdated { user_id: i64 },
    EmployerRegistered,
    EmployerProfileUpdated { employer_id: i64 },
    AdminProfileUpdated { admin_id: i64 },
    ActivityCreated { employer_id: i64 },
    ActivityUpdated { employer_id: i64, activity_id: i64 },
    ActivityDeleted { employer_id: i64, activity_id: i64 },
    /// Benefits or requirements attached to or detached from an activity.
    ActivityCompositionChanged { employer_id: i64, activity_id: i64 },
    CategoryMutated,
    ApplicationSubmitted { employer_id: i64, user_id: i64 },
    ApplicationUpdated { employer_id: i64, user_id: i64 },
}

impl Mutation {
    /// The cache keys this mutation makes stale.
    pub fn stale_keys(self) -> Vec<String> {
        match self {
            Mutation::UserRegistered => vec![users::all()],
            Mutation::UserProfileUpdated { user_id } => vec![
                users::all(),
                users::profile(user_id),
                users::detail(user_id),
            ],
            Mutation::EmployerRegistered => vec![employers::all()],
            Mutation::EmployerProfileUpdated { employer_id } => vec![
                employers::all(),
                employers::profile(employer_id),
                employers::detail(employer_id),
            ],
            Mutation::AdminProfileUpdated { admin_id } => vec![admins::profile(admin_id)],
            Mutation::ActivityCreated { employer_id } => {
                vec![employers::activities(employer_id), activities::all()]
            }
            Mutation::ActivityUpdated {
                employer_id,
                activity_id,
            }
            | Mutation::ActivityDeleted {
                employer_id,
                activity_id,
            } => vec![
                employers::activities(employer_id),
                employers::activity_detail(employer_id, activity_id),
                activities::all(),
                activities::detail(activity_id),
            ],
            Mutation::ActivityCompositionChanged {
                employer_id,
                activity_id,
            } => vec![
                employers::activity_detail(employer_id, activity_id),
                activities::detail(activity_id),
            ],
            // Activity views embed the category name
            Mutation::CategoryMutated => vec![categories::all(), activities::all()],
            Mutation::ApplicationSubmitted {
                employer_id,
                user_id,
            } => vec![
                employers::applicants(employer_id),
                // a repeat applicant's cached detail gains an application
                employers::applicant_detail(employer_id, user_id),
            ],
            Mutation::ApplicationUpdated {
                employer_id,
                user_id,
            } => vec![
                users::profile(user_id),
                employers::applicants(employer_id),
                employers::applicant_detail(employer_id, user_id),
            ],
        }
    }
}

/// Deletes every cache key a mutation made stale.
///
/// Invalidation failures are logged and swallowed: the entries expire on
/// their own TTL and a write must not fail because Redis is down.
pub async fn invalidate(cache: Option<&RedisCache>, mutation: Mutation) {
    let Some(cache) = cache else { return };

    let keys = mutation.stale_keys();
    if let Err(e) = cache.del(&keys).await {
        warn!(?mutation, error = %e, "Failed to invalidate stale cache keys");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_formats_match_wire_contract() {
        assert_eq!(users::profile(7), "user:profile:7");
        assert_eq!(users::detail(7), "detail:user:7");
        assert_eq!(employers::activities(7), "employer:activities:7");
        assert_eq!(employers::activity_detail(7, 12), "detail:activity:7:12");
        assert_eq!(employers::applicants(3), "employer:applicants:3");
        assert_eq!(employers::applicant_detail(3, 9), "detail:applicant:3:9");
        assert_eq!(activities::all(), "activity:all");
        assert_eq!(activities::detail(12), "detail:activity:12");
        assert_eq!(categories::all(), "category:all");
        assert_eq!(admins::profile(1), "admin:profile:1");
    }

    #[test]
    fn activity_update_fans_out_to_both_views() {
        let keys = Mutation::ActivityUpdated {
            employer_id: 7,
            activity_id: 12,
        }
        .stale_keys();

        assert_eq!(
            keys,
            vec![
                "employer:activities:7",
                "detail:activity:7:12",
                "activity:all",
                "detail:activity:12",
            ]
        );
    }

    #[test]
    fn activity_delete_matches_update_fanout() {
        let updated = Mutation::ActivityUpdated {
            employer_id: 2,
            activity_id: 5,
        }
        .stale_keys();
        let deleted = Mutation::ActivityDeleted {
            employer_id: 2,
            activity_id: 5,
        }
        .stale_keys();

        assert_eq!(updated, deleted);
    }

    #[test]
    fn application_update_invalidates_applicant_profile() {
        let keys = Mutation::ApplicationUpdated {
            employer_id: 3,
            user_id: 9,
        }
        .stale_keys();

        assert!(keys.contains(&"user:profile:9".to_string()));
        assert!(keys.contains(&"employer:applicants:3".to_string()));
        assert!(keys.contains(&"detail:applicant:3:9".to_string()));
    }

    #[test]
    fn submission_invalidates_applicant_list_and_detail() {
        let keys = Mutation::ApplicationSubmitted {
            employer_id: 4,
            user_id: 9,
        }
        .stale_keys();
        assert_eq!(keys, vec!["employer:applicants:4", "detail:applicant:4:9"]);
    }

    #[test]
    fn category_change_reaches_the_public_catalog() {
        let keys = Mutation::CategoryMutated.stale_keys();
        assert_eq!(keys, vec!["category:all", "activity:all"]);
    }

    #[test]
    fn profile_update_fans_out_to_admin_views() {
        let keys = Mutation::UserProfileUpdated { user_id: 8 }.stale_keys();
        assert_eq!(keys, vec!["user:all", "user:profile:8", "detail:user:8"]);
    }
}
