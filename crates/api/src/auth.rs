// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Actor identity for API operations.
//!
//! Real authentication (credentials, sessions) is explicitly out of
//! scope; callers supply the actor identity with each request and the
//! stub only sanity-checks it. Authorization, by contrast, is enforced
//! here for every operation.

use guidance_desk_domain::Role;

/// An authenticated actor with an associated role.
///
/// This represents a portal user whose identity has been established
/// and who may perform certain actions based on their role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The portal user id of this actor.
    pub id: i64,
    /// The role held by this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The portal user id
    /// * `role` - The role held by this actor
    #[must_use]
    pub const fn new(id: i64, role: Role) -> Self {
        Self { id, role }
    }
}

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// Stub authentication function.
///
/// This does NOT implement real authentication - that is explicitly
/// deferred. In a real deployment this would validate credentials,
/// check tokens, or integrate with an identity provider.
///
/// # Arguments
///
/// * `actor_id` - The portal user id of the actor
/// * `role` - The role to assign to the actor
///
/// # Errors
///
/// Returns an error if the actor id is not a positive identifier.
pub fn authenticate_stub(actor_id: i64, role: Role) -> Result<AuthenticatedActor, AuthError> {
    if actor_id <= 0 {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor id must be a positive identifier"),
        });
    }
    Ok(AuthenticatedActor::new(actor_id, role))
}
