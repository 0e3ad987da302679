// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose what actions an actor is permitted to perform
//! without leaking domain internals. They are advisory only and do not
//! replace the authorization checks each operation performs.

use crate::auth::{AuthError, AuthenticatedActor};
use guidance_desk_domain::Role;
use serde::{Deserialize, Serialize};

/// Whether an action is available to an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// The actor may perform the action.
    Allowed,
    /// The actor may not perform the action.
    Denied,
}

impl Capability {
    /// Converts a boolean into a capability.
    #[must_use]
    pub const fn from_bool(allowed: bool) -> Self {
        if allowed { Self::Allowed } else { Self::Denied }
    }

    /// Returns true if the action is allowed.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// The capability flags for one actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorCapabilities {
    /// May submit appointment and test requests.
    pub can_submit_request: Capability,
    /// May accept, reschedule, or reject requests.
    pub can_settle_request: Capability,
    /// May record post-session forms on appointments.
    pub can_record_session_form: Capability,
    /// May manage the counselor directory.
    pub can_manage_counselors: Capability,
    /// May broadcast announcements to every user.
    pub can_broadcast_announcements: Capability,
}

/// Computes the capability flags for an authenticated actor.
#[must_use]
pub const fn compute_actor_capabilities(actor: &AuthenticatedActor) -> ActorCapabilities {
    match actor.role {
        Role::Student => ActorCapabilities {
            can_submit_request: Capability::Allowed,
            can_settle_request: Capability::Denied,
            can_record_session_form: Capability::Denied,
            can_manage_counselors: Capability::Denied,
            can_broadcast_announcements: Capability::Denied,
        },
        Role::Counselor => ActorCapabilities {
            can_submit_request: Capability::Denied,
            can_settle_request: Capability::Allowed,
            can_record_session_form: Capability::Allowed,
            can_manage_counselors: Capability::Denied,
            can_broadcast_announcements: Capability::Denied,
        },
        Role::CollegeRep => ActorCapabilities {
            can_submit_request: Capability::Denied,
            can_settle_request: Capability::Denied,
            can_record_session_form: Capability::Denied,
            can_manage_counselors: Capability::Denied,
            can_broadcast_announcements: Capability::Denied,
        },
        Role::Admin => ActorCapabilities {
            can_submit_request: Capability::Denied,
            can_settle_request: Capability::Denied,
            can_record_session_form: Capability::Denied,
            can_manage_counselors: Capability::Allowed,
            can_broadcast_announcements: Capability::Allowed,
        },
    }
}

fn require_role(
    actor: &AuthenticatedActor,
    required: Role,
    action: &str,
) -> Result<(), AuthError> {
    if actor.role == required {
        Ok(())
    } else {
        Err(AuthError::Unauthorized {
            action: action.to_string(),
            required_role: required.as_str().to_string(),
        })
    }
}

/// Authorizes a request submission. Students only.
///
/// # Errors
///
/// Returns an error if the actor is not a student.
pub fn authorize_submit(actor: &AuthenticatedActor) -> Result<(), AuthError> {
    require_role(actor, Role::Student, "submit_request")
}

/// Authorizes a settle action. Counselors only.
///
/// # Errors
///
/// Returns an error if the actor is not a counselor.
pub fn authorize_settle(actor: &AuthenticatedActor) -> Result<(), AuthError> {
    require_role(actor, Role::Counselor, "settle_request")
}

/// Authorizes recording a session form. Counselors only.
///
/// # Errors
///
/// Returns an error if the actor is not a counselor.
pub fn authorize_session_form(actor: &AuthenticatedActor) -> Result<(), AuthError> {
    require_role(actor, Role::Counselor, "record_session_form")
}

/// Authorizes counselor-directory management. Admins only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin.
pub fn authorize_manage_counselors(actor: &AuthenticatedActor) -> Result<(), AuthError> {
    require_role(actor, Role::Admin, "manage_counselors")
}

/// Authorizes an announcement broadcast. Admins only.
///
/// # Errors
///
/// Returns an error if the actor is not an admin.
pub fn authorize_broadcast(actor: &AuthenticatedActor) -> Result<(), AuthError> {
    require_role(actor, Role::Admin, "broadcast_announcement")
}
