//! Role checks for wrestler and team data.
//!
//! Admins see everything. Coaches see wrestlers on their own team. Athletes
//! see only their own profile and never team views.

use tracing::warn;
use uuid::Uuid;

use crate::types::{Role, Viewer, Wrestler};
use crate::{Error, Result};

pub fn ensure_wrestler_access(viewer: &Viewer, wrestler: &Wrestler) -> Result<()> {
    let allowed = match viewer.role {
        Role::Admin => true,
        Role::Coach => viewer.team_id.is_some() && viewer.team_id == wrestler.team_id,
        Role::Athlete => viewer.wrestler_id == Some(wrestler.id),
    };

    if allowed {
        return Ok(());
    }

    warn!(role = ?viewer.role, wrestler_id = %wrestler.id, "Denied wrestler access");
    Err(match viewer.role {
        Role::Coach => Error::access_denied("Coach can only access wrestlers in their team"),
        _ => Error::access_denied("Athlete can only access their own data"),
    })
}

pub fn ensure_team_access(viewer: &Viewer, team_id: Uuid) -> Result<()> {
    match viewer.role {
        Role::Admin => Ok(()),
        Role::Coach if viewer.team_id == Some(team_id) => Ok(()),
        Role::Coach => {
            warn!(%team_id, "Denied team access to coach of another team");
            Err(Error::access_denied("Coach can only access their own team"))
        }
        Role::Athlete => {
            warn!(%team_id, "Denied team access to athlete");
            Err(Error::access_denied("Athletes cannot access team data"))
        }
    }
}

/// Writes are limited to staff.
pub fn ensure_can_record(viewer: &Viewer) -> Result<()> {
    match viewer.role {
        Role::Admin | Role::Coach => Ok(()),
        Role::Athlete => Err(Error::access_denied(
            "Role 'athlete' not authorized for this action",
        )),
    }
}
