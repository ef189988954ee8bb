//! Role service
//!
//! Maintains the self-assignable role catalog and switches a member's
//! menu-granted role, keeping at most one such role per member.

use dino_core::{DomainError, ExternalError, RoleInfo, RoleOption, Snowflake};
use dino_store::{ManagedRoles, RoleCatalog};
use tracing::{info, instrument, warn};

use crate::dto::{PreviousRole, SelectionOutcome};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Role service
pub struct RoleService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RoleService<'a> {
    /// Create a new RoleService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Catalog options in display order
    #[instrument(skip(self))]
    pub async fn list_options(&self, guild_id: Snowflake) -> ServiceResult<Vec<RoleOption>> {
        Ok(self.ctx.store().read_row::<RoleCatalog>(guild_id).await?)
    }

    /// Add a server role to the catalog
    #[instrument(skip(self))]
    pub async fn add_option(
        &self,
        guild_id: Snowflake,
        role_id: Snowflake,
    ) -> ServiceResult<RoleOption> {
        let role = self.resolve_role(guild_id, role_id).await?;

        let store = self.ctx.store();
        let _guard = store.lock::<RoleCatalog>(guild_id).await;
        let mut options = store.read_row::<RoleCatalog>(guild_id).await?;

        if options.iter().any(|o| o.id == role_id) {
            return Err(DomainError::DuplicateRole(role_id).into());
        }

        let option = RoleOption::new(role.id, role.name, role.color);
        options.push(option.clone());
        store.write_row::<RoleCatalog>(guild_id, options).await?;

        info!(guild_id = %guild_id, role_id = %role_id, "Role added to catalog");

        Ok(option)
    }

    /// Remove a role from the catalog
    #[instrument(skip(self))]
    pub async fn remove_option(
        &self,
        guild_id: Snowflake,
        role_id: Snowflake,
    ) -> ServiceResult<RoleOption> {
        let store = self.ctx.store();
        let _guard = store.lock::<RoleCatalog>(guild_id).await;
        let mut options = store.read_row::<RoleCatalog>(guild_id).await?;

        let index = options
            .iter()
            .position(|o| o.id == role_id)
            .ok_or(DomainError::RoleNotCataloged(role_id))?;
        let removed = options.remove(index);
        store.write_row::<RoleCatalog>(guild_id, options).await?;

        info!(guild_id = %guild_id, role_id = %role_id, "Role removed from catalog");

        Ok(removed)
    }

    /// Handle a role menu selection.
    ///
    /// Holding the chosen role toggles it off. Otherwise the previously managed
    /// role is removed (best effort) and the chosen role is granted. The managed
    /// assignment is only written once the platform confirmed the change.
    #[instrument(skip(self))]
    pub async fn select_role(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        role_id: Snowflake,
    ) -> ServiceResult<SelectionOutcome> {
        let role = self.resolve_role(guild_id, role_id).await?;

        let store = self.ctx.store();
        let _guard = store.lock::<ManagedRoles>(guild_id).await;

        let member = self
            .ctx
            .membership()
            .resolve_member(guild_id, user_id)
            .await
            .map_err(|e| match e {
                ExternalError::NotFound(_) => ServiceError::from(DomainError::MemberNotFound),
                other => ServiceError::from(other),
            })?;

        if member.has_role(role_id) {
            self.ctx
                .membership()
                .remove_role(guild_id, user_id, role_id)
                .await?;

            let mut assignments = store.read_row::<ManagedRoles>(guild_id).await?;
            if assignments.get(&user_id) == Some(&role_id) {
                assignments.remove(&user_id);
                store.write_row::<ManagedRoles>(guild_id, assignments).await?;
            }

            info!(guild_id = %guild_id, user_id = %user_id, role_id = %role_id, "Managed role toggled off");
            return Ok(SelectionOutcome::Removed { role });
        }

        let mut assignments = store.read_row::<ManagedRoles>(guild_id).await?;
        let previous = match assignments.get(&user_id).copied() {
            Some(previous_id) if previous_id != role_id => {
                self.remove_previous(guild_id, user_id, previous_id).await
            }
            _ => PreviousRole::None,
        };

        if let Err(e) = self
            .ctx
            .membership()
            .add_role(guild_id, user_id, role_id)
            .await
        {
            warn!(guild_id = %guild_id, user_id = %user_id, role_id = %role_id, error = %e, "Failed to grant role");
            return Err(e.into());
        }

        assignments.insert(user_id, role_id);
        store.write_row::<ManagedRoles>(guild_id, assignments).await?;

        info!(guild_id = %guild_id, user_id = %user_id, role_id = %role_id, "Managed role granted");

        Ok(SelectionOutcome::Added { role, previous })
    }

    /// Current managed role of a member, if any
    pub async fn managed_role(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> ServiceResult<Option<Snowflake>> {
        let assignments = self.ctx.store().read_row::<ManagedRoles>(guild_id).await?;
        Ok(assignments.get(&user_id).copied())
    }

    async fn remove_previous(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
        previous_id: Snowflake,
    ) -> PreviousRole {
        let previous = match self
            .ctx
            .membership()
            .resolve_role(guild_id, previous_id)
            .await
        {
            Ok(role) => role,
            Err(ExternalError::NotFound(_)) => {
                info!(guild_id = %guild_id, role_id = %previous_id, "Previous managed role no longer exists");
                return PreviousRole::Vanished;
            }
            Err(e) => {
                warn!(guild_id = %guild_id, role_id = %previous_id, error = %e, "Failed to resolve previous role");
                return PreviousRole::Failed {
                    reason: e.to_string(),
                };
            }
        };

        match self
            .ctx
            .membership()
            .remove_role(guild_id, user_id, previous_id)
            .await
        {
            Ok(()) => PreviousRole::Removed {
                name: previous.name,
            },
            Err(ExternalError::PermissionDenied(_)) => {
                warn!(guild_id = %guild_id, role_id = %previous_id, "Not allowed to remove previous role");
                PreviousRole::PermissionDenied
            }
            Err(e) => {
                warn!(guild_id = %guild_id, role_id = %previous_id, error = %e, "Failed to remove previous role");
                PreviousRole::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn resolve_role(&self, guild_id: Snowflake, role_id: Snowflake) -> ServiceResult<RoleInfo> {
        match self.ctx.membership().resolve_role(guild_id, role_id).await {
            Ok(role) => Ok(role),
            Err(ExternalError::NotFound(_)) => Err(DomainError::RoleNotFound(role_id).into()),
            Err(e) => Err(e.into()),
        }
    }
}
