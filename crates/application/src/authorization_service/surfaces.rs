use nexus_domain::Surface;

use super::*;

impl AuthorizationService {
    /// Returns the navigation surfaces a subject may open, in menu order.
    pub async fn accessible_surfaces(&self, user_id: UserId) -> AppResult<Vec<Surface>> {
        Ok(self.capabilities_for(user_id).await?.navigation())
    }
}
