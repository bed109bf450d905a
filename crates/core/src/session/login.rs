//! Login decision for a freshly constructed client handle

use picnic_domain::{PicnicError, Result};
use tracing::{debug, info};

use crate::picnic_ports::PicnicLogin;

/// Make sure `client` can issue authenticated calls
///
/// A non-empty `auth_key` means the handle was already constructed with a
/// usable token, so no login is performed. Otherwise both `user_id` and
/// `password` are required and the login exchange runs exactly once; its
/// failure is returned unchanged.
///
/// # Errors
///
/// - [`PicnicError::CredentialsMissing`] when neither a token nor a complete
///   identifier + secret pair is available
/// - whatever the login exchange returns
pub async fn ensure_authenticated<L>(
    client: &mut L,
    auth_key: &str,
    user_id: &str,
    password: &str,
) -> Result<()>
where
    L: PicnicLogin + ?Sized,
{
    if !auth_key.is_empty() {
        debug!("auth_key_present_skipping_login");
        return Ok(());
    }

    if user_id.is_empty() || password.is_empty() {
        return Err(PicnicError::CredentialsMissing);
    }

    client.login(user_id, password).await?;
    info!("picnic_login_succeeded");
    Ok(())
}
