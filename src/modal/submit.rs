use crate::modal::types::{FormSubmission, PageEffect};
use tracing::info;

/// What came back from a navigation. The body is never inspected.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct NavigationOutcome {
    pub status: u16,
    /// Where the navigation ended up after following redirects.
    pub location: String,
    pub redirected: bool,
}

impl NavigationOutcome {
    pub fn direct(status: u16, location: impl Into<String>) -> Self {
        Self {
            status,
            location: location.into(),
            redirected: false,
        }
    }
}

/// Performs page-level navigation: hidden form submissions and reloads.
#[allow(async_fn_in_trait)]
pub trait Navigator {
    type Error: std::error::Error;

    async fn submit(&self, form: &FormSubmission) -> Result<NavigationOutcome, Self::Error>;

    async fn reload(&self, bypass_cache: bool) -> Result<NavigationOutcome, Self::Error>;
}

pub async fn submit<N: Navigator>(
    navigator: &N,
    form: &FormSubmission,
) -> Result<NavigationOutcome, N::Error> {
    info!(
        method = form.method.as_str(),
        action = %form.action,
        fields = ?form.field_names(),
        "submitting form"
    );
    navigator.submit(form).await
}

pub async fn apply_effect<N: Navigator>(
    navigator: &N,
    effect: PageEffect,
) -> Result<NavigationOutcome, N::Error> {
    match effect {
        PageEffect::Reload { bypass_cache } => {
            info!(bypass_cache, "reloading page");
            navigator.reload(bypass_cache).await
        }
    }
}
