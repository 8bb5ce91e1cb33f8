//! Pre-navigation authentication guard and the hash router that runs it

use crate::error::{CoreError, CoreResult};
use crate::routes::{Resolved, Route, fragment_path, resolve};
use crate::session::SessionContext;
use tracing::debug;

/// Redirect chains longer than this are treated as a loop
const MAX_REDIRECTS: usize = 4;

/// Outcome of a guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDecision {
    Allow,
    Redirect(Route),
}

/// Decides whether a navigation may proceed
///
/// Only the presence of a credential is checked. A stale token passes here and is
/// caught later when the backend answers 401.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    session: SessionContext,
}

impl RouteGuard {
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }

    /// Check a navigation from `from` to `to`
    ///
    /// `to` is `None` when the path matched no named route; such destinations are
    /// treated like any other non-login destination.
    pub fn check(&self, to: Option<Route>, _from: Option<Route>) -> NavigationDecision {
        if to == Some(Route::Login) || self.session.is_authenticated() {
            NavigationDecision::Allow
        } else {
            NavigationDecision::Redirect(Route::Login)
        }
    }
}

/// Result of a completed navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Arrived where asked
    Completed(Resolved),
    /// The guard sent the navigation somewhere else
    Redirected { requested: String, to: Resolved },
}

impl Navigation {
    /// Route that ended up active
    pub const fn route(&self) -> Route {
        match self {
            Self::Completed(resolved) | Self::Redirected { to: resolved, .. } => resolved.route,
        }
    }
}

/// Client-side router over the static route table
#[derive(Debug, Clone)]
pub struct Router {
    guard: RouteGuard,
    current: Option<Route>,
}

impl Router {
    pub fn new(session: SessionContext) -> Self {
        Self {
            guard: RouteGuard::new(session),
            current: None,
        }
    }

    /// Currently active route
    pub const fn current(&self) -> Option<Route> {
        self.current
    }

    /// Navigate to a location fragment such as `#/providers`
    pub fn navigate_fragment(&mut self, fragment: &str) -> CoreResult<Navigation> {
        self.navigate(fragment_path(fragment))
    }

    /// Navigate to a path, running the guard before committing
    ///
    /// Unmatched paths are still guarded, so a signed-out user is sent to login
    /// rather than told the page does not exist.
    pub fn navigate(&mut self, path: &str) -> CoreResult<Navigation> {
        let requested = path.to_string();
        let mut target = resolve(path);
        let mut redirected = false;

        for _ in 0..MAX_REDIRECTS {
            let to = target.as_ref().map(|resolved| resolved.route);
            match self.guard.check(to, self.current) {
                NavigationDecision::Allow => {
                    let resolved = target.ok_or_else(|| CoreError::not_found(&requested))?;
                    debug!("Navigated to {}", resolved.route);
                    self.current = Some(resolved.route);
                    return Ok(if redirected {
                        Navigation::Redirected {
                            requested,
                            to: resolved,
                        }
                    } else {
                        Navigation::Completed(resolved)
                    });
                }
                NavigationDecision::Redirect(route) => {
                    debug!("Guard redirected '{requested}' to {route}");
                    target = resolve(route.path());
                    redirected = true;
                }
            }
        }

        Err(CoreError::RedirectLoop { path: requested })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;
    use crate::testing::test_context;

    #[test]
    fn login_is_always_allowed() {
        let (signed_out, ..) = test_context(None);
        let (signed_in, ..) = test_context(Some("abc123"));

        for ctx in [signed_out, signed_in] {
            let guard = RouteGuard::new(ctx);
            assert_eq!(
                guard.check(Some(Route::Login), None),
                NavigationDecision::Allow
            );
            assert_eq!(
                guard.check(Some(Route::Login), Some(Route::Stats)),
                NavigationDecision::Allow
            );
        }
    }

    #[test]
    fn protected_routes_need_a_credential() {
        let (ctx, store, ..) = test_context(None);
        let guard = RouteGuard::new(ctx);

        for route in Route::ALL.into_iter().filter(|r| *r != Route::Login) {
            assert_eq!(
                guard.check(Some(route), None),
                NavigationDecision::Redirect(Route::Login)
            );
        }
        assert_eq!(
            guard.check(None, None),
            NavigationDecision::Redirect(Route::Login)
        );

        store.save(&"any-token".into()).unwrap();
        for route in Route::ALL {
            assert_eq!(guard.check(Some(route), None), NavigationDecision::Allow);
        }
    }

    #[test]
    fn signed_out_navigation_lands_on_login() {
        let (ctx, ..) = test_context(None);
        let mut router = Router::new(ctx);

        let nav = router.navigate("/providers").unwrap();
        assert_eq!(nav.route(), Route::Login);
        assert!(matches!(
            &nav,
            Navigation::Redirected { requested, .. } if requested == "/providers"
        ));
        assert_eq!(router.current(), Some(Route::Login));
    }

    #[test]
    fn signed_in_navigation_completes() {
        let (ctx, ..) = test_context(Some("abc123"));
        let mut router = Router::new(ctx);

        let nav = router.navigate_fragment("#/stats").unwrap();
        assert!(matches!(nav, Navigation::Completed(_)));
        assert_eq!(router.current(), Some(Route::Stats));
    }

    #[test]
    fn unknown_path_depends_on_session() {
        let (ctx, store, ..) = test_context(None);
        let mut router = Router::new(ctx);

        assert_eq!(router.navigate("/missing").unwrap().route(), Route::Login);

        store.save(&"abc123".into()).unwrap();
        let err = router.navigate("/missing").unwrap_err();
        assert_eq!(err, CoreError::not_found("/missing"));
        // A failed navigation keeps the previous route
        assert_eq!(router.current(), Some(Route::Login));
    }

    #[test]
    fn credential_removed_mid_session_redirects_next_navigation() {
        let (ctx, store, ..) = test_context(Some("abc123"));
        let mut router = Router::new(ctx);

        assert_eq!(router.navigate("/endpoints").unwrap().route(), Route::Endpoints);
        store.clear().unwrap();
        assert_eq!(router.navigate("/stats").unwrap().route(), Route::Login);
    }
}
