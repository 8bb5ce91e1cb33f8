//! Hash-history router that applies the route guard on every `hashchange`

use console_core::{Navigation, Route, Router, SessionContext};
use gloo_events::EventListener;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};

type RouteCallback = dyn Fn(&Navigation);

/// Keeps the router in sync with `location.hash`
///
/// Dropping it removes the listener.
pub struct HashRouter {
    router: Rc<RefCell<Router>>,
    _listener: EventListener,
}

impl HashRouter {
    /// Start listening and resolve the current fragment immediately
    pub fn install(session: SessionContext, on_route: impl Fn(&Navigation) + 'static) -> Self {
        let router = Rc::new(RefCell::new(Router::new(session)));
        let on_route: Rc<RouteCallback> = Rc::new(on_route);

        let listener = {
            let router = router.clone();
            let on_route = on_route.clone();
            EventListener::new(&gloo_utils::window(), "hashchange", move |_| {
                sync(&router, on_route.as_ref());
            })
        };

        sync(&router, on_route.as_ref());

        Self {
            router,
            _listener: listener,
        }
    }

    pub fn current(&self) -> Option<Route> {
        self.router.borrow().current()
    }

    /// Client-side transition to `route`; the guard runs when the hash changes
    pub fn push(&self, route: Route) {
        if let Err(e) = gloo_utils::window().location().set_hash(route.path()) {
            warn!("Failed to navigate to {route}: {e:?}");
        }
    }
}

fn current_fragment() -> String {
    gloo_utils::window().location().hash().unwrap_or_default()
}

fn sync(router: &RefCell<Router>, on_route: &RouteCallback) {
    let fragment = current_fragment();
    let result = router.borrow_mut().navigate_fragment(&fragment);

    match result {
        Ok(navigation) => {
            if let Navigation::Redirected { requested, to } = &navigation {
                debug!("Redirecting {requested} to {}", to.route);
                // Replace so the guarded entry does not stay in history; only the
                // fragment changes, the document stays loaded
                if let Err(e) = gloo_utils::window()
                    .location()
                    .replace(&to.route.fragment())
                {
                    warn!("Failed to rewrite location: {e:?}");
                }
            }
            on_route(&navigation);
        }
        Err(e) => warn!("Navigation to '{fragment}' failed: {e}"),
    }
}
