//! Two-screen navigation with one fetch per screen activation.
//!
//! Activating a screen spawns a single task that fetches its data. The task only
//! holds a `Weak` reference to the screen state. Replacing the screen aborts the
//! task, and a result that lands after teardown is discarded.

use std::sync::{Arc, Weak};

use tokio::sync::{Mutex, Notify};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use crate::api::CatalogApi;
use crate::route::Route;
use crate::view::{DetailView, ListView};

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenState {
    List(ListView),
    Detail(DetailView),
}

impl ScreenState {
    fn for_route(route: Route) -> Self {
        match route {
            Route::List => ScreenState::List(ListView::default()),
            Route::Detail { .. } => ScreenState::Detail(DetailView::default()),
        }
    }

    pub fn title(&self) -> String {
        match self {
            ScreenState::List(view) => view.title().to_string(),
            ScreenState::Detail(view) => view.title().to_string(),
        }
    }

    pub fn render(&self) -> String {
        match self {
            ScreenState::List(view) => view.render(),
            ScreenState::Detail(view) => view.render(),
        }
    }
}

struct ActiveScreen {
    route: Route,
    state: Arc<Mutex<ScreenState>>,
    task: Option<JoinHandle<bool>>,
}

impl Drop for ActiveScreen {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                debug!(route = ?self.route, "aborting pending fetch");
            }
            task.abort();
        }
    }
}

pub struct Navigator {
    api: Arc<dyn CatalogApi>,
    redraw: Arc<Notify>,
    active: ActiveScreen,
}

impl Navigator {
    /// Start on the list screen. Must be called from within a tokio runtime.
    pub fn start(api: Arc<dyn CatalogApi>) -> Self {
        let redraw = Arc::new(Notify::new());
        let active = activate(&api, &redraw, Route::List);
        Self { api, redraw, active }
    }

    pub fn route(&self) -> Route {
        self.active.route
    }

    /// Notified each time a fetch result is applied to the active screen.
    pub fn redraw_signal(&self) -> Arc<Notify> {
        Arc::clone(&self.redraw)
    }

    /// Replace the active screen. The previous screen's fetch is aborted.
    pub fn navigate(&mut self, route: Route) {
        info!(from = ?self.active.route, to = ?route, "navigate");
        self.active = activate(&self.api, &self.redraw, route);
    }

    /// Open the row at 1-based `position` on the list screen.
    pub async fn select(&mut self, position: usize) -> Option<Route> {
        let route = {
            let state = self.active.state.lock().await;
            match &*state {
                ScreenState::List(view) => view.row(position).map(Route::detail_for),
                ScreenState::Detail(_) => None,
            }
        };
        match route {
            Some(route) => {
                self.navigate(route);
                Some(route)
            }
            None => {
                warn!(position, "no such row");
                None
            }
        }
    }

    /// Return from detail to a freshly loaded list. No-op on the list screen.
    pub fn back(&mut self) -> bool {
        match self.active.route {
            Route::List => false,
            Route::Detail { .. } => {
                self.navigate(Route::List);
                true
            }
        }
    }

    /// The "Add to Cart" control. It has no backing state.
    pub fn press_action(&self) {
        debug!(route = ?self.active.route, "add to cart pressed; no cart configured");
    }

    /// Wait for the active screen's fetch to finish, if one is in flight.
    pub async fn settle(&mut self) {
        if let Some(task) = self.active.task.take() {
            if let Err(err) = task.await {
                if err.is_panic() {
                    warn!(?err, "fetch task panicked");
                }
            }
        }
    }

    pub async fn snapshot(&self) -> ScreenState {
        self.active.state.lock().await.clone()
    }

    pub async fn title(&self) -> String {
        self.active.state.lock().await.title()
    }

    pub async fn render(&self) -> String {
        self.active.state.lock().await.render()
    }
}

fn activate(api: &Arc<dyn CatalogApi>, redraw: &Arc<Notify>, route: Route) -> ActiveScreen {
    let state = Arc::new(Mutex::new(ScreenState::for_route(route)));
    let task = tokio::spawn(load(
        Arc::clone(api),
        route,
        Arc::downgrade(&state),
        Arc::clone(redraw),
    ));
    ActiveScreen {
        route,
        state,
        task: Some(task),
    }
}

/// Fetch data for `route` and apply it. Returns whether the state was updated.
#[instrument(skip(api, state, redraw))]
async fn load(
    api: Arc<dyn CatalogApi>,
    route: Route,
    state: Weak<Mutex<ScreenState>>,
    redraw: Arc<Notify>,
) -> bool {
    let applied = match route {
        Route::List => {
            let items = match api.fetch_catalog().await {
                Ok(items) => items,
                Err(err) => {
                    warn!(?err, "catalog fetch failed");
                    Vec::new()
                }
            };
            debug!(count = items.len(), "catalog loaded");
            apply(&state, |screen| match screen {
                ScreenState::List(view) => {
                    view.set_items(items);
                    true
                }
                ScreenState::Detail(_) => false,
            })
            .await
        }
        Route::Detail { id } => match api.fetch_item(id).await {
            Ok(item) => {
                debug!(%id, title = %item.title, "item loaded");
                apply(&state, |screen| match screen {
                    ScreenState::Detail(view) => {
                        view.set_item(item);
                        true
                    }
                    ScreenState::List(_) => false,
                })
                .await
            }
            Err(err) => {
                warn!(?err, %id, "item fetch failed");
                false
            }
        },
    };
    if applied {
        redraw.notify_one();
    }
    applied
}

async fn apply<F>(state: &Weak<Mutex<ScreenState>>, update: F) -> bool
where
    F: FnOnce(&mut ScreenState) -> bool,
{
    let Some(state) = state.upgrade() else {
        debug!("screen torn down; discarding result");
        return false;
    };
    let mut guard = state.lock().await;
    update(&mut guard)
}
