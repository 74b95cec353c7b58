//! Postboard App
//!
//! Client application for the posts service: a fragment router, view
//! actions for the list, detail and create screens, the post creation
//! workflow, and a poller that watches image-effect jobs.
//!
//! Architecture:
//! - Router: location fragment to [`Route`](postboard_core::domain::route::Route), with subscriptions
//! - Controller: fetch data for a route and describe it as a [`View`](view::View)
//! - Create: the ordered post, image, effect-job workflow
//! - Poller: job status state machine over an injectable [`Clock`](clock::Clock)
//! - App: ties the above to a [`Surface`](surface::Surface), discarding stale renders

pub mod app;
pub mod clock;
pub mod config;
pub mod controller;
pub mod create;
pub mod poller;
pub mod router;
pub mod status;
pub mod surface;
pub mod view;

pub use app::App;
pub use config::AppConfig;
