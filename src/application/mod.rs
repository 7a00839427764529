// Application layer - Fetch, render and poll use cases
pub mod dashboard_service;
pub mod dashboard_view;
pub mod poller;
pub mod renderer;
pub mod weather_api;

#[cfg(test)]
pub(crate) mod testing;
