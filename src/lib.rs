// Library root
// -----------
// A small client for the wiki page API, with two front-ends over one
// transport.
//
// Module responsibilities:
// - `config`: loads the JSON settings file (domain, credentials, space).
// - `api`: the `Transport` seam and the reqwest client behind it.
// - `models`: request/response shapes of the page API.
// - `pages`: list/get/create/update/delete built on a `Transport`.
// - `cli`: flag parsing, validation and console output.
// - `web`: the HTML form server.
// - `error`, `logging`: shared error type and tracing setup.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod pages;
pub mod web;

pub use api::{ApiClient, Transport};
pub use config::Settings;
pub use error::NotesError;
