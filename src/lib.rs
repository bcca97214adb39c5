//! Interactive viewer for the whitespace aligned tables printed by tools
//! like `kubectl`, `docker`, `ps` or `helm`.
//!
//! The session is a pure state machine ([`model::Model::update`]) fed with
//! [`domain::Message`]s; [`controller`] turns terminal events into messages
//! and [`ui`] draws whatever [`model::Model::ui_data`] describes.

pub mod controller;
pub mod domain;
pub mod layout;
pub mod model;
pub mod parser;
pub mod table;
pub mod ui;
