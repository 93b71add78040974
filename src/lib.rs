//! Caption generator service: upload an image, get AI caption candidates.
//!
//! One linear flow per user action: encode the upload, ask a vision-language
//! model for captions, publish the image to a media host, and persist the
//! resulting record in a document store. A small web surface sits on top.

pub mod ai;
pub mod app;
pub mod encoding;
pub mod error;
pub mod media;
pub mod models;
pub mod prompts;
pub mod store;
pub mod web;

pub use error::{Error, Result};
