//! # Confluence API Endpoints

pub mod content;
