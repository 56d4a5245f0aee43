pub mod archive;
pub mod asset;
pub mod catalog;
pub mod config;
pub mod github;
pub mod http;
pub mod package;
pub mod runtime;
pub mod signature;
pub mod webhook;
