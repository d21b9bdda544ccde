//! Minimal Google OAuth 2.0 login: send the browser to the consent screen, trade the returned
//! authorization code for an access token, and relay the user's profile back to the caller.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod config;
pub mod error;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod provider;
#[cfg(feature = "server")] pub mod server;

mod _prelude {
	pub use std::{
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
		time::Duration,
	};

	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::Value;
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(feature = "server", not(test)))] use color_eyre as _;
#[cfg(test)] use {color_eyre as _, httpmock as _, parking_lot as _, tokio as _, tower as _};
