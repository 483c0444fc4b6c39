#![deny(missing_docs)]

//! # DynamoDB User API
//!
//! A serverless CRUD API for user records stored in an Amazon DynamoDB table.
//!
//! ## Overview
//!
//! The crate is deployed as an AWS Lambda function behind API Gateway. Every
//! invocation is routed by HTTP method to a single store operation:
//! - `GET` fetches one user (`?email=`) or every user
//! - `POST` creates a user after validating its email
//! - `PATCH` / `PUT` set arbitrary string, integer or boolean attributes
//! - `DELETE` removes a user
//!
//! Store requests are built with typed operations instead of hand-written
//! expression strings, and every attribute name is aliased:
//!
//! ```no_run
//! use aws_sdk_dynamodb::Client;
//! use dynamodb_user_api::{common, write};
//! use indexmap::IndexMap;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! # let client = Client::from_conf(aws_sdk_dynamodb::config::Config::builder().build());
//! let update_item = write::update_item::UpdateItem {
//!     key: common::key::Key {
//!         name: "email".to_string(),
//!         value: "jane@example.com".to_string(),
//!     },
//!     assignments: IndexMap::from([
//!         ("name".to_string(), "Jane".to_string()),
//!         ("status".to_string(), "active".to_string()),
//!     ]),
//!     write_args: write::common::WriteArgs {
//!         condition: Some(common::condition::KeyCondition {
//!             name: "email".to_string(),
//!             condition: common::condition::Condition::AttributeExists,
//!         }),
//!         table_name: "users".to_string(),
//!     },
//! };
//! // The crate builds: "SET #set0 = :set0, #set1 = :set1"
//! // guarded by "attribute_exists(#cond0)"
//! update_item.send(&client).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`mod@common`] - Shared utilities for keys and conditions
//! - [`mod@read`] - Read operations (GetItem, Scan)
//! - [`mod@write`] - Write operations (PutItem, UpdateItem, DeleteItem)
//! - [`mod@user`] - User records and stores
//! - [`mod@handlers`] - Request dispatch
//! - [`mod@validators`] - Email validation
//! - [`mod@config`] - Environment configuration

/// Common utilities for keys and condition expressions.
pub mod common;

/// Environment configuration.
pub mod config;

/// Lambda request handlers.
pub mod handlers;

/// Read operations for retrieving data from DynamoDB tables.
///
/// This module provides operations for:
/// - Getting individual items by key
/// - Scanning entire tables
pub mod read;

/// User records and stores.
pub mod user;

/// Input validators.
pub mod validators;

/// Write operations for modifying data in DynamoDB tables.
///
/// This module provides operations for:
/// - Putting new items or replacing existing ones
/// - Setting attributes on existing items
/// - Deleting items by key
pub mod write;
