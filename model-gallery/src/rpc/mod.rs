//! JSON-RPC 2.0 communication layer for host page integration.
//!
//! Implements bidirectional messaging between the Bevy gallery and its host page via
//! iframe postMessage, supporting both request-response and notification patterns.
//!
//! ## Architecture
//!
//! The RPC system uses standard JSON-RPC 2.0 protocol with:
//! - **Requests**: Expect responses with matching IDs
//! - **Notifications**: One-way messages without responses
//! - **Responses**: Reply to requests with results or errors
//!
//! ## Message Flow
//!
//! ```text
//! Host (Parent Window)  <──postMessage──>  Bevy (iframe)
//!        │                                        │
//!        ├─ Request (with ID) ──────────────────> │
//!        │                                        ├─ Process request
//!        │ <───────────────── Response (with ID) ─┤
//!        │                                        │
//!        │ <────────── Notification (no ID) ─────┤
//! ```
//!
//! ## Adding New RPC Methods
//!
//! Add a method case in `route_request()`. Queries return a JSON value,
//! state changes return a `GalleryCommand` that is queued for the controller:
//!
//! ```rust,ignore
//! pub fn route_request(method: &str, params: &Value, context: &RpcContext)
//!     -> Result<RpcReply, RpcError>
//! {
//!     match method {
//!         "your_method_name" => parse_your_method(params)
//!             .map(|command| RpcReply::command(method, command)),
//!         // ... existing methods
//!         _ => Err(RpcError::method_not_found(method)),
//!     }
//! }
//! ```
//!
//! Parameters are deserialized into a local struct and mapped to
//! `RpcError::invalid_params` when they do not fit.
//!
//! ### Calling From the Host Page
//!
//! ```typescript
//! iframe.contentWindow.postMessage(JSON.stringify({
//!   jsonrpc: "2.0",
//!   method: "set_category",
//!   params: { category: "Sci-Fi" },
//!   id: 1
//! }), "*");
//! ```
//!
//! ## Sending Notifications from Bevy
//!
//! Use `WebRpcInterface::send_notification()` to push updates to the host:
//!
//! ```rust,ignore
//! fn your_system(mut rpc: ResMut<WebRpcInterface>) {
//!     rpc.send_notification("event_name", json!({
//!         "data": "value",
//!         "timestamp": 123456
//!     }));
//! }
//! ```
//!
//! ## Error Handling
//!
//! Standard JSON-RPC 2.0 error codes:
//! - `-32600`: Invalid request
//! - `-32601`: Method not found
//! - `-32602`: Invalid params
//! - `-32603`: Internal error
//!
//! ## Existing Methods
//!
//! ### Gallery Commands
//! - `set_search_term`: Replace the search term (`term`)
//! - `set_category`: Select a catalog category or `All` (`category`)
//! - `set_view_mode`: Switch between `grid` and `list` (`mode`)
//! - `toggle_expand`: Expand or collapse a card (`id`)
//! - `clear_filters`: Reset search term and category
//!
//! ### Queries
//! - `get_gallery_state`: Current search term, category, view mode and expanded card
//! - `get_catalog_stats`: Total models, categories and featured count
//! - `get_fps`: Retrieve current frame rate
//!
//! ### Notifications
//! - `gallery_state_changed`: Sent after any change to the gallery state
//! - `model_load_settled`: Sent when a card's model loads or falls back
//! - `fps_update`: Frame rate, every half second

/// JSON-RPC 2.0 bidirectional communication system for host page integration.
///
/// Handles request-response patterns, notifications, and WASM message listeners.
pub mod web_rpc;
