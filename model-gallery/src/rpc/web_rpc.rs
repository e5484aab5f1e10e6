use bevy::diagnostic::DiagnosticsStore;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::engine::assets::catalog::Catalog;
use crate::engine::loading::model_loader::{ModelLoadSet, ModelLoadSettled};
use crate::engine::loading::progress::ModelLoadProgress;
use crate::engine::systems::fps_tracking::smoothed_fps;
use crate::gallery::state::{
    CommandSource, GalleryCommand, GalleryCommandEvent, GalleryState, ViewMode,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

#[cfg(target_arch = "wasm32")]
use web_sys::{MessageEvent, window};

/// JSON-RPC 2.0 request structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub method: String,
    #[serde(default)]
    pub params: Value,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 response structure.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcResponse {
    pub jsonrpc: String,
    pub result: Option<Value>,
    pub error: Option<RpcError>,
    pub id: Option<Value>,
}

/// JSON-RPC 2.0 notification structure for one-way communication.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: Value,
}

/// JSON-RPC error structure following specification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RpcError {
    pub code: i32,
    pub message: String,
    pub data: Option<Value>,
}

/// Resource managing bidirectional RPC communication between the host page and Bevy.
/// Handles both request-response patterns and notification broadcasting.
#[derive(Resource, Default)]
pub struct WebRpcInterface {
    outgoing_notifications: Vec<RpcNotification>,
    outgoing_responses: Vec<RpcResponse>,
}

impl WebRpcInterface {
    /// Send notification to the host page without expecting response.
    pub fn send_notification(&mut self, method: &str, params: Value) {
        self.outgoing_notifications.push(RpcNotification {
            jsonrpc: "2.0".to_string(),
            method: method.to_string(),
            params,
        });
    }

    /// Queue response for transmission to the host page.
    fn queue_response(&mut self, response: RpcResponse) {
        self.outgoing_responses.push(response);
    }
}

/// Plugin establishing WebRPC communication layer for iframe-based deployment.
pub struct WebRpcPlugin;

impl Plugin for WebRpcPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WebRpcInterface>()
            .add_event::<IncomingRpcMessage>()
            .add_systems(
                Update,
                (
                    process_incoming_messages,
                    handle_rpc_messages,
                    notify_gallery_state_changed,
                    notify_model_load_settled,
                    send_outgoing_messages,
                )
                    .chain()
                    .after(ModelLoadSet),
            );

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Startup, setup_message_listener);
    }
}

#[cfg(target_arch = "wasm32")]
fn setup_message_listener(mut commands: Commands) {
    use std::sync::Arc;
    use std::sync::Mutex;

    // Shared between the JS callback and the polling system.
    let message_queue: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let queue_clone = message_queue.clone();

    let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
        if let Ok(data) = event.data().dyn_into::<js_sys::JsString>() {
            let message_str: String = data.into();

            if message_str.contains("jsonrpc") {
                if let Ok(mut queue) = queue_clone.lock() {
                    queue.push(message_str);
                }
            }
        }
    }) as Box<dyn FnMut(MessageEvent)>);

    if let Some(window) = window() {
        if let Err(e) =
            window.add_event_listener_with_callback("message", closure.as_ref().unchecked_ref())
        {
            error!("Failed to register message listener: {:?}", e);
            return;
        }
    }

    // Ownership moves to JS so the listener outlives this system.
    closure.forget();
    commands.insert_resource(MessageQueue(message_queue));
}

/// Resource wrapping thread-safe message queue for WASM event handling.
#[derive(Resource)]
struct MessageQueue(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

/// Event representing incoming RPC message from the host page.
#[derive(Event)]
struct IncomingRpcMessage {
    content: String,
}

fn process_incoming_messages(
    message_queue: Option<Res<MessageQueue>>,
    mut message_events: EventWriter<IncomingRpcMessage>,
) {
    let Some(queue_res) = message_queue else {
        return;
    };

    let messages = if let Ok(mut queue) = queue_res.0.lock() {
        std::mem::take(&mut *queue)
    } else {
        Vec::new()
    };

    for message_str in messages {
        message_events.write(IncomingRpcMessage {
            content: message_str,
        });
    }
}

/// Read-only world state a request may consult.
pub struct RpcContext<'a> {
    pub catalog: Option<&'a Catalog>,
    pub gallery: &'a GalleryState,
    pub diagnostics: &'a DiagnosticsStore,
}

/// Successful handling of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct RpcReply {
    pub result: Value,
    /// Change to queue for the gallery controller.
    pub command: Option<GalleryCommand>,
}

impl RpcReply {
    fn query(result: Value) -> Self {
        Self {
            result,
            command: None,
        }
    }

    fn command(method: &str, command: GalleryCommand) -> Self {
        Self {
            result: json!({
                "success": true,
                "queued": method
            }),
            command: Some(command),
        }
    }
}

fn handle_rpc_messages(
    mut events: EventReader<IncomingRpcMessage>,
    diagnostics: Res<DiagnosticsStore>,
    catalog: Option<Res<Catalog>>,
    gallery: Res<GalleryState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
    mut gallery_commands: EventWriter<GalleryCommandEvent>,
) {
    let context = RpcContext {
        catalog: catalog.as_deref(),
        gallery: &gallery,
        diagnostics: &diagnostics,
    };

    for event in events.read() {
        debug!("Received RPC: {}", event.content);

        let request = match serde_json::from_str::<RpcRequest>(&event.content) {
            Ok(request) => request,
            Err(parse_error) => {
                warn!("Unparseable RPC message: {}", parse_error);
                rpc_interface.send_notification(
                    "debug_message",
                    json!({
                        "message": format!("Parse error: {}", parse_error)
                    }),
                );
                continue;
            }
        };

        let outcome = route_request(&request.method, &request.params, &context);
        if let Ok(RpcReply {
            command: Some(command),
            ..
        }) = &outcome
        {
            gallery_commands.write(GalleryCommandEvent::new(command.clone(), CommandSource::Rpc));
        }

        // Notifications (no id) never get a response.
        if let Some(id) = request.id {
            rpc_interface.queue_response(create_response(id, outcome.map(|reply| reply.result)));
        }
    }
}

/// Map a request onto a query result or a gallery command.
pub fn route_request(
    method: &str,
    params: &Value,
    context: &RpcContext,
) -> Result<RpcReply, RpcError> {
    match method {
        "set_search_term" => {
            parse_search_term(params).map(|command| RpcReply::command(method, command))
        }
        "set_category" => parse_category(params, loaded_catalog(context)?)
            .map(|command| RpcReply::command(method, command)),
        "set_view_mode" => {
            parse_view_mode(params).map(|command| RpcReply::command(method, command))
        }
        "toggle_expand" => parse_toggle_expand(params, loaded_catalog(context)?)
            .map(|command| RpcReply::command(method, command)),
        "clear_filters" => Ok(RpcReply::command(method, GalleryCommand::ClearFilters)),
        "get_gallery_state" => Ok(RpcReply::query(context.gallery.to_json())),
        "get_catalog_stats" => {
            let stats = loaded_catalog(context)?.stats();
            serde_json::to_value(stats)
                .map(RpcReply::query)
                .map_err(|e| RpcError::internal_error(&e.to_string()))
        }
        "get_fps" => Ok(RpcReply::query(json!({
            "fps": smoothed_fps(context.diagnostics).unwrap_or(0.0) as f32
        }))),
        _ => {
            warn!("Unknown RPC method: {}", method);
            Err(RpcError::method_not_found(method))
        }
    }
}

fn loaded_catalog<'a>(context: &RpcContext<'a>) -> Result<&'a Catalog, RpcError> {
    context
        .catalog
        .ok_or_else(|| RpcError::internal_error("Catalog not loaded"))
}

fn parse_search_term(params: &Value) -> Result<GalleryCommand, RpcError> {
    #[derive(Deserialize)]
    struct SearchParams {
        term: String,
    }

    let parsed = serde_json::from_value::<SearchParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'term' parameter"))?;
    Ok(GalleryCommand::SetSearchTerm(parsed.term))
}

fn parse_category(params: &Value, catalog: &Catalog) -> Result<GalleryCommand, RpcError> {
    #[derive(Deserialize)]
    struct CategoryParams {
        category: String,
    }

    let parsed = serde_json::from_value::<CategoryParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'category' parameter"))?;
    let filter = catalog.parse_category(&parsed.category).ok_or_else(|| {
        RpcError::invalid_params(&format!("Unknown category: {}", parsed.category))
    })?;
    Ok(GalleryCommand::SetCategory(filter))
}

fn parse_view_mode(params: &Value) -> Result<GalleryCommand, RpcError> {
    #[derive(Deserialize)]
    struct ViewModeParams {
        mode: String,
    }

    let parsed = serde_json::from_value::<ViewModeParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'mode' parameter"))?;
    let mode = ViewMode::from_string(&parsed.mode)
        .ok_or_else(|| RpcError::invalid_params(&format!("Unknown view mode: {}", parsed.mode)))?;
    Ok(GalleryCommand::SetViewMode(mode))
}

fn parse_toggle_expand(params: &Value, catalog: &Catalog) -> Result<GalleryCommand, RpcError> {
    #[derive(Deserialize)]
    struct ExpandParams {
        id: String,
    }

    let parsed = serde_json::from_value::<ExpandParams>(params.clone())
        .map_err(|_| RpcError::invalid_params("Expected 'id' parameter"))?;
    if catalog.get(&parsed.id).is_none() {
        return Err(RpcError::invalid_params(&format!(
            "Unknown model id: {}",
            parsed.id
        )));
    }
    Ok(GalleryCommand::ToggleExpand(parsed.id))
}

fn create_response(id: Value, outcome: Result<Value, RpcError>) -> RpcResponse {
    let (result, error) = match outcome {
        Ok(value) => (Some(value), None),
        Err(error) => (None, Some(error)),
    };
    RpcResponse {
        jsonrpc: "2.0".to_string(),
        result,
        error,
        id: Some(id),
    }
}

/// Push the full filter state whenever the controller changes it.
fn notify_gallery_state_changed(
    gallery: Res<GalleryState>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    if gallery.is_changed() {
        rpc_interface.send_notification("gallery_state_changed", gallery.to_json());
    }
}

fn notify_model_load_settled(
    mut settled: EventReader<ModelLoadSettled>,
    progress: Res<ModelLoadProgress>,
    mut rpc_interface: ResMut<WebRpcInterface>,
) {
    for event in settled.read() {
        let failure = event.result.as_ref().err().map(ToString::to_string);
        rpc_interface.send_notification(
            "model_load_settled",
            json!({
                "model_id": event.model_id,
                "loaded": event.result.is_ok(),
                "failure": failure,
                "progress": {
                    "settled": progress.settled(),
                    "requested": progress.requested(),
                    "percent": progress.percent()
                }
            }),
        );
    }
}

/// Send queued notifications and responses to the host page.
fn send_outgoing_messages(mut rpc_interface: ResMut<WebRpcInterface>) {
    for notification in rpc_interface.outgoing_notifications.drain(..) {
        send_message_to_parent(&notification);
    }

    // Responses after notifications so state updates arrive first.
    for response in rpc_interface.outgoing_responses.drain(..) {
        send_message_to_parent(&response);
    }
}

/// Send serialized message to parent window.
fn send_message_to_parent<T: Serialize>(message: &T) {
    #[cfg(target_arch = "wasm32")]
    {
        match serde_json::to_string(message) {
            Ok(json) => {
                if let Some(window) = window() {
                    if let Some(parent) = window.parent().ok().flatten() {
                        if let Err(e) = parent.post_message(&JsValue::from_str(&json), "*") {
                            error!("Failed to send message to parent: {:?}", e);
                        }
                    } else {
                        warn!("No parent window available for message transmission");
                    }
                } else {
                    error!("Window object not available");
                }
            }
            Err(e) => {
                error!("Failed to serialize message: {}", e);
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = message;
    }
}

/// Standard RPC error codes and constructors.
impl RpcError {
    pub fn method_not_found(method: &str) -> Self {
        Self {
            code: -32601,
            message: "Method not found".to_string(),
            data: Some(json!({ "method": method })),
        }
    }

    pub fn invalid_params(message: &str) -> Self {
        Self {
            code: -32602,
            message: message.to_string(),
            data: None,
        }
    }

    pub fn internal_error(message: &str) -> Self {
        Self {
            code: -32603,
            message: message.to_string(),
            data: None,
        }
    }
}
