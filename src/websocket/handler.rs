use crate::{
    error::GameError,
    models::{GameSummary, PlayerId},
    websocket::messages::{ClientMessage, RejectionInfo, ServerMessage},
    AppState,
};
use axum::{
    extract::{
        ws::{Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use dashmap::DashMap;
use futures::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

/// Query parameters of the WebSocket upgrade request
#[derive(Debug, Deserialize)]
pub struct ConnectParams {
    pub player_id: PlayerId,
}

/// WebSocket upgrade handler. The hub has already identified the player.
pub async fn handle_websocket(
    Query(params): Query<ConnectParams>,
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    tracing::info!("WebSocket upgrade for player {}", params.player_id);
    ws.on_upgrade(move |socket| handle_socket(socket, state, params.player_id))
}

/// Handle individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>, player_id: PlayerId) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(100);

    let own_tx = tx.clone();
    state.connections.insert(player_id, tx.clone());
    tracing::info!("WebSocket connection established for player {}", player_id);

    // Spawn a task to send messages to the client
    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            match serde_json::to_string(&msg) {
                Ok(json) => {
                    if sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                }
            }
        }
    });

    // Handle incoming messages from the client
    let state_for_recv = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            match msg {
                Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                    Ok(client_msg) => {
                        if let Err(e) =
                            handle_client_message(client_msg, &state_for_recv, &tx, player_id).await
                        {
                            tracing::error!("Error handling message: {}", e);
                            let error_msg = ServerMessage::Error {
                                message: e.to_string(),
                            };
                            let _ = tx.send(error_msg).await;
                        }
                    }
                    Err(e) => {
                        tracing::error!("Failed to parse message: {}", e);
                        let error_msg = ServerMessage::Error {
                            message: format!("Invalid message format: {}", e),
                        };
                        let _ = tx.send(error_msg).await;
                    }
                },
                Message::Close(_) => {
                    tracing::info!("Client disconnected: player {}", player_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Wait for either task to finish
    tokio::select! {
        _ = (&mut send_task) => {
            recv_task.abort();
        }
        _ = (&mut recv_task) => {
            send_task.abort();
        }
    }

    release_connection(&state.connections, player_id, &own_tx);

    tracing::info!("WebSocket connection closed for player {}", player_id);
}

/// Drop the player's entry unless a newer socket has replaced it
fn release_connection(
    connections: &DashMap<PlayerId, mpsc::Sender<ServerMessage>>,
    player_id: PlayerId,
    tx: &mpsc::Sender<ServerMessage>,
) {
    connections.remove_if(&player_id, |_, current| current.same_channel(tx));
}

/// Handle individual client messages
async fn handle_client_message(
    msg: ClientMessage,
    state: &AppState,
    tx: &mpsc::Sender<ServerMessage>,
    player_id: PlayerId,
) -> anyhow::Result<()> {
    match msg {
        ClientMessage::CreateGame { mut player_ids } => {
            if !player_ids.contains(&player_id) {
                player_ids.insert(0, player_id);
            }
            tracing::info!("Player {} creating game for {:?}", player_id, player_ids);

            let game_id = state.registry.create_session(&player_ids)?;
            broadcast(state, &player_ids, ServerMessage::GameCreated { game_id }).await;
            broadcast_state(state, game_id, &player_ids).await;
        }
        ClientMessage::PlaceMove { game_id, tiles } => {
            tracing::info!("Player {} placing {} tiles in game {}", player_id, tiles.len(), game_id);
            let seats = seats_of(state, game_id);

            match state.registry.place_move(game_id, player_id, &tiles) {
                Ok(result) => {
                    let accepted = ServerMessage::MoveAccepted {
                        game_id,
                        player_id,
                        score: result.outcome.score,
                        formed_words: result.outcome.formed_words,
                    };
                    broadcast(state, &seats, accepted).await;
                    after_action(state, game_id, &seats, result.summary).await;
                }
                Err(e) => reject(tx, game_id, &e).await?,
            }
        }
        ClientMessage::PassTurn { game_id } => {
            tracing::info!("Player {} passing turn in game {}", player_id, game_id);
            let seats = seats_of(state, game_id);

            match state.registry.pass_turn(game_id, player_id) {
                Ok(result) => {
                    broadcast(state, &seats, ServerMessage::TurnPassed { game_id, player_id }).await;
                    after_action(state, game_id, &seats, result.summary).await;
                }
                Err(e) => reject(tx, game_id, &e).await?,
            }
        }
        ClientMessage::ExchangeTiles {
            game_id,
            tile_indices,
        } => {
            tracing::info!("Player {} exchanging {:?} in game {}", player_id, tile_indices, game_id);
            let seats = seats_of(state, game_id);

            match state.registry.exchange_tiles(game_id, player_id, &tile_indices) {
                Ok(result) => {
                    let exchanged = ServerMessage::TilesExchanged {
                        game_id,
                        player_id,
                        exchanged_count: result.outcome.exchanged_count,
                    };
                    broadcast(state, &seats, exchanged).await;
                    after_action(state, game_id, &seats, result.summary).await;
                }
                Err(e) => reject(tx, game_id, &e).await?,
            }
        }
        ClientMessage::LeaveGame { game_id } => {
            tracing::info!("Player {} leaving game {}", player_id, game_id);
            let seats = seats_of(state, game_id);

            match state.registry.leave_game(game_id, player_id) {
                Ok(result) => after_action(state, game_id, &seats, result.summary).await,
                Err(e) => reject(tx, game_id, &e).await?,
            }
        }
        ClientMessage::GetState { game_id } => match state.registry.get_state(game_id, player_id) {
            Ok(view) => {
                tx.send(ServerMessage::GameState {
                    game_id,
                    state: view,
                })
                .await?
            }
            Err(e) => reject(tx, game_id, &e).await?,
        },
    }

    Ok(())
}

fn seats_of(state: &AppState, game_id: Uuid) -> Vec<PlayerId> {
    state.registry.players(game_id).unwrap_or_default()
}

async fn reject(
    tx: &mpsc::Sender<ServerMessage>,
    game_id: Uuid,
    err: &GameError,
) -> anyhow::Result<()> {
    tracing::debug!("Rejected action in game {}: {}", game_id, err);
    tx.send(ServerMessage::MoveRejected {
        game_id,
        reason: RejectionInfo::from(err),
    })
    .await?;
    Ok(())
}

/// Announce the end of the game, or push everyone their updated view
async fn after_action(
    state: &AppState,
    game_id: Uuid,
    seats: &[PlayerId],
    summary: Option<GameSummary>,
) {
    match summary {
        Some(summary) => broadcast(state, seats, ServerMessage::GameOver { game_id, summary }).await,
        None => broadcast_state(state, game_id, seats).await,
    }
}

/// Send each seated player their own view of the game
async fn broadcast_state(state: &AppState, game_id: Uuid, seats: &[PlayerId]) {
    for &seat in seats {
        let Ok(view) = state.registry.get_state(game_id, seat) else {
            continue;
        };
        send_to(state, seat, ServerMessage::GameState { game_id, state: view }).await;
    }
}

async fn broadcast(state: &AppState, seats: &[PlayerId], message: ServerMessage) {
    for &seat in seats {
        send_to(state, seat, message.clone()).await;
    }
}

async fn send_to(state: &AppState, player_id: PlayerId, message: ServerMessage) {
    // Clone the sender so no map guard is held across the await
    let tx = state.connections.get(&player_id).map(|entry| entry.value().clone());
    if let Some(tx) = tx {
        let _ = tx.send(message).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closing_stale_socket_keeps_newer_connection() {
        let connections = DashMap::new();
        let (old_tx, _old_rx) = mpsc::channel::<ServerMessage>(1);
        let (new_tx, _new_rx) = mpsc::channel::<ServerMessage>(1);

        connections.insert(7, old_tx.clone());
        connections.insert(7, new_tx.clone());

        release_connection(&connections, 7, &old_tx);
        assert!(connections.get(&7).unwrap().same_channel(&new_tx));

        release_connection(&connections, 7, &new_tx);
        assert!(connections.get(&7).is_none());
    }
}
